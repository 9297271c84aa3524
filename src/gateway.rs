// ABOUTME: Session gateway: trusted-origin enforcement and session resolution
// ABOUTME: Both run before any store is touched and fail closed with 401

use crate::error::{AppError, Result};
use crate::session::{needs_refresh, SESSION_COOKIE_NAME};
use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use crate::entities::{session, user};
use crate::AppState;

/// Paths that bypass the origin check: health/documentation endpoints and
/// plain browser requests.
fn is_exempt(path: &str) -> bool {
    path == "/" || path == "/favicon.ico" || path.starts_with("/swagger")
}

/// Resolved request identity attached as an extension once the gateway has
/// let the request through.
#[derive(Clone)]
pub struct AuthContext {
    pub user: user::Model,
    pub session: session::Model,
}

/// Reject requests whose `Origin` header is absent or not on the
/// allow-list. Failed attempts are recorded with enough context for
/// rate-limiting decisions, without any session material.
pub async fn validate_origin(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let path = request.uri().path().to_string();
    if is_exempt(&path) {
        return Ok(next.run(request).await);
    }

    let source = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(mask_ip)
        .unwrap_or_else(|| "unknown".to_string());

    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok());

    match origin {
        None => {
            tracing::warn!(ip = %source, %path, "request without origin header");
            Err(AppError::Unauthorized("missing origin".to_string()))
        }
        Some(origin) if !state.config.is_trusted_origin(origin) => {
            tracing::warn!(%origin, ip = %source, %path, "invalid origin attempted access");
            Err(AppError::Unauthorized("origin not allowed".to_string()))
        }
        Some(_) => Ok(next.run(request).await),
    }
}

/// Resolve the session token (bearer header or cookie) against the identity
/// store and attach the resulting `AuthContext`. Missing, invalid, or
/// expired tokens fail closed before any store operation. Sessions past the
/// update window get a silent background refresh.
pub async fn resolve_session(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let path = request.uri().path().to_string();
    if is_exempt(&path) {
        return Ok(next.run(request).await);
    }

    let token = extract_token(&request)
        .ok_or_else(|| AppError::Unauthorized("no session token".to_string()))?;

    let resolved = state.identity.resolve_session(&token).await?;
    let Some((user, session)) = resolved else {
        tracing::warn!(%path, "invalid or expired session token");
        return Err(AppError::Unauthorized("invalid session".to_string()));
    };

    if needs_refresh(&session, Utc::now(), &state.config) {
        state.refresher.schedule(session.id);
    }

    request.extensions_mut().insert(AuthContext { user, session });
    Ok(next.run(request).await)
}

fn extract_token(request: &Request<Body>) -> Option<String> {
    if let Some(bearer) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return Some(bearer.to_string());
    }

    let jar = CookieJar::from_headers(request.headers());
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}

/// Keep enough of the address for rate-limiting, not enough to identify a
/// single host.
fn mask_ip(addr: &str) -> String {
    let addr = addr.split(',').next().unwrap_or(addr).trim();
    if let Some((prefix, _)) = addr.rsplit_once('.') {
        format!("{}.x", prefix)
    } else if let Some((prefix, _)) = addr.rsplit_once(':') {
        format!("{}:x", prefix)
    } else {
        addr.to_string()
    }
}
