// ABOUTME: Session freshness state machine, token generation, and cookie helpers
// ABOUTME: Background refresh worker extends stale sessions over an mpsc channel

use crate::config::AppConfig;
use crate::entities::session;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait,
};
use tokio::sync::mpsc;
use uuid::Uuid;

pub const SESSION_COOKIE_NAME: &str = "livecart_session";

/// Where a session sits relative to the configured windows. Expired
/// sessions are treated as absent by every caller even before they are
/// purged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Younger than the fresh window; served without any refresh check.
    Fresh,
    /// Valid but past the fresh window; past the update window it also
    /// earns a background refresh.
    Stale,
    Expired,
}

pub fn classify(
    session: &session::Model,
    now: DateTime<Utc>,
    config: &AppConfig,
) -> Freshness {
    if session.expires_at <= now {
        return Freshness::Expired;
    }
    if now - session.updated_at < config.session_fresh_age {
        Freshness::Fresh
    } else {
        Freshness::Stale
    }
}

/// True when a stale session has crossed the update window and should be
/// silently refreshed out-of-band.
pub fn needs_refresh(
    session: &session::Model,
    now: DateTime<Utc>,
    config: &AppConfig,
) -> bool {
    classify(session, now, config) == Freshness::Stale
        && now - session.updated_at >= config.session_update_age
}

pub fn generate_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

pub fn create_session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::days(7))
        .path("/")
        .build()
}

pub fn create_logout_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(0))
        .path("/")
        .build()
}

/// Handle for scheduling non-blocking session refreshes. Request handling
/// sends the session id and returns immediately; the worker extends the
/// expiry before the next freshness boundary.
#[derive(Clone)]
pub struct SessionRefresher {
    tx: mpsc::UnboundedSender<Uuid>,
}

impl SessionRefresher {
    pub fn spawn(db: DatabaseConnection, config: AppConfig) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Uuid>();

        tokio::spawn(async move {
            while let Some(session_id) = rx.recv().await {
                if let Err(err) = refresh(&db, &config, session_id).await {
                    tracing::warn!(%session_id, "session refresh failed: {}", err);
                }
            }
        });

        Self { tx }
    }

    pub fn schedule(&self, session_id: Uuid) {
        // A dropped receiver means shutdown; losing the refresh is fine,
        // the session stays valid until its current expiry.
        let _ = self.tx.send(session_id);
    }
}

async fn refresh(
    db: &DatabaseConnection,
    config: &AppConfig,
    session_id: Uuid,
) -> Result<(), sea_orm::DbErr> {
    let Some(existing) = session::Entity::find_by_id(session_id).one(db).await? else {
        return Ok(());
    };

    let now = Utc::now();
    let mut active: session::ActiveModel = existing.into();
    active.expires_at = Set(now + config.session_lifetime);
    active.updated_at = Set(now);
    active.update(db).await?;

    tracing::debug!(%session_id, "session expiry extended");
    Ok(())
}
