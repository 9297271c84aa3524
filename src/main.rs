// ABOUTME: Main entry point for the livecart multi-vendor live commerce API
// ABOUTME: Wires config, database, stores, and the session gateway into a router

use axum::{
    extract::{Extension, Path, State},
    middleware,
    response::Json,
    routing::{delete, get, patch, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

mod catalog;
mod commerce;
mod config;
mod entities;
mod error;
mod gateway;
mod identity;
mod live;
mod migration;
mod session;
mod social;
mod types;

#[cfg(test)]
mod storage_tests;

use catalog::{CatalogStore, ProductUpdate};
use commerce::{CommerceEngine, OrderLine};
use config::AppConfig;
use error::Result;
use gateway::AuthContext;
use identity::IdentityStore;
use live::LiveCommerceStore;
use session::SessionRefresher;
use social::{NotificationRef, SocialStore};
use types::*;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub identity: IdentityStore,
    pub catalog: CatalogStore,
    pub commerce: CommerceEngine,
    pub live: LiveCommerceStore,
    pub social: SocialStore,
    pub refresher: SessionRefresher,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        let refresher = SessionRefresher::spawn(db.clone(), config.clone());
        Self {
            config: Arc::new(config),
            identity: IdentityStore::new(db.clone()),
            catalog: CatalogStore::new(db.clone()),
            commerce: CommerceEngine::new(db.clone()),
            live: LiveCommerceStore::new(db.clone()),
            social: SocialStore::new(db),
            refresher,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/auth/logout", post(logout))
        .route("/vendors", post(register_vendor))
        .route("/vendors/:vendor_id/approve", post(approve_vendor))
        .route("/vendors/:vendor_id/follow", post(follow_vendor))
        .route("/vendors/:vendor_id/follow", delete(unfollow_vendor))
        .route("/products", post(create_product))
        .route("/products/:product_id", patch(update_product))
        .route("/products/:product_id/variants", post(create_variant))
        .route("/products/:product_id/views", post(record_product_view))
        .route("/addresses", post(create_address))
        .route("/orders", post(place_order))
        .route("/orders/:order_id", get(get_order))
        .route("/orders/:order_id/advance", post(advance_order))
        .route("/orders/:order_id/cancel", post(cancel_order))
        .route("/streams", post(schedule_stream))
        .route("/streams/:stream_id/transition", post(transition_stream))
        .route("/streams/:stream_id/viewers", post(update_viewers))
        .route(
            "/streams/:stream_id/products/:product_id",
            post(promote_to_stream),
        )
        .route(
            "/streams/:stream_id/analytics/recompute",
            post(recompute_analytics),
        )
        .route("/videos", post(publish_video))
        .route(
            "/videos/:video_id/products/:product_id",
            post(link_video_product),
        )
        .route("/videos/:video_id/counters", post(bump_video_counters))
        .route("/notifications", get(list_notifications))
        .route("/notifications/:notification_id/read", post(mark_read))
        .route("/comments", post(create_comment))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gateway::resolve_session,
        ));

    Router::new()
        .route("/", get(index))
        .route("/auth/register", post(register_user))
        .merge(protected)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gateway::validate_origin,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "livecart=info,tower_http=warn".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let db = Database::connect(&config.database_url).await?;
    migration::Migrator::up(&db, None).await?;

    let port = config.port;
    let state = AppState::new(db, config);
    let app = build_router(state);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "livecart api listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> &'static str {
    "livecart api"
}

// Identity handlers

async fn register_user(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RegisterUserRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let user = state.identity.create_user(&req.name, &req.email).await?;
    let session = state
        .identity
        .issue_session(user.id, state.config.session_lifetime, None, None)
        .await?;

    let jar = jar.add(session::create_session_cookie(session.token.clone(), true));
    Ok((
        jar,
        Json(SessionResponse {
            user,
            token: session.token,
            expires_at: session.expires_at,
        }),
    ))
}

async fn logout(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<serde_json::Value>)> {
    state.identity.revoke_session(&ctx.session.token).await?;
    let jar = jar.add(session::create_logout_cookie());
    Ok((jar, Json(serde_json::json!({"success": true}))))
}

// Vendor & catalog handlers

async fn register_vendor(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<RegisterVendorRequest>,
) -> Result<Json<entities::vendor::Model>> {
    let vendor = state
        .catalog
        .register_vendor(
            ctx.user.id,
            &req.store_name,
            req.description,
            req.commission_rate_bps,
        )
        .await?;
    Ok(Json(vendor))
}

async fn approve_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
) -> Result<Json<entities::vendor::Model>> {
    Ok(Json(state.catalog.approve_vendor(vendor_id).await?))
}

async fn follow_vendor(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(vendor_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    state.social.follow(ctx.user.id, vendor_id).await?;
    state
        .social
        .notify(
            vendor_id,
            "New follower",
            &format!("{} started following your store", ctx.user.name),
            NotificationRef::Follow(ctx.user.id),
        )
        .await?;
    Ok(Json(serde_json::json!({"following": true})))
}

async fn unfollow_vendor(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(vendor_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    state.social.unfollow(ctx.user.id, vendor_id).await?;
    Ok(Json(serde_json::json!({"following": false})))
}

async fn create_product(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<CreateProductRequest>,
) -> Result<Json<entities::product::Model>> {
    let product = state
        .catalog
        .create_product(
            ctx.user.id,
            &req.name,
            req.description,
            req.price_cents,
            req.stock,
            req.sku,
        )
        .await?;
    Ok(Json(product))
}

async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<entities::product::Model>> {
    let update = ProductUpdate {
        name: req.name,
        description: req.description.map(Some),
        price_cents: req.price_cents,
        stock: req.stock,
        sku: req.sku.map(Some),
        is_active: req.is_active,
    };
    Ok(Json(state.catalog.update_product(product_id, update).await?))
}

async fn create_variant(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(req): Json<CreateVariantRequest>,
) -> Result<Json<entities::product_variant::Model>> {
    let variant = state
        .catalog
        .create_variant(
            product_id,
            &req.name,
            &req.value,
            req.price_offset_cents,
            req.stock,
        )
        .await?;
    Ok(Json(variant))
}

async fn record_product_view(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<entities::product_view::Model>> {
    Ok(Json(
        state.catalog.record_view(product_id, Some(ctx.user.id)).await?,
    ))
}

// Commerce handlers

async fn create_address(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<CreateAddressRequest>,
) -> Result<Json<entities::address::Model>> {
    let address = state
        .commerce
        .create_address(ctx.user.id, &req.street, &req.city, req.state, &req.zip_code)
        .await?;
    Ok(Json(address))
}

async fn place_order(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<Json<OrderResponse>> {
    let lines = req
        .items
        .into_iter()
        .map(|item| OrderLine {
            product_id: item.product_id,
            variant_id: item.variant_id,
            quantity: item.quantity,
        })
        .collect();

    let order = state
        .commerce
        .place_order(
            ctx.user.id,
            lines,
            req.shipping_address_id,
            &req.payment_method,
        )
        .await?;
    let items = state.commerce.order_items(order.id).await?;
    Ok(Json(OrderResponse { order, items }))
}

async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderResponse>> {
    let order = state.commerce.get_order(order_id).await?;
    let items = state.commerce.order_items(order_id).await?;
    Ok(Json(OrderResponse { order, items }))
}

async fn advance_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(req): Json<AdvanceOrderRequest>,
) -> Result<Json<entities::order::Model>> {
    let order = state.commerce.advance_status(order_id, req.status).await?;
    state
        .social
        .notify(
            order.user_id,
            "Order update",
            &format!("Your order is now {:?}", order.status),
            NotificationRef::Order(order.id),
        )
        .await?;
    Ok(Json(order))
}

async fn cancel_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<entities::order::Model>> {
    Ok(Json(state.commerce.cancel_order(order_id).await?))
}

// Live commerce handlers

async fn schedule_stream(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<ScheduleStreamRequest>,
) -> Result<Json<entities::live_stream::Model>> {
    let stream = state
        .live
        .schedule_stream(ctx.user.id, &req.title, req.description, req.scheduled_start)
        .await?;
    Ok(Json(stream))
}

async fn transition_stream(
    State(state): State<AppState>,
    Path(stream_id): Path<Uuid>,
    Json(req): Json<TransitionStreamRequest>,
) -> Result<Json<entities::live_stream::Model>> {
    Ok(Json(
        state.live.transition_stream(stream_id, req.status).await?,
    ))
}

async fn update_viewers(
    State(state): State<AppState>,
    Path(stream_id): Path<Uuid>,
    Json(req): Json<ViewerDeltaRequest>,
) -> Result<Json<serde_json::Value>> {
    state.live.update_viewer_count(stream_id, req.delta).await?;
    Ok(Json(serde_json::json!({"success": true})))
}

async fn promote_to_stream(
    State(state): State<AppState>,
    Path((stream_id, product_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>> {
    state.live.promote_to_stream(stream_id, product_id).await?;
    Ok(Json(serde_json::json!({"promoted": true})))
}

async fn recompute_analytics(
    State(state): State<AppState>,
    Path(stream_id): Path<Uuid>,
) -> Result<Json<entities::stream_analytics::Model>> {
    Ok(Json(state.live.recompute_analytics(stream_id).await?))
}

async fn publish_video(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<PublishVideoRequest>,
) -> Result<Json<entities::short_video::Model>> {
    let video = state
        .live
        .publish_video(
            ctx.user.id,
            &req.video_url,
            req.thumbnail_url,
            req.description,
            req.duration,
        )
        .await?;
    Ok(Json(video))
}

async fn link_video_product(
    State(state): State<AppState>,
    Path((video_id, product_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<LinkVideoProductRequest>,
) -> Result<Json<serde_json::Value>> {
    state
        .live
        .promote_to_video(video_id, product_id, req.position)
        .await?;
    Ok(Json(serde_json::json!({"linked": true})))
}

async fn bump_video_counters(
    State(state): State<AppState>,
    Path(video_id): Path<Uuid>,
    Json(req): Json<VideoCountersRequest>,
) -> Result<Json<serde_json::Value>> {
    state
        .live
        .bump_video_counters(video_id, req.views, req.likes, req.shares)
        .await?;
    Ok(Json(serde_json::json!({"success": true})))
}

// Social handlers

async fn list_notifications(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<entities::notification::Model>>> {
    Ok(Json(state.social.unread_notifications(ctx.user.id).await?))
}

async fn mark_read(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<entities::notification::Model>> {
    Ok(Json(state.social.mark_read(notification_id).await?))
}

async fn create_comment(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<Json<entities::comment::Model>> {
    let comment = state
        .social
        .comment(
            ctx.user.id,
            req.entity_type,
            req.entity_id,
            &req.content,
            req.parent_id,
        )
        .await?;
    Ok(Json(comment))
}
