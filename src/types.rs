// ABOUTME: Request and response types for the API surface
// ABOUTME: Plain serde structs grouped by feature area

use crate::entities::comment::CommentEntityType;
use crate::entities::live_stream::StreamStatus;
use crate::entities::order::OrderStatus;
use crate::entities::{order, order_item, user};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Identity

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: user::Model,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

// Vendor & catalog

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterVendorRequest {
    pub store_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub commission_rate_bps: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    #[serde(default)]
    pub stock: i32,
    pub sku: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub stock: Option<i32>,
    pub sku: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateVariantRequest {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub price_offset_cents: i64,
    #[serde(default)]
    pub stock: i32,
}

// Commerce

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAddressRequest {
    pub street: String,
    pub city: String,
    pub state: Option<String>,
    pub zip_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub product_id: Uuid,
    pub variant_id: Option<Uuid>,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderLineRequest>,
    pub shipping_address_id: Option<Uuid>,
    pub payment_method: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order: order::Model,
    pub items: Vec<order_item::Model>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdvanceOrderRequest {
    pub status: OrderStatus,
}

// Live commerce

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleStreamRequest {
    pub title: String,
    pub description: Option<String>,
    pub scheduled_start: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransitionStreamRequest {
    pub status: StreamStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ViewerDeltaRequest {
    pub delta: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PublishVideoRequest {
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub duration: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LinkVideoProductRequest {
    pub position: i32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VideoCountersRequest {
    #[serde(default)]
    pub views: i32,
    #[serde(default)]
    pub likes: i32,
    #[serde(default)]
    pub shares: i32,
}

// Social

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub entity_type: CommentEntityType,
    pub entity_id: Uuid,
    pub content: String,
    pub parent_id: Option<Uuid>,
}
