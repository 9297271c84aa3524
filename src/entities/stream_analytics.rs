// ABOUTME: Derived per-stream aggregate, 1:1 with a live stream
// ABOUTME: Written only by the recompute path, never by request handlers

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stream_analytics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub stream_id: Uuid,
    pub peak_viewers: i32,
    /// Seconds.
    pub avg_view_duration: i32,
    pub products_sold: i32,
    pub total_revenue_cents: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::live_stream::Entity",
        from = "Column::StreamId",
        to = "super::live_stream::Column::Id"
    )]
    LiveStream,
}

impl Related<super::live_stream::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LiveStream.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
