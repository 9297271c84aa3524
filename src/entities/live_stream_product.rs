// ABOUTME: Stream-to-product promotion link with a (stream, product) composite key
// ABOUTME: Re-promoting the same pair refreshes promoted_at instead of duplicating

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "live_stream_products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub live_stream_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: Uuid,
    pub promoted_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::live_stream::Entity",
        from = "Column::LiveStreamId",
        to = "super::live_stream::Column::Id"
    )]
    LiveStream,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::live_stream::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LiveStream.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
