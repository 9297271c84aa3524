// ABOUTME: Vendor profile entity, 1:1 with a backing user (shared primary key)
// ABOUTME: Commission rate is stored in basis points, range-checked at the store layer

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendors")]
pub struct Model {
    /// Same value as the backing user's id.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub store_name: String,
    pub description: Option<String>,
    pub is_approved: bool,
    /// Hundredths of a percent: 250 == 2.50%.
    pub commission_rate_bps: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::Id",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
    #[sea_orm(has_many = "super::live_stream::Entity")]
    LiveStreams,
    #[sea_orm(has_many = "super::short_video::Entity")]
    ShortVideos,
    #[sea_orm(has_many = "super::follower::Entity")]
    Followers,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::live_stream::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LiveStreams.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
