// ABOUTME: Live stream entity with the one-directional SCHEDULED->LIVE->ENDED lifecycle
// ABOUTME: actual_start/actual_end are stamped by the transitions that reach those states

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "live_streams")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: StreamStatus,
    pub scheduled_start: DateTimeUtc,
    pub actual_start: Option<DateTimeUtc>,
    pub actual_end: Option<DateTimeUtc>,
    pub viewer_count: i32,
    pub chat_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamStatus {
    #[sea_orm(string_value = "SCHEDULED")]
    Scheduled,
    #[sea_orm(string_value = "LIVE")]
    Live,
    #[sea_orm(string_value = "ENDED")]
    Ended,
}

impl StreamStatus {
    pub fn can_transition_to(self, next: StreamStatus) -> bool {
        use StreamStatus::*;
        matches!((self, next), (Scheduled, Live) | (Live, Ended))
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vendor::Entity",
        from = "Column::VendorId",
        to = "super::vendor::Column::Id"
    )]
    Vendor,
    #[sea_orm(has_many = "super::live_stream_product::Entity")]
    PromotedProducts,
    #[sea_orm(has_one = "super::stream_analytics::Entity")]
    Analytics,
}

impl Related<super::vendor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendor.def()
    }
}

impl Related<super::live_stream_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PromotedProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::StreamStatus::*;

    #[test]
    fn lifecycle_is_one_directional() {
        assert!(Scheduled.can_transition_to(Live));
        assert!(Live.can_transition_to(Ended));
        assert!(!Scheduled.can_transition_to(Ended));
        assert!(!Live.can_transition_to(Scheduled));
        assert!(!Ended.can_transition_to(Live));
        assert!(!Ended.can_transition_to(Scheduled));
    }
}
