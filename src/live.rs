// ABOUTME: Live commerce store: stream lifecycle, promotions, video counters
// ABOUTME: StreamAnalytics is a recomputed aggregate, never request-writable

use crate::entities::live_stream::StreamStatus;
use crate::entities::order::OrderStatus;
use crate::entities::{
    live_stream, live_stream_product, order, order_item, short_video, stream_analytics,
    video_product,
};
use crate::error::{AppError, Result};
use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QuerySelect,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct LiveCommerceStore {
    db: DatabaseConnection,
}

impl LiveCommerceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn schedule_stream(
        &self,
        vendor_id: Uuid,
        title: &str,
        description: Option<String>,
        scheduled_start: chrono::DateTime<Utc>,
    ) -> Result<live_stream::Model> {
        let now = Utc::now();
        let model = live_stream::ActiveModel {
            id: Set(Uuid::new_v4()),
            vendor_id: Set(vendor_id),
            title: Set(title.to_string()),
            description: Set(description),
            status: Set(StreamStatus::Scheduled),
            scheduled_start: Set(scheduled_start),
            actual_start: Set(None),
            actual_end: Set(None),
            viewer_count: Set(0),
            chat_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|err| AppError::from_write(err, "stream vendor"))
    }

    /// Move a stream along SCHEDULED -> LIVE -> ENDED. Going LIVE stamps
    /// actual_start; ENDED stamps actual_end. Skipping or reversing is
    /// rejected and the row is untouched.
    pub async fn transition_stream(
        &self,
        stream_id: Uuid,
        next: StreamStatus,
    ) -> Result<live_stream::Model> {
        let existing = self.get_stream(stream_id).await?;
        if !existing.status.can_transition_to(next) {
            return Err(AppError::Validation(format!(
                "stream cannot move from {:?} to {:?}",
                existing.status, next
            )));
        }

        let now = Utc::now();
        let mut active: live_stream::ActiveModel = existing.into();
        active.status = Set(next);
        match next {
            StreamStatus::Live => active.actual_start = Set(Some(now)),
            StreamStatus::Ended => active.actual_end = Set(Some(now)),
            StreamStatus::Scheduled => unreachable!("no transition reaches SCHEDULED"),
        }
        active.updated_at = Set(now);
        Ok(active.update(&self.db).await?)
    }

    pub async fn get_stream(&self, stream_id: Uuid) -> Result<live_stream::Model> {
        live_stream::Entity::find_by_id(stream_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("stream {}", stream_id)))
    }

    /// Apply a viewer-count delta as an independent atomic increment. The
    /// count never goes below zero; a delta that would is rejected whole.
    pub async fn update_viewer_count(&self, stream_id: Uuid, delta: i32) -> Result<()> {
        let updated = live_stream::Entity::update_many()
            .col_expr(
                live_stream::Column::ViewerCount,
                Expr::col(live_stream::Column::ViewerCount).add(delta),
            )
            .filter(live_stream::Column::Id.eq(stream_id))
            .filter(live_stream::Column::Status.eq(StreamStatus::Live))
            .filter(live_stream::Column::ViewerCount.gte(-delta))
            .exec(&self.db)
            .await?;

        if updated.rows_affected == 0 {
            return Err(AppError::Validation(format!(
                "stream {} is not live or count would go negative",
                stream_id
            )));
        }
        Ok(())
    }

    /// Promote a product on a stream. Idempotent on the composite key:
    /// re-promoting refreshes promoted_at instead of erroring.
    pub async fn promote_to_stream(
        &self,
        stream_id: Uuid,
        product_id: Uuid,
    ) -> Result<()> {
        let model = live_stream_product::ActiveModel {
            live_stream_id: Set(stream_id),
            product_id: Set(product_id),
            promoted_at: Set(Utc::now()),
        };

        live_stream_product::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    live_stream_product::Column::LiveStreamId,
                    live_stream_product::Column::ProductId,
                ])
                .update_column(live_stream_product::Column::PromotedAt)
                .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|err| AppError::from_write(err, "stream or product"))?;
        Ok(())
    }

    pub async fn stream_promotions(
        &self,
        stream_id: Uuid,
    ) -> Result<Vec<live_stream_product::Model>> {
        Ok(live_stream_product::Entity::find()
            .filter(live_stream_product::Column::LiveStreamId.eq(stream_id))
            .all(&self.db)
            .await?)
    }

    pub async fn publish_video(
        &self,
        vendor_id: Uuid,
        video_url: &str,
        thumbnail_url: Option<String>,
        description: Option<String>,
        duration: i32,
    ) -> Result<short_video::Model> {
        if duration <= 0 {
            return Err(AppError::Validation(
                "video duration must be positive".to_string(),
            ));
        }

        let now = Utc::now();
        let model = short_video::ActiveModel {
            id: Set(Uuid::new_v4()),
            vendor_id: Set(vendor_id),
            video_url: Set(video_url.to_string()),
            thumbnail_url: Set(thumbnail_url),
            description: Set(description),
            duration: Set(duration),
            views: Set(0),
            likes: Set(0),
            shares: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|err| AppError::from_write(err, "video vendor"))
    }

    pub async fn get_video(&self, video_id: Uuid) -> Result<short_video::Model> {
        short_video::Entity::find_by_id(video_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("video {}", video_id)))
    }

    /// Link a product into a video at a display position. Idempotent on
    /// the composite key: re-linking updates position in place. Two
    /// different products at the same position is a conflict.
    pub async fn promote_to_video(
        &self,
        video_id: Uuid,
        product_id: Uuid,
        position: i32,
    ) -> Result<()> {
        let model = video_product::ActiveModel {
            video_id: Set(video_id),
            product_id: Set(product_id),
            position: Set(position),
        };

        video_product::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    video_product::Column::VideoId,
                    video_product::Column::ProductId,
                ])
                .update_column(video_product::Column::Position)
                .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|err| AppError::from_write(err, "video position"))?;
        Ok(())
    }

    pub async fn video_products(&self, video_id: Uuid) -> Result<Vec<video_product::Model>> {
        Ok(video_product::Entity::find()
            .filter(video_product::Column::VideoId.eq(video_id))
            .all(&self.db)
            .await?)
    }

    /// Bump engagement counters as independent atomic increments. The
    /// counters are monotonically non-decreasing, so negative deltas are
    /// rejected outright.
    pub async fn bump_video_counters(
        &self,
        video_id: Uuid,
        views: i32,
        likes: i32,
        shares: i32,
    ) -> Result<()> {
        if views < 0 || likes < 0 || shares < 0 {
            return Err(AppError::Validation(
                "engagement counters only move forward".to_string(),
            ));
        }

        let updated = short_video::Entity::update_many()
            .col_expr(
                short_video::Column::Views,
                Expr::col(short_video::Column::Views).add(views),
            )
            .col_expr(
                short_video::Column::Likes,
                Expr::col(short_video::Column::Likes).add(likes),
            )
            .col_expr(
                short_video::Column::Shares,
                Expr::col(short_video::Column::Shares).add(shares),
            )
            .filter(short_video::Column::Id.eq(video_id))
            .exec(&self.db)
            .await?;

        if updated.rows_affected == 0 {
            return Err(AppError::NotFound(format!("video {}", video_id)));
        }
        Ok(())
    }

    /// Recompute the derived per-stream aggregate from raw events: revenue
    /// and units sold come from non-cancelled orders of promoted products
    /// placed inside the live window; peak viewers keeps its running
    /// maximum against the current count. Request paths never write this
    /// table directly.
    pub async fn recompute_analytics(
        &self,
        stream_id: Uuid,
    ) -> Result<stream_analytics::Model> {
        let stream = self.get_stream(stream_id).await?;

        let promoted: Vec<Uuid> = live_stream_product::Entity::find()
            .filter(live_stream_product::Column::LiveStreamId.eq(stream_id))
            .select_only()
            .column(live_stream_product::Column::ProductId)
            .into_tuple()
            .all(&self.db)
            .await?;

        let window_start = stream.actual_start.unwrap_or(stream.scheduled_start);
        let window_end = stream.actual_end.unwrap_or_else(Utc::now);

        let mut products_sold: i32 = 0;
        let mut total_revenue_cents: i64 = 0;
        if !promoted.is_empty() {
            let sold = order_item::Entity::find()
                .filter(order_item::Column::ProductId.is_in(promoted))
                .find_also_related(order::Entity)
                .all(&self.db)
                .await?;
            for (item, placed) in sold {
                let Some(placed) = placed else { continue };
                if placed.status == OrderStatus::Cancelled {
                    continue;
                }
                if placed.created_at < window_start || placed.created_at > window_end {
                    continue;
                }
                products_sold += item.quantity;
                total_revenue_cents += item.price_cents * i64::from(item.quantity);
            }
        }

        let existing = stream_analytics::Entity::find_by_id(stream_id)
            .one(&self.db)
            .await?;
        let peak_viewers = existing
            .as_ref()
            .map(|a| a.peak_viewers)
            .unwrap_or(0)
            .max(stream.viewer_count);
        // Without per-viewer events the live window is the best available
        // approximation once the stream has ended.
        let avg_view_duration = match (stream.actual_start, stream.actual_end) {
            (Some(start), Some(end)) => (end - start).num_seconds() as i32,
            _ => existing.as_ref().map(|a| a.avg_view_duration).unwrap_or(0),
        };

        let model = stream_analytics::ActiveModel {
            stream_id: Set(stream_id),
            peak_viewers: Set(peak_viewers),
            avg_view_duration: Set(avg_view_duration),
            products_sold: Set(products_sold),
            total_revenue_cents: Set(total_revenue_cents),
        };

        stream_analytics::Entity::insert(model)
            .on_conflict(
                OnConflict::column(stream_analytics::Column::StreamId)
                    .update_columns([
                        stream_analytics::Column::PeakViewers,
                        stream_analytics::Column::AvgViewDuration,
                        stream_analytics::Column::ProductsSold,
                        stream_analytics::Column::TotalRevenueCents,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        stream_analytics::Entity::find_by_id(stream_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::Internal("analytics row missing after upsert".to_string()))
    }
}
