// ABOUTME: Social store: follower edges, notifications, comment trees
// ABOUTME: Notification references are a tagged union resolved per type

use crate::entities::comment::CommentEntityType;
use crate::entities::notification::NotificationType;
use crate::entities::{
    comment, follower, live_stream, notification, order, short_video, user, vendor,
};
use crate::error::{AppError, Result};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

/// What a notification points at, keyed by its type tag. Replaces the
/// untyped related-id column at the API boundary: each variant resolves
/// through its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationRef {
    LiveStream(Uuid),
    Order(Uuid),
    Video(Uuid),
    /// The user who followed.
    Follow(Uuid),
}

impl NotificationRef {
    pub fn kind(self) -> NotificationType {
        match self {
            NotificationRef::LiveStream(_) => NotificationType::LiveStream,
            NotificationRef::Order(_) => NotificationType::OrderUpdate,
            NotificationRef::Video(_) => NotificationType::NewVideo,
            NotificationRef::Follow(_) => NotificationType::Follow,
        }
    }

    pub fn related_id(self) -> Uuid {
        match self {
            NotificationRef::LiveStream(id)
            | NotificationRef::Order(id)
            | NotificationRef::Video(id)
            | NotificationRef::Follow(id) => id,
        }
    }

    /// Reconstruct the union from a stored (type, related_id) pair.
    pub fn from_parts(kind: NotificationType, related_id: Uuid) -> Self {
        match kind {
            NotificationType::LiveStream => NotificationRef::LiveStream(related_id),
            NotificationType::OrderUpdate => NotificationRef::Order(related_id),
            NotificationType::NewVideo => NotificationRef::Video(related_id),
            NotificationType::Follow => NotificationRef::Follow(related_id),
        }
    }

    async fn verify(self, db: &DatabaseConnection) -> Result<()> {
        let exists = match self {
            NotificationRef::LiveStream(id) => {
                live_stream::Entity::find_by_id(id).one(db).await?.is_some()
            }
            NotificationRef::Order(id) => {
                order::Entity::find_by_id(id).one(db).await?.is_some()
            }
            NotificationRef::Video(id) => {
                short_video::Entity::find_by_id(id).one(db).await?.is_some()
            }
            NotificationRef::Follow(id) => {
                user::Entity::find_by_id(id).one(db).await?.is_some()
            }
        };

        if exists {
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "notification target {}",
                self.related_id()
            )))
        }
    }
}

#[derive(Clone)]
pub struct SocialStore {
    db: DatabaseConnection,
}

impl SocialStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Follow a vendor. Idempotent set semantics: re-following is a no-op,
    /// never a duplicate row and never an error.
    pub async fn follow(&self, user_id: Uuid, vendor_id: Uuid) -> Result<()> {
        // The vendor must exist up front; the FK would also catch it, but
        // a missing vendor is a referential error, not a conflict.
        if vendor::Entity::find_by_id(vendor_id).one(&self.db).await?.is_none() {
            return Err(AppError::NotFound(format!("vendor {}", vendor_id)));
        }

        let model = follower::ActiveModel {
            user_id: Set(user_id),
            vendor_id: Set(vendor_id),
            created_at: Set(Utc::now()),
        };

        let outcome = follower::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    follower::Column::UserId,
                    follower::Column::VendorId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec(&self.db)
            .await;

        match outcome {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(err) => Err(AppError::from_write(err, "follower")),
        }
    }

    pub async fn unfollow(&self, user_id: Uuid, vendor_id: Uuid) -> Result<()> {
        follower::Entity::delete_by_id((user_id, vendor_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn follower_count(&self, vendor_id: Uuid) -> Result<u64> {
        Ok(follower::Entity::find()
            .filter(follower::Column::VendorId.eq(vendor_id))
            .count(&self.db)
            .await?)
    }

    /// Append a notification. The reference is verified against the table
    /// its type names before anything is written.
    pub async fn notify(
        &self,
        user_id: Uuid,
        title: &str,
        message: &str,
        related: NotificationRef,
    ) -> Result<notification::Model> {
        related.verify(&self.db).await?;

        let model = notification::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            kind: Set(related.kind()),
            title: Set(title.to_string()),
            message: Set(message.to_string()),
            related_id: Set(Some(related.related_id())),
            is_read: Set(false),
            created_at: Set(Utc::now()),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|err| AppError::from_write(err, "notification recipient"))
    }

    /// Marking as read is the only permitted mutation on a notification.
    pub async fn mark_read(&self, notification_id: Uuid) -> Result<notification::Model> {
        let existing = notification::Entity::find_by_id(notification_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("notification {}", notification_id))
            })?;

        let mut active: notification::ActiveModel = existing.into();
        active.is_read = Set(true);
        Ok(active.update(&self.db).await?)
    }

    pub async fn unread_notifications(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<notification::Model>> {
        Ok(notification::Entity::find()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .order_by_desc(notification::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Post a comment under (entity_type, entity_id). A parent comment
    /// must live in exactly the same scope; cross-entity parenting is
    /// rejected.
    pub async fn comment(
        &self,
        user_id: Uuid,
        entity_type: CommentEntityType,
        entity_id: Uuid,
        content: &str,
        parent_id: Option<Uuid>,
    ) -> Result<comment::Model> {
        let entity_exists = match entity_type {
            CommentEntityType::LiveStream => live_stream::Entity::find_by_id(entity_id)
                .one(&self.db)
                .await?
                .is_some(),
            CommentEntityType::Video => short_video::Entity::find_by_id(entity_id)
                .one(&self.db)
                .await?
                .is_some(),
        };
        if !entity_exists {
            return Err(AppError::NotFound(format!(
                "comment target {}",
                entity_id
            )));
        }

        if let Some(parent_id) = parent_id {
            let parent = comment::Entity::find_by_id(parent_id)
                .one(&self.db)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("parent comment {}", parent_id)))?;
            if parent.entity_type != entity_type || parent.entity_id != entity_id {
                return Err(AppError::Validation(
                    "parent comment belongs to a different entity".to_string(),
                ));
            }
        }

        let model = comment::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            content: Set(content.to_string()),
            parent_id: Set(parent_id),
            entity_type: Set(entity_type),
            entity_id: Set(entity_id),
            created_at: Set(Utc::now()),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|err| AppError::from_write(err, "comment author"))
    }

    pub async fn entity_comments(
        &self,
        entity_type: CommentEntityType,
        entity_id: Uuid,
    ) -> Result<Vec<comment::Model>> {
        Ok(comment::Entity::find()
            .filter(comment::Column::EntityType.eq(entity_type))
            .filter(comment::Column::EntityId.eq(entity_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}
