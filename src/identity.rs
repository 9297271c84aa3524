// ABOUTME: Identity store: users, sessions, linked provider accounts, verifications
// ABOUTME: Token uniqueness is enforced atomically at issuance with retry-on-conflict

use crate::entities::{account, session, user, verification};
use crate::error::{AppError, Result};
use crate::session::generate_token;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    ModelTrait, QueryFilter,
};
use uuid::Uuid;

/// How many times session issuance retries after losing a token-uniqueness
/// race before giving up.
const TOKEN_ISSUE_ATTEMPTS: usize = 3;

#[derive(Clone)]
pub struct IdentityStore {
    db: DatabaseConnection,
}

impl IdentityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_user(&self, name: &str, email: &str) -> Result<user::Model> {
        let now = Utc::now();
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            email_verified: Set(false),
            image: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|err| AppError::from_write(err, "user email"))
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<user::Model> {
        user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
    }

    pub async fn delete_user(&self, user_id: Uuid) -> Result<()> {
        let existing = self.get_user(user_id).await?;
        existing
            .delete(&self.db)
            .await
            .map_err(|err| AppError::from_write(err, "user with commerce history"))?;
        Ok(())
    }

    /// Issue a session for a user. Token uniqueness is enforced by the
    /// database; on a collision we mint a new token and try again.
    pub async fn issue_session(
        &self,
        user_id: Uuid,
        lifetime: chrono::Duration,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<session::Model> {
        let mut last_err = None;
        for _ in 0..TOKEN_ISSUE_ATTEMPTS {
            let now = Utc::now();
            let model = session::ActiveModel {
                id: Set(Uuid::new_v4()),
                token: Set(generate_token()),
                user_id: Set(user_id),
                expires_at: Set(now + lifetime),
                ip_address: Set(ip_address.clone()),
                user_agent: Set(user_agent.clone()),
                created_at: Set(now),
                updated_at: Set(now),
            };

            match model.insert(&self.db).await {
                Ok(created) => return Ok(created),
                Err(err) => {
                    let mapped = AppError::from_write(err, "session token");
                    if !mapped.is_conflict() {
                        return Err(mapped);
                    }
                    last_err = Some(mapped);
                }
            }
        }
        Err(last_err
            .unwrap_or_else(|| AppError::Internal("session issuance failed".to_string())))
    }

    /// Resolve a bearer token to its user and session. A session past its
    /// expiry is treated as absent even if not yet purged.
    pub async fn resolve_session(
        &self,
        token: &str,
    ) -> Result<Option<(user::Model, session::Model)>> {
        let Some(found) = session::Entity::find()
            .filter(session::Column::Token.eq(token))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        if found.expires_at <= Utc::now() {
            return Ok(None);
        }

        let Some(owner) = found.find_related(user::Entity).one(&self.db).await? else {
            return Ok(None);
        };

        Ok(Some((owner, found)))
    }

    /// Rotate the token of an existing session, for privilege-sensitive
    /// actions. Retries like issuance does.
    pub async fn rotate_token(&self, session_id: Uuid) -> Result<session::Model> {
        let existing = session::Entity::find_by_id(session_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("session {}", session_id)))?;

        let mut last_err = None;
        for _ in 0..TOKEN_ISSUE_ATTEMPTS {
            let mut active: session::ActiveModel = existing.clone().into();
            active.token = Set(generate_token());
            active.updated_at = Set(Utc::now());

            match active.update(&self.db).await {
                Ok(updated) => return Ok(updated),
                Err(err) => {
                    let mapped = AppError::from_write(err, "session token");
                    if !mapped.is_conflict() {
                        return Err(mapped);
                    }
                    last_err = Some(mapped);
                }
            }
        }
        Err(last_err
            .unwrap_or_else(|| AppError::Internal("token rotation failed".to_string())))
    }

    pub async fn revoke_session(&self, token: &str) -> Result<()> {
        session::Entity::delete_many()
            .filter(session::Column::Token.eq(token))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Link an external provider account. One row per
    /// (provider, external account, user) tuple.
    #[allow(clippy::too_many_arguments)]
    pub async fn link_account(
        &self,
        user_id: Uuid,
        provider_id: &str,
        account_id: &str,
        access_token: Option<String>,
        refresh_token: Option<String>,
        scope: Option<String>,
    ) -> Result<account::Model> {
        let now = Utc::now();
        let model = account::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_id: Set(account_id.to_string()),
            provider_id: Set(provider_id.to_string()),
            user_id: Set(user_id),
            access_token: Set(access_token),
            refresh_token: Set(refresh_token),
            id_token: Set(None),
            access_token_expires_at: Set(None),
            refresh_token_expires_at: Set(None),
            scope: Set(scope),
            password: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|err| AppError::from_write(err, "provider account link"))
    }

    pub async fn unlink_account(
        &self,
        user_id: Uuid,
        provider_id: &str,
        account_id: &str,
    ) -> Result<()> {
        let deleted = account::Entity::delete_many()
            .filter(account::Column::UserId.eq(user_id))
            .filter(account::Column::ProviderId.eq(provider_id))
            .filter(account::Column::AccountId.eq(account_id))
            .exec(&self.db)
            .await?;

        if deleted.rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "account link {}/{}",
                provider_id, account_id
            )));
        }
        Ok(())
    }

    /// Upsert a verification challenge by identifier: a fresh challenge for
    /// the same identifier replaces the previous value and expiry.
    pub async fn upsert_verification(
        &self,
        identifier: &str,
        value: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let now = Utc::now();
        let model = verification::ActiveModel {
            id: Set(Uuid::new_v4()),
            identifier: Set(identifier.to_string()),
            value: Set(value.to_string()),
            expires_at: Set(expires_at),
            created_at: Set(now),
            updated_at: Set(now),
        };

        verification::Entity::insert(model)
            .on_conflict(
                OnConflict::column(verification::Column::Identifier)
                    .update_columns([
                        verification::Column::Value,
                        verification::Column::ExpiresAt,
                        verification::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn get_verification(
        &self,
        identifier: &str,
    ) -> Result<Option<verification::Model>> {
        let found = verification::Entity::find()
            .filter(verification::Column::Identifier.eq(identifier))
            .one(&self.db)
            .await?;

        // Expired challenges are as good as absent.
        Ok(found.filter(|v| v.expires_at > Utc::now()))
    }
}
