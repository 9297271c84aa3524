// ABOUTME: Vendor and catalog store: vendor approval, products, variants, views
// ABOUTME: SKU collisions surface as conflicts; stock mutations stay non-negative

use crate::entities::{product, product_variant, product_view, vendor};
use crate::error::{AppError, Result};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

/// Commission rate bounds in basis points: [0%, 100%] at two decimal
/// places.
const MAX_COMMISSION_BPS: i32 = 10_000;

#[derive(Clone)]
pub struct CatalogStore {
    db: DatabaseConnection,
}

#[derive(Debug, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price_cents: Option<i64>,
    pub stock: Option<i32>,
    pub sku: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl CatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Register a vendor profile for an existing user. The vendor shares
    /// the user's id; a missing user is a referential error.
    pub async fn register_vendor(
        &self,
        user_id: Uuid,
        store_name: &str,
        description: Option<String>,
        commission_rate_bps: i32,
    ) -> Result<vendor::Model> {
        if !(0..=MAX_COMMISSION_BPS).contains(&commission_rate_bps) {
            return Err(AppError::Validation(format!(
                "commission rate {} out of range [0, {}]",
                commission_rate_bps, MAX_COMMISSION_BPS
            )));
        }

        let now = Utc::now();
        let model = vendor::ActiveModel {
            id: Set(user_id),
            store_name: Set(store_name.to_string()),
            description: Set(description),
            is_approved: Set(false),
            commission_rate_bps: Set(commission_rate_bps),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|err| AppError::from_write(err, "vendor"))
    }

    /// Approve a vendor. Idempotent: approving an already-approved vendor
    /// changes nothing.
    pub async fn approve_vendor(&self, vendor_id: Uuid) -> Result<vendor::Model> {
        let existing = self.get_vendor(vendor_id).await?;
        if existing.is_approved {
            return Ok(existing);
        }

        let mut active: vendor::ActiveModel = existing.into();
        active.is_approved = Set(true);
        active.updated_at = Set(Utc::now());
        Ok(active.update(&self.db).await?)
    }

    pub async fn get_vendor(&self, vendor_id: Uuid) -> Result<vendor::Model> {
        vendor::Entity::find_by_id(vendor_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("vendor {}", vendor_id)))
    }

    pub async fn create_product(
        &self,
        vendor_id: Uuid,
        name: &str,
        description: Option<String>,
        price_cents: i64,
        stock: i32,
        sku: Option<String>,
    ) -> Result<product::Model> {
        if price_cents < 0 {
            return Err(AppError::Validation("price cannot be negative".to_string()));
        }
        if stock < 0 {
            return Err(AppError::Validation("stock cannot be negative".to_string()));
        }

        let now = Utc::now();
        let model = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            vendor_id: Set(vendor_id),
            name: Set(name.to_string()),
            description: Set(description),
            price_cents: Set(price_cents),
            stock: Set(stock),
            sku: Set(sku),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|err| AppError::from_write(err, "product sku"))
    }

    /// Apply a partial update. Price changes never touch historical order
    /// item snapshots.
    pub async fn update_product(
        &self,
        product_id: Uuid,
        update: ProductUpdate,
    ) -> Result<product::Model> {
        if matches!(update.stock, Some(s) if s < 0) {
            return Err(AppError::Validation("stock cannot be negative".to_string()));
        }
        if matches!(update.price_cents, Some(p) if p < 0) {
            return Err(AppError::Validation("price cannot be negative".to_string()));
        }

        let existing = self.get_product(product_id).await?;
        let mut active: product::ActiveModel = existing.into();
        if let Some(name) = update.name {
            active.name = Set(name);
        }
        if let Some(description) = update.description {
            active.description = Set(description);
        }
        if let Some(price_cents) = update.price_cents {
            active.price_cents = Set(price_cents);
        }
        if let Some(stock) = update.stock {
            active.stock = Set(stock);
        }
        if let Some(sku) = update.sku {
            active.sku = Set(sku);
        }
        if let Some(is_active) = update.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());

        active
            .update(&self.db)
            .await
            .map_err(|err| AppError::from_write(err, "product sku"))
    }

    pub async fn get_product(&self, product_id: Uuid) -> Result<product::Model> {
        product::Entity::find_by_id(product_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("product {}", product_id)))
    }

    pub async fn list_vendor_products(&self, vendor_id: Uuid) -> Result<Vec<product::Model>> {
        Ok(product::Entity::find()
            .filter(product::Column::VendorId.eq(vendor_id))
            .order_by_asc(product::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Create a variant. Variant stock is tracked independently of the
    /// parent product's stock; callers decide which counter is
    /// authoritative for a given SKU shape.
    pub async fn create_variant(
        &self,
        product_id: Uuid,
        name: &str,
        value: &str,
        price_offset_cents: i64,
        stock: i32,
    ) -> Result<product_variant::Model> {
        if stock < 0 {
            return Err(AppError::Validation("stock cannot be negative".to_string()));
        }

        let model = product_variant::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(product_id),
            name: Set(name.to_string()),
            value: Set(value.to_string()),
            price_offset_cents: Set(price_offset_cents),
            stock: Set(stock),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|err| AppError::from_write(err, "product variant"))
    }

    pub async fn get_variant(&self, variant_id: Uuid) -> Result<product_variant::Model> {
        product_variant::Entity::find_by_id(variant_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("variant {}", variant_id)))
    }

    /// Append a product view event. Analytics only; never mutated.
    pub async fn record_view(
        &self,
        product_id: Uuid,
        user_id: Option<Uuid>,
    ) -> Result<product_view::Model> {
        let model = product_view::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(product_id),
            user_id: Set(user_id),
            viewed_at: Set(Utc::now()),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|err| AppError::from_write(err, "product"))
    }
}
