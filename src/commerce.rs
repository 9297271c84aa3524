// ABOUTME: Commerce engine: atomic order placement, status lifecycle, cancellation
// ABOUTME: Stock decrements are guarded per row so concurrent orders never oversell

use crate::entities::order::OrderStatus;
use crate::entities::{address, order, order_item, product, product_variant};
use crate::error::{AppError, Result};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, QueryFilter, TransactionTrait,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct CommerceEngine {
    db: DatabaseConnection,
}

/// One requested order line; quantity must be positive.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product_id: Uuid,
    pub variant_id: Option<Uuid>,
    pub quantity: i32,
}

impl CommerceEngine {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Place an order as a single transaction: validate every line against
    /// current stock, decrement the authoritative counter, snapshot unit
    /// prices, and record the total as the exact sum of line totals. A
    /// shortfall on any line aborts the whole order with no partial
    /// decrement.
    pub async fn place_order(
        &self,
        user_id: Uuid,
        lines: Vec<OrderLine>,
        shipping_address_id: Option<Uuid>,
        payment_method: &str,
    ) -> Result<order::Model> {
        if lines.is_empty() {
            return Err(AppError::Validation("order has no lines".to_string()));
        }
        if let Some(bad) = lines.iter().find(|l| l.quantity <= 0) {
            return Err(AppError::Validation(format!(
                "quantity {} for product {} must be positive",
                bad.quantity, bad.product_id
            )));
        }

        let txn = self.db.begin().await?;

        let mut total_cents: i64 = 0;
        let mut snapshots = Vec::with_capacity(lines.len());

        for line in &lines {
            let item = reserve_line(&txn, line).await;
            let item = match item {
                Ok(item) => item,
                Err(err) => {
                    txn.rollback().await?;
                    return Err(err);
                }
            };
            total_cents += item.unit_price_cents * i64::from(line.quantity);
            snapshots.push(item);
        }

        let now = Utc::now();
        let order_id = Uuid::new_v4();
        let placed = order::ActiveModel {
            id: Set(order_id),
            user_id: Set(user_id),
            total_cents: Set(total_cents),
            status: Set(OrderStatus::Pending),
            shipping_address_id: Set(shipping_address_id),
            payment_method: Set(payment_method.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let placed = placed
            .insert(&txn)
            .await
            .map_err(|err| AppError::from_write(err, "order owner"))?;

        for (line, snapshot) in lines.iter().zip(snapshots) {
            let item = order_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                order_id: Set(order_id),
                product_id: Set(line.product_id),
                variant_id: Set(line.variant_id),
                quantity: Set(line.quantity),
                price_cents: Set(snapshot.unit_price_cents),
                vendor_id: Set(snapshot.vendor_id),
            };
            item.insert(&txn).await?;
        }

        txn.commit().await?;
        Ok(placed)
    }

    /// Advance an order along PENDING -> PROCESSING -> SHIPPED -> DELIVERED.
    /// Cancellation goes through `cancel_order` so stock restoration cannot
    /// be skipped.
    pub async fn advance_status(
        &self,
        order_id: Uuid,
        next: OrderStatus,
    ) -> Result<order::Model> {
        if next == OrderStatus::Cancelled {
            return Err(AppError::Validation(
                "cancellation must restore stock; use the cancel operation".to_string(),
            ));
        }

        let existing = self.get_order(order_id).await?;
        if !existing.status.can_transition_to(next) {
            return Err(AppError::Validation(format!(
                "order cannot move from {:?} to {:?}",
                existing.status, next
            )));
        }

        let mut active: order::ActiveModel = existing.into();
        active.status = Set(next);
        active.updated_at = Set(Utc::now());
        Ok(active.update(&self.db).await?)
    }

    /// Cancel a PENDING or PROCESSING order and restore every reserved
    /// unit of stock in the same transaction.
    pub async fn cancel_order(&self, order_id: Uuid) -> Result<order::Model> {
        let txn = self.db.begin().await?;

        let Some(existing) = order::Entity::find_by_id(order_id).one(&txn).await? else {
            txn.rollback().await?;
            return Err(AppError::NotFound(format!("order {}", order_id)));
        };
        if !existing.status.can_transition_to(OrderStatus::Cancelled) {
            txn.rollback().await?;
            return Err(AppError::Validation(format!(
                "order in {:?} cannot be cancelled",
                existing.status
            )));
        }

        let items = order_item::Entity::find()
            .filter(order_item::Column::OrderId.eq(order_id))
            .all(&txn)
            .await?;

        for item in &items {
            match item.variant_id {
                Some(variant_id) => {
                    product_variant::Entity::update_many()
                        .col_expr(
                            product_variant::Column::Stock,
                            Expr::col(product_variant::Column::Stock).add(item.quantity),
                        )
                        .filter(product_variant::Column::Id.eq(variant_id))
                        .exec(&txn)
                        .await?;
                }
                None => {
                    product::Entity::update_many()
                        .col_expr(
                            product::Column::Stock,
                            Expr::col(product::Column::Stock).add(item.quantity),
                        )
                        .filter(product::Column::Id.eq(item.product_id))
                        .exec(&txn)
                        .await?;
                }
            }
        }

        let mut active: order::ActiveModel = existing.into();
        active.status = Set(OrderStatus::Cancelled);
        active.updated_at = Set(Utc::now());
        let cancelled = active.update(&txn).await?;

        txn.commit().await?;
        Ok(cancelled)
    }

    pub async fn create_address(
        &self,
        user_id: Uuid,
        street: &str,
        city: &str,
        state: Option<String>,
        zip_code: &str,
    ) -> Result<address::Model> {
        let now = Utc::now();
        let model = address::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            street: Set(street.to_string()),
            city: Set(city.to_string()),
            state: Set(state),
            zip_code: Set(zip_code.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|err| AppError::from_write(err, "address owner"))
    }

    pub async fn get_order(&self, order_id: Uuid) -> Result<order::Model> {
        order::Entity::find_by_id(order_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("order {}", order_id)))
    }

    pub async fn order_items(&self, order_id: Uuid) -> Result<Vec<order_item::Model>> {
        Ok(order_item::Entity::find()
            .filter(order_item::Column::OrderId.eq(order_id))
            .all(&self.db)
            .await?)
    }
}

struct LineSnapshot {
    unit_price_cents: i64,
    vendor_id: Uuid,
}

/// Validate one line and decrement its authoritative stock counter: the
/// variant's when a variant is named, else the product's. The guarded
/// UPDATE (`stock = stock - n WHERE stock >= n`) serializes concurrent
/// decrements per row; zero rows affected means a shortfall.
async fn reserve_line(txn: &DatabaseTransaction, line: &OrderLine) -> Result<LineSnapshot> {
    let found = product::Entity::find_by_id(line.product_id).one(txn).await?;
    let Some(found) = found else {
        return Err(AppError::NotFound(format!("product {}", line.product_id)));
    };
    if !found.is_active {
        return Err(AppError::Validation(format!(
            "product {} is not active",
            line.product_id
        )));
    }

    let mut unit_price_cents = found.price_cents;

    match line.variant_id {
        Some(variant_id) => {
            let variant = product_variant::Entity::find_by_id(variant_id)
                .one(txn)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("variant {}", variant_id)))?;
            if variant.product_id != found.id {
                return Err(AppError::Validation(format!(
                    "variant {} does not belong to product {}",
                    variant_id, found.id
                )));
            }
            unit_price_cents += variant.price_offset_cents;

            let updated = product_variant::Entity::update_many()
                .col_expr(
                    product_variant::Column::Stock,
                    Expr::col(product_variant::Column::Stock).sub(line.quantity),
                )
                .filter(product_variant::Column::Id.eq(variant_id))
                .filter(product_variant::Column::Stock.gte(line.quantity))
                .exec(txn)
                .await?;
            if updated.rows_affected == 0 {
                return Err(AppError::Transaction(format!(
                    "insufficient stock for variant {}",
                    variant_id
                )));
            }
        }
        None => {
            let updated = product::Entity::update_many()
                .col_expr(
                    product::Column::Stock,
                    Expr::col(product::Column::Stock).sub(line.quantity),
                )
                .filter(product::Column::Id.eq(line.product_id))
                .filter(product::Column::Stock.gte(line.quantity))
                .exec(txn)
                .await?;
            if updated.rows_affected == 0 {
                return Err(AppError::Transaction(format!(
                    "insufficient stock for product {}",
                    line.product_id
                )));
            }
        }
    }

    Ok(LineSnapshot {
        unit_price_cents,
        vendor_id: found.vendor_id,
    })
}
