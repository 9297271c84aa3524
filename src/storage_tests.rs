// ABOUTME: Store-level tests against a migrated temporary SQLite database
// ABOUTME: Covers identity, catalog, commerce, live commerce, and social invariants

#[cfg(test)]
mod tests {
    use crate::catalog::{CatalogStore, ProductUpdate};
    use crate::commerce::{CommerceEngine, OrderLine};
    use crate::entities::comment::CommentEntityType;
    use crate::entities::live_stream::StreamStatus;
    use crate::entities::order::OrderStatus;
    use crate::entities::{order, product, session, vendor};
    use crate::error::AppError;
    use crate::identity::IdentityStore;
    use crate::live::LiveCommerceStore;
    use crate::social::{NotificationRef, SocialStore};
    use chrono::{Duration, Utc};
    use sea_orm::{Database, DatabaseConnection, EntityTrait};
    use sea_orm_migration::MigratorTrait;
    use tempfile::TempDir;
    use uuid::Uuid;

    async fn test_db() -> (DatabaseConnection, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
        let db = Database::connect(&db_url).await.unwrap();
        crate::migration::Migrator::up(&db, None).await.unwrap();
        (db, temp_dir)
    }

    async fn seed_vendor(db: &DatabaseConnection, email: &str) -> Uuid {
        let identity = IdentityStore::new(db.clone());
        let catalog = CatalogStore::new(db.clone());
        let user = identity.create_user("Seller", email).await.unwrap();
        catalog
            .register_vendor(user.id, "Test Store", None, 250)
            .await
            .unwrap();
        catalog.approve_vendor(user.id).await.unwrap();
        user.id
    }

    async fn seed_product(db: &DatabaseConnection, vendor_id: Uuid, stock: i32) -> Uuid {
        let catalog = CatalogStore::new(db.clone());
        catalog
            .create_product(vendor_id, "Widget", None, 1500, stock, None)
            .await
            .unwrap()
            .id
    }

    // Identity

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db);

        identity.create_user("A", "a@example.com").await.unwrap();
        let err = identity.create_user("B", "a@example.com").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn session_issue_resolve_revoke() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db);
        let user = identity.create_user("A", "a@example.com").await.unwrap();

        let session = identity
            .issue_session(user.id, Duration::days(7), None, None)
            .await
            .unwrap();
        let (resolved_user, resolved_session) = identity
            .resolve_session(&session.token)
            .await
            .unwrap()
            .expect("session should resolve");
        assert_eq!(resolved_user.id, user.id);
        assert_eq!(resolved_session.id, session.id);

        identity.revoke_session(&session.token).await.unwrap();
        assert!(identity.resolve_session(&session.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_session_is_treated_as_absent() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db);
        let user = identity.create_user("A", "a@example.com").await.unwrap();

        let session = identity
            .issue_session(user.id, Duration::seconds(-10), None, None)
            .await
            .unwrap();
        assert!(identity.resolve_session(&session.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn token_rotation_invalidates_the_old_token() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db);
        let user = identity.create_user("A", "a@example.com").await.unwrap();

        let session = identity
            .issue_session(user.id, Duration::days(7), None, None)
            .await
            .unwrap();
        let rotated = identity.rotate_token(session.id).await.unwrap();
        assert_ne!(rotated.token, session.token);

        assert!(identity.resolve_session(&session.token).await.unwrap().is_none());
        assert!(identity.resolve_session(&rotated.token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn account_linking_is_unique_per_provider_pair() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db);
        let user = identity.create_user("A", "a@example.com").await.unwrap();

        identity
            .link_account(user.id, "github", "gh-123", None, None, None)
            .await
            .unwrap();
        let err = identity
            .link_account(user.id, "github", "gh-123", None, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        identity.unlink_account(user.id, "github", "gh-123").await.unwrap();
        let err = identity
            .unlink_account(user.id, "github", "gh-123")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn verification_upsert_replaces_the_challenge() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db);

        let expires = Utc::now() + Duration::minutes(10);
        identity
            .upsert_verification("a@example.com", "111111", expires)
            .await
            .unwrap();
        identity
            .upsert_verification("a@example.com", "222222", expires)
            .await
            .unwrap();

        let challenge = identity
            .get_verification("a@example.com")
            .await
            .unwrap()
            .expect("challenge present");
        assert_eq!(challenge.value, "222222");
    }

    #[tokio::test]
    async fn expired_verification_is_absent() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db);

        identity
            .upsert_verification("a@example.com", "111111", Utc::now() - Duration::minutes(1))
            .await
            .unwrap();
        assert!(identity.get_verification("a@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_a_user_cascades_sessions_but_not_orders() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let commerce = CommerceEngine::new(db.clone());

        // No commerce history: the user and their session go away together.
        let disposable = identity.create_user("B", "b@example.com").await.unwrap();
        let token = identity
            .issue_session(disposable.id, Duration::days(7), None, None)
            .await
            .unwrap()
            .token;
        identity.delete_user(disposable.id).await.unwrap();
        assert!(identity.resolve_session(&token).await.unwrap().is_none());
        assert_eq!(session::Entity::find().all(&db).await.unwrap().len(), 0);

        // With an order on file, deletion is restricted.
        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let product_id = seed_product(&db, vendor_id, 5).await;
        let buyer = identity.create_user("C", "c@example.com").await.unwrap();
        commerce
            .place_order(
                buyer.id,
                vec![OrderLine { product_id, variant_id: None, quantity: 1 }],
                None,
                "card",
            )
            .await
            .unwrap();
        assert!(identity.delete_user(buyer.id).await.is_err());
    }

    // Vendor & catalog

    #[tokio::test]
    async fn vendor_requires_a_backing_user() {
        let (db, _tmp) = test_db().await;
        let catalog = CatalogStore::new(db);

        let err = catalog
            .register_vendor(Uuid::new_v4(), "Ghost Store", None, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn vendor_approval_is_idempotent() {
        let (db, _tmp) = test_db().await;
        let catalog = CatalogStore::new(db.clone());
        let identity = IdentityStore::new(db.clone());

        let user = identity.create_user("S", "s@example.com").await.unwrap();
        catalog.register_vendor(user.id, "Store", None, 500).await.unwrap();

        let first = catalog.approve_vendor(user.id).await.unwrap();
        let second = catalog.approve_vendor(user.id).await.unwrap();
        assert!(first.is_approved && second.is_approved);
        assert_eq!(first.updated_at, second.updated_at);
        assert_eq!(vendor::Entity::find().all(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn commission_rate_is_bounded() {
        let (db, _tmp) = test_db().await;
        let catalog = CatalogStore::new(db.clone());
        let identity = IdentityStore::new(db);

        let user = identity.create_user("S", "s@example.com").await.unwrap();
        let err = catalog
            .register_vendor(user.id, "Store", None, 10_001)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = catalog.register_vendor(user.id, "Store", None, -1).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn sku_collision_is_a_conflict_not_an_overwrite() {
        let (db, _tmp) = test_db().await;
        let catalog = CatalogStore::new(db.clone());
        let vendor_id = seed_vendor(&db, "seller@example.com").await;

        let original = catalog
            .create_product(vendor_id, "First", None, 1000, 1, Some("SKU-1".to_string()))
            .await
            .unwrap();
        let err = catalog
            .create_product(vendor_id, "Second", None, 2000, 1, Some("SKU-1".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let kept = catalog.get_product(original.id).await.unwrap();
        assert_eq!(kept.name, "First");
        assert_eq!(kept.price_cents, 1000);
    }

    #[tokio::test]
    async fn negative_stock_rejected_before_any_write() {
        let (db, _tmp) = test_db().await;
        let catalog = CatalogStore::new(db.clone());
        let vendor_id = seed_vendor(&db, "seller@example.com").await;

        let err = catalog
            .create_product(vendor_id, "Bad", None, 1000, -1, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let product_id = seed_product(&db, vendor_id, 5).await;
        let err = catalog
            .update_product(product_id, ProductUpdate { stock: Some(-3), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(catalog.get_product(product_id).await.unwrap().stock, 5);
    }

    #[tokio::test]
    async fn product_views_are_appended() {
        let (db, _tmp) = test_db().await;
        let catalog = CatalogStore::new(db.clone());
        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let product_id = seed_product(&db, vendor_id, 5).await;

        catalog.record_view(product_id, None).await.unwrap();
        catalog.record_view(product_id, Some(vendor_id)).await.unwrap();

        let err = catalog.record_view(Uuid::new_v4(), None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    // Commerce

    #[tokio::test]
    async fn order_total_equals_sum_of_line_totals() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let catalog = CatalogStore::new(db.clone());
        let commerce = CommerceEngine::new(db.clone());

        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let product_id = seed_product(&db, vendor_id, 10).await;
        let variant = catalog
            .create_variant(product_id, "Size", "L", 200, 10)
            .await
            .unwrap();
        let buyer = identity.create_user("B", "b@example.com").await.unwrap();

        let order = commerce
            .place_order(
                buyer.id,
                vec![
                    OrderLine { product_id, variant_id: None, quantity: 2 },
                    OrderLine { product_id, variant_id: Some(variant.id), quantity: 3 },
                ],
                None,
                "card",
            )
            .await
            .unwrap();

        let items = commerce.order_items(order.id).await.unwrap();
        let sum: i64 = items
            .iter()
            .map(|i| i.price_cents * i64::from(i.quantity))
            .sum();
        assert_eq!(order.total_cents, sum);
        // 2 * 1500 + 3 * (1500 + 200)
        assert_eq!(order.total_cents, 8100);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn variant_stock_is_independent_of_product_stock() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let catalog = CatalogStore::new(db.clone());
        let commerce = CommerceEngine::new(db.clone());

        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let product_id = seed_product(&db, vendor_id, 10).await;
        let variant = catalog
            .create_variant(product_id, "Size", "M", 0, 4)
            .await
            .unwrap();
        let buyer = identity.create_user("B", "b@example.com").await.unwrap();

        commerce
            .place_order(
                buyer.id,
                vec![OrderLine { product_id, variant_id: Some(variant.id), quantity: 3 }],
                None,
                "card",
            )
            .await
            .unwrap();

        assert_eq!(catalog.get_product(product_id).await.unwrap().stock, 10);
        assert_eq!(catalog.get_variant(variant.id).await.unwrap().stock, 1);
    }

    #[tokio::test]
    async fn stock_shortfall_aborts_the_whole_order() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let catalog = CatalogStore::new(db.clone());
        let commerce = CommerceEngine::new(db.clone());

        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let plenty = seed_product(&db, vendor_id, 100).await;
        let scarce = seed_product(&db, vendor_id, 1).await;
        let buyer = identity.create_user("B", "b@example.com").await.unwrap();

        let err = commerce
            .place_order(
                buyer.id,
                vec![
                    OrderLine { product_id: plenty, variant_id: None, quantity: 5 },
                    OrderLine { product_id: scarce, variant_id: None, quantity: 2 },
                ],
                None,
                "card",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Transaction(_)));

        // No partial decrement or order row survived the rollback.
        assert_eq!(catalog.get_product(plenty).await.unwrap().stock, 100);
        assert_eq!(catalog.get_product(scarce).await.unwrap().stock, 1);
        assert_eq!(order::Entity::find().all(&db).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn three_units_two_orders_of_two_exactly_one_wins() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let catalog = CatalogStore::new(db.clone());
        let commerce = CommerceEngine::new(db.clone());

        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let product_id = seed_product(&db, vendor_id, 3).await;
        let buyer = identity.create_user("B", "b@example.com").await.unwrap();

        let line = || vec![OrderLine { product_id, variant_id: None, quantity: 2 }];
        let first = commerce.place_order(buyer.id, line(), None, "card").await;
        let second = commerce.place_order(buyer.id, line(), None, "card").await;

        assert!(first.is_ok());
        assert!(matches!(second.unwrap_err(), AppError::Transaction(_)));
        let remaining = catalog.get_product(product_id).await.unwrap().stock;
        assert_eq!(remaining, 1);
    }

    #[tokio::test]
    async fn price_snapshots_survive_later_price_changes() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let catalog = CatalogStore::new(db.clone());
        let commerce = CommerceEngine::new(db.clone());

        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let product_id = seed_product(&db, vendor_id, 10).await;
        let buyer = identity.create_user("B", "b@example.com").await.unwrap();

        let order = commerce
            .place_order(
                buyer.id,
                vec![OrderLine { product_id, variant_id: None, quantity: 1 }],
                None,
                "card",
            )
            .await
            .unwrap();

        catalog
            .update_product(
                product_id,
                ProductUpdate { price_cents: Some(9999), ..Default::default() },
            )
            .await
            .unwrap();

        let items = commerce.order_items(order.id).await.unwrap();
        assert_eq!(items[0].price_cents, 1500);
        assert_eq!(commerce.get_order(order.id).await.unwrap().total_cents, 1500);
    }

    #[tokio::test]
    async fn order_lifecycle_is_forward_only() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let commerce = CommerceEngine::new(db.clone());

        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let product_id = seed_product(&db, vendor_id, 10).await;
        let buyer = identity.create_user("B", "b@example.com").await.unwrap();
        let order = commerce
            .place_order(
                buyer.id,
                vec![OrderLine { product_id, variant_id: None, quantity: 1 }],
                None,
                "card",
            )
            .await
            .unwrap();

        // Skipping a stage is rejected and the row is unchanged.
        let err = commerce
            .advance_status(order.id, OrderStatus::Shipped)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(
            commerce.get_order(order.id).await.unwrap().status,
            OrderStatus::Pending
        );

        commerce.advance_status(order.id, OrderStatus::Processing).await.unwrap();
        commerce.advance_status(order.id, OrderStatus::Shipped).await.unwrap();
        commerce.advance_status(order.id, OrderStatus::Delivered).await.unwrap();

        // Cancellation through advance is refused outright.
        let err = commerce
            .advance_status(order.id, OrderStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn cancelling_a_processing_order_restores_stock() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let catalog = CatalogStore::new(db.clone());
        let commerce = CommerceEngine::new(db.clone());

        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let product_id = seed_product(&db, vendor_id, 5).await;
        let buyer = identity.create_user("B", "b@example.com").await.unwrap();

        let order = commerce
            .place_order(
                buyer.id,
                vec![OrderLine { product_id, variant_id: None, quantity: 2 }],
                None,
                "card",
            )
            .await
            .unwrap();
        commerce.advance_status(order.id, OrderStatus::Processing).await.unwrap();
        assert_eq!(catalog.get_product(product_id).await.unwrap().stock, 3);

        let cancelled = commerce.cancel_order(order.id).await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(catalog.get_product(product_id).await.unwrap().stock, 5);
    }

    #[tokio::test]
    async fn shipped_orders_cannot_be_cancelled() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let catalog = CatalogStore::new(db.clone());
        let commerce = CommerceEngine::new(db.clone());

        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let product_id = seed_product(&db, vendor_id, 5).await;
        let buyer = identity.create_user("B", "b@example.com").await.unwrap();
        let order = commerce
            .place_order(
                buyer.id,
                vec![OrderLine { product_id, variant_id: None, quantity: 2 }],
                None,
                "card",
            )
            .await
            .unwrap();
        commerce.advance_status(order.id, OrderStatus::Processing).await.unwrap();
        commerce.advance_status(order.id, OrderStatus::Shipped).await.unwrap();

        let err = commerce.cancel_order(order.id).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        // Stock stays reserved.
        assert_eq!(catalog.get_product(product_id).await.unwrap().stock, 3);
    }

    #[tokio::test]
    async fn zero_quantity_lines_are_invalid() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let commerce = CommerceEngine::new(db.clone());

        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let product_id = seed_product(&db, vendor_id, 5).await;
        let buyer = identity.create_user("B", "b@example.com").await.unwrap();

        let err = commerce
            .place_order(
                buyer.id,
                vec![OrderLine { product_id, variant_id: None, quantity: 0 }],
                None,
                "card",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = commerce.place_order(buyer.id, vec![], None, "card").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn variant_must_belong_to_the_ordered_product() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let catalog = CatalogStore::new(db.clone());
        let commerce = CommerceEngine::new(db.clone());

        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let product_a = seed_product(&db, vendor_id, 5).await;
        let product_b = seed_product(&db, vendor_id, 5).await;
        let variant_b = catalog
            .create_variant(product_b, "Size", "S", 0, 5)
            .await
            .unwrap();
        let buyer = identity.create_user("B", "b@example.com").await.unwrap();

        let err = commerce
            .place_order(
                buyer.id,
                vec![OrderLine {
                    product_id: product_a,
                    variant_id: Some(variant_b.id),
                    quantity: 1,
                }],
                None,
                "card",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    // Live commerce

    #[tokio::test]
    async fn stream_transitions_follow_the_fixed_order() {
        let (db, _tmp) = test_db().await;
        let live = LiveCommerceStore::new(db.clone());
        let vendor_id = seed_vendor(&db, "seller@example.com").await;

        let stream = live
            .schedule_stream(vendor_id, "Launch", None, Utc::now())
            .await
            .unwrap();
        assert_eq!(stream.status, StreamStatus::Scheduled);

        // Skipping straight to ENDED is rejected, state unchanged.
        let err = live
            .transition_stream(stream.id, StreamStatus::Ended)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(
            live.get_stream(stream.id).await.unwrap().status,
            StreamStatus::Scheduled
        );

        let started = live.transition_stream(stream.id, StreamStatus::Live).await.unwrap();
        assert!(started.actual_start.is_some());
        assert!(started.actual_end.is_none());

        let ended = live.transition_stream(stream.id, StreamStatus::Ended).await.unwrap();
        assert!(ended.actual_end.is_some());

        // No way back.
        let err = live
            .transition_stream(stream.id, StreamStatus::Live)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn repromoting_updates_promoted_at_without_duplicating() {
        let (db, _tmp) = test_db().await;
        let live = LiveCommerceStore::new(db.clone());
        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let product_id = seed_product(&db, vendor_id, 5).await;

        let stream = live
            .schedule_stream(vendor_id, "Launch", None, Utc::now())
            .await
            .unwrap();

        live.promote_to_stream(stream.id, product_id).await.unwrap();
        let first = live.stream_promotions(stream.id).await.unwrap();
        assert_eq!(first.len(), 1);

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        live.promote_to_stream(stream.id, product_id).await.unwrap();
        let second = live.stream_promotions(stream.id).await.unwrap();
        assert_eq!(second.len(), 1);
        assert!(second[0].promoted_at > first[0].promoted_at);
    }

    #[tokio::test]
    async fn viewer_count_is_guarded() {
        let (db, _tmp) = test_db().await;
        let live = LiveCommerceStore::new(db.clone());
        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let stream = live
            .schedule_stream(vendor_id, "Launch", None, Utc::now())
            .await
            .unwrap();

        // Not live yet.
        assert!(live.update_viewer_count(stream.id, 5).await.is_err());

        live.transition_stream(stream.id, StreamStatus::Live).await.unwrap();
        live.update_viewer_count(stream.id, 5).await.unwrap();
        live.update_viewer_count(stream.id, -3).await.unwrap();
        assert_eq!(live.get_stream(stream.id).await.unwrap().viewer_count, 2);

        // Would go negative.
        assert!(live.update_viewer_count(stream.id, -10).await.is_err());
        assert_eq!(live.get_stream(stream.id).await.unwrap().viewer_count, 2);
    }

    #[tokio::test]
    async fn video_counters_only_move_forward() {
        let (db, _tmp) = test_db().await;
        let live = LiveCommerceStore::new(db.clone());
        let vendor_id = seed_vendor(&db, "seller@example.com").await;

        let err = live
            .publish_video(vendor_id, "https://cdn.example/v.mp4", None, None, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let video = live
            .publish_video(vendor_id, "https://cdn.example/v.mp4", None, None, 30)
            .await
            .unwrap();

        live.bump_video_counters(video.id, 10, 2, 1).await.unwrap();
        live.bump_video_counters(video.id, 5, 0, 0).await.unwrap();
        let refreshed = live.get_video(video.id).await.unwrap();
        assert_eq!((refreshed.views, refreshed.likes, refreshed.shares), (15, 2, 1));

        let err = live.bump_video_counters(video.id, -1, 0, 0).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn relinking_a_video_product_updates_its_position() {
        let (db, _tmp) = test_db().await;
        let live = LiveCommerceStore::new(db.clone());
        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let product_id = seed_product(&db, vendor_id, 5).await;
        let video = live
            .publish_video(vendor_id, "https://cdn.example/v.mp4", None, None, 30)
            .await
            .unwrap();

        live.promote_to_video(video.id, product_id, 1).await.unwrap();
        live.promote_to_video(video.id, product_id, 3).await.unwrap();

        let links = live.video_products(video.id).await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].position, 3);
    }

    #[tokio::test]
    async fn analytics_recompute_aggregates_the_live_window() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let commerce = CommerceEngine::new(db.clone());
        let live = LiveCommerceStore::new(db.clone());

        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let product_id = seed_product(&db, vendor_id, 10).await;
        let buyer = identity.create_user("B", "b@example.com").await.unwrap();

        let stream = live
            .schedule_stream(vendor_id, "Launch", None, Utc::now())
            .await
            .unwrap();
        live.transition_stream(stream.id, StreamStatus::Live).await.unwrap();
        live.promote_to_stream(stream.id, product_id).await.unwrap();
        live.update_viewer_count(stream.id, 42).await.unwrap();

        commerce
            .place_order(
                buyer.id,
                vec![OrderLine { product_id, variant_id: None, quantity: 2 }],
                None,
                "card",
            )
            .await
            .unwrap();

        live.transition_stream(stream.id, StreamStatus::Ended).await.unwrap();

        let analytics = live.recompute_analytics(stream.id).await.unwrap();
        assert_eq!(analytics.products_sold, 2);
        assert_eq!(analytics.total_revenue_cents, 3000);
        assert_eq!(analytics.peak_viewers, 42);

        // Recomputation is idempotent.
        let again = live.recompute_analytics(stream.id).await.unwrap();
        assert_eq!(again, analytics);
    }

    // Social

    #[tokio::test]
    async fn refollowing_leaves_exactly_one_row() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let social = SocialStore::new(db.clone());

        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let fan = identity.create_user("F", "f@example.com").await.unwrap();

        social.follow(fan.id, vendor_id).await.unwrap();
        social.follow(fan.id, vendor_id).await.unwrap();
        assert_eq!(social.follower_count(vendor_id).await.unwrap(), 1);

        social.unfollow(fan.id, vendor_id).await.unwrap();
        assert_eq!(social.follower_count(vendor_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn following_a_missing_vendor_is_a_referential_error() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let social = SocialStore::new(db);

        let fan = identity.create_user("F", "f@example.com").await.unwrap();
        let err = social.follow(fan.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn notifications_resolve_their_typed_reference() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let live = LiveCommerceStore::new(db.clone());
        let social = SocialStore::new(db.clone());

        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let fan = identity.create_user("F", "f@example.com").await.unwrap();
        let stream = live
            .schedule_stream(vendor_id, "Launch", None, Utc::now())
            .await
            .unwrap();

        // A dangling reference is rejected before anything is written.
        let err = social
            .notify(fan.id, "Live now", "x", NotificationRef::LiveStream(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(social.unread_notifications(fan.id).await.unwrap().is_empty());

        let sent = social
            .notify(fan.id, "Live now", "x", NotificationRef::LiveStream(stream.id))
            .await
            .unwrap();
        assert_eq!(
            NotificationRef::from_parts(sent.kind, sent.related_id.unwrap()),
            NotificationRef::LiveStream(stream.id)
        );

        // Marking read is the only mutation and empties the unread list.
        let read = social.mark_read(sent.id).await.unwrap();
        assert!(read.is_read);
        assert!(social.unread_notifications(fan.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn comment_parents_must_share_the_entity_scope() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let live = LiveCommerceStore::new(db.clone());
        let social = SocialStore::new(db.clone());

        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let fan = identity.create_user("F", "f@example.com").await.unwrap();
        let stream_a = live
            .schedule_stream(vendor_id, "A", None, Utc::now())
            .await
            .unwrap();
        let stream_b = live
            .schedule_stream(vendor_id, "B", None, Utc::now())
            .await
            .unwrap();

        let root = social
            .comment(fan.id, CommentEntityType::LiveStream, stream_a.id, "hi", None)
            .await
            .unwrap();

        // Same scope: fine.
        social
            .comment(
                fan.id,
                CommentEntityType::LiveStream,
                stream_a.id,
                "reply",
                Some(root.id),
            )
            .await
            .unwrap();

        // Parent lives on a different stream: rejected.
        let err = social
            .comment(
                fan.id,
                CommentEntityType::LiveStream,
                stream_b.id,
                "cross",
                Some(root.id),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let thread = social
            .entity_comments(CommentEntityType::LiveStream, stream_a.id)
            .await
            .unwrap();
        assert_eq!(thread.len(), 2);
    }

    #[tokio::test]
    async fn comments_require_an_existing_target() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let social = SocialStore::new(db);

        let fan = identity.create_user("F", "f@example.com").await.unwrap();
        let err = social
            .comment(fan.id, CommentEntityType::Video, Uuid::new_v4(), "hi", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    // Stock invariant across a mixed sequence.

    #[tokio::test]
    async fn stock_never_goes_negative_across_orders_and_cancellations() {
        let (db, _tmp) = test_db().await;
        let identity = IdentityStore::new(db.clone());
        let catalog = CatalogStore::new(db.clone());
        let commerce = CommerceEngine::new(db.clone());

        let vendor_id = seed_vendor(&db, "seller@example.com").await;
        let product_id = seed_product(&db, vendor_id, 4).await;
        let buyer = identity.create_user("B", "b@example.com").await.unwrap();
        let line = |q| vec![OrderLine { product_id, variant_id: None, quantity: q }];

        let first = commerce.place_order(buyer.id, line(3), None, "card").await.unwrap();
        assert!(commerce.place_order(buyer.id, line(2), None, "card").await.is_err());
        commerce.cancel_order(first.id).await.unwrap();
        let second = commerce.place_order(buyer.id, line(4), None, "card").await.unwrap();
        assert!(commerce.place_order(buyer.id, line(1), None, "card").await.is_err());
        commerce.cancel_order(second.id).await.unwrap();

        let stock = product::Entity::find_by_id(product_id)
            .one(&db)
            .await
            .unwrap()
            .unwrap()
            .stock;
        assert_eq!(stock, 4);
    }
}
