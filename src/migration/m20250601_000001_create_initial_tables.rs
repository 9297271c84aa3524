// ABOUTME: Initial migration creating the full livecart schema
// ABOUTME: Identity, vendor/catalog, commerce, live commerce, and social tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Identity tables. Sessions and accounts cascade with their user.
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::EmailVerified).boolean().not_null().default(false))
                    .col(ColumnDef::new(Users::Image).string())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sessions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Sessions::Token).string().not_null().unique_key())
                    .col(ColumnDef::new(Sessions::UserId).uuid().not_null())
                    .col(ColumnDef::new(Sessions::ExpiresAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Sessions::IpAddress).string())
                    .col(ColumnDef::new(Sessions::UserAgent).string())
                    .col(ColumnDef::new(Sessions::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Sessions::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sessions_user_id")
                            .from(Sessions::Table, Sessions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Accounts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Accounts::AccountId).string().not_null())
                    .col(ColumnDef::new(Accounts::ProviderId).string().not_null())
                    .col(ColumnDef::new(Accounts::UserId).uuid().not_null())
                    .col(ColumnDef::new(Accounts::AccessToken).string())
                    .col(ColumnDef::new(Accounts::RefreshToken).string())
                    .col(ColumnDef::new(Accounts::IdToken).string())
                    .col(ColumnDef::new(Accounts::AccessTokenExpiresAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Accounts::RefreshTokenExpiresAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Accounts::Scope).string())
                    .col(ColumnDef::new(Accounts::Password).string())
                    .col(ColumnDef::new(Accounts::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Accounts::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accounts_user_id")
                            .from(Accounts::Table, Accounts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_accounts_provider_unique")
                            .table(Accounts::Table)
                            .col(Accounts::ProviderId)
                            .col(Accounts::AccountId)
                            .col(Accounts::UserId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Verifications::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Verifications::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Verifications::Identifier).string().not_null())
                    .col(ColumnDef::new(Verifications::Value).string().not_null())
                    .col(ColumnDef::new(Verifications::ExpiresAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Verifications::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Verifications::UpdatedAt).timestamp_with_time_zone().not_null())
                    .index(
                        Index::create()
                            .name("idx_verifications_identifier_unique")
                            .table(Verifications::Table)
                            .col(Verifications::Identifier)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        // Vendor and catalog tables. The vendor row shares its primary key
        // with the backing user and disappears with it.
        manager
            .create_table(
                Table::create()
                    .table(Vendors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Vendors::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Vendors::StoreName).string().not_null())
                    .col(ColumnDef::new(Vendors::Description).string())
                    .col(ColumnDef::new(Vendors::IsApproved).boolean().not_null().default(false))
                    .col(ColumnDef::new(Vendors::CommissionRateBps).integer().not_null().default(0))
                    .col(ColumnDef::new(Vendors::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Vendors::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vendors_user_id")
                            .from(Vendors::Table, Vendors::Id)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Products::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Products::VendorId).uuid().not_null())
                    .col(ColumnDef::new(Products::Name).string().not_null())
                    .col(ColumnDef::new(Products::Description).string())
                    .col(ColumnDef::new(Products::PriceCents).big_integer().not_null())
                    .col(ColumnDef::new(Products::Stock).integer().not_null().default(0))
                    .col(ColumnDef::new(Products::Sku).string().unique_key())
                    .col(ColumnDef::new(Products::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(Products::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Products::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_vendor_id")
                            .from(Products::Table, Products::VendorId)
                            .to(Vendors::Table, Vendors::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductVariants::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ProductVariants::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ProductVariants::ProductId).uuid().not_null())
                    .col(ColumnDef::new(ProductVariants::Name).string().not_null())
                    .col(ColumnDef::new(ProductVariants::Value).string().not_null())
                    .col(ColumnDef::new(ProductVariants::PriceOffsetCents).big_integer().not_null().default(0))
                    .col(ColumnDef::new(ProductVariants::Stock).integer().not_null().default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_variants_product_id")
                            .from(ProductVariants::Table, ProductVariants::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Commerce tables keep financial history: user deletion is
        // restricted while orders or addresses exist.
        manager
            .create_table(
                Table::create()
                    .table(Addresses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Addresses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Addresses::UserId).uuid().not_null())
                    .col(ColumnDef::new(Addresses::Street).string().not_null())
                    .col(ColumnDef::new(Addresses::City).string().not_null())
                    .col(ColumnDef::new(Addresses::State).string())
                    .col(ColumnDef::new(Addresses::ZipCode).string().not_null())
                    .col(ColumnDef::new(Addresses::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Addresses::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_addresses_user_id")
                            .from(Addresses::Table, Addresses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Orders::UserId).uuid().not_null())
                    .col(ColumnDef::new(Orders::TotalCents).big_integer().not_null())
                    .col(ColumnDef::new(Orders::Status).string().not_null())
                    .col(ColumnDef::new(Orders::ShippingAddressId).uuid())
                    .col(ColumnDef::new(Orders::PaymentMethod).string().not_null())
                    .col(ColumnDef::new(Orders::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Orders::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_user_id")
                            .from(Orders::Table, Orders::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_shipping_address_id")
                            .from(Orders::Table, Orders::ShippingAddressId)
                            .to(Addresses::Table, Addresses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderItems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OrderItems::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(OrderItems::OrderId).uuid().not_null())
                    .col(ColumnDef::new(OrderItems::ProductId).uuid().not_null())
                    .col(ColumnDef::new(OrderItems::VariantId).uuid())
                    .col(ColumnDef::new(OrderItems::Quantity).integer().not_null())
                    .col(ColumnDef::new(OrderItems::PriceCents).big_integer().not_null())
                    .col(ColumnDef::new(OrderItems::VendorId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_items_order_id")
                            .from(OrderItems::Table, OrderItems::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_items_product_id")
                            .from(OrderItems::Table, OrderItems::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_items_variant_id")
                            .from(OrderItems::Table, OrderItems::VariantId)
                            .to(ProductVariants::Table, ProductVariants::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_items_vendor_id")
                            .from(OrderItems::Table, OrderItems::VendorId)
                            .to(Vendors::Table, Vendors::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Live commerce tables.
        manager
            .create_table(
                Table::create()
                    .table(LiveStreams::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LiveStreams::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(LiveStreams::VendorId).uuid().not_null())
                    .col(ColumnDef::new(LiveStreams::Title).string().not_null())
                    .col(ColumnDef::new(LiveStreams::Description).string())
                    .col(ColumnDef::new(LiveStreams::Status).string().not_null())
                    .col(ColumnDef::new(LiveStreams::ScheduledStart).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(LiveStreams::ActualStart).timestamp_with_time_zone())
                    .col(ColumnDef::new(LiveStreams::ActualEnd).timestamp_with_time_zone())
                    .col(ColumnDef::new(LiveStreams::ViewerCount).integer().not_null().default(0))
                    .col(ColumnDef::new(LiveStreams::ChatId).string())
                    .col(ColumnDef::new(LiveStreams::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(LiveStreams::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_live_streams_vendor_id")
                            .from(LiveStreams::Table, LiveStreams::VendorId)
                            .to(Vendors::Table, Vendors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LiveStreamProducts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LiveStreamProducts::LiveStreamId).uuid().not_null())
                    .col(ColumnDef::new(LiveStreamProducts::ProductId).uuid().not_null())
                    .col(ColumnDef::new(LiveStreamProducts::PromotedAt).timestamp_with_time_zone().not_null())
                    .primary_key(
                        Index::create()
                            .col(LiveStreamProducts::LiveStreamId)
                            .col(LiveStreamProducts::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_live_stream_products_stream_id")
                            .from(LiveStreamProducts::Table, LiveStreamProducts::LiveStreamId)
                            .to(LiveStreams::Table, LiveStreams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_live_stream_products_product_id")
                            .from(LiveStreamProducts::Table, LiveStreamProducts::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ShortVideos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ShortVideos::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ShortVideos::VendorId).uuid().not_null())
                    .col(ColumnDef::new(ShortVideos::VideoUrl).string().not_null())
                    .col(ColumnDef::new(ShortVideos::ThumbnailUrl).string())
                    .col(ColumnDef::new(ShortVideos::Description).string())
                    .col(ColumnDef::new(ShortVideos::Duration).integer().not_null())
                    .col(ColumnDef::new(ShortVideos::Views).integer().not_null().default(0))
                    .col(ColumnDef::new(ShortVideos::Likes).integer().not_null().default(0))
                    .col(ColumnDef::new(ShortVideos::Shares).integer().not_null().default(0))
                    .col(ColumnDef::new(ShortVideos::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(ShortVideos::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_short_videos_vendor_id")
                            .from(ShortVideos::Table, ShortVideos::VendorId)
                            .to(Vendors::Table, Vendors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VideoProducts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(VideoProducts::VideoId).uuid().not_null())
                    .col(ColumnDef::new(VideoProducts::ProductId).uuid().not_null())
                    .col(ColumnDef::new(VideoProducts::Position).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(VideoProducts::VideoId)
                            .col(VideoProducts::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_products_video_id")
                            .from(VideoProducts::Table, VideoProducts::VideoId)
                            .to(ShortVideos::Table, ShortVideos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_products_product_id")
                            .from(VideoProducts::Table, VideoProducts::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_video_products_position_unique")
                            .table(VideoProducts::Table)
                            .col(VideoProducts::VideoId)
                            .col(VideoProducts::Position)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StreamAnalytics::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StreamAnalytics::StreamId).uuid().not_null().primary_key())
                    .col(ColumnDef::new(StreamAnalytics::PeakViewers).integer().not_null().default(0))
                    .col(ColumnDef::new(StreamAnalytics::AvgViewDuration).integer().not_null().default(0))
                    .col(ColumnDef::new(StreamAnalytics::ProductsSold).integer().not_null().default(0))
                    .col(ColumnDef::new(StreamAnalytics::TotalRevenueCents).big_integer().not_null().default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stream_analytics_stream_id")
                            .from(StreamAnalytics::Table, StreamAnalytics::StreamId)
                            .to(LiveStreams::Table, LiveStreams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Social tables.
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Notifications::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Notifications::UserId).uuid().not_null())
                    .col(ColumnDef::new(Notifications::Kind).string().not_null())
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Message).string().not_null())
                    .col(ColumnDef::new(Notifications::RelatedId).uuid())
                    .col(ColumnDef::new(Notifications::IsRead).boolean().not_null().default(false))
                    .col(ColumnDef::new(Notifications::CreatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notifications_user_id")
                            .from(Notifications::Table, Notifications::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Followers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Followers::UserId).uuid().not_null())
                    .col(ColumnDef::new(Followers::VendorId).uuid().not_null())
                    .col(ColumnDef::new(Followers::CreatedAt).timestamp_with_time_zone().not_null())
                    .primary_key(Index::create().col(Followers::UserId).col(Followers::VendorId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_followers_user_id")
                            .from(Followers::Table, Followers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_followers_vendor_id")
                            .from(Followers::Table, Followers::VendorId)
                            .to(Vendors::Table, Vendors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Comments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Comments::UserId).uuid().not_null())
                    .col(ColumnDef::new(Comments::Content).string().not_null())
                    .col(ColumnDef::new(Comments::ParentId).uuid())
                    .col(ColumnDef::new(Comments::EntityType).string().not_null())
                    .col(ColumnDef::new(Comments::EntityId).uuid().not_null())
                    .col(ColumnDef::new(Comments::CreatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_user_id")
                            .from(Comments::Table, Comments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_parent_id")
                            .from(Comments::Table, Comments::ParentId)
                            .to(Comments::Table, Comments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductViews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ProductViews::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ProductViews::ProductId).uuid().not_null())
                    .col(ColumnDef::new(ProductViews::UserId).uuid())
                    .col(ColumnDef::new(ProductViews::ViewedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_views_product_id")
                            .from(ProductViews::Table, ProductViews::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_views_user_id")
                            .from(ProductViews::Table, ProductViews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            Table::drop().table(ProductViews::Table).to_owned(),
            Table::drop().table(Comments::Table).to_owned(),
            Table::drop().table(Followers::Table).to_owned(),
            Table::drop().table(Notifications::Table).to_owned(),
            Table::drop().table(StreamAnalytics::Table).to_owned(),
            Table::drop().table(VideoProducts::Table).to_owned(),
            Table::drop().table(ShortVideos::Table).to_owned(),
            Table::drop().table(LiveStreamProducts::Table).to_owned(),
            Table::drop().table(LiveStreams::Table).to_owned(),
            Table::drop().table(OrderItems::Table).to_owned(),
            Table::drop().table(Orders::Table).to_owned(),
            Table::drop().table(Addresses::Table).to_owned(),
            Table::drop().table(ProductVariants::Table).to_owned(),
            Table::drop().table(Products::Table).to_owned(),
            Table::drop().table(Vendors::Table).to_owned(),
            Table::drop().table(Verifications::Table).to_owned(),
            Table::drop().table(Accounts::Table).to_owned(),
            Table::drop().table(Sessions::Table).to_owned(),
            Table::drop().table(Users::Table).to_owned(),
        ] {
            manager.drop_table(table).await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    EmailVerified,
    Image,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    Id,
    Token,
    UserId,
    ExpiresAt,
    IpAddress,
    UserAgent,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    AccountId,
    ProviderId,
    UserId,
    AccessToken,
    RefreshToken,
    IdToken,
    AccessTokenExpiresAt,
    RefreshTokenExpiresAt,
    Scope,
    Password,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Verifications {
    Table,
    Id,
    Identifier,
    Value,
    ExpiresAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Vendors {
    Table,
    Id,
    StoreName,
    Description,
    IsApproved,
    CommissionRateBps,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    VendorId,
    Name,
    Description,
    PriceCents,
    Stock,
    Sku,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProductVariants {
    Table,
    Id,
    ProductId,
    Name,
    Value,
    PriceOffsetCents,
    Stock,
}

#[derive(DeriveIden)]
enum Addresses {
    Table,
    Id,
    UserId,
    Street,
    City,
    State,
    ZipCode,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    UserId,
    TotalCents,
    Status,
    ShippingAddressId,
    PaymentMethod,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OrderItems {
    Table,
    Id,
    OrderId,
    ProductId,
    VariantId,
    Quantity,
    PriceCents,
    VendorId,
}

#[derive(DeriveIden)]
enum LiveStreams {
    Table,
    Id,
    VendorId,
    Title,
    Description,
    Status,
    ScheduledStart,
    ActualStart,
    ActualEnd,
    ViewerCount,
    ChatId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LiveStreamProducts {
    Table,
    LiveStreamId,
    ProductId,
    PromotedAt,
}

#[derive(DeriveIden)]
enum ShortVideos {
    Table,
    Id,
    VendorId,
    VideoUrl,
    ThumbnailUrl,
    Description,
    Duration,
    Views,
    Likes,
    Shares,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum VideoProducts {
    Table,
    VideoId,
    ProductId,
    Position,
}

#[derive(DeriveIden)]
enum StreamAnalytics {
    Table,
    StreamId,
    PeakViewers,
    AvgViewDuration,
    ProductsSold,
    TotalRevenueCents,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    UserId,
    Kind,
    Title,
    Message,
    RelatedId,
    IsRead,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Followers {
    Table,
    UserId,
    VendorId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    UserId,
    Content,
    ParentId,
    EntityType,
    EntityId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ProductViews {
    Table,
    Id,
    ProductId,
    UserId,
    ViewedAt,
}
