// ABOUTME: SeaORM entities module for the livecart relational schema
// ABOUTME: One entity per table: identity, catalog, commerce, live, social

pub mod account;
pub mod address;
pub mod comment;
pub mod follower;
pub mod live_stream;
pub mod live_stream_product;
pub mod notification;
pub mod order;
pub mod order_item;
pub mod product;
pub mod product_variant;
pub mod product_view;
pub mod session;
pub mod short_video;
pub mod stream_analytics;
pub mod user;
pub mod vendor;
pub mod verification;
pub mod video_product;

pub use account::Entity as Account;
pub use address::Entity as Address;
pub use comment::Entity as Comment;
pub use follower::Entity as Follower;
pub use live_stream::Entity as LiveStream;
pub use live_stream_product::Entity as LiveStreamProduct;
pub use notification::Entity as Notification;
pub use order::Entity as Order;
pub use order_item::Entity as OrderItem;
pub use product::Entity as Product;
pub use product_variant::Entity as ProductVariant;
pub use product_view::Entity as ProductView;
pub use session::Entity as Session;
pub use short_video::Entity as ShortVideo;
pub use stream_analytics::Entity as StreamAnalytics;
pub use user::Entity as User;
pub use vendor::Entity as Vendor;
pub use verification::Entity as Verification;
pub use video_product::Entity as VideoProduct;
