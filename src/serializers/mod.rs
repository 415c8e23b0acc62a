//! REST representations
//!
//! One serializer per entity. Each exposes every declared field of its
//! model; relations appear as ids and many-to-many relations as sorted id
//! lists. The `FIELDS` table on each serializer is what request payloads
//! are cleaned against.

pub mod action_rang_type;
pub mod action_type;
pub mod category;
pub mod customer;
pub mod delivery;
pub mod delivery_type;
pub mod discount;
pub mod package;
pub mod product;
pub mod ratings;
pub mod review;
pub mod store;
pub mod trade;
pub mod user_action;

pub use action_rang_type::ActionRangTypeSerializer;
pub use action_type::ActionTypeSerializer;
pub use category::CategorySerializer;
pub use customer::CustomerSerializer;
pub use delivery::DeliverySerializer;
pub use delivery_type::DeliveryTypeSerializer;
pub use discount::DiscountSerializer;
pub use package::PackageSerializer;
pub use product::ProductSerializer;
pub use ratings::RatingsSerializer;
pub use review::ReviewSerializer;
pub use store::StoreSerializer;
pub use trade::TradeSerializer;
pub use user_action::UserActionSerializer;
