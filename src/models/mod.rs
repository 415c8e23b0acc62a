pub mod action_rang_type;
pub mod action_type;
pub mod category;
pub mod customer;
pub mod delivery;
pub mod delivery_packages;
pub mod delivery_products;
pub mod delivery_type;
pub mod discount;
pub mod package;
pub mod product;
pub mod product_categories;
pub mod ratings;
pub mod review;
pub mod staff_user;
pub mod store;
pub mod trade;
pub mod trade_discounts;
pub mod user_action;

pub use customer::Gender;
