use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FieldSpec;
use crate::models::delivery::{ActiveModel, Model};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeliverySerializer {
    pub id: Option<i32>,
    pub user_id: i32,
    /// Product ids carried by this delivery
    #[serde(default)]
    pub product_id: Vec<i32>,
    /// Package ids used by this delivery
    #[serde(default)]
    pub package_id: Vec<i32>,
    pub trade_id: Option<i32>,
    pub store_id: Option<i32>,
    pub delivery_type: Option<i32>,
    pub delivery_price: Option<i32>,
    pub date: NaiveDate,
    pub during: DateTime<Utc>,
    pub delivery_status: Option<i32>,
}

impl DeliverySerializer {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::foreign_key("user_id", "customers"),
        FieldSpec::many_to_many("product_id", "products"),
        FieldSpec::many_to_many("package_id", "packages"),
        FieldSpec::foreign_key("trade_id", "trades").blank().nullable(),
        FieldSpec::foreign_key("store_id", "stores").blank().nullable(),
        FieldSpec::foreign_key("delivery_type", "delivery_types").blank().nullable(),
        FieldSpec::positive_small_integer("delivery_price").blank().nullable(),
        FieldSpec::date("date"),
        FieldSpec::datetime("during"),
        FieldSpec::foreign_key("delivery_status", "ratings").blank().nullable(),
    ];

    pub fn from_model(model: Model, product_id: Vec<i32>, package_id: Vec<i32>) -> Self {
        Self {
            id: Some(model.id),
            user_id: model.user_id,
            product_id,
            package_id,
            trade_id: model.trade_id,
            store_id: model.store_id,
            delivery_type: model.delivery_type,
            delivery_price: model.delivery_price,
            date: model.date,
            during: model.during,
            delivery_status: model.delivery_status,
        }
    }

    pub fn label(&self) -> String {
        let price = self
            .delivery_price
            .map_or_else(|| "None".to_string(), |p| p.to_string());
        format!("{} {}", self.id.unwrap_or_default(), price)
    }
}

impl From<DeliverySerializer> for ActiveModel {
    fn from(delivery: DeliverySerializer) -> Self {
        Self {
            id: delivery.id.map_or(NotSet, Set),
            user_id: Set(delivery.user_id),
            trade_id: Set(delivery.trade_id),
            store_id: Set(delivery.store_id),
            delivery_type: Set(delivery.delivery_type),
            delivery_price: Set(delivery.delivery_price),
            date: Set(delivery.date),
            during: Set(delivery.during),
            delivery_status: Set(delivery.delivery_status),
        }
    }
}
