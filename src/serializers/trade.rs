use chrono::{DateTime, Utc};
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FieldSpec;
use crate::models::trade::{ActiveModel, Model};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TradeSerializer {
    pub id: Option<i32>,
    pub product: Option<i32>,
    pub amount: Option<i32>,
    pub price: f64,
    /// Discount ids applied to this trade
    #[serde(default)]
    pub discount_id: Vec<i32>,
    pub user_id: Option<i32>,
    pub location: String,
    pub packaging: Option<i32>,
    /// Assigned by the server on creation
    pub date: Option<DateTime<Utc>>,
}

impl TradeSerializer {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::foreign_key("product", "products").blank().nullable(),
        FieldSpec::integer("amount").blank().nullable(),
        FieldSpec::float("price"),
        FieldSpec::many_to_many("discount_id", "discounts"),
        FieldSpec::foreign_key("user_id", "customers").blank().nullable(),
        FieldSpec::text("location", 100),
        FieldSpec::foreign_key("packaging", "packages").blank().nullable(),
        FieldSpec::datetime("date").read_only(),
    ];

    pub fn from_model(model: Model, discount_id: Vec<i32>) -> Self {
        Self {
            id: Some(model.id),
            product: model.product,
            amount: model.amount,
            price: model.price,
            discount_id,
            user_id: model.user_id,
            location: model.location,
            packaging: model.packaging,
            date: Some(model.date),
        }
    }

    pub fn label(&self) -> String {
        match self.product {
            Some(product) => format!("Trade {} (product {})", self.id.unwrap_or_default(), product),
            None => format!("Trade {}", self.id.unwrap_or_default()),
        }
    }
}

impl From<TradeSerializer> for ActiveModel {
    fn from(trade: TradeSerializer) -> Self {
        Self {
            id: trade.id.map_or(NotSet, Set),
            product: Set(trade.product),
            amount: Set(trade.amount),
            price: Set(trade.price),
            user_id: Set(trade.user_id),
            location: Set(trade.location),
            packaging: Set(trade.packaging),
            // read-only; stamped by the repository on insert
            date: NotSet,
        }
    }
}
