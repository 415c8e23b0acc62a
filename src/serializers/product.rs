use chrono::{DateTime, Utc};
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FieldSpec;
use crate::models::product::{ActiveModel, Model};

/// A coffee product as sold by a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductSerializer {
    pub id: Option<i32>,
    pub name: String,
    pub info: String,
    pub store_product: Option<i32>,
    /// Category ids
    #[serde(default)]
    pub category: Vec<i32>,
    pub stock: bool,
    pub exp_date: DateTime<Utc>,
    pub product_size: i32,
    pub product_weight: i32,
}

impl ProductSerializer {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::char("name", 150),
        FieldSpec::text("info", 300),
        FieldSpec::foreign_key("store_product", "stores").blank().nullable(),
        FieldSpec::many_to_many("category", "categories"),
        FieldSpec::boolean("stock"),
        FieldSpec::datetime("exp_date"),
        FieldSpec::positive_small_integer("product_size"),
        FieldSpec::positive_small_integer("product_weight"),
    ];

    pub fn from_model(model: Model, category: Vec<i32>) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            info: model.info,
            store_product: model.store_product,
            category,
            stock: model.stock,
            exp_date: model.exp_date,
            product_size: model.product_size,
            product_weight: model.product_weight,
        }
    }

    pub fn label(&self) -> String {
        format!("{},{}", self.name, self.info)
    }
}

impl From<ProductSerializer> for ActiveModel {
    fn from(product: ProductSerializer) -> Self {
        Self {
            id: product.id.map_or(NotSet, Set),
            name: Set(product.name),
            info: Set(product.info),
            store_product: Set(product.store_product),
            stock: Set(product.stock),
            exp_date: Set(product.exp_date),
            product_size: Set(product.product_size),
            product_weight: Set(product.product_weight),
        }
    }
}
