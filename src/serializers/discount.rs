use chrono::{DateTime, Utc};
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FieldSpec;
use crate::models::discount::{ActiveModel, Model};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiscountSerializer {
    pub id: Option<i32>,
    pub products_id: Option<i32>,
    pub store_id: Option<i32>,
    pub discount_start_time: Option<DateTime<Utc>>,
    pub discount_end_time: Option<DateTime<Utc>>,
    pub discount_type: String,
    pub discount_review: String,
}

impl DiscountSerializer {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::foreign_key("products_id", "products").blank().nullable(),
        FieldSpec::foreign_key("store_id", "stores").blank().nullable(),
        FieldSpec::datetime("discount_start_time").blank().nullable(),
        FieldSpec::datetime("discount_end_time").blank().nullable(),
        FieldSpec::char("discount_type", 200),
        FieldSpec::text("discount_review", 1000),
    ];

    /// Product label directly followed by the store label; a missing side reads `None`
    pub fn label(product: Option<&str>, store: Option<&str>) -> String {
        format!("{}{}", product.unwrap_or("None"), store.unwrap_or("None"))
    }
}

impl From<Model> for DiscountSerializer {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            products_id: model.products_id,
            store_id: model.store_id,
            discount_start_time: model.discount_start_time,
            discount_end_time: model.discount_end_time,
            discount_type: model.discount_type,
            discount_review: model.discount_review,
        }
    }
}

impl From<DiscountSerializer> for ActiveModel {
    fn from(discount: DiscountSerializer) -> Self {
        Self {
            id: discount.id.map_or(NotSet, Set),
            products_id: Set(discount.products_id),
            store_id: Set(discount.store_id),
            discount_start_time: Set(discount.discount_start_time),
            discount_end_time: Set(discount.discount_end_time),
            discount_type: Set(discount.discount_type),
            discount_review: Set(discount.discount_review),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DiscountSerializer;

    #[test]
    fn label_concatenates_product_and_store() {
        assert_eq!(
            DiscountSerializer::label(Some("Kenya AA,Bright"), Some("Harbour Kiosk")),
            "Kenya AA,BrightHarbour Kiosk"
        );
        assert_eq!(DiscountSerializer::label(None, Some("Harbour Kiosk")), "NoneHarbour Kiosk");
        assert_eq!(DiscountSerializer::label(None, None), "NoneNone");
    }
}
