use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FieldSpec;
use crate::models::ratings::{ActiveModel, Model};

const RATING_MIN: i64 = 0;
const RATING_MAX: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RatingsSerializer {
    pub id: Option<i32>,
    pub product_id: Option<i32>,
    pub product_rating: Option<i32>,
    pub store_rating: Option<i32>,
    pub delivery_rating: Option<i32>,
    pub package_rating: Option<i32>,
}

impl RatingsSerializer {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::foreign_key("product_id", "products").blank().nullable(),
        FieldSpec::bounded_integer("product_rating", RATING_MIN, RATING_MAX).blank().nullable(),
        FieldSpec::bounded_integer("store_rating", RATING_MIN, RATING_MAX).blank().nullable(),
        FieldSpec::bounded_integer("delivery_rating", RATING_MIN, RATING_MAX).blank().nullable(),
        FieldSpec::bounded_integer("package_rating", RATING_MIN, RATING_MAX).blank().nullable(),
    ];

    pub fn label(&self) -> String {
        let show = |r: Option<i32>| r.map_or_else(|| "None".to_string(), |r| r.to_string());
        format!("{} {}", show(self.product_rating), show(self.store_rating))
    }
}

impl From<Model> for RatingsSerializer {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            product_id: model.product_id,
            product_rating: model.product_rating,
            store_rating: model.store_rating,
            delivery_rating: model.delivery_rating,
            package_rating: model.package_rating,
        }
    }
}

impl From<RatingsSerializer> for ActiveModel {
    fn from(ratings: RatingsSerializer) -> Self {
        Self {
            id: ratings.id.map_or(NotSet, Set),
            product_id: Set(ratings.product_id),
            product_rating: Set(ratings.product_rating),
            store_rating: Set(ratings.store_rating),
            delivery_rating: Set(ratings.delivery_rating),
            package_rating: Set(ratings.package_rating),
        }
    }
}
