use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FieldSpec;
use crate::models::review::{ActiveModel, Model};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewSerializer {
    pub id: Option<i32>,
    pub comments: String,
    pub store_id: Option<i32>,
    pub product_id: Option<i32>,
}

impl ReviewSerializer {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("comments", 400),
        FieldSpec::foreign_key("store_id", "stores").blank().nullable(),
        FieldSpec::foreign_key("product_id", "products").blank().nullable(),
    ];

    pub fn label(&self) -> String {
        format!("Review object ({})", self.id.unwrap_or_default())
    }
}

impl From<Model> for ReviewSerializer {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            comments: model.comments,
            store_id: model.store_id,
            product_id: model.product_id,
        }
    }
}

impl From<ReviewSerializer> for ActiveModel {
    fn from(review: ReviewSerializer) -> Self {
        Self {
            id: review.id.map_or(NotSet, Set),
            comments: Set(review.comments),
            store_id: Set(review.store_id),
            product_id: Set(review.product_id),
        }
    }
}
