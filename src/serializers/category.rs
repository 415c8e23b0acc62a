use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FieldSpec;
use crate::models::category::{ActiveModel, Model};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategorySerializer {
    pub id: Option<i32>,
    #[serde(default)]
    pub category: String,
}

impl CategorySerializer {
    pub const FIELDS: &'static [FieldSpec] = &[FieldSpec::char("category", 50).blank()];

    pub fn label(&self) -> String {
        self.category.clone()
    }
}

impl From<Model> for CategorySerializer {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            category: model.category,
        }
    }
}

impl From<CategorySerializer> for ActiveModel {
    fn from(category: CategorySerializer) -> Self {
        Self {
            id: category.id.map_or(NotSet, Set),
            category: Set(category.category),
        }
    }
}
