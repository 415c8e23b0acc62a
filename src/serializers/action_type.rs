use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FieldSpec;
use crate::models::action_type::{ActiveModel, Model};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActionTypeSerializer {
    pub id: Option<i32>,
    pub r#type: String,
    pub rang: i32,
}

impl ActionTypeSerializer {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::char("type", 150),
        FieldSpec::positive_small_integer("rang"),
    ];

    pub fn label(&self) -> String {
        self.r#type.clone()
    }
}

impl From<Model> for ActionTypeSerializer {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            r#type: model.r#type,
            rang: model.rang,
        }
    }
}

impl From<ActionTypeSerializer> for ActiveModel {
    fn from(action_type: ActionTypeSerializer) -> Self {
        Self {
            id: action_type.id.map_or(NotSet, Set),
            r#type: Set(action_type.r#type),
            rang: Set(action_type.rang),
        }
    }
}
