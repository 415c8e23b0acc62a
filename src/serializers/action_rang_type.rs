use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FieldSpec;
use crate::models::action_rang_type::{ActiveModel, Model};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActionRangTypeSerializer {
    pub id: Option<i32>,
    pub rang_name: i32,
}

impl ActionRangTypeSerializer {
    pub const FIELDS: &'static [FieldSpec] =
        &[FieldSpec::positive_small_integer("rang_name")];

    pub fn label(&self) -> String {
        self.rang_name.to_string()
    }
}

impl From<Model> for ActionRangTypeSerializer {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            rang_name: model.rang_name,
        }
    }
}

impl From<ActionRangTypeSerializer> for ActiveModel {
    fn from(rang: ActionRangTypeSerializer) -> Self {
        Self {
            id: rang.id.map_or(NotSet, Set),
            rang_name: Set(rang.rang_name),
        }
    }
}
