use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FieldSpec;
use crate::models::delivery_type::{ActiveModel, Model};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeliveryTypeSerializer {
    pub id: Option<i32>,
    pub r#type: String,
}

impl DeliveryTypeSerializer {
    pub const FIELDS: &'static [FieldSpec] = &[FieldSpec::char("type", 150)];

    pub fn label(&self) -> String {
        format!("DeliveryType object ({})", self.id.unwrap_or_default())
    }
}

impl From<Model> for DeliveryTypeSerializer {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            r#type: model.r#type,
        }
    }
}

impl From<DeliveryTypeSerializer> for ActiveModel {
    fn from(delivery_type: DeliveryTypeSerializer) -> Self {
        Self {
            id: delivery_type.id.map_or(NotSet, Set),
            r#type: Set(delivery_type.r#type),
        }
    }
}
