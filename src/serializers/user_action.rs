use chrono::{DateTime, Utc};
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FieldSpec;
use crate::models::user_action::{ActiveModel, Model};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserActionSerializer {
    pub id: Option<i32>,
    pub user_id: Option<i32>,
    pub action_type: Option<i32>,
    pub action_rang: Option<i32>,
    pub during: DateTime<Utc>,
    pub ended: bool,
}

impl UserActionSerializer {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::foreign_key("user_id", "customers").blank().nullable(),
        FieldSpec::foreign_key("action_type", "action_types").blank().nullable(),
        FieldSpec::foreign_key("action_rang", "action_rang_types").blank().nullable(),
        FieldSpec::datetime("during"),
        FieldSpec::boolean("ended"),
    ];

    pub fn label(&self) -> String {
        self.id.unwrap_or_default().to_string()
    }
}

impl From<Model> for UserActionSerializer {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            user_id: model.user_id,
            action_type: model.action_type,
            action_rang: model.action_rang,
            during: model.during,
            ended: model.ended,
        }
    }
}

impl From<UserActionSerializer> for ActiveModel {
    fn from(action: UserActionSerializer) -> Self {
        Self {
            id: action.id.map_or(NotSet, Set),
            user_id: Set(action.user_id),
            action_type: Set(action.action_type),
            action_rang: Set(action.action_rang),
            during: Set(action.during),
            ended: Set(action.ended),
        }
    }
}
