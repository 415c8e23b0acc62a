use chrono::NaiveDate;
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FieldSpec;
use crate::models::customer::{ActiveModel, Model};
use crate::models::Gender;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerSerializer {
    pub id: Option<i32>,
    pub username: Option<String>,
    pub name: String,
    pub lastname: String,
    pub date_birth: NaiveDate,
    pub email: String,
    pub gender: Gender,
}

impl CustomerSerializer {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::char("username", 70).blank().nullable(),
        FieldSpec::char("name", 100),
        FieldSpec::char("lastname", 70),
        FieldSpec::date("date_birth"),
        FieldSpec::email("email").unique(),
        FieldSpec::choice("gender", 10, &["male", "female"]),
    ];

    /// Username, or the full name for customers registered without one
    pub fn label(&self) -> String {
        match self.username.as_deref() {
            Some(username) if !username.is_empty() => username.to_string(),
            _ => format!("{} {}", self.name, self.lastname),
        }
    }
}

impl From<Model> for CustomerSerializer {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            username: model.username,
            name: model.name,
            lastname: model.lastname,
            date_birth: model.date_birth,
            email: model.email,
            gender: model.gender,
        }
    }
}

impl From<CustomerSerializer> for ActiveModel {
    fn from(customer: CustomerSerializer) -> Self {
        Self {
            id: customer.id.map_or(NotSet, Set),
            username: Set(customer.username),
            name: Set(customer.name),
            lastname: Set(customer.lastname),
            date_birth: Set(customer.date_birth),
            email: Set(customer.email),
            gender: Set(customer.gender),
        }
    }
}
