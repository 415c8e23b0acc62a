use chrono::NaiveTime;
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FieldSpec;
use crate::models::store::{ActiveModel, Model};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StoreSerializer {
    pub id: Option<i32>,
    pub store_name: String,
    pub store_phone: String,
    pub store_address: String,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
}

impl StoreSerializer {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::char("store_name", 80),
        FieldSpec::char("store_phone", 13),
        FieldSpec::char("store_address", 150),
        FieldSpec::time("open_time").blank().nullable(),
        FieldSpec::time("close_time").blank().nullable(),
    ];

    pub fn label(&self) -> String {
        self.store_name.clone()
    }
}

impl From<Model> for StoreSerializer {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            store_name: model.store_name,
            store_phone: model.store_phone,
            store_address: model.store_address,
            open_time: model.open_time,
            close_time: model.close_time,
        }
    }
}

impl From<StoreSerializer> for ActiveModel {
    fn from(store: StoreSerializer) -> Self {
        Self {
            id: store.id.map_or(NotSet, Set),
            store_name: Set(store.store_name),
            store_phone: Set(store.store_phone),
            store_address: Set(store.store_address),
            open_time: Set(store.open_time),
            close_time: Set(store.close_time),
        }
    }
}
