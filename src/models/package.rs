use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "packages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub package_type: String,
    pub package_price: Option<i32>,
    pub package_desc: String,
    pub package_volume: Option<i32>,
    pub package_average_weight: String,
    /// Stored image path, relative to the media root
    pub image: Option<String>,
    pub package_images: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
