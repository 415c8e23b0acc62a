use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[serde(default)]
    pub category: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_categories::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_categories::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
