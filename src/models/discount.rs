use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "discounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub products_id: Option<i32>,
    pub store_id: Option<i32>,
    pub discount_start_time: Option<DateTimeUtc>,
    pub discount_end_time: Option<DateTimeUtc>,
    pub discount_type: String,
    pub discount_review: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductsId",
        to = "super::product::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::store::Entity",
        from = "Column::StoreId",
        to = "super::store::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Store,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl Related<super::trade::Entity> for Entity {
    fn to() -> RelationDef {
        super::trade_discounts::Relation::Trade.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::trade_discounts::Relation::Discount.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
