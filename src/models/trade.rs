use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product: Option<i32>,
    pub amount: Option<i32>,
    pub price: f64,
    pub user_id: Option<i32>,
    pub location: String,
    pub packaging: Option<i32>,
    /// Set once, when the trade is recorded
    pub date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::Product",
        to = "super::product::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::UserId",
        to = "super::customer::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::package::Entity",
        from = "Column::Packaging",
        to = "super::package::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Package,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Package.def()
    }
}

impl Related<super::discount::Entity> for Entity {
    fn to() -> RelationDef {
        super::trade_discounts::Relation::Discount.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::trade_discounts::Relation::Trade.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
