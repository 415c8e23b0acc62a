use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deliveries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub trade_id: Option<i32>,
    pub store_id: Option<i32>,
    pub delivery_type: Option<i32>,
    pub delivery_price: Option<i32>,
    pub date: Date,
    pub during: DateTimeUtc,
    /// Ratings row left for this delivery
    pub delivery_status: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::UserId",
        to = "super::customer::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::trade::Entity",
        from = "Column::TradeId",
        to = "super::trade::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Trade,
    #[sea_orm(
        belongs_to = "super::store::Entity",
        from = "Column::StoreId",
        to = "super::store::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Store,
    #[sea_orm(
        belongs_to = "super::delivery_type::Entity",
        from = "Column::DeliveryType",
        to = "super::delivery_type::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    DeliveryType,
    #[sea_orm(
        belongs_to = "super::ratings::Entity",
        from = "Column::DeliveryStatus",
        to = "super::ratings::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Ratings,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::trade::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trade.def()
    }
}

impl Related<super::store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl Related<super::delivery_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeliveryType.def()
    }
}

impl Related<super::ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        super::delivery_products::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::delivery_products::Relation::Delivery.def().rev())
    }
}

impl Related<super::package::Entity> for Entity {
    fn to() -> RelationDef {
        super::delivery_packages::Relation::Package.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::delivery_packages::Relation::Delivery.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
