use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trade_discounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub trade_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub discount_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trade::Entity",
        from = "Column::TradeId",
        to = "super::trade::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Trade,
    #[sea_orm(
        belongs_to = "super::discount::Entity",
        from = "Column::DiscountId",
        to = "super::discount::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Discount,
}

impl ActiveModelBehavior for ActiveModel {}
