use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_actions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Option<i32>,
    pub action_type: Option<i32>,
    pub action_rang: Option<i32>,
    pub during: DateTimeUtc,
    pub ended: bool,
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
        belongs_to = "super::action_type::Entity",
        from = "Column::ActionType",
        to = "super::action_type::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ActionType,
    #[sea_orm(
        belongs_to = "super::action_rang_type::Entity",
        from = "Column::ActionRang",
        to = "super::action_rang_type::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ActionRangType,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::action_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActionType.def()
    }
}

impl Related<super::action_rang_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActionRangType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
