use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "mess_plans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub mess_id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: i64,
    pub duration_days: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mess::Entity",
        from = "Column::MessId",
        to = "super::mess::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Mess,
}

impl Related<super::mess::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mess.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
