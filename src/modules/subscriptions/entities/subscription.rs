use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::SubscriptionStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_serializing)]
    pub id: i32,
    #[sea_orm(unique, index)]
    pub uuid: String,
    #[serde(skip_serializing)]
    pub consumer_id: i32,
    pub mess_id: i32,
    pub plan_name: String,
    #[sea_orm(column_type = "Text")]
    pub plan_description: String,
    pub price: i64,
    pub duration_days: i32,
    pub starts_at: DateTime,
    pub ends_at: DateTime,
    pub status: SubscriptionStatus,
    pub payment_order_ref: Option<String>,
    #[serde(skip_deserializing)]
    pub created_at: DateTime,
    #[serde(skip_deserializing)]
    pub updated_at: DateTime,
}

impl Model {
    /// Derived usability: ACTIVE and not past its end date. The stored
    /// status alone is not enough, since no background job flips
    /// ACTIVE to EXPIRED.
    pub fn is_currently_usable(&self, now: DateTime) -> bool {
        self.status == SubscriptionStatus::Active && self.ends_at > now
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::modules::users::entities::user::Entity",
        from = "Column::ConsumerId",
        to = "crate::modules::users::entities::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Consumer,
    #[sea_orm(
        belongs_to = "crate::modules::messes::entities::mess::Entity",
        from = "Column::MessId",
        to = "crate::modules::messes::entities::mess::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Mess,
}

impl Related<crate::modules::users::entities::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Consumer.def()
    }
}

impl Related<crate::modules::messes::entities::mess::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mess.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
