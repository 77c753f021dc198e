use super::entities::{menu, mess, plan};
use crate::shared::error::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;

pub struct MenuUpsert {
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
}

#[async_trait]
pub trait MessRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<mess::Model>>;
    async fn find_by_owner(&self, owner_id: i32) -> AppResult<Option<mess::Model>>;
    async fn insert(&self, mess: mess::ActiveModel) -> AppResult<mess::Model>;
    async fn update(&self, mess: mess::ActiveModel) -> AppResult<mess::Model>;

    async fn insert_plan(&self, plan: plan::ActiveModel) -> AppResult<plan::Model>;
    async fn find_plan(&self, mess_id: i32, plan_id: i32) -> AppResult<Option<plan::Model>>;
    async fn list_plans(&self, mess_id: i32) -> AppResult<Vec<plan::Model>>;

    /// One menu row per (mess, date); writing again replaces the meals.
    async fn upsert_menu(
        &self,
        mess_id: i32,
        date: NaiveDate,
        meals: MenuUpsert,
    ) -> AppResult<menu::Model>;
    async fn find_menu(&self, mess_id: i32, date: NaiveDate) -> AppResult<Option<menu::Model>>;
}
