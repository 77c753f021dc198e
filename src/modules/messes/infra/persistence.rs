use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::modules::messes::entities::{menu, mess, plan};
use crate::modules::messes::repository::{MenuUpsert, MessRepository};
use crate::shared::error::{AppError, AppResult};

// =========================================================================
// Postgres Implementation
// =========================================================================

pub struct SeaOrmMessRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmMessRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MessRepository for SeaOrmMessRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<mess::Model>> {
        mess::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn find_by_owner(&self, owner_id: i32) -> AppResult<Option<mess::Model>> {
        mess::Entity::find()
            .filter(mess::Column::OwnerId.eq(owner_id))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn insert(&self, mess: mess::ActiveModel) -> AppResult<mess::Model> {
        mess.insert(self.db.as_ref()).await.map_err(AppError::DbError)
    }

    async fn update(&self, mess: mess::ActiveModel) -> AppResult<mess::Model> {
        mess.update(self.db.as_ref()).await.map_err(AppError::DbError)
    }

    async fn insert_plan(&self, plan: plan::ActiveModel) -> AppResult<plan::Model> {
        plan.insert(self.db.as_ref()).await.map_err(AppError::DbError)
    }

    async fn find_plan(&self, mess_id: i32, plan_id: i32) -> AppResult<Option<plan::Model>> {
        plan::Entity::find_by_id(plan_id)
            .filter(plan::Column::MessId.eq(mess_id))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn list_plans(&self, mess_id: i32) -> AppResult<Vec<plan::Model>> {
        plan::Entity::find()
            .filter(plan::Column::MessId.eq(mess_id))
            .all(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn upsert_menu(
        &self,
        mess_id: i32,
        date: NaiveDate,
        meals: MenuUpsert,
    ) -> AppResult<menu::Model> {
        let existing = menu::Entity::find()
            .filter(menu::Column::MessId.eq(mess_id))
            .filter(menu::Column::MenuDate.eq(date))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)?;

        match existing {
            Some(row) => {
                let mut am: menu::ActiveModel = row.into();
                am.breakfast = Set(meals.breakfast);
                am.lunch = Set(meals.lunch);
                am.dinner = Set(meals.dinner);
                am.update(self.db.as_ref()).await.map_err(AppError::DbError)
            }
            None => {
                let am = menu::ActiveModel {
                    mess_id: Set(mess_id),
                    menu_date: Set(date),
                    breakfast: Set(meals.breakfast),
                    lunch: Set(meals.lunch),
                    dinner: Set(meals.dinner),
                    ..Default::default()
                };
                am.insert(self.db.as_ref()).await.map_err(AppError::DbError)
            }
        }
    }

    async fn find_menu(&self, mess_id: i32, date: NaiveDate) -> AppResult<Option<menu::Model>> {
        menu::Entity::find()
            .filter(menu::Column::MessId.eq(mess_id))
            .filter(menu::Column::MenuDate.eq(date))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }
}

// =========================================================================
// InMemory Implementation
// =========================================================================

#[derive(Clone, Default)]
pub struct InMemoryMessRepository {
    messes: Arc<Mutex<HashMap<i32, mess::Model>>>,
    plans: Arc<Mutex<Vec<plan::Model>>>,
    menus: Arc<Mutex<Vec<menu::Model>>>,
    counter: Arc<Mutex<i32>>,
}

impl InMemoryMessRepository {
    fn next_id(&self) -> i32 {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        *counter
    }
}

#[async_trait]
impl MessRepository for InMemoryMessRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<mess::Model>> {
        Ok(self.messes.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: i32) -> AppResult<Option<mess::Model>> {
        Ok(self
            .messes
            .lock()
            .unwrap()
            .values()
            .find(|m| m.owner_id == owner_id)
            .cloned())
    }

    async fn insert(&self, mess: mess::ActiveModel) -> AppResult<mess::Model> {
        let model = mess::Model {
            id: self.next_id(),
            owner_id: mess.owner_id.unwrap(),
            name: mess.name.unwrap(),
            service_type: mess.service_type.unwrap(),
            address: mess.address.unwrap(),
            latitude: mess.latitude.unwrap(),
            longitude: mess.longitude.unwrap(),
            image_url: mess.image_url.unwrap(),
            created_at: mess.created_at.unwrap(),
            updated_at: mess.updated_at.unwrap(),
        };
        self.messes.lock().unwrap().insert(model.id, model.clone());
        Ok(model)
    }

    async fn update(&self, mess: mess::ActiveModel) -> AppResult<mess::Model> {
        let id = mess.id.clone().unwrap();
        let mut messes = self.messes.lock().unwrap();
        let existing = messes
            .get_mut(&id)
            .ok_or(AppError::NotFound("Mess not found".to_string()))?;

        if let ActiveValue::Set(v) = mess.name {
            existing.name = v;
        }
        if let ActiveValue::Set(v) = mess.service_type {
            existing.service_type = v;
        }
        if let ActiveValue::Set(v) = mess.address {
            existing.address = v;
        }
        if let ActiveValue::Set(v) = mess.latitude {
            existing.latitude = v;
        }
        if let ActiveValue::Set(v) = mess.longitude {
            existing.longitude = v;
        }
        if let ActiveValue::Set(v) = mess.image_url {
            existing.image_url = v;
        }
        if let ActiveValue::Set(v) = mess.updated_at {
            existing.updated_at = v;
        }
        Ok(existing.clone())
    }

    async fn insert_plan(&self, plan: plan::ActiveModel) -> AppResult<plan::Model> {
        let model = plan::Model {
            id: self.next_id(),
            mess_id: plan.mess_id.unwrap(),
            name: plan.name.unwrap(),
            description: plan.description.unwrap(),
            price: plan.price.unwrap(),
            duration_days: plan.duration_days.unwrap(),
        };
        self.plans.lock().unwrap().push(model.clone());
        Ok(model)
    }

    async fn find_plan(&self, mess_id: i32, plan_id: i32) -> AppResult<Option<plan::Model>> {
        Ok(self
            .plans
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == plan_id && p.mess_id == mess_id)
            .cloned())
    }

    async fn list_plans(&self, mess_id: i32) -> AppResult<Vec<plan::Model>> {
        Ok(self
            .plans
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.mess_id == mess_id)
            .cloned()
            .collect())
    }

    async fn upsert_menu(
        &self,
        mess_id: i32,
        date: NaiveDate,
        meals: MenuUpsert,
    ) -> AppResult<menu::Model> {
        let mut menus = self.menus.lock().unwrap();
        if let Some(existing) = menus
            .iter_mut()
            .find(|m| m.mess_id == mess_id && m.menu_date == date)
        {
            existing.breakfast = meals.breakfast;
            existing.lunch = meals.lunch;
            existing.dinner = meals.dinner;
            return Ok(existing.clone());
        }

        drop(menus);
        let model = menu::Model {
            id: self.next_id(),
            mess_id,
            menu_date: date,
            breakfast: meals.breakfast,
            lunch: meals.lunch,
            dinner: meals.dinner,
        };
        self.menus.lock().unwrap().push(model.clone());
        Ok(model)
    }

    async fn find_menu(&self, mess_id: i32, date: NaiveDate) -> AppResult<Option<menu::Model>> {
        Ok(self
            .menus
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.mess_id == mess_id && m.menu_date == date)
            .cloned())
    }
}
