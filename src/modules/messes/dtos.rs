use super::entities::enums::ServiceType;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct UpsertProfileRequest {
    pub name: String,
    pub service_type: ServiceType,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePlanRequest {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub duration_days: i32,
}

#[derive(Deserialize)]
pub struct UpsertMenuRequest {
    pub date: NaiveDate,
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
}

#[derive(Deserialize)]
pub struct MenuQuery {
    pub date: NaiveDate,
}
