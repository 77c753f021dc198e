use sea_orm::{DeriveActiveEnum, EnumIter, prelude::StringLen};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Deserialize, Serialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ServiceType {
    #[sea_orm(string_value = "VEG")]
    Veg,
    #[sea_orm(string_value = "NON_VEG")]
    NonVeg,
    #[sea_orm(string_value = "BOTH")]
    Both,
}
