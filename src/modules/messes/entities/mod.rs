pub mod enums;
pub mod menu;
pub mod mess;
pub mod plan;
