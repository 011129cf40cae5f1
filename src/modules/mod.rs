pub mod admin;
pub mod coaches;
pub mod courses;
pub mod credit_packages;
pub mod health;
pub mod skills;
pub mod uploads;
pub mod users;
