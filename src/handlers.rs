pub mod auth;
pub mod dashboard;
pub mod entities;
pub mod tenancy;
pub mod uploads;
