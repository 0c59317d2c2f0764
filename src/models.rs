pub mod auth;
pub mod dashboard;
pub mod entities;
pub mod policies;
pub mod tenancy;
