pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod entity_repo;
pub use entity_repo::EntityRepository;
pub mod tenancy_repo;
pub use tenancy_repo::TenantRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
