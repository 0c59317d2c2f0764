// src/services/dashboard_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::{dashboard::ExpiringPolicy, policies::policy_status_today},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    /// Polizze em scadenza nos próximos 30 dias, com o status já calculado
    /// para o badge do frontend.
    pub async fn expiring_policies(
        &self,
        tenant_id: Uuid,
    ) -> Result<Vec<ExpiringPolicy>, AppError> {
        let rows = self.repo.expiring_policies(tenant_id).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let status = policy_status_today(row.data_scadenza);
                ExpiringPolicy::from_row(row, status)
            })
            .collect())
    }
}
