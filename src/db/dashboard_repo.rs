// src/db/dashboard_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::dashboard::ExpiringPolicyRow};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Polizze do tenant que vencem na janela [hoje, hoje + 30 giorni],
    /// com o nome da compagnia e do titular, ordenadas pela scadenza.
    pub async fn expiring_policies(
        &self,
        tenant_id: Uuid,
    ) -> Result<Vec<ExpiringPolicyRow>, AppError> {
        let rows = sqlx::query_as::<_, ExpiringPolicyRow>(
            r#"
            SELECT
                p.id, p.tenant_id, p.targa, p.policy_code, p.company_id,
                p.holder_type, p.holder_id, p.data_emissione, p.data_scadenza,
                p.premio, p.pdf_polizza_name,
                c.nome AS company_name,
                CASE
                    WHEN p.holder_type = 'client' THEN cl.nome || ' ' || cl.cognome
                    ELSE b.nome
                END AS holder_name
            FROM policies p
            JOIN companies c ON p.company_id = c.id
            LEFT JOIN clients cl ON p.holder_type = 'client' AND p.holder_id = cl.id
            LEFT JOIN businesses b ON p.holder_type = 'business' AND p.holder_id = b.id
            WHERE p.tenant_id = $1
              AND p.data_scadenza BETWEEN CURRENT_DATE AND CURRENT_DATE + INTERVAL '30 days'
            ORDER BY p.data_scadenza ASC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
