// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{entities::HolderType, policies::PolicyStatus};

// Linha crua do JOIN polizze + compagnia + titular
#[derive(Debug, Clone, FromRow)]
pub struct ExpiringPolicyRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub targa: Option<String>,
    pub policy_code: String,
    pub company_id: Uuid,
    pub holder_type: HolderType,
    pub holder_id: Uuid,
    pub data_emissione: Option<NaiveDate>,
    pub data_scadenza: NaiveDate,
    pub premio: Option<Decimal>,
    pub pdf_polizza_name: Option<String>,
    pub company_name: String,
    // NULL se a referência do titular ficou pendente (holder removido)
    pub holder_name: Option<String>,
}

// O que a API devolve: a linha acima mais o status calculado.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExpiringPolicy {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub targa: Option<String>,
    pub policy_code: String,
    pub company_id: Uuid,
    pub holder_type: HolderType,
    pub holder_id: Uuid,
    pub data_emissione: Option<NaiveDate>,
    pub data_scadenza: NaiveDate,
    pub premio: Option<Decimal>,
    pub pdf_polizza_name: Option<String>,
    pub company_name: String,
    pub holder_name: Option<String>,
    pub status: PolicyStatus,
}

impl ExpiringPolicy {
    pub fn from_row(row: ExpiringPolicyRow, status: PolicyStatus) -> Self {
        Self {
            id: row.id,
            tenant_id: row.tenant_id,
            targa: row.targa,
            policy_code: row.policy_code,
            company_id: row.company_id,
            holder_type: row.holder_type,
            holder_id: row.holder_id,
            data_emissione: row.data_emissione,
            data_scadenza: row.data_scadenza,
            premio: row.premio,
            pdf_polizza_name: row.pdf_polizza_name,
            company_name: row.company_name,
            holder_name: row.holder_name,
            status,
        }
    }
}
