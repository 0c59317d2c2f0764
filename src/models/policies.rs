// src/models/policies.rs

use chrono::{Local, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

/// Janela de antecipação usada para marcar polizze a renovar.
pub const EXPIRY_WARNING_DAYS: i64 = 30;

// Estado de uma polizza em função da data de scadenza.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Active,
    Warning,
    Expired,
}

/// Classifica a polizza: scaduta se já passou, em scadenza se vence em até
/// 30 dias (inclusive), ativa caso contrário.
pub fn classify_policy_status(data_scadenza: NaiveDate, today: NaiveDate) -> PolicyStatus {
    let days_left = (data_scadenza - today).num_days();
    if days_left < 0 {
        PolicyStatus::Expired
    } else if days_left <= EXPIRY_WARNING_DAYS {
        PolicyStatus::Warning
    } else {
        PolicyStatus::Active
    }
}

pub fn policy_status_today(data_scadenza: NaiveDate) -> PolicyStatus {
    classify_policy_status(data_scadenza, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    #[test]
    fn yesterday_is_expired() {
        let status = classify_policy_status(today() - Duration::days(1), today());
        assert_eq!(status, PolicyStatus::Expired);
    }

    #[test]
    fn today_is_warning() {
        assert_eq!(classify_policy_status(today(), today()), PolicyStatus::Warning);
    }

    #[test]
    fn thirty_days_out_is_still_warning() {
        let status = classify_policy_status(today() + Duration::days(30), today());
        assert_eq!(status, PolicyStatus::Warning);
    }

    #[test]
    fn thirty_one_days_out_is_active() {
        let status = classify_policy_status(today() + Duration::days(31), today());
        assert_eq!(status, PolicyStatus::Active);
    }
}
