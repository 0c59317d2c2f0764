// src/common/dates.rs

use chrono::NaiveDate;

use crate::common::error::AppError;

// O frontend envia datas como "2026-01-22T23:00:00" (ISO com horário local).
// Guardamos apenas a parte YYYY-MM-DD, descartando hora e timezone, para
// evitar o clássico bug de "um dia a menos" na exibição.
pub fn truncate_iso_date(input: &str) -> &str {
    match input.find('T') {
        Some(idx) => &input[..idx],
        None => input,
    }
}

/// Converte a entrada do cliente em `NaiveDate`, truncando o horário se houver.
pub fn parse_date_input(field: &str, input: &str) -> Result<NaiveDate, AppError> {
    let date_part = truncate_iso_date(input);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| {
        AppError::InvalidPayload(format!("Data non valida per il campo '{}'", field))
    })
}

/// Formata uma data do banco para a API, sempre como YYYY-MM-DD.
pub fn format_date_output(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_iso_datetime_to_date() {
        assert_eq!(truncate_iso_date("2026-01-22T23:00:00"), "2026-01-22");
    }

    #[test]
    fn plain_date_passes_through() {
        assert_eq!(truncate_iso_date("2026-01-22"), "2026-01-22");
    }

    #[test]
    fn date_round_trips_through_parse_and_format() {
        let parsed = parse_date_input("data_scadenza", "2026-01-22T23:00:00").unwrap();
        assert_eq!(format_date_output(parsed), "2026-01-22");
    }

    #[test]
    fn garbage_input_is_rejected() {
        assert!(parse_date_input("birth_date", "22/01/2026").is_err());
        assert!(parse_date_input("birth_date", "non-una-data").is_err());
    }
}
