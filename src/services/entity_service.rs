// src/services/entity_service.rs
//
// A lógica de negócio do CRUD genérico: normalização do payload (datas
// truncadas, tenant_id sempre da sessão), validação das referências das
// polizze e a guarda de integridade na exclusão.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    common::{
        dates::{format_date_output, parse_date_input},
        error::AppError,
    },
    db::EntityRepository,
    models::entities::{
        BoundValue, ColumnKind, ColumnValue, EntityKind, Holder, HolderType,
    },
};

#[derive(Clone)]
pub struct EntityService {
    repo: EntityRepository,
}

impl EntityService {
    pub fn new(repo: EntityRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, kind: EntityKind, tenant_id: Uuid) -> Result<Vec<Value>, AppError> {
        self.repo.list(kind, tenant_id).await
    }

    pub async fn get(
        &self,
        kind: EntityKind,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Value, AppError> {
        self.repo.get(kind, tenant_id, id).await
    }

    pub async fn create(
        &self,
        kind: EntityKind,
        tenant_id: Uuid,
        payload: &Map<String, Value>,
    ) -> Result<Value, AppError> {
        let normalized = normalize_payload(kind, payload)?;

        if kind == EntityKind::Policies {
            self.validate_policy_refs(tenant_id, &normalized.values).await?;
        }

        let id = self.repo.create(kind, tenant_id, &normalized.values).await?;

        let mut body = normalized.echo;
        body.insert("id".to_string(), Value::String(id.to_string()));
        body.insert("tenant_id".to_string(), Value::String(tenant_id.to_string()));
        Ok(Value::Object(body))
    }

    pub async fn update(
        &self,
        kind: EntityKind,
        tenant_id: Uuid,
        id: Uuid,
        payload: &Map<String, Value>,
    ) -> Result<Value, AppError> {
        let normalized = normalize_payload(kind, payload)?;

        if kind == EntityKind::Policies {
            self.validate_policy_refs(tenant_id, &normalized.values).await?;
        }

        self.repo.update(kind, tenant_id, id, &normalized.values).await?;

        let mut body = normalized.echo;
        body.insert("id".to_string(), Value::String(id.to_string()));
        Ok(Value::Object(body))
    }

    /// Exclui respeitando a integridade referencial: clienti e aziende com
    /// polizze, e compagnie referenciadas, não podem ser removidos.
    pub async fn delete(
        &self,
        kind: EntityKind,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<(), AppError> {
        match kind {
            EntityKind::Clients => {
                if self
                    .repo
                    .policies_reference_holder(tenant_id, Holder::Client(id))
                    .await?
                {
                    return Err(AppError::RecordInUse(
                        "Impossibile eliminare: ha polizze attive".to_string(),
                    ));
                }
            }
            EntityKind::Businesses => {
                if self
                    .repo
                    .policies_reference_holder(tenant_id, Holder::Business(id))
                    .await?
                {
                    return Err(AppError::RecordInUse(
                        "Impossibile eliminare: ha polizze attive".to_string(),
                    ));
                }
            }
            EntityKind::Companies => {
                if self.repo.policies_reference_company(tenant_id, id).await? {
                    return Err(AppError::RecordInUse(
                        "Impossibile eliminare: ha polizze associate".to_string(),
                    ));
                }
            }
            EntityKind::Policies => {}
        }

        self.repo.delete(kind, tenant_id, id).await
    }

    /// Uma polizza só pode apontar para titular e compagnia do próprio
    /// tenant. Não há FK para o titular, então o lookup é feito aqui,
    /// um por tipo.
    async fn validate_policy_refs(
        &self,
        tenant_id: Uuid,
        values: &[ColumnValue],
    ) -> Result<(), AppError> {
        let holder_type = find_text(values, "holder_type")
            .map(|s| HolderType::from_str(&s))
            .transpose()
            .map_err(|_| AppError::InvalidPayload("holder_type non valido".to_string()))?;
        let holder_id = find_uuid(values, "holder_id");

        match (holder_type, holder_id) {
            (Some(holder_type), Some(holder_id)) => {
                let holder = Holder::new(holder_type, holder_id);
                if !self.repo.holder_exists(tenant_id, holder).await? {
                    return Err(AppError::InvalidPayload(
                        "Titolare non trovato per questo tenant".to_string(),
                    ));
                }
            }
            (None, None) => {}
            _ => {
                return Err(AppError::InvalidPayload(
                    "holder_type e holder_id vanno indicati insieme".to_string(),
                ));
            }
        }

        if let Some(company_id) = find_uuid(values, "company_id") {
            if !self.repo.company_exists(tenant_id, company_id).await? {
                return Err(AppError::InvalidPayload(
                    "Compagnia non trovata per questo tenant".to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn find_text(values: &[ColumnValue], name: &str) -> Option<String> {
    values.iter().find(|cv| cv.name == name).and_then(|cv| match &cv.value {
        BoundValue::Text(v) => v.clone(),
        _ => None,
    })
}

fn find_uuid(values: &[ColumnValue], name: &str) -> Option<Uuid> {
    values.iter().find(|cv| cv.name == name).and_then(|cv| match &cv.value {
        BoundValue::Uuid(v) => *v,
        _ => None,
    })
}

pub(crate) struct NormalizedPayload {
    pub values: Vec<ColumnValue>,
    /// O payload normalizado como será ecoado na resposta
    pub echo: Map<String, Value>,
}

/// Converte o JSON do cliente em valores tipados prontos para bind.
/// `id` e `tenant_id` são descartados em silêncio (o primeiro é gerado pelo
/// banco, o segundo vem sempre da sessão); colunas fora da whitelist são
/// rejeitadas.
pub(crate) fn normalize_payload(
    kind: EntityKind,
    payload: &Map<String, Value>,
) -> Result<NormalizedPayload, AppError> {
    let mut values = Vec::with_capacity(payload.len());
    let mut echo = Map::new();

    for (key, raw) in payload {
        if key == "id" || key == "tenant_id" {
            continue;
        }

        let col = kind.column(key).ok_or_else(|| {
            AppError::InvalidPayload(format!(
                "Colonna '{}' non valida per la tabella '{}'",
                key,
                kind.table_name()
            ))
        })?;

        let (bound, echoed) = normalize_value(col.name, col.kind, raw)?;
        values.push(ColumnValue {
            name: col.name,
            value: bound,
        });
        echo.insert(col.name.to_string(), echoed);
    }

    Ok(NormalizedPayload { values, echo })
}

fn normalize_value(
    name: &'static str,
    kind: ColumnKind,
    raw: &Value,
) -> Result<(BoundValue, Value), AppError> {
    let invalid =
        || AppError::InvalidPayload(format!("Valore non valido per il campo '{}'", name));

    match kind {
        ColumnKind::Text => match raw {
            Value::Null => Ok((BoundValue::Text(None), Value::Null)),
            Value::String(s) => Ok((
                BoundValue::Text(Some(s.clone())),
                Value::String(s.clone()),
            )),
            _ => Err(invalid()),
        },
        ColumnKind::Date => match raw {
            Value::Null => Ok((BoundValue::Date(None), Value::Null)),
            Value::String(s) => {
                let date = parse_date_input(name, s)?;
                Ok((
                    BoundValue::Date(Some(date)),
                    Value::String(format_date_output(date)),
                ))
            }
            _ => Err(invalid()),
        },
        ColumnKind::Uuid => match raw {
            Value::Null => Ok((BoundValue::Uuid(None), Value::Null)),
            Value::String(s) => {
                let id = Uuid::parse_str(s).map_err(|_| invalid())?;
                Ok((BoundValue::Uuid(Some(id)), Value::String(id.to_string())))
            }
            _ => Err(invalid()),
        },
        ColumnKind::Decimal => match raw {
            Value::Null => Ok((BoundValue::Decimal(None), Value::Null)),
            Value::String(s) => {
                let dec = Decimal::from_str(s).map_err(|_| invalid())?;
                Ok((BoundValue::Decimal(Some(dec)), decimal_echo(dec)))
            }
            Value::Number(n) => {
                let dec = Decimal::from_str(&n.to_string()).map_err(|_| invalid())?;
                Ok((BoundValue::Decimal(Some(dec)), decimal_echo(dec)))
            }
            _ => Err(invalid()),
        },
        ColumnKind::HolderType => match raw {
            Value::String(s) => {
                let holder_type = HolderType::from_str(s).map_err(|_| {
                    AppError::InvalidPayload("holder_type non valido".to_string())
                })?;
                Ok((
                    BoundValue::Text(Some(holder_type.as_str().to_string())),
                    Value::String(holder_type.as_str().to_string()),
                ))
            }
            _ => Err(AppError::InvalidPayload(
                "holder_type non valido".to_string(),
            )),
        },
    }
}

fn decimal_echo(value: Decimal) -> Value {
    match value.to_string().parse::<serde_json::Number>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::String(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("esperado um objeto"),
        }
    }

    #[test]
    fn client_supplied_tenant_id_is_discarded() {
        let payload = as_map(json!({
            "nome": "Mario",
            "tenant_id": "11111111-1111-1111-1111-111111111111",
            "id": "22222222-2222-2222-2222-222222222222"
        }));

        let normalized = normalize_payload(EntityKind::Clients, &payload).unwrap();
        assert_eq!(normalized.values.len(), 1);
        assert_eq!(normalized.values[0].name, "nome");
        assert!(!normalized.echo.contains_key("tenant_id"));
        assert!(!normalized.echo.contains_key("id"));
    }

    #[test]
    fn dates_are_truncated_to_day() {
        let payload = as_map(json!({ "birth_date": "2026-01-22T23:00:00" }));

        let normalized = normalize_payload(EntityKind::Clients, &payload).unwrap();
        assert_eq!(normalized.echo["birth_date"], json!("2026-01-22"));
    }

    #[test]
    fn unknown_column_is_rejected() {
        let payload = as_map(json!({ "password_hash": "x" }));
        assert!(normalize_payload(EntityKind::Clients, &payload).is_err());
    }

    #[test]
    fn bad_date_is_rejected() {
        let payload = as_map(json!({ "data_scadenza": "domani" }));
        assert!(normalize_payload(EntityKind::Policies, &payload).is_err());
    }

    #[test]
    fn holder_type_outside_the_union_is_rejected() {
        let payload = as_map(json!({ "holder_type": "company" }));
        assert!(normalize_payload(EntityKind::Policies, &payload).is_err());
    }

    #[test]
    fn premio_accepts_number_and_string() {
        let payload = as_map(json!({ "premio": 350.50 }));
        let normalized = normalize_payload(EntityKind::Policies, &payload).unwrap();
        assert!(matches!(
            normalized.values[0].value,
            BoundValue::Decimal(Some(_))
        ));

        let payload = as_map(json!({ "premio": "350.50" }));
        assert!(normalize_payload(EntityKind::Policies, &payload).is_ok());
    }

    #[test]
    fn null_clears_an_optional_column() {
        let payload = as_map(json!({ "pdf_polizza_name": null }));
        let normalized = normalize_payload(EntityKind::Policies, &payload).unwrap();
        assert_eq!(normalized.values[0].value, BoundValue::Text(None));
        assert_eq!(normalized.echo["pdf_polizza_name"], Value::Null);
    }
}
