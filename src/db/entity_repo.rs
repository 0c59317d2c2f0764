// src/db/entity_repo.rs
//
// Acesso genérico às quatro tabelas de domínio. Todo SQL dinâmico é montado
// a partir das declarações de `EntityKind` (nunca de strings do cliente) e
// todos os valores entram como parâmetros via QueryBuilder.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    common::{dates::format_date_output, error::AppError},
    models::entities::{BoundValue, ColumnKind, ColumnValue, EntityKind, Holder},
};

#[derive(Clone)]
pub struct EntityRepository {
    pool: PgPool,
}

impl EntityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leitura
    // ---

    pub async fn list(&self, kind: EntityKind, tenant_id: Uuid) -> Result<Vec<Value>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE tenant_id = $1",
            kind.select_list(),
            kind.table_name()
        );

        let rows = sqlx::query(&sql)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(|row| row_to_json(kind, row)).collect()
    }

    pub async fn get(
        &self,
        kind: EntityKind,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Value, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1 AND tenant_id = $2",
            kind.select_list(),
            kind.table_name()
        );

        let row = sqlx::query(&sql)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::RecordNotFound)?;

        row_to_json(kind, &row)
    }

    // ---
    // Escrita
    // ---

    /// Insere uma linha com os valores já normalizados pelo serviço.
    /// O tenant_id vem sempre da sessão. Retorna o id gerado.
    pub async fn create(
        &self,
        kind: EntityKind,
        tenant_id: Uuid,
        values: &[ColumnValue],
    ) -> Result<Uuid, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "INSERT INTO {} (tenant_id",
            kind.table_name()
        ));
        for cv in values {
            qb.push(", ");
            qb.push(cv.name);
        }
        qb.push(") VALUES (");
        {
            let mut sep = qb.separated(", ");
            sep.push_bind(tenant_id);
            for cv in values {
                push_bound(&mut sep, &cv.value);
            }
        }
        qb.push(") RETURNING id");

        let row = qb
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(map_constraint_error)?;

        Ok(row.try_get("id")?)
    }

    /// Atualiza apenas a linha que casa com id E tenant da sessão.
    pub async fn update(
        &self,
        kind: EntityKind,
        tenant_id: Uuid,
        id: Uuid,
        values: &[ColumnValue],
    ) -> Result<(), AppError> {
        if values.is_empty() {
            return Err(AppError::InvalidPayload(
                "Nessun campo da aggiornare".to_string(),
            ));
        }

        let mut qb =
            QueryBuilder::<Postgres>::new(format!("UPDATE {} SET ", kind.table_name()));
        let mut first = true;
        for cv in values {
            if !first {
                qb.push(", ");
            }
            first = false;
            qb.push(cv.name);
            qb.push(" = ");
            match &cv.value {
                BoundValue::Text(v) => qb.push_bind(v.clone()),
                BoundValue::Date(v) => qb.push_bind(*v),
                BoundValue::Uuid(v) => qb.push_bind(*v),
                BoundValue::Decimal(v) => qb.push_bind(*v),
            };
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.push(" AND tenant_id = ");
        qb.push_bind(tenant_id);

        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_constraint_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::RecordNotFound);
        }
        Ok(())
    }

    pub async fn delete(
        &self,
        kind: EntityKind,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<(), AppError> {
        let sql = format!(
            "DELETE FROM {} WHERE id = $1 AND tenant_id = $2",
            kind.table_name()
        );

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                // A FK RESTRICT de policies.company_id é a rede de segurança
                // caso a pré-checagem do serviço perca uma corrida.
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::RecordInUse(
                            "Impossibile eliminare: ha polizze associate".to_string(),
                        );
                    }
                }
                e.into()
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::RecordNotFound);
        }
        Ok(())
    }

    // ---
    // Lookups de integridade referencial
    // ---

    /// Resolve o titular dentro do tenant da sessão, um lookup por tipo.
    pub async fn holder_exists(
        &self,
        tenant_id: Uuid,
        holder: Holder,
    ) -> Result<bool, AppError> {
        let (table, holder_id) = match holder {
            Holder::Client(id) => ("clients", id),
            Holder::Business(id) => ("businesses", id),
        };
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1 AND tenant_id = $2)"
        );

        let exists: (bool,) = sqlx::query_as(&sql)
            .bind(holder_id)
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists.0)
    }

    pub async fn company_exists(
        &self,
        tenant_id: Uuid,
        company_id: Uuid,
    ) -> Result<bool, AppError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM companies WHERE id = $1 AND tenant_id = $2)",
        )
        .bind(company_id)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }

    pub async fn policies_reference_holder(
        &self,
        tenant_id: Uuid,
        holder: Holder,
    ) -> Result<bool, AppError> {
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM policies
                WHERE tenant_id = $1 AND holder_type = $2 AND holder_id = $3
            )
            "#,
        )
        .bind(tenant_id)
        .bind(holder.holder_type().as_str())
        .bind(holder.id())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }

    pub async fn policies_reference_company(
        &self,
        tenant_id: Uuid,
        company_id: Uuid,
    ) -> Result<bool, AppError> {
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM policies
                WHERE tenant_id = $1 AND company_id = $2
            )
            "#,
        )
        .bind(tenant_id)
        .bind(company_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }
}

fn push_bound<'qb, 'args: 'qb>(
    sep: &mut sqlx::query_builder::Separated<'qb, 'args, Postgres, &'static str>,
    value: &BoundValue,
) {
    match value {
        BoundValue::Text(v) => sep.push_bind(v.clone()),
        BoundValue::Date(v) => sep.push_bind(*v),
        BoundValue::Uuid(v) => sep.push_bind(*v),
        BoundValue::Decimal(v) => sep.push_bind(*v),
    };
}

/// Converte uma linha no JSON da API, seguindo a declaração de colunas.
/// Datas saem sempre como YYYY-MM-DD.
fn row_to_json(kind: EntityKind, row: &PgRow) -> Result<Value, AppError> {
    let mut map = Map::new();

    let id: Uuid = row.try_get("id")?;
    let tenant_id: Uuid = row.try_get("tenant_id")?;
    map.insert("id".to_string(), Value::String(id.to_string()));
    map.insert("tenant_id".to_string(), Value::String(tenant_id.to_string()));

    for col in kind.columns() {
        let value = match col.kind {
            ColumnKind::Text | ColumnKind::HolderType => row
                .try_get::<Option<String>, _>(col.name)?
                .map(Value::String)
                .unwrap_or(Value::Null),
            ColumnKind::Date => row
                .try_get::<Option<NaiveDate>, _>(col.name)?
                .map(|d| Value::String(format_date_output(d)))
                .unwrap_or(Value::Null),
            ColumnKind::Uuid => row
                .try_get::<Option<Uuid>, _>(col.name)?
                .map(|u| Value::String(u.to_string()))
                .unwrap_or(Value::Null),
            ColumnKind::Decimal => row
                .try_get::<Option<Decimal>, _>(col.name)?
                .map(decimal_to_json)
                .unwrap_or(Value::Null),
        };
        map.insert(col.name.to_string(), value);
    }

    Ok(Value::Object(map))
}

fn decimal_to_json(value: Decimal) -> Value {
    let text = value.to_string();
    match text.parse::<serde_json::Number>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::String(text),
    }
}

fn map_constraint_error(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::UniqueConstraintViolation(
                "Valore duplicato: viola un vincolo di unicità".to_string(),
            );
        }
        if db_err.is_foreign_key_violation() {
            return AppError::InvalidPayload("Riferimento inesistente".to_string());
        }
    }
    e.into()
}
