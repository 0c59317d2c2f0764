// src/models/entities.rs
//
// O coração do CRUD genérico: as quatro tabelas expostas pela API formam um
// enum fechado. Cada variante declara as colunas permitidas e o tipo de cada
// uma, então o SQL é montado apenas a partir destas constantes. Nomes vindos
// do cliente nunca são interpolados; valores são sempre parâmetros.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// 1. As tabelas expostas (whitelist fechada)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Clients,
    Businesses,
    Companies,
    Policies,
}

impl FromStr for EntityKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clients" => Ok(EntityKind::Clients),
            "businesses" => Ok(EntityKind::Businesses),
            "companies" => Ok(EntityKind::Companies),
            "policies" => Ok(EntityKind::Policies),
            _ => Err(()),
        }
    }
}

impl EntityKind {
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::Clients => "clients",
            EntityKind::Businesses => "businesses",
            EntityKind::Companies => "companies",
            EntityKind::Policies => "policies",
        }
    }

    /// As colunas editáveis pela API. `id` e `tenant_id` ficam de fora de
    /// propósito: o id é gerado pelo banco e o tenant vem sempre da sessão.
    pub fn columns(&self) -> &'static [ColumnSpec] {
        match self {
            EntityKind::Clients => CLIENT_COLUMNS,
            EntityKind::Businesses => BUSINESS_COLUMNS,
            EntityKind::Companies => COMPANY_COLUMNS,
            EntityKind::Policies => POLICY_COLUMNS,
        }
    }

    pub fn column(&self, name: &str) -> Option<&'static ColumnSpec> {
        self.columns().iter().find(|c| c.name == name)
    }

    /// Lista de SELECT com todas as colunas declaradas mais id e tenant_id.
    pub fn select_list(&self) -> String {
        let mut list = String::from("id, tenant_id");
        for col in self.columns() {
            list.push_str(", ");
            list.push_str(col.name);
        }
        list
    }
}

// ---
// 2. Declaração de colunas
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Date,
    Uuid,
    Decimal,
    /// Discriminador da referência polimórfica ('client' | 'business')
    HolderType,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }
}

const CLIENT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("nome", ColumnKind::Text),
    ColumnSpec::new("cognome", ColumnKind::Text),
    ColumnSpec::new("birth_date", ColumnKind::Date),
    ColumnSpec::new("cf", ColumnKind::Text),
    ColumnSpec::new("indirizzo", ColumnKind::Text),
    ColumnSpec::new("piva", ColumnKind::Text),
    ColumnSpec::new("email", ColumnKind::Text),
    ColumnSpec::new("telefono", ColumnKind::Text),
];

const BUSINESS_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("nome", ColumnKind::Text),
    ColumnSpec::new("amministratore", ColumnKind::Text),
    ColumnSpec::new("indirizzo", ColumnKind::Text),
    ColumnSpec::new("piva", ColumnKind::Text),
];

const COMPANY_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("nome", ColumnKind::Text),
    ColumnSpec::new("indirizzo", ColumnKind::Text),
];

const POLICY_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("targa", ColumnKind::Text),
    ColumnSpec::new("policy_code", ColumnKind::Text),
    ColumnSpec::new("company_id", ColumnKind::Uuid),
    ColumnSpec::new("holder_type", ColumnKind::HolderType),
    ColumnSpec::new("holder_id", ColumnKind::Uuid),
    ColumnSpec::new("data_emissione", ColumnKind::Date),
    ColumnSpec::new("data_scadenza", ColumnKind::Date),
    ColumnSpec::new("premio", ColumnKind::Decimal),
    ColumnSpec::new("pdf_polizza_name", ColumnKind::Text),
];

// ---
// 3. O titular da polizza (referência polimórfica tipada)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HolderType {
    Client,
    Business,
}

impl FromStr for HolderType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(HolderType::Client),
            "business" => Ok(HolderType::Business),
            _ => Err(()),
        }
    }
}

impl HolderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HolderType::Client => "client",
            HolderType::Business => "business",
        }
    }
}

/// A união etiquetada no lugar do par cru (holder_type, holder_id):
/// combinações inválidas nem chegam a existir, e a resolução é feita com
/// um lookup explícito por tipo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Holder {
    Client(Uuid),
    Business(Uuid),
}

impl Holder {
    pub fn new(holder_type: HolderType, holder_id: Uuid) -> Self {
        match holder_type {
            HolderType::Client => Holder::Client(holder_id),
            HolderType::Business => Holder::Business(holder_id),
        }
    }

    pub fn holder_type(&self) -> HolderType {
        match self {
            Holder::Client(_) => HolderType::Client,
            Holder::Business(_) => HolderType::Business,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Holder::Client(id) | Holder::Business(id) => *id,
        }
    }
}

// ---
// 4. Valores tipados prontos para bind
// ---
// O serviço converte o JSON do cliente nestes valores; o repositório só
// faz `push_bind`, sem olhar o tipo da coluna de novo.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Text(Option<String>),
    Date(Option<NaiveDate>),
    Uuid(Option<Uuid>),
    Decimal(Option<Decimal>),
}

#[derive(Debug, Clone)]
pub struct ColumnValue {
    pub name: &'static str,
    pub value: BoundValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_whitelisted_tables_parse() {
        assert_eq!("clients".parse::<EntityKind>(), Ok(EntityKind::Clients));
        assert_eq!("policies".parse::<EntityKind>(), Ok(EntityKind::Policies));
        assert!("users".parse::<EntityKind>().is_err());
        assert!("tenants".parse::<EntityKind>().is_err());
        assert!("clients; DROP TABLE users".parse::<EntityKind>().is_err());
    }

    #[test]
    fn id_and_tenant_id_are_never_editable() {
        for kind in [
            EntityKind::Clients,
            EntityKind::Businesses,
            EntityKind::Companies,
            EntityKind::Policies,
        ] {
            assert!(kind.column("id").is_none());
            assert!(kind.column("tenant_id").is_none());
        }
    }

    #[test]
    fn select_list_starts_with_id_and_tenant() {
        let list = EntityKind::Companies.select_list();
        assert_eq!(list, "id, tenant_id, nome, indirizzo");
    }

    #[test]
    fn holder_type_parses_only_known_variants() {
        assert_eq!("client".parse::<HolderType>(), Ok(HolderType::Client));
        assert_eq!("business".parse::<HolderType>(), Ok(HolderType::Business));
        assert!("company".parse::<HolderType>().is_err());
    }

    #[test]
    fn holder_union_keeps_type_and_id_together() {
        let id = Uuid::new_v4();
        let holder = Holder::new(HolderType::Business, id);
        assert_eq!(holder, Holder::Business(id));
        assert_eq!(holder.holder_type(), HolderType::Business);
        assert_eq!(holder.id(), id);
    }
}
