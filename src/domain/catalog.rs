//! Catalog records backing the filter dropdowns and forms.

use serde::Serialize;
use serde_json::Value;

use crate::domain::fields;

/// An account type offered by the billing platform. Codes are opaque.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountType {
    pub code: String,
    pub label: String,
}

impl AccountType {
    /// Records without a usable code are dropped rather than surfaced broken.
    pub fn from_raw(record: &Value) -> Option<Self> {
        let code = fields::str_field(record, &["code", "value", "account_type", "id"])?;
        let label = fields::str_field(
            record,
            &["account_type_label", "account_type_name", "label", "name"],
        )
        .unwrap_or_else(|| code.clone());
        Some(Self { code, label })
    }
}

/// A country the platform operates in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Country {
    pub code: String,
    pub name: String,
}

impl Country {
    pub fn from_raw(record: &Value) -> Option<Self> {
        let code = fields::str_field(record, &["code", "country_code", "iso"])?;
        let name =
            fields::str_field(record, &["name", "country", "label"]).unwrap_or_else(|| code.clone());
        Some(Self { code, name })
    }
}

/// An operator role assignable to users.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Role {
    pub id: String,
    pub name: String,
}

impl Role {
    pub fn from_raw(record: &Value) -> Option<Self> {
        let id = fields::str_field(record, &["id", "role_id"])?;
        let name =
            fields::str_field(record, &["name", "role", "label"]).unwrap_or_else(|| id.clone());
        Some(Self { id, name })
    }
}
