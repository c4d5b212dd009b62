use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::fields;
use crate::domain::status::AccountStatus;
use crate::filters::{FilterRecord, normalize_country};

/// A tenant organization, normalized from whatever shape the billing API
/// served it in. Every field except `status` is optional because no route
/// guarantees any of them.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Client {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: AccountStatus,
    pub account_type: Option<String>,
    pub account_type_label: Option<String>,
    pub country_code: Option<String>,
    pub address: Option<String>,
    pub created_at: Option<String>,
    // Billing-adjacent fields, displayed read-only and never interpreted.
    pub balance: Option<String>,
    pub credit_limit: Option<String>,
    pub billing_mode: Option<String>,
    pub kyb_status: Option<String>,
    pub compliance_status: Option<String>,
}

impl Client {
    /// Builds a canonical client from a raw record via the field fallback
    /// chains. Clients carry their status under `status` (users use
    /// `user_status`).
    pub fn from_raw(record: &Value) -> Self {
        Self {
            id: fields::str_field(record, &["id", "client_id"]),
            name: fields::str_field(record, &["name", "company_name"]),
            email: fields::str_field(record, &["email"]),
            phone: fields::str_field(record, &["msisdn", "phone"]),
            status: AccountStatus::from_raw(record.get("status")),
            account_type: fields::str_field(record, &["account_type"]),
            account_type_label: fields::str_field(
                record,
                &["account_type_label", "account_type_name", "account_type"],
            ),
            country_code: fields::str_field(record, &["country_code"]),
            address: fields::str_field(record, &["address", "location"]),
            created_at: fields::str_field(record, &["created_at", "created", "createdOn"]),
            balance: fields::opaque_field(record, "balance"),
            credit_limit: fields::opaque_field(record, "credit_limit"),
            billing_mode: fields::opaque_field(record, "billing_mode"),
            kyb_status: fields::opaque_field(record, "kyb_status"),
            compliance_status: fields::opaque_field(record, "compliance_status"),
        }
    }

    /// Display name, never empty.
    pub fn display_name(&self) -> &str {
        fields::cell(self.name.as_deref())
    }

    /// Creation timestamp normalized for display; unparseable values are
    /// shown as received.
    pub fn created_display(&self) -> Option<String> {
        self.created_at.as_deref().map(fields::timestamp_display)
    }
}

impl FilterRecord for Client {
    fn search_fields(&self) -> [Option<&str>; 4] {
        [
            self.name.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
            self.id.as_deref(),
        ]
    }

    fn status(&self) -> AccountStatus {
        self.status
    }

    fn account_type(&self) -> Option<&str> {
        self.account_type.as_deref()
    }

    fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }
}

/// Payload for the client-create call.
#[derive(Clone, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msisdn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    pub country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl NewClient {
    #[must_use]
    pub fn new(
        name: String,
        email: String,
        msisdn: Option<String>,
        account_type: Option<String>,
        country_code: String,
        address: Option<String>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.to_lowercase().trim().to_string(),
            msisdn: msisdn
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            account_type: account_type
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            country_code: normalize_country(&country_code),
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

/// Payload for the client-update call. Absent fields are left untouched by
/// the backend.
#[derive(Clone, Serialize, Deserialize)]
pub struct UpdateClient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msisdn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl UpdateClient {
    #[must_use]
    pub fn new(
        name: String,
        email: Option<String>,
        msisdn: Option<String>,
        account_type: Option<String>,
        country_code: Option<String>,
        address: Option<String>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            msisdn: msisdn
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            account_type: account_type
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            country_code: country_code
                .map(|s| normalize_country(&s))
                .filter(|s| !s.is_empty()),
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

/// Headline numbers for the clients page, computed over the fetched set
/// before any filter narrows the table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClientStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// Distinct countries covered by active clients.
    pub countries: usize,
}

impl ClientStats {
    pub fn collect(clients: &[Client]) -> Self {
        let mut stats = Self {
            total: clients.len(),
            ..Self::default()
        };
        let mut countries = BTreeSet::new();
        for client in clients {
            if client.status.is_active() {
                stats.active += 1;
                if let Some(country) = client.country_code.as_deref() {
                    let normalized = normalize_country(country);
                    if !normalized.is_empty() {
                        countries.insert(normalized);
                    }
                }
            } else {
                stats.inactive += 1;
            }
        }
        stats.countries = countries.len();
        stats
    }
}
