use serde::{Deserialize, Serialize};

use crate::domain::catalog::{AccountType, Country};
use crate::domain::client::{Client, ClientStats};
use crate::domain::fields;
use crate::domain::status::StatusFilter;
use crate::filters::RecordFilter;
use crate::pagination::Paginated;

/// Query parameters accepted by the clients list page. Changing any filter
/// resets `page` implicitly because the links regenerate without it.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ClientsQuery {
    /// Free-text search entered by the user.
    pub q: Option<String>,
    /// `ALL` / `ACTIVE` / `INACTIVE`.
    pub status: Option<String>,
    pub account_type: Option<String>,
    pub country: Option<String>,
    pub page: Option<u64>,
}

impl ClientsQuery {
    pub fn filter(&self) -> RecordFilter {
        RecordFilter {
            search: filter_value(self.q.as_deref()),
            status: self
                .status
                .as_deref()
                .map(StatusFilter::parse)
                .unwrap_or_default(),
            account_type: filter_value(self.account_type.as_deref()),
            country: filter_value(self.country.as_deref()),
        }
    }
}

/// `ALL` and blank both mean "no filter".
pub(crate) fn filter_value(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("ALL"))
        .map(str::to_string)
}

/// Table row with every cell already resolved to its display string, so the
/// templates never reimplement the placeholder rules.
#[derive(Debug, Serialize)]
pub struct ClientRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub account_type_label: String,
    pub country: String,
    pub status: &'static str,
    pub balance: String,
}

impl From<&Client> for ClientRow {
    fn from(client: &Client) -> Self {
        Self {
            id: fields::cell(client.id.as_deref()).to_string(),
            name: client.display_name().to_string(),
            email: fields::cell(client.email.as_deref()).to_string(),
            phone: fields::cell(client.phone.as_deref()).to_string(),
            account_type_label: fields::cell(client.account_type_label.as_deref()).to_string(),
            country: fields::cell(client.country_code.as_deref()).to_string(),
            status: client.status.canonical_str(),
            balance: fields::cell(client.balance.as_deref()).to_string(),
        }
    }
}

/// Detail-page view with inline-label placeholders resolved.
#[derive(Debug, Serialize)]
pub struct ClientView {
    pub name: String,
    pub status: &'static str,
    pub email: String,
    pub phone: String,
    pub account_type: String,
    pub country: String,
    pub address: String,
    pub created: String,
    pub balance: String,
    pub credit_limit: String,
    pub billing_mode: String,
    pub kyb_status: String,
    pub compliance_status: String,
}

impl From<&Client> for ClientView {
    fn from(client: &Client) -> Self {
        let created = client.created_display();
        Self {
            name: client.display_name().to_string(),
            status: client.status.canonical_str(),
            email: fields::label(client.email.as_deref()).to_string(),
            phone: fields::label(client.phone.as_deref()).to_string(),
            account_type: fields::label(client.account_type_label.as_deref()).to_string(),
            country: fields::label(client.country_code.as_deref()).to_string(),
            address: fields::label(client.address.as_deref()).to_string(),
            created: fields::label(created.as_deref()).to_string(),
            balance: fields::label(client.balance.as_deref()).to_string(),
            credit_limit: fields::label(client.credit_limit.as_deref()).to_string(),
            billing_mode: fields::label(client.billing_mode.as_deref()).to_string(),
            kyb_status: fields::label(client.kyb_status.as_deref()).to_string(),
            compliance_status: fields::label(client.compliance_status.as_deref()).to_string(),
        }
    }
}

/// Data required to render the clients list page.
#[derive(Debug)]
pub struct ClientsPageData {
    pub clients: Paginated<Client>,
    pub stats: ClientStats,
    pub account_types: Vec<AccountType>,
    pub countries: Vec<Country>,
    /// Filter state echoed back to the template.
    pub query: ClientsQuery,
}

/// Data required to render the client detail page.
#[derive(Debug)]
pub struct ClientPageData {
    pub client: Client,
    pub account_types: Vec<AccountType>,
    pub countries: Vec<Country>,
}
