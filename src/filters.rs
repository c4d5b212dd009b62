//! Client-side filter engine for list views.
//!
//! The backend does not reliably honor search/status/type/country filters, so
//! every list view applies them over the already-fetched page of records. The
//! rules form a conjunction; an empty result set after filtering is a valid
//! displayed state.

use crate::domain::status::{AccountStatus, StatusFilter};

/// Administrative accounts are never shown, regardless of filters.
pub const ROOT_ACCOUNT_TYPE: &str = "root";

/// A record the filter engine can evaluate.
pub trait FilterRecord {
    /// Free-text search candidates, in {name, email, phone, id} order.
    fn search_fields(&self) -> [Option<&str>; 4];

    fn status(&self) -> AccountStatus;

    fn account_type(&self) -> Option<&str> {
        None
    }

    fn country_code(&self) -> Option<&str> {
        None
    }
}

/// Current filter state of a list view. `None`/`All` means "no filter".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordFilter {
    pub search: Option<String>,
    pub status: StatusFilter,
    pub account_type: Option<String>,
    pub country: Option<String>,
}

impl RecordFilter {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into()).filter(|s| !s.trim().is_empty());
        self
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn account_type(mut self, account_type: impl Into<String>) -> Self {
        self.account_type = Some(account_type.into()).filter(|s| !s.trim().is_empty());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into()).filter(|s| !s.trim().is_empty());
        self
    }

    pub fn matches<R: FilterRecord>(&self, record: &R) -> bool {
        if record
            .account_type()
            .is_some_and(|t| t.trim() == ROOT_ACCOUNT_TYPE)
        {
            return false;
        }

        if let Some(term) = self.search.as_deref() {
            let term = term.trim().to_lowercase();
            let hit = record
                .search_fields()
                .iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }

        if !self.status.allows(record.status()) {
            return false;
        }

        if let Some(wanted) = self.account_type.as_deref() {
            match record.account_type() {
                Some(have) if have.trim().eq_ignore_ascii_case(wanted.trim()) => {}
                _ => return false,
            }
        }

        if let Some(wanted) = self.country.as_deref() {
            // Records without a country are excluded while the filter is set.
            match record.country_code() {
                Some(have) if normalize_country(have) == normalize_country(wanted) => {}
                _ => return false,
            }
        }

        true
    }

    pub fn apply<R: FilterRecord>(&self, records: Vec<R>) -> Vec<R> {
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}

/// Uppercased, trimmed, inner whitespace stripped.
pub fn normalize_country(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}
