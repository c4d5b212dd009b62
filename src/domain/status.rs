//! Normalization of the billing API's heterogeneous status representations.

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Canonical account status.
///
/// The backend reports status as `0`/`1`, as strings like `"ENABLED"` or
/// `"SUSPENDED"`, or not at all. Anything unrecognized lands on [`Unknown`]
/// rather than being silently collapsed, so the fail-closed policy stays
/// visible: `Unknown` renders and filters as INACTIVE.
///
/// [`Unknown`]: AccountStatus::Unknown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccountStatus {
    Active,
    Inactive,
    #[default]
    Unknown,
}

impl AccountStatus {
    /// Normalizes a raw status value taken from a record.
    ///
    /// Client records carry the value under `status`, user records under
    /// `user_status`. Callers select the source field; the two are a known
    /// backend inconsistency and are deliberately not unified here.
    pub fn from_raw(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => {
                if n.as_i64() == Some(1) || n.as_f64() == Some(1.0) {
                    Self::Active
                } else {
                    Self::Inactive
                }
            }
            Some(Value::String(s)) => Self::from_label(s),
            _ => Self::Unknown,
        }
    }

    fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "ACTIVE" | "ENABLED" | "APPROVED" => Self::Active,
            "INACTIVE" | "DISABLED" | "SUSPENDED" | "BLOCKED" => Self::Inactive,
            _ => Self::Unknown,
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// The two-valued label shown everywhere in the UI. `Unknown` collapses
    /// to `INACTIVE` at this boundary and nowhere earlier.
    pub fn canonical_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive | Self::Unknown => "INACTIVE",
        }
    }
}

impl Serialize for AccountStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.canonical_str())
    }
}

/// Status filter selected in the list views.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    /// Parses the query-string value; anything unrecognized means no filter.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "ACTIVE" => Self::Active,
            "INACTIVE" => Self::Inactive,
            _ => Self::All,
        }
    }

    pub fn allows(self, status: AccountStatus) -> bool {
        match self {
            Self::All => true,
            Self::Active => status.is_active(),
            Self::Inactive => !status.is_active(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }
}
