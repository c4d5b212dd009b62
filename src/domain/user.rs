use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::fields;
use crate::domain::status::AccountStatus;
use crate::filters::FilterRecord;

/// An operator account scoped to a client.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct User {
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: AccountStatus,
    pub role_id: Option<String>,
    pub client_id: Option<String>,
    pub created_at: Option<String>,
    /// Detail-view timestamp; adds `registered_at` to the candidate chain.
    pub registered_at: Option<String>,
}

impl User {
    /// Builds a canonical user from a raw record.
    ///
    /// Users carry their status under `user_status`, not `status`. That is a
    /// known backend inconsistency, kept as its own code path on purpose.
    pub fn from_raw(record: &Value) -> Self {
        Self {
            id: fields::str_field(record, &["id", "user_id"]),
            full_name: fields::str_field(record, &["full_name", "name"]),
            email: fields::str_field(record, &["email"]),
            phone: fields::str_field(record, &["msisdn", "phone"]),
            status: AccountStatus::from_raw(record.get("user_status")),
            role_id: fields::str_field(record, &["role_id"]),
            client_id: fields::str_field(record, &["client_id"]),
            created_at: fields::str_field(record, &["created_at", "created", "createdOn"]),
            registered_at: fields::str_field(
                record,
                &["created_at", "created", "createdOn", "registered_at"],
            ),
        }
    }

    /// Display name, never empty.
    pub fn display_name(&self) -> &str {
        fields::cell(self.full_name.as_deref())
    }

    /// Registration timestamp normalized for display.
    pub fn registered_display(&self) -> Option<String> {
        self.registered_at.as_deref().map(fields::timestamp_display)
    }
}

impl FilterRecord for User {
    fn search_fields(&self) -> [Option<&str>; 4] {
        [
            self.full_name.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
            self.id.as_deref(),
        ]
    }

    fn status(&self) -> AccountStatus {
        self.status
    }
}

/// Payload for the user-create call.
#[derive(Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msisdn: Option<String>,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    pub client_id: String,
}

impl NewUser {
    #[must_use]
    pub fn new(
        full_name: String,
        email: String,
        msisdn: Option<String>,
        password: String,
        role_id: Option<String>,
        client_id: String,
    ) -> Self {
        Self {
            full_name: full_name.trim().to_string(),
            email: email.to_lowercase().trim().to_string(),
            msisdn: msisdn
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            password,
            role_id: role_id
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            client_id: client_id.trim().to_string(),
        }
    }
}

/// Payload for the user-update call.
#[derive(Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msisdn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
}

impl UpdateUser {
    #[must_use]
    pub fn new(
        full_name: String,
        email: Option<String>,
        msisdn: Option<String>,
        role_id: Option<String>,
    ) -> Self {
        Self {
            full_name: full_name.trim().to_string(),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            msisdn: msisdn
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            role_id: role_id
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_user_status_comes_from_user_status_field() {
        // `status` on a user record is not the canonical field and must be
        // ignored.
        let record = json!({"user_status": "SUSPENDED", "status": 1});
        let user = User::from_raw(&record);
        assert_eq!(user.status, AccountStatus::Inactive);

        let record = json!({"user_status": 1});
        assert_eq!(User::from_raw(&record).status, AccountStatus::Active);
    }

    #[test]
    fn test_user_name_chain() {
        let record = json!({"name": "Fallback Name"});
        assert_eq!(
            User::from_raw(&record).full_name.as_deref(),
            Some("Fallback Name")
        );

        let record = json!({"full_name": "Jordan Ops", "name": "ignored"});
        assert_eq!(
            User::from_raw(&record).full_name.as_deref(),
            Some("Jordan Ops")
        );
    }

    #[test]
    fn test_registered_at_only_fills_detail_timestamp() {
        let record = json!({"registered_at": "2024-01-01"});
        let user = User::from_raw(&record);
        assert_eq!(user.created_at, None);
        assert_eq!(user.registered_at.as_deref(), Some("2024-01-01"));
    }
}
