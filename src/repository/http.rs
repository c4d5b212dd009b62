//! HTTP implementation of the repository traits.
//!
//! The billing API is POST-only: every list, detail, and mutation operation
//! is a `POST` of a JSON body to a fixed path. The API key is injected into
//! each body; no session or cookie state exists at this layer.

use log::debug;
use serde_json::{Value, json};

use crate::domain::catalog::{AccountType, Country, Role};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::ApiKey;
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::envelope::{unwrap_page_info, unwrap_records};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ClientListQuery, ClientReader, ClientWriter, Listing, UserListQuery, UserReader, UserWriter,
};

const CLIENTS_TABLE: &str = "/client/table";
const CLIENT_DETAILS: &str = "/client/details";
const CLIENT_CREATE: &str = "/client/create";
const CLIENT_UPDATE: &str = "/client/update";
const CLIENT_STATUS: &str = "/client/status";
const CLIENT_TOPUP: &str = "/client/credit/topup";
const CLIENT_RATE: &str = "/client/billing/rate";
const CLIENT_ACCOUNT_TYPES: &str = "/client/account-types";
const CLIENT_COUNTRIES: &str = "/client/countries";
const USERS_TABLE: &str = "/user/table";
const USER_DETAILS: &str = "/user/details";
const USER_CREATE: &str = "/user/create";
const USER_UPDATE: &str = "/user/update";
const USER_STATUS: &str = "/user/status";
const USER_ROLES: &str = "/user/roles";
const USER_CLIENTS: &str = "/user/clients";

/// Billing API implementation of the repository traits.
#[derive(Clone)]
pub struct HttpBillingRepository {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<ApiKey>,
}

impl HttpBillingRepository {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.and_then(|key| ApiKey::new(key).ok()),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Issues one billing API call. A missing API key short-circuits before
    /// any network I/O. On an error status the backend's own `message` is
    /// surfaced verbatim when present, else `fallback`.
    async fn post(&self, path: &str, mut body: Value, fallback: &str) -> RepositoryResult<Value> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(RepositoryError::MissingApiKey)?;

        if let Some(fields) = body.as_object_mut() {
            fields.insert(
                "api_key".to_string(),
                Value::String(api_key.as_str().to_string()),
            );
        }

        let url = format!("{}{}", self.base_url, path);
        debug!("billing api call: POST {path}");

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .as_ref()
                .and_then(backend_message)
                .unwrap_or_else(|| fallback.to_string());
            return Err(RepositoryError::Backend(message));
        }

        serde_json::from_str(&text).map_err(RepositoryError::from)
    }
}

fn backend_message(payload: &Value) -> Option<String> {
    payload
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Walks detail envelopes (`{data: {...}}`, `{message: {data: {...}}}`, ...)
/// down to the record itself.
fn single_record(payload: &Value) -> Option<&Value> {
    let mut current = payload;
    while let Some(next) = current.get("data").or_else(|| current.get("message")) {
        current = next;
    }
    match current {
        Value::Object(_) => Some(current),
        Value::Array(items) => items.first(),
        _ => None,
    }
}

impl ClientReader for HttpBillingRepository {
    async fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Listing<Client>> {
        let body = json!({"page": query.page, "per_page": query.per_page});
        let payload = self
            .post(CLIENTS_TABLE, body, "Failed to load clients")
            .await?;

        let raw = unwrap_records(&payload, "clients");
        let page = unwrap_page_info(&payload, raw.len());
        Ok(Listing {
            records: raw.iter().map(Client::from_raw).collect(),
            page,
        })
    }

    async fn get_client_by_id(&self, client_id: &str) -> RepositoryResult<Option<Client>> {
        let body = json!({"client_id": client_id});
        let payload = self
            .post(CLIENT_DETAILS, body, "Failed to load client details")
            .await?;
        Ok(single_record(&payload).map(Client::from_raw))
    }

    async fn list_account_types(&self) -> RepositoryResult<Vec<AccountType>> {
        let payload = self
            .post(CLIENT_ACCOUNT_TYPES, json!({}), "Failed to load account types")
            .await?;
        Ok(unwrap_records(&payload, "account_types")
            .iter()
            .filter_map(AccountType::from_raw)
            .collect())
    }

    async fn list_countries(&self) -> RepositoryResult<Vec<Country>> {
        let payload = self
            .post(CLIENT_COUNTRIES, json!({}), "Failed to load countries")
            .await?;
        Ok(unwrap_records(&payload, "countries")
            .iter()
            .filter_map(Country::from_raw)
            .collect())
    }
}

impl ClientWriter for HttpBillingRepository {
    async fn create_client(&self, new_client: &NewClient) -> RepositoryResult<()> {
        let body = serde_json::to_value(new_client)?;
        self.post(CLIENT_CREATE, body, "Failed to create the client")
            .await?;
        Ok(())
    }

    async fn update_client(&self, client_id: &str, updates: &UpdateClient) -> RepositoryResult<()> {
        let mut body = serde_json::to_value(updates)?;
        if let Some(fields) = body.as_object_mut() {
            fields.insert(
                "client_id".to_string(),
                Value::String(client_id.to_string()),
            );
        }
        self.post(CLIENT_UPDATE, body, "Failed to update the client")
            .await?;
        Ok(())
    }

    async fn set_client_status(&self, client_id: &str, active: bool) -> RepositoryResult<()> {
        let body = json!({"client_id": client_id, "status": i32::from(active)});
        self.post(CLIENT_STATUS, body, "Failed to change the client status")
            .await?;
        Ok(())
    }

    async fn top_up_credit(&self, client_id: &str, amount: f64) -> RepositoryResult<()> {
        let body = json!({"client_id": client_id, "amount": amount});
        self.post(CLIENT_TOPUP, body, "Failed to top up the client credit")
            .await?;
        Ok(())
    }

    async fn update_billing_rate(&self, client_id: &str, rate: f64) -> RepositoryResult<()> {
        let body = json!({"client_id": client_id, "rate": rate});
        self.post(CLIENT_RATE, body, "Failed to update the billing rate")
            .await?;
        Ok(())
    }
}

impl UserReader for HttpBillingRepository {
    async fn list_users(&self, query: UserListQuery) -> RepositoryResult<Listing<User>> {
        let mut body = json!({"page": query.page, "per_page": query.per_page});
        if let Some(client_id) = &query.client_id {
            body["client_id"] = Value::String(client_id.clone());
        }
        let payload = self.post(USERS_TABLE, body, "Failed to load users").await?;

        let raw = unwrap_records(&payload, "users");
        let page = unwrap_page_info(&payload, raw.len());
        Ok(Listing {
            records: raw.iter().map(User::from_raw).collect(),
            page,
        })
    }

    async fn get_user_by_id(&self, user_id: &str) -> RepositoryResult<Option<User>> {
        let body = json!({"user_id": user_id});
        let payload = self
            .post(USER_DETAILS, body, "Failed to load user details")
            .await?;
        Ok(single_record(&payload).map(User::from_raw))
    }

    async fn list_roles(&self) -> RepositoryResult<Vec<Role>> {
        let payload = self
            .post(USER_ROLES, json!({}), "Failed to load roles")
            .await?;
        Ok(unwrap_records(&payload, "roles")
            .iter()
            .filter_map(Role::from_raw)
            .collect())
    }

    async fn list_user_clients(&self) -> RepositoryResult<Vec<Client>> {
        let payload = self
            .post(USER_CLIENTS, json!({}), "Failed to load clients")
            .await?;
        Ok(unwrap_records(&payload, "clients")
            .iter()
            .map(Client::from_raw)
            .collect())
    }
}

impl UserWriter for HttpBillingRepository {
    async fn create_user(&self, new_user: &NewUser) -> RepositoryResult<()> {
        let body = serde_json::to_value(new_user)?;
        self.post(USER_CREATE, body, "Failed to create the user")
            .await?;
        Ok(())
    }

    async fn update_user(&self, user_id: &str, updates: &UpdateUser) -> RepositoryResult<()> {
        let mut body = serde_json::to_value(updates)?;
        if let Some(fields) = body.as_object_mut() {
            fields.insert("user_id".to_string(), Value::String(user_id.to_string()));
        }
        self.post(USER_UPDATE, body, "Failed to update the user")
            .await?;
        Ok(())
    }

    async fn set_user_status(&self, user_id: &str, active: bool) -> RepositoryResult<()> {
        // Users report status under `user_status`; the mutation mirrors that.
        let body = json!({"user_id": user_id, "user_status": i32::from(active)});
        self.post(USER_STATUS, body, "Failed to change the user status")
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_single_record_walks_envelopes() {
        let record = json!({"id": 1, "name": "Acme"});
        assert_eq!(single_record(&json!({"data": record})), Some(&record));
        assert_eq!(
            single_record(&json!({"message": {"data": record}})),
            Some(&record)
        );
        assert_eq!(single_record(&json!({"data": [record]})), Some(&record));
        assert_eq!(single_record(&record), Some(&record));
        assert_eq!(single_record(&json!({"data": null})), None);
        assert_eq!(single_record(&Value::Null), None);
    }

    #[test]
    fn test_backend_message_extraction() {
        assert_eq!(
            backend_message(&json!({"message": " Insufficient balance "})),
            Some("Insufficient balance".to_string())
        );
        assert_eq!(backend_message(&json!({"message": ""})), None);
        assert_eq!(backend_message(&json!({"message": {"data": []}})), None);
        assert_eq!(backend_message(&json!({"error": "x"})), None);
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let repo = HttpBillingRepository::new("http://localhost:9", Some("   ".to_string()));
        assert!(!repo.has_api_key());

        let repo = HttpBillingRepository::new("http://localhost:9", None);
        assert!(!repo.has_api_key());

        let repo = HttpBillingRepository::new("http://localhost:9/", Some("key".to_string()));
        assert!(repo.has_api_key());
        assert_eq!(repo.base_url, "http://localhost:9");
    }

    #[tokio::test]
    async fn test_missing_api_key_short_circuits_before_network() {
        // The base URL is unroutable; reaching the network would fail with a
        // different error than MissingApiKey.
        let repo = HttpBillingRepository::new("http://192.0.2.1", None);
        let err = repo
            .list_clients(ClientListQuery::new())
            .await
            .expect_err("must not attempt the call");
        assert!(matches!(err, RepositoryError::MissingApiKey));

        let err = repo
            .set_client_status("1", true)
            .await
            .expect_err("must not attempt the call");
        assert!(matches!(err, RepositoryError::MissingApiKey));
    }
}
