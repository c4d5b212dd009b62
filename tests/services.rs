use std::sync::Mutex;

use serde_json::json;

use billing_admin::domain::catalog::{AccountType, Country, Role};
use billing_admin::domain::client::{Client, NewClient, UpdateClient};
use billing_admin::domain::user::{NewUser, UpdateUser, User};
use billing_admin::dto::clients::ClientsQuery;
use billing_admin::dto::users::UsersQuery;
use billing_admin::forms::StatusForm;
use billing_admin::forms::clients::{AddClientForm, TopUpForm};
use billing_admin::forms::users::AddUserForm;
use billing_admin::pagination::PageInfo;
use billing_admin::repository::errors::{RepositoryError, RepositoryResult};
use billing_admin::repository::{
    ClientListQuery, ClientReader, ClientWriter, Listing, UserListQuery, UserReader, UserWriter,
};
use billing_admin::services::{ServiceError, clients as clients_service, users as users_service};

/// In-memory repository serving canned records and logging every mutation.
#[derive(Default)]
struct TestRepository {
    calls: Mutex<Vec<String>>,
}

impl TestRepository {
    fn clients() -> Vec<Client> {
        [
            json!({"id": 1, "name": "Test Client", "email": "x@y.com", "status": 1,
                   "account_type": "prepaid", "country_code": "CD"}),
            json!({"id": 2, "name": "Acme Telecom", "email": "ops@acme.ke", "status": 0,
                   "account_type": "postpaid", "country_code": "KE"}),
            json!({"id": 3, "name": "Internal Root", "status": 1, "account_type": "root"}),
            json!({"id": 4, "name": "Kampala SMS", "status": "ENABLED",
                   "account_type": "prepaid", "country_code": "UG"}),
        ]
        .iter()
        .map(Client::from_raw)
        .collect()
    }

    fn users() -> Vec<User> {
        [
            json!({"id": 10, "full_name": "Jordan Ops", "email": "jordan@acme.cd",
                   "user_status": 1, "client_id": 1}),
            json!({"id": 11, "full_name": "Sam Support", "email": "sam@acme.cd",
                   "user_status": "SUSPENDED", "client_id": 1}),
        ]
        .iter()
        .map(User::from_raw)
        .collect()
    }

    fn log(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ClientReader for TestRepository {
    async fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Listing<Client>> {
        Ok(Listing {
            records: Self::clients(),
            page: Some(PageInfo {
                total: 4,
                per_page: query.per_page,
                current_page: query.page,
                last_page: Some(3),
                total_pages: None,
                from: Some(1),
                to: Some(4),
            }),
        })
    }

    async fn get_client_by_id(&self, client_id: &str) -> RepositoryResult<Option<Client>> {
        Ok(Self::clients()
            .into_iter()
            .find(|c| c.id.as_deref() == Some(client_id)))
    }

    async fn list_account_types(&self) -> RepositoryResult<Vec<AccountType>> {
        Ok(vec![
            AccountType {
                code: "prepaid".to_string(),
                label: "Prepaid".to_string(),
            },
            AccountType {
                code: "postpaid".to_string(),
                label: "Postpaid".to_string(),
            },
        ])
    }

    async fn list_countries(&self) -> RepositoryResult<Vec<Country>> {
        Ok(vec![Country {
            code: "CD".to_string(),
            name: "DR Congo".to_string(),
        }])
    }
}

impl ClientWriter for TestRepository {
    async fn create_client(&self, new_client: &NewClient) -> RepositoryResult<()> {
        self.log(format!("create_client:{}", new_client.name));
        Ok(())
    }

    async fn update_client(&self, client_id: &str, _updates: &UpdateClient) -> RepositoryResult<()> {
        self.log(format!("update_client:{client_id}"));
        Ok(())
    }

    async fn set_client_status(&self, client_id: &str, active: bool) -> RepositoryResult<()> {
        self.log(format!("set_client_status:{client_id}:{active}"));
        Ok(())
    }

    async fn top_up_credit(&self, client_id: &str, amount: f64) -> RepositoryResult<()> {
        self.log(format!("top_up_credit:{client_id}:{amount}"));
        Ok(())
    }

    async fn update_billing_rate(&self, client_id: &str, rate: f64) -> RepositoryResult<()> {
        self.log(format!("update_billing_rate:{client_id}:{rate}"));
        Ok(())
    }
}

impl UserReader for TestRepository {
    async fn list_users(&self, _query: UserListQuery) -> RepositoryResult<Listing<User>> {
        Ok(Listing {
            records: Self::users(),
            page: None,
        })
    }

    async fn get_user_by_id(&self, user_id: &str) -> RepositoryResult<Option<User>> {
        Ok(Self::users()
            .into_iter()
            .find(|u| u.id.as_deref() == Some(user_id)))
    }

    async fn list_roles(&self) -> RepositoryResult<Vec<Role>> {
        Ok(vec![Role {
            id: "3".to_string(),
            name: "Support".to_string(),
        }])
    }

    async fn list_user_clients(&self) -> RepositoryResult<Vec<Client>> {
        Ok(Self::clients())
    }
}

impl UserWriter for TestRepository {
    async fn create_user(&self, new_user: &NewUser) -> RepositoryResult<()> {
        self.log(format!("create_user:{}", new_user.email));
        Ok(())
    }

    async fn update_user(&self, user_id: &str, _updates: &UpdateUser) -> RepositoryResult<()> {
        self.log(format!("update_user:{user_id}"));
        Ok(())
    }

    async fn set_user_status(&self, user_id: &str, active: bool) -> RepositoryResult<()> {
        self.log(format!("set_user_status:{user_id}:{active}"));
        Ok(())
    }
}

/// Repository standing in for a deployment without a configured API key.
struct NoKeyRepository;

impl ClientReader for NoKeyRepository {
    async fn list_clients(&self, _query: ClientListQuery) -> RepositoryResult<Listing<Client>> {
        Err(RepositoryError::MissingApiKey)
    }

    async fn get_client_by_id(&self, _client_id: &str) -> RepositoryResult<Option<Client>> {
        Err(RepositoryError::MissingApiKey)
    }

    async fn list_account_types(&self) -> RepositoryResult<Vec<AccountType>> {
        Err(RepositoryError::MissingApiKey)
    }

    async fn list_countries(&self) -> RepositoryResult<Vec<Country>> {
        Err(RepositoryError::MissingApiKey)
    }
}

#[tokio::test]
async fn test_clients_page_excludes_root_and_keeps_stats_over_fetched_set() {
    let repo = TestRepository::default();
    let data = clients_service::load_clients_page(&repo, ClientsQuery::default())
        .await
        .unwrap();

    // Root accounts never reach the table.
    assert_eq!(data.clients.items.len(), 3);
    assert!(
        data.clients
            .items
            .iter()
            .all(|c| c.account_type.as_deref() != Some("root"))
    );

    // Stats describe the fetched set, before filtering.
    assert_eq!(data.stats.total, 4);
    assert_eq!(data.stats.active, 3);
    assert_eq!(data.stats.inactive, 1);
    assert_eq!(data.stats.countries, 2);

    // Page controls follow the descriptor (last_page fallback), not the
    // filtered count.
    assert!(data.clients.pages.contains(&Some(3)));
    assert_eq!(data.account_types.len(), 2);
    assert_eq!(data.countries.len(), 1);
}

#[tokio::test]
async fn test_clients_page_applies_filters() {
    let repo = TestRepository::default();

    let query = ClientsQuery {
        q: Some("acme".to_string()),
        ..ClientsQuery::default()
    };
    let data = clients_service::load_clients_page(&repo, query).await.unwrap();
    assert_eq!(data.clients.items.len(), 1);
    assert_eq!(data.clients.items[0].name.as_deref(), Some("Acme Telecom"));

    let query = ClientsQuery {
        status: Some("INACTIVE".to_string()),
        country: Some("ke".to_string()),
        ..ClientsQuery::default()
    };
    let data = clients_service::load_clients_page(&repo, query).await.unwrap();
    assert_eq!(data.clients.items.len(), 1);
    assert_eq!(data.clients.items[0].id.as_deref(), Some("2"));

    // An empty filtered set is a valid state, not an error.
    let query = ClientsQuery {
        q: Some("no such client".to_string()),
        ..ClientsQuery::default()
    };
    let data = clients_service::load_clients_page(&repo, query).await.unwrap();
    assert!(data.clients.items.is_empty());
}

#[tokio::test]
async fn test_missing_credential_blocks_the_page_load() {
    let err = clients_service::load_clients_page(&NoKeyRepository, ClientsQuery::default())
        .await
        .expect_err("no key must fail the load");
    assert!(matches!(err, ServiceError::MissingCredential));
}

#[tokio::test]
async fn test_add_client_validation_blocks_the_mutation() {
    let repo = TestRepository::default();
    let form = AddClientForm {
        name: String::new(),
        email: "not-an-email".to_string(),
        msisdn: None,
        account_type: None,
        country_code: String::new(),
        address: None,
    };

    let err = clients_service::add_client(&repo, form)
        .await
        .expect_err("invalid form must not reach the repository");
    assert!(matches!(err, ServiceError::Form(_)));
    assert!(repo.calls().is_empty());
}

#[tokio::test]
async fn test_add_client_issues_the_create_call() {
    let repo = TestRepository::default();
    let form = AddClientForm {
        name: "New Tenant".to_string(),
        email: "billing@tenant.cd".to_string(),
        msisdn: Some("+243810000000".to_string()),
        account_type: Some("prepaid".to_string()),
        country_code: "CD".to_string(),
        address: None,
    };

    clients_service::add_client(&repo, form).await.unwrap();
    assert_eq!(repo.calls(), vec!["create_client:New Tenant"]);
}

#[tokio::test]
async fn test_status_change_and_topup() {
    let repo = TestRepository::default();

    clients_service::change_client_status(&repo, "2", StatusForm { status: "ACTIVE".to_string() })
        .await
        .unwrap();
    clients_service::top_up_credit(&repo, "2", TopUpForm { amount: 25.0 })
        .await
        .unwrap();

    let err = clients_service::top_up_credit(&repo, "2", TopUpForm { amount: 0.0 })
        .await
        .expect_err("zero amount must be rejected locally");
    assert!(matches!(err, ServiceError::Form(_)));

    assert_eq!(
        repo.calls(),
        vec!["set_client_status:2:true", "top_up_credit:2:25"]
    );
}

#[tokio::test]
async fn test_client_detail_not_found() {
    let repo = TestRepository::default();
    let err = clients_service::load_client_page(&repo, "999")
        .await
        .expect_err("unknown id");
    assert!(matches!(err, ServiceError::NotFound));

    let data = clients_service::load_client_page(&repo, "1").await.unwrap();
    assert_eq!(data.client.name.as_deref(), Some("Test Client"));
}

#[tokio::test]
async fn test_users_page_filters_on_user_status() {
    let repo = TestRepository::default();

    let data = users_service::load_users_page(&repo, UsersQuery::default())
        .await
        .unwrap();
    assert_eq!(data.users.items.len(), 2);
    // Bulk response without pagination metadata renders no page controls
    // beyond the single page.
    assert_eq!(data.users.pages, vec![Some(1)]);

    let query = UsersQuery {
        status: Some("ACTIVE".to_string()),
        ..UsersQuery::default()
    };
    let data = users_service::load_users_page(&repo, query).await.unwrap();
    assert_eq!(data.users.items.len(), 1);
    assert_eq!(data.users.items[0].full_name.as_deref(), Some("Jordan Ops"));
}

#[tokio::test]
async fn test_add_user_password_rule_blocks_before_network() {
    let repo = TestRepository::default();
    let form = AddUserForm {
        full_name: "Jordan Ops".to_string(),
        email: "jordan@acme.cd".to_string(),
        msisdn: None,
        password: "short".to_string(),
        role_id: None,
        client_id: "1".to_string(),
    };

    let err = users_service::add_user(&repo, form)
        .await
        .expect_err("short password must be rejected locally");
    assert!(matches!(err, ServiceError::Form(_)));
    assert!(repo.calls().is_empty());
}
