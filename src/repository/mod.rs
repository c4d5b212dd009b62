use crate::domain::catalog::{AccountType, Country, Role};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, PageInfo};
use crate::repository::errors::RepositoryResult;

pub mod envelope;
pub mod errors;
pub mod http;

/// One unwrapped page of records plus whatever pagination descriptor the
/// backend reported (or none, for routes without page controls).
#[derive(Clone, Debug)]
pub struct Listing<T> {
    pub records: Vec<T>,
    pub page: Option<PageInfo>,
}

#[derive(Debug, Clone)]
pub struct ClientListQuery {
    pub page: u64,
    pub per_page: u64,
}

impl ClientListQuery {
    pub fn new() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }

    pub fn paginate(mut self, page: u64, per_page: u64) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }
}

impl Default for ClientListQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct UserListQuery {
    pub client_id: Option<String>,
    pub page: u64,
    pub per_page: u64,
}

impl UserListQuery {
    pub fn new() -> Self {
        Self {
            client_id: None,
            page: 1,
            per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn paginate(mut self, page: u64, per_page: u64) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }
}

impl Default for UserListQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(async_fn_in_trait)]
pub trait ClientReader {
    async fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Listing<Client>>;
    async fn get_client_by_id(&self, client_id: &str) -> RepositoryResult<Option<Client>>;
    async fn list_account_types(&self) -> RepositoryResult<Vec<AccountType>>;
    async fn list_countries(&self) -> RepositoryResult<Vec<Country>>;
}

#[allow(async_fn_in_trait)]
pub trait ClientWriter {
    async fn create_client(&self, new_client: &NewClient) -> RepositoryResult<()>;
    async fn update_client(&self, client_id: &str, updates: &UpdateClient) -> RepositoryResult<()>;
    async fn set_client_status(&self, client_id: &str, active: bool) -> RepositoryResult<()>;
    async fn top_up_credit(&self, client_id: &str, amount: f64) -> RepositoryResult<()>;
    async fn update_billing_rate(&self, client_id: &str, rate: f64) -> RepositoryResult<()>;
}

#[allow(async_fn_in_trait)]
pub trait UserReader {
    async fn list_users(&self, query: UserListQuery) -> RepositoryResult<Listing<User>>;
    async fn get_user_by_id(&self, user_id: &str) -> RepositoryResult<Option<User>>;
    async fn list_roles(&self) -> RepositoryResult<Vec<Role>>;
    /// Clients available when scoping a new user, served by a dedicated route.
    async fn list_user_clients(&self) -> RepositoryResult<Vec<Client>>;
}

#[allow(async_fn_in_trait)]
pub trait UserWriter {
    async fn create_user(&self, new_user: &NewUser) -> RepositoryResult<()>;
    async fn update_user(&self, user_id: &str, updates: &UpdateUser) -> RepositoryResult<()>;
    async fn set_user_status(&self, user_id: &str, active: bool) -> RepositoryResult<()>;
}
