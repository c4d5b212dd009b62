use serde::{Deserialize, Serialize};

use crate::domain::catalog::Role;
use crate::domain::client::Client;
use crate::domain::fields;
use crate::domain::status::StatusFilter;
use crate::domain::user::User;
use crate::dto::clients::filter_value;
use crate::filters::RecordFilter;
use crate::pagination::Paginated;

/// Query parameters accepted by the users list page.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UsersQuery {
    pub q: Option<String>,
    /// `ALL` / `ACTIVE` / `INACTIVE`.
    pub status: Option<String>,
    /// Scopes the listing to a single client when present.
    pub client_id: Option<String>,
    pub page: Option<u64>,
}

impl UsersQuery {
    /// Users carry no account type or country; only search and status apply.
    pub fn filter(&self) -> RecordFilter {
        RecordFilter {
            search: filter_value(self.q.as_deref()),
            status: self
                .status
                .as_deref()
                .map(StatusFilter::parse)
                .unwrap_or_default(),
            account_type: None,
            country: None,
        }
    }
}

/// Table row with every cell resolved to its display string.
#[derive(Debug, Serialize)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub client_id: String,
    pub status: &'static str,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: fields::cell(user.id.as_deref()).to_string(),
            name: user.display_name().to_string(),
            email: fields::cell(user.email.as_deref()).to_string(),
            phone: fields::cell(user.phone.as_deref()).to_string(),
            client_id: fields::cell(user.client_id.as_deref()).to_string(),
            status: user.status.canonical_str(),
        }
    }
}

/// Detail-page view with inline-label placeholders resolved.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub name: String,
    pub status: &'static str,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub client_id: String,
    pub registered: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        let registered = user.registered_display();
        Self {
            name: user.display_name().to_string(),
            status: user.status.canonical_str(),
            email: fields::label(user.email.as_deref()).to_string(),
            phone: fields::label(user.phone.as_deref()).to_string(),
            role: fields::label(user.role_id.as_deref()).to_string(),
            client_id: fields::label(user.client_id.as_deref()).to_string(),
            registered: fields::label(registered.as_deref()).to_string(),
        }
    }
}

/// Data required to render the users list page.
pub struct UsersPageData {
    pub users: Paginated<User>,
    pub roles: Vec<Role>,
    pub clients: Vec<Client>,
    pub query: UsersQuery,
}

/// Data required to render the user detail page.
pub struct UserPageData {
    pub user: User,
    pub roles: Vec<Role>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_user_view_resolves_placeholders_and_timestamp() {
        let user = User::from_raw(&json!({
            "id": 10,
            "user_status": 1,
            "registered_at": "2024-03-01 09:30:00"
        }));

        let row = UserRow::from(&user);
        assert_eq!(row.name, "--");
        assert_eq!(row.status, "ACTIVE");

        let view = UserView::from(&user);
        assert_eq!(view.email, "\u{2014}");
        assert_eq!(view.registered, "2024-03-01 09:30");
    }
}
