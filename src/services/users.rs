use log::error;
use validator::Validate;

use crate::dto::users::{UserPageData, UsersPageData, UsersQuery};
use crate::forms::StatusForm;
use crate::forms::users::{AddUserForm, UpdateUserForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, PageInfo, Paginated};
use crate::repository::{UserListQuery, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Loads the users list page: the fetched page of users with filters
/// applied, plus the role and client catalogs for the create form.
pub async fn load_users_page<R>(repo: &R, query: UsersQuery) -> ServiceResult<UsersPageData>
where
    R: UserReader + ?Sized,
{
    let page = query.page.unwrap_or(1).max(1);
    let filter = query.filter();

    let mut list_query = UserListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(client_id) = query.client_id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        list_query = list_query.client_id(client_id);
    }

    let (listing, roles, clients) = tokio::join!(
        repo.list_users(list_query),
        repo.list_roles(),
        repo.list_user_clients(),
    );

    let listing = listing.map_err(ServiceError::from)?;
    let roles = roles.unwrap_or_else(|err| {
        error!("Failed to load roles: {err}");
        Vec::new()
    });
    let clients = clients.unwrap_or_else(|err| {
        error!("Failed to load user clients: {err}");
        Vec::new()
    });

    let users = filter.apply(listing.records);
    let total_pages = listing.page.as_ref().map_or(1, PageInfo::page_count);
    let users = Paginated::new(users, page as usize, total_pages as usize);

    Ok(UsersPageData {
        users,
        roles,
        clients,
        query,
    })
}

/// Loads the user detail page with the role catalog its edit form needs.
pub async fn load_user_page<R>(repo: &R, user_id: &str) -> ServiceResult<UserPageData>
where
    R: UserReader + ?Sized,
{
    let (user, roles) = tokio::join!(repo.get_user_by_id(user_id), repo.list_roles());

    let user = user.map_err(ServiceError::from)?.ok_or(ServiceError::NotFound)?;
    let roles = roles.unwrap_or_else(|err| {
        error!("Failed to load roles: {err}");
        Vec::new()
    });

    Ok(UserPageData { user, roles })
}

/// Validates the add-user form and issues the create call. Validation
/// failures (short password, missing client) block before any network call.
pub async fn add_user<R>(repo: &R, form: AddUserForm) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    if let Err(err) = form.validate() {
        error!("Failed to validate the add-user form: {err}");
        return Err(ServiceError::Form(
            "A name, a valid email, a client and a password of at least 8 characters are required"
                .to_string(),
        ));
    }

    repo.create_user(&form.into_new_user())
        .await
        .map_err(ServiceError::from)
}

pub async fn save_user<R>(repo: &R, user_id: &str, form: UpdateUserForm) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    if let Err(err) = form.validate() {
        error!("Failed to validate the edit-user form: {err}");
        return Err(ServiceError::Form("A user name is required".to_string()));
    }

    repo.update_user(user_id, &form.into_update_user())
        .await
        .map_err(ServiceError::from)
}

pub async fn change_user_status<R>(repo: &R, user_id: &str, form: StatusForm) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    repo.set_user_status(user_id, form.is_active())
        .await
        .map_err(ServiceError::from)
}
