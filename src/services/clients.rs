use log::error;
use validator::Validate;

use crate::domain::client::ClientStats;
use crate::dto::clients::{ClientPageData, ClientsPageData, ClientsQuery};
use crate::forms::StatusForm;
use crate::forms::clients::{AddClientForm, BillingRateForm, TopUpForm, UpdateClientForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, PageInfo, Paginated};
use crate::repository::{ClientListQuery, ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};

/// Loads everything the clients list page renders: the fetched page of
/// clients with filters applied, the stats strip, and the dropdown catalogs.
///
/// The list and both catalogs are independent fetches and run concurrently.
/// A failed catalog fetch degrades its dropdown, not the page.
pub async fn load_clients_page<R>(repo: &R, query: ClientsQuery) -> ServiceResult<ClientsPageData>
where
    R: ClientReader + ?Sized,
{
    let page = query.page.unwrap_or(1).max(1);
    let filter = query.filter();

    let (listing, account_types, countries) = tokio::join!(
        repo.list_clients(ClientListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE)),
        repo.list_account_types(),
        repo.list_countries(),
    );

    let listing = listing.map_err(ServiceError::from)?;
    let account_types = account_types.unwrap_or_else(|err| {
        error!("Failed to load account types: {err}");
        Vec::new()
    });
    let countries = countries.unwrap_or_else(|err| {
        error!("Failed to load countries: {err}");
        Vec::new()
    });

    // Stats describe the fetched set; the filter only narrows the table.
    let stats = ClientStats::collect(&listing.records);
    let clients = filter.apply(listing.records);

    // The descriptor stays authoritative for page controls even when the
    // filter shrinks the visible set below what it reports.
    let total_pages = listing.page.as_ref().map_or(1, PageInfo::page_count);
    let clients = Paginated::new(clients, page as usize, total_pages as usize);

    Ok(ClientsPageData {
        clients,
        stats,
        account_types,
        countries,
        query,
    })
}

/// Loads the client detail page with the catalogs its edit form needs.
pub async fn load_client_page<R>(repo: &R, client_id: &str) -> ServiceResult<ClientPageData>
where
    R: ClientReader + ?Sized,
{
    let (client, account_types, countries) = tokio::join!(
        repo.get_client_by_id(client_id),
        repo.list_account_types(),
        repo.list_countries(),
    );

    let client = client.map_err(ServiceError::from)?.ok_or(ServiceError::NotFound)?;
    let account_types = account_types.unwrap_or_else(|err| {
        error!("Failed to load account types: {err}");
        Vec::new()
    });
    let countries = countries.unwrap_or_else(|err| {
        error!("Failed to load countries: {err}");
        Vec::new()
    });

    Ok(ClientPageData {
        client,
        account_types,
        countries,
    })
}

/// Validates the add-client form and issues the create call.
pub async fn add_client<R>(repo: &R, form: AddClientForm) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    if let Err(err) = form.validate() {
        error!("Failed to validate the add-client form: {err}");
        return Err(ServiceError::Form(
            "A name, a valid email and a country are required".to_string(),
        ));
    }

    repo.create_client(&form.into_new_client())
        .await
        .map_err(ServiceError::from)
}

/// Validates the edit form and issues the update call.
pub async fn save_client<R>(repo: &R, client_id: &str, form: UpdateClientForm) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    if let Err(err) = form.validate() {
        error!("Failed to validate the edit-client form: {err}");
        return Err(ServiceError::Form("A client name is required".to_string()));
    }

    repo.update_client(client_id, &form.into_update_client())
        .await
        .map_err(ServiceError::from)
}

/// Issues the status-change call. The caller refetches the list afterwards;
/// the mutation response itself is fire-and-confirm.
pub async fn change_client_status<R>(
    repo: &R,
    client_id: &str,
    form: StatusForm,
) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    repo.set_client_status(client_id, form.is_active())
        .await
        .map_err(ServiceError::from)
}

pub async fn top_up_credit<R>(repo: &R, client_id: &str, form: TopUpForm) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    if form.validate().is_err() {
        return Err(ServiceError::Form(
            "The top-up amount must be greater than zero".to_string(),
        ));
    }

    repo.top_up_credit(client_id, form.amount)
        .await
        .map_err(ServiceError::from)
}

pub async fn save_billing_rate<R>(
    repo: &R,
    client_id: &str,
    form: BillingRateForm,
) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    if form.validate().is_err() {
        return Err(ServiceError::Form(
            "The billing rate cannot be negative".to_string(),
        ));
    }

    repo.update_billing_rate(client_id, form.rate)
        .await
        .map_err(ServiceError::from)
}
