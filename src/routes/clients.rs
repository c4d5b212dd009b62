use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use log::error;
use tera::Tera;

use crate::domain::catalog::{AccountType, Country};
use crate::domain::client::ClientStats;
use crate::dto::clients::{ClientRow, ClientView, ClientsQuery};
use crate::forms::StatusForm;
use crate::forms::clients::{AddClientForm, BillingRateForm, TopUpForm, UpdateClientForm};
use crate::pagination::Paginated;
use crate::repository::http::HttpBillingRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::clients as clients_service;
use crate::services::ServiceError;

#[get("/clients")]
pub async fn show_clients(
    params: web::Query<ClientsQuery>,
    repo: web::Data<HttpBillingRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = params.into_inner();

    match clients_service::load_clients_page(repo.get_ref(), query.clone()).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "clients");
            context.insert("clients", &data.clients.map(|c| ClientRow::from(&c)));
            context.insert("stats", &data.stats);
            context.insert("account_types", &data.account_types);
            context.insert("countries", &data.countries);
            context.insert("query", &data.query);
            render_template(&tera, "clients/index.html", &context)
        }
        Err(err) => {
            // A failed fetch never blocks the page: render it empty with the
            // error as an alert.
            error!("Failed to load clients: {err}");
            let mut context = base_context(&flash_messages, "clients");
            context.insert("alerts", &vec![(err.to_string(), "danger")]);
            context.insert("clients", &Paginated::<ClientRow>::empty());
            context.insert("stats", &ClientStats::default());
            context.insert("account_types", &Vec::<AccountType>::new());
            context.insert("countries", &Vec::<Country>::new());
            context.insert("query", &query);
            render_template(&tera, "clients/index.html", &context)
        }
    }
}

#[get("/client/{client_id}")]
pub async fn show_client(
    client_id: web::Path<String>,
    repo: web::Data<HttpBillingRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match clients_service::load_client_page(repo.get_ref(), &client_id).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "clients");
            // `view` carries the display strings; the raw client backs the
            // edit form prefill.
            context.insert("view", &ClientView::from(&data.client));
            context.insert("client", &data.client);
            context.insert("account_types", &data.account_types);
            context.insert("countries", &data.countries);
            render_template(&tera, "clients/show.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Client not found.").send();
            redirect("/clients")
        }
        Err(err) => {
            error!("Failed to load client {client_id}: {err}");
            FlashMessage::error(err.to_string()).send();
            redirect("/clients")
        }
    }
}

#[post("/clients/add")]
pub async fn add_client(
    repo: web::Data<HttpBillingRepository>,
    web::Form(form): web::Form<AddClientForm>,
) -> impl Responder {
    match clients_service::add_client(repo.get_ref(), form).await {
        Ok(()) => {
            FlashMessage::success("Client created.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            error!("Failed to create a client: {err}");
            FlashMessage::error(err.to_string()).send();
        }
    }
    redirect("/clients")
}

#[post("/client/{client_id}/save")]
pub async fn save_client(
    client_id: web::Path<String>,
    repo: web::Data<HttpBillingRepository>,
    web::Form(form): web::Form<UpdateClientForm>,
) -> impl Responder {
    match clients_service::save_client(repo.get_ref(), &client_id, form).await {
        Ok(()) => {
            FlashMessage::success("Client updated.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            error!("Failed to update client {client_id}: {err}");
            FlashMessage::error(err.to_string()).send();
        }
    }
    redirect(&format!("/client/{client_id}"))
}

#[post("/client/{client_id}/status")]
pub async fn change_client_status(
    client_id: web::Path<String>,
    repo: web::Data<HttpBillingRepository>,
    web::Form(form): web::Form<StatusForm>,
) -> impl Responder {
    match clients_service::change_client_status(repo.get_ref(), &client_id, form).await {
        Ok(()) => {
            FlashMessage::success("Client status changed.").send();
        }
        Err(err) => {
            error!("Failed to change status of client {client_id}: {err}");
            FlashMessage::error(err.to_string()).send();
        }
    }
    // The list is refetched on the redirect; the mutation response carries no
    // authoritative state.
    redirect("/clients")
}

#[post("/client/{client_id}/topup")]
pub async fn top_up_client(
    client_id: web::Path<String>,
    repo: web::Data<HttpBillingRepository>,
    web::Form(form): web::Form<TopUpForm>,
) -> impl Responder {
    match clients_service::top_up_credit(repo.get_ref(), &client_id, form).await {
        Ok(()) => {
            FlashMessage::success("Credit topped up.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            error!("Failed to top up client {client_id}: {err}");
            FlashMessage::error(err.to_string()).send();
        }
    }
    redirect(&format!("/client/{client_id}"))
}

#[post("/client/{client_id}/rate")]
pub async fn save_billing_rate(
    client_id: web::Path<String>,
    repo: web::Data<HttpBillingRepository>,
    web::Form(form): web::Form<BillingRateForm>,
) -> impl Responder {
    match clients_service::save_billing_rate(repo.get_ref(), &client_id, form).await {
        Ok(()) => {
            FlashMessage::success("Billing rate updated.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            error!("Failed to update billing rate of client {client_id}: {err}");
            FlashMessage::error(err.to_string()).send();
        }
    }
    redirect(&format!("/client/{client_id}"))
}
