use actix_web::{HttpResponse, Responder, get, web};
use log::error;

use crate::dto::clients::ClientsQuery;
use crate::repository::http::HttpBillingRepository;
use crate::services::ServiceError;
use crate::services::clients as clients_service;

/// Filtered client list as JSON, for embedding widgets.
#[get("/v1/clients")]
pub async fn api_v1_clients(
    params: web::Query<ClientsQuery>,
    repo: web::Data<HttpBillingRepository>,
) -> impl Responder {
    match clients_service::load_clients_page(repo.get_ref(), params.into_inner()).await {
        Ok(data) => HttpResponse::Ok().json(data.clients.items),
        Err(ServiceError::MissingCredential) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            error!("Failed to list clients: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
