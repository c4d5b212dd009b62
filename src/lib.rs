use actix_cors::Cors;
use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::models::config::ServerConfig;
use crate::repository::http::HttpBillingRepository;
use crate::routes::api::api_v1_clients;
use crate::routes::clients::{
    add_client, change_client_status, save_billing_rate, save_client, show_client, show_clients,
    top_up_client,
};
use crate::routes::main::show_index;
use crate::routes::users::{add_user, change_user_status, save_user, show_user, show_users};

pub mod domain;
pub mod dto;
pub mod filters;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // The API key is read from configuration exactly once and threaded
    // through the repository; nothing else reads it.
    let repo = HttpBillingRepository::new(
        &server_config.billing_api_url,
        server_config.billing_api_key.clone(),
    );
    if !repo.has_api_key() {
        log::warn!("No billing API key configured; billing API calls will be rejected");
    }

    // Signing key for the flash-message cookie store.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(web::scope("/api").service(api_v1_clients))
            .service(show_index)
            .service(show_clients)
            .service(add_client)
            .service(show_client)
            .service(save_client)
            .service(change_client_status)
            .service(top_up_client)
            .service(save_billing_rate)
            .service(show_users)
            .service(add_user)
            .service(show_user)
            .service(save_user)
            .service(change_user_status)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
