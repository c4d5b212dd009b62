use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use log::error;
use tera::Tera;

use crate::domain::catalog::Role;
use crate::dto::clients::ClientRow;
use crate::dto::users::{UserRow, UserView, UsersQuery};
use crate::forms::StatusForm;
use crate::forms::users::{AddUserForm, UpdateUserForm};
use crate::pagination::Paginated;
use crate::repository::http::HttpBillingRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::users as users_service;

#[get("/users")]
pub async fn show_users(
    params: web::Query<UsersQuery>,
    repo: web::Data<HttpBillingRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = params.into_inner();

    match users_service::load_users_page(repo.get_ref(), query.clone()).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "users");
            context.insert("users", &data.users.map(|u| UserRow::from(&u)));
            context.insert("roles", &data.roles);
            let clients: Vec<ClientRow> = data.clients.iter().map(ClientRow::from).collect();
            context.insert("clients", &clients);
            context.insert("query", &data.query);
            render_template(&tera, "users/index.html", &context)
        }
        Err(err) => {
            error!("Failed to load users: {err}");
            let mut context = base_context(&flash_messages, "users");
            context.insert("alerts", &vec![(err.to_string(), "danger")]);
            context.insert("users", &Paginated::<UserRow>::empty());
            context.insert("roles", &Vec::<Role>::new());
            context.insert("clients", &Vec::<ClientRow>::new());
            context.insert("query", &query);
            render_template(&tera, "users/index.html", &context)
        }
    }
}

#[get("/user/{user_id}")]
pub async fn show_user(
    user_id: web::Path<String>,
    repo: web::Data<HttpBillingRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match users_service::load_user_page(repo.get_ref(), &user_id).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "users");
            // `view` carries the display strings; the raw user backs the
            // edit form prefill.
            context.insert("view", &UserView::from(&data.user));
            context.insert("user", &data.user);
            context.insert("roles", &data.roles);
            render_template(&tera, "users/show.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("User not found.").send();
            redirect("/users")
        }
        Err(err) => {
            error!("Failed to load user {user_id}: {err}");
            FlashMessage::error(err.to_string()).send();
            redirect("/users")
        }
    }
}

#[post("/users/add")]
pub async fn add_user(
    repo: web::Data<HttpBillingRepository>,
    web::Form(form): web::Form<AddUserForm>,
) -> impl Responder {
    match users_service::add_user(repo.get_ref(), form).await {
        Ok(()) => {
            FlashMessage::success("User created.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            error!("Failed to create a user: {err}");
            FlashMessage::error(err.to_string()).send();
        }
    }
    redirect("/users")
}

#[post("/user/{user_id}/save")]
pub async fn save_user(
    user_id: web::Path<String>,
    repo: web::Data<HttpBillingRepository>,
    web::Form(form): web::Form<UpdateUserForm>,
) -> impl Responder {
    match users_service::save_user(repo.get_ref(), &user_id, form).await {
        Ok(()) => {
            FlashMessage::success("User updated.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            error!("Failed to update user {user_id}: {err}");
            FlashMessage::error(err.to_string()).send();
        }
    }
    redirect(&format!("/user/{user_id}"))
}

#[post("/user/{user_id}/status")]
pub async fn change_user_status(
    user_id: web::Path<String>,
    repo: web::Data<HttpBillingRepository>,
    web::Form(form): web::Form<StatusForm>,
) -> impl Responder {
    match users_service::change_user_status(repo.get_ref(), &user_id, form).await {
        Ok(()) => {
            FlashMessage::success("User status changed.").send();
        }
        Err(err) => {
            error!("Failed to change status of user {user_id}: {err}");
            FlashMessage::error(err.to_string()).send();
        }
    }
    redirect("/users")
}
