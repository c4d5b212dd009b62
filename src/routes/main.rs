use actix_web::{Responder, get, web};
use serde::Deserialize;

use crate::routes::redirect;

#[derive(Deserialize)]
struct IndexQueryParams {
    tab: Option<String>,
}

/// The dashboard root selects a sub-view from the `?tab=` query parameter.
#[get("/")]
pub async fn show_index(params: web::Query<IndexQueryParams>) -> impl Responder {
    match params.tab.as_deref() {
        Some("users") => redirect("/users"),
        _ => redirect("/clients"),
    }
}
