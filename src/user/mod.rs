pub mod list;
pub mod register;

use axum::{routing, Router};

pub fn get_router() -> Router {
    Router::new()
        .route("/", routing::get(list::index_handler))
        .route(
            "/register",
            routing::get(register::form_handler).post(register::register_handler),
        )
}
