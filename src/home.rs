use axum::{response::IntoResponse, routing, Router};
use serde_json::json;

use crate::utils;

/// Public landing page, same body regardless of session state.
pub async fn home_handler() -> impl IntoResponse {
    utils::gen_response(
        0,
        json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        }),
    )
}

pub fn get_router() -> Router {
    Router::new().route("/", routing::get(home_handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_home_is_public() {
        let response = home_handler().await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
