use axum::response::IntoResponse;

use crate::utils;

use super::LoggedUser;

pub async fn current_user_handler(user: LoggedUser) -> impl IntoResponse {
    utils::gen_response(0, &user.username)
}
