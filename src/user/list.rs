use axum::{extract::Extension, http::StatusCode, response::IntoResponse};
use mongodb::Database;

use crate::{auth::LoggedUser, db, utils};

pub async fn index_handler(
    _user: LoggedUser,
    Extension(mongo): Extension<Database>,
) -> impl IntoResponse {
    let users = db::list_users(&mongo).await;

    (StatusCode::OK, utils::gen_response(0, users))
}
