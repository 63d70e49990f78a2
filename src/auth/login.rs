use crate::{db, utils};
use async_redis_session::RedisSessionStore;
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Duration;
use config::Config;
use mongodb::Database;
use serde::Deserialize;
use tower_cookies::Cookies;
use tracing::debug;

#[derive(Deserialize, Debug)]
pub struct LoginUser {
    username: String,
    password: String,
    remember_me: Option<bool>,
}

pub async fn login_handler(
    Json(user): Json<LoginUser>,
    cookies: Cookies,
    Extension(config): Extension<Config>,
    Extension(mongo): Extension<Database>,
    Extension(session_store): Extension<RedisSessionStore>,
) -> impl IntoResponse {
    let data = db::find_user(&mongo, &user.username).await;

    match data {
        Some(data) => {
            let password_hash = data.get_str("password").unwrap();

            if utils::verify_password(&user.password, password_hash) {
                let ttl = if user.remember_me.eq(&Some(true)) {
                    Duration::days(config.get_int("session_long_ttl").unwrap_or(30))
                } else {
                    Duration::hours(config.get_int("session_ttl").unwrap_or(24))
                }
                .to_std()
                .unwrap();

                let session = utils::gen_session(&[("username", &user.username)], ttl);
                debug!("session issued for {}", user.username);

                let cookie =
                    utils::store_session_and_gen_cookie(session_store.clone(), session, ttl).await;
                cookies.add(cookie);

                (StatusCode::OK, utils::gen_response(0, "success"))
            } else {
                (
                    StatusCode::UNAUTHORIZED,
                    utils::gen_response(2, "wrong password"),
                )
            }
        }
        None => (
            StatusCode::UNAUTHORIZED,
            utils::gen_response(1, "no such user"),
        ),
    }
}
