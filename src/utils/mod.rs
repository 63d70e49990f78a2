use std::time::Duration;

use argon2::{self, Config};
use async_redis_session::RedisSessionStore;
use async_session::{Session, SessionStore};
use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_cookies::Cookie;

pub const LOGIN_ROUTE: &str = "/api/auth/login";

pub fn verify_password(password: &str, hash: &str) -> bool {
    argon2::verify_encoded(hash, password.as_bytes()).eq(&Ok(true))
}

pub fn hash_password(password: &str) -> String {
    let config = Config::default();
    let salt: [u8; 16] = rand::random();
    argon2::hash_encoded(password.as_bytes(), &salt, &config).unwrap()
}

pub fn gen_response(code: u32, msg: impl Serialize) -> Json<Value> {
    Json(json!({
        "code": code,
        "msg": msg
    }))
}

pub fn login_redirect() -> (StatusCode, HeaderMap, Json<Value>) {
    let mut headers = HeaderMap::new();
    headers.insert(header::LOCATION, HeaderValue::from_static(LOGIN_ROUTE));
    (
        StatusCode::SEE_OTHER,
        headers,
        gen_response(0, "redirect to login"),
    )
}

pub fn gen_session(pairs: &[(&str, &str)], ttl: Duration) -> Session {
    let mut session = Session::new();
    for (key, value) in pairs {
        session.insert(key, value).unwrap();
    }
    session.expire_in(ttl);

    session
}

pub async fn store_session_and_gen_cookie(
    store: RedisSessionStore,
    session: Session,
    ttl: Duration,
) -> Cookie<'static> {
    let cookie = store.store_session(session).await.unwrap().unwrap();
    let mut cookie = Cookie::new("session_id", cookie);
    cookie.set_max_age(time::Duration::try_from(ttl).unwrap());
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_password_roundtrip() {
        let password = "correct horse battery";

        let hashed_password = hash_password(password);

        assert!(verify_password(password, &hashed_password));
        assert!(!verify_password("wrong horse battery", &hashed_password));
    }

    #[test]
    fn test_hash_salted_per_call() {
        let password = "correct horse battery";

        assert_ne!(hash_password(password), hash_password(password));
    }

    #[test]
    fn test_gen_response() {
        let Json(body) = gen_response(1, "no such user");

        assert_eq!(body, json!({"code": 1, "msg": "no such user"}));
    }

    #[test]
    fn test_login_redirect() {
        let response = login_redirect().into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            LOGIN_ROUTE
        );
    }

    #[test]
    fn test_gen_session() {
        let session = gen_session(&[("username", "alice")], Duration::from_secs(60));

        assert_eq!(session.get::<String>("username").unwrap(), "alice");
        assert!(session.expiry().is_some());
    }
}
