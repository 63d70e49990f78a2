use auth_backend::{auth, config, db, home, user};
use axum::{
    extract::Extension,
    http::{header, Method},
    Router,
};
use std::net::SocketAddr;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::{CorsLayer, Origin};
use tracing::debug;
use tracing_subscriber::fmt;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    fmt::init();
    debug!("start");

    let config = config::get_config();
    let port = config.get_int("port").unwrap_or(3001) as u16;
    let mongo = db::get_mongo_client().await.database("auth-app");
    let session_store = db::get_redis_store();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_origin(Origin::list(vec![
            "http://127.0.0.1:3000".parse().unwrap(),
            "http://127.0.0.1".parse().unwrap(),
        ]))
        .allow_headers(vec![header::CONTENT_TYPE])
        .allow_credentials(true);

    let app = Router::new().nest("/auth", auth::get_router());
    let app = app.merge(Router::new().nest("/user", user::get_router()));
    let app = app.merge(Router::new().nest("/home", home::get_router()));

    let app = Router::new()
        .nest("/api", app)
        .layer(CookieManagerLayer::new())
        .layer(cors)
        .layer(Extension(config))
        .layer(Extension(mongo))
        .layer(Extension(session_store));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap()
}
