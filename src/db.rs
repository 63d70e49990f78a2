use async_redis_session::RedisSessionStore;
use bson::{doc, Document};
use dotenv::dotenv;
use futures::stream::StreamExt;
use mongodb::{options::FindOptions, Client, Database};
use std::{env, error::Error};
use tracing::debug;

pub fn get_redis_store() -> RedisSessionStore {
    dotenv().ok();

    let redis_url = env::var("REDIS_URL").expect("REDIS_URL must be set");

    RedisSessionStore::new(redis_url).unwrap()
}

pub async fn get_mongo_client() -> Client {
    dotenv().ok();

    let mongo_url = env::var("MONGO_URL").expect("MONGO_URL must be set");

    Client::with_uri_str(mongo_url).await.unwrap()
}

/// Full user document, password hash included. Auth paths only,
/// never serialized into a response.
pub async fn find_user(mongo: &Database, username: &str) -> Option<Document> {
    let res = mongo
        .collection::<Document>("users")
        .find_one(
            doc! {
                "username": username
            },
            None,
        )
        .await
        .expect("database error");
    debug!("{:?}", res);
    res
}

/// All users with the password hash and object id projected out.
pub async fn list_users(mongo: &Database) -> Vec<Document> {
    let cursor = mongo
        .collection::<Document>("users")
        .find(
            None,
            FindOptions::builder()
                .projection(doc! {
                    "password": 0,
                    "_id": 0
                })
                .sort(doc! {
                    "username": 1
                })
                .build(),
        )
        .await
        .expect("database error");
    cursor.map(|document| document.unwrap()).collect().await
}

pub async fn insert_user(mongo: &Database, user: Document) -> Result<(), Box<dyn Error>> {
    let res = mongo
        .collection::<Document>("users")
        .insert_one(user, None)
        .await;
    match res {
        Ok(_) => Ok(()),
        Err(e) => Err(e)?,
    }
}
