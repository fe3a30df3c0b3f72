use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{delete, get, post, routes, Build, Rocket, State};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use crate::reporter;
use crate::store::Store;

// Every handler bumps the request counter exactly once, before doing anything
// else, so failed requests are counted too.

#[post("/data", data = "<body>")]
async fn post_data(body: String, store: &State<Arc<Store>>) -> Result<Status, Custom<String>> {
    store.bump_requests().await;
    let entries: HashMap<String, String> = serde_json::from_str(&body).map_err(|_| {
        Custom(
            Status::BadRequest,
            String::from("invalid JSON: expected an object of string to string"),
        )
    })?;
    store
        .insert(entries)
        .await
        .map(|_| Status::Created)
        .map_err(|e| Custom(Status::BadRequest, e.to_string()))
}

#[get("/data")]
async fn get_data(store: &State<Arc<Store>>) -> Json<HashMap<String, String>> {
    store.bump_requests().await;
    Json(store.snapshot().await)
}

#[get("/stats")]
async fn get_stats(store: &State<Arc<Store>>) -> Json<serde_json::Value> {
    // Reports the number of requests handled before this one.
    let handled = store.bump_requests().await;
    Json(serde_json::json!({ "requests": handled }))
}

#[delete("/data/<key>")]
async fn delete_data(key: &str, store: &State<Arc<Store>>) -> Result<(), Custom<String>> {
    store.bump_requests().await;
    store
        .delete(key)
        .await
        .map_err(|e| Custom(Status::NotFound, e.to_string()))
}

#[derive(Clone)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    /// Seconds between status report log lines.
    pub report_interval: u64,
    /// Seconds allowed for in-flight requests to finish on shutdown.
    pub shutdown_grace: u32,
}

pub struct ServerNode {
    store: Arc<Store>,
    config: ServerConfig,
}

impl ServerNode {
    pub fn new(config: ServerConfig) -> Self {
        ServerNode {
            store: Arc::new(Store::new()),
            config,
        }
    }

    /// Assembles the rocket instance: managed store, mounted routes, the
    /// status reporter, and shutdown bounded by the configured grace period.
    /// Rocket stops accepting connections on SIGINT/SIGTERM, drains in-flight
    /// requests within the grace window, and force-closes stragglers.
    pub fn build(&self) -> Rocket<Build> {
        let mut rocket_config = rocket::Config {
            address: self.config.address,
            port: self.config.port,
            ..rocket::Config::default()
        };
        rocket_config.shutdown.grace = self.config.shutdown_grace;
        #[cfg(unix)]
        {
            rocket_config.shutdown.signals.insert(rocket::config::Sig::Term);
        }

        rocket::custom(rocket_config)
            .manage(self.store.clone())
            .attach(reporter::fairing(self.config.report_interval))
            .mount("/", routes![post_data, get_data, get_stats, delete_data])
    }
}
