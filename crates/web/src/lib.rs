pub use crate::common::RouteResult;

use std::env;

use axum::{extract::FromRef, Router};
use database::SqliteDatabase;
use log::info;
use registry::client::Client;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod common;
pub mod validation;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

#[derive(Clone, FromRef)]
pub struct WebState {
    pub device_client: Client<SqliteDatabase>,
}

impl WebState {
    pub fn new(database: SqliteDatabase) -> Self {
        Self {
            device_client: Client::new(database),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub bind_address: String,
}

impl WebConfig {
    /// Reads `WEB_BIND_ADDRESS`, defaulting to `0.0.0.0:8080`.
    pub fn from_env() -> Self {
        let bind_address = env::var("WEB_BIND_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_owned());
        Self { bind_address }
    }
}

/// The complete http surface, ready to be served or driven directly in tests.
pub fn router(state: WebState) -> Router {
    api::routes(state).layer(TraceLayer::new_for_http())
}

pub async fn start_web_server(state: WebState, config: WebConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(&config.bind_address).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state).into_make_service()).await?;

    Ok(())
}
