//! HTTP surface for tripoint: three-point business strategy summaries.
//!
//! `tripoint-web` exposes one JSON endpoint, `POST /summarize`, backed by
//! the [`Summarizer`](tripoint_rs::summary::Summarizer) from `tripoint-rs`,
//! plus an optional static manual test form.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use tripoint_rs::OpenAiClient;
//! use tripoint_rs::summary::Summarizer;
//! use tripoint_web::{AppState, WebConfig, spawn_web};
//!
//! let client = OpenAiClient::new(api_key)?;
//! let summarizer = Arc::new(Summarizer::with_default_model(Arc::new(client)));
//!
//! let addr = spawn_web(
//!     AppState { summarizer: Some(summarizer) },
//!     WebConfig::default(),
//! )
//! .await;
//! println!("listening on http://{addr}");
//! ```
//!
//! # Architecture
//!
//! ```text
//! POST /summarize ──▶ validate topic ──▶ Summarizer ──▶ extract points ──▶ JSON
//!                        │ 400                │ ApiError
//!                        ▼                    ▼
//!                   error payload      429 / 500 mapping
//! ```
//!
//! Requests are independent and stateless: the handler suspends on one
//! outbound completion call and relays either a full three-point summary or
//! an error payload — never a partial result.

mod api;
mod server;

pub use api::AppState;

use std::net::SocketAddr;
use std::path::PathBuf;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:3000`.
    pub bind_addr: SocketAddr,
    /// Directory with the static test form.
    ///
    /// If `None`, only the API endpoint is served.
    pub static_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: None,
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// The server runs until the Tokio runtime shuts down.
pub async fn spawn_web(state: AppState, config: WebConfig) -> SocketAddr {
    let router = server::build_router(state, config.static_dir);
    server::start_server(router, config.bind_addr).await
}
