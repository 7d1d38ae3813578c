//! Axum server setup and router construction.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum::routing::post;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::api::{self, AppState};

/// Build the full axum router.
///
/// The router serves:
/// - `POST /summarize` — the summary endpoint
/// - `GET /summarize` — a fixed 405 with usage hints
/// - Optional static files for the manual test form
pub fn build_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    // CORS layer so the test form can be served from elsewhere during
    // development.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route(
            "/summarize",
            post(api::post_summarize).get(api::get_summarize),
        )
        .with_state(state)
        .layer(cors);

    // Serve the manual test form when a static directory is configured.
    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
}

/// Start the axum server and return the bound address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind(bind_addr).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}
