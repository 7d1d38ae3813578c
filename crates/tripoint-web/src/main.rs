//! Three-point business strategy summary service.
//!
//! # Usage
//!
//! ```bash
//! OPENAI_API_KEY=sk-... cargo run -p tripoint-web
//! OPENAI_API_KEY=sk-... cargo run -p tripoint-web -- --model gpt-4o-mini
//! OPENAI_API_KEY=sk-... cargo run -p tripoint-web -- --port 8080
//! ```
//!
//! Then open the printed URL for the manual test form, or call the API
//! directly:
//!
//! ```bash
//! curl -X POST http://127.0.0.1:3000/summarize \
//!   -H 'Content-Type: application/json' \
//!   -d '{"topic": "direct-to-consumer coffee brands"}'
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::warn;
use tripoint_rs::summary::Summarizer;
use tripoint_rs::{DEFAULT_MODEL, OpenAiClient};
use tripoint_web::{AppState, WebConfig, spawn_web};

/// Serve three-point business strategy summaries over HTTP.
#[derive(Parser)]
#[command(name = "tripoint-web")]
struct Args {
    /// Port to bind.
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Chat model to use. Falls back to $OPENAI_MODEL, then the built-in
    /// default.
    #[arg(long)]
    model: Option<String>,

    /// Directory with the static test form.
    #[arg(long, default_value = "crates/tripoint-web/static")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let model = args
        .model
        .or_else(|| std::env::var("OPENAI_MODEL").ok())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // Explicit client, constructed once at process start. When the key is
    // missing the server still runs so the endpoint can report the
    // configuration error.
    let summarizer = match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => {
            let client = OpenAiClient::new(key).map_err(|e| e.to_string())?;
            Some(Arc::new(Summarizer::new(Arc::new(client), model)))
        }
        _ => {
            warn!("OPENAI_API_KEY is not set; POST /summarize will answer 500");
            None
        }
    };

    let static_dir = args.static_dir.is_dir().then(|| args.static_dir.clone());
    if static_dir.is_none() {
        warn!(
            "static dir {} not found; serving the API endpoint only",
            args.static_dir.display()
        );
    }

    let config = WebConfig {
        bind_addr: ([127, 0, 0, 1], args.port).into(),
        static_dir,
    };
    let addr = spawn_web(AppState { summarizer }, config).await;
    println!("tripoint listening on http://{addr}");
    println!("POST /summarize with {{\"topic\": \"...\"}} or open the URL for the test form");

    // The listener runs on a background task; park main until interrupted.
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to wait for shutdown signal: {e}"))?;
    Ok(())
}
