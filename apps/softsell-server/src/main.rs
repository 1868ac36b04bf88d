//! SoftSell API Server
//!
//! Serves the dynamic parts of the SoftSell landing page:
//!
//! - Contact form intake (validated server-side with the same rules as the browser)
//! - Support chat, answered by an OpenAI-compatible backend when a credential
//!   is configured, otherwise by the scripted knowledge table
//! - License type and suggested question lists
//!
//! Rate limiting is per client IP via tower-governor.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use softsell_core::chat::is_demo_credential;
use softsell_core::{ChatBackend, KnowledgeBase, MockBackend, ResponseResolver};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod openai;
#[cfg(test)]
mod tests;

use api::{
    handle_chat, handle_chat_suggestions, handle_contact, handle_health, handle_license_types,
};
use openai::OpenAiBackend;

/// Command-line arguments for the SoftSell server
#[derive(Parser, Debug)]
#[command(name = "softsell-server")]
#[command(about = "SoftSell API server for contact intake and support chat")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// API key for the chat backend. Unset or "mock-api-key" runs the chat in demo mode
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Chat model name
    #[arg(long, env = "OPENAI_MODEL", default_value = openai::DEFAULT_MODEL)]
    openai_model: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = openai::DEFAULT_BASE_URL)]
    openai_base_url: String,

    /// Sampling temperature for the chat backend
    #[arg(long, default_value_t = openai::DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Delay before a scripted (demo mode) chat reply, in milliseconds
    #[arg(long, default_value = "1000")]
    thinking_delay_ms: u64,

    /// Simulated contact form processing time, in milliseconds
    #[arg(long, default_value = "1000")]
    submit_delay_ms: u64,

    /// JSON file overriding the built-in chat knowledge table
    #[arg(long)]
    knowledge_base: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Answers chat turns; scripted or live
    pub backend: Arc<dyn ChatBackend>,
    /// Simulated contact form request time
    pub submit_delay: Duration,
}

/// Routes without rate limiting or connection-level middleware
pub fn app_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handle_health))
        // Contact form
        .route("/api/license-types", get(handle_license_types))
        .route("/api/contact", post(handle_contact))
        // Support chat
        .route("/api/chat", post(handle_chat))
        .route("/api/chat/suggestions", get(handle_chat_suggestions))
        .with_state(state)
}

fn load_knowledge_base(path: Option<&PathBuf>) -> anyhow::Result<KnowledgeBase> {
    let Some(path) = path else {
        return Ok(KnowledgeBase::softsell());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read knowledge base {}", path.display()))?;
    let kb = KnowledgeBase::from_json(&json)
        .with_context(|| format!("Invalid knowledge base {}", path.display()))?;
    info!("Loaded {} knowledge entries from {}", kb.len(), path.display());
    Ok(kb)
}

fn build_backend(args: &Args) -> anyhow::Result<Arc<dyn ChatBackend>> {
    if is_demo_credential(args.openai_api_key.as_deref()) {
        let kb = load_knowledge_base(args.knowledge_base.as_ref())?;
        info!("No chat credential configured, using scripted replies (demo mode)");
        let backend = MockBackend::new(ResponseResolver::new(kb))
            .with_delay(Duration::from_millis(args.thinking_delay_ms));
        return Ok(Arc::new(backend));
    }

    if args.knowledge_base.is_some() {
        warn!("--knowledge-base is ignored when a chat credential is configured");
    }

    let api_key = args.openai_api_key.clone().unwrap_or_default();
    let backend = OpenAiBackend::new(api_key)
        .with_model(&args.openai_model)
        .with_base_url(&args.openai_base_url)
        .with_temperature(args.temperature);
    info!(
        "Chat backend: {} via {}",
        args.openai_model, args.openai_base_url
    );
    Ok(Arc::new(backend))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SoftSell server on {}:{}", args.host, args.port);

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .context("Failed to create rate limiter config")?,
    );

    let state = AppState {
        backend: build_backend(&args)?,
        submit_delay: Duration::from_millis(args.submit_delay_ms),
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = app_router(state)
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);

    // The rate limiter keys on the peer address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
