// Quill - streaming two-agent prompt optimizer
// Main entry point

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};

use quill::config::load_settings;
use quill::providers::build_bindings;
use quill::server::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win over it
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("quill=info,tower_http=info")
            }),
        )
        .init();

    // Load configuration
    let settings = load_settings();
    let addr: SocketAddr = settings
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind address: {}", settings.bind_address))?;

    // Build the three role bindings (coordinator, drafter, critic)
    let bindings = build_bindings(&settings)?;
    for binding in bindings.all() {
        tracing::info!(
            role = binding.name,
            provider = binding.client.provider(),
            model = binding.client.model(),
            status = ?binding.status,
            "Role binding configured"
        );
    }

    let state = Arc::new(AppState::new(bindings, &settings));
    let app = create_router(state);

    tracing::info!("Starting quill server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
