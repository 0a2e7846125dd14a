// Main entry point - Console construction and preview server setup
use std::{net::SocketAddr, sync::Arc};

use tracing_subscriber::EnvFilter;

use visual_console::application::click_sink::TracingSink;
use visual_console::application::console::Console;
use visual_console::infrastructure::config::{load_app_config, load_console_definition};
use visual_console::infrastructure::dom::Dom;
use visual_console::presentation::app_state::AppState;
use visual_console::presentation::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_app_config()?;

    // Initialize tracing; RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Build the console from its raw definition
    let definition = load_console_definition(&config.console.definition)?;
    let mut dom = Dom::new();
    let surface = dom.create_element("div");
    dom.add_class(surface, "visual-console-container");
    let console = Console::from_definition(
        &mut dom,
        surface,
        &definition.console,
        &definition.items,
        Arc::new(TracingSink),
    )?;
    tracing::info!(
        console_id = console.props().id,
        items = console.len(),
        skipped = console.diagnostics().len(),
        "Visual console built"
    );

    let state = Arc::new(AppState::new(dom, console));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!(%addr, "Starting visual-console preview");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Tear the console down once the server has drained
    state.dispose()?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
