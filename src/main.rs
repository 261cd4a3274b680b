use clap::Parser;
use munchmatch::{
    api::{handlers::AppState, routes},
    backend::BackendClient,
    cli::{Cli, Commands},
    config::Settings,
    Error, Result,
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,munchmatch=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let settings = Settings::from_env()?;
    settings.validate()?;

    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Search {
            image,
            description,
            num_recipes,
        } => {
            munchmatch::cli::commands::search(
                &settings.server_url(),
                image.as_deref(),
                description,
                num_recipes,
            )
            .await?;
        }
    }

    Ok(())
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }
    settings.validate()?;

    info!("Starting MunchMatch server");
    info!("Backend: {}", settings.backend.url);
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    let backend = BackendClient::new(&settings.backend)?;
    info!(
        "Backend client initialized (timeout: {}s)",
        settings.backend.timeout_seconds
    );

    let state = AppState {
        backend,
        settings: settings.clone(),
    };

    let app = routes::create_router(state, &settings);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("MunchMatch");
    println!("========================================");
    println!("Address: http://{addr}");
    println!("Backend: {}", settings.backend.url);
    println!("\nEndpoints:");
    println!("  GET  /");
    println!("  POST /search");
    println!("  POST /api/search");
    println!("  GET  /health");
    println!("  GET  /ready");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}
