//! Headless API server entrypoint.

use std::sync::Arc;

use linkdock_core::config::env_flag_enabled;
use linkdock_server::{config::Config, db::Database, resolve_bind_address, serve_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linkdock=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" => {
                print_help();
                return Ok(());
            }
            value => {
                anyhow::bail!(
                    "Unknown argument: '{}'. Use --help to see supported options.",
                    value
                );
            }
        }
    }

    let config = Config::from_env();

    if config.admin_key.is_none() {
        tracing::warn!("ADMIN_KEY is not set - admin endpoints will reject every request");
    }

    let database = Database::new(&config.db_path)?;
    let state = AppState::new(config, database);

    let allow_public = env_flag_enabled("ALLOW_PUBLIC_ACCESS");
    if allow_public {
        tracing::warn!("Public access enabled - server will accept requests from any origin");
    }

    let bind_addr = resolve_bind_address(&state.config, allow_public);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("linkdock running at http://{}", bind_addr);

    let db = state.db.clone();
    serve_router(listener, state, allow_public, shutdown_signal(db)).await?;

    Ok(())
}

fn print_help() {
    println!("linkdock API server\n");
    println!("Usage: linkdock [OPTIONS]\n");
    println!("Options:");
    println!("  --help            Show this help message");
    println!("\nEnvironment variables:");
    println!("  DB_PATH           Database path (default: ~/.cache/linkdock/db)");
    println!("  PORT              Server port (default: 38412)");
    println!("  ADMIN_KEY         Bearer secret for admin endpoints (unset denies all)");
    println!("  MAX_BODY_SIZE     Maximum request body size in bytes (default: 1MB)");
    println!("  ALLOW_PUBLIC_ACCESS  Allow CORS from any origin and non-loopback binds");
    println!("  BIND              Override bind address (e.g. 0.0.0.0:38412)");
}

async fn shutdown_signal(db: Arc<Database>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down gracefully...");

    if let Err(err) = db.flush() {
        tracing::error!("Failed to flush database: {}", err);
    } else {
        tracing::info!("Database flushed successfully");
    }
}
