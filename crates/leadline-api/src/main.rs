//! Leadline CLI and REST API entry point.
//!
//! Binary name: `ldln`
//!
//! Parses CLI arguments, loads configuration, wires the generation
//! backends and turn service, then either serves the REST API or runs a
//! single turn from a request file.

mod cli;
mod http;
mod state;

use clap::Parser;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,leadline=debug",
        _ => "trace",
    };
    leadline_observe::init_tracing(filter, cli.otel).map_err(|e| anyhow::anyhow!("{e}"))?;

    let config = leadline_infra::config::load_config(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Serve { host, port } => {
            let state = AppState::init(&config)?;

            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, "Leadline API listening");

            let router = http::router::build_router(state.clone());

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            // Stop in-flight tool retrievals started by abandoned turns.
            state.cancel.cancel();
            tracing::info!("server stopped");
        }

        Commands::Respond { file } => {
            cli::respond::run(&config, &file).await?;
        }
    }

    leadline_observe::shutdown_tracing();
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
