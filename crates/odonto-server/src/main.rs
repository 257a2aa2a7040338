//! odonto-server binary.
//!
//! # Commands
//!
//! - `serve` (default) - run the HTTP service
//! - `register-patient` - provision a patient row and print its id

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use odonto_core::OdontoConfig;
use odonto_engine::OdontogramEngine;
use odonto_server::telemetry::init_tracing;
use odonto_server::{build_router, AppState, TokenDirectory};

/// Append-only odontogram event log over HTTP.
#[derive(Parser)]
#[command(name = "odonto-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(global = true, short, long)]
    config: Option<PathBuf>,

    /// Override the configured listen address
    #[arg(global = true, short, long)]
    bind: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve,

    /// Register a patient so events can be recorded for it
    RegisterPatient {
        /// Patient uuid
        uuid: String,

        /// Owning institution
        #[arg(short, long)]
        institution: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = OdontoConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }
    init_tracing(&config.observability);

    let engine = OdontogramEngine::from_config(&config).context("opening storage")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config, engine).await,
        Commands::RegisterPatient { uuid, institution } => {
            let id = engine
                .storage()
                .register_patient(&uuid, institution)
                .await
                .context("registering patient")?;
            println!("{id}");
            Ok(())
        }
    }
}

async fn serve(config: OdontoConfig, engine: OdontogramEngine) -> anyhow::Result<()> {
    let auth = TokenDirectory::from_config(&config.auth);
    if auth.is_empty() {
        tracing::warn!("no bearer tokens configured; every protected route will answer 401");
    }

    let addr = config.server.bind_addr.clone();
    let app = build_router(AppState::new(engine, auth, config.server));
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving")?;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
