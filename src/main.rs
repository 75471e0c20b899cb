use std::{process::ExitCode, sync::Arc};

use log::{error, info};
use player_registry_app::build_application;
use player_registry_persistence_sea_orm::{create_db_pool, players::PlayerRepositoryImpl};

use crate::config::{AppConfig, LogFileConfig};

mod config;
mod logs;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let log_file = LogFileConfig::from_lookup(|name| std::env::var(name).ok());
    if let Err(e) = logs::init_logger(log_file.as_ref()) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let db = match create_db_pool(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let player_repo = Arc::new(PlayerRepositoryImpl::new(db));
    let app = Arc::new(build_application(player_repo));

    info!("Starting application");

    if let Err(e) = player_registry_http_api::run(app, config.http, shutdown_signal()).await {
        error!("HTTP API failed: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
