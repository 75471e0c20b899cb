use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use log::info;
use player_registry_app::Application;
use tower_http::catch_panic::CatchPanicLayer;

pub mod error;
mod players;

pub use players::{JsonPlayer, JsonPlayerBody, JsonPlayerQuery};

pub const DEFAULT_HOST: &str = "127.0.0.1";

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
}

#[derive(Debug, thiserror::Error)]
pub enum HttpApiConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} must be a valid u16, got {value}")]
    InvalidPort { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpApiConfig {
    pub host: String,
    pub port: u16,
    /// Empty when routes are mounted at the root.
    pub prefix: String,
}

impl HttpApiConfig {
    pub fn from_env() -> Result<Self, HttpApiConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, HttpApiConfigError> {
        let host = lookup("PLAYER_HTTP_API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = lookup("PLAYER_HTTP_API_PORT")
            .ok_or(HttpApiConfigError::Missing("PLAYER_HTTP_API_PORT"))?;
        let port = port
            .parse::<u16>()
            .map_err(|_| HttpApiConfigError::InvalidPort {
                name: "PLAYER_HTTP_API_PORT",
                value: port.clone(),
            })?;
        let prefix = normalize_prefix(&lookup("PLAYER_HTTP_API_PREFIX").unwrap_or_default());

        Ok(Self { host, port, prefix })
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

pub fn router(app: Arc<Application>, prefix: &str) -> Router {
    let routes: Router<AppState> = Router::new()
        .route(
            "/players",
            get(players::list_players).post(players::create_player),
        )
        .route("/players/count", get(players::count_players))
        .route(
            "/players/{id}",
            get(players::get_player)
                .post(players::update_player)
                .delete(players::delete_player),
        );

    // nesting at "" is rejected by axum
    let routes = if prefix.is_empty() {
        routes
    } else {
        Router::new().nest(prefix, routes)
    };

    routes
        .layer(CatchPanicLayer::new())
        .with_state(AppState { app })
}

pub async fn run(
    app: Arc<Application>,
    config: HttpApiConfig,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let router = router(app, &config.prefix);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;

    info!(
        "API server listening on {}:{}{}",
        config.host, config.port, config.prefix
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("HTTP API shut down gracefully");
    Ok(())
}
