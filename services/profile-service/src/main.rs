use anyhow::Context;
use axum::{Json, Router, http::StatusCode, routing::get};
use lt_chain_client::{AppConfig, Transport};
use lt_chain_rpc::HttpTransport;
use lt_contract::LinkRegistry;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

mod chain_config;
mod profile;

const SERVICE_NAME: &str = "profile-service";
const ENV_BIND_ADDR: &str = "PROFILE_SERVICE_ADDR";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Serialize)]
struct HealthResponse {
    service: &'static str,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct VersionResponse {
    service: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    error: String,
}

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);
pub(crate) type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Clone)]
pub(crate) struct AppState {
    config: Arc<AppConfig>,
    registry: Arc<LinkRegistry<Arc<dyn Transport>>>,
}

impl AppState {
    fn new(config: AppConfig, transport: Arc<dyn Transport>) -> Self {
        let registry = LinkRegistry::new(config.contract_address, transport);
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env().context("invalid linktree configuration")?;
    let transport = HttpTransport::from_network(&config.network);
    info!(
        rpc = transport.endpoint(),
        contract = %config.contract_address,
        chain_id = config.network.chain_id,
        "reading link registry"
    );
    let state = AppState::new(config, Arc::new(transport));

    let addr: SocketAddr = std::env::var(ENV_BIND_ADDR)
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
        .parse()
        .with_context(|| format!("{ENV_BIND_ADDR} must be a socket address"))?;
    info!("{SERVICE_NAME} listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .route("/chain/config", get(chain_config::chain_config))
        .route("/profile/{address}", get(profile::get_profile))
        .route("/profile/{address}/count", get(profile::get_link_count))
        .route("/profile/{address}/links/{index}", get(profile::get_link))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: SERVICE_NAME,
        status: "ok",
    })
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn error(status: StatusCode, message: String) -> ApiError {
    (status, Json(ErrorResponse { error: message }))
}

pub(crate) fn bad_request(message: &str) -> ApiError {
    error(StatusCode::BAD_REQUEST, message.to_owned())
}

pub(crate) fn not_found(message: &str) -> ApiError {
    error(StatusCode::NOT_FOUND, message.to_owned())
}

/// The chain node failed or answered something the contract bindings reject.
pub(crate) fn bad_gateway(err: impl std::fmt::Display) -> ApiError {
    error(StatusCode::BAD_GATEWAY, err.to_string())
}
