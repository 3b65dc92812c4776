//! Radiation Dose API entry point.
//!
//! Startup order matters: configuration and the factor dataset are
//! validated before the listener binds, so the service never serves
//! traffic from a degraded state.

use std::time::Duration;

use http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use radiation_dose_api::adapters::http::{dose_router, DoseAppState};
use radiation_dose_api::config::AppConfig;
use radiation_dose_api::domain::dose::FactorLibrary;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server.log_level);

    let factors = match &config.factors.dataset_path {
        Some(path) => {
            tracing::info!(path = %path, "Loading factor dataset from file");
            FactorLibrary::from_path(path)?
        }
        None => FactorLibrary::embedded()?,
    };
    tracing::info!("ICRP 103 factor dataset loaded and validated");

    let state = DoseAppState::new(factors);
    let app = dose_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config)?);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "Starting radiation dose API");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();
}

fn cors_layer(config: &AppConfig) -> Result<CorsLayer, http::header::InvalidHeaderValue> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }
    let parsed = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(parsed)))
}
