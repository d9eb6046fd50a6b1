//! Churn Intelligence Server
//!
//! Loads the persisted artifacts once, then serves the churn form and API.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 CHURN INTELLIGENCE                   │
//! ├──────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌──────────────────────────────┐   │
//! │  │  Axum      │──►│  ChurnPredictor (Arc)        │   │
//! │  │  routes    │   │  encoder → classifier        │   │
//! │  └────────────┘   └──────────────┬───────────────┘   │
//! │                                  ▼                   │
//! │                      artifacts/ (read-only)          │
//! └──────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use churn_web::{config::Config, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    init_tracing(&config);

    tracing::info!("{} server starting ({})...", churn_core::constants::APP_NAME, config.environment);
    tracing::info!("Artifacts: model {}", config.artifacts.model.display());

    // Artifacts are loaded once; a failure here is fatal
    let predictor = churn_core::predictor::shared(&config.artifacts)
        .context("Failed to load model artifacts")?;

    tracing::info!(
        "Model ready: engine {}, {} features, geography {:?}",
        predictor.engine(),
        predictor.schema().width(),
        predictor.geography_categories()
    );

    let addr = config.addr();
    let state = AppState {
        predictor,
        config,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

fn init_tracing(config: &Config) {
    let default_filter = if config.is_production() {
        "churn_web=info,churn_core=info,tower_http=info"
    } else {
        "churn_web=debug,churn_core=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
