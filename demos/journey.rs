//! A complete journey server.
//!
//! Run with:
//!   RUST_LOG=info JOURNEY_CONFIG=./journey.json REGISTRY_URL=localhost:50051 \
//!     cargo run --example journey
//!
//! Expects `./public/index.html` plus any bundled assets under `./public`.
//! Set MONITOR_APP_NAME and MONITOR_LICENSE_KEY to enable monitoring.
//!
//! Try:
//!   curl http://localhost:8080/healthz
//!   curl http://localhost:8080/readyz
//!   curl http://localhost:8080/main.js
//!   curl http://localhost:8080/checkout

use http::Method;
use trailhead::middleware::{self, JourneyAssets, LocalAssets, Observability};
use trailhead::{
    INDEX_PATH, IndexPage, JourneyConfig, PUBLIC_ROOT, RegistryClient, Router, Server, Settings,
    env_or, health,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env();
    let journey = JourneyConfig::load(&settings.journey_config)?;
    let registry = RegistryClient::new(&settings.registry, &journey)?;
    let index = IndexPage::load(env_or("INDEX_PATH", INDEX_PATH)).await?;

    let pipeline = middleware::journey(
        Observability::from_credentials(
            settings.monitor_app_name.as_deref(),
            settings.monitor_license_key.as_deref(),
        ),
        LocalAssets::new(&settings.path_prefix).with_root(env_or("PUBLIC_ROOT", PUBLIC_ROOT)),
        JourneyAssets::new(registry.clone(), index.handler()),
    );

    let app = Router::new()
        .on(Method::GET, "/healthz", health::liveness)
        .on(Method::GET, "/readyz", health::readiness(registry))
        .fallback(pipeline);

    Server::bind(&settings.listen)?.serve(app).await?;
    Ok(())
}
