//! # trailhead
//!
//! Request routing and dependency resolution for journey servers.
//!
//! A *journey* is a small frontend application registered with a central
//! registry. Its server answers two kinds of requests:
//!
//! - **Local assets** (`/app/main.js`, `/app/logo.svg`): files bundled with the
//!   journey, served straight from the public root.
//! - **Pages** (`/app/checkout`, `/app/index.html`): rendered with the
//!   dependency assets the registry resolves for the journey, fetched with a
//!   single gRPC call bounded by a 3 second deadline.
//!
//! Optional monitoring wraps the whole chain and switches itself off when its
//! credentials are missing or invalid.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use http::Method;
//! use trailhead::middleware::{self, JourneyAssets, LocalAssets, Observability};
//! use trailhead::{DependencyAssets, JourneyConfig, RegistryClient, Request, Response, Router, Server, health};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), trailhead::Error> {
//!     let journey = JourneyConfig::load("./journey.json")?;
//!     let registry = RegistryClient::new("localhost:50051", &journey)?;
//!
//!     let pipeline = middleware::journey(
//!         Observability::from_credentials(None, None),
//!         LocalAssets::new("/app"),
//!         JourneyAssets::new(registry.clone(), render),
//!     );
//!
//!     let app = Router::new()
//!         .on(Method::GET, "/healthz", health::liveness)
//!         .on(Method::GET, "/readyz", health::readiness(registry))
//!         .fallback(pipeline);
//!
//!     Server::bind("0.0.0.0:8080")?.serve(app).await
//! }
//!
//! async fn render(_req: Request, assets: DependencyAssets) -> Response {
//!     Response::text(assets.assets.join("\n"))
//! }
//! ```

mod classify;
mod config;
mod error;
mod handler;
mod render;
mod request;
mod resolver;
mod response;
mod router;
mod server;

pub mod assets;
pub mod health;
pub mod middleware;
pub mod pb;

pub use classify::{Classification, classify, classify_in};
pub use config::{Dependency, INDEX_PATH, JourneyConfig, PUBLIC_ROOT, Settings, env_or};
pub use error::{AssetError, ConfigError, Error, MonitorError, ResolveError};
pub use handler::{BoxFuture, Handler, JourneyHandler};
pub use pb::DependencyAssets;
pub use render::IndexPage;
pub use request::Request;
pub use resolver::{RESOLVE_TIMEOUT, RegistryClient};
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
