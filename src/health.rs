//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? |
//! | **Readiness** | `/readyz` | Can this journey render pages, i.e. is the registry reachable? |
//!
//! ```rust,no_run
//! use http::Method;
//! use trailhead::{JourneyConfig, RegistryClient, Router, health};
//!
//! # fn build(journey: JourneyConfig) -> Result<Router, trailhead::Error> {
//! let registry = RegistryClient::new("registry:50051", &journey)?;
//! let app = Router::new()
//!     .on(Method::GET, "/healthz", health::liveness)
//!     .on(Method::GET, "/readyz", health::readiness(registry));
//! # Ok(app)
//! # }
//! ```

use http::StatusCode;
use tracing::debug;

use crate::handler::Handler;
use crate::request::Request;
use crate::resolver::RegistryClient;
use crate::response::Response;

/// Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// `200 OK` with body `"ready"` while the registry accepts connections,
/// `503 Service Unavailable` otherwise. Page requests would fail with `500`
/// in that state, so the instance should not receive traffic.
pub fn readiness(registry: RegistryClient) -> impl Handler {
    move |_req: Request| {
        let registry = registry.clone();
        async move {
            match registry.probe().await {
                Ok(()) => Response::text("ready"),
                Err(e) => {
                    debug!("readiness probe failed: {e}");
                    Response::error(StatusCode::SERVICE_UNAVAILABLE, "registry unreachable")
                }
            }
        }
    }
}
