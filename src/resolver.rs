//! Dependency resolution against the journey registry.
//!
//! Every journey page request asks the registry for the journey's dependency
//! assets. The call sits on the hot path of page rendering, so it is bounded:
//! one attempt, [`RESOLVE_TIMEOUT`] from the moment resolution begins, no
//! retries. A slow or hung registry costs each request at most that long.
//!
//! Each resolution dials its own channel. The channel and the deadline timer
//! are owned by [`RegistryClient::resolve`] and dropped on every return path,
//! including timeouts, which also cancels the in-flight call.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tonic::transport::{Channel, Endpoint};
use tonic::Code;
use tracing::{Instrument, Span, debug, info_span, warn};

use crate::config::JourneyConfig;
use crate::error::{ConfigError, ResolveError};
use crate::pb::journey::v1::explorer_client::ExplorerClient;
use crate::pb::{DependencyAssets, Journey};

/// Budget for one resolution, dial included.
pub const RESOLVE_TIMEOUT: Duration = Duration::from_secs(3);

/// Resolves a journey's dependency assets from the registry.
///
/// Cheap to clone: the journey message is built once and shared.
#[derive(Clone, Debug)]
pub struct RegistryClient {
    address: Arc<str>,
    journey: Arc<Journey>,
    timeout: Duration,
    span: Span,
}

impl RegistryClient {
    /// Creates a client for `address` (`host:port` or a full `http://` URI)
    /// carrying `journey`. The config is validated here; an invalid config is
    /// a startup error.
    pub fn new(address: impl Into<String>, journey: &JourneyConfig) -> Result<Self, ConfigError> {
        journey.validate()?;
        let address = normalize(address.into());
        let span = info_span!("registry", address = %address, journey = %journey.name);
        Ok(Self {
            address: address.into(),
            journey: Arc::new(Journey::from(journey)),
            timeout: RESOLVE_TIMEOUT,
            span,
        })
    }

    /// Overrides the resolution budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn address(&self) -> &str { &self.address }
    pub fn timeout(&self) -> Duration { self.timeout }
    pub fn journey(&self) -> &Journey { &self.journey }

    /// Issues a single `GetDependencies` call for this journey.
    pub async fn resolve(&self) -> Result<DependencyAssets, ResolveError> {
        let deadline = Instant::now() + self.timeout;
        async {
            let channel = self.dial().await?;
            let mut client = ExplorerClient::new(channel);

            let mut request = tonic::Request::new(Journey::clone(&self.journey));
            request.set_timeout(deadline.saturating_duration_since(Instant::now()));

            let result = match tokio::time::timeout_at(deadline, client.get_dependencies(request)).await {
                Ok(Ok(response)) => Ok(response.into_inner()),
                // The registry enforces the propagated deadline too and may
                // report it first.
                Ok(Err(status))
                    if status.code() == Code::DeadlineExceeded || Instant::now() >= deadline =>
                {
                    Err(ResolveError::Timeout(self.timeout))
                }
                Ok(Err(status)) => Err(ResolveError::Call(status)),
                Err(_elapsed) => Err(ResolveError::Timeout(self.timeout)),
            };

            match &result {
                Ok(assets) => debug!(assets = assets.assets.len(), "dependencies resolved"),
                Err(e) => warn!("dependency resolution failed: {e}"),
            }
            result
        }
        .instrument(self.span.clone())
        .await
    }

    /// Checks that the registry accepts connections, without calling it.
    pub async fn probe(&self) -> Result<(), ResolveError> {
        self.dial().await.map(drop)
    }

    async fn dial(&self) -> Result<Channel, ResolveError> {
        let endpoint = Endpoint::from_shared(self.address.to_string())
            .map_err(ResolveError::Dial)?
            .connect_timeout(self.timeout);
        endpoint.connect().await.map_err(ResolveError::Dial)
    }
}

/// Registry addresses are usually configured as `host:port`.
fn normalize(address: String) -> String {
    if address.contains("://") {
        address
    } else {
        format!("http://{address}")
    }
}
