//! Optional monitoring.
//!
//! Monitoring must never stop a journey from serving. [`Optional`] wraps any
//! stage whose construction can fail: on failure it logs a warning once, at
//! construction, and then forwards every request untouched.
//!
//! ```rust,no_run
//! use trailhead::middleware::Observability;
//!
//! // Missing or bad credentials give a pass-through, never an error.
//! let observe = Observability::from_credentials(Some("checkout"), None);
//! assert!(!observe.is_active());
//! ```

use std::fmt::Display;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tracing::{Instrument, field, info, info_span, warn};

use super::{BoxFuture, Middleware, Next};
use crate::error::MonitorError;
use crate::request::Request;

/// Required license key length.
pub const LICENSE_KEY_LEN: usize = 40;

/// Credentials for the monitoring integration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    pub app_name: String,
    pub license_key: String,
}

/// Records every request as a transaction: a `transaction` span around the
/// rest of the pipeline plus request, error and latency counters.
#[derive(Clone, Debug)]
pub struct Monitor {
    app_name: Arc<str>,
    stats: Arc<Stats>,
}

#[derive(Debug, Default)]
struct Stats {
    requests: AtomicU64,
    errors: AtomicU64,
    total_micros: AtomicU64,
}

/// Point-in-time view of a [`Monitor`]'s counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub requests: u64,
    /// Responses with a 5xx status.
    pub errors: u64,
    pub total_time: Duration,
}

impl Monitor {
    pub fn connect(credentials: &Credentials) -> Result<Self, MonitorError> {
        let app_name = credentials.app_name.trim();
        if app_name.is_empty() {
            return Err(MonitorError::MissingAppName);
        }
        let key_len = credentials.license_key.chars().count();
        if key_len != LICENSE_KEY_LEN {
            return Err(MonitorError::LicenseLength { expected: LICENSE_KEY_LEN, actual: key_len });
        }

        Ok(Self { app_name: app_name.into(), stats: Arc::default() })
    }

    pub fn app_name(&self) -> &str { &self.app_name }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            requests: self.stats.requests.load(Ordering::Relaxed),
            errors: self.stats.errors.load(Ordering::Relaxed),
            total_time: Duration::from_micros(self.stats.total_micros.load(Ordering::Relaxed)),
        }
    }
}

impl Middleware for Monitor {
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        let span = info_span!(
            "transaction",
            app = %self.app_name,
            name = %req.path(),
            status = field::Empty,
        );
        let stats = Arc::clone(&self.stats);

        Box::pin(async move {
            let start = Instant::now();
            let res = next.run(req).instrument(span.clone()).await;
            let elapsed = start.elapsed();

            span.record("status", res.status_code().as_u16());
            stats.requests.fetch_add(1, Ordering::Relaxed);
            if res.status_code().is_server_error() {
                stats.errors.fetch_add(1, Ordering::Relaxed);
            }
            let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
            stats.total_micros.fetch_add(micros, Ordering::Relaxed);
            res
        })
    }
}

/// A stage that may be missing. Forwards unmodified when it is.
#[derive(Clone, Debug)]
pub enum Optional<M> {
    Active(M),
    Passthrough,
}

impl<M: Middleware> Optional<M> {
    /// Keeps `result`'s stage, or degrades to a pass-through and logs why.
    /// `concern` names the integration in the log line.
    pub fn from_result<E: Display>(concern: &str, result: Result<M, E>) -> Self {
        match result {
            Ok(stage) => {
                info!(concern = %concern, "{concern} is active");
                Self::Active(stage)
            }
            Err(e) => {
                warn!(concern = %concern, "{concern} unavailable, continuing without it: {e}");
                Self::Passthrough
            }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn get(&self) -> Option<&M> {
        match self {
            Self::Active(stage) => Some(stage),
            Self::Passthrough => None,
        }
    }
}

impl<M: Middleware> Middleware for Optional<M> {
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        match self {
            Self::Active(stage) => stage.handle(req, next),
            Self::Passthrough => next.run(req),
        }
    }
}

/// Monitoring that turns itself off when it cannot be set up.
pub type Observability = Optional<Monitor>;

impl Optional<Monitor> {
    /// Builds monitoring from optional credentials. No credentials at all,
    /// a blank app name, or a malformed key all yield a pass-through.
    pub fn from_credentials(app_name: Option<&str>, license_key: Option<&str>) -> Self {
        let result = match (app_name, license_key) {
            (None, None) => Err(MonitorError::Unconfigured),
            (app_name, license_key) => Monitor::connect(&Credentials {
                app_name: app_name.unwrap_or_default().to_owned(),
                license_key: license_key.unwrap_or_default().to_owned(),
            }),
        };
        Self::from_result("monitoring", result)
    }
}
