//! Error types.
//!
//! Per-request failures ([`ResolveError`], [`AssetError`]) carry the HTTP
//! status they map to and are turned into responses at the request boundary.
//! [`Error`] and [`ConfigError`] are startup/infrastructure failures.

use std::path::PathBuf;
use std::time::Duration;

use http::StatusCode;
use thiserror::Error;

/// Infrastructure failures: binding, accepting, bad configuration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A journey config that could not be loaded or failed validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse journey config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid journey config: {0}")]
    Invalid(String),
}

/// Why a dependency resolution did not produce assets.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The registry could not be reached.
    #[error("cannot connect to registry: {0}")]
    Dial(#[source] tonic::transport::Error),

    /// The registry answered with an error status.
    #[error("rpc error: code = {:?} desc = {}", .0.code(), .0.message())]
    Call(tonic::Status),

    #[error("registry did not answer within {0:?}")]
    Timeout(Duration),
}

impl ResolveError {
    /// Dial failures are ours (500); call failures and timeouts are 400.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Dial(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Call(_) | Self::Timeout(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// A local asset that could not be served.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read asset {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid asset path: {0}")]
    InvalidPath(String),
}

impl AssetError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unreadable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidPath(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Monitoring credentials that were rejected. Never reaches a caller: the
/// observability stage swallows it and degrades to a pass-through.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonitorError {
    #[error("no monitoring credentials supplied")]
    Unconfigured,

    #[error("app name is required")]
    MissingAppName,

    #[error("license key must be {expected} characters, got {actual}")]
    LicenseLength { expected: usize, actual: usize },
}
