//! Short-circuit for bundled static files.

use std::sync::Arc;

use percent_encoding::percent_decode_str;
use tracing::debug;

use super::{BoxFuture, Middleware, Next};
use crate::assets;
use crate::classify::{Classification, classify_in};
use crate::config::PUBLIC_ROOT;
use crate::error::AssetError;
use crate::request::Request;
use crate::response::Response;

/// Serves requests the classifier marks as local assets straight from the
/// public root. Page requests are forwarded untouched.
///
/// Classification runs on the percent-decoded path, so `/app/Noto%20Sans.woff2`
/// names the file `Noto Sans.woff2`. A path that does not decode to UTF-8
/// answers `400`.
#[derive(Clone, Debug)]
pub struct LocalAssets {
    prefix: Arc<str>,
    root: Arc<str>,
}

impl LocalAssets {
    /// Assets under [`PUBLIC_ROOT`], for a journey mounted at `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into().into(), root: PUBLIC_ROOT.into() }
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into().into();
        self
    }

    pub fn prefix(&self) -> &str { &self.prefix }
    pub fn root(&self) -> &str { &self.root }
}

impl Middleware for LocalAssets {
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        let classification = match percent_decode_str(req.path()).decode_utf8() {
            Ok(decoded) => classify_in(&self.root, &decoded, &self.prefix),
            Err(e) => {
                debug!(path = %req.path(), "request path is not UTF-8 once decoded: {e}");
                let status = AssetError::InvalidPath(req.path().to_owned()).status();
                return Box::pin(async move {
                    Response::error(status, status.canonical_reason().unwrap_or("error"))
                });
            }
        };

        match classification {
            Classification::Local(path) => Box::pin(async move { assets::serve(&path).await }),
            Classification::Journey => next.run(req),
        }
    }
}
