//! Per-request access log.

use std::time::Instant;

use tracing::info;

use super::{BoxFuture, Middleware, Next};
use crate::request::Request;

/// Logs method, path, request URI, status and latency once the rest of the
/// pipeline has answered.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl Middleware for Trace {
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        let method = req.method().clone();
        let path = req.path().to_owned();
        let uri = req.uri();

        Box::pin(async move {
            let start = Instant::now();
            let res = next.run(req).await;
            info!(
                method = %method,
                path = %path,
                uri = %uri,
                status = res.status_code().as_u16(),
                elapsed = ?start.elapsed(),
                "request"
            );
            res
        })
    }
}
