//! Middleware layer.
//!
//! A [`Pipeline`] is an ordered list of [`Middleware`] stages in front of an
//! endpoint [`Handler`]. Each stage either answers the request itself or
//! forwards it with [`Next::run`]. `Next` is consumed by `run`, so a stage
//! forwards at most once and every request produces exactly one response.
//!
//! The journey chain built by [`journey`] is:
//!
//! ```text
//! observe ─▶ trace ─▶ local assets ─┬─▶ serve file from disk        (terminal)
//!                                   └─▶ resolve dependencies ─┬─▶ render (terminal)
//!                                                             └─▶ 400/500 (terminal)
//! ```
//!
//! Built-in stages:
//! - [`observe`]: optional monitoring, degrading to a pass-through
//! - [`trace`]: one log line per request with method, path, status, latency
//! - [`LocalAssets`]: short-circuits requests for bundled static files
//! - [`JourneyAssets`]: the endpoint resolving dependencies and rendering

pub mod journey_assets;
pub mod local_assets;
pub mod observe;
pub mod trace;

use std::sync::Arc;

use crate::handler::{BoxedHandler, ErasedHandler, Handler, private};
use crate::request::Request;

pub use crate::handler::BoxFuture;
pub use journey_assets::JourneyAssets;
pub use local_assets::LocalAssets;
pub use observe::{Credentials, Monitor, Observability, Optional};
pub use trace::Trace;

/// A pipeline stage.
///
/// The returned future must be `'static`: clone out of `self` whatever the
/// future needs before boxing it.
pub trait Middleware: Send + Sync + 'static {
    fn handle(&self, req: Request, next: Next) -> BoxFuture;
}

/// The rest of the pipeline after the current stage.
pub struct Next {
    stages: Arc<[Arc<dyn Middleware>]>,
    endpoint: BoxedHandler,
    index: usize,
}

impl Next {
    /// Forwards `req` to the next stage, or to the endpoint after the last one.
    pub fn run(self, req: Request) -> BoxFuture {
        match self.stages.get(self.index).cloned() {
            Some(stage) => stage.handle(req, Next { index: self.index + 1, ..self }),
            None => self.endpoint.call(req),
        }
    }
}

/// Stages plus an endpoint, built once at startup and shared by every request.
#[derive(Clone)]
pub struct Pipeline {
    stages: Arc<[Arc<dyn Middleware>]>,
    endpoint: BoxedHandler,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder { stages: Vec::new() }
    }

    /// Runs `req` through every stage.
    pub fn call(&self, req: Request) -> BoxFuture {
        Next { stages: Arc::clone(&self.stages), endpoint: Arc::clone(&self.endpoint), index: 0 }
            .run(req)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl ErasedHandler for Pipeline {
    fn call(&self, req: Request) -> BoxFuture {
        Pipeline::call(self, req)
    }
}

impl private::Sealed for Pipeline {}

impl Handler for Pipeline {
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(self)
    }
}

/// Collects stages in execution order: the first stage added sees the
/// request first.
pub struct PipelineBuilder {
    stages: Vec<Arc<dyn Middleware>>,
}

impl PipelineBuilder {
    pub fn stage(mut self, stage: impl Middleware) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn endpoint(self, endpoint: impl Handler) -> Pipeline {
        Pipeline { stages: self.stages.into(), endpoint: endpoint.into_boxed_handler() }
    }
}

/// Composes the journey chain: `observe → trace → local assets → resolve`.
pub fn journey(
    observe: impl Middleware,
    local_assets: LocalAssets,
    resolve: JourneyAssets,
) -> Pipeline {
    Pipeline::builder()
        .stage(observe)
        .stage(Trace)
        .stage(local_assets)
        .endpoint(resolve)
}
