//! Handler traits and type erasure.
//!
//! Two kinds of handler exist:
//!
//! - [`Handler`]: `async fn(Request) -> impl IntoResponse`, for plain routes
//!   such as health probes. Pipelines and the dependency-resolution endpoint
//!   are handlers too.
//! - [`JourneyHandler`]: `async fn(Request, DependencyAssets) -> impl
//!   IntoResponse`, the journey's renderer. It only ever runs after a
//!   successful resolution and receives the assets as an owned value.
//!
//! Both are stored behind `Arc<dyn …>` so the router and pipelines can hold
//! handlers of different concrete types:
//!
//! ```text
//! async fn render(req, assets) -> Response { … }   ← user writes this
//!        ↓ JourneyAssets::new(client, render)
//! render.into_boxed_journey_handler()              ← blanket impl
//!        ↓
//! Arc::new(FnJourneyHandler(render))               ← stored once at startup
//!        ↓
//! handler.call(req, assets) per request            ← one vtable dispatch
//! ```
//!
//! The per-request cost is one `Arc` clone and one virtual call, small next
//! to the registry round trip.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::pb::DependencyAssets;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// Pinned because the runtime polls it in place; `Send + 'static` so tokio
/// can move it across worker threads.
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface for [`Handler`].
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of [`Handler::into_boxed_handler`].
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Internal dispatch interface for [`JourneyHandler`].
#[doc(hidden)]
pub trait ErasedJourneyHandler {
    fn call(&self, req: Request, assets: DependencyAssets) -> BoxFuture;
}

#[doc(hidden)]
pub type BoxedJourneyHandler = Arc<dyn ErasedJourneyHandler + Send + Sync + 'static>;

// ── Public traits ─────────────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// Satisfied automatically by any `async fn(Request) -> impl IntoResponse`,
/// and by this crate's [`Pipeline`](crate::middleware::Pipeline) and
/// [`JourneyAssets`](crate::middleware::JourneyAssets). Sealed.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

/// Implemented for every journey renderer.
///
/// Satisfied automatically by any
/// `async fn(Request, DependencyAssets) -> impl IntoResponse`. Sealed.
pub trait JourneyHandler: private::SealedJourney + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_journey_handler(self) -> BoxedJourneyHandler;
}

/// The sealing module. `Sealed` is not nameable outside the crate, so only
/// the blanket impls and this crate's own endpoints satisfy the public traits.
pub(crate) mod private {
    pub trait Sealed {}
    pub trait SealedJourney {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

/// `Fn(Request) -> Fut` covers named `async fn` items, closures returning
/// futures, and any struct that implements `Fn`.
impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

impl<F, Fut, R> private::SealedJourney for F
where
    F: Fn(Request, DependencyAssets) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> JourneyHandler for F
where
    F: Fn(Request, DependencyAssets) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_journey_handler(self) -> BoxedJourneyHandler {
        Arc::new(FnJourneyHandler(self))
    }
}

// ── Concrete wrappers ─────────────────────────────────────────────────────────

/// Bridges a concrete handler `F` to the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        // Call the wrapped function, then map its output through
        // `IntoResponse` and box it to match the trait signature.
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

struct FnJourneyHandler<F>(F);

impl<F, Fut, R> ErasedJourneyHandler for FnJourneyHandler<F>
where
    F: Fn(Request, DependencyAssets) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request, assets: DependencyAssets) -> BoxFuture {
        let fut = (self.0)(req, assets);
        Box::pin(async move { fut.await.into_response() })
    }
}
