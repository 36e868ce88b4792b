//! Dependency resolution endpoint.

use std::sync::Arc;

use super::BoxFuture;
use crate::handler::{
    BoxedHandler, BoxedJourneyHandler, ErasedHandler, ErasedJourneyHandler, Handler,
    JourneyHandler, private,
};
use crate::request::Request;
use crate::resolver::RegistryClient;
use crate::response::Response;

/// Resolves the journey's dependencies and hands them to the renderer.
///
/// The renderer only runs when resolution succeeds. Dial failures answer
/// `500`, call failures and timeouts answer `400`, each with the error
/// message as body.
#[derive(Clone)]
pub struct JourneyAssets {
    client: RegistryClient,
    render: BoxedJourneyHandler,
}

impl JourneyAssets {
    pub fn new(client: RegistryClient, render: impl JourneyHandler) -> Self {
        Self { client, render: render.into_boxed_journey_handler() }
    }

    pub fn client(&self) -> &RegistryClient { &self.client }
}

impl ErasedHandler for JourneyAssets {
    fn call(&self, req: Request) -> BoxFuture {
        let client = self.client.clone();
        let render = Arc::clone(&self.render);
        Box::pin(async move {
            match client.resolve().await {
                Ok(assets) => render.call(req, assets).await,
                Err(e) => Response::error(e.status(), &e),
            }
        })
    }
}

impl private::Sealed for JourneyAssets {}

impl Handler for JourneyAssets {
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(self)
    }
}
