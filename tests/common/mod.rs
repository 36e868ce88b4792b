#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{Code, Status};
use trailhead::pb::journey::v1::explorer_server::{Explorer, ExplorerServer};
use trailhead::pb::{DependencyAssets, Journey};
use trailhead::{JourneyConfig, Request};

/// How the stub registry answers `GetDependencies`.
#[derive(Clone)]
pub enum Reply {
    Assets(Vec<&'static str>),
    Fail(Code, &'static str),
    Hang,
}

#[derive(Clone)]
pub struct StubRegistry {
    reply: Reply,
    seen: Arc<Mutex<Vec<Journey>>>,
}

impl StubRegistry {
    pub fn new(reply: Reply) -> Self {
        Self { reply, seen: Arc::default() }
    }

    /// Journeys received so far.
    pub fn seen(&self) -> Vec<Journey> {
        self.seen.lock().unwrap().clone()
    }
}

#[tonic::async_trait]
impl Explorer for StubRegistry {
    async fn get_dependencies(
        &self,
        request: tonic::Request<Journey>,
    ) -> Result<tonic::Response<DependencyAssets>, Status> {
        self.seen.lock().unwrap().push(request.into_inner());
        match &self.reply {
            Reply::Assets(assets) => Ok(tonic::Response::new(DependencyAssets {
                assets: assets.iter().map(|a| a.to_string()).collect(),
            })),
            Reply::Fail(code, message) => Err(Status::new(*code, *message)),
            Reply::Hang => std::future::pending().await,
        }
    }
}

/// A registry listening on a loopback port. Stops when dropped.
pub struct RunningRegistry {
    pub addr: String,
    _stop: oneshot::Sender<()>,
}

pub async fn spawn_registry(stub: StubRegistry) -> RunningRegistry {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let (stop, stopped) = oneshot::channel::<()>();

    tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(ExplorerServer::new(stub))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async {
                let _ = stopped.await;
            })
            .await
            .unwrap();
    });

    RunningRegistry { addr, _stop: stop }
}

/// An address nothing listens on.
pub async fn refused_addr() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().to_string()
}

pub fn checkout() -> JourneyConfig {
    JourneyConfig::from_json(
        r#"{
            "name": "checkout",
            "version": "1.4.0",
            "dependencies": [
                {"name": "react", "version": "18.2.0"},
                {"name": "design-system", "version": "3.1.0"}
            ]
        }"#,
    )
    .unwrap()
}

pub fn get(path: &str) -> Request {
    Request::from(http::Request::get(path).body(Bytes::new()).unwrap())
}
