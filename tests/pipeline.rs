mod common;

use std::sync::{Arc, Mutex};

use common::{Reply, StubRegistry, checkout, get, refused_addr, spawn_registry};
use http::StatusCode;
use tonic::Code;
use trailhead::middleware::{self, JourneyAssets, LocalAssets, Observability, Pipeline};
use trailhead::{DependencyAssets, IndexPage, RegistryClient, Request, Response};

struct Fixture {
    public: tempfile::TempDir,
    rendered: Arc<Mutex<Vec<DependencyAssets>>>,
}

impl Fixture {
    fn new() -> Self {
        let public = tempfile::tempdir().unwrap();
        std::fs::write(public.path().join("main.js"), "boot()").unwrap();
        Self { public, rendered: Arc::default() }
    }

    fn pipeline(&self, registry: &str) -> Pipeline {
        let client = RegistryClient::new(registry, &checkout()).unwrap();
        let rendered = Arc::clone(&self.rendered);
        let render = move |req: Request, assets: DependencyAssets| {
            rendered.lock().unwrap().push(assets.clone());
            async move { Response::text(format!("{} {}", req.path(), assets.assets.join(","))) }
        };

        middleware::journey(
            Observability::from_credentials(None, None),
            LocalAssets::new("/app").with_root(self.public.path().to_str().unwrap()),
            JourneyAssets::new(client, render),
        )
    }

    fn rendered(&self) -> Vec<DependencyAssets> {
        self.rendered.lock().unwrap().clone()
    }
}

#[tokio::test]
async fn page_request_renders_resolved_assets() {
    let fixture = Fixture::new();
    let registry =
        spawn_registry(StubRegistry::new(Reply::Assets(vec!["/cdn/a.js", "/cdn/b.css"]))).await;

    let res = fixture.pipeline(&registry.addr).call(get("/app/checkout")).await;

    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.body(), b"/app/checkout /cdn/a.js,/cdn/b.css");
    assert_eq!(
        fixture.rendered(),
        [DependencyAssets { assets: vec!["/cdn/a.js".into(), "/cdn/b.css".into()] }]
    );
}

#[tokio::test]
async fn local_asset_never_contacts_registry() {
    let fixture = Fixture::new();
    let stub = StubRegistry::new(Reply::Assets(vec!["/cdn/a.js"]));
    let registry = spawn_registry(stub.clone()).await;

    let res = fixture.pipeline(&registry.addr).call(get("/app/main.js")).await;

    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.body(), b"boot()");
    assert!(stub.seen().is_empty());
    assert!(fixture.rendered().is_empty());
}

#[tokio::test]
async fn missing_local_asset_is_terminal() {
    let fixture = Fixture::new();
    let stub = StubRegistry::new(Reply::Assets(vec![]));
    let registry = spawn_registry(stub.clone()).await;

    let res = fixture.pipeline(&registry.addr).call(get("/app/missing.css")).await;

    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    assert!(stub.seen().is_empty());
}

#[tokio::test]
async fn refused_registry_answers_500_without_rendering() {
    let fixture = Fixture::new();

    let res = fixture.pipeline(&refused_addr().await).call(get("/app/checkout")).await;

    assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(fixture.rendered().is_empty());
}

#[tokio::test]
async fn registry_error_answers_400_with_its_message() {
    let fixture = Fixture::new();
    let registry =
        spawn_registry(StubRegistry::new(Reply::Fail(Code::NotFound, "unknown journey"))).await;

    let res = fixture.pipeline(&registry.addr).call(get("/app/index.html")).await;

    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(res.body(), b"rpc error: code = NotFound desc = unknown journey\n");
    assert!(fixture.rendered().is_empty());
}

#[tokio::test]
async fn local_assets_still_served_when_registry_is_down() {
    let fixture = Fixture::new();

    let res = fixture.pipeline(&refused_addr().await).call(get("/app/main.js")).await;

    assert_eq!(res.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn index_page_handler_renders_tags() {
    let registry =
        spawn_registry(StubRegistry::new(Reply::Assets(vec!["/cdn/a.js", "/cdn/b.css"]))).await;
    let client = RegistryClient::new(&registry.addr, &checkout()).unwrap();
    let page = IndexPage::from_html("<html><head></head><body><div id=\"app\"></div></body></html>");

    let pipeline = Pipeline::builder().endpoint(JourneyAssets::new(client, page.handler()));
    let res = pipeline.call(get("/checkout")).await;

    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.header("content-type"), Some("text/html; charset=utf-8"));
    let html = std::str::from_utf8(res.body()).unwrap();
    assert!(html.contains(r#"<script defer src="/cdn/a.js"></script><link rel="stylesheet" href="/cdn/b.css"></head>"#));
}
