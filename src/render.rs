//! Rendering a journey's HTML shell with its resolved assets.
//!
//! Stylesheets and scripts are injected right before `</head>`, in the order
//! the registry returned them. Scripts are `defer`red so that order is also
//! their execution order.

use std::path::Path;
use std::sync::Arc;

use crate::error::AssetError;
use crate::handler::JourneyHandler;
use crate::pb::DependencyAssets;
use crate::request::Request;
use crate::response::Response;

/// A journey's `index.html`, loaded once at startup.
#[derive(Clone, Debug)]
pub struct IndexPage {
    html: Arc<str>,
}

impl IndexPage {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let html = tokio::fs::read_to_string(path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(path.to_path_buf())
            } else {
                AssetError::Unreadable { path: path.to_path_buf(), source }
            }
        })?;
        Ok(Self::from_html(html))
    }

    pub fn from_html(html: impl Into<String>) -> Self {
        Self { html: html.into().into() }
    }

    /// The page with a tag for every asset spliced in.
    pub fn render(&self, assets: &DependencyAssets) -> String {
        let tags: String = assets.assets.iter().map(|a| tag(a)).collect();
        match self.html.find("</head>") {
            Some(at) => format!("{}{tags}{}", &self.html[..at], &self.html[at..]),
            None => format!("{tags}{}", self.html),
        }
    }

    /// A [`JourneyHandler`] answering every page request with this page.
    pub fn handler(self) -> impl JourneyHandler {
        move |_req: Request, assets: DependencyAssets| {
            let page = self.render(&assets);
            async move { Response::html(page) }
        }
    }
}

fn tag(asset: &str) -> String {
    let href = escape(asset);
    let path = asset.split(['?', '#']).next().unwrap_or(asset);
    if path.ends_with(".css") {
        format!(r#"<link rel="stylesheet" href="{href}">"#)
    } else {
        format!(r#"<script defer src="{href}"></script>"#)
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets(list: &[&str]) -> DependencyAssets {
        DependencyAssets { assets: list.iter().map(|s| s.to_string()).collect() }
    }

    #[test]
    fn injects_tags_before_head_close_in_order() {
        let page = IndexPage::from_html("<html><head><title>x</title></head><body></body></html>");
        let html = page.render(&assets(&["/cdn/a.js", "/cdn/b.css"]));
        assert_eq!(
            html,
            "<html><head><title>x</title>\
             <script defer src=\"/cdn/a.js\"></script>\
             <link rel=\"stylesheet\" href=\"/cdn/b.css\">\
             </head><body></body></html>"
        );
    }

    #[test]
    fn fragment_without_head_gets_tags_prepended() {
        let page = IndexPage::from_html("<div id=\"app\"></div>");
        let html = page.render(&assets(&["/cdn/theme.css?v=2"]));
        assert!(html.starts_with(r#"<link rel="stylesheet" href="/cdn/theme.css?v=2">"#));
    }

    #[test]
    fn attribute_values_are_escaped() {
        assert_eq!(tag(r#"/x.js"><script>"#), r#"<script defer src="/x.js&quot;&gt;&lt;script&gt;"></script>"#);
    }

    #[tokio::test]
    async fn load_reports_missing_index() {
        let err = IndexPage::load("/no/such/index.html").await.unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }
}
