//! Local-asset classification.
//!
//! Every request path is classified before anything else runs. Paths that
//! look like pages (no extension, `.html`, `.htm`) belong to the journey and
//! need their dependencies resolved; anything else with an extension is a file
//! bundled under the public root.

use std::path::{Path, PathBuf};

use crate::config::PUBLIC_ROOT;

/// Where a request should be served from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// A bundled static file, with its path on disk.
    Local(PathBuf),
    /// A journey page; its dependencies come from the registry.
    Journey,
}

impl Classification {
    pub fn is_local_asset(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// The on-disk path, present only for local assets.
    pub fn resolved_path(&self) -> Option<&Path> {
        match self {
            Self::Local(path) => Some(path),
            Self::Journey => None,
        }
    }
}

/// Classifies `path` against the default [`PUBLIC_ROOT`].
pub fn classify(path: &str, prefix: &str) -> Classification {
    classify_in(PUBLIC_ROOT, path, prefix)
}

/// Classifies `path`, resolving local assets under `public_root`.
///
/// The served path is `public_root` followed by `path` with `prefix` removed.
/// A prefix of `/` counts as no prefix.
pub fn classify_in(public_root: &str, path: &str, prefix: &str) -> Classification {
    match extension(path) {
        "" | ".html" | ".htm" => Classification::Journey,
        _ => {
            let prefix = if prefix == "/" { "" } else { prefix };
            let rest = path.strip_prefix(prefix).unwrap_or(path);
            Classification::Local(PathBuf::from(format!("{public_root}{rest}")))
        }
    }
}

/// The suffix of the last path segment starting at its final `.`, or `""`.
fn extension(path: &str) -> &str {
    let segment = path.rsplit('/').next().unwrap_or(path);
    segment.rfind('.').map_or("", |dot| &segment[dot..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_not_local_for_any_prefix() {
        for prefix in ["/", "", "/app", "/deeply/nested"] {
            for path in ["/app/checkout", "/app/index.html", "/app/legacy.htm", "/", ""] {
                let c = classify(path, prefix);
                assert_eq!(c, Classification::Journey, "{path} under {prefix}");
                assert_eq!(c.resolved_path(), None);
            }
        }
    }

    #[test]
    fn script_under_prefix_is_local() {
        let c = classify("/app/main.js", "/app");
        assert!(c.is_local_asset());
        assert_eq!(c.resolved_path(), Some(Path::new("./public/main.js")));
    }

    #[test]
    fn root_prefix_counts_as_empty() {
        let c = classify("/css/site.css", "/");
        assert_eq!(c, Classification::Local(PathBuf::from("./public/css/site.css")));
    }

    #[test]
    fn unrelated_prefix_leaves_path_untouched() {
        let c = classify("/static/logo.png", "/app");
        assert_eq!(c, Classification::Local(PathBuf::from("./public/static/logo.png")));
    }

    #[test]
    fn explicit_root_is_used() {
        let c = classify_in("/srv/www", "/app/img/a.svg", "/app");
        assert_eq!(c.resolved_path(), Some(Path::new("/srv/www/img/a.svg")));
    }

    #[test]
    fn extension_comes_from_last_segment_only() {
        assert_eq!(extension("/v1.2/checkout"), "");
        assert_eq!(extension("/a/b.tar.gz"), ".gz");
        assert_eq!(extension("/a/.env"), ".env");
        assert_eq!(extension("/a/b."), ".");
        assert_eq!(extension("main.js"), ".js");
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        assert!(classify("/app/INDEX.HTML", "/app").is_local_asset());
    }
}
