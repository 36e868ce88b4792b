//! Serving bundled static files from disk.

use std::io::ErrorKind;
use std::path::{Component, Path};

use tracing::debug;

use crate::error::AssetError;
use crate::response::{ContentType, Response};

/// Serves the file at `path`, or an error response if it cannot be served.
/// Either way the response is final.
pub async fn serve(path: &Path) -> Response {
    match read(path).await {
        Ok((content_type, body)) => {
            debug!(path = %path.display(), bytes = body.len(), "serving local asset");
            Response::builder().bytes(content_type, body)
        }
        Err(e) => {
            debug!(path = %path.display(), "local asset failed: {e}");
            Response::error(e.status(), status_text(&e))
        }
    }
}

/// Reads a local asset and infers its content type.
pub async fn read(path: &Path) -> Result<(ContentType, Vec<u8>), AssetError> {
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(AssetError::InvalidPath(path.display().to_string()));
    }

    let metadata = tokio::fs::metadata(path).await.map_err(|e| io_error(path, e))?;
    if metadata.is_dir() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    let body = tokio::fs::read(path).await.map_err(|e| io_error(path, e))?;
    let content_type = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(ContentType::OctetStream, ContentType::from_extension);

    Ok((content_type, body))
}

fn io_error(path: &Path, source: std::io::Error) -> AssetError {
    match source.kind() {
        ErrorKind::NotFound | ErrorKind::NotADirectory => AssetError::NotFound(path.to_path_buf()),
        _ => AssetError::Unreadable { path: path.to_path_buf(), source },
    }
}

// Clients get the status text, not the on-disk path.
fn status_text(e: &AssetError) -> &'static str {
    e.status().canonical_reason().unwrap_or("error")
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;

    #[tokio::test]
    async fn serves_file_with_inferred_type() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.js");
        std::fs::write(&file, "console.log(1)").unwrap();

        let res = serve(&file).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"console.log(1)");
        assert_eq!(res.header("content-type"), Some("text/javascript; charset=utf-8"));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let res = serve(&dir.path().join("nope.css")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(res.body(), b"Not Found\n");
    }

    #[tokio::test]
    async fn directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("img.d")).unwrap();
        let err = read(&dir.path().join("img.d")).await.unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[tokio::test]
    async fn parent_segments_are_rejected() {
        let res = serve(Path::new("./public/../secret.txt")).await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreadable_file_is_internal_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("locked.css");
        std::fs::write(&file, "body{}").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores file modes; nothing to assert there.
        if std::fs::read(&file).is_ok() {
            return;
        }

        let err = read(&file).await.unwrap_err();
        assert!(matches!(err, AssetError::Unreadable { .. }));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
