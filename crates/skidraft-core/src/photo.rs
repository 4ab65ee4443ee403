// Photo conversion: read an image file and embed it as a `data:` URL.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("failed to read photo {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Source of embedded photo payloads.
///
/// Returns `Ok(None)` when the file holds no data, which callers treat the
/// same as "no photo supplied".
#[async_trait]
pub trait PhotoReader: Send + Sync {
    async fn read_data_url(&self, path: &Path) -> Result<Option<String>, PhotoError>;
}

/// Reads photos from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPhotoReader;

#[async_trait]
impl PhotoReader for FsPhotoReader {
    async fn read_data_url(&self, path: &Path) -> Result<Option<String>, PhotoError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| PhotoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if bytes.is_empty() {
            debug!("Photo {} is empty", path.display());
            return Ok(None);
        }
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        debug!("Encoded photo {} ({} bytes, {})", path.display(), bytes.len(), mime);
        Ok(Some(to_data_url(mime.essence_str(), &bytes)))
    }
}

/// Build a base64 `data:` URL for `bytes` of the given MIME type.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_shape() {
        assert_eq!(to_data_url("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[tokio::test]
    async fn reads_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("me.png");
        std::fs::write(&path, b"\x89PNG").unwrap();

        let url = FsPhotoReader.read_data_url(&path).await.unwrap().unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(url, to_data_url("image/png", b"\x89PNG"));
    }

    #[tokio::test]
    async fn jpeg_extension_maps_to_jpeg_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("me.jpg");
        std::fs::write(&path, b"\xff\xd8").unwrap();

        let url = FsPhotoReader.read_data_url(&path).await.unwrap().unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }

    #[tokio::test]
    async fn unknown_extension_is_octet_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("me.zzzunknown");
        std::fs::write(&path, b"x").unwrap();

        let url = FsPhotoReader.read_data_url(&path).await.unwrap().unwrap();
        assert!(url.starts_with("data:application/octet-stream;base64,"));
    }

    #[tokio::test]
    async fn empty_file_is_no_photo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        std::fs::write(&path, b"").unwrap();

        assert!(FsPhotoReader.read_data_url(&path).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FsPhotoReader.read_data_url(&dir.path().join("nope.png")).await;
        assert!(matches!(result, Err(PhotoError::Io { .. })));
    }
}
