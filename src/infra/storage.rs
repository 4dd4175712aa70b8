//! Local file storage for uploaded images.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::config::{Config, STORAGE_ROUTE};
use crate::errors::{AppError, AppResult};

/// Files kept in one flat directory, served under [`STORAGE_ROUTE`].
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
    public_url: String,
}

impl FileStorage {
    /// Open the upload directory, creating it if needed.
    pub async fn init(config: &Config) -> AppResult<Self> {
        Self::open(&config.upload_dir, &config.public_url).await
    }

    pub async fn open(root: impl AsRef<Path>, public_url: &str) -> AppResult<Self> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            AppError::internal(format!("Cannot create upload dir {}: {}", root.display(), e))
        })?;

        tracing::info!(dir = %root.display(), "File storage ready");

        Ok(Self {
            root,
            public_url: public_url.trim_end_matches('/').to_string(),
        })
    }

    /// Save `bytes` under a unique name derived from `original_name` and
    /// return the stored name.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> AppResult<String> {
        if bytes.is_empty() {
            return Err(AppError::bad_request(format!(
                "Cannot store empty file {}",
                original_name
            )));
        }
        if original_name.contains("..") {
            return Err(AppError::bad_request(format!(
                "Cannot store file with relative path outside current directory {}",
                original_name
            )));
        }

        let stored_name = stored_file_name(original_name, Utc::now().timestamp_millis());
        let path = self.root.join(&stored_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::internal(format!("Failed to store {}: {}", stored_name, e)))?;

        tracing::debug!(file = %stored_name, size = bytes.len(), "Stored file");
        Ok(stored_name)
    }

    /// Path of a stored file. 404 if it does not exist.
    pub async fn load(&self, name: &str) -> AppResult<PathBuf> {
        let path = self.root.join(file_component(name)?);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            _ => Err(AppError::NotFound(format!("File not found: {}", name))),
        }
    }

    /// Remove a stored file. Accepts a bare name or a full URL; only the last
    /// path component is used. Missing files are not an error.
    pub async fn delete(&self, name: &str) -> AppResult<()> {
        let file = file_component(name)?;
        match tokio::fs::remove_file(self.root.join(file)).await {
            Ok(()) => {
                tracing::debug!(%file, "Deleted stored file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::internal(format!("Failed to delete {}: {}", file, e))),
        }
    }

    /// Public URL of a stored file
    pub fn url(&self, name: &str) -> String {
        format!("{}{}/{}", self.public_url, STORAGE_ROUTE, name)
    }

    /// True when `reference` (a bare name or a URL) names a file in this storage
    pub fn is_stored(&self, reference: &str) -> bool {
        if reference.is_empty() {
            return false;
        }
        if !reference.contains("://") {
            return true;
        }
        let prefix = format!("{}{}/", self.public_url, STORAGE_ROUTE);
        reference.starts_with(&prefix)
    }
}

/// `{millis}_{stem}.{ext}` with spaces replaced by `_`.
fn stored_file_name(original_name: &str, millis: i64) -> String {
    let clean = original_name.trim().replace(' ', "_");
    let path = Path::new(&clean);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("file");

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", millis, stem, ext),
        None => format!("{}_{}", millis, stem),
    }
}

fn file_component(name: &str) -> AppResult<&str> {
    name.rsplit('/')
        .next()
        .filter(|n| !n.is_empty() && *n != "." && *n != "..")
        .ok_or_else(|| AppError::bad_request(format!("Invalid file name: {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn storage() -> (tempfile::TempDir, FileStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path(), "http://localhost:3000/")
            .await
            .unwrap();
        (dir, storage)
    }

    #[test]
    fn test_stored_file_name() {
        assert_eq!(stored_file_name("my photo.png", 1700), "1700_my_photo.png");
        assert_eq!(stored_file_name("README", 5), "5_README");
        assert_eq!(stored_file_name(".png", 5), "5_.png");
    }

    #[test]
    fn test_file_component() {
        assert_eq!(
            file_component("http://localhost:3000/storage/1_a.png").unwrap(),
            "1_a.png"
        );
        assert_eq!(file_component("1_a.png").unwrap(), "1_a.png");
        assert!(file_component("storage/").is_err());
        assert!(file_component("..").is_err());
    }

    #[tokio::test]
    async fn test_store_load_delete() {
        let (_dir, storage) = storage().await;

        let name = storage.store("laptop.png", b"png-bytes").await.unwrap();
        assert!(name.ends_with("_laptop.png"));

        let path = storage.load(&name).await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"png-bytes");

        storage.delete(&storage.url(&name)).await.unwrap();
        assert!(storage.load(&name).await.is_err());

        // deleting twice is fine
        storage.delete(&name).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_rejects_empty_and_traversal() {
        let (_dir, storage) = storage().await;

        let empty = storage.store("a.png", b"").await.unwrap_err();
        assert_eq!(empty.code(), "BAD_REQUEST");

        let traversal = storage.store("../etc/passwd", b"x").await.unwrap_err();
        assert_eq!(traversal.code(), "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let (_dir, storage) = storage().await;
        let err = storage.load("nope.png").await.unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_url_and_ownership() {
        let (_dir, storage) = storage().await;
        let url = storage.url("1_a.png");

        assert_eq!(url, "http://localhost:3000/storage/1_a.png");
        assert!(storage.is_stored(&url));
        assert!(storage.is_stored("1_a.png"));
        assert!(!storage.is_stored("https://i.imgur.com/4M34hi2.jpg"));
        assert!(!storage.is_stored(""));
    }

    #[tokio::test]
    async fn test_ownership_needs_the_storage_route() {
        let (_dir, storage) = storage().await;

        assert!(!storage.is_stored("http://localhost:30001/storage/1_a.png"));
        assert!(!storage.is_stored("http://localhost:3000/other/1_a.png"));
        assert!(!storage.is_stored("http://localhost:3000/storagex/1_a.png"));
        assert!(storage.is_stored("http://localhost:3000/storage/1_a.png"));
    }
}
