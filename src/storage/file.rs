// ABOUTME: File-backed key-value store writing one JSON document per key
// ABOUTME: Writes go through a temporary file and an atomic rename
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use super::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;
use tracing::debug;

/// Store that keeps each key in `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created
    pub async fn open(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to create storage directory {}: {e}",
                dir.display()
            ))
        })?;
        debug!(storage.dir = %dir.display(), "File store opened");
        Ok(Self { dir })
    }

    /// Directory holding the key files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AppError::invalid_input(format!(
                "Storage key '{key}' must be non-empty ASCII alphanumerics, '_' or '-'"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        let started = Instant::now();

        let result = async {
            fs::write(&tmp, value).await.map_err(|e| {
                AppError::storage(format!("Failed to write {}: {e}", tmp.display()))
            })?;
            fs::rename(&tmp, &path).await.map_err(|e| {
                AppError::storage(format!("Failed to replace {}: {e}", path.display()))
            })
        }
        .await;

        AppLogger::log_storage_operation(
            "set",
            key,
            result.is_ok(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        result
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!(
                "Failed to remove {}: {e}",
                path.display()
            ))),
        }
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
