// ABOUTME: Storage factory for configuration-based backend selection
// ABOUTME: Hands out a shared trait object so persistence and billing see the same store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use super::{file::FileStore, memory::InMemoryStore, KeyValueStore, StorageBackend, StorageConfig};
use crate::errors::AppResult;
use std::sync::Arc;
use tracing::info;

/// Unified storage handle
#[derive(Clone)]
pub struct Storage {
    inner: Arc<dyn KeyValueStore>,
}

impl Storage {
    /// Create a storage handle for the configured backend
    ///
    /// # Errors
    ///
    /// Returns an error if the file backend directory cannot be created
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let inner: Arc<dyn KeyValueStore> = match &config.backend {
            StorageBackend::Memory => {
                info!("Initializing in-memory storage (data is lost on restart)");
                Arc::new(InMemoryStore::new())
            }
            StorageBackend::File { dir } => {
                info!("Initializing file storage at {}", dir.display());
                Arc::new(FileStore::open(dir.clone()).await?)
            }
        };
        Ok(Self { inner })
    }

    /// Wrap an existing store
    #[must_use]
    pub fn from_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self { inner: store }
    }

    /// Shared trait object for injection into components
    #[must_use]
    pub fn shared(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.inner)
    }

    /// Backend name for logs
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }
}
