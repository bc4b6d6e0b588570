// ABOUTME: Key-value storage abstraction for persisted application documents
// ABOUTME: Pluggable backends (in-memory, file) selected by the storage factory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

/// Storage factory for creating storage providers
pub mod factory;
/// File-backed storage implementation
pub mod file;
/// In-memory storage implementation
pub mod memory;

use crate::errors::AppResult;
use std::path::PathBuf;

/// Key-value store holding JSON text documents
///
/// This is the durable boundary of the service: every application document
/// (recipes, shopping list, added recipe ids, mock entitlement flag) lives
/// under a named key as a JSON string. Backends do not interpret values.
///
/// # Examples
///
/// ```rust,no_run
/// use plateit_server::storage::{memory::InMemoryStore, KeyValueStore};
/// # async fn example() -> Result<(), plateit_server::errors::AppError> {
/// let store = InMemoryStore::new();
/// store.set("plateit_list", "[]").await?;
/// assert_eq!(store.get("plateit_list").await?.as_deref(), Some("[]"));
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete `key` if present
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Backend name for logs
    fn backend_name(&self) -> &'static str;
}

/// Which storage backend to use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process memory, lost on restart
    Memory,
    /// One JSON file per key in `dir`
    File {
        /// Directory holding the key files
        dir: PathBuf,
    },
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Selected backend
    pub backend: StorageBackend,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
        }
    }
}
