// ABOUTME: In-memory key-value store backed by a concurrent hash map
// ABOUTME: Used in tests and for ephemeral deployments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use super::KeyValueStore;
use crate::errors::AppResult;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory store
///
/// Cloning shares the same underlying map, so a clone handed to the
/// entitlement provider sees writes made through the persistence layer.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<DashMap<String, String>>,
}

impl InMemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait::async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
