// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Builds server resources over in-memory storage with an instant mock store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `plateit_server`

use anyhow::Result;
use async_trait::async_trait;
use plateit_core::models::{Ingredient, IngredientCategory, InstructionStep};
use plateit_server::{
    billing::{EntitlementProvider, MockStore, MockStoreConfig},
    config::ServerConfig,
    errors::{AppError, AppResult},
    extraction::{ExtractedRecipe, RecipeExtractor},
    resources::{ServerResources, ServerResourcesBuilder},
    storage::{factory::Storage, memory::InMemoryStore, KeyValueStore},
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// What the stub extractor answers
#[derive(Debug, Clone)]
pub enum StubReply {
    /// A recipe titled with the given text
    Recipe(String),
    /// An answer without a recipe
    Nothing,
    /// A failed AI call
    Failure,
}

/// Extractor returning canned answers and counting calls
pub struct StubExtractor {
    reply: StubReply,
    calls: AtomicUsize,
}

impl StubExtractor {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn returning(title: &str) -> Self {
        Self::new(StubReply::Recipe(title.to_owned()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Extracted recipe with one ingredient per category
pub fn extracted_recipe(title: &str) -> ExtractedRecipe {
    ExtractedRecipe {
        title: title.to_owned(),
        description: "From the stub".to_owned(),
        prep_time: "20 min".to_owned(),
        servings: "4".to_owned(),
        image_url: None,
        source_url: None,
        tags: vec!["Test".to_owned()],
        ingredients: vec![
            Ingredient::new("Onion", "1", IngredientCategory::Produce),
            Ingredient::new("Butter", "2 tbsp", IngredientCategory::Dairy),
            Ingredient::new("Rice", "1 cup", IngredientCategory::Pantry),
        ],
        instructions: vec![InstructionStep {
            step: 1,
            text: "Cook everything".to_owned(),
        }],
    }
}

#[async_trait]
impl RecipeExtractor for StubExtractor {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn extract(&self, _input: &str) -> AppResult<Option<ExtractedRecipe>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            StubReply::Recipe(title) => Ok(Some(extracted_recipe(title))),
            StubReply::Nothing => Ok(None),
            StubReply::Failure => Err(AppError::external_service(
                "stub",
                "Failed to process recipe. Please try again.",
            )),
        }
    }
}

/// Everything a test needs to poke at the server
pub struct TestContext {
    pub resources: Arc<ServerResources>,
    pub store: InMemoryStore,
    pub extractor: Arc<StubExtractor>,
    pub billing: Arc<MockStore>,
}

/// Build resources over `store` with a mock billing configured by `billing`
pub async fn build_context(
    store: InMemoryStore,
    billing: MockStoreConfig,
    extractor: StubExtractor,
) -> Result<TestContext> {
    init_test_logging();

    let shared: Arc<dyn KeyValueStore> = Arc::new(store.clone());
    let mock = Arc::new(MockStore::new(Arc::clone(&shared), billing));
    let extractor = Arc::new(extractor);

    let resources = ServerResourcesBuilder::new()
        .with_config(ServerConfig::default())
        .with_storage(Storage::from_store(shared))
        .with_billing(Arc::clone(&mock) as Arc<dyn EntitlementProvider>)
        .with_extractor(Arc::clone(&extractor) as Arc<dyn RecipeExtractor>)
        .build()
        .await?;

    Ok(TestContext {
        resources: Arc::new(resources),
        store,
        extractor,
        billing: mock,
    })
}

/// Fresh store, instant mock billing, and an extractor that always succeeds
pub async fn test_context() -> Result<TestContext> {
    build_context(
        InMemoryStore::new(),
        MockStoreConfig::instant(),
        StubExtractor::returning("Stub Risotto"),
    )
    .await
}
