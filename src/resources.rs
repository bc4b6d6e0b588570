// ABOUTME: Shared server resources injected into every route and service
// ABOUTME: Bundles configuration, storage, application state, billing, and the extractor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use crate::billing::{EntitlementProvider, MockStore, PurchaseGuard, PurchaseTicket};
use crate::config::ServerConfig;
use crate::errors::AppResult;
use crate::extraction::{GeminiExtractor, RecipeExtractor};
use crate::persistence;
use crate::state::AppState;
use crate::storage::factory::Storage;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Everything a request handler needs
///
/// Cloning is cheap; every field is shared.
#[derive(Clone)]
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Durable key-value storage
    pub storage: Storage,
    /// Recipes, shopping list, and entitlement
    pub state: Arc<RwLock<AppState>>,
    /// Subscription store
    pub billing: Arc<dyn EntitlementProvider>,
    /// AI extraction, absent when no API key is configured
    pub extractor: Option<Arc<dyn RecipeExtractor>>,
    /// Session-wide purchase guard
    pub purchase_guard: PurchaseGuard,
    active_purchase: Arc<Mutex<Option<PurchaseTicket>>>,
}

impl ServerResources {
    /// Start tracking a purchase
    ///
    /// The returned handle keeps the ticket registered for dismissal until
    /// it is dropped, including when the purchase future is cancelled.
    #[must_use]
    pub fn begin_purchase_ticket(&self) -> ActivePurchase {
        let ticket = PurchaseTicket::new();
        *self
            .active_purchase
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(ticket.clone());
        ActivePurchase {
            slot: Arc::clone(&self.active_purchase),
            ticket,
        }
    }

    /// Dismiss the running purchase, if any
    ///
    /// Returns whether a purchase was running.
    pub fn dismiss_active_purchase(&self) -> bool {
        let guard = self
            .active_purchase
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(ticket) = guard.as_ref() {
            ticket.dismiss();
            true
        } else {
            false
        }
    }
}

/// Registration of the running purchase
///
/// Dropping it clears the dismissable slot.
pub struct ActivePurchase {
    slot: Arc<Mutex<Option<PurchaseTicket>>>,
    ticket: PurchaseTicket,
}

impl ActivePurchase {
    /// Unregister the purchase and keep its ticket for the completion check
    #[must_use]
    pub fn finish(self) -> PurchaseTicket {
        self.ticket.clone()
    }
}

impl Drop for ActivePurchase {
    fn drop(&mut self) {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

/// Builder for [`ServerResources`]
#[derive(Default)]
pub struct ServerResourcesBuilder {
    config: Option<ServerConfig>,
    storage: Option<Storage>,
    billing: Option<Arc<dyn EntitlementProvider>>,
    extractor: Option<Arc<dyn RecipeExtractor>>,
}

impl ServerResourcesBuilder {
    /// Empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration
    #[must_use]
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use an existing storage handle instead of the configured backend
    #[must_use]
    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Use a specific subscription store
    #[must_use]
    pub fn with_billing(mut self, billing: Arc<dyn EntitlementProvider>) -> Self {
        self.billing = Some(billing);
        self
    }

    /// Use a specific extractor
    #[must_use]
    pub fn with_extractor(mut self, extractor: Arc<dyn RecipeExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Open storage, restore persisted state, and wire everything together
    ///
    /// Unset parts come from the configuration: the configured storage
    /// backend, a mock store over the same storage, and a Gemini extractor
    /// when an API key is present.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be opened
    pub async fn build(self) -> AppResult<ServerResources> {
        let config = self.config.unwrap_or_default();

        let storage = match self.storage {
            Some(storage) => storage,
            None => Storage::new(&config.storage).await?,
        };

        let billing = self.billing.unwrap_or_else(|| {
            Arc::new(MockStore::new(storage.shared(), config.billing.clone()))
        });

        let extractor = match self.extractor {
            Some(extractor) => Some(extractor),
            None if config.extraction.api_key.is_some() => {
                match GeminiExtractor::new(&config.extraction) {
                    Ok(gemini) => Some(Arc::new(gemini) as Arc<dyn RecipeExtractor>),
                    Err(e) => {
                        warn!(error = %e, "Recipe extraction disabled");
                        None
                    }
                }
            }
            None => None,
        };

        let loaded = persistence::load_state(storage.shared().as_ref()).await;
        info!(
            storage = storage.backend_name(),
            billing = billing.name(),
            extractor = extractor.as_ref().map_or("none", |e| e.name()),
            recipes = loaded.recipes.len(),
            "Server resources ready"
        );

        Ok(ServerResources {
            config: Arc::new(config),
            storage,
            state: Arc::new(RwLock::new(AppState::from_loaded(loaded))),
            billing,
            extractor,
            purchase_guard: PurchaseGuard::new(),
            active_purchase: Arc::new(Mutex::new(None)),
        })
    }
}
