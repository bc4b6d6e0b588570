// ABOUTME: In-memory application state shared by request handlers
// ABOUTME: Holds the recipe collection, the shopping list, and the entitlement state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use crate::billing::{CustomerInfo, EntitlementEvent, EntitlementState};
use crate::persistence::LoadedState;
use crate::shopping::ShoppingList;
use plateit_core::models::Recipe;
use serde::Serialize;

/// Application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Recipes, newest first
    pub recipes: Vec<Recipe>,
    /// Flat shopping list
    pub shopping_list: ShoppingList,
    /// Pro entitlement
    pub entitlement: EntitlementState,
}

/// Recipe allowance of the current user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeQuota {
    /// Recipes stored
    pub used: usize,
    /// Free-tier limit
    pub limit: usize,
    /// Whether the limit is lifted
    pub is_pro: bool,
    /// Whether another recipe may be added now
    pub can_add: bool,
}

impl AppState {
    /// State restored from storage, not yet entitled
    #[must_use]
    pub fn from_loaded(loaded: LoadedState) -> Self {
        Self {
            recipes: loaded.recipes,
            shopping_list: loaded.shopping_list,
            entitlement: EntitlementState::None,
        }
    }

    /// Whether Pro features are unlocked
    #[must_use]
    pub const fn is_pro(&self) -> bool {
        self.entitlement.is_pro()
    }

    /// Adopt what the store of record reports
    ///
    /// A record without the entitlement counts as "not active" rather than
    /// "never granted", so a previously active state moves to `Expired`.
    pub fn sync_entitlement(&mut self, info: &CustomerInfo) {
        self.entitlement = match info.pro_state() {
            EntitlementState::None => self
                .entitlement
                .apply(EntitlementEvent::Synced { active: false }),
            reported => reported,
        };
    }

    /// Recipe allowance for `limit`
    ///
    /// Counts every stored recipe, the demo seed included.
    #[must_use]
    pub fn quota(&self, limit: usize) -> RecipeQuota {
        let used = self.recipes.len();
        let is_pro = self.is_pro();
        RecipeQuota {
            used,
            limit,
            is_pro,
            can_add: is_pro || used < limit,
        }
    }

    /// Recipe by id
    #[must_use]
    pub fn find_recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    /// Store a new recipe at the front of the collection
    pub fn prepend_recipe(&mut self, recipe: Recipe) {
        self.recipes.insert(0, recipe);
    }
}
