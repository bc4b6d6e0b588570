// ABOUTME: Loads and saves recipes and the shopping list through the key-value store
// ABOUTME: Each key loads independently; unusable values fall back to their defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

//! # Persistence
//!
//! Three keys hold the application documents: the recipe collection, the
//! flat shopping list, and the ids of recipes already added to the list.
//! Entitlement is not stored here; the billing provider owns it.
//!
//! Loading never fails. A missing recipes key seeds the demo recipe; a
//! malformed or unreadable key is logged and replaced by its empty default
//! without affecting the others. Saving is write-through and does fail.

use crate::constants::storage_keys;
use crate::errors::AppResult;
use crate::logging::AppLogger;
use crate::shopping::ShoppingList;
use crate::storage::KeyValueStore;
use chrono::Utc;
use plateit_core::models::{
    Ingredient, IngredientCategory, InstructionStep, Recipe, ShoppingListEntry,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Identifier of the seeded demo recipe
pub const DEMO_RECIPE_ID: &str = "demo-1";

/// Everything restored at startup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedState {
    /// Recipe collection, newest first
    pub recipes: Vec<Recipe>,
    /// Flat shopping list and added recipe ids
    pub shopping_list: ShoppingList,
}

/// Recipes shown on first launch
#[must_use]
pub fn demo_recipes() -> Vec<Recipe> {
    vec![Recipe {
        id: DEMO_RECIPE_ID.to_owned(),
        title: "Spicy Basil Chicken (Pad Krapow)".to_owned(),
        description: "A classic Thai street food dish. Fast, spicy, and incredibly savory."
            .to_owned(),
        prep_time: "15 min".to_owned(),
        servings: "2".to_owned(),
        image_url: Some("https://picsum.photos/id/49/800/600".to_owned()),
        source_url: None,
        ingredients: vec![
            Ingredient::new("Chicken Breast", "300g", IngredientCategory::Meat),
            Ingredient::new("Thai Basil", "1 cup", IngredientCategory::Produce),
            Ingredient::new("Bird Eye Chilies", "4", IngredientCategory::Produce),
            Ingredient::new("Soy Sauce", "2 tbsp", IngredientCategory::Pantry),
            Ingredient::new("Jasmine Rice", "1 cup", IngredientCategory::Pantry),
        ],
        instructions: [
            "Chop the chicken into small bite-sized pieces.",
            "Crush garlic and chilies in a mortar.",
            "Stir fry the garlic paste in oil until fragrant.",
            "Add chicken and sauces, cook until done. Toss in basil at the end.",
        ]
        .iter()
        .zip(1_u32..)
        .map(|(text, step)| InstructionStep {
            step,
            text: (*text).to_owned(),
        })
        .collect(),
        tags: vec!["Thai".to_owned(), "Spicy".to_owned(), "Quick".to_owned()],
        created_at: Utc::now().timestamp_millis(),
    }]
}

/// Result of reading one key
enum KeyRead<T> {
    Missing,
    Loaded(T),
    Unusable,
}

async fn read_key<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> KeyRead<T> {
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return KeyRead::Missing,
        Err(e) => {
            AppLogger::log_storage_fallback(key, &e.to_string());
            return KeyRead::Unusable;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => KeyRead::Loaded(value),
        Err(e) => {
            AppLogger::log_storage_fallback(key, &e.to_string());
            KeyRead::Unusable
        }
    }
}

/// Restore application state
pub async fn load_state(store: &dyn KeyValueStore) -> LoadedState {
    let recipes = match read_key::<Vec<Recipe>>(store, storage_keys::RECIPES).await {
        KeyRead::Loaded(recipes) => recipes,
        KeyRead::Missing => {
            debug!("No stored recipes, seeding demo recipe");
            demo_recipes()
        }
        KeyRead::Unusable => Vec::new(),
    };

    let entries = match read_key::<Vec<ShoppingListEntry>>(store, storage_keys::SHOPPING_LIST)
        .await
    {
        KeyRead::Loaded(entries) => entries,
        KeyRead::Missing | KeyRead::Unusable => Vec::new(),
    };

    let recipe_ids =
        match read_key::<Vec<String>>(store, storage_keys::SHOPPING_LIST_RECIPE_IDS).await {
            KeyRead::Loaded(ids) => ids,
            KeyRead::Missing | KeyRead::Unusable => Vec::new(),
        };

    debug!(
        recipes = recipes.len(),
        list_entries = entries.len(),
        list_recipes = recipe_ids.len(),
        "Loaded persisted state"
    );

    LoadedState {
        recipes,
        shopping_list: ShoppingList::from_parts(entries, recipe_ids),
    }
}

async fn write_key<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> AppResult<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json).await
}

/// Write the recipe collection
///
/// An empty collection is not written, so the demo seed comes back on the
/// next start.
///
/// # Errors
///
/// Returns a storage or serialization error if the write fails
pub async fn save_recipes(store: &dyn KeyValueStore, recipes: &[Recipe]) -> AppResult<()> {
    if recipes.is_empty() {
        return Ok(());
    }
    write_key(store, storage_keys::RECIPES, recipes).await
}

/// Write both shopping-list keys
///
/// # Errors
///
/// Returns a storage or serialization error if either write fails
pub async fn save_shopping_list(store: &dyn KeyValueStore, list: &ShoppingList) -> AppResult<()> {
    write_key(store, storage_keys::SHOPPING_LIST, list.entries()).await?;
    write_key(store, storage_keys::SHOPPING_LIST_RECIPE_IDS, list.recipe_ids()).await
}
