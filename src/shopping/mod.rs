// ABOUTME: Flat shopping list state with recipe-level dedupe and entry operations
// ABOUTME: Supports both positional and stable-identifier addressing of entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

//! # Shopping List
//!
//! The flat list is the single source of truth; the grouped view in
//! [`grouping`] is derived from it on demand. Entries can be addressed by
//! their position (as the grouped view's `original_index` reports it) or by
//! their stable [`EntryId`], which survives removals of other entries.

/// Category grouping and progress derivation
pub mod grouping;

pub use grouping::{
    group_by_category, progress_percent, CategoryGroup, GroupedEntry, GroupedShoppingList,
    ShoppingListSummary,
};

use crate::errors::{AppError, AppResult};
use plateit_core::models::{EntryId, Recipe, ShoppingListEntry};
use serde::{Deserialize, Serialize};

/// The flat shopping list plus the ids of recipes already added to it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    entries: Vec<ShoppingListEntry>,
    recipe_ids: Vec<String>,
}

impl ShoppingList {
    /// Empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted parts
    #[must_use]
    pub fn from_parts(entries: Vec<ShoppingListEntry>, recipe_ids: Vec<String>) -> Self {
        Self {
            entries,
            recipe_ids,
        }
    }

    /// Flat entries in insertion order
    #[must_use]
    pub fn entries(&self) -> &[ShoppingListEntry] {
        &self.entries
    }

    /// Recipe ids whose ingredients are on the list, in the order added
    #[must_use]
    pub fn recipe_ids(&self) -> &[String] {
        &self.recipe_ids
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a recipe has already been added
    #[must_use]
    pub fn contains_recipe(&self, recipe_id: &str) -> bool {
        self.recipe_ids.iter().any(|id| id == recipe_id)
    }

    /// Append every ingredient of `recipe`, unchecked
    ///
    /// Returns `false` and changes nothing when the recipe was already
    /// added. Ingredients are not merged across recipes.
    pub fn add_recipe(&mut self, recipe: &Recipe) -> bool {
        if self.contains_recipe(&recipe.id) {
            return false;
        }
        self.recipe_ids.push(recipe.id.clone());
        self.entries.extend(
            recipe
                .ingredients
                .iter()
                .map(ShoppingListEntry::from_ingredient),
        );
        true
    }

    /// Flip the checked flag of the entry at `index`
    ///
    /// # Errors
    ///
    /// Returns a not-found error if `index` is out of range
    pub fn toggle_at(&mut self, index: usize) -> AppResult<&ShoppingListEntry> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or_else(|| Self::index_not_found(index, len))?;
        entry.checked = !entry.checked;
        Ok(entry)
    }

    /// Remove the entry at `index`; later entries shift down by one
    ///
    /// # Errors
    ///
    /// Returns a not-found error if `index` is out of range
    pub fn remove_at(&mut self, index: usize) -> AppResult<ShoppingListEntry> {
        if index >= self.entries.len() {
            return Err(Self::index_not_found(index, self.entries.len()));
        }
        Ok(self.entries.remove(index))
    }

    /// Current position of an entry
    #[must_use]
    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Flip the checked flag of the entry with `id`
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no entry has `id`
    pub fn toggle(&mut self, id: EntryId) -> AppResult<&ShoppingListEntry> {
        let index = self
            .position_of(id)
            .ok_or_else(|| AppError::not_found(format!("Shopping list entry {id}")))?;
        self.toggle_at(index)
    }

    /// Remove the entry with `id`
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no entry has `id`
    pub fn remove(&mut self, id: EntryId) -> AppResult<ShoppingListEntry> {
        let index = self
            .position_of(id)
            .ok_or_else(|| AppError::not_found(format!("Shopping list entry {id}")))?;
        self.remove_at(index)
    }

    /// Empty both the entries and the added-recipe set
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recipe_ids.clear();
    }

    /// Grouped view and progress, derived fresh
    #[must_use]
    pub fn summary(&self) -> ShoppingListSummary {
        ShoppingListSummary::derive(&self.entries)
    }

    fn index_not_found(index: usize, len: usize) -> AppError {
        AppError::not_found(format!("Shopping list item at index {index}"))
            .with_details(serde_json::json!({ "index": index, "length": len }))
    }
}
