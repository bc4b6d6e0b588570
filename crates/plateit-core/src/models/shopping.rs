// ABOUTME: Shopping list entry model with a stable generated identifier
// ABOUTME: Legacy entries stored without an id receive a fresh one on load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use super::recipe::{Ingredient, IngredientCategory};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier of a shopping list entry, assigned at insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Generate a new random identifier
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// An ingredient placed on the shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListEntry {
    /// Stable identifier
    #[serde(default)]
    pub id: EntryId,
    /// Item name
    pub item: String,
    /// Free-text amount
    #[serde(default)]
    pub amount: String,
    /// Aisle category
    #[serde(default)]
    pub category: IngredientCategory,
    /// Whether the shopper has ticked the entry off
    #[serde(default)]
    pub checked: bool,
}

impl ShoppingListEntry {
    /// Place an ingredient on the list, unchecked, with a fresh id
    #[must_use]
    pub fn from_ingredient(ingredient: &Ingredient) -> Self {
        Self {
            id: EntryId::new(),
            item: ingredient.item.clone(),
            amount: ingredient.amount.clone(),
            category: ingredient.category,
            checked: false,
        }
    }
}
