// ABOUTME: Core data models for recipes, ingredients, and shopping list entries
// ABOUTME: Wire format keeps the camelCase keys used by stored documents and API clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

mod recipe;
mod shopping;

pub use recipe::{Ingredient, IngredientCategory, InstructionStep, Recipe};
pub use shopping::{EntryId, ShoppingListEntry};
