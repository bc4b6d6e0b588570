// ABOUTME: Recipe, ingredient, and instruction models produced by AI extraction
// ABOUTME: Ingredient categories parse leniently, unknown values fall back to Other
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Grocery aisle an ingredient belongs to
///
/// Parsing is exact and case-sensitive: only `Produce`, `Dairy`, `Meat` and
/// `Pantry` are recognized, everything else (including `produce`, the empty
/// string, `null`, or a missing field) becomes [`IngredientCategory::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum IngredientCategory {
    /// Fruit, vegetables, herbs
    Produce,
    /// Milk, cheese, eggs
    Dairy,
    /// Meat and fish
    Meat,
    /// Dry goods, sauces, spices
    Pantry,
    /// Anything unrecognized
    #[default]
    Other,
}

impl IngredientCategory {
    /// Display order used by the grouped shopping list
    pub const DISPLAY_ORDER: [Self; 5] = [
        Self::Produce,
        Self::Meat,
        Self::Dairy,
        Self::Pantry,
        Self::Other,
    ];

    /// Parse a category name, falling back to `Other`
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Produce" => Self::Produce,
            "Dairy" => Self::Dairy,
            "Meat" => Self::Meat,
            "Pantry" => Self::Pantry,
            _ => Self::Other,
        }
    }

    /// Canonical name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Produce => "Produce",
            Self::Dairy => "Dairy",
            Self::Meat => "Meat",
            Self::Pantry => "Pantry",
            Self::Other => "Other",
        }
    }

    /// Position in [`Self::DISPLAY_ORDER`]
    #[must_use]
    pub const fn display_rank(&self) -> usize {
        match self {
            Self::Produce => 0,
            Self::Meat => 1,
            Self::Dairy => 2,
            Self::Pantry => 3,
            Self::Other => 4,
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IngredientCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(Self::Other, Self::parse))
    }
}

/// A single ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Normalized item name ("Onion")
    pub item: String,
    /// Free-text amount ("2 large"), never parsed
    #[serde(default)]
    pub amount: String,
    /// Aisle category
    #[serde(default)]
    pub category: IngredientCategory,
    /// Checked flag, only meaningful once on the shopping list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}

impl Ingredient {
    /// Create an unchecked ingredient
    pub fn new(
        item: impl Into<String>,
        amount: impl Into<String>,
        category: IngredientCategory,
    ) -> Self {
        Self {
            item: item.into(),
            amount: amount.into(),
            category,
            checked: None,
        }
    }
}

/// One numbered cooking step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionStep {
    /// 1-based step number as reported by the extractor
    pub step: u32,
    /// Instruction text
    pub text: String,
}

/// A stored recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique, stable identifier
    pub id: String,
    /// Recipe title
    pub title: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Free-text preparation time ("15 min")
    #[serde(default)]
    pub prep_time: String,
    /// Free-text servings ("2")
    #[serde(default)]
    pub servings: String,
    /// Image URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Where the recipe came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Ingredients in recipe order
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Cooking steps in order
    #[serde(default)]
    pub instructions: Vec<InstructionStep>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time in milliseconds since the Unix epoch
    pub created_at: i64,
}

impl Recipe {
    /// Whether step numbers run 1, 2, 3... in order
    ///
    /// The extractor does not guarantee this; a `false` result is only a
    /// display hint.
    #[must_use]
    pub fn steps_are_sequential(&self) -> bool {
        self.instructions
            .iter()
            .zip(1_u32..)
            .all(|(step, expected)| step.step == expected)
    }
}
