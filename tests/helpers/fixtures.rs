// ABOUTME: Recipe and shopping list fixtures shared by integration tests
// ABOUTME: Deterministic data so grouping and ordering assertions stay readable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use plateit_core::models::{Ingredient, IngredientCategory, InstructionStep, Recipe};

/// Recipe with the given ingredients and two steps
pub fn recipe(id: &str, ingredients: &[(&str, &str, IngredientCategory)]) -> Recipe {
    Recipe {
        id: id.to_owned(),
        title: format!("Recipe {id}"),
        description: "Test recipe".to_owned(),
        prep_time: "10 min".to_owned(),
        servings: "2".to_owned(),
        image_url: None,
        source_url: None,
        ingredients: ingredients
            .iter()
            .map(|(item, amount, category)| Ingredient::new(*item, *amount, *category))
            .collect(),
        instructions: vec![
            InstructionStep {
                step: 1,
                text: "Prepare".to_owned(),
            },
            InstructionStep {
                step: 2,
                text: "Cook".to_owned(),
            },
        ],
        tags: Vec::new(),
        created_at: 1_700_000_000_000,
    }
}

/// Tomato and basil pasta: Produce, Produce, Pantry, Dairy
pub fn pasta() -> Recipe {
    recipe(
        "pasta",
        &[
            ("Tomato", "4", IngredientCategory::Produce),
            ("Basil", "1 bunch", IngredientCategory::Produce),
            ("Spaghetti", "200g", IngredientCategory::Pantry),
            ("Parmesan", "50g", IngredientCategory::Dairy),
        ],
    )
}

/// Steak and salt: Meat, Other
pub fn steak() -> Recipe {
    recipe(
        "steak",
        &[
            ("Ribeye", "1", IngredientCategory::Meat),
            ("Flaky Salt", "pinch", IngredientCategory::Other),
        ],
    )
}
