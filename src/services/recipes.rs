// ABOUTME: Recipe business logic: listing with quota, extraction-backed creation
// ABOUTME: Also appends a recipe's ingredients to the shopping list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use crate::constants::defaults::MAX_EXTRACTION_INPUT_CHARS;
use crate::errors::{AppError, AppResult};
use crate::extraction::NO_RECIPE_MESSAGE;
use crate::logging::AppLogger;
use crate::persistence;
use crate::resources::ServerResources;
use crate::shopping::ShoppingListSummary;
use crate::state::RecipeQuota;
use plateit_core::models::Recipe;
use serde::Serialize;
use tracing::info;

/// Recipes plus the caller's allowance
#[derive(Debug, Clone, Serialize)]
pub struct RecipeList {
    /// Recipes, newest first
    pub recipes: Vec<Recipe>,
    /// Allowance
    pub quota: RecipeQuota,
}

/// Result of adding a recipe's ingredients to the list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToListOutcome {
    /// False when the recipe was already on the list
    pub added: bool,
    /// List after the call
    pub shopping_list: ShoppingListSummary,
}

/// All recipes with the current quota
pub async fn list_recipes(resources: &ServerResources) -> RecipeList {
    let state = resources.state.read().await;
    RecipeList {
        recipes: state.recipes.clone(),
        quota: state.quota(resources.config.recipe_limit),
    }
}

/// Current quota only
pub async fn quota(resources: &ServerResources) -> RecipeQuota {
    resources
        .state
        .read()
        .await
        .quota(resources.config.recipe_limit)
}

/// One recipe by id
///
/// # Errors
///
/// Returns a not-found error for an unknown id
pub async fn get_recipe(resources: &ServerResources, id: &str) -> AppResult<Recipe> {
    resources
        .state
        .read()
        .await
        .find_recipe(id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))
}

/// Extract a recipe from a URL or pasted text and store it
///
/// The free-tier limit is checked before the AI call. It is advisory: the
/// stored collection is never trimmed to fit it.
///
/// # Errors
///
/// Returns `InvalidInput` for blank or oversized input, `QuotaExceeded`
/// when a free user is at the limit, `ExternalServiceUnavailable` when no
/// extractor is configured, the extractor's error when the AI call fails,
/// `ExtractionFailed` when no recipe came back, and a storage error when
/// the collection cannot be saved
pub async fn add_recipe_from_input(resources: &ServerResources, input: &str) -> AppResult<Recipe> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AppError::invalid_input("Paste a recipe link or recipe text"));
    }
    if input.chars().count() > MAX_EXTRACTION_INPUT_CHARS {
        return Err(AppError::invalid_input(format!(
            "Recipe input is limited to {MAX_EXTRACTION_INPUT_CHARS} characters"
        )));
    }

    let quota = quota(resources).await;
    if !quota.can_add {
        return Err(AppError::quota_exceeded(quota.used, quota.limit));
    }

    let extractor = resources
        .extractor
        .as_ref()
        .ok_or_else(|| AppError::service_unavailable("Recipe extraction is not configured"))?;

    let extracted = extractor
        .extract(input)
        .await?
        .ok_or_else(|| AppError::extraction_failed(NO_RECIPE_MESSAGE))?;

    let recipe = extracted.into_recipe();

    let mut state = resources.state.write().await;
    state.prepend_recipe(recipe.clone());
    persistence::save_recipes(resources.storage.shared().as_ref(), &state.recipes).await?;
    AppLogger::log_recipe_added(&recipe.id, &recipe.title, state.recipes.len());

    Ok(recipe)
}

/// Append a stored recipe's ingredients to the shopping list
///
/// # Errors
///
/// Returns a not-found error for an unknown recipe and a storage error when
/// the list cannot be saved
pub async fn add_to_shopping_list(
    resources: &ServerResources,
    recipe_id: &str,
) -> AppResult<AddToListOutcome> {
    let mut state = resources.state.write().await;
    let recipe = state
        .find_recipe(recipe_id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))?;

    let added = state.shopping_list.add_recipe(&recipe);
    if added {
        persistence::save_shopping_list(resources.storage.shared().as_ref(), &state.shopping_list)
            .await?;
        AppLogger::log_list_mutation(
            "add_recipe",
            state.shopping_list.len(),
            state.shopping_list.recipe_ids().len(),
        );
    } else {
        info!(recipe.id = %recipe_id, "Recipe already on the shopping list");
    }

    Ok(AddToListOutcome {
        added,
        shopping_list: state.shopping_list.summary(),
    })
}
