// ABOUTME: Shopping list business logic over the shared application state
// ABOUTME: Every mutation is written through to storage before returning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use crate::errors::AppResult;
use crate::logging::AppLogger;
use crate::persistence;
use crate::resources::ServerResources;
use crate::shopping::{ShoppingList, ShoppingListSummary};
use plateit_core::models::EntryId;

/// Grouped view and progress
pub async fn summary(resources: &ServerResources) -> ShoppingListSummary {
    resources.state.read().await.shopping_list.summary()
}

/// Apply `mutation` to the list, persist, and return the new summary
async fn mutate<F>(
    resources: &ServerResources,
    operation: &str,
    mutation: F,
) -> AppResult<ShoppingListSummary>
where
    F: FnOnce(&mut ShoppingList) -> AppResult<()> + Send,
{
    let mut state = resources.state.write().await;
    mutation(&mut state.shopping_list)?;
    persistence::save_shopping_list(resources.storage.shared().as_ref(), &state.shopping_list)
        .await?;
    AppLogger::log_list_mutation(
        operation,
        state.shopping_list.len(),
        state.shopping_list.recipe_ids().len(),
    );
    Ok(state.shopping_list.summary())
}

/// Toggle the entry at a flat-list position
///
/// # Errors
///
/// Returns a not-found error for an out-of-range index and a storage error
/// when the list cannot be saved
pub async fn toggle_at(resources: &ServerResources, index: usize) -> AppResult<ShoppingListSummary> {
    mutate(resources, "toggle", |list| list.toggle_at(index).map(|_| ())).await
}

/// Remove the entry at a flat-list position
///
/// # Errors
///
/// Returns a not-found error for an out-of-range index and a storage error
/// when the list cannot be saved
pub async fn remove_at(resources: &ServerResources, index: usize) -> AppResult<ShoppingListSummary> {
    mutate(resources, "remove", |list| list.remove_at(index).map(|_| ())).await
}

/// Toggle the entry with `id`
///
/// # Errors
///
/// Returns a not-found error for an unknown id and a storage error when the
/// list cannot be saved
pub async fn toggle_entry(resources: &ServerResources, id: EntryId) -> AppResult<ShoppingListSummary> {
    mutate(resources, "toggle", |list| list.toggle(id).map(|_| ())).await
}

/// Remove the entry with `id`
///
/// # Errors
///
/// Returns a not-found error for an unknown id and a storage error when the
/// list cannot be saved
pub async fn remove_entry(resources: &ServerResources, id: EntryId) -> AppResult<ShoppingListSummary> {
    mutate(resources, "remove", |list| list.remove(id).map(|_| ())).await
}

/// Empty the list and forget which recipes were added
///
/// # Errors
///
/// Returns a storage error when the list cannot be saved
pub async fn clear(resources: &ServerResources) -> AppResult<ShoppingListSummary> {
    mutate(resources, "clear", |list| {
        list.clear();
        Ok(())
    })
    .await
}
