// ABOUTME: Route handlers for the shopping list REST API
// ABOUTME: Grouped view plus toggle and remove by flat index or by entry id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use crate::{errors::AppError, resources::ServerResources, services::shopping};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use plateit_core::models::EntryId;
use std::sync::Arc;

/// Shopping list routes handler
pub struct ShoppingListRoutes;

impl ShoppingListRoutes {
    /// Create all shopping list routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/shopping-list", get(Self::handle_get))
            .route("/api/shopping-list", delete(Self::handle_clear))
            .route(
                "/api/shopping-list/items/:index/toggle",
                post(Self::handle_toggle_at),
            )
            .route(
                "/api/shopping-list/items/:index",
                delete(Self::handle_remove_at),
            )
            .route(
                "/api/shopping-list/entries/:id/toggle",
                post(Self::handle_toggle_entry),
            )
            .route(
                "/api/shopping-list/entries/:id",
                delete(Self::handle_remove_entry),
            )
            .with_state(resources)
    }

    fn parse_index(raw: &str) -> Result<usize, AppError> {
        raw.parse()
            .map_err(|_| AppError::invalid_input(format!("Invalid list index: {raw}")))
    }

    fn parse_entry_id(raw: &str) -> Result<EntryId, AppError> {
        raw.parse()
            .map_err(|_| AppError::invalid_input(format!("Invalid entry id: {raw}")))
    }

    /// Handle GET /api/shopping-list
    async fn handle_get(State(resources): State<Arc<ServerResources>>) -> Response {
        (StatusCode::OK, Json(shopping::summary(&resources).await)).into_response()
    }

    /// Handle DELETE /api/shopping-list
    async fn handle_clear(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let summary = shopping::clear(&resources).await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }

    /// Handle POST /api/shopping-list/items/:index/toggle
    async fn handle_toggle_at(
        State(resources): State<Arc<ServerResources>>,
        Path(index): Path<String>,
    ) -> Result<Response, AppError> {
        let summary = shopping::toggle_at(&resources, Self::parse_index(&index)?).await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }

    /// Handle DELETE /api/shopping-list/items/:index
    async fn handle_remove_at(
        State(resources): State<Arc<ServerResources>>,
        Path(index): Path<String>,
    ) -> Result<Response, AppError> {
        let summary = shopping::remove_at(&resources, Self::parse_index(&index)?).await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }

    /// Handle POST /api/shopping-list/entries/:id/toggle
    async fn handle_toggle_entry(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let summary = shopping::toggle_entry(&resources, Self::parse_entry_id(&id)?).await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }

    /// Handle DELETE /api/shopping-list/entries/:id
    async fn handle_remove_entry(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let summary = shopping::remove_entry(&resources, Self::parse_entry_id(&id)?).await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }
}
