// ABOUTME: Route handlers for the recipe collection REST API
// ABOUTME: Listing with quota, AI-backed creation, lookup, and adding ingredients to the list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use super::JsonBody;
use crate::{errors::AppError, resources::ServerResources, services::recipes};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Body of `POST /api/recipes`
#[derive(Debug, Deserialize)]
pub struct CreateRecipeBody {
    /// Recipe link or pasted recipe text
    pub input: String,
}

/// Recipe routes handler
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes", get(Self::handle_list))
            .route("/api/recipes", post(Self::handle_create))
            .route("/api/recipes/:id", get(Self::handle_get))
            .route(
                "/api/recipes/:id/shopping-list",
                post(Self::handle_add_to_list),
            )
            .with_state(resources)
    }

    /// Handle GET /api/recipes
    async fn handle_list(State(resources): State<Arc<ServerResources>>) -> Response {
        let list = recipes::list_recipes(&resources).await;
        (StatusCode::OK, Json(list)).into_response()
    }

    /// Handle POST /api/recipes
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(body): JsonBody<CreateRecipeBody>,
    ) -> Result<Response, AppError> {
        let recipe = recipes::add_recipe_from_input(&resources, &body.input).await?;
        Ok((StatusCode::CREATED, Json(recipe)).into_response())
    }

    /// Handle GET /api/recipes/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let recipe = recipes::get_recipe(&resources, &id).await?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// Handle POST /api/recipes/:id/shopping-list
    async fn handle_add_to_list(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let outcome = recipes::add_to_shopping_list(&resources, &id).await?;
        Ok((StatusCode::OK, Json(outcome)).into_response())
    }
}
