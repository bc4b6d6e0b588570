// ABOUTME: Route handlers for the subscription REST API
// ABOUTME: Entitlement status, plan lookup, purchase, dismissal, restore, and card checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use super::JsonBody;
use crate::{
    billing::card::CardDetails,
    errors::AppError,
    resources::ServerResources,
    services::subscription::{self, PlanResponse},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Body of `POST /api/subscription/purchase`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseBody {
    /// Package to buy
    pub package_id: String,
}

/// Subscription routes handler
pub struct SubscriptionRoutes;

impl SubscriptionRoutes {
    /// Create all subscription routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/subscription", get(Self::handle_status))
            .route("/api/subscription/plan", get(Self::handle_plan))
            .route("/api/subscription/purchase", post(Self::handle_purchase))
            .route(
                "/api/subscription/purchase/dismiss",
                post(Self::handle_dismiss),
            )
            .route("/api/subscription/restore", post(Self::handle_restore))
            .route("/api/subscription/refresh", post(Self::handle_refresh))
            .route(
                "/api/subscription/card/validate",
                post(Self::handle_validate_card),
            )
            .with_state(resources)
    }

    /// Handle GET /api/subscription
    async fn handle_status(State(resources): State<Arc<ServerResources>>) -> Response {
        (StatusCode::OK, Json(subscription::status(&resources).await)).into_response()
    }

    /// Handle GET /api/subscription/plan
    async fn handle_plan(State(resources): State<Arc<ServerResources>>) -> Response {
        let plan = PlanResponse::from(subscription::plan(&resources).await);
        (StatusCode::OK, Json(plan)).into_response()
    }

    /// Handle POST /api/subscription/purchase
    async fn handle_purchase(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(body): JsonBody<PurchaseBody>,
    ) -> Result<Response, AppError> {
        let status = subscription::purchase(&resources, &body.package_id).await?;
        Ok((StatusCode::OK, Json(status)).into_response())
    }

    /// Handle POST /api/subscription/purchase/dismiss
    async fn handle_dismiss(State(resources): State<Arc<ServerResources>>) -> Response {
        let dismissed = subscription::dismiss_purchase(&resources);
        (
            StatusCode::OK,
            Json(serde_json::json!({ "dismissed": dismissed })),
        )
            .into_response()
    }

    /// Handle POST /api/subscription/restore
    async fn handle_restore(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let status = subscription::restore(&resources).await?;
        Ok((StatusCode::OK, Json(status)).into_response())
    }

    /// Handle POST /api/subscription/refresh
    async fn handle_refresh(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let status = subscription::refresh(&resources).await?;
        Ok((StatusCode::OK, Json(status)).into_response())
    }

    /// Handle POST /api/subscription/card/validate
    async fn handle_validate_card(JsonBody(details): JsonBody<CardDetails>) -> Response {
        (StatusCode::OK, Json(subscription::validate_card(&details))).into_response()
    }
}
