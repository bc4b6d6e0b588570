// ABOUTME: Health check route handlers for liveness and readiness probes
// ABOUTME: Readiness also reports which storage, billing, and extraction backends are wired
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use crate::constants::service_names;
use crate::resources::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(resources)
    }

    async fn handle_health() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "healthy",
            "service": service_names::PLATEIT_SERVER,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn handle_ready(
        State(resources): State<Arc<ServerResources>>,
    ) -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "ready",
            "storage": resources.storage.backend_name(),
            "billing": resources.billing.name(),
            "extraction": resources.extractor.as_ref().map_or("disabled", |e| e.name()),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}
