// ABOUTME: Route module organization for the PlateIt HTTP API
// ABOUTME: One module per domain, each with thin handlers delegating to services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

//! Route module for the PlateIt server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Request extractors with structured rejections
pub mod extract;
/// Health check and readiness routes
pub mod health;
/// Recipe collection routes
pub mod recipes;
/// Shopping list routes
pub mod shopping_list;
/// Subscription and checkout routes
pub mod subscription;

pub use extract::JsonBody;
pub use health::HealthRoutes;
pub use recipes::RecipeRoutes;
pub use shopping_list::ShoppingListRoutes;
pub use subscription::SubscriptionRoutes;
