// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Mutates application state and writes changes through to storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

//! Domain service layer
//!
//! Route handlers stay thin and delegate here. The state lock is never held
//! across a billing or extraction call.

/// Recipe listing, extraction, and adding ingredients to the list
pub mod recipes;

/// Shopping list reads and mutations
pub mod shopping;

/// Entitlement sync, plan lookup, purchase, and restore
pub mod subscription;
