// ABOUTME: Core types and constants for the PlateIt recipe server
// ABOUTME: Foundation crate with error handling, recipe models, and shared constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

#![deny(unsafe_code)]

//! # PlateIt Core
//!
//! Foundation crate providing shared types and constants for the PlateIt
//! recipe service. It changes rarely, so the server crate can rebuild
//! without touching it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `BillingError`
//! - **constants**: Storage keys, entitlement identifiers, and default limits
//! - **models**: Recipe, ingredient, and instruction data models

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Recipe, Ingredient, `IngredientCategory`, `InstructionStep`)
pub mod models;
