// ABOUTME: Main library entry point for the PlateIt recipe server
// ABOUTME: AI recipe extraction, categorized shopping lists, and a mock Pro subscription store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

#![deny(unsafe_code)]

//! # PlateIt Server
//!
//! Turns recipe links or pasted recipe text into structured recipes, builds
//! a shopping list from them grouped by grocery aisle, and gates the number
//! of stored recipes behind a Pro subscription served by a local mock store.
//!
//! ## Architecture
//!
//! - **Storage**: key-value documents behind [`storage::KeyValueStore`]
//! - **Persistence**: load and save of recipes and the shopping list
//! - **Shopping**: the flat list plus its derived category view
//! - **Billing**: the [`billing::EntitlementProvider`] contract and its mock
//! - **Extraction**: the AI boundary that produces recipes
//! - **Services / Routes**: business logic and the REST surface over it
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use plateit_server::config::ServerConfig;
//! use plateit_server::resources::ServerResourcesBuilder;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env()?;
//! let resources = ServerResourcesBuilder::new().with_config(config).build().await?;
//! println!("{} recipes loaded", resources.state.read().await.recipes.len());
//! # Ok(())
//! # }
//! ```

/// Entitlement provider contract, mock store, purchase guard, card checks
pub mod billing;

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// Unified error handling
pub mod errors;

/// AI recipe extraction
pub mod extraction;

/// Production logging and structured output
pub mod logging;

/// Loading and saving application documents
pub mod persistence;

/// Shared resources handed to routes and services
pub mod resources;

/// REST route handlers
pub mod routes;

/// Router assembly and the HTTP server loop
pub mod server;

/// Business logic behind the routes
pub mod services;

/// Shopping list and its grouped view
pub mod shopping;

/// In-memory application state
pub mod state;

/// Key-value storage backends
pub mod storage;
