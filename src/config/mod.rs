// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Exposes the environment-driven server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

/// Environment and server configuration
pub mod environment;

pub use environment::{Environment, ExtractionConfig, ServerConfig};
