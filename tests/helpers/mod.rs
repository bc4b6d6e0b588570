// ABOUTME: Shared test helpers for integration tests
// ABOUTME: Exports the Axum request helper and recipe fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

pub mod axum_test;
pub mod fixtures;
