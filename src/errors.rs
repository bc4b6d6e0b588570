// ABOUTME: Re-exports the unified error types from plateit-core
// ABOUTME: Keeps `crate::errors` paths stable for server modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

//! Unified error handling, defined in `plateit_core::errors`

pub use plateit_core::errors::{
    AppError, AppResult, BillingError, ErrorCode, ErrorContext, ErrorResponse,
    ErrorResponseDetails,
};
