// ABOUTME: Billing-specific error types for the entitlement and purchase flow
// ABOUTME: Keeps cancelled and failed purchases distinguishable for user messaging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Errors raised by an entitlement provider or the purchase guard.
///
/// Every variant is recoverable. Callers turn them into user-facing
/// messages through the `AppError` conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    /// The user backed out of the store sheet
    #[error("purchase cancelled by user")]
    Cancelled,
    /// The store declined or the network failed during purchase
    #[error("purchase failed: {0}")]
    PurchaseFailed(String),
    /// Another purchase is already running in this session
    #[error("a purchase is already in progress")]
    PurchaseInProgress,
    /// A purchase already succeeded in this session
    #[error("the subscription was already purchased in this session")]
    AlreadyPurchased,
    /// The package is not part of the current offering
    #[error("unknown package: {0}")]
    UnknownPackage(String),
    /// The store could not be reached
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    /// Persisting the entitlement flag failed
    #[error("entitlement storage error: {0}")]
    Storage(String),
}

impl BillingError {
    /// Error code used when surfacing this failure
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Cancelled => ErrorCode::PurchaseCancelled,
            Self::PurchaseFailed(_) => ErrorCode::PurchaseFailed,
            Self::PurchaseInProgress | Self::AlreadyPurchased => ErrorCode::ResourceLocked,
            Self::UnknownPackage(_) => ErrorCode::ResourceNotFound,
            Self::StoreUnavailable(_) => ErrorCode::ExternalServiceUnavailable,
            Self::Storage(_) => ErrorCode::StorageError,
        }
    }

    /// Message shown to the user
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Cancelled => "Purchase cancelled. You have not been charged.",
            Self::PurchaseFailed(_) => "We couldn't complete your purchase. Please try again.",
            Self::PurchaseInProgress => "Your purchase is still processing.",
            Self::AlreadyPurchased => "You already have PlateIt Pro.",
            Self::UnknownPackage(_) => "That plan is no longer available.",
            Self::StoreUnavailable(_) => {
                "The Pro plan is unavailable right now. Please try again later."
            }
            Self::Storage(_) => "We couldn't save your subscription status.",
        }
    }
}

impl From<BillingError> for AppError {
    fn from(error: BillingError) -> Self {
        let code = error.code();
        let message = error.user_message();
        Self::new(code, message).with_source(error)
    }
}
