// ABOUTME: Synchronous purchase guard preventing double purchases in one session
// ABOUTME: Tickets let a late purchase completion detect that its caller went away
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use plateit_core::errors::BillingError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardState {
    Idle,
    InFlight,
    Completed,
}

/// Session-wide purchase guard
///
/// `try_begin` must be called before the first await of the purchase
/// path; the check-and-set happens under a plain mutex so two requests
/// dispatched back to back cannot both pass.
#[derive(Debug, Clone)]
pub struct PurchaseGuard {
    state: Arc<Mutex<GuardState>>,
}

impl Default for PurchaseGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl PurchaseGuard {
    /// Idle guard
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(GuardState::Idle)),
        }
    }

    /// Claim the guard for one purchase attempt
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::PurchaseInProgress`] while another attempt
    /// runs and [`BillingError::AlreadyPurchased`] after one succeeded
    pub fn try_begin(&self) -> Result<PurchasePermit, BillingError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match *state {
            GuardState::InFlight => Err(BillingError::PurchaseInProgress),
            GuardState::Completed => Err(BillingError::AlreadyPurchased),
            GuardState::Idle => {
                *state = GuardState::InFlight;
                Ok(PurchasePermit {
                    state: Arc::clone(&self.state),
                    completed: false,
                })
            }
        }
    }

    /// Whether a purchase is currently running
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.current() == GuardState::InFlight
    }

    /// Whether a purchase already succeeded in this session
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.current() == GuardState::Completed
    }

    fn current(&self) -> GuardState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Proof of holding the guard
///
/// Dropping the permit without calling [`PurchasePermit::complete`]
/// returns the guard to idle, so a failed or abandoned attempt can be
/// retried.
#[derive(Debug)]
pub struct PurchasePermit {
    state: Arc<Mutex<GuardState>>,
    completed: bool,
}

impl PurchasePermit {
    /// Mark the purchase as succeeded; the guard stays closed for the session
    pub fn complete(mut self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = GuardState::Completed;
        self.completed = true;
    }
}

impl Drop for PurchasePermit {
    fn drop(&mut self) {
        if !self.completed {
            *self.state.lock().unwrap_or_else(PoisonError::into_inner) = GuardState::Idle;
        }
    }
}

/// Relevance handle for one purchase request
///
/// Clones share the flag. The completion handler checks
/// [`PurchaseTicket::is_relevant`] before touching shared state.
#[derive(Debug, Clone, Default)]
pub struct PurchaseTicket {
    dismissed: Arc<AtomicBool>,
}

impl PurchaseTicket {
    /// Fresh, relevant ticket
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The caller is gone (dialog closed)
    pub fn dismiss(&self) {
        self.dismissed.store(true, Ordering::SeqCst);
    }

    /// Whether the completion should still be applied
    #[must_use]
    pub fn is_relevant(&self) -> bool {
        !self.dismissed.load(Ordering::SeqCst)
    }
}
