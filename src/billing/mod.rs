// ABOUTME: Store-agnostic entitlement abstraction for the Pro subscription
// ABOUTME: Defines offerings, packages, customer records, and the entitlement state machine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

//! # Entitlement Service
//!
//! Callers talk to an [`EntitlementProvider`]; whether a native storefront
//! or the local [`mock::MockStore`] sits behind it is invisible to them.
//!
//! ## Key Concepts
//!
//! - **Offering**: the storefront's current set of purchasable packages
//! - **Package**: a product plus billing period
//! - **`CustomerInfo`**: active entitlements keyed by identifier
//! - **`EntitlementState`**: `None`, `Active`, `Expired`, `Cancelled`
//!
//! Only `None` and `Active` are reachable through the mock store; the other
//! two states exist so a real store can be mapped without redesign.

/// Card number, expiry, and CVC checks for the checkout form
pub mod card;
/// Purchase reentrancy guard and late-completion tickets
pub mod guard;
/// Local simulation of the subscription store
pub mod mock;

pub use guard::{PurchaseGuard, PurchasePermit, PurchaseTicket};
pub use mock::{MockOutcome, MockStore, MockStoreConfig};

use async_trait::async_trait;
use plateit_core::constants::billing::ENTITLEMENT_ID;
use plateit_core::errors::BillingError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Product descriptor attached to a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store product identifier
    pub identifier: String,
    /// Display title
    pub title: String,
    /// Display description
    pub description: String,
    /// Numeric price
    pub price: f64,
    /// Localized price string ("$4.99")
    pub price_string: String,
    /// ISO currency code
    pub currency_code: String,
}

/// A purchasable unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Package identifier ("$rc_monthly")
    pub identifier: String,
    /// Billing period ("MONTHLY")
    pub package_type: String,
    /// Product sold by this package
    pub product: Product,
}

/// The storefront's current package set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offering {
    /// Packages the user may buy
    pub available_packages: Vec<Package>,
}

/// Result of an offerings lookup
///
/// `current: None` means the store could not provide a plan. Callers show
/// "plan unavailable" and disable purchasing; it is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offerings {
    /// Current offering, if any
    pub current: Option<Offering>,
}

impl Offerings {
    /// First package of the current offering
    #[must_use]
    pub fn primary_package(&self) -> Option<&Package> {
        self.current
            .as_ref()
            .and_then(|offering| offering.available_packages.first())
    }

    /// Package with `identifier` in the current offering
    #[must_use]
    pub fn find_package(&self, identifier: &str) -> Option<&Package> {
        self.current.as_ref().and_then(|offering| {
            offering
                .available_packages
                .iter()
                .find(|package| package.identifier == identifier)
        })
    }
}

/// Details of one entitlement in a customer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementInfo {
    /// Whether the entitlement currently grants access
    pub is_active: bool,
    /// Whether it renews at period end
    pub will_renew: bool,
    /// Store period type ("NORMAL", "TRIAL")
    pub period_type: String,
    /// RFC 3339 timestamp of the latest purchase
    pub latest_purchase_date: String,
}

/// Entitlement map of a customer record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlements {
    /// Entitlements keyed by identifier
    pub active: BTreeMap<String, EntitlementInfo>,
}

/// Customer record returned by every store call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Entitlements held by the customer
    pub entitlements: Entitlements,
}

impl CustomerInfo {
    /// Entitlement details for `id`
    #[must_use]
    pub fn entitlement(&self, id: &str) -> Option<&EntitlementInfo> {
        self.entitlements.active.get(id)
    }

    /// State of the Pro entitlement in this record
    #[must_use]
    pub fn pro_state(&self) -> EntitlementState {
        EntitlementState::from_info(self.entitlement(ENTITLEMENT_ID))
    }

    /// Whether the Pro entitlement is present and active
    #[must_use]
    pub fn is_pro(&self) -> bool {
        self.pro_state().is_pro()
    }
}

/// Lifecycle of the Pro entitlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntitlementState {
    /// Never granted
    #[default]
    None,
    /// Granted and active
    Active,
    /// Granted but lapsed; may still renew
    Expired,
    /// Granted, lapsed, and will not renew
    Cancelled,
}

/// Something that moves the entitlement between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntitlementEvent {
    /// A purchase completed
    Purchased,
    /// The store of record reported the entitlement as active or not
    Synced {
        /// Whether the store reports the entitlement active
        active: bool,
    },
    /// The paid period ended
    Lapsed,
    /// The user turned off renewal and the period ended
    Cancelled,
}

impl EntitlementState {
    /// Map a store record onto the state machine
    ///
    /// Absent → `None`; active → `Active`; inactive but renewing →
    /// `Expired`; inactive and not renewing → `Cancelled`.
    #[must_use]
    pub fn from_info(info: Option<&EntitlementInfo>) -> Self {
        match info {
            None => Self::None,
            Some(info) if info.is_active => Self::Active,
            Some(info) if info.will_renew => Self::Expired,
            Some(_) => Self::Cancelled,
        }
    }

    /// Apply a transition
    #[must_use]
    pub const fn apply(self, event: EntitlementEvent) -> Self {
        match (self, event) {
            (_, EntitlementEvent::Purchased | EntitlementEvent::Synced { active: true }) => {
                Self::Active
            }
            (Self::Active, EntitlementEvent::Synced { active: false } | EntitlementEvent::Lapsed) => {
                Self::Expired
            }
            (Self::Active, EntitlementEvent::Cancelled) => Self::Cancelled,
            (state, _) => state,
        }
    }

    /// Whether this state unlocks Pro features
    #[must_use]
    pub const fn is_pro(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Subscription store contract
///
/// Every call stands for a network round trip and may fail. Callers must
/// turn failures into a recoverable message; none of them are fatal.
#[async_trait]
pub trait EntitlementProvider: Send + Sync {
    /// Provider identifier for logs ("mock", "native")
    fn name(&self) -> &'static str;

    /// One-time setup; later calls return immediately
    ///
    /// # Errors
    ///
    /// Returns an error if the store SDK cannot be configured
    async fn initialize(&self) -> Result<(), BillingError>;

    /// Current purchasable packages
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached
    async fn get_offerings(&self) -> Result<Offerings, BillingError>;

    /// Buy `package` and return the updated record
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Cancelled`] when the user backs out and
    /// [`BillingError::PurchaseFailed`] when the store declines
    async fn purchase_package(&self, package: &Package) -> Result<CustomerInfo, BillingError>;

    /// Current customer record, without side effects
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read
    async fn get_customer_info(&self) -> Result<CustomerInfo, BillingError>;

    /// Re-sync from the store of record without buying anything
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached; having nothing to
    /// restore is not an error
    async fn restore_purchases(&self) -> Result<CustomerInfo, BillingError>;
}
