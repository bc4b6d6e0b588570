// ABOUTME: Subscription business logic: startup sync, plan lookup, purchase, restore
// ABOUTME: Applies entitlement changes to shared state only while the purchase ticket is relevant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

//! # Subscription Service
//!
//! Sits between the HTTP surface and an [`EntitlementProvider`]. Store
//! failures never escape as crashes: offerings problems become
//! [`PlanAvailability::Unavailable`], and purchase problems become
//! recoverable [`BillingError`]s.
//!
//! [`EntitlementProvider`]: crate::billing::EntitlementProvider

use crate::billing::card::{self, CardDetails, CardValidation};
use crate::billing::{CustomerInfo, EntitlementState, Package};
use crate::constants::billing::ENTITLEMENT_ID;
use crate::errors::{AppError, AppResult, BillingError};
use crate::logging::AppLogger;
use crate::resources::ServerResources;
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

/// Reason reported when the store has no current offering
const NO_OFFERING_REASON: &str = "No subscription plan is currently offered";

/// Entitlement as reported to callers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatus {
    /// Whether Pro features are unlocked
    pub is_pro: bool,
    /// Entitlement lifecycle state
    pub entitlement: EntitlementState,
    /// Entitlement identifier checked
    pub entitlement_id: &'static str,
    /// Whether a purchase is running
    pub purchase_in_progress: bool,
}

/// Whether a plan can be bought right now
#[derive(Debug, Clone, PartialEq)]
pub enum PlanAvailability {
    /// The plan on offer
    Available(Package),
    /// Nothing to buy; purchasing is disabled
    Unavailable {
        /// Why no plan is available
        reason: String,
    },
}

/// Wire form of [`PlanAvailability`]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    /// Whether a plan can be bought
    pub available: bool,
    /// The plan on offer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<Package>,
    /// Why no plan is available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<PlanAvailability> for PlanResponse {
    fn from(plan: PlanAvailability) -> Self {
        match plan {
            PlanAvailability::Available(package) => Self {
                available: true,
                package: Some(package),
                reason: None,
            },
            PlanAvailability::Unavailable { reason } => Self {
                available: false,
                package: None,
                reason: Some(reason),
            },
        }
    }
}

/// Current entitlement
pub async fn status(resources: &ServerResources) -> SubscriptionStatus {
    let entitlement = resources.state.read().await.entitlement;
    SubscriptionStatus {
        is_pro: entitlement.is_pro(),
        entitlement,
        entitlement_id: ENTITLEMENT_ID,
        purchase_in_progress: resources.purchase_guard.is_in_flight(),
    }
}

/// Initialize the store and adopt its entitlement
///
/// Failures are logged and leave the user on the free tier.
pub async fn startup_sync(resources: &ServerResources) -> SubscriptionStatus {
    let provider = resources.billing.as_ref();

    if let Err(e) = provider.initialize().await {
        warn!(error = %e, "Subscription store failed to initialize");
        return status(resources).await;
    }

    match provider.get_customer_info().await {
        Ok(customer) => {
            resources.state.write().await.sync_entitlement(&customer);
            AppLogger::log_billing_event(provider.name(), "startup_sync", true, customer.is_pro());
        }
        Err(e) => {
            warn!(error = %e, "Could not read entitlement at startup");
            AppLogger::log_billing_event(provider.name(), "startup_sync", false, false);
        }
    }

    status(resources).await
}

/// The plan the store currently offers
pub async fn plan(resources: &ServerResources) -> PlanAvailability {
    match resources.billing.get_offerings().await {
        Ok(offerings) => offerings.primary_package().cloned().map_or_else(
            || PlanAvailability::Unavailable {
                reason: NO_OFFERING_REASON.to_owned(),
            },
            PlanAvailability::Available,
        ),
        Err(e) => {
            warn!(error = %e, "Could not load offerings");
            PlanAvailability::Unavailable {
                reason: e.user_message().to_owned(),
            }
        }
    }
}

/// Buy the package with `package_id`
///
/// The guard is claimed before anything else; a concurrent call fails
/// immediately with `PurchaseInProgress`. A completion whose ticket was
/// dismissed keeps the store's grant but does not flip the in-memory
/// entitlement; the next refresh picks it up.
///
/// # Errors
///
/// Returns the [`BillingError`] of whichever step failed
pub async fn purchase(resources: &ServerResources, package_id: &str) -> AppResult<SubscriptionStatus> {
    let permit = resources.purchase_guard.try_begin()?;
    let active = resources.begin_purchase_ticket();

    let result = run_purchase(resources, package_id).await;
    let ticket = active.finish();

    let provider = resources.billing.name();
    match result {
        Ok(customer) => {
            permit.complete();
            if ticket.is_relevant() {
                resources.state.write().await.sync_entitlement(&customer);
            } else {
                info!("Purchase completed after the caller went away; state left for next refresh");
            }
            AppLogger::log_billing_event(provider, "purchase", true, customer.is_pro());
            Ok(status(resources).await)
        }
        Err(e) => {
            AppLogger::log_billing_event(provider, "purchase", false, false);
            Err(e.into())
        }
    }
}

async fn run_purchase(
    resources: &ServerResources,
    package_id: &str,
) -> Result<CustomerInfo, BillingError> {
    if resources.state.read().await.is_pro() {
        return Err(BillingError::AlreadyPurchased);
    }

    let offerings = resources.billing.get_offerings().await?;
    if offerings.current.is_none() {
        return Err(BillingError::StoreUnavailable(NO_OFFERING_REASON.to_owned()));
    }
    let package = offerings
        .find_package(package_id)
        .cloned()
        .ok_or_else(|| BillingError::UnknownPackage(package_id.to_owned()))?;

    resources.billing.purchase_package(&package).await
}

/// Mark the running purchase as abandoned by its caller
///
/// Returns whether a purchase was running.
pub fn dismiss_purchase(resources: &ServerResources) -> bool {
    resources.dismiss_active_purchase()
}

/// Re-sync from the store of record
///
/// # Errors
///
/// Returns a billing error if the store cannot be reached
pub async fn restore(resources: &ServerResources) -> AppResult<SubscriptionStatus> {
    let provider = resources.billing.as_ref();
    let customer = provider.restore_purchases().await.map_err(|e| {
        AppLogger::log_billing_event(provider.name(), "restore", false, false);
        AppError::from(e)
    })?;

    resources.state.write().await.sync_entitlement(&customer);
    AppLogger::log_billing_event(provider.name(), "restore", true, customer.is_pro());
    Ok(status(resources).await)
}

/// Re-read the entitlement without the restore flow
///
/// # Errors
///
/// Returns a billing error if the record cannot be read
pub async fn refresh(resources: &ServerResources) -> AppResult<SubscriptionStatus> {
    let customer = resources.billing.get_customer_info().await?;
    resources.state.write().await.sync_entitlement(&customer);
    Ok(status(resources).await)
}

/// Check the checkout form against today's date
#[must_use]
pub fn validate_card(details: &CardDetails) -> CardValidation {
    card::validate_card(details, Utc::now().date_naive())
}
