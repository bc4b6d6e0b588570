// ABOUTME: Local simulation of the subscription store with configurable latency
// ABOUTME: Persists the Pro grant as a flag in the shared key-value store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use super::{
    CustomerInfo, EntitlementInfo, EntitlementProvider, Entitlements, Offering, Offerings,
    Package, Product,
};
use crate::storage::KeyValueStore;
use async_trait::async_trait;
use chrono::Utc;
use plateit_core::constants::{billing, defaults, storage_keys};
use plateit_core::errors::BillingError;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// What the next simulated purchase does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockOutcome {
    /// Grant the entitlement
    #[default]
    Succeed,
    /// Fail as a declined card or network error would
    Fail,
    /// Behave as if the user closed the store sheet
    Cancel,
}

impl MockOutcome {
    /// Parse from configuration text, defaulting to `Succeed`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "fail" | "failed" => Self::Fail,
            "cancel" | "cancelled" => Self::Cancel,
            _ => Self::Succeed,
        }
    }
}

/// Latency and behavior of the mock store
#[derive(Debug, Clone)]
pub struct MockStoreConfig {
    /// Delay of the first `initialize` call
    pub init_delay: Duration,
    /// Delay of `get_offerings`
    pub offerings_delay: Duration,
    /// Delay of `purchase_package`
    pub purchase_delay: Duration,
    /// Delay of `restore_purchases`
    pub restore_delay: Duration,
    /// Outcome of purchases
    pub outcome: MockOutcome,
    /// When false, `get_offerings` reports no current offering
    pub offerings_available: bool,
}

impl Default for MockStoreConfig {
    fn default() -> Self {
        Self {
            init_delay: Duration::from_millis(defaults::MOCK_INIT_DELAY_MS),
            offerings_delay: Duration::from_millis(defaults::MOCK_OFFERINGS_DELAY_MS),
            purchase_delay: Duration::from_millis(defaults::MOCK_PURCHASE_DELAY_MS),
            restore_delay: Duration::from_millis(defaults::MOCK_RESTORE_DELAY_MS),
            outcome: MockOutcome::Succeed,
            offerings_available: true,
        }
    }
}

impl MockStoreConfig {
    /// No latency at all
    #[must_use]
    pub fn instant() -> Self {
        Self {
            init_delay: Duration::ZERO,
            offerings_delay: Duration::ZERO,
            purchase_delay: Duration::ZERO,
            restore_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Mock subscription store
///
/// The grant survives restarts because it is written to the same
/// key-value store the rest of the application uses. There is no expiry:
/// once granted, the flag stays until it is removed from storage.
pub struct MockStore {
    store: Arc<dyn KeyValueStore>,
    config: MockStoreConfig,
    outcome: RwLock<MockOutcome>,
    ready: OnceCell<()>,
}

impl MockStore {
    /// Create a mock store persisting into `store`
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, config: MockStoreConfig) -> Self {
        let outcome = RwLock::new(config.outcome);
        Self {
            store,
            config,
            outcome,
            ready: OnceCell::new(),
        }
    }

    /// Change the outcome of later purchases
    pub fn set_outcome(&self, outcome: MockOutcome) {
        *self.outcome.write().unwrap_or_else(PoisonError::into_inner) = outcome;
    }

    /// Whether `initialize` has completed
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.initialized()
    }

    /// The single monthly package sold by the mock catalog
    #[must_use]
    pub fn monthly_package() -> Package {
        Package {
            identifier: billing::MONTHLY_PACKAGE_ID.to_owned(),
            package_type: billing::MONTHLY_PACKAGE_TYPE.to_owned(),
            product: Product {
                identifier: billing::MONTHLY_PRODUCT_ID.to_owned(),
                title: billing::MONTHLY_PRODUCT_TITLE.to_owned(),
                description: billing::MONTHLY_PRODUCT_DESCRIPTION.to_owned(),
                price: billing::MONTHLY_PRICE,
                price_string: billing::MONTHLY_PRICE_STRING.to_owned(),
                currency_code: billing::CURRENCY_CODE.to_owned(),
            },
        }
    }

    fn customer_info(is_pro: bool) -> CustomerInfo {
        let mut active = BTreeMap::new();
        if is_pro {
            active.insert(
                billing::ENTITLEMENT_ID.to_owned(),
                EntitlementInfo {
                    is_active: true,
                    will_renew: true,
                    period_type: billing::PERIOD_TYPE_NORMAL.to_owned(),
                    latest_purchase_date: Utc::now().to_rfc3339(),
                },
            );
        }
        CustomerInfo {
            entitlements: Entitlements { active },
        }
    }

    async fn read_flag(&self) -> Result<bool, BillingError> {
        let value = self
            .store
            .get(storage_keys::MOCK_PRO_FLAG)
            .await
            .map_err(|e| BillingError::Storage(e.to_string()))?;
        Ok(value.as_deref() == Some("true"))
    }

    async fn simulate_latency(delay: Duration) {
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }
}

#[async_trait]
impl EntitlementProvider for MockStore {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn initialize(&self) -> Result<(), BillingError> {
        self.ready
            .get_or_init(|| async {
                info!("Initializing mock subscription store");
                Self::simulate_latency(self.config.init_delay).await;
            })
            .await;
        Ok(())
    }

    async fn get_offerings(&self) -> Result<Offerings, BillingError> {
        Self::simulate_latency(self.config.offerings_delay).await;

        if !self.config.offerings_available {
            debug!("Mock store configured without a current offering");
            return Ok(Offerings { current: None });
        }

        Ok(Offerings {
            current: Some(Offering {
                available_packages: vec![Self::monthly_package()],
            }),
        })
    }

    async fn purchase_package(&self, package: &Package) -> Result<CustomerInfo, BillingError> {
        if package.identifier != billing::MONTHLY_PACKAGE_ID {
            return Err(BillingError::UnknownPackage(package.identifier.clone()));
        }

        Self::simulate_latency(self.config.purchase_delay).await;

        let outcome = *self.outcome.read().unwrap_or_else(PoisonError::into_inner);
        match outcome {
            MockOutcome::Fail => {
                warn!(package.id = %package.identifier, "Simulated purchase failure");
                Err(BillingError::PurchaseFailed(
                    "simulated store failure".to_owned(),
                ))
            }
            MockOutcome::Cancel => {
                info!(package.id = %package.identifier, "Simulated purchase cancellation");
                Err(BillingError::Cancelled)
            }
            MockOutcome::Succeed => {
                self.store
                    .set(storage_keys::MOCK_PRO_FLAG, "true")
                    .await
                    .map_err(|e| BillingError::Storage(e.to_string()))?;
                info!(package.id = %package.identifier, "Mock purchase granted Pro entitlement");
                Ok(Self::customer_info(true))
            }
        }
    }

    async fn get_customer_info(&self) -> Result<CustomerInfo, BillingError> {
        Ok(Self::customer_info(self.read_flag().await?))
    }

    async fn restore_purchases(&self) -> Result<CustomerInfo, BillingError> {
        Self::simulate_latency(self.config.restore_delay).await;
        let is_pro = self.read_flag().await?;
        debug!(is_pro, "Mock restore completed");
        Ok(Self::customer_info(is_pro))
    }
}
