// ABOUTME: Tests for the subscription service: startup sync, plan, purchase, restore
// ABOUTME: Covers the purchase guard, concurrent attempts, and dismissed completions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{build_context, test_context, StubExtractor};
use plateit_core::constants::{billing, storage_keys};
use plateit_core::errors::{BillingError, ErrorCode};
use plateit_server::billing::{
    EntitlementState, MockOutcome, MockStoreConfig, PurchaseGuard, PurchaseTicket,
};
use plateit_server::services::subscription::{self, PlanAvailability};
use plateit_server::storage::{memory::InMemoryStore, KeyValueStore};
use std::time::Duration;

fn slow_purchase(delay_ms: u64) -> MockStoreConfig {
    MockStoreConfig {
        purchase_delay: Duration::from_millis(delay_ms),
        ..MockStoreConfig::instant()
    }
}

#[test]
fn test_guard_rejects_second_attempt_while_in_flight() {
    let guard = PurchaseGuard::new();
    let permit = guard.try_begin().unwrap();

    assert!(guard.is_in_flight());
    assert_eq!(
        guard.try_begin().unwrap_err(),
        BillingError::PurchaseInProgress
    );

    drop(permit);
    assert!(!guard.is_in_flight());
    assert!(guard.try_begin().is_ok());
}

#[test]
fn test_guard_stays_closed_after_completion() {
    let guard = PurchaseGuard::new();
    guard.try_begin().unwrap().complete();

    assert!(guard.is_completed());
    assert_eq!(guard.try_begin().unwrap_err(), BillingError::AlreadyPurchased);
}

#[test]
fn test_ticket_clones_share_dismissal() {
    let ticket = PurchaseTicket::new();
    let handle = ticket.clone();
    assert!(ticket.is_relevant());

    handle.dismiss();
    assert!(!ticket.is_relevant());
}

#[tokio::test]
async fn test_startup_sync_on_fresh_store_is_free_tier() -> Result<()> {
    let ctx = test_context().await?;
    let status = subscription::startup_sync(&ctx.resources).await;

    assert!(!status.is_pro);
    assert_eq!(status.entitlement, EntitlementState::None);
    assert_eq!(status.entitlement_id, billing::ENTITLEMENT_ID);
    assert!(ctx.billing.is_ready());
    Ok(())
}

#[tokio::test]
async fn test_startup_sync_picks_up_persisted_flag() -> Result<()> {
    let store = InMemoryStore::new();
    store.set(storage_keys::MOCK_PRO_FLAG, "true").await?;

    let ctx = build_context(
        store,
        MockStoreConfig::instant(),
        StubExtractor::returning("x"),
    )
    .await?;
    let status = subscription::startup_sync(&ctx.resources).await;

    assert!(status.is_pro);
    assert_eq!(status.entitlement, EntitlementState::Active);
    Ok(())
}

#[tokio::test]
async fn test_plan_available_and_unavailable() -> Result<()> {
    let ctx = test_context().await?;
    match subscription::plan(&ctx.resources).await {
        PlanAvailability::Available(package) => {
            assert_eq!(package.identifier, billing::MONTHLY_PACKAGE_ID);
        }
        PlanAvailability::Unavailable { reason } => panic!("plan unavailable: {reason}"),
    }

    let config = MockStoreConfig {
        offerings_available: false,
        ..MockStoreConfig::instant()
    };
    let ctx = build_context(InMemoryStore::new(), config, StubExtractor::returning("x")).await?;
    assert!(matches!(
        subscription::plan(&ctx.resources).await,
        PlanAvailability::Unavailable { .. }
    ));

    let err = subscription::purchase(&ctx.resources, billing::MONTHLY_PACKAGE_ID)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert!(!ctx.resources.purchase_guard.is_in_flight());
    Ok(())
}

#[tokio::test]
async fn test_successful_purchase_unlocks_pro() -> Result<()> {
    let ctx = test_context().await?;

    let status = subscription::purchase(&ctx.resources, billing::MONTHLY_PACKAGE_ID).await?;
    assert!(status.is_pro);
    assert!(!status.purchase_in_progress);
    assert!(ctx.resources.state.read().await.is_pro());
    assert!(ctx.resources.purchase_guard.is_completed());

    let err = subscription::purchase(&ctx.resources, billing::MONTHLY_PACKAGE_ID)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceLocked);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_purchase_is_rejected_as_in_progress() -> Result<()> {
    let ctx = build_context(
        InMemoryStore::new(),
        slow_purchase(50),
        StubExtractor::returning("x"),
    )
    .await?;

    let (first, second) = tokio::join!(
        subscription::purchase(&ctx.resources, billing::MONTHLY_PACKAGE_ID),
        subscription::purchase(&ctx.resources, billing::MONTHLY_PACKAGE_ID),
    );

    assert!(first?.is_pro);
    let err = second.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceLocked);
    assert_eq!(err.message, BillingError::PurchaseInProgress.user_message());
    Ok(())
}

#[tokio::test]
async fn test_cancelled_purchase_can_be_retried() -> Result<()> {
    let ctx = test_context().await?;

    ctx.billing.set_outcome(MockOutcome::Cancel);
    let err = subscription::purchase(&ctx.resources, billing::MONTHLY_PACKAGE_ID)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PurchaseCancelled);
    assert!(err.is_retryable());
    assert!(!ctx.resources.state.read().await.is_pro());

    ctx.billing.set_outcome(MockOutcome::Fail);
    let err = subscription::purchase(&ctx.resources, billing::MONTHLY_PACKAGE_ID)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PurchaseFailed);

    ctx.billing.set_outcome(MockOutcome::Succeed);
    let status = subscription::purchase(&ctx.resources, billing::MONTHLY_PACKAGE_ID).await?;
    assert!(status.is_pro);
    Ok(())
}

#[tokio::test]
async fn test_unknown_package_is_not_found() -> Result<()> {
    let ctx = test_context().await?;
    let err = subscription::purchase(&ctx.resources, "$rc_weekly")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_dismissed_purchase_does_not_flip_state_until_refresh() -> Result<()> {
    let ctx = build_context(
        InMemoryStore::new(),
        slow_purchase(50),
        StubExtractor::returning("x"),
    )
    .await?;
    let resources = ctx.resources.clone();

    let purchase = tokio::spawn(async move {
        subscription::purchase(&resources, billing::MONTHLY_PACKAGE_ID).await
    });

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(subscription::dismiss_purchase(&ctx.resources));

    purchase.await??;
    assert!(!ctx.resources.state.read().await.is_pro());
    assert_eq!(
        ctx.store.get(storage_keys::MOCK_PRO_FLAG).await?.as_deref(),
        Some("true")
    );

    let status = subscription::refresh(&ctx.resources).await?;
    assert!(status.is_pro);
    Ok(())
}

#[tokio::test]
async fn test_dismiss_without_running_purchase() -> Result<()> {
    let ctx = test_context().await?;
    assert!(!subscription::dismiss_purchase(&ctx.resources));
    Ok(())
}

#[tokio::test]
async fn test_cancelled_purchase_releases_guard_and_ticket() -> Result<()> {
    let ctx = build_context(
        InMemoryStore::new(),
        slow_purchase(200),
        StubExtractor::returning("x"),
    )
    .await?;
    let resources = ctx.resources.clone();

    let purchase = tokio::spawn(async move {
        subscription::purchase(&resources, billing::MONTHLY_PACKAGE_ID).await
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(ctx.resources.purchase_guard.is_in_flight());

    purchase.abort();
    assert!(purchase.await.unwrap_err().is_cancelled());

    assert!(!ctx.resources.purchase_guard.is_in_flight());
    assert!(!subscription::dismiss_purchase(&ctx.resources));
    assert!(!ctx.resources.state.read().await.is_pro());
    Ok(())
}

#[tokio::test]
async fn test_restore_adopts_store_record() -> Result<()> {
    let ctx = test_context().await?;

    let status = subscription::restore(&ctx.resources).await?;
    assert!(!status.is_pro);

    ctx.store.set(storage_keys::MOCK_PRO_FLAG, "true").await?;
    let status = subscription::restore(&ctx.resources).await?;
    assert!(status.is_pro);

    ctx.store.remove(storage_keys::MOCK_PRO_FLAG).await?;
    let status = subscription::refresh(&ctx.resources).await?;
    assert!(!status.is_pro);
    assert_eq!(status.entitlement, EntitlementState::Expired);
    Ok(())
}
