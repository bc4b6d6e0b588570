// ABOUTME: Unit tests for logging configuration
// ABOUTME: Validates environment parsing, defaults, and the composed filter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use plateit_server::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;

fn clear_env() {
    for var in [
        "RUST_LOG",
        "LOG_FORMAT",
        "ENVIRONMENT",
        "SERVICE_NAME",
        "LOG_INCLUDE_SPANS",
    ] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_env();
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SERVICE_NAME", "plateit-test");

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.environment, "production");
    assert_eq!(config.service_name, "plateit-test");
    assert!(config.include_location);
    assert!(config.include_thread);
    assert!(!config.include_spans);

    clear_env();
}

#[test]
#[serial]
fn test_development_defaults() {
    clear_env();

    let config = LoggingConfig::from_env();
    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Pretty);
    assert!(!config.include_location);

    let default = LoggingConfig::default();
    assert_eq!(default.service_name, "plateit-server");
    assert_eq!(default.environment, "development");
}

#[test]
#[serial]
fn test_env_filter_includes_noise_directives() {
    clear_env();
    let config = LoggingConfig {
        level: "debug".to_owned(),
        ..LoggingConfig::default()
    };

    let filter = config.env_filter().to_string();
    assert!(filter.contains("hyper=warn"));
    assert!(filter.contains("reqwest=warn"));
    assert!(filter.contains("plateit_server=debug"));
}
