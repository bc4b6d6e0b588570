// ABOUTME: Environment configuration for the PlateIt server
// ABOUTME: Reads ports, storage, extraction, billing mock, and quota settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

//! Environment-based configuration management

use crate::billing::{MockOutcome, MockStoreConfig};
use crate::constants::defaults;
use crate::storage::{StorageBackend, StorageConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// AI extraction settings
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Gemini API key; extraction is disabled without one
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// REST base URL
    pub base_url: String,
    /// Request timeout
    pub timeout_secs: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: defaults::GEMINI_MODEL.to_owned(),
            base_url: defaults::GEMINI_BASE_URL.to_owned(),
            timeout_secs: defaults::EXTRACTION_TIMEOUT_SECS,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Storage backend selection
    pub storage: StorageConfig,
    /// AI extraction settings
    pub extraction: ExtractionConfig,
    /// Mock subscription store behavior
    pub billing: MockStoreConfig,
    /// Recipes a free user may add
    pub recipe_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            host: defaults::HOST.to_owned(),
            environment: Environment::Development,
            storage: StorageConfig::default(),
            extraction: ExtractionConfig::default(),
            billing: MockStoreConfig::default(),
            recipe_limit: defaults::RECIPE_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Malformed numeric values fall back to their defaults with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if `STORAGE_BACKEND` names an unknown backend
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let storage = StorageConfig {
            backend: parse_storage_backend(
                &env_var_or("STORAGE_BACKEND", "file"),
                env::var("STORAGE_DIR").ok().map(PathBuf::from),
            )?,
        };

        let billing = MockStoreConfig {
            init_delay: env_millis_or("BILLING_MOCK_INIT_DELAY_MS", defaults::MOCK_INIT_DELAY_MS),
            offerings_delay: env_millis_or(
                "BILLING_MOCK_OFFERINGS_DELAY_MS",
                defaults::MOCK_OFFERINGS_DELAY_MS,
            ),
            purchase_delay: env_millis_or(
                "BILLING_MOCK_PURCHASE_DELAY_MS",
                defaults::MOCK_PURCHASE_DELAY_MS,
            ),
            restore_delay: env_millis_or(
                "BILLING_MOCK_RESTORE_DELAY_MS",
                defaults::MOCK_RESTORE_DELAY_MS,
            ),
            outcome: MockOutcome::from_str_or_default(&env_var_or("BILLING_MOCK_OUTCOME", "succeed")),
            offerings_available: env_parse_or("BILLING_MOCK_OFFERINGS_AVAILABLE", true),
        };

        let extraction = ExtractionConfig {
            api_key: env::var("GEMINI_API_KEY").ok().filter(|key| !key.is_empty()),
            model: env_var_or("GEMINI_MODEL", defaults::GEMINI_MODEL),
            base_url: env_var_or("GEMINI_BASE_URL", defaults::GEMINI_BASE_URL),
            timeout_secs: env_parse_or("GEMINI_TIMEOUT_SECS", defaults::EXTRACTION_TIMEOUT_SECS),
        };

        let config = Self {
            http_port: env_parse_or("HTTP_PORT", defaults::HTTP_PORT),
            host: env_var_or("HOST", defaults::HOST),
            environment: Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development")),
            storage,
            extraction,
            billing,
            recipe_limit: env_parse_or("RECIPE_LIMIT", defaults::RECIPE_LIMIT),
        };

        if config.extraction.api_key.is_none() {
            warn!("GEMINI_API_KEY is not set; recipe extraction will be unavailable");
        }

        Ok(config)
    }

    /// Apply command-line overrides
    ///
    /// A storage directory implies the file backend.
    #[must_use]
    pub fn with_overrides(mut self, http_port: Option<u16>, storage_dir: Option<PathBuf>) -> Self {
        if let Some(port) = http_port {
            self.http_port = port;
        }
        if let Some(dir) = storage_dir {
            self.storage.backend = StorageBackend::File { dir };
        }
        self
    }

    /// One-line summary for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        let storage = match &self.storage.backend {
            StorageBackend::Memory => "memory".to_owned(),
            StorageBackend::File { dir } => format!("file ({})", dir.display()),
        };
        format!(
            "PlateIt Server Configuration: env={}, bind={}:{}, storage={}, extraction={} ({}), recipe_limit={}, billing=mock (outcome {:?}, offerings {})",
            self.environment,
            self.host,
            self.http_port,
            storage,
            if self.extraction.api_key.is_some() {
                "enabled"
            } else {
                "disabled"
            },
            self.extraction.model,
            self.recipe_limit,
            self.billing.outcome,
            if self.billing.offerings_available {
                "available"
            } else {
                "unavailable"
            },
        )
    }
}

/// Default directory for the file backend
#[must_use]
pub fn default_storage_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from("./data"), |dir| dir.join("plateit"))
}

fn parse_storage_backend(name: &str, dir: Option<PathBuf>) -> Result<StorageBackend> {
    match name.to_lowercase().as_str() {
        "memory" => Ok(StorageBackend::Memory),
        "file" => Ok(StorageBackend::File {
            dir: dir.unwrap_or_else(default_storage_dir),
        }),
        other => Err(anyhow::anyhow!(
            "Unknown STORAGE_BACKEND '{other}' (expected 'memory' or 'file')"
        )),
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, warning and using `default` when malformed
fn env_parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value '{raw}' for {key}, using default {default}");
            default
        }),
        Err(_) => default,
    }
}

fn env_millis_or(key: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_parse_or(key, default_ms))
}
