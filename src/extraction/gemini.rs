// ABOUTME: Gemini generateContent client for structured recipe extraction
// ABOUTME: Enables Google Search grounding when the input is a link
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

//! # Gemini Extractor
//!
//! Set `GEMINI_API_KEY` with a key from Google AI Studio. The model and base
//! URL are configurable so tests can point at a local server.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, instrument};

use super::{
    build_prompt, is_url_input, parse_extraction_text, response_schema, ExtractedRecipe,
    RecipeExtractor, EXTRACTION_FAILED_MESSAGE,
};
use crate::config::environment::ExtractionConfig;
use crate::errors::{AppError, AppResult, ErrorCode};

const API_KEY_HEADER: &str = "x-goog-api-key";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

// ============================================================================
// Extractor Implementation
// ============================================================================

/// Recipe extractor backed by Gemini
pub struct GeminiExtractor {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiExtractor {
    /// Create an extractor from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no API key is set or the HTTP
    /// client cannot be built
    pub fn new(config: &ExtractionConfig) -> AppResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::config("GEMINI_API_KEY environment variable not set"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            client,
        })
    }

    fn build_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(input: &str) -> GenerateRequest {
        let tools = if is_url_input(input) {
            vec![serde_json::json!({ "google_search": {} })]
        } else {
            Vec::new()
        };

        GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_owned()),
                parts: vec![Part {
                    text: Some(build_prompt(input)),
                }],
            }],
            tools,
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        }
    }

    fn first_text(response: &GenerateResponse) -> Option<String> {
        let parts = &response
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        Some(text)
    }

    /// The reason is logged only; callers see the generic message
    fn failure(detail: impl Into<String>) -> AppError {
        let detail = detail.into();
        error!(error = %detail, "Gemini extraction call failed");
        AppError::new(ErrorCode::ExternalServiceError, EXTRACTION_FAILED_MESSAGE)
            .with_details(serde_json::json!({ "service": "gemini" }))
    }
}

#[async_trait]
impl RecipeExtractor for GeminiExtractor {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, input), fields(model = %self.model, url_input = is_url_input(input)))]
    async fn extract(&self, input: &str) -> AppResult<Option<ExtractedRecipe>> {
        let request = Self::build_request(input);
        debug!("Sending extraction request to Gemini");

        let response = self
            .client
            .post(self.build_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::failure(format!("HTTP request failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::failure(format!("Failed to read response: {}", e.without_url())))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GenerateResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .map_or(body, |e| e.message);
            return Err(Self::failure(format!("API error ({status}): {message}")));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| Self::failure(format!("Failed to parse response: {e}")))?;

        if let Some(api_error) = parsed.error {
            return Err(Self::failure(api_error.message));
        }

        Ok(Self::first_text(&parsed).and_then(|text| parse_extraction_text(&text)))
    }
}

impl Debug for GeminiExtractor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiExtractor")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
