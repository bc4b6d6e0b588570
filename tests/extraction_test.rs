// ABOUTME: Tests for recipe extraction: response parsing, recipe conversion, Gemini client
// ABOUTME: The Gemini client runs against a local Axum server serving canned responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

use anyhow::Result;
use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode, Uri},
    routing::post,
    Json, Router,
};
use plateit_core::errors::{ErrorCode, ErrorResponse};
use plateit_core::models::IngredientCategory;
use plateit_server::config::ExtractionConfig;
use plateit_server::extraction::{
    build_prompt, is_url_input, parse_extraction_text, response_schema, GeminiExtractor,
    RecipeExtractor, EXTRACTION_FAILED_MESSAGE,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

const TEST_KEY: &str = "test-key-0123456789";

const RECIPE_JSON: &str = r#"{
    "recipe": {
        "title": "Garlic Butter Shrimp",
        "description": "Quick weeknight shrimp",
        "prepTime": "15 min",
        "servings": "2",
        "imageUrl": "",
        "tags": ["Seafood"],
        "ingredients": [
            {"item": "Shrimp", "amount": "400g", "category": "Meat"},
            {"item": "Garlic", "amount": "4 cloves", "category": "Produce"},
            {"item": "Butter", "amount": "3 tbsp", "category": "Dairy"},
            {"item": "Lemon Zest", "amount": "1 tsp", "category": "Citrus"}
        ],
        "instructions": [
            {"step": 1, "text": "Melt butter"},
            {"step": 2, "text": "Cook shrimp with garlic"}
        ]
    }
}"#;

#[test]
fn test_parse_valid_response() {
    let extracted = parse_extraction_text(RECIPE_JSON).unwrap();
    assert_eq!(extracted.title, "Garlic Butter Shrimp");
    assert_eq!(extracted.prep_time, "15 min");
    assert_eq!(extracted.ingredients.len(), 4);
    assert_eq!(extracted.ingredients[3].category, IngredientCategory::Other);
}

#[test]
fn test_parse_rejects_unusable_text() {
    assert!(parse_extraction_text("").is_none());
    assert!(parse_extraction_text("   ").is_none());
    assert!(parse_extraction_text("Sorry, I can't help with that").is_none());
    assert!(parse_extraction_text(r#"{"recipe": null}"#).is_none());
    assert!(parse_extraction_text("{}").is_none());
    assert!(parse_extraction_text(r#"{"recipe": {"title": "No lists"}}"#).is_none());
}

#[test]
fn test_into_recipe_assigns_id_and_fallback_image() {
    let first = parse_extraction_text(RECIPE_JSON).unwrap().into_recipe();
    let second = parse_extraction_text(RECIPE_JSON).unwrap().into_recipe();

    assert_ne!(first.id, second.id);
    assert!(first.created_at > 0);
    let image = first.image_url.unwrap();
    assert!(image.starts_with("https://picsum.photos/800/600?random="));
    assert!(first.source_url.is_none());
}

#[test]
fn test_into_recipe_keeps_found_image() {
    let mut extracted = parse_extraction_text(RECIPE_JSON).unwrap();
    extracted.image_url = Some("https://example.com/shrimp.jpg".to_owned());
    let recipe = extracted.into_recipe();
    assert_eq!(recipe.image_url.as_deref(), Some("https://example.com/shrimp.jpg"));
}

#[test]
fn test_url_detection_and_prompt() {
    assert!(is_url_input("https://example.com/recipe"));
    assert!(is_url_input("  http://example.com"));
    assert!(!is_url_input("2 eggs, 1 cup flour"));

    let prompt = build_prompt("2 eggs");
    assert!(prompt.contains("Input: \"2 eggs\""));
    assert!(prompt.contains("Normalize ingredient names"));
}

#[test]
fn test_schema_requires_core_fields() {
    let schema = response_schema();
    assert_eq!(
        schema["properties"]["recipe"]["required"],
        json!(["title", "ingredients", "instructions"])
    );
    assert_eq!(
        schema["properties"]["recipe"]["properties"]["ingredients"]["items"]["properties"]
            ["category"]["enum"],
        json!(["Produce", "Dairy", "Meat", "Pantry", "Other"])
    );
}

/// Serve `reply` for every generateContent call and return the base URL
///
/// The key must arrive as a header, never in the query string.
async fn fake_gemini(status: StatusCode, reply: Value) -> Result<String> {
    let handler = move |Path(call): Path<String>, headers: HeaderMap, uri: Uri, Json(body): Json<Value>| {
        let reply = reply.clone();
        async move {
            assert!(call.ends_with(":generateContent"));
            assert_eq!(headers["x-goog-api-key"], TEST_KEY);
            assert!(uri.query().is_none());
            assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
            (status, Json(reply))
        }
    };
    let app = Router::new().route("/models/:call", post(handler));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    Ok(format!("http://{addr}"))
}

fn extractor_for(base_url: String) -> GeminiExtractor {
    GeminiExtractor::new(&ExtractionConfig {
        api_key: Some(TEST_KEY.to_owned()),
        base_url,
        timeout_secs: 5,
        ..ExtractionConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_gemini_extracts_recipe() -> Result<()> {
    let reply = json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": RECIPE_JSON }] } }]
    });
    let extractor = extractor_for(fake_gemini(StatusCode::OK, reply).await?);

    let extracted = extractor.extract("2 eggs").await?.unwrap();
    assert_eq!(extracted.title, "Garlic Butter Shrimp");
    assert_eq!(extractor.name(), "gemini");
    Ok(())
}

#[tokio::test]
async fn test_gemini_without_candidates_is_no_recipe() -> Result<()> {
    let extractor = extractor_for(fake_gemini(StatusCode::OK, json!({ "candidates": [] })).await?);
    assert!(extractor.extract("nonsense").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_gemini_api_error_is_retryable_failure() -> Result<()> {
    let reply = json!({ "error": { "message": "quota exhausted" } });
    let extractor = extractor_for(fake_gemini(StatusCode::TOO_MANY_REQUESTS, reply).await?);

    let err = extractor.extract("https://example.com").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert_eq!(err.message, EXTRACTION_FAILED_MESSAGE);
    assert!(err.is_retryable());
    Ok(())
}

#[tokio::test]
async fn test_gemini_unreachable_is_failure() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let extractor = extractor_for(format!("http://{addr}"));
    let err = extractor.extract("2 eggs").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    Ok(())
}

#[tokio::test]
async fn test_gemini_failures_do_not_expose_api_key() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let err = extractor_for(format!("http://{addr}"))
        .extract("2 eggs")
        .await
        .unwrap_err();
    let body = serde_json::to_string(&ErrorResponse::from(err))?;
    assert!(!body.contains(TEST_KEY), "{body}");
    assert!(!body.contains(&addr.to_string()), "{body}");

    let reply = json!({ "error": { "message": "quota exhausted" } });
    let err = extractor_for(fake_gemini(StatusCode::TOO_MANY_REQUESTS, reply).await?)
        .extract("2 eggs")
        .await
        .unwrap_err();
    let body: Value = serde_json::to_value(ErrorResponse::from(err))?;
    assert_eq!(body["error"]["details"], json!({ "service": "gemini" }));
    Ok(())
}
