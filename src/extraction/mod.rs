// ABOUTME: Boundary to the AI service that turns a URL or pasted text into a recipe
// ABOUTME: Owns the prompt, the response schema, and the conversion into stored recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

//! # Recipe Extraction
//!
//! The extractor itself is an external collaborator. This module builds the
//! request it needs and interprets what comes back. A response that carries
//! no recipe is `Ok(None)`; only transport and API failures are errors.

/// Gemini `generateContent` client
pub mod gemini;

pub use gemini::GeminiExtractor;

use crate::errors::AppResult;
use async_trait::async_trait;
use chrono::Utc;
use plateit_core::models::{Ingredient, InstructionStep, Recipe};
use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

/// Shown when the AI call fails outright
pub const EXTRACTION_FAILED_MESSAGE: &str = "Failed to process recipe. Please try again.";

/// Shown when the AI answered without a usable recipe
pub const NO_RECIPE_MESSAGE: &str =
    "Could not extract recipe details. Please try being more specific or using a different link.";

/// Recipe fields as the AI service returns them
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRecipe {
    /// Recipe title
    pub title: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Free-text preparation time
    #[serde(default)]
    pub prep_time: String,
    /// Free-text servings
    #[serde(default)]
    pub servings: String,
    /// Image found during search, possibly empty
    #[serde(default)]
    pub image_url: Option<String>,
    /// Source page
    #[serde(default)]
    pub source_url: Option<String>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ingredients with normalized names
    pub ingredients: Vec<Ingredient>,
    /// Numbered steps
    pub instructions: Vec<InstructionStep>,
}

#[derive(Debug, Deserialize)]
struct ExtractionEnvelope {
    recipe: Option<ExtractedRecipe>,
}

impl ExtractedRecipe {
    /// Turn into a stored recipe with a fresh id and creation time
    ///
    /// A missing or blank image gets a random placeholder.
    #[must_use]
    pub fn into_recipe(self) -> Recipe {
        let image_url = self
            .image_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(fallback_image_url);
        let source_url = self.source_url.filter(|url| !url.trim().is_empty());

        Recipe {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            description: self.description,
            prep_time: self.prep_time,
            servings: self.servings,
            image_url: Some(image_url),
            source_url,
            ingredients: self.ingredients,
            instructions: self.instructions,
            tags: self.tags,
            created_at: Utc::now().timestamp_millis(),
        }
    }
}

/// Placeholder image used when extraction found none
#[must_use]
pub fn fallback_image_url() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..100);
    format!("https://picsum.photos/800/600?random={n}")
}

/// Whether the input should be treated as a link
#[must_use]
pub fn is_url_input(input: &str) -> bool {
    input.trim().starts_with("http")
}

/// Prompt sent to the model
#[must_use]
pub fn build_prompt(input: &str) -> String {
    format!(
        "You are an expert culinary assistant.\n\
         Extract structured recipe data from the following input.\n\
         Normalize ingredient names (e.g., \"2 large onions, chopped\" -> item: \"Onion\", amount: \"2 large\", category: \"Produce\").\n\
         If the input is a URL, use the Google Search tool to find the recipe details.\n\
         If the input is raw text, parse it directly.\n\
         Ensure the output matches the JSON schema provided exactly.\n\
         \n\
         Input: \"{input}\"\n"
    )
}

/// JSON schema the model must answer with
#[must_use]
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recipe": {
                "type": "OBJECT",
                "properties": {
                    "title": { "type": "STRING" },
                    "description": { "type": "STRING" },
                    "prepTime": { "type": "STRING" },
                    "servings": { "type": "STRING" },
                    "imageUrl": {
                        "type": "STRING",
                        "description": "A relevant image URL found during search, or leave empty if none."
                    },
                    "sourceUrl": { "type": "STRING" },
                    "tags": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "ingredients": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "item": { "type": "STRING" },
                                "amount": { "type": "STRING" },
                                "category": {
                                    "type": "STRING",
                                    "enum": ["Produce", "Dairy", "Meat", "Pantry", "Other"]
                                }
                            }
                        }
                    },
                    "instructions": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "step": { "type": "INTEGER" },
                                "text": { "type": "STRING" }
                            }
                        }
                    }
                },
                "required": ["title", "ingredients", "instructions"]
            }
        }
    })
}

/// Interpret the model's text answer
///
/// Blank text, malformed JSON, and an envelope without a recipe all yield
/// `None`.
#[must_use]
pub fn parse_extraction_text(text: &str) -> Option<ExtractedRecipe> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<ExtractionEnvelope>(trimmed) {
        Ok(envelope) => envelope.recipe,
        Err(e) => {
            warn!(error = %e, "Extraction response was not valid recipe JSON");
            None
        }
    }
}

/// Something that can pull a recipe out of free-form input
#[async_trait]
pub trait RecipeExtractor: Send + Sync {
    /// Extractor identifier for logs
    fn name(&self) -> &'static str;

    /// Extract a recipe from a URL or pasted text
    ///
    /// # Errors
    ///
    /// Returns a retryable external-service error when the AI call fails
    async fn extract(&self, input: &str) -> AppResult<Option<ExtractedRecipe>>;
}
