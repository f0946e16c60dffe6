//! AI pipeline for turning fridge photos into dish suggestions and recipes.
//!
//! This module provides:
//! - `AiClient` trait for abstracting the model transport
//! - `OpenRouterClient` implementation over an OpenAI-compatible API
//! - Three capability functions: ingredient extraction, dish suggestion,
//!   recipe expansion, each constrained by a static JSON schema
//! - `KitchenService`, the facade the HTTP boundary talks to
//!
//! # Configuration
//!
//! Set these environment variables:
//!
//! - `OPENROUTER_API_KEY` (required): API key for the model provider
//! - `FRIDGECHEF_AI_MODEL` (optional): Model name, e.g., "openai/gpt-4o-mini"
//! - `FRIDGECHEF_AI_BASE_URL` (optional): API base URL
//! - `FRIDGECHEF_AI_TIMEOUT_SECS` (optional): Per-call deadline in seconds
//! - `FRIDGECHEF_AI_RATE_LIMIT_MS` (optional): Delay between requests in ms
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use fridgechef_core::ai::{KitchenService, OpenRouterClient};
//!
//! let client = Arc::new(OpenRouterClient::from_env()?);
//! let service = KitchenService::new(client);
//!
//! let suggestions = service
//!     .suggest(&["eggs".into(), "milk".into()], Some(2), None)
//!     .await?;
//! ```

mod client;
mod config;
mod extract;
mod identity;
mod invoke;
pub mod prompts;
mod recipe;
pub mod schema;
mod service;
mod suggest;
mod types;

pub use client::{AiClient, AiError, MockAiClient, MockCompletion, OpenRouterClient};
pub use config::{AiConfig, ConfigError};
pub use extract::{extract_ingredients, DetectedIngredient, ExtractionResult};
pub use recipe::{write_recipe, RecipeIngredient, RecipeResult, RecipeStep};
pub use service::KitchenService;
pub use suggest::{suggest_dishes, DishSummary, SuggestionsResult, EXPECTED_DISH_RANGE};
pub use types::{ChatMessage, ChatRequest, ChatResponse, ImageData, ResponseSchema, Role, Usage};
