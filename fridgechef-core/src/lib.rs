pub mod ai;

pub use ai::{
    AiClient, AiConfig, AiError, ConfigError, DetectedIngredient, DishSummary, ExtractionResult,
    KitchenService, MockAiClient, OpenRouterClient, RecipeIngredient, RecipeResult, RecipeStep,
    SuggestionsResult,
};
