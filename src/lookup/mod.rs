mod retry;
mod spoonacular;

pub use retry::RetryingLookup;
pub use spoonacular::SpoonacularClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::FinderConfig;
use crate::error::LookupError;
use crate::model::{Ingredient, RecipeSummary};

/// How the recipe API orders candidates for the supplied ingredients
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingStrategy {
    /// Prefer recipes that use as many of the supplied ingredients as possible
    #[default]
    MaximizeUsedIngredients,
    /// Prefer recipes that need as few extra ingredients as possible
    MinimizeMissingIngredients,
}

impl RankingStrategy {
    /// Value of the `ranking` query parameter
    pub fn as_param(&self) -> u8 {
        match self {
            RankingStrategy::MaximizeUsedIngredients => 1,
            RankingStrategy::MinimizeMissingIngredients => 2,
        }
    }
}

/// Search parameters applied to every query of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicy {
    pub max_results: u32,
    pub ranking: RankingStrategy,
    pub ignore_pantry: bool,
}

impl SearchPolicy {
    pub const DEFAULT_MAX_RESULTS: u32 = 15;

    pub fn request(&self, ingredients: &[Ingredient]) -> SearchRequest {
        SearchRequest {
            ingredients: ingredients.iter().map(|i| i.as_str().to_string()).collect(),
            max_results: self.max_results,
            ranking: self.ranking,
            ignore_pantry: self.ignore_pantry,
        }
    }
}

/// 15 results, maximize used ingredients, ignore pantry staples
impl Default for SearchPolicy {
    fn default() -> Self {
        SearchPolicy {
            max_results: Self::DEFAULT_MAX_RESULTS,
            ranking: RankingStrategy::default(),
            ignore_pantry: true,
        }
    }
}

impl From<&FinderConfig> for SearchPolicy {
    fn from(config: &FinderConfig) -> Self {
        SearchPolicy {
            max_results: config.max_results,
            ranking: config.ranking,
            ignore_pantry: config.ignore_pantry,
        }
    }
}

/// A single find-by-ingredients query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub ingredients: Vec<String>,
    pub max_results: u32,
    pub ranking: RankingStrategy,
    pub ignore_pantry: bool,
}

impl SearchRequest {
    /// Request with the default policy
    pub fn new(ingredients: &[Ingredient]) -> Self {
        SearchPolicy::default().request(ingredients)
    }

    /// Ingredients as the comma separated list the API expects
    pub fn joined_ingredients(&self) -> String {
        self.ingredients.join(",")
    }
}

/// Finds recipes for a list of ingredients
#[async_trait]
pub trait RecipeLookup: Send + Sync {
    /// Name of the backing service, used in logs
    fn lookup_name(&self) -> &str;

    async fn find_by_ingredients(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<RecipeSummary>, LookupError>;
}

/// Resolves a scanned product barcode to a product name
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// `Ok(None)` when the code is unknown to the service
    async fn product_name(&self, upc: &str) -> Result<Option<String>, LookupError>;
}
