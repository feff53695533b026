//! UniFFI bindings for recipe-finder
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! It wraps the async Rust API with synchronous functions that manage their own tokio runtime.

use std::fmt;
use std::sync::{Arc, Mutex};
use crate::builder::check_limits;
use crate::{
    FinderConfig, FinderError, Ingredient, IngredientSearchWorkflow, LookupError, RecipeSummary,
    SearchPolicy, SpoonacularClient, StoreError, ValidationError,
};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible recipe summary
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipeSummary {
    pub id: u64,
    pub title: String,
    /// Image URL (empty string if none)
    pub image: String,
    pub used_ingredient_count: u32,
    pub missed_ingredient_count: u32,
    pub likes: u32,
    /// Names of the supplied ingredients the recipe uses
    pub used_ingredients: Vec<String>,
    /// Names of the ingredients the user would still need
    pub missed_ingredients: Vec<String>,
}

impl From<RecipeSummary> for FfiRecipeSummary {
    fn from(recipe: RecipeSummary) -> Self {
        FfiRecipeSummary {
            id: recipe.id,
            title: recipe.title,
            image: recipe.image.unwrap_or_default(),
            used_ingredient_count: recipe.used_ingredient_count,
            missed_ingredient_count: recipe.missed_ingredient_count,
            likes: recipe.likes,
            used_ingredients: recipe.used_ingredients.into_iter().map(|i| i.name).collect(),
            missed_ingredients: recipe
                .missed_ingredients
                .into_iter()
                .map(|i| i.name)
                .collect(),
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiFinderError {
    /// Input rejected, show `message` to the user
    InvalidInput { message: String },
    /// Recipe API unreachable or answered with an error
    LookupError { message: String },
    /// Saved recipes store failure
    StoreError { message: String },
    /// Configuration error
    ConfigError { message: String },
    /// Runtime error (tokio, poisoned session)
    RuntimeError { message: String },
}

impl fmt::Display for FfiFinderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiFinderError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            FfiFinderError::LookupError { message } => write!(f, "Lookup error: {}", message),
            FfiFinderError::StoreError { message } => write!(f, "Store error: {}", message),
            FfiFinderError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiFinderError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiFinderError {}

impl From<FinderError> for FfiFinderError {
    fn from(err: FinderError) -> Self {
        match err {
            FinderError::Validation(e) => e.into(),
            FinderError::Lookup(LookupError::MissingApiKey) => FfiFinderError::ConfigError {
                message: LookupError::MissingApiKey.to_string(),
            },
            FinderError::Lookup(e) => FfiFinderError::LookupError {
                message: e.to_string(),
            },
            FinderError::Store(e) => e.into(),
            FinderError::BuilderError(message) => FfiFinderError::ConfigError { message },
            FinderError::ConfigError(e) => FfiFinderError::ConfigError {
                message: e.to_string(),
            },
        }
    }
}

impl From<ValidationError> for FfiFinderError {
    fn from(err: ValidationError) -> Self {
        FfiFinderError::InvalidInput {
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for FfiFinderError {
    fn from(err: StoreError) -> Self {
        FfiFinderError::StoreError {
            message: err.to_string(),
        }
    }
}

/// Configuration for a search session
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiSearchConfig {
    /// Optional API key (uses environment variable if not specified)
    pub api_key: Option<String>,
    /// Optional API endpoint override
    pub base_url: Option<String>,
    /// Optional timeout in seconds (uses default if not specified)
    pub timeout_seconds: Option<u64>,
    /// Optional result cap (15 if not specified)
    pub max_results: Option<u32>,
}

impl FfiSearchConfig {
    fn into_finder_config(self) -> FinderConfig {
        let mut config = FinderConfig::default();
        if let Some(api_key) = self.api_key {
            config.api_key = Some(api_key);
        }
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(timeout_secs) = self.timeout_seconds {
            config.timeout = timeout_secs;
        }
        if let Some(max_results) = self.max_results {
            config.max_results = max_results;
        }
        config
    }

    fn into_workflow(self) -> Result<IngredientSearchWorkflow, FfiFinderError> {
        let config = self.into_finder_config();
        Ok(IngredientSearchWorkflow::builder().config(config).build()?)
    }
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiFinderError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiFinderError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

/// Normalize an ingredient name the way the session stores it
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn normalize_ingredient(raw: String) -> String {
    crate::normalize_ingredient_name(&raw)
}

/// One-shot recipe search for a list of ingredients.
///
/// Unlike a session search, a failed lookup is returned as an error.
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn find_recipes(
    ingredients: Vec<String>,
    config: Option<FfiSearchConfig>,
) -> Result<Vec<FfiRecipeSummary>, FfiFinderError> {
    let config = config.unwrap_or_default().into_finder_config();
    check_limits(&config)?;
    let client = SpoonacularClient::new(&config).map_err(FinderError::from)?;

    let raw: Vec<&str> = ingredients
        .iter()
        .map(String::as_str)
        .filter(|raw| !raw.is_empty())
        .collect();

    let rt = create_runtime()?;
    let recipes = rt.block_on(crate::find_recipes_with(
        &client,
        SearchPolicy::from(&config),
        &raw,
    ))?;
    Ok(recipes.into_iter().map(Into::into).collect())
}

/// An ingredient search screen session held by the host app
#[cfg_attr(feature = "uniffi", derive(uniffi::Object))]
pub struct FfiSearchSession {
    runtime: tokio::runtime::Runtime,
    workflow: Mutex<IngredientSearchWorkflow>,
}

impl FfiSearchSession {
    fn with_workflow<T>(
        &self,
        f: impl FnOnce(&mut IngredientSearchWorkflow) -> T,
    ) -> Result<T, FfiFinderError> {
        let mut workflow = self
            .workflow
            .lock()
            .map_err(|_| FfiFinderError::RuntimeError {
                message: "Search session poisoned".to_string(),
            })?;
        Ok(f(&mut *workflow))
    }
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
impl FfiSearchSession {
    /// Create and start a session
    #[cfg_attr(feature = "uniffi", uniffi::constructor)]
    pub fn new(config: Option<FfiSearchConfig>) -> Result<Arc<Self>, FfiFinderError> {
        let runtime = create_runtime()?;
        let mut workflow = config.unwrap_or_default().into_workflow()?;
        runtime.block_on(workflow.start());
        Ok(Arc::new(FfiSearchSession {
            runtime,
            workflow: Mutex::new(workflow),
        }))
    }

    pub fn set_input(&self, text: String) -> Result<(), FfiFinderError> {
        self.with_workflow(|workflow| self.runtime.block_on(workflow.set_input(text)))
    }

    pub fn submit_ingredient(&self, raw: String) -> Result<(), FfiFinderError> {
        self.with_workflow(|workflow| self.runtime.block_on(workflow.submit_ingredient(&raw)))?
            .map_err(Into::into)
    }

    pub fn submit_pending(&self) -> Result<(), FfiFinderError> {
        self.with_workflow(|workflow| self.runtime.block_on(workflow.submit_pending()))?
            .map_err(Into::into)
    }

    /// Submit a resolved barcode product; the host clears its scan afterwards
    pub fn submit_scanned(&self, name: Option<String>) -> Result<(), FfiFinderError> {
        self.with_workflow(|workflow| self.runtime.block_on(workflow.submit_external(name)))?
            .map_err(Into::into)
    }

    pub fn remove_ingredient(&self, name: String) -> Result<(), FfiFinderError> {
        let Some(target) = Ingredient::new(&name) else {
            return Ok(());
        };
        self.with_workflow(|workflow| self.runtime.block_on(workflow.remove_ingredient(&target)))
    }

    pub fn search(&self) -> Result<Vec<FfiRecipeSummary>, FfiFinderError> {
        self.with_workflow(|workflow| {
            let recipes = self.runtime.block_on(workflow.search()).to_vec();
            recipes.into_iter().map(Into::into).collect()
        })
    }

    pub fn clear_results(&self) -> Result<(), FfiFinderError> {
        self.with_workflow(|workflow| self.runtime.block_on(workflow.clear_results()))
    }

    pub fn ingredients(&self) -> Result<Vec<String>, FfiFinderError> {
        self.with_workflow(|workflow| {
            workflow
                .ingredients()
                .iter()
                .map(|i| i.as_str().to_string())
                .collect()
        })
    }

    pub fn pending_input(&self) -> Result<String, FfiFinderError> {
        self.with_workflow(|workflow| workflow.state().pending_input().to_string())
    }

    pub fn results(&self) -> Result<Vec<FfiRecipeSummary>, FfiFinderError> {
        self.with_workflow(|workflow| {
            workflow
                .results()
                .iter()
                .cloned()
                .map(Into::into)
                .collect()
        })
    }
}
