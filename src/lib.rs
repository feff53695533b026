pub mod builder;
pub mod collections;
pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod uniffi_bindings;
pub mod workflow;

pub use builder::SearchSessionBuilder;
pub use collections::{InMemoryUserStore, LoadState, MyRecipes, MyRecipesView, UserDataStore};
pub use config::FinderConfig;
pub use error::{FinderError, LookupError, StoreError, ValidationError};
pub use lookup::{
    ProductLookup, RankingStrategy, RecipeLookup, RetryingLookup, SearchPolicy, SearchRequest,
    SpoonacularClient,
};
pub use model::{
    normalize_ingredient_name, Collection, Ingredient, IngredientMatch, RecipeSummary, SavedRecipe,
};
pub use workflow::{
    update, Effect, IngredientSearchWorkflow, LogNotifier, Msg, Notification, Notifier,
    RecordingNotifier, SearchId, WorkflowState,
};

use log::debug;

/// Find recipes for a list of typed ingredients using `config.toml` and the
/// environment for API settings.
///
/// Ingredients are normalized and de-duplicated first. Unlike the workflow,
/// a lookup failure is returned to the caller.
pub async fn find_recipes(ingredients: &[&str]) -> Result<Vec<RecipeSummary>, FinderError> {
    let config = FinderConfig::load()?;
    let client = SpoonacularClient::new(&config)?;
    find_recipes_with(&client, SearchPolicy::from(&config), ingredients).await
}

/// Same as [`find_recipes`] with an explicit lookup and policy.
pub async fn find_recipes_with(
    lookup: &dyn RecipeLookup,
    policy: SearchPolicy,
    ingredients: &[&str],
) -> Result<Vec<RecipeSummary>, FinderError> {
    let mut unique: Vec<Ingredient> = Vec::new();
    for ingredient in ingredients.iter().filter_map(|raw| Ingredient::new(raw)) {
        if !unique.contains(&ingredient) {
            unique.push(ingredient);
        }
    }

    if unique.is_empty() {
        debug!("No ingredients given, skipping lookup");
        return Ok(Vec::new());
    }

    Ok(lookup.find_by_ingredients(&policy.request(&unique)).await?)
}

/// Resolve a scanned barcode to an ingredient name.
pub async fn resolve_barcode(upc: &str) -> Result<Option<String>, FinderError> {
    let config = FinderConfig::load()?;
    let client = SpoonacularClient::new(&config)?;
    Ok(client.product_name(upc).await?)
}
