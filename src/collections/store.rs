use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StoreError;
use crate::model::{Collection, RecipeSummary, SavedRecipe, PLACEHOLDER_DOC_ID};

/// Per-user storage of the saved recipe collections
#[async_trait]
pub trait UserDataStore: Send + Sync {
    async fn load_collection(
        &self,
        user_id: &str,
        collection: Collection,
    ) -> Result<Vec<SavedRecipe>, StoreError>;

    /// Saves `recipe`, returning the stored document. Saving a recipe that is
    /// already in the collection returns the existing document.
    async fn save_recipe(
        &self,
        user_id: &str,
        collection: Collection,
        recipe: RecipeSummary,
    ) -> Result<SavedRecipe, StoreError>;
}

/// Process-local store, seeded with the placeholder document per collection
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    collections: RwLock<HashMap<(String, Collection), Vec<SavedRecipe>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates both collections for a new account
    pub fn register_user(&self, user_id: &str) -> Result<(), StoreError> {
        let mut collections = self.write()?;
        for collection in [Collection::PastRecipes, Collection::WishList] {
            collections
                .entry((user_id.to_string(), collection))
                .or_insert_with(|| {
                    vec![SavedRecipe {
                        doc_id: PLACEHOLDER_DOC_ID.to_string(),
                        recipe: RecipeSummary::default(),
                    }]
                });
        }
        Ok(())
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<(String, Collection), Vec<SavedRecipe>>>, StoreError>
    {
        self.collections
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserDataStore for InMemoryUserStore {
    async fn load_collection(
        &self,
        user_id: &str,
        collection: Collection,
    ) -> Result<Vec<SavedRecipe>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;

        collections
            .get(&(user_id.to_string(), collection))
            .cloned()
            .ok_or_else(|| StoreError::UnknownUser(user_id.to_string()))
    }

    async fn save_recipe(
        &self,
        user_id: &str,
        collection: Collection,
        recipe: RecipeSummary,
    ) -> Result<SavedRecipe, StoreError> {
        let mut collections = self.write()?;
        let docs = collections
            .get_mut(&(user_id.to_string(), collection))
            .ok_or_else(|| StoreError::UnknownUser(user_id.to_string()))?;

        if let Some(existing) = docs
            .iter()
            .find(|doc| !doc.is_placeholder() && doc.recipe.id == recipe.id)
        {
            return Ok(existing.clone());
        }

        // Placeholder occupies recipe0
        let saved = SavedRecipe {
            doc_id: format!("recipe{}", docs.len()),
            recipe,
        };
        debug!(
            "Saved recipe {} to {} of {}",
            saved.recipe.id,
            collection.as_str(),
            user_id
        );
        docs.push(saved.clone());
        Ok(saved)
    }
}
