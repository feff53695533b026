//! The user's saved recipe collections and the My Recipes screen decision.
//!
//! Each collection carries an explicit load state, so "still loading" is never
//! confused with "loaded but empty".
mod store;

pub use store::{InMemoryUserStore, UserDataStore};

use log::{debug, warn};

use crate::error::{FinderError, StoreError};
use crate::model::{Collection, RecipeSummary, SavedRecipe};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    NotStarted,
    Loading,
    Loaded(Vec<SavedRecipe>),
    Failed(String),
}

impl LoadState {
    fn is_pending(&self) -> bool {
        matches!(self, LoadState::NotStarted | LoadState::Loading)
    }

    /// Saved recipes, placeholder documents excluded
    fn saved(&self) -> impl Iterator<Item = &SavedRecipe> {
        let docs: &[SavedRecipe] = match self {
            LoadState::Loaded(docs) => docs,
            _ => &[],
        };
        docs.iter().filter(|doc| !doc.is_placeholder())
    }
}

/// What the My Recipes screen should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MyRecipesView {
    LoginRequired,
    Loading,
    LoadFailed(String),
    NoRecipes,
    Both,
    PastRecipesOnly,
    WishListOnly,
}

/// Collections of the signed-in user
#[derive(Debug, Clone, Default)]
pub struct MyRecipes {
    user_id: Option<String>,
    past_recipes: LoadState,
    wish_list: LoadState,
}

impl MyRecipes {
    /// `user_id` is `None` when nobody is logged in
    pub fn new(user_id: Option<String>) -> Self {
        MyRecipes {
            user_id: user_id.filter(|id| !id.is_empty()),
            ..Default::default()
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn state(&self, collection: Collection) -> &LoadState {
        match collection {
            Collection::PastRecipes => &self.past_recipes,
            Collection::WishList => &self.wish_list,
        }
    }

    fn state_mut(&mut self, collection: Collection) -> &mut LoadState {
        match collection {
            Collection::PastRecipes => &mut self.past_recipes,
            Collection::WishList => &mut self.wish_list,
        }
    }

    /// Saved recipes of a collection, placeholders excluded
    pub fn recipes(&self, collection: Collection) -> Vec<&SavedRecipe> {
        self.state(collection).saved().collect()
    }

    pub fn view(&self) -> MyRecipesView {
        if self.user_id.is_none() {
            return MyRecipesView::LoginRequired;
        }
        if self.past_recipes.is_pending() || self.wish_list.is_pending() {
            return MyRecipesView::Loading;
        }
        for state in [&self.past_recipes, &self.wish_list] {
            if let LoadState::Failed(message) = state {
                return MyRecipesView::LoadFailed(message.clone());
            }
        }

        let has_past = self.past_recipes.saved().next().is_some();
        let has_wishes = self.wish_list.saved().next().is_some();
        match (has_past, has_wishes) {
            (true, true) => MyRecipesView::Both,
            (true, false) => MyRecipesView::PastRecipesOnly,
            (false, true) => MyRecipesView::WishListOnly,
            (false, false) => MyRecipesView::NoRecipes,
        }
    }

    /// Marks collections that still need fetching as loading and returns them.
    /// Nothing is returned for a logged-out user or while a load is running.
    pub fn begin_load(&mut self) -> Vec<Collection> {
        if self.user_id.is_none() {
            return Vec::new();
        }
        let mut started = Vec::new();
        for collection in [Collection::PastRecipes, Collection::WishList] {
            let state = self.state_mut(collection);
            if matches!(state, LoadState::NotStarted | LoadState::Failed(_)) {
                *state = LoadState::Loading;
                started.push(collection);
            }
        }
        started
    }

    pub fn finish_load(
        &mut self,
        collection: Collection,
        result: Result<Vec<SavedRecipe>, StoreError>,
    ) {
        let state = match result {
            Ok(docs) => {
                debug!("Loaded {} documents from {}", docs.len(), collection.as_str());
                LoadState::Loaded(docs)
            }
            Err(e) => {
                warn!("Failed to load {}: {}", collection.as_str(), e);
                LoadState::Failed(e.to_string())
            }
        };
        *self.state_mut(collection) = state;
    }

    /// Fetches every collection that is not loaded yet
    pub async fn load(&mut self, store: &dyn UserDataStore) {
        let Some(user_id) = self.user_id.clone() else {
            return;
        };
        for collection in self.begin_load() {
            let result = store.load_collection(&user_id, collection).await;
            self.finish_load(collection, result);
        }
    }

    /// Saves a recipe and mirrors it into the loaded collection
    pub async fn save(
        &mut self,
        store: &dyn UserDataStore,
        collection: Collection,
        recipe: RecipeSummary,
    ) -> Result<SavedRecipe, FinderError> {
        let user_id = self.user_id.clone().ok_or(StoreError::LoginRequired)?;

        let saved = store.save_recipe(&user_id, collection, recipe).await?;
        if let LoadState::Loaded(docs) = self.state_mut(collection) {
            if !docs.iter().any(|doc| doc.doc_id == saved.doc_id) {
                docs.push(saved.clone());
            }
        }
        Ok(saved)
    }
}
