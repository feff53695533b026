use crate::model::{Ingredient, RecipeSummary};

/// Monotonic id handed to every issued search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchId(pub u64);

/// Everything the ingredient search screen knows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    ingredients: Vec<Ingredient>,
    pending_input: String,
    results: Vec<RecipeSummary>,
    next_search_id: u64,
    last_applied_search: Option<SearchId>,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingredients in the order they were added.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Recipes from the most recently applied search.
    pub fn results(&self) -> &[RecipeSummary] {
        &self.results
    }

    pub fn contains(&self, ingredient: &Ingredient) -> bool {
        self.ingredients.contains(ingredient)
    }

    pub fn last_applied_search(&self) -> Option<SearchId> {
        self.last_applied_search
    }

    pub(crate) fn set_pending_input(&mut self, text: String) {
        self.pending_input = text;
    }

    pub(crate) fn clear_pending_input(&mut self) {
        self.pending_input.clear();
    }

    /// Appends unless already present; returns whether it was added.
    pub(crate) fn add_ingredient(&mut self, ingredient: Ingredient) -> bool {
        if self.contains(&ingredient) {
            return false;
        }
        self.ingredients.push(ingredient);
        true
    }

    pub(crate) fn remove_ingredient(&mut self, target: &Ingredient) -> bool {
        match self.ingredients.iter().position(|i| i == target) {
            Some(index) => {
                self.ingredients.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn issue_search_id(&mut self) -> SearchId {
        self.next_search_id += 1;
        SearchId(self.next_search_id)
    }

    /// Installs `results` unless a newer search has already been applied.
    pub(crate) fn apply_search(&mut self, search_id: SearchId, results: Vec<RecipeSummary>) -> bool {
        if self.last_applied_search.is_some_and(|last| last > search_id) {
            return false;
        }
        self.results = results;
        self.last_applied_search = Some(search_id);
        true
    }

    pub(crate) fn clear_results(&mut self) {
        self.results.clear();
    }
}
