use crate::model::{Ingredient, RecipeSummary};
use crate::workflow::SearchId;

/// Outcome of a recipe lookup as fed back into the workflow. Errors are
/// carried as their display text.
pub type SearchOutcome = Result<Vec<RecipeSummary>, String>;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the ingredient input box.
    InputChanged(String),
    /// User pressed Add with the given text.
    IngredientSubmitted(String),
    /// User pressed Add for whatever is in the input box.
    PendingSubmitted,
    /// Ingredient name from an out-of-band source such as a barcode scan.
    ExternalIngredient(Option<String>),
    /// User removed an ingredient from the list.
    IngredientRemoved(Ingredient),
    /// User asked for recipes matching the given ingredients.
    SearchRequested(Vec<Ingredient>),
    /// A lookup issued for `search_id` finished.
    SearchCompleted {
        search_id: SearchId,
        outcome: SearchOutcome,
    },
    /// User clicked Clear Search Results.
    ResultsCleared,
}
