use serde::{Deserialize, Serialize};
use std::fmt;

/// Trim, lower-case, then upper-case the first character.
///
/// Internal whitespace is kept as typed, so "green  tea" and "green tea" stay
/// distinct ingredients.
pub fn normalize_ingredient_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// An ingredient name in normalized form. Two ingredients are the same
/// ingredient exactly when their normalized names are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ingredient(String);

impl Ingredient {
    /// Normalize `raw`, returning `None` when nothing is left after trimming
    pub fn new(raw: &str) -> Option<Self> {
        let name = normalize_ingredient_name(raw);
        if name.is_empty() {
            None
        } else {
            Some(Ingredient(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ingredient {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for Ingredient {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One ingredient line of a recipe as reported by the recipe API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngredientMatch {
    pub id: Option<u64>,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub original: String,
    pub image: Option<String>,
    pub aisle: Option<String>,
}

/// A candidate recipe returned by an ingredient search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_type: Option<String>,
    #[serde(default)]
    pub used_ingredient_count: u32,
    #[serde(default)]
    pub missed_ingredient_count: u32,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub used_ingredients: Vec<IngredientMatch>,
    #[serde(default)]
    pub missed_ingredients: Vec<IngredientMatch>,
    #[serde(default)]
    pub unused_ingredients: Vec<IngredientMatch>,
}

/// The two per-user recipe collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    PastRecipes,
    WishList,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::PastRecipes => "past_recipes",
            Collection::WishList => "wish_list",
        }
    }
}

/// Id of the document the user store seeds every collection with
pub const PLACEHOLDER_DOC_ID: &str = "recipe0";

/// A recipe stored in one of the user's collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRecipe {
    pub doc_id: String,
    pub recipe: RecipeSummary,
}

impl SavedRecipe {
    pub fn is_placeholder(&self) -> bool {
        self.doc_id == PLACEHOLDER_DOC_ID
    }
}
