use crate::error::ValidationError;
use crate::model::Ingredient;
use crate::workflow::SearchId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run a recipe lookup and report back with `Msg::SearchCompleted`.
    Lookup {
        search_id: SearchId,
        ingredients: Vec<Ingredient>,
    },
    /// Input was rejected; warn the user.
    RejectInput(ValidationError),
    /// A lookup failed; state was left untouched.
    ReportLookupFailure { search_id: SearchId, message: String },
    /// The host should clear its pending external value (e.g. the last scan).
    ReleaseExternalInput,
}
