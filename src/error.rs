use thiserror::Error;

/// Rejected user input. Recoverable: the user is warned and can retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The submitted ingredient text was empty
    #[error("ingredient cannot be empty")]
    EmptyIngredient,
}

/// Failures of the external recipe or product lookup
#[derive(Error, Debug)]
pub enum LookupError {
    /// Transport level failure (connection, timeout, TLS, ...)
    #[error("Failed to reach recipe API: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Recipe API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape
    #[error("Failed to parse recipe API response: {0}")]
    Parse(String),

    /// No API key in the configuration or the environment
    #[error("SPOONACULAR_API_KEY not found in config or environment")]
    MissingApiKey,
}

/// Failures of the user data store backing the saved collections
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Login required to access saved recipes")]
    LoginRequired,

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("User data store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the public API of this crate
#[derive(Error, Debug)]
pub enum FinderError {
    /// User input was rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Recipe or product lookup failed
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// User data store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
