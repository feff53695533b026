use log::debug;
use std::time::Duration;

use crate::config::FinderConfig;
use crate::error::FinderError;
use crate::lookup::{RankingStrategy, RecipeLookup, RetryingLookup, SearchPolicy, SpoonacularClient};
use crate::workflow::{IngredientSearchWorkflow, LogNotifier, Notifier};

/// Builder for configuring an ingredient search session
#[derive(Default)]
pub struct SearchSessionBuilder {
    config: Option<FinderConfig>,
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_results: Option<u32>,
    ranking: Option<RankingStrategy>,
    lookup: Option<Box<dyn RecipeLookup>>,
    notifier: Option<Box<dyn Notifier>>,
}

impl SearchSessionBuilder {
    /// Use an explicit configuration instead of `config.toml` and the environment
    ///
    /// # Example
    /// ```
    /// use recipe_finder::{FinderConfig, IngredientSearchWorkflow};
    ///
    /// let builder = IngredientSearchWorkflow::builder()
    ///     .config(FinderConfig::default());
    /// ```
    pub fn config(mut self, config: FinderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the Spoonacular API key
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Point the client at another endpoint (proxies, test servers)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_finder::IngredientSearchWorkflow;
    /// use std::time::Duration;
    ///
    /// let builder = IngredientSearchWorkflow::builder()
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn ranking(mut self, ranking: RankingStrategy) -> Self {
        self.ranking = Some(ranking);
        self
    }

    /// Use a custom recipe lookup instead of the Spoonacular client
    pub fn lookup(mut self, lookup: Box<dyn RecipeLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Route user-facing warnings to the host UI (defaults to the log)
    pub fn notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Build the workflow. The session still has to be started with
    /// [`IngredientSearchWorkflow::start`].
    ///
    /// # Errors
    /// Returns `FinderError` if:
    /// - The configuration cannot be loaded
    /// - `max_results` or `timeout` is zero
    /// - No API key is available and no custom lookup was given
    pub fn build(self) -> Result<IngredientSearchWorkflow, FinderError> {
        let mut config = match self.config {
            Some(config) => config,
            None => FinderConfig::load()?,
        };

        if let Some(api_key) = self.api_key {
            config.api_key = Some(api_key);
        }
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(timeout) = self.timeout {
            // Whole seconds, rounded up so sub-second timeouts stay positive
            config.timeout = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        }
        if let Some(max_results) = self.max_results {
            config.max_results = max_results;
        }
        if let Some(ranking) = self.ranking {
            config.ranking = ranking;
        }

        check_limits(&config)?;

        let lookup = match self.lookup {
            Some(lookup) => lookup,
            None => {
                let client: Box<dyn RecipeLookup> = Box::new(SpoonacularClient::new(&config)?);
                if config.retry.attempts > 1 {
                    debug!("Retrying lookups up to {} times", config.retry.attempts);
                    Box::new(RetryingLookup::new(client, &config.retry))
                } else {
                    client
                }
            }
        };

        let notifier = self
            .notifier
            .unwrap_or_else(|| Box::new(LogNotifier) as Box<dyn Notifier>);

        Ok(IngredientSearchWorkflow::new(
            lookup,
            notifier,
            SearchPolicy::from(&config),
        ))
    }
}

/// Rejects settings no request could succeed with
pub(crate) fn check_limits(config: &FinderConfig) -> Result<(), FinderError> {
    if config.max_results == 0 {
        return Err(FinderError::BuilderError(
            "max_results must be at least 1".to_string(),
        ));
    }
    if config.timeout == 0 {
        return Err(FinderError::BuilderError(
            "timeout must be at least 1 second".to_string(),
        ));
    }
    Ok(())
}
