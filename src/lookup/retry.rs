use crate::config::RetryConfig;
use crate::error::LookupError;
use crate::lookup::{RecipeLookup, SearchRequest};
use crate::model::RecipeSummary;
use async_trait::async_trait;
use log::{debug, info, warn};
use std::time::Duration;
use tokio::time::sleep;

/// Wraps a lookup with transport-level retries.
///
/// Status errors below 500 are answered by the API itself and are not retried.
pub struct RetryingLookup {
    inner: Box<dyn RecipeLookup>,
    attempts: u32,
    delay_ms: u64,
}

impl RetryingLookup {
    pub fn new(inner: Box<dyn RecipeLookup>, config: &RetryConfig) -> Self {
        RetryingLookup {
            inner,
            attempts: config.attempts.max(1),
            delay_ms: config.delay_ms,
        }
    }

    /// Delay after the given failed attempt, growing linearly
    fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.delay_ms.saturating_mul(u64::from(attempt)))
    }

    fn is_retryable(error: &LookupError) -> bool {
        match error {
            LookupError::Http(_) => true,
            LookupError::Status { status, .. } => *status >= 500,
            LookupError::Parse(_) | LookupError::MissingApiKey => false,
        }
    }
}

#[async_trait]
impl RecipeLookup for RetryingLookup {
    fn lookup_name(&self) -> &str {
        self.inner.lookup_name()
    }

    async fn find_by_ingredients(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<RecipeSummary>, LookupError> {
        let mut attempt = 1;
        loop {
            debug!(
                "Looking up recipes with {} (attempt {}/{})",
                self.inner.lookup_name(),
                attempt,
                self.attempts
            );

            match self.inner.find_by_ingredients(request).await {
                Ok(recipes) => {
                    if attempt > 1 {
                        info!("Recipe lookup succeeded on attempt {}", attempt);
                    }
                    return Ok(recipes);
                }
                Err(e) if attempt < self.attempts && Self::is_retryable(&e) => {
                    warn!(
                        "Recipe lookup via {} failed (attempt {}/{}): {}",
                        self.inner.lookup_name(),
                        attempt,
                        self.attempts,
                        e
                    );
                    let delay = self.backoff(attempt);
                    debug!("Waiting {:?} before retry", delay);
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
