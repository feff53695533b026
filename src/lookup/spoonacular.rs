use crate::config::FinderConfig;
use crate::error::LookupError;
use crate::lookup::{ProductLookup, RecipeLookup, SearchRequest};
use crate::model::RecipeSummary;
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

/// Spoonacular REST client for recipe search and barcode lookups
pub struct SpoonacularClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ProductResponse {
    title: Option<String>,
}

impl SpoonacularClient {
    /// Create a client from configuration
    pub fn new(config: &FinderConfig) -> Result<Self, LookupError> {
        let api_key = config.resolve_api_key()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(SpoonacularClient {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client against the public endpoint with default settings
    pub fn with_api_key(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        SpoonacularClient {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn read_body(response: Response) -> Result<String, LookupError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl RecipeLookup for SpoonacularClient {
    fn lookup_name(&self) -> &str {
        "spoonacular"
    }

    async fn find_by_ingredients(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<RecipeSummary>, LookupError> {
        let url = format!("{}/recipes/findByIngredients", self.base_url);
        debug!(
            "Searching recipes for [{}] (number={}, ranking={})",
            request.joined_ingredients(),
            request.max_results,
            request.ranking.as_param()
        );

        let response = self
            .client
            .get(url)
            .query(&[
                ("apiKey", self.api_key.clone()),
                ("ingredients", request.joined_ingredients()),
                ("number", request.max_results.to_string()),
                ("ranking", request.ranking.as_param().to_string()),
                ("ignorePantry", request.ignore_pantry.to_string()),
            ])
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        let recipes: Vec<RecipeSummary> =
            serde_json::from_str(&body).map_err(|e| LookupError::Parse(e.to_string()))?;
        debug!("Recipe API returned {} candidates", recipes.len());

        Ok(recipes)
    }
}

#[async_trait]
impl ProductLookup for SpoonacularClient {
    async fn product_name(&self, upc: &str) -> Result<Option<String>, LookupError> {
        let url = format!("{}/food/products/upc/{}", self.base_url, upc.trim());
        debug!("Resolving barcode {}", upc);

        let response = self
            .client
            .get(url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = Self::read_body(response).await?;
        let product: ProductResponse =
            serde_json::from_str(&body).map_err(|e| LookupError::Parse(e.to_string()))?;

        Ok(product.title.filter(|title| !title.trim().is_empty()))
    }
}
