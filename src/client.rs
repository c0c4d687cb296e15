//! HTTP client for the remote pricing service.
//!
//! Wraps the two consumed endpoints: per-provider instance catalogs and the
//! parameterized cost comparison.

use crate::config::ServiceConfig;
use crate::error::EngineError;
use crate::models::{ComparisonRequest, ComparisonResult, ProviderCatalog};
use crate::provider::Provider;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PricingClient {
    http: Client,
    base_url: String,
}

impl PricingClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, EngineError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| EngineError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the instance catalog for one provider.
    pub async fn instance_catalog(&self, provider: Provider) -> Result<ProviderCatalog, EngineError> {
        let url = format!("{}/instances/{}", self.base_url, provider);

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(EngineError::Fetch {
                status: Some(response.status().as_u16()),
                message: format!("catalog request for {} returned HTTP {}", provider, response.status()),
            });
        }

        let body = response.text().await?;
        let catalog: ProviderCatalog = serde_json::from_str(&body)?;

        debug!(
            provider = %provider,
            families = catalog.instance_families.len(),
            "Fetched instance catalog"
        );
        Ok(catalog)
    }

    /// Issue a single comparison query encoding all eight request parameters.
    pub async fn compare(&self, request: &ComparisonRequest) -> Result<ComparisonResult, EngineError> {
        let url = format!("{}/compare", self.base_url);

        let response = self.http.get(&url).query(request).send().await?;

        if !response.status().is_success() {
            return Err(EngineError::Fetch {
                status: Some(response.status().as_u16()),
                message: format!("comparison request returned HTTP {}", response.status()),
            });
        }

        let body = response.text().await?;
        let result: ComparisonResult = serde_json::from_str(&body)?;

        debug!(
            providers = result.results.len(),
            cheapest = %result.comparison.cheapest_provider,
            "Fetched comparison result"
        );
        Ok(result)
    }
}
