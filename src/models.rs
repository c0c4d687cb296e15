use crate::error::EngineError;
use crate::provider::{Provider, ALL_PROVIDERS};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Instance catalog for a single provider, as served by `/instances/{provider}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCatalog {
    /// Family name -> ordered instance type identifiers
    pub instance_families: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub storage_types: Vec<String>,
}

impl ProviderCatalog {
    pub fn contains_instance(&self, instance_type: &str) -> bool {
        self.instance_families
            .values()
            .any(|types| types.iter().any(|t| t == instance_type))
    }

    pub fn instance_count(&self) -> usize {
        self.instance_families.values().map(Vec::len).sum()
    }
}

/// Catalogs keyed by provider. A missing entry means that provider's
/// catalog fetch failed and it offers no options this session.
pub type InstanceCatalog = HashMap<Provider, ProviderCatalog>;

/// User-owned comparison configuration.
///
/// Field names double as the transport-level query parameter names, so the
/// struct serializes directly onto the `/compare` query string.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRequest {
    pub instance_aws: String,
    pub instance_gcp: String,
    pub instance_azure: String,
    pub hours: f64,
    pub storage_gb: u32,
    pub aws_region: String,
    pub gcp_region: String,
    pub azure_region: String,
}

impl ComparisonRequest {
    pub fn instance_for(&self, provider: Provider) -> &str {
        match provider {
            Provider::Aws => &self.instance_aws,
            Provider::Gcp => &self.instance_gcp,
            Provider::Azure => &self.instance_azure,
        }
    }

    pub fn region_for(&self, provider: Provider) -> &str {
        match provider {
            Provider::Aws => &self.aws_region,
            Provider::Gcp => &self.gcp_region,
            Provider::Azure => &self.azure_region,
        }
    }

    /// Validate the request before it is submitted.
    ///
    /// Checks numeric bounds, non-empty instance identifiers, region
    /// membership, and (when a catalog is available for a provider)
    /// membership of the instance identifier in that catalog.
    pub fn validate(&self, catalog: Option<&InstanceCatalog>) -> Result<(), EngineError> {
        if self.hours < 1.0 {
            return Err(EngineError::Validation(format!(
                "hours must be at least 1, got {}",
                self.hours
            )));
        }

        for provider in ALL_PROVIDERS {
            let instance = self.instance_for(provider);
            if instance.is_empty() {
                return Err(EngineError::Validation(format!(
                    "No instance type selected for {}",
                    provider
                )));
            }

            let region = self.region_for(provider);
            if !provider.is_valid_region(region) {
                return Err(EngineError::Validation(format!(
                    "'{}' is not a known {} region",
                    region, provider
                )));
            }

            if let Some(provider_catalog) = catalog.and_then(|c| c.get(&provider)) {
                if !provider_catalog.contains_instance(instance) {
                    return Err(EngineError::Validation(format!(
                        "'{}' is not in the {} instance catalog",
                        instance, provider
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Per-provider cost record from the comparison payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCost {
    pub instance_type: String,
    pub region: String,
    pub hours_running: f64,
    pub storage_gb: f64,
    pub compute_cost: f64,
    pub storage_cost: f64,
    pub total_cost: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub price_source: Option<String>,
}

impl ProviderCost {
    /// Whether `total_cost` matches `compute_cost + storage_cost` within
    /// floating tolerance.
    pub fn cost_consistent(&self) -> bool {
        (self.total_cost - (self.compute_cost + self.storage_cost)).abs() <= 1e-6
    }
}

/// The per-provider result map.
///
/// Typed fields instead of a free-form map: iteration always yields present
/// entries in the fixed `aws, gcp, azure` order the pricing service inserts
/// them in, which makes downstream ordering (series, tie-breaks, palette
/// positions) deterministic by construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderCosts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<ProviderCost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcp: Option<ProviderCost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure: Option<ProviderCost>,
}

impl ProviderCosts {
    pub fn get(&self, provider: Provider) -> Option<&ProviderCost> {
        match provider {
            Provider::Aws => self.aws.as_ref(),
            Provider::Gcp => self.gcp.as_ref(),
            Provider::Azure => self.azure.as_ref(),
        }
    }

    /// Present entries in fixed provider order
    pub fn iter(&self) -> impl Iterator<Item = (Provider, &ProviderCost)> + '_ {
        ALL_PROVIDERS
            .into_iter()
            .filter_map(|p| self.get(p).map(|cost| (p, cost)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.aws.is_none() && self.gcp.is_none() && self.azure.is_none()
    }
}

/// Cross-provider summary computed by the pricing service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub cheapest_provider: Provider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_expensive_provider: Option<Provider>,
    pub cost_breakdown: HashMap<Provider, f64>,
    pub max_savings: f64,
    pub percentage_savings: f64,
}

/// Full comparison payload, produced wholesale by one fetch and replaced
/// wholesale by the next.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub results: ProviderCosts,
    pub comparison: ComparisonSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_timestamp: Option<String>,
}
