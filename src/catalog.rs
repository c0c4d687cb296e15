use crate::client::PricingClient;
use crate::error::EngineError;
use crate::models::InstanceCatalog;
use crate::provider::ALL_PROVIDERS;
use futures::future::join_all;
use tracing::{info, warn};

/// Load the instance catalogs for all providers concurrently.
///
/// The three retrievals are independent: a provider whose fetch fails is
/// absent from the returned map and logged as a non-fatal diagnostic, and the
/// others proceed. The map is returned only once all retrievals have settled.
pub async fn load_catalog(client: &PricingClient) -> InstanceCatalog {
    let fetches = ALL_PROVIDERS.into_iter().map(|provider| async move {
        let outcome = client
            .instance_catalog(provider)
            .await
            .map_err(|e| EngineError::CatalogUnavailable {
                provider,
                reason: e.to_string(),
            });
        (provider, outcome)
    });

    let mut catalog = InstanceCatalog::new();
    for (provider, outcome) in join_all(fetches).await {
        match outcome {
            Ok(provider_catalog) => {
                info!(
                    provider = %provider,
                    instance_types = provider_catalog.instance_count(),
                    "Instance catalog loaded"
                );
                catalog.insert(provider, provider_catalog);
            }
            Err(e) => {
                warn!(provider = %provider, error = %e, "Instance catalog unavailable, selector left empty");
            }
        }
    }

    catalog
}
