use anyhow::Result;
use cloud_compare::catalog::load_catalog;
use cloud_compare::client::PricingClient;
use cloud_compare::config::load_config;
use cloud_compare::provider::{Provider, ALL_PROVIDERS};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use std::path::Path;

/// Execute the instances command
///
/// Loads the catalogs concurrently and prints each provider's instance
/// families. A provider whose catalog fetch failed is shown as offering no
/// options rather than aborting the listing.
pub async fn execute(provider_filter: Option<&str>, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    let filter: Option<Provider> = match provider_filter {
        Some(raw) => Some(raw.parse()?),
        None => None,
    };

    let client = PricingClient::new(&config.service)?;
    let catalog = load_catalog(&client).await;

    for provider in ALL_PROVIDERS {
        if filter.is_some_and(|f| f != provider) {
            continue;
        }

        println!("{}", provider.label().bold());

        match catalog.get(&provider) {
            Some(provider_catalog) => {
                let mut table = Table::new();
                table.load_preset(UTF8_FULL);
                table.set_header(vec!["Family", "Instance Types"]);

                for (family, types) in &provider_catalog.instance_families {
                    table.add_row(vec![family.clone(), types.join(", ")]);
                }

                println!("{table}");

                if !provider_catalog.storage_types.is_empty() {
                    println!(
                        "Storage types: {}",
                        provider_catalog.storage_types.join(", ")
                    );
                }
            }
            None => {
                println!(
                    "{}",
                    "  no options available (catalog fetch failed)".yellow()
                );
            }
        }
        println!();
    }

    Ok(())
}
