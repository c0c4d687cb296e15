use anyhow::Result;
use clap::Args;
use cloud_compare::catalog::load_catalog;
use cloud_compare::client::PricingClient;
use cloud_compare::config::load_config;
use cloud_compare::derive;
use cloud_compare::models::ComparisonRequest;
use cloud_compare::provider::ALL_PROVIDERS;
use cloud_compare::state::{ComparisonEngine, ComparisonView, RequestState};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use std::path::Path;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// AWS instance type
    #[arg(long, default_value = "t3.medium")]
    pub instance_aws: String,

    /// GCP instance type
    #[arg(long, default_value = "e2-standard-2")]
    pub instance_gcp: String,

    /// Azure instance type
    #[arg(long, default_value = "Standard_D2s_v3")]
    pub instance_azure: String,

    /// Usage duration in hours (config default when omitted)
    #[arg(long)]
    pub hours: Option<f64>,

    /// Attached storage in GB (config default when omitted)
    #[arg(long)]
    pub storage_gb: Option<u32>,

    /// AWS region (config default when omitted)
    #[arg(long)]
    pub aws_region: Option<String>,

    /// GCP region (config default when omitted)
    #[arg(long)]
    pub gcp_region: Option<String>,

    /// Azure region (config default when omitted)
    #[arg(long)]
    pub azure_region: Option<String>,

    /// Skip the startup catalog fetch and submit identifiers unchecked
    #[arg(long)]
    pub skip_catalog: bool,
}

impl Default for CompareArgs {
    fn default() -> Self {
        Self {
            instance_aws: "t3.medium".to_string(),
            instance_gcp: "e2-standard-2".to_string(),
            instance_azure: "Standard_D2s_v3".to_string(),
            hours: None,
            storage_gb: None,
            aws_region: None,
            gcp_region: None,
            azure_region: None,
            skip_catalog: false,
        }
    }
}

/// Execute the compare command
pub async fn execute(args: CompareArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    let catalog = if args.skip_catalog {
        None
    } else {
        let client = PricingClient::new(&config.service)?;
        let catalog = load_catalog(&client).await;
        for provider in ALL_PROVIDERS {
            if !catalog.contains_key(&provider) {
                println!(
                    "{}",
                    format!(
                        "Note: {} catalog unavailable, its identifier is submitted unchecked",
                        provider.label()
                    )
                    .yellow()
                );
            }
        }
        Some(catalog)
    };

    let request = ComparisonRequest {
        instance_aws: args.instance_aws,
        instance_gcp: args.instance_gcp,
        instance_azure: args.instance_azure,
        hours: args.hours.unwrap_or(config.defaults.hours),
        storage_gb: args.storage_gb.unwrap_or(config.defaults.storage_gb),
        aws_region: args
            .aws_region
            .unwrap_or_else(|| config.defaults.aws_region.clone()),
        gcp_region: args
            .gcp_region
            .unwrap_or_else(|| config.defaults.gcp_region.clone()),
        azure_region: args
            .azure_region
            .unwrap_or_else(|| config.defaults.azure_region.clone()),
    };

    info!(
        hours = request.hours,
        storage_gb = request.storage_gb,
        "Submitting comparison request"
    );

    let engine = ComparisonEngine::from_config(&config)?;
    engine.submit(&request, catalog.as_ref()).await;
    let view = engine.view().await;

    match &view.state {
        RequestState::Success(_) => {
            print_comparison(&view);
            Ok(())
        }
        RequestState::Failed(reason) => anyhow::bail!("{}", reason),
        // submit() always settles to a terminal state before returning
        other => anyhow::bail!("Comparison ended in unexpected state: {:?}", other),
    }
}

fn print_comparison(view: &ComparisonView) {
    let Some(result) = view.state.result() else {
        return;
    };

    if result.results.is_empty() {
        println!(
            "{}",
            "The pricing service returned no provider results.".yellow()
        );
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Provider",
        "Instance",
        "Region",
        "Compute ($)",
        "Storage ($)",
        "Total ($)",
    ]);

    // chart series and result map share the same fixed provider order
    for ((_, cost), point) in result.results.iter().zip(&view.chart) {
        table.add_row(vec![
            Cell::new(point.label),
            Cell::new(&point.instance_type),
            Cell::new(&cost.region),
            Cell::new(format!("{:.4}", point.compute_cost)),
            Cell::new(format!("{:.4}", point.storage_cost)),
            Cell::new(format!("{:.4}", point.total_cost)),
        ]);
    }

    println!("{table}");

    let total: f64 = view.shares.iter().map(|s| s.value).sum();
    if total > 0.0 {
        let shares = view
            .shares
            .iter()
            .map(|s| format!("{} {:.1}%", s.label, s.value / total * 100.0))
            .collect::<Vec<_>>()
            .join("  ");
        println!("Cost share: {}", shares);
    }

    if let Some(summary) = derive::summarize(&result.results) {
        println!(
            "{}",
            format!(
                "Cheapest: {} (save ${:.2}, {:.2}% vs {})",
                summary.cheapest_provider.label(),
                summary.max_savings,
                summary.percentage_savings,
                summary.most_expensive_provider.label()
            )
            .green()
            .bold()
        );
    }
}
