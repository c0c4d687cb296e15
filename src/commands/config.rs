use anyhow::Result;
use cloud_compare::config::load_config;
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the effective configuration after file, environment and
/// built-in defaults are layered. The pricing service is unauthenticated,
/// so there are no secrets to mask.
pub fn show(config_path: Option<&Path>) -> Result<()> {
    let cfg = load_config(config_path)?;

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&cfg)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
pub fn validate(config_path: Option<&Path>) -> Result<()> {
    let cfg = load_config(config_path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Pricing service: {}", cfg.service.base_url);
    println!("  Request timeout: {}s", cfg.service.timeout_seconds);
    println!(
        "  Default usage: {} hours, {} GB storage",
        cfg.defaults.hours, cfg.defaults.storage_gb
    );
    println!(
        "  Default regions: {} / {} / {}",
        cfg.defaults.aws_region, cfg.defaults.gcp_region, cfg.defaults.azure_region
    );

    info!("Configuration validation successful");
    Ok(())
}
