use anyhow::Result;
use cloud_compare::provider::ALL_PROVIDERS;
use colored::Colorize;

/// Execute the regions command
///
/// The region sets are fixed per provider; no network access is needed.
pub fn execute() -> Result<()> {
    for provider in ALL_PROVIDERS {
        println!("{}", provider.label().bold());
        for region in provider.regions() {
            if *region == provider.default_region() {
                println!("  {} {}", region, "(default)".green());
            } else {
                println!("  {}", region);
            }
        }
        println!();
    }

    Ok(())
}
