use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cloud_compare::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    init_tracing();

    match args.get_command() {
        cli::Commands::Compare(compare_args) => {
            commands::compare::execute(compare_args, args.config.as_deref()).await?;
        }
        cli::Commands::Instances { provider } => {
            commands::instances::execute(provider.as_deref(), args.config.as_deref()).await?;
        }
        cli::Commands::Regions => {
            commands::regions::execute()?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(args.config.as_deref())?,
            cli::ConfigCommands::Validate => commands::config::validate(args.config.as_deref())?,
        },
        cli::Commands::Version => {
            println!("cloud-compare v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
