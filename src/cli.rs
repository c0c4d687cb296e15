use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cloud-compare", version, about = "Cloud compute cost comparison")]
pub struct Cli {
    /// Configuration file path (optional; built-in defaults apply)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compare instance costs across the three providers (default)
    Compare(crate::commands::compare::CompareArgs),

    /// List the selectable instance types per provider
    Instances {
        /// Restrict output to one provider
        #[arg(short, long)]
        provider: Option<String>,
    },

    /// List the selectable regions per provider
    Regions,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display effective configuration
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Compare if none provided
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Compare(Default::default()))
    }
}
