//! Command implementations for the CLI
//!
//! - compare: run a cost comparison and print the results
//! - instances: list selectable instance types per provider
//! - regions: list selectable regions per provider
//! - config: configuration display and validation

pub mod compare;
pub mod config;
pub mod instances;
pub mod regions;
