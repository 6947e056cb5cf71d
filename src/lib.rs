//! `nios-leases` - retrieve DHCP leases for a network from an Infoblox NIOS Grid Master
//!
//! This library reads Grid Master credentials from an INI file and queries
//! the WAPI either with two server-filtered calls or with one call per lease
//! object spread over a fixed-size worker pool.

pub mod cli;
pub mod config;
pub mod error;
pub mod leases;
pub mod operations;
pub mod output;
pub mod system;
pub mod wapi;

use anyhow::Result;
use cli::Args;
use config::GridConfig;
use operations::retrieve::RetrieveOperation;
use system::System;
use wapi::WapiClient;

/// Main entry point for the nios-leases library
pub fn run(args: &Args, system: &dyn System) -> Result<()> {
    let operation = RetrieveOperation::new(args)?;

    let config = GridConfig::load_from_file(system, &args.config)?;
    config.validate()?;

    let client = WapiClient::connect(&config, operation.sessions())?;
    run_with_client(&operation, &client)
}

/// Run a validated operation against an existing client and print the result
pub fn run_with_client(operation: &RetrieveOperation, client: &WapiClient) -> Result<()> {
    let outcome = operation.execute(client)?;

    // Output to stdout (not using logging)
    println!(
        "{}",
        outcome.render(operation.format(), operation.active_only())?
    );

    outcome.ensure_complete()
}
