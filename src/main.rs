//! # `nios-leases`
//!
//! Retrieve the DHCP leases of a network from an Infoblox NIOS Grid Master.
//!
//! ## Usage
//!
//! **Let the Grid Master filter (two WAPI calls):**
//! ```sh
//! nios-leases by-address --ip4addr 192.168.1.20 --active-only
//! ```
//!
//! **Fan out one call per lease object:**
//! ```sh
//! nios-leases by-object --network 192.168.1.0/24 --threads 10 --sessions 2
//! ```
//!
//! Credentials are read from `gm.ini` (or `--config PATH`):
//! ```ini
//! [NIOS]
//! gm = '192.168.1.10'
//! api_version = 'v2.11'
//! valid_cert = 'false'
//! user = 'admin'
//! pass = 'infoblox'
//! ```

use clap::Parser as _;
use nios_leases::cli::Args;
use nios_leases::error::LeaseError;
use nios_leases::system::RealSystem;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // stdout carries the lease list; diagnostics go to stderr
    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let system = RealSystem::new();
    match nios_leases::run(&args, &system) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(
                err.downcast_ref::<LeaseError>()
                    .map_or(1, LeaseError::exit_code),
            );
        }
    }
}
