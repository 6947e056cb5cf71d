use crate::config::DEFAULT_CONFIG_FILE;
use crate::leases::pool::{DEFAULT_SESSIONS, DEFAULT_THREADS};
use clap::{Parser, Subcommand};

/// Command-line arguments for nios-leases
#[derive(Parser, Debug, Clone)]
#[command(name = "nios-leases")]
#[command(about = "Retrieve DHCP leases for a network from an Infoblox NIOS Grid Master")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// Credentials INI file with a [NIOS] section
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: String,

    /// Network view
    #[arg(short, long, value_name = "VIEW", default_value = "default", global = true)]
    pub view: String,

    /// Show active leases only
    #[arg(short, long, global = true)]
    pub active_only: bool,

    /// Output format: json, yaml or table
    #[arg(
        short = 'f',
        long = "output-format",
        value_name = "FORMAT",
        default_value = "json",
        global = true
    )]
    pub output_format: String,

    /// Enable debug messages
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub strategy: Strategy,
}

/// How leases are retrieved from the Grid Master
#[derive(Subcommand, Debug, Clone)]
pub enum Strategy {
    /// Resolve the network of an address, then let the grid filter its leases (two calls)
    ByAddress {
        /// IPv4 address inside the network to inspect
        #[arg(short, long = "ip4addr", value_name = "IP")]
        ip4addr: String,
    },

    /// List the network's addresses, then read each lease object on a worker pool
    ByObject {
        /// Network in CIDR notation, e.g. 10.0.0.0/24
        #[arg(short, long, value_name = "CIDR")]
        network: String,

        /// Number of worker threads
        #[arg(short, long, value_name = "N", default_value_t = DEFAULT_THREADS)]
        threads: usize,

        /// Number of HTTP sessions shared by the workers (at most 10)
        #[arg(short, long, value_name = "N", default_value_t = DEFAULT_SESSIONS)]
        sessions: usize,
    },
}
