//! Lease retrieval coordination

use crate::cli::{Args, Strategy};
use crate::config::validation::{clamp_sessions, validate_ipv4, validate_network, validate_threads};
use crate::error::LeaseError;
use crate::leases::{
    Lease, LeaseFailure, WorkerPool, fetch_by_address, fetch_by_object, filter_active,
};
use crate::output::{OutputFormat, render, summary};
use crate::wapi::WapiClient;
use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Validated request, ready to run against a `WapiClient`
#[derive(Debug, Clone)]
pub struct RetrieveOperation {
    strategy: Strategy,
    view: String,
    active_only: bool,
    format: OutputFormat,
    progress: bool,
}

/// Result of one retrieval run
#[derive(Debug)]
pub struct RetrieveOutcome {
    /// Leases after the active filter, if any
    pub leases: Vec<Lease>,

    /// Per-object requests that failed (fan-out only)
    pub failures: Vec<LeaseFailure>,

    /// Number of per-object requests issued (fan-out only)
    pub requested: usize,

    /// Wall-clock time spent talking to the Grid Master
    pub elapsed: Duration,
}

impl RetrieveOperation {
    /// Validate command-line arguments into an operation
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - The seed address is not IPv4
    /// - The network is not in CIDR notation
    /// - The thread or session count is zero
    /// - The output format is unknown
    pub fn new(args: &Args) -> Result<Self> {
        let strategy = match &args.strategy {
            Strategy::ByAddress { ip4addr } => {
                validate_ipv4(ip4addr)?;
                args.strategy.clone()
            }
            Strategy::ByObject {
                network,
                threads,
                sessions,
            } => {
                validate_network(network)?;
                Strategy::ByObject {
                    network: network.clone(),
                    threads: validate_threads(*threads)?,
                    sessions: clamp_sessions(*sessions)?,
                }
            }
        };

        if args.view.trim().is_empty() {
            return Err(LeaseError::configuration("Network view cannot be empty").into());
        }

        Ok(Self {
            strategy,
            view: args.view.clone(),
            active_only: args.active_only,
            format: args.output_format.parse()?,
            progress: !args.debug,
        })
    }

    /// Number of HTTP sessions the client should open
    #[must_use]
    pub const fn sessions(&self) -> usize {
        match self.strategy {
            Strategy::ByAddress { .. } => 1,
            Strategy::ByObject { sessions, .. } => sessions,
        }
    }

    /// Output format requested on the command line
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Whether only active leases are kept
    #[must_use]
    pub const fn active_only(&self) -> bool {
        self.active_only
    }

    /// Run the selected strategy
    ///
    /// # Errors
    ///
    /// Returns the strategy's error if the network cannot be resolved or listed
    pub fn execute(&self, client: &WapiClient) -> Result<RetrieveOutcome> {
        let started = Instant::now();

        let (leases, failures, requested) = match &self.strategy {
            Strategy::ByAddress { ip4addr } => {
                let leases = fetch_by_address(client, ip4addr, &self.view)?;
                let count = leases.len();
                (leases, Vec::new(), count)
            }
            Strategy::ByObject {
                network, threads, ..
            } => {
                let pool = WorkerPool::new(*threads)?.with_progress(self.progress);
                let report = fetch_by_object(client, network, &self.view, &pool)?;
                (report.leases, report.failures, report.requested)
            }
        };

        let leases = if self.active_only {
            info!("Processing leases for network");
            filter_active(leases)
        } else {
            leases
        };

        Ok(RetrieveOutcome {
            leases,
            failures,
            requested,
            elapsed: started.elapsed(),
        })
    }
}

impl RetrieveOutcome {
    /// Lease list followed by the count and run time
    ///
    /// # Errors
    ///
    /// Returns an output error if the leases cannot be serialized
    pub fn render(&self, format: OutputFormat, active_only: bool) -> Result<String> {
        let body = render(&self.leases, format)?;
        let summary = summary(self.leases.len(), active_only, self.elapsed);
        Ok(format!("{}\n{summary}", body.trim_end()))
    }

    /// Fail if any per-object request failed
    ///
    /// # Errors
    ///
    /// Returns a response error listing how many requests failed
    pub fn ensure_complete(&self) -> Result<()> {
        if self.failures.is_empty() {
            return Ok(());
        }

        for failure in &self.failures {
            warn!("  {} -> {}", failure.reference, failure.error);
        }

        Err(LeaseError::response(format!(
            "{} of {} lease requests failed",
            self.failures.len(),
            self.requested
        ))
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;

    fn operation(extra: &[&str]) -> RetrieveOperation {
        let mut argv = vec!["nios-leases"];
        argv.extend_from_slice(extra);
        argv.extend_from_slice(&["by-object", "-n", "10.0.0.0/24"]);
        RetrieveOperation::new(&Args::try_parse_from(argv).unwrap()).unwrap()
    }

    #[test]
    fn progress_bar_shown_by_default() {
        assert!(operation(&[]).progress);
    }

    #[test]
    fn debug_hides_progress_bar() {
        assert!(!operation(&["--debug"]).progress);
    }
}
