//! Client fan-out: one WAPI call per lease object, spread over a worker pool

use crate::error::LeaseError;
use crate::leases::pool::WorkerPool;
use crate::leases::types::{Ipv4AddressRecord, Lease};
use crate::wapi::WapiClient;
use anyhow::{Context as _, Result};
use tracing::{debug, info, warn};

/// A per-object request that did not produce a lease
#[derive(Debug)]
pub struct LeaseFailure {
    pub reference: String,
    pub error: LeaseError,
}

/// Outcome of a fan-out retrieval
#[derive(Debug, Default)]
pub struct FanoutReport {
    /// Leases retrieved, in the order the grid listed their addresses
    pub leases: Vec<Lease>,

    /// Requests that failed
    pub failures: Vec<LeaseFailure>,

    /// Number of lease objects requested
    pub requested: usize,
}

impl FanoutReport {
    /// Whether every requested lease was retrieved
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Lease object references of the DHCP-used addresses in `records`
#[must_use]
pub fn lease_references(records: &[Ipv4AddressRecord]) -> Vec<String> {
    info!("Processing network");
    let references: Vec<String> = records
        .iter()
        .filter_map(|record| {
            let reference = record.lease_reference()?;
            debug!(
                "Lease object found for: {}",
                record.ip_address.as_deref().unwrap_or("?")
            );
            Some(reference.to_owned())
        })
        .collect();
    debug!("Lease Objects: {:?}", references);
    references
}

/// Retrieve every lease of `network` with one request per lease object
///
/// Reference `i` is fetched on session `i mod sessions`. Individual failures
/// do not abort the run; they are collected in the report.
///
/// # Errors
///
/// Returns:
/// - the underlying connection or response error if the address listing fails
pub fn fetch_by_object(
    client: &WapiClient,
    network: &str,
    view: &str,
    pool: &WorkerPool,
) -> Result<FanoutReport> {
    info!("Retrieving network: {}", network);
    let records: Vec<Ipv4AddressRecord> = client
        .get(0, &client.network_addresses_url(network, view))
        .with_context(|| format!("Failed to retrieve network {network}"))?;
    info!("Network retrieved successfully");

    let references = lease_references(&records);
    info!(
        "Retrieving {} leases using {} threads and {} session(s)",
        references.len(),
        pool.threads(),
        client.session_count()
    );

    let results = pool.map(&references, |index, reference| {
        let url = client.lease_object_url(reference);
        debug!("Lease URL: {}", url);
        client.get::<Lease>(index, &url)
    });

    let mut report = FanoutReport {
        requested: references.len(),
        ..FanoutReport::default()
    };

    for (reference, result) in references.into_iter().zip(results) {
        match result {
            Ok(lease) => report.leases.push(lease),
            Err(error) => {
                warn!("Failed to retrieve {}: {}", reference, error);
                report.failures.push(LeaseFailure { reference, error });
            }
        }
    }

    Ok(report)
}
