//! Server-side filtering: two WAPI calls per network

use crate::error::LeaseError;
use crate::leases::types::{Ipv4AddressRecord, Lease};
use crate::wapi::WapiClient;
use anyhow::{Context as _, Result};
use tracing::{debug, info};

/// Retrieve every lease of the network containing `ip_address`
///
/// The first call resolves the network of the seed address, the second lets
/// the Grid Master return all leases of that network.
///
/// # Errors
///
/// Returns:
/// - a not-found error if the grid knows no network for the address
/// - the underlying connection or response error if either call fails
pub fn fetch_by_address(client: &WapiClient, ip_address: &str, view: &str) -> Result<Vec<Lease>> {
    info!("Retrieving network for IP: {}", ip_address);
    let records: Vec<Ipv4AddressRecord> = client
        .get(0, &client.address_url(ip_address, view))
        .with_context(|| format!("Failed to retrieve network for IP {ip_address}"))?;
    debug!("Response: {:?}", records);

    let network = records
        .into_iter()
        .next()
        .and_then(|record| record.network)
        .filter(|network| !network.is_empty())
        .ok_or_else(|| {
            LeaseError::not_found(format!(
                "No network found for IP {ip_address} in network view '{view}'"
            ))
        })?;
    info!("Network retrieved successfully");
    debug!("Network: {}", network);

    info!("Retrieving leases");
    let leases: Vec<Lease> = client
        .get(0, &client.network_leases_url(&network))
        .with_context(|| format!("Failed to retrieve leases for network {network}"))?;

    Ok(leases)
}
