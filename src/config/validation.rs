//! Configuration and argument validation logic

use crate::config::GridConfig;
use crate::error::LeaseError;
use anyhow::{Result, anyhow};
use regex::Regex;
use std::net::Ipv4Addr;
use tracing::warn;

/// Recommended maximum number of concurrent HTTP sessions against one Grid Master
pub const MAX_SESSIONS: usize = 10;

/// Validate a loaded credentials configuration
///
/// # Errors
///
/// Returns an error if:
/// - The Grid Master address is empty
/// - The API version is empty
/// - The username is empty
#[inline]
pub fn validate_config(config: &GridConfig) -> Result<()> {
    let required = [
        ("gm", &config.gm),
        ("api_version", &config.api_version),
        ("user", &config.user),
    ];

    for (key, value) in required {
        if value.trim().is_empty() {
            return Err(LeaseError::configuration(format!(
                "Required key '{key}' is missing or empty in the NIOS section"
            ))
            .into());
        }
    }

    if !is_wapi_version(&config.api_version)? {
        warn!(
            "API version '{}' does not look like a WAPI version (expected e.g. v2.11)",
            config.api_version
        );
    }

    Ok(())
}

/// Whether a version string has the `v<major>[.<minor>...]` shape
///
/// # Errors
///
/// Returns an error if the pattern fails to compile
#[inline]
pub fn is_wapi_version(version: &str) -> Result<bool> {
    let regex = Regex::new(r"^v\d+(\.\d+)*$")?;
    Ok(regex.is_match(version))
}

/// Validate a seed IPv4 address
///
/// # Errors
///
/// Returns an error if the value is not a dotted-quad IPv4 address
#[inline]
pub fn validate_ipv4(address: &str) -> Result<Ipv4Addr> {
    address.parse::<Ipv4Addr>().map_err(|_| {
        anyhow!(LeaseError::configuration(format!(
            "Invalid IPv4 address: '{address}'"
        )))
    })
}

/// Validate a network in CIDR notation
///
/// # Errors
///
/// Returns an error if:
/// - The value has no `/prefix` part
/// - The address part is not an IPv4 address
/// - The prefix length is not between 0 and 32
#[inline]
pub fn validate_network(network: &str) -> Result<(Ipv4Addr, u8)> {
    let invalid = |reason: &str| {
        anyhow!(LeaseError::configuration(format!(
            "Invalid network '{network}': {reason}. Expected CIDR notation such as 10.0.0.0/24"
        )))
    };

    let (address, prefix) = network
        .split_once('/')
        .ok_or_else(|| invalid("missing prefix length"))?;

    let address = address
        .parse::<Ipv4Addr>()
        .map_err(|_| invalid("address is not IPv4"))?;

    let prefix = prefix
        .parse::<u8>()
        .ok()
        .filter(|len| *len <= 32)
        .ok_or_else(|| invalid("prefix length must be between 0 and 32"))?;

    Ok((address, prefix))
}

/// Clamp a requested session count to the supported range
///
/// Zero is rejected; anything above `MAX_SESSIONS` is reduced with a warning.
///
/// # Errors
///
/// Returns an error if `requested` is zero
#[inline]
pub fn clamp_sessions(requested: usize) -> Result<usize> {
    if requested == 0 {
        return Err(LeaseError::configuration("At least one HTTP session is required").into());
    }

    if requested > MAX_SESSIONS {
        warn!(
            "Requested {} sessions, reducing to the recommended maximum of {}",
            requested, MAX_SESSIONS
        );
        return Ok(MAX_SESSIONS);
    }

    Ok(requested)
}

/// Validate a worker thread count
///
/// # Errors
///
/// Returns an error if `threads` is zero
#[inline]
pub fn validate_threads(threads: usize) -> Result<usize> {
    if threads == 0 {
        return Err(LeaseError::configuration("At least one worker thread is required").into());
    }
    Ok(threads)
}
