//! WAPI client over a pool of HTTP sessions

use super::{HttpSession, ReqwestSession};
use crate::config::GridConfig;
use crate::config::validation::clamp_sessions;
use crate::error::LeaseError;
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Fields requested when resolving the network of a single address
pub const NETWORK_FIELDS: &str = "ip_address,network,network_view,status,types";

/// Fields requested when listing all leases of a network
pub const NETWORK_LEASE_FIELDS: &str =
    "address,network,network_view,binding_state,hardware,cltt,ends,served_by,client_hostname";

/// Fields requested when reading one lease object by reference
pub const LEASE_OBJECT_FIELDS: &str =
    "address,binding_state,hardware,cltt,ends,served_by,client_hostname";

/// Client for one Grid Master, holding one or more HTTP sessions
pub struct WapiClient {
    base_url: String,
    sessions: Vec<Box<dyn HttpSession>>,
}

impl WapiClient {
    /// Create a client from already established sessions
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `sessions` is empty
    pub fn new<S: Into<String>>(base_url: S, sessions: Vec<Box<dyn HttpSession>>) -> Result<Self> {
        if sessions.is_empty() {
            return Err(LeaseError::configuration("At least one HTTP session is required").into());
        }

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            sessions,
        })
    }

    /// Open `sessions` real sessions against the configured Grid Master
    ///
    /// The count is capped at the recommended maximum.
    ///
    /// # Errors
    ///
    /// Returns an error if the count is zero or an HTTP client cannot be built
    pub fn connect(config: &GridConfig, sessions: usize) -> Result<Self> {
        let count = clamp_sessions(sessions)?;
        debug!("Creating {} HTTP session(s) for {}", count, config.gm);

        let sessions = (0..count)
            .map(|_| ReqwestSession::new(config).map(|s| Box::new(s) as Box<dyn HttpSession>))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(config.base_url(), sessions)
    }

    /// Number of sessions available to callers
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Base URL every request is built from
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` on session `session` (taken modulo the pool size) and parse the body as JSON
    ///
    /// # Errors
    ///
    /// Returns:
    /// - a connection error if no response was received
    /// - a response error if the status is not 200/201 or the body is not JSON
    pub fn call(&self, session: usize, url: &str) -> Result<Value, LeaseError> {
        let index = session % self.sessions.len();
        let response = self.sessions[index].get(url)?;

        if !response.is_ok() {
            debug!("HTTP response: {}", response.status);
            debug!("Body: {}", response.body);
            return Err(LeaseError::response(format!(
                "HTTP {} from {}",
                response.status, url
            )));
        }

        serde_json::from_str(&response.body).map_err(|e| {
            LeaseError::response(format!("Invalid JSON in response from {url}: {e}"))
        })
    }

    /// Like `call`, deserializing into `T`
    ///
    /// # Errors
    ///
    /// Same as `call`, plus a response error if the JSON does not match `T`
    pub fn get<T: DeserializeOwned>(&self, session: usize, url: &str) -> Result<T, LeaseError> {
        let value = self.call(session, url)?;
        serde_json::from_value(value).map_err(|e| {
            LeaseError::response(format!("Unexpected response shape from {url}: {e}"))
        })
    }

    /// URL resolving the network that contains `ip_address`
    #[must_use]
    pub fn address_url(&self, ip_address: &str, view: &str) -> String {
        format!(
            "{}/ipv4address?ip_address={ip_address}&network_view={view}&_return_fields={NETWORK_FIELDS}&_max_results=1",
            self.base_url
        )
    }

    /// URL listing every lease of `network`
    #[must_use]
    pub fn network_leases_url(&self, network: &str) -> String {
        format!(
            "{}/lease?network={network}&_return_fields={NETWORK_LEASE_FIELDS}",
            self.base_url
        )
    }

    /// URL listing every address record of `network`
    #[must_use]
    pub fn network_addresses_url(&self, network: &str, view: &str) -> String {
        format!(
            "{}/ipv4address?network={network}&network_view={view}",
            self.base_url
        )
    }

    /// URL reading a single lease object by its reference
    #[must_use]
    pub fn lease_object_url(&self, reference: &str) -> String {
        format!(
            "{}/{reference}?_return_fields={LEASE_OBJECT_FIELDS}",
            self.base_url
        )
    }
}
