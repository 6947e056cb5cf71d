//! `reqwest`-backed HTTP session

use super::{HttpSession, RawResponse};
use crate::config::GridConfig;
use crate::error::LeaseError;
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::{debug, warn};

/// Connection timeout in milliseconds
pub const CONNECT_TIMEOUT_MS: u64 = 5_000;

/// Whole-request timeout in milliseconds
pub const READ_TIMEOUT_MS: u64 = 60_000;

/// Production session against a Grid Master
///
/// The cookie store keeps the `ibapauth` cookie so that only the first
/// request on a session carries the cost of authentication.
pub struct ReqwestSession {
    client: Client,
    user: String,
    password: String,
}

impl ReqwestSession {
    /// Create a session from the Grid Master credentials
    ///
    /// # Errors
    ///
    /// Returns a connection error if the HTTP client cannot be built
    pub fn new(config: &GridConfig) -> Result<Self, LeaseError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let verify = config.verify_certificate();
        if !verify {
            warn!("Certificate validation disabled for {}", config.gm);
        }

        let client = Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(!verify)
            .cookie_store(true)
            .connect_timeout(Duration::from_millis(CONNECT_TIMEOUT_MS))
            .timeout(Duration::from_millis(READ_TIMEOUT_MS))
            .build()
            .map_err(|e| LeaseError::connection(format!("Failed to create HTTP session: {e}")))?;

        Ok(Self {
            client,
            user: config.user.clone(),
            password: config.password.clone(),
        })
    }
}

impl HttpSession for ReqwestSession {
    fn get(&self, url: &str) -> Result<RawResponse, LeaseError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .basic_auth(&self.user, Some(&self.password))
            .send()
            .map_err(|e| LeaseError::connection(format!("Request to {url} failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| {
            LeaseError::connection(format!("Failed to read response from {url}: {e}"))
        })?;

        Ok(RawResponse { status, body })
    }
}
