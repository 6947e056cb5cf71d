//! Grid Master WAPI access
//!
//! Requests go through the `HttpSession` trait so that the lease strategies
//! can run against a real Grid Master or an in-memory one.

pub mod client;
pub mod mock;
pub mod real;

pub use client::WapiClient;
pub use mock::{MockGrid, MockSession, RecordedRequest};
pub use real::ReqwestSession;

use crate::error::LeaseError;

/// Status and body of a WAPI response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Whether the Grid Master accepted the request
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self.status, 200 | 201)
    }
}

/// One authenticated HTTP session with the Grid Master
///
/// # Implementations
/// - `ReqwestSession`: blocking `reqwest` client with basic auth and a cookie store
/// - `MockSession`: serves canned responses from a `MockGrid`
pub trait HttpSession: Send + Sync {
    /// Issue a GET request for `url`
    ///
    /// # Errors
    ///
    /// Returns a connection error if no response was received
    fn get(&self, url: &str) -> Result<RawResponse, LeaseError>;
}
