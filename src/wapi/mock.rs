//! In-memory Grid Master for testing

use super::{HttpSession, RawResponse};
use crate::error::LeaseError;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

/// A request received by a `MockGrid`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Index of the session that issued the request
    pub session: usize,
    pub url: String,
}

/// Canned WAPI responses keyed by exact URL
///
/// Unknown URLs answer `404` with a WAPI-style error body.
///
/// # Example
/// ```
/// use nios_leases::wapi::{HttpSession, MockGrid};
/// use serde_json::json;
///
/// let grid = MockGrid::new().with_json("https://gm/wapi/v2.11/lease", 200, &json!([]));
/// let session = grid.session(0);
///
/// assert_eq!(session.get("https://gm/wapi/v2.11/lease").unwrap().status, 200);
/// assert_eq!(session.get("https://gm/wapi/v2.11/other").unwrap().status, 404);
/// assert_eq!(grid.requests().len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct MockGrid {
    state: Arc<RwLock<MockGridState>>,
}

#[derive(Default)]
struct MockGridState {
    routes: HashMap<String, RawResponse>,
    unreachable: HashSet<String>,
    requests: Vec<RecordedRequest>,
}

impl MockGrid {
    /// Create an empty grid
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `status` and a raw body (builder pattern)
    #[must_use]
    pub fn with_response(self, url: &str, status: u16, body: &str) -> Self {
        self.write_state(|state| {
            state.routes.insert(
                url.to_owned(),
                RawResponse {
                    status,
                    body: body.to_owned(),
                },
            );
        });
        self
    }

    /// Answer `url` with `status` and a JSON body (builder pattern)
    #[must_use]
    pub fn with_json(self, url: &str, status: u16, body: &Value) -> Self {
        self.with_response(url, status, &body.to_string())
    }

    /// Fail requests for `url` as if the connection dropped (builder pattern)
    #[must_use]
    pub fn with_unreachable(self, url: &str) -> Self {
        self.write_state(|state| {
            state.unreachable.insert(url.to_owned());
        });
        self
    }

    /// A session bound to this grid
    #[must_use]
    pub fn session(&self, index: usize) -> MockSession {
        MockSession {
            grid: self.clone(),
            index,
        }
    }

    /// `count` boxed sessions, ready for `WapiClient::new`
    #[must_use]
    pub fn sessions(&self, count: usize) -> Vec<Box<dyn HttpSession>> {
        (0..count)
            .map(|index| Box::new(self.session(index)) as Box<dyn HttpSession>)
            .collect()
    }

    /// Every request received so far, in arrival order
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .requests
            .clone()
    }

    fn write_state(&self, update: impl FnOnce(&mut MockGridState)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut state);
    }
}

/// Session handle issued by `MockGrid::session`
#[derive(Clone)]
pub struct MockSession {
    grid: MockGrid,
    index: usize,
}

impl HttpSession for MockSession {
    fn get(&self, url: &str) -> Result<RawResponse, LeaseError> {
        let mut state = self
            .grid
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        state.requests.push(RecordedRequest {
            session: self.index,
            url: url.to_owned(),
        });

        if state.unreachable.contains(url) {
            return Err(LeaseError::connection(format!(
                "Request to {url} failed: connection refused"
            )));
        }

        Ok(state.routes.get(url).cloned().unwrap_or_else(|| RawResponse {
            status: 404,
            body: format!(r#"{{"Error": "AdmConDataNotFoundError: no such object: {url}"}}"#),
        }))
    }
}
