//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for lease retrieval
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LeaseError {
    /// Configuration Error - missing or invalid credentials file or arguments
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Connection Error - the Grid Master could not be reached
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// Response Error - the Grid Master answered with an unexpected status or body
    #[error("Response error: {message}")]
    Response { message: String },

    /// Not Found Error - the requested network or address is unknown to the grid
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Output Error - leases could not be rendered
    #[error("Output error: {message}")]
    Output { message: String },
}

impl LeaseError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Configuration { .. } => 1,
            Self::Connection { .. } => 2,
            Self::Response { .. } => 3,
            Self::NotFound { .. } => 4,
            Self::Output { .. } => 5,
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a connection error
    #[inline]
    pub fn connection<S: Into<String>>(message: S) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a response error
    #[inline]
    pub fn response<S: Into<String>>(message: S) -> Self {
        Self::Response {
            message: message.into(),
        }
    }

    /// Create a not-found error
    #[inline]
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an output error
    #[inline]
    pub fn output<S: Into<String>>(message: S) -> Self {
        Self::Output {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let errors = [
            LeaseError::configuration("a"),
            LeaseError::connection("b"),
            LeaseError::response("c"),
            LeaseError::not_found("d"),
            LeaseError::output("e"),
        ];
        let codes: Vec<i32> = errors.iter().map(LeaseError::exit_code).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn display_includes_category() {
        let err = LeaseError::not_found("network 10.0.0.0/24");
        assert_eq!(err.to_string(), "Not found: network 10.0.0.0/24");
    }
}
