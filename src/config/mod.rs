//! Configuration management module
//!
//! Handles the INI credentials file and validation of the values read from it

pub mod credentials;
pub mod validation;

use crate::system::System;
use std::fmt;

/// Default credentials file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "gm.ini";

/// Directory under the user configuration directory searched as a fallback
pub const CONFIG_DIR_NAME: &str = "nios-leases";

/// Section of the INI file holding the Grid Master credentials
pub const NIOS_SECTION: &str = "NIOS";

/// Grid Master connection settings
#[derive(Clone, Default, PartialEq, Eq)]
pub struct GridConfig {
    /// Grid Master hostname or address
    pub gm: String,

    /// WAPI version, e.g. `v2.11`
    pub api_version: String,

    /// Raw `valid_cert` value; only `true` enables certificate validation
    pub valid_cert: String,

    /// WAPI username
    pub user: String,

    /// WAPI password
    pub password: String,
}

impl GridConfig {
    /// Load configuration from an INI file
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be found, read or
    /// parsed, or if it has no `[NIOS]` section
    pub fn load_from_file(system: &dyn System, path: &str) -> anyhow::Result<Self> {
        credentials::load_config(system, path)
    }

    /// Validate the loaded values
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a required value is empty
    pub fn validate(&self) -> anyhow::Result<()> {
        validation::validate_config(self)
    }

    /// Whether TLS certificates presented by the Grid Master are verified
    #[must_use]
    pub fn verify_certificate(&self) -> bool {
        self.valid_cert == "true"
    }

    /// Base URL of the WAPI endpoint
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("https://{}/wapi/{}", self.gm, self.api_version)
    }
}

impl fmt::Debug for GridConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridConfig")
            .field("gm", &self.gm)
            .field("api_version", &self.api_version)
            .field("valid_cert", &self.valid_cert)
            .field("user", &self.user)
            .field("password", &"********")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GridConfig {
        GridConfig {
            gm: "192.168.1.10".to_owned(),
            api_version: "v2.11".to_owned(),
            valid_cert: "false".to_owned(),
            user: "admin".to_owned(),
            password: "infoblox".to_owned(),
        }
    }

    #[test]
    fn base_url_joins_host_and_version() {
        assert_eq!(sample().base_url(), "https://192.168.1.10/wapi/v2.11");
    }

    #[test]
    fn only_literal_true_verifies_certificates() {
        let mut config = sample();
        assert!(!config.verify_certificate());

        config.valid_cert = "true".to_owned();
        assert!(config.verify_certificate());

        config.valid_cert = "yes".to_owned();
        assert!(!config.verify_certificate());
    }

    #[test]
    fn debug_hides_password() {
        let rendered = format!("{:?}", sample());
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("infoblox"));
    }
}
