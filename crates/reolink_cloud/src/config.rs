//! Reolink Cloud configuration

use secrecy::SecretString;
use serde::Deserialize;

/// Configuration for the Reolink Cloud API
#[derive(Debug, Clone, Deserialize)]
pub struct ReolinkConfig {
    /// Base URL for the Reolink Cloud API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Device account email used to authenticate with the cloud
    #[serde(default)]
    pub email: String,

    /// Device account password
    #[serde(default = "default_password")]
    pub password: SecretString,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Hours a session token is considered valid before re-authenticating
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

fn default_base_url() -> String {
    "https://api.reolink.com/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

/// Vendor tokens nominally last 24 hours; renew an hour early.
const fn default_token_ttl_hours() -> i64 {
    23
}

fn default_password() -> SecretString {
    SecretString::from(String::new())
}

impl Default for ReolinkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            email: String::new(),
            password: default_password(),
            timeout_secs: default_timeout_secs(),
            token_ttl_hours: default_token_ttl_hours(),
        }
    }
}

impl ReolinkConfig {
    /// Create a configuration suitable for testing against a mock server
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            email: "device@example.com".to_string(),
            password: SecretString::from("device-password"),
            timeout_secs: 5,
            ..Self::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.email.is_empty() {
            return Err("email must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.token_ttl_hours <= 0 {
            return Err("token_ttl_hours must be greater than 0".to_string());
        }

        Ok(())
    }
}
