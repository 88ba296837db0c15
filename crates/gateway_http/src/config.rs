//! Application configuration
//!
//! Layered the usual way: built-in defaults, an optional `config.toml`,
//! `PTZGW`-prefixed environment variables, and finally the flat legacy
//! keys older deployments export (`API_USERNAME`, `API_PASSWORD`,
//! `REOLINK_EMAIL`, `REOLINK_PASSWORD`, `REOLINK_API_BASE`).

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use subtle::ConstantTimeEq;

use reolink_cloud::ReolinkConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Frontend credential configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Reolink Cloud configuration
    #[serde(default)]
    pub reolink: ReolinkConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins (empty = allow any origin, development mode)
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
        }
    }
}

/// The single fixed frontend credential pair and session settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Expected username
    #[serde(default)]
    pub username: String,

    /// Expected password
    #[serde(default = "empty_secret")]
    pub password: SecretString,

    /// Hours a frontend bearer session stays valid
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

const fn default_session_ttl_hours() -> i64 {
    24
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: empty_secret(),
            session_ttl_hours: default_session_ttl_hours(),
        }
    }
}

impl AuthConfig {
    /// Check a submitted credential pair against the configured pair
    ///
    /// Both inputs must be non-empty; the comparison itself is
    /// constant-time. Never errors, only reports match or no-match.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        if username.is_empty() || password.is_empty() || self.username.is_empty() {
            return false;
        }

        let user_ok = username.as_bytes().ct_eq(self.username.as_bytes());
        let pass_ok = password
            .as_bytes()
            .ct_eq(self.password.expose_secret().as_bytes());

        bool::from(user_ok & pass_ok)
    }
}

impl AppConfig {
    /// Load configuration from defaults, `config.toml`, and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source fails to parse or deserialize.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., PTZGW_SERVER_PORT)
            .add_source(
                config::Environment::with_prefix("PTZGW")
                    .separator("_")
                    .try_parsing(true),
            );

        let mut app_config: Self = builder.build()?.try_deserialize()?;
        app_config.apply_legacy_env();
        Ok(app_config)
    }

    /// Apply the flat legacy environment keys
    fn apply_legacy_env(&mut self) {
        if let Ok(username) = std::env::var("API_USERNAME") {
            self.auth.username = username;
        }
        if let Ok(password) = std::env::var("API_PASSWORD") {
            self.auth.password = SecretString::from(password);
        }
        if let Ok(email) = std::env::var("REOLINK_EMAIL") {
            self.reolink.email = email;
        }
        if let Ok(password) = std::env::var("REOLINK_PASSWORD") {
            self.reolink.password = SecretString::from(password);
        }
        if let Ok(base_url) = std::env::var("REOLINK_API_BASE") {
            self.reolink.base_url = base_url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(username: &str, password: &str) -> AuthConfig {
        AuthConfig {
            username: username.to_string(),
            password: SecretString::from(password.to_string()),
            session_ttl_hours: 24,
        }
    }

    #[test]
    fn verify_accepts_configured_pair() {
        assert!(auth("admin", "ocean").verify("admin", "ocean"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        assert!(!auth("admin", "ocean").verify("admin", "wrong"));
    }

    #[test]
    fn verify_rejects_wrong_username() {
        assert!(!auth("admin", "ocean").verify("root", "ocean"));
    }

    #[test]
    fn verify_rejects_empty_inputs() {
        let config = auth("admin", "ocean");
        assert!(!config.verify("", "ocean"));
        assert!(!config.verify("admin", ""));
        assert!(!config.verify("", ""));
    }

    #[test]
    fn verify_rejects_when_unconfigured() {
        // An unset username must never match, even an empty submission
        let config = auth("", "");
        assert!(!config.verify("admin", "ocean"));
    }

    #[test]
    fn verify_rejects_length_mismatch() {
        let config = auth("admin", "ocean");
        assert!(!config.verify("admin", "oceans"));
        assert!(!config.verify("adm", "ocean"));
    }

    #[test]
    fn server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn auth_config_default_ttl() {
        assert_eq!(AuthConfig::default().session_ttl_hours, 24);
    }

    #[test]
    fn app_config_deserializes_from_toml() {
        let raw = r#"
            [server]
            port = 8080

            [auth]
            username = "admin"
            password = "ocean"

            [reolink]
            email = "device@example.com"
            password = "pw"
        "#;
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .expect("should build")
            .try_deserialize()
            .expect("should deserialize");

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.username, "admin");
        assert!(config.auth.verify("admin", "ocean"));
        assert_eq!(config.reolink.email, "device@example.com");
    }

    #[test]
    fn debug_output_redacts_passwords() {
        let config = AppConfig {
            auth: auth("admin", "top-secret"),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("top-secret"));
    }
}
