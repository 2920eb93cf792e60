//! Auth service configuration.

use std::env;

/// Auth service configuration.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Blank the password hash in `Register` responses
    pub redact_password_hash: bool,
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("AUTH_SERVICE_HOST").unwrap_or(defaults.host),
            port: env::var("AUTH_SERVICE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            redact_password_hash: env::var("AUTH_SERVICE_REDACT_PASSWORD_HASH")
                .ok()
                .and_then(|v| v.to_ascii_lowercase().parse().ok())
                .unwrap_or(defaults.redact_password_hash),
        }
    }

    /// Override host and port (CLI flags win over the environment).
    pub fn with_address(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 50051,
            redact_password_hash: false,
        }
    }
}
