use asistepro_api::{QrCodeEndpoint, VerificationLinks, DEFAULT_QR_ENDPOINT};
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DATABASE_URL_KEY: &str = "DATABASE_URL";
pub const PUBLIC_ORIGIN_KEY: &str = "ASISTEPRO_PUBLIC_ORIGIN";
pub const QR_ENDPOINT_KEY: &str = "ASISTEPRO_QR_ENDPOINT";
pub const DEBOUNCE_MS_KEY: &str = "ASISTEPRO_DEBOUNCE_MS";

pub const DEFAULT_PUBLIC_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Runtime settings, built once at startup and passed to whoever needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub public_origin: String,
    pub qr_endpoint: String,
    pub debounce: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            public_origin: DEFAULT_PUBLIC_ORIGIN.to_string(),
            qr_endpoint: DEFAULT_QR_ENDPOINT.to_string(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source; absent keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let public_origin = match lookup(PUBLIC_ORIGIN_KEY) {
            Some(origin) => {
                let origin = origin.trim().trim_end_matches('/').to_string();
                let parsed = Url::parse(&origin).map_err(|err| ConfigError::InvalidValue {
                    key: PUBLIC_ORIGIN_KEY,
                    message: format!("'{origin}' is not a valid URL: {err}"),
                })?;
                if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
                    return Err(ConfigError::InvalidValue {
                        key: PUBLIC_ORIGIN_KEY,
                        message: format!("'{origin}' is not an http(s) origin"),
                    });
                }
                origin
            }
            None => defaults.public_origin,
        };

        let debounce = match lookup(DEBOUNCE_MS_KEY) {
            Some(raw) => {
                let millis: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: DEBOUNCE_MS_KEY,
                    message: format!("'{raw}' is not a number of milliseconds"),
                })?;
                Duration::from_millis(millis)
            }
            None => defaults.debounce,
        };

        Ok(Self {
            database_url: lookup(DATABASE_URL_KEY).map(|url| url.trim().to_string()),
            public_origin,
            qr_endpoint: lookup(QR_ENDPOINT_KEY).unwrap_or(defaults.qr_endpoint),
            debounce,
        })
    }

    /// False while the store location is missing or still a template placeholder.
    pub fn is_configured(&self) -> bool {
        match self.database_url.as_deref() {
            None => false,
            Some(url) => !url.is_empty() && !url.contains("YOUR_"),
        }
    }

    pub fn links(&self) -> VerificationLinks {
        VerificationLinks::new(self.public_origin.clone())
    }

    pub fn qr(&self) -> QrCodeEndpoint {
        QrCodeEndpoint::new(self.qr_endpoint.clone())
    }
}
