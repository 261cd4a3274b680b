use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use url::Url;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8501/api/search";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub external_url: Option<String>,
    pub api_rate_limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub max_image_size: usize,
    pub max_request_body_size: usize,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(name: &str, default: &str) -> Result<T> {
    env_or(name, default)
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {name} value")))
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Settings {
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: parse_env("PORT", "3000")?,
                external_url: std::env::var("EXTERNAL_URL").ok(),
                api_rate_limit: parse_env("API_RATE_LIMIT", "10")?,
            },
            backend: BackendConfig {
                url: env_or("STREAMLIT_BACKEND_URL", DEFAULT_BACKEND_URL),
                timeout_seconds: parse_env("BACKEND_TIMEOUT", "60")?,
                user_agent: format!("MunchMatch/{}", env!("CARGO_PKG_VERSION")),
            },
            upload: UploadConfig {
                max_image_size: parse_env("MAX_IMAGE_SIZE", "10485760")?,
                max_request_body_size: parse_env("MAX_REQUEST_BODY_SIZE", "12582912")?,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.server.api_rate_limit == 0 {
            return Err(Error::Config("API rate limit must be non-zero".to_string()));
        }

        let backend_url = Url::parse(&self.backend.url)
            .map_err(|e| Error::Config(format!("Invalid STREAMLIT_BACKEND_URL: {e}")))?;
        if !matches!(backend_url.scheme(), "http" | "https") {
            return Err(Error::Config(
                "Backend URL must use http or https scheme".to_string(),
            ));
        }

        if self.backend.timeout_seconds == 0 {
            return Err(Error::Config("Backend timeout must be non-zero".to_string()));
        }

        if self.upload.max_image_size > self.upload.max_request_body_size {
            return Err(Error::Config(
                "MAX_IMAGE_SIZE cannot exceed MAX_REQUEST_BODY_SIZE".to_string(),
            ));
        }

        Ok(())
    }

    /// Base URL a client should use to reach this server.
    /// A wildcard bind address is reached through loopback.
    pub fn server_url(&self) -> String {
        if let Some(url) = &self.server.external_url {
            return url.clone();
        }

        let host = match self.server.host.parse::<IpAddr>() {
            Ok(ip) if ip.is_unspecified() => "127.0.0.1",
            _ => self.server.host.as_str(),
        };
        format!("http://{}:{}", host, self.server.port)
    }
}
