//! Configuration module
//!
//! Server settings and the upstream (quiz backend) settings used by the upload proxy.
//! Values come from the environment (and an optional `.env` file) with typed defaults.

use std::env;

use crate::constants::{DEFAULT_UPSTREAM_UPLOAD_URL, MAX_UPLOAD_SIZE_BYTES};

// Common constants
const SERVER_PORT: u16 = 3000;
const UPSTREAM_TIMEOUT_SECS: u64 = 300;
const MAX_UPLOAD_SIZE_MB: u64 = 25;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub http_concurrency_limit: usize,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
        }
    }
}

/// Upstream backend settings for the upload proxy
#[derive(Clone, Debug)]
pub struct ProxyConfig {
    pub upstream_upload_url: String,
    pub upstream_timeout_secs: u64,
    /// Client-side ceiling; the proxy itself never enforces it.
    pub max_upload_size_bytes: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            upstream_upload_url: DEFAULT_UPSTREAM_UPLOAD_URL.to_string(),
            upstream_timeout_secs: UPSTREAM_TIMEOUT_SECS,
            max_upload_size_bytes: MAX_UPLOAD_SIZE_BYTES,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FrontendConfig {
    pub base: BaseConfig,
    pub proxy: ProxyConfig,
}

/// Application configuration.
#[derive(Clone, Debug, Default)]
pub struct Config(pub Box<FrontendConfig>);

impl Config {
    pub fn new(config: FrontendConfig) -> Self {
        Config(Box::new(config))
    }

    fn inner(&self) -> &FrontendConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = FrontendConfig::from_vars(|key| env::var(key).ok())?;
        Ok(Config::new(config))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.inner().base.environment)
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.inner().base.http_concurrency_limit
    }

    pub fn upstream_upload_url(&self) -> &str {
        &self.inner().proxy.upstream_upload_url
    }

    pub fn upstream_timeout_secs(&self) -> u64 {
        self.inner().proxy.upstream_timeout_secs
    }

    pub fn max_upload_size_bytes(&self) -> u64 {
        self.inner().proxy.max_upload_size_bytes
    }
}

fn is_production_name(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

impl FrontendConfig {
    /// Build the configuration from a variable lookup (the process environment in `from_env`).
    pub fn from_vars<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("PORT must be a valid port number: {}", e))?,
            None => SERVER_PORT,
        };

        let http_concurrency_limit = lookup("HTTP_CONCURRENCY_LIMIT")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(HTTP_CONCURRENCY_LIMIT)
            .max(1);

        let upstream_upload_url = lookup("UPSTREAM_UPLOAD_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_UPSTREAM_UPLOAD_URL.to_string());

        let upstream_timeout_secs = lookup("UPSTREAM_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(UPSTREAM_TIMEOUT_SECS);

        let max_upload_size_mb = lookup("MAX_UPLOAD_SIZE_MB")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let config = FrontendConfig {
            base: BaseConfig {
                server_port,
                cors_origins,
                environment,
                http_concurrency_limit,
            },
            proxy: ProxyConfig {
                upstream_upload_url,
                upstream_timeout_secs,
                max_upload_size_bytes: max_upload_size_mb.saturating_mul(1024 * 1024),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let url = &self.proxy.upstream_upload_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "UPSTREAM_UPLOAD_URL must be an http:// or https:// URL (got '{}')",
                url
            ));
        }

        if self.proxy.upstream_timeout_secs == 0 {
            return Err(anyhow::anyhow!("UPSTREAM_TIMEOUT_SECS cannot be 0"));
        }

        if self.proxy.max_upload_size_bytes == 0
            || self.proxy.max_upload_size_bytes > MAX_UPLOAD_SIZE_BYTES
        {
            return Err(anyhow::anyhow!(
                "MAX_UPLOAD_SIZE_MB must be between 1 and {}",
                MAX_UPLOAD_SIZE_BYTES / 1024 / 1024
            ));
        }

        if is_production_name(&self.base.environment)
            && self.base.cors_origins.iter().any(|o| o == "*")
        {
            return Err(anyhow::anyhow!(
                "CORS configured to allow all origins (*) in production"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> Result<FrontendConfig, anyhow::Error> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FrontendConfig::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_point_at_backend_service() {
        let config = from_map(&[]).expect("defaults are valid");
        assert_eq!(config.base.server_port, 3000);
        assert_eq!(config.proxy.upstream_upload_url, "http://backend:8080/upload");
        assert_eq!(config.proxy.max_upload_size_bytes, 26_214_400);
        assert_eq!(config.base.cors_origins, vec!["*".to_string()]);
    }

    #[test]
    fn upstream_url_is_configurable() {
        let config = from_map(&[("UPSTREAM_UPLOAD_URL", "http://quiz:9000/upload")])
            .expect("valid config");
        assert_eq!(config.proxy.upstream_upload_url, "http://quiz:9000/upload");
    }

    #[test]
    fn rejects_non_http_upstream() {
        let err = from_map(&[("UPSTREAM_UPLOAD_URL", "ftp://backend/upload")]).unwrap_err();
        assert!(err.to_string().contains("UPSTREAM_UPLOAD_URL"));
    }

    #[test]
    fn rejects_wildcard_cors_in_production() {
        assert!(from_map(&[("ENVIRONMENT", "production")]).is_err());
        let config = from_map(&[
            ("ENVIRONMENT", "prod"),
            ("CORS_ORIGINS", "https://study.example.com, https://www.study.example.com"),
        ])
        .expect("explicit origins are fine");
        assert_eq!(config.base.cors_origins.len(), 2);
        assert!(Config::new(config).is_production());
    }

    #[test]
    fn rejects_upload_ceiling_above_25_mib() {
        assert!(from_map(&[("MAX_UPLOAD_SIZE_MB", "26")]).is_err());
        assert!(from_map(&[("MAX_UPLOAD_SIZE_MB", "0")]).is_err());
        let config = from_map(&[("MAX_UPLOAD_SIZE_MB", "10")]).expect("valid");
        assert_eq!(config.proxy.max_upload_size_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn invalid_port_is_an_error() {
        assert!(from_map(&[("PORT", "not-a-port")]).is_err());
    }
}
