use std::env;
use std::fmt;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DEDUP_WINDOW_MS: u64 = 2000;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cors: CorsPolicy,
    pub dedup_window: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?,
            None => DEFAULT_PORT,
        };

        let cors = CorsPolicy::parse(lookup("CORS_ORIGINS").as_deref())?;

        let dedup_window_ms = match lookup("DEDUP_WINDOW_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("DEDUP_WINDOW_MS".to_string(), e.to_string())
            })?,
            None => DEFAULT_DEDUP_WINDOW_MS,
        };

        let config = Config {
            port,
            cors,
            dedup_window: Duration::from_millis(dedup_window_ms),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "PORT".to_string(),
                "must be a non-zero port number".to_string(),
            ));
        }

        if self.dedup_window.is_zero() {
            return Err(ConfigError::InvalidEnvVar(
                "DEDUP_WINDOW_MS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Cross-origin policy for the HTTP layer.
///
/// An unset or empty `CORS_ORIGINS` yields `DenyAll`: browsers on other
/// origins get no `Access-Control-Allow-Origin` header. Permissive mode has
/// to be asked for with an explicit `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    DenyAll,
    AllowAny,
    AllowList(Vec<HeaderValue>),
}

impl CorsPolicy {
    pub fn parse(raw: Option<&str>) -> Result<Self, ConfigError> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(CorsPolicy::DenyAll),
            Some(raw) => raw,
        };

        if raw == "*" {
            return Ok(CorsPolicy::AllowAny);
        }

        let mut origins = Vec::new();
        for origin in raw.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            if origin == "*" {
                return Err(ConfigError::InvalidEnvVar(
                    "CORS_ORIGINS".to_string(),
                    "'*' cannot be combined with explicit origins".to_string(),
                ));
            }
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(ConfigError::InvalidEnvVar(
                    "CORS_ORIGINS".to_string(),
                    format!("origin '{}' must start with http:// or https://", origin),
                ));
            }
            if origin.ends_with('/') {
                return Err(ConfigError::InvalidEnvVar(
                    "CORS_ORIGINS".to_string(),
                    format!("origin '{}' must not have a trailing slash", origin),
                ));
            }
            let value = HeaderValue::from_str(origin).map_err(|e| {
                ConfigError::InvalidEnvVar("CORS_ORIGINS".to_string(), e.to_string())
            })?;
            origins.push(value);
        }

        if origins.is_empty() {
            return Ok(CorsPolicy::DenyAll);
        }
        Ok(CorsPolicy::AllowList(origins))
    }

    pub fn layer(&self) -> CorsLayer {
        match self {
            CorsPolicy::DenyAll => CorsLayer::new(),
            CorsPolicy::AllowAny => CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
            CorsPolicy::AllowList(origins) => CorsLayer::new()
                .allow_origin(origins.clone())
                .allow_methods(Any)
                .allow_headers(Any),
        }
    }
}

impl fmt::Display for CorsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorsPolicy::DenyAll => write!(f, "deny all cross-origin requests"),
            CorsPolicy::AllowAny => write!(f, "allow any origin"),
            CorsPolicy::AllowList(origins) => {
                let list: Vec<&str> = origins.iter().filter_map(|o| o.to_str().ok()).collect();
                write!(f, "allow {}", list.join(", "))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.cors, CorsPolicy::DenyAll);
        assert_eq!(config.dedup_window, Duration::from_secs(2));
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9090"),
            ("CORS_ORIGINS", "http://localhost:5173, https://loa.example.com"),
            ("DEDUP_WINDOW_MS", "1500"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.dedup_window, Duration::from_millis(1500));
        assert_eq!(
            config.cors,
            CorsPolicy::AllowList(vec![
                HeaderValue::from_static("http://localhost:5173"),
                HeaderValue::from_static("https://loa.example.com"),
            ])
        );
    }

    #[test]
    fn test_invalid_port() {
        assert!(Config::from_lookup(lookup_from(&[("PORT", "not-a-port")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("PORT", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("PORT", "70000")])).is_err());
    }

    #[test]
    fn test_zero_dedup_window_rejected() {
        let err = Config::from_lookup(lookup_from(&[("DEDUP_WINDOW_MS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "DEDUP_WINDOW_MS"));
    }

    #[test]
    fn test_cors_policy_parse() {
        assert_eq!(CorsPolicy::parse(None).unwrap(), CorsPolicy::DenyAll);
        assert_eq!(CorsPolicy::parse(Some("")).unwrap(), CorsPolicy::DenyAll);
        assert_eq!(CorsPolicy::parse(Some("  ")).unwrap(), CorsPolicy::DenyAll);
        assert_eq!(CorsPolicy::parse(Some(" , ")).unwrap(), CorsPolicy::DenyAll);
        assert_eq!(CorsPolicy::parse(Some("*")).unwrap(), CorsPolicy::AllowAny);
    }

    #[test]
    fn test_cors_policy_rejects_malformed_origins() {
        assert!(CorsPolicy::parse(Some("localhost:5173")).is_err());
        assert!(CorsPolicy::parse(Some("http://localhost:5173/")).is_err());
        assert!(CorsPolicy::parse(Some("*, http://localhost:5173")).is_err());
    }

    #[test]
    fn test_cors_policy_display() {
        let policy = CorsPolicy::parse(Some("http://a.test,http://b.test")).unwrap();
        assert_eq!(policy.to_string(), "allow http://a.test, http://b.test");
        assert_eq!(CorsPolicy::DenyAll.to_string(), "deny all cross-origin requests");
    }
}
