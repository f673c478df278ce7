//! Runtime configuration from `AUTOSERVICE_*` environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has an invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// How long a guarded request waits for a loading session to resolve.
    pub loading_wait: Duration,
    /// Seed demo records for the tenants of the dev sessions.
    pub seed_demo: bool,
    /// Overrides `RUST_LOG` when set.
    pub log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            loading_wait: Duration::from_millis(250),
            seed_demo: false,
            log_filter: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = match lookup("AUTOSERVICE_BIND_ADDR") {
            Some(v) => v.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: "AUTOSERVICE_BIND_ADDR",
                value: v.clone(),
                reason: e.to_string(),
            })?,
            None => {
                tracing::warn!(
                    default = %defaults.bind_addr,
                    "AUTOSERVICE_BIND_ADDR not set; using default"
                );
                defaults.bind_addr
            }
        };

        let loading_wait = match lookup("AUTOSERVICE_LOADING_WAIT_MS") {
            Some(v) => Duration::from_millis(v.trim().parse().map_err(
                |e: std::num::ParseIntError| ConfigError::Invalid {
                    var: "AUTOSERVICE_LOADING_WAIT_MS",
                    value: v.clone(),
                    reason: e.to_string(),
                },
            )?),
            None => defaults.loading_wait,
        };

        let seed_demo = match lookup("AUTOSERVICE_SEED_DEMO") {
            Some(v) => parse_bool("AUTOSERVICE_SEED_DEMO", &v)?,
            None => defaults.seed_demo,
        };

        let log_filter = lookup("AUTOSERVICE_LOG").filter(|v| !v.trim().is_empty());

        Ok(Self {
            bind_addr,
            loading_wait,
            seed_demo,
            log_filter,
        })
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: "expected true/false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("AUTOSERVICE_BIND_ADDR", "127.0.0.1:9000"),
            ("AUTOSERVICE_LOADING_WAIT_MS", "0"),
            ("AUTOSERVICE_SEED_DEMO", "Yes"),
            ("AUTOSERVICE_LOG", "debug"),
        ]))
        .unwrap();

        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.loading_wait, Duration::ZERO);
        assert!(cfg.seed_demo);
        assert_eq!(cfg.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn invalid_values_are_errors() {
        let err =
            AppConfig::from_lookup(lookup(&[("AUTOSERVICE_SEED_DEMO", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("AUTOSERVICE_SEED_DEMO"));

        assert!(AppConfig::from_lookup(lookup(&[("AUTOSERVICE_BIND_ADDR", "nowhere")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("AUTOSERVICE_LOADING_WAIT_MS", "-1")])).is_err());
    }
}
