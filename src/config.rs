use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::util::{is_local_endpoint_url, parse_bool_flag};

/// The engine always listens on loopback port 8080.
pub const ENGINE_URL: &str = "http://localhost:8080";

const DEFAULT_LOG_PATH: &str = "/tmp/dcon.log";
const DEFAULT_LOG_FILTER: &str = "info";

pub const LOG_PATH_ENV: &str = "DCON_LOG_PATH";
pub const LOG_FILTER_ENV: &str = "DCON_LOG";
pub const DEBUG_PAYLOAD_ENV: &str = "DCON_DEBUG_PAYLOAD";

#[derive(Debug, Clone)]
pub struct Config {
    pub engine_url: String,
    pub log_path: PathBuf,
    pub log_filter: String,
    pub debug_payload: bool,
}

impl Config {
    /// Only the logging knobs come from the environment; the engine address
    /// is fixed.
    pub fn load() -> Result<Self> {
        let log_path = std::env::var(LOG_PATH_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string());
        let log_filter = std::env::var(LOG_FILTER_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let debug_payload = std::env::var(DEBUG_PAYLOAD_ENV)
            .ok()
            .and_then(parse_bool_flag)
            .unwrap_or(false);

        Ok(Self {
            engine_url: ENGINE_URL.to_string(),
            log_path: PathBuf::from(log_path),
            log_filter,
            debug_payload,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !self.engine_url.starts_with("http://") && !self.engine_url.starts_with("https://") {
            bail!(
                "Invalid engine URL '{}': expected http:// or https:// URL",
                self.engine_url
            );
        }

        if !is_local_endpoint_url(&self.engine_url) {
            bail!(
                "Engine URL '{}' must point at a loopback host",
                self.engine_url
            );
        }

        if self.log_path.as_os_str().is_empty() {
            bail!("{LOG_PATH_ENV} must not be empty");
        }

        Ok(())
    }

    /// Joins `path` onto the engine base address.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.engine_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_fixed_engine_url_and_env_logging_knobs() {
        let _env_lock = crate::test_support::ENV_LOCK.blocking_lock();
        std::env::set_var(LOG_PATH_ENV, " /tmp/dcon-test.log ");
        std::env::set_var(LOG_FILTER_ENV, "debug");
        std::env::set_var(DEBUG_PAYLOAD_ENV, "yes");

        let config = Config::load().expect("config");
        assert_eq!(config.engine_url, ENGINE_URL);
        assert_eq!(config.log_path, PathBuf::from("/tmp/dcon-test.log"));
        assert_eq!(config.log_filter, "debug");
        assert!(config.debug_payload);

        std::env::remove_var(LOG_PATH_ENV);
        std::env::remove_var(LOG_FILTER_ENV);
        std::env::remove_var(DEBUG_PAYLOAD_ENV);

        let defaults = Config::load().expect("config");
        assert_eq!(defaults.log_path, PathBuf::from(DEFAULT_LOG_PATH));
        assert_eq!(defaults.log_filter, DEFAULT_LOG_FILTER);
        assert!(!defaults.debug_payload);
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let _env_lock = crate::test_support::ENV_LOCK.blocking_lock();
        let mut config = Config::load().expect("config");
        assert_eq!(config.endpoint("/execute"), "http://localhost:8080/execute");
        config.engine_url = "http://127.0.0.1:9000/".to_string();
        assert_eq!(config.endpoint("discos"), "http://127.0.0.1:9000/discos");
    }
}
