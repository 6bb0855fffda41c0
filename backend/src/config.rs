//! Process configuration, read once from the environment at startup.

use anyhow::{anyhow, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://dummyjson.com";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_REACHABILITY_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Holds `todos.db` and `settings.yaml`
    pub data_dir: PathBuf,
    pub api_base_url: String,
    pub bind_addr: SocketAddr,
    pub reachability_interval: Duration,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match lookup("TODO_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => {
                let home = lookup("HOME").ok_or_else(|| anyhow!("Neither TODO_DATA_DIR nor HOME is set"))?;
                PathBuf::from(home).join("Documents").join("Todo")
            }
        };

        let api_base_url = lookup("TODO_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let bind_addr = lookup("TODO_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("Invalid TODO_BIND_ADDR")?;

        let reachability_interval = Duration::from_secs(parse_secs(
            lookup("TODO_REACHABILITY_INTERVAL_SECS"),
            DEFAULT_REACHABILITY_INTERVAL_SECS,
            "TODO_REACHABILITY_INTERVAL_SECS",
        )?);

        let http_timeout = Duration::from_secs(parse_secs(
            lookup("TODO_HTTP_TIMEOUT_SECS"),
            DEFAULT_HTTP_TIMEOUT_SECS,
            "TODO_HTTP_TIMEOUT_SECS",
        )?);

        Ok(Self {
            data_dir,
            api_base_url,
            bind_addr,
            reachability_interval,
            http_timeout,
        })
    }
}

fn parse_secs(value: Option<String>, default: u64, name: &str) -> Result<u64> {
    let Some(value) = value else {
        return Ok(default);
    };
    let secs = value
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Invalid {}: '{}'", name, value))?;
    if secs == 0 {
        return Err(anyhow!("{} must be greater than zero", name));
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("HOME", "/home/user")]).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/home/user/Documents/Todo"));
        assert_eq!(config.api_base_url, "https://dummyjson.com");
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.reachability_interval, Duration::from_secs(5));
        assert_eq!(config.http_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TODO_DATA_DIR", "/tmp/todos"),
            ("TODO_API_BASE_URL", "http://localhost:9000"),
            ("TODO_BIND_ADDR", "0.0.0.0:8000"),
            ("TODO_REACHABILITY_INTERVAL_SECS", "30"),
            ("TODO_HTTP_TIMEOUT_SECS", "2"),
        ])
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/todos"));
        assert_eq!(config.api_base_url, "http://localhost:9000");
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.reachability_interval, Duration::from_secs(30));
        assert_eq!(config.http_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_invalid_values() {
        assert!(config_from(&[]).is_err());
        assert!(config_from(&[("HOME", "/h"), ("TODO_BIND_ADDR", "nowhere")]).is_err());
        assert!(config_from(&[("HOME", "/h"), ("TODO_HTTP_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config_from(&[("HOME", "/h"), ("TODO_REACHABILITY_INTERVAL_SECS", "0")]).is_err());
    }
}
