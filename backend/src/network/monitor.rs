//! # Reachability Monitor
//!
//! Tracks whether the remote API host is reachable. A background task probes
//! the host on a fixed interval and records the last observed status, which
//! callers read synchronously without waiting on the network.

use anyhow::{anyhow, Context, Result};
use reqwest::Url;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

/// Shortest interval between probes; shorter requests are raised to this
pub const MIN_PROBE_INTERVAL: Duration = Duration::from_millis(10);

/// Source of the current connectivity status
pub trait NetworkMonitor: Send + Sync {
    /// Last observed status; never blocks
    fn has_internet_connection(&self) -> bool;
}

/// Probes a TCP connection to the API host in the background
#[derive(Debug)]
pub struct ReachabilityMonitor {
    probe_addr: String,
    probe_timeout: Duration,
    connected: AtomicBool,
}

impl ReachabilityMonitor {
    /// Probe once, then keep probing `probe_addr` (`host:port`) every
    /// `interval` for the life of the process.
    pub async fn start(probe_addr: impl Into<String>, interval: Duration) -> Arc<Self> {
        let interval = interval.max(MIN_PROBE_INTERVAL);
        let monitor = Arc::new(Self {
            probe_addr: probe_addr.into(),
            probe_timeout: interval.min(Duration::from_secs(3)),
            connected: AtomicBool::new(false),
        });

        monitor.probe().await;
        info!(
            "Reachability monitor started for {} (connected: {})",
            monitor.probe_addr,
            monitor.has_internet_connection()
        );

        let background = Arc::clone(&monitor);
        tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; that probe already ran
            ticker.tick().await;
            loop {
                ticker.tick().await;
                background.probe().await;
            }
        });

        monitor
    }

    /// Start a monitor for the host serving `base_url`
    pub async fn for_base_url(base_url: &str, interval: Duration) -> Result<Arc<Self>> {
        let probe_addr = probe_addr_for(base_url)?;
        Ok(Self::start(probe_addr, interval).await)
    }

    async fn probe(&self) {
        let reachable = matches!(
            time::timeout(self.probe_timeout, TcpStream::connect(&self.probe_addr)).await,
            Ok(Ok(_))
        );

        let was_reachable = self.connected.swap(reachable, Ordering::Relaxed);
        if was_reachable != reachable {
            info!("Reachability of {} changed: {}", self.probe_addr, reachable);
        } else {
            debug!("Reachability of {}: {}", self.probe_addr, reachable);
        }
    }
}

impl NetworkMonitor for ReachabilityMonitor {
    fn has_internet_connection(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }
}

/// `host:port` to probe for an http(s) base URL
pub fn probe_addr_for(base_url: &str) -> Result<String> {
    let url = Url::parse(base_url).with_context(|| format!("Invalid API base URL '{}'", base_url))?;
    let host = url
        .host_str()
        .ok_or_else(|| anyhow!("API base URL '{}' has no host", base_url))?;
    let port = url
        .port_or_known_default()
        .ok_or_else(|| anyhow!("API base URL '{}' has no known port", base_url))?;
    Ok(format!("{}:{}", host, port))
}

/// Fixed connectivity status, switchable at runtime
#[derive(Debug, Default)]
pub struct StaticReachability {
    connected: AtomicBool,
}

impl StaticReachability {
    pub fn new(connected: bool) -> Self {
        Self {
            connected: AtomicBool::new(connected),
        }
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Relaxed);
    }
}

impl NetworkMonitor for StaticReachability {
    fn has_internet_connection(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[test]
    fn test_probe_addr_for() {
        assert_eq!(probe_addr_for("https://dummyjson.com").unwrap(), "dummyjson.com:443");
        assert_eq!(probe_addr_for("http://127.0.0.1:8080/api").unwrap(), "127.0.0.1:8080");
        assert!(probe_addr_for("not a url").is_err());
    }

    #[tokio::test]
    async fn test_reachable_host() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let monitor = ReachabilityMonitor::start(addr.to_string(), Duration::from_secs(60)).await;
        assert!(monitor.has_internet_connection());
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        // Bind and release to get a port nobody listens on
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };

        let monitor = ReachabilityMonitor::start(addr.to_string(), Duration::from_secs(60)).await;
        assert!(!monitor.has_internet_connection());
    }

    #[tokio::test]
    async fn test_status_follows_background_probe() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let monitor = ReachabilityMonitor::start(addr.to_string(), Duration::from_millis(50)).await;
        assert!(monitor.has_internet_connection());

        drop(listener);
        let mut observed_offline = false;
        for _ in 0..40 {
            time::sleep(Duration::from_millis(50)).await;
            if !monitor.has_internet_connection() {
                observed_offline = true;
                break;
            }
        }
        assert!(observed_offline);
    }

    #[tokio::test]
    async fn test_zero_interval_is_clamped() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let monitor = ReachabilityMonitor::start(addr.to_string(), Duration::ZERO).await;
        assert!(monitor.has_internet_connection());

        // Only a live background task can observe the listener going away
        drop(listener);
        let mut observed_offline = false;
        for _ in 0..100 {
            time::sleep(MIN_PROBE_INTERVAL * 2).await;
            if !monitor.has_internet_connection() {
                observed_offline = true;
                break;
            }
        }
        assert!(observed_offline);
    }

    #[test]
    fn test_static_reachability() {
        let monitor = StaticReachability::new(false);
        assert!(!monitor.has_internet_connection());

        monitor.set_connected(true);
        assert!(monitor.has_internet_connection());
    }
}
