//! # Network Module
//!
//! Remote todo source: HTTP client, endpoint definitions, reachability
//! monitoring and the network error taxonomy.

pub mod api_client;
pub mod endpoint;
pub mod error;
pub mod monitor;

pub use api_client::{ApiClient, TodoSource};
pub use endpoint::TodoEndpoint;
pub use error::NetworkError;
pub use monitor::{NetworkMonitor, ReachabilityMonitor, StaticReachability};
