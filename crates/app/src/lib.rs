// Library exports for the rpin binary and integration tests

// Typed HTTP requests shared by the remote clients
pub mod api;

// Local IPFS node (Kubo RPC)
pub mod ipfs_node;

// Remote pinning services (IPFS Pinning Service API)
pub mod pinning_service;

// On-disk config and the service registry store behind it
pub mod state;

pub use ipfs_node::NodeClient;
pub use pinning_service::{HttpConnector, PinningServiceClient};
pub use state::{AppConfig, AppState, FsRepo, StateError};
