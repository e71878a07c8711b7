//! Client for remote services speaking the IPFS Pinning Service API.

mod client;
pub mod pins;

pub use client::{HttpConnector, PinningServiceClient};
