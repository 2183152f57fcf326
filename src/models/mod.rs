//! Domain models for the IP calculator.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Cidr`] - IPv4 address with prefix length, plus derivation functions
//! - [`NetworkInfo`] - fully derived data for one network
//! - [`SubnetBlock`] and [`SubnetList`] - partitioning results
//! - [`IpcError`] - error taxonomy

mod error;
mod ipv4;
mod network;
mod subnet;

// Re-export public types
pub use error::IpcError;
pub use ipv4::{
    block_size_of, broadcast_address_of, cut_addr, get_cidr_mask, host_count_of, host_range_of,
    last_addr, lo_mask, netmask_of, network_address_of, octets_to_u32, u32_to_octets,
    wildcard_of, Cidr, MAX_LENGTH,
};
pub use network::{NetworkInfo, NetworkKind};
pub use subnet::{SubnetBlock, SubnetList};
