//! Fully derived network data for a single CIDR.
//!
//! Derivation is an ordered pipeline: netmask and wildcard from the prefix,
//! network from address and netmask, broadcast from network and wildcard,
//! then host range and host count. The result is an immutable
//! [`NetworkInfo`]; a field that cannot exist for the prefix is `None`.

use super::ipv4::{
    broadcast_address_of, host_count_of, host_range_of, netmask_of, network_address_of,
    wildcard_of, Cidr, MAX_LENGTH,
};
use super::IpcError;
use serde::Serialize;
use std::net::Ipv4Addr;

/// Which addressing rules apply to a prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkKind {
    /// Network and broadcast addresses are reserved.
    Standard,
    /// /31: both addresses are hosts, no broadcast.
    PointToPoint,
    /// /32: a single address.
    HostRoute,
}

impl NetworkKind {
    pub fn of(len: u8) -> NetworkKind {
        match len {
            MAX_LENGTH => NetworkKind::HostRoute,
            31 => NetworkKind::PointToPoint,
            _ => NetworkKind::Standard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    pub cidr: Cidr,
    pub kind: NetworkKind,
    pub netmask: Ipv4Addr,
    pub wildcard: Ipv4Addr,
    pub network: Ipv4Addr,
    pub broadcast: Option<Ipv4Addr>,
    pub host_min: Option<Ipv4Addr>,
    pub host_max: Option<Ipv4Addr>,
    pub host_count: u64,
}

impl NetworkInfo {
    /// Run the whole derivation for `cidr`.
    pub fn analyze(cidr: Cidr) -> Result<NetworkInfo, IpcError> {
        let len = cidr.len;
        let netmask = netmask_of(len)?;
        let wildcard = wildcard_of(len)?;
        let network = network_address_of(cidr.addr, netmask);
        let broadcast = broadcast_address_of(network, wildcard, len);
        let host_range = host_range_of(network, broadcast, len);
        let host_count = host_count_of(len)?;

        log::debug!(
            "analyze({cidr}) network={network} broadcast={broadcast:?} hosts={host_count}"
        );

        Ok(NetworkInfo {
            cidr,
            kind: NetworkKind::of(len),
            netmask,
            wildcard,
            network,
            broadcast,
            host_min: host_range.map(|(lo, _)| lo),
            host_max: host_range.map(|(_, hi)| hi),
            host_count,
        })
    }

    pub fn prefix_len(&self) -> u8 {
        self.cidr.len
    }
}
