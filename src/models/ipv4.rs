//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Cidr`] for an address with a prefix length, along with the
//! pure derivation functions (netmask, wildcard, network, broadcast, host
//! range, host count) everything else is built on.

use super::IpcError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

fn check_len(len: u8) -> Result<(), IpcError> {
    if len > MAX_LENGTH {
        Err(IpcError::prefix(format!("/{len} is longer than /{MAX_LENGTH}")))
    } else {
        Ok(())
    }
}

/// Octets to the 32 bit big-endian value, `octets[0]` most significant.
pub fn octets_to_u32(octets: [u8; 4]) -> u32 {
    u32::from_be_bytes(octets)
}

/// 32 bit big-endian value back to octets.
pub fn u32_to_octets(bits: u32) -> [u8; 4] {
    bits.to_be_bytes()
}

/// Mask bits for a prefix length as u32.
///
/// # Examples
/// ```
/// use ip_subnet_calc::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, IpcError> {
    check_len(len)?;
    let right_len = MAX_LENGTH - len;
    let all_bits = u32::MAX as u64;

    // u64 so that a shift by 32 at /0 stays defined
    let mask = (all_bits >> right_len) << right_len;

    Ok(mask as u32)
}

/// Top `len` bits set, as an address.
pub fn netmask_of(len: u8) -> Result<Ipv4Addr, IpcError> {
    Ok(Ipv4Addr::from(get_cidr_mask(len)?))
}

/// Bitwise complement of [`netmask_of`].
pub fn wildcard_of(len: u8) -> Result<Ipv4Addr, IpcError> {
    Ok(Ipv4Addr::from(!get_cidr_mask(len)?))
}

/// Octet-wise AND of address and netmask.
pub fn network_address_of(addr: Ipv4Addr, netmask: Ipv4Addr) -> Ipv4Addr {
    let a = addr.octets();
    let m = netmask.octets();
    Ipv4Addr::new(a[0] & m[0], a[1] & m[1], a[2] & m[2], a[3] & m[3])
}

/// Broadcast address of a network, `None` for /31 and /32 which have none.
pub fn broadcast_address_of(network: Ipv4Addr, wildcard: Ipv4Addr, len: u8) -> Option<Ipv4Addr> {
    if len >= MAX_LENGTH - 1 {
        return None;
    }
    Some(Ipv4Addr::from(u32::from(network) | u32::from(wildcard)))
}

/// First and last usable host.
///
/// `None` for a /32 host route, `(network, network + 1)` for a /31 link,
/// `(network + 1, broadcast - 1)` otherwise.
pub fn host_range_of(
    network: Ipv4Addr,
    broadcast: Option<Ipv4Addr>,
    len: u8,
) -> Option<(Ipv4Addr, Ipv4Addr)> {
    let net_bits = u32::from(network);
    match (len, broadcast) {
        (MAX_LENGTH, _) => None,
        (31, _) => Some((network, Ipv4Addr::from(net_bits.wrapping_add(1)))),
        (_, Some(broadcast)) => Some((
            Ipv4Addr::from(net_bits.wrapping_add(1)),
            Ipv4Addr::from(u32::from(broadcast).wrapping_sub(1)),
        )),
        (_, None) => None,
    }
}

/// Number of usable hosts for a prefix length.
///
/// 0 for /32, 2 for /31, `2^(32 - len) - 2` otherwise.
pub fn host_count_of(len: u8) -> Result<u64, IpcError> {
    check_len(len)?;
    let host_bits = MAX_LENGTH - len;
    let total = 1u64 << host_bits;
    Ok(match host_bits {
        0 => 0,
        1 => 2,
        _ => total - 2,
    })
}

/// Number of addresses in a block of this prefix length.
pub fn block_size_of(len: u8) -> Result<u64, IpcError> {
    check_len(len)?;
    Ok(1u64 << (MAX_LENGTH - len))
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, IpcError> {
    Ok(network_address_of(addr, netmask_of(len)?))
}

/// Highest address inside the block, also for /31 and /32.
pub fn last_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, IpcError> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from((u32::from(addr) & mask) | !mask))
}

/// Calculate the minimum mask for an IP address based on trailing zeros.
pub fn lo_mask(ip: Ipv4Addr) -> u8 {
    let trailing_zeros = u32::from(ip).trailing_zeros() as u8;
    MAX_LENGTH - trailing_zeros
}

/// An address with its prefix length, e.g. `192.168.1.0/24`.
///
/// The address is kept as given; it is not normalized to the network address.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash, PartialEq, PartialOrd)]
pub struct Cidr {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub len: u8,
}

impl Serialize for Cidr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Cidr {
    fn deserialize<D>(deserializer: D) -> Result<Cidr, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Cidr::new(&s).map_err(de::Error::custom)
    }
}

impl FromStr for Cidr {
    type Err = IpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cidr::new(s)
    }
}

impl Cidr {
    /// Create a new [`Cidr`] from a string such as "10.0.0.0/24".
    pub fn new(addr_cidr: &str) -> Result<Cidr, IpcError> {
        crate::parser::parse_cidr(addr_cidr.trim())
    }

    /// Build from parts, rejecting a prefix longer than /32.
    pub fn from_parts(addr: Ipv4Addr, len: u8) -> Result<Cidr, IpcError> {
        if len > MAX_LENGTH {
            return Err(IpcError::malformed(format!("prefix /{len} is out of [0,32]")));
        }
        Ok(Cidr { addr, len })
    }

    /// Lowest (network) address in the block.
    pub fn lo(&self) -> Ipv4Addr {
        network_address_of(self.addr, Ipv4Addr::from(self.mask_bits()))
    }

    /// Highest address in the block.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.lo()) | !self.mask_bits())
    }

    /// True when the address carries no host bits.
    pub fn is_aligned(&self) -> bool {
        lo_mask(self.addr) <= self.len
    }

    /// Number of addresses covered, 2^(32 - len).
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.len)
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.lo() <= ip && ip <= self.hi()
    }

    fn mask_bits(&self) -> u32 {
        // len is validated at construction
        get_cidr_mask(self.len).unwrap_or(u32::MAX)
    }
}

impl std::fmt::Display for Cidr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.len)
    }
}
