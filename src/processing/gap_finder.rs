//! Unallocated space left in the base network after partitioning.

use crate::models::{lo_mask, Cidr, IpcError, SubnetList, MAX_LENGTH};
use std::net::Ipv4Addr;

/// Cover the space between the last block and the end of `base` with the
/// fewest aligned CIDR blocks.
pub fn free_blocks(base: Cidr, blocks: &SubnetList) -> Result<Vec<Cidr>, IpcError> {
    let end = u64::from(u32::from(base.hi())) + 1;
    let mut next_ip = match blocks.last() {
        Some(b) => u64::from(u32::from(b.max)) + 1,
        None => u64::from(u32::from(base.lo())),
    };
    if next_ip > end {
        return Err(IpcError::CapacityExceeded {
            required: blocks.allocated(),
            available: base.size(),
        });
    }

    let mut free = Vec::new();
    while next_ip < end {
        // next_ip < end <= 2^32
        let start_ip = Ipv4Addr::from(next_ip as u32);
        let next_mask = find_biggest_subnet(start_ip, base.len, end);
        let gap = Cidr {
            addr: start_ip,
            len: next_mask,
        };
        log::debug!("free_blocks: gap {gap}");
        next_ip += gap.size();
        free.push(gap);
    }
    Ok(free)
}

/// Find the biggest subnet starting at `start_ip` that ends before `end`.
///
/// The returned mask is constrained by:
/// 1. `start_mask`, it never returns a shorter prefix
/// 2. the alignment of `start_ip`, which must be a network address for the mask
/// 3. `end`, the first address past the usable range
fn find_biggest_subnet(start_ip: Ipv4Addr, start_mask: u8, end: u64) -> u8 {
    let mut next_mask = start_mask.max(lo_mask(start_ip));
    let start = u64::from(u32::from(start_ip));

    while next_mask < MAX_LENGTH && start + (1u64 << (MAX_LENGTH - next_mask)) > end {
        next_mask += 1;
    }
    next_mask
}
