//! Partitioning of a base network into subnets.
//!
//! Two request modes share one invariant: blocks are disjoint, start at the
//! base network address, are ordered by increasing address and each block
//! is a power of two large enough for its request.

use crate::models::{
    block_size_of, last_addr, Cidr, IpcError, SubnetBlock, SubnetList, MAX_LENGTH,
};
use std::net::Ipv4Addr;

/// Most blocks a single equal split will build.
pub const MAX_EQUAL_BLOCKS: u32 = 1 << 20;

/// What to carve out of the base network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionRequest {
    /// `count` blocks of the same size.
    Equal(u32),
    /// One block per entry, each with at least that many addresses.
    Sized(Vec<u64>),
}

impl PartitionRequest {
    pub fn len(&self) -> usize {
        match self {
            PartitionRequest::Equal(count) => *count as usize,
            PartitionRequest::Sized(sizes) => sizes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Smallest `k` with `2^k >= n`; 0 for 0 and 1.
pub fn ceil_log2(n: u64) -> u32 {
    if n <= 1 {
        0
    } else {
        u64::BITS - (n - 1).leading_zeros()
    }
}

/// Position in the address space of the base network.
///
/// Addresses are held as u64 so that stepping past 255.255.255.255 is
/// visible instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    next: u64,
    end: u64,
    available: u64,
}

impl Cursor {
    fn new(base: Cidr) -> Cursor {
        let start = u64::from(u32::from(base.lo()));
        Cursor {
            next: start,
            end: start + base.size(),
            available: base.size(),
        }
    }

    /// Derive the block at the cursor and the cursor after it.
    fn allocate(self, len: u8, requested: Option<u64>) -> Result<(SubnetBlock, Cursor), IpcError> {
        let size = block_size_of(len)?;
        if self.next + size > self.end {
            return Err(IpcError::CapacityExceeded {
                required: self.used() + size,
                available: self.available,
            });
        }
        // next < end <= 2^32 here
        let min = Ipv4Addr::from(self.next as u32);
        let block = SubnetBlock {
            min,
            max: last_addr(min, len)?,
            prefix: len,
            requested,
        };
        let cursor = Cursor {
            next: self.next + size,
            ..self
        };
        Ok((block, cursor))
    }

    fn used(&self) -> u64 {
        self.available - (self.end - self.next)
    }
}

fn check_base(base: Cidr) -> Result<(), IpcError> {
    if base.len > MAX_LENGTH {
        return Err(IpcError::malformed(format!("prefix /{} is out of [0,32]", base.len)));
    }
    if !base.is_aligned() {
        return Err(IpcError::malformed(format!(
            "{base} is not a network address, expected {}/{}",
            base.lo(),
            base.len
        )));
    }
    Ok(())
}

/// Partition `base` according to `request`.
///
/// On error nothing is returned; blocks built so far are dropped.
pub fn partition(base: Cidr, request: &PartitionRequest) -> Result<SubnetList, IpcError> {
    match request {
        PartitionRequest::Equal(count) => split_equal(base, *count),
        PartitionRequest::Sized(sizes) => split_sized(base, sizes),
    }
}

/// Split `base` into `count` equal blocks of `base.len + ceil_log2(count)`.
pub fn split_equal(base: Cidr, count: u32) -> Result<SubnetList, IpcError> {
    log::info!("#Start split_equal({base}, count={count})");
    check_base(base)?;
    if count == 0 {
        return Err(IpcError::EmptyRequest);
    }

    let extra_bits = ceil_log2(u64::from(count));
    let new_len = u32::from(base.len) + extra_bits;
    if new_len >= u32::from(MAX_LENGTH) {
        return Err(IpcError::prefix(format!(
            "{count} blocks of {base} need /{new_len}, no host bits left"
        )));
    }
    if count > MAX_EQUAL_BLOCKS {
        return Err(IpcError::TooManyBlocks {
            requested: u64::from(count),
            limit: u64::from(MAX_EQUAL_BLOCKS),
        });
    }
    let new_len = new_len as u8;
    log::debug!("split_equal: extra_bits={extra_bits} new_len=/{new_len}");

    let mut cursor = Cursor::new(base);
    let mut blocks = SubnetList::with_capacity(count as usize);
    for _ in 0..count {
        let (block, next) = cursor.allocate(new_len, None)?;
        log::trace!("split_equal: block {block}");
        blocks.push(block);
        cursor = next;
    }
    Ok(blocks)
}

/// Allocate one block per requested size, largest first.
pub fn split_sized(base: Cidr, sizes: &[u64]) -> Result<SubnetList, IpcError> {
    log::info!("#Start split_sized({base}, sizes={sizes:?})");
    check_base(base)?;
    if sizes.is_empty() {
        return Err(IpcError::EmptyRequest);
    }

    // stable: equal sizes keep their input order
    let mut sorted = sizes.to_vec();
    sorted.sort_by(|a, b| b.cmp(a));

    let available = base.size();
    let required: u128 = sorted.iter().map(|&s| 1u128 << ceil_log2(s)).sum();
    if required > u128::from(available) {
        log::warn!("split_sized: {required} addresses required, {available} available");
        return Err(IpcError::CapacityExceeded {
            required: u64::try_from(required).unwrap_or(u64::MAX),
            available,
        });
    }

    let mut cursor = Cursor::new(base);
    let mut blocks = SubnetList::with_capacity(sorted.len());
    for &size in &sorted {
        let len = prefix_for(size)?;
        let (block, next) = cursor.allocate(len, Some(size))?;
        log::trace!("split_sized: {size} -> {}", block.cidr());
        blocks.push(block);
        cursor = next;
    }
    Ok(blocks)
}

/// Prefix length of the smallest block with at least `size` addresses.
///
/// Only a /0 block is rejected here: once demand fits the base network,
/// no single block can be larger than it.
fn prefix_for(size: u64) -> Result<u8, IpcError> {
    let len = i64::from(MAX_LENGTH) - i64::from(ceil_log2(size));
    if len <= 0 {
        return Err(IpcError::prefix(format!("size {size} needs prefix /{len}")));
    }
    Ok(len as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cidr(s: &str) -> Cidr {
        Cidr::new(s).unwrap()
    }

    fn ranges(list: &SubnetList) -> Vec<String> {
        list.iter().map(|b| b.to_string()).collect()
    }

    #[test]
    fn test_ceil_log2() {
        assert_eq!(ceil_log2(0), 0);
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(4), 2);
        assert_eq!(ceil_log2(5), 3);
        assert_eq!(ceil_log2(100), 7);
        assert_eq!(ceil_log2(128), 7);
        assert_eq!(ceil_log2(129), 8);
        assert_eq!(ceil_log2(1u64 << 32), 32);
        assert_eq!(ceil_log2(u64::MAX), 64);
    }

    #[test]
    fn test_split_equal_four() {
        let list = split_equal(cidr("192.168.1.0/24"), 4).unwrap();
        assert_eq!(
            ranges(&list),
            vec![
                "192.168.1.0 - 192.168.1.63",
                "192.168.1.64 - 192.168.1.127",
                "192.168.1.128 - 192.168.1.191",
                "192.168.1.192 - 192.168.1.255",
            ]
        );
        assert!(list.iter().all(|b| b.prefix == 26));
    }

    #[test]
    fn test_split_equal_not_power_of_two() {
        let list = split_equal(cidr("10.0.0.0/24"), 3).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.last().unwrap().to_string(), "10.0.0.128 - 10.0.0.191");
    }

    #[test]
    fn test_split_equal_one_is_base() {
        let list = split_equal(cidr("10.0.0.0/24"), 1).unwrap();
        assert_eq!(ranges(&list), vec!["10.0.0.0 - 10.0.0.255"]);
    }

    #[test]
    fn test_split_equal_down_to_point_to_point() {
        let list = split_equal(cidr("10.0.0.0/30"), 2).unwrap();
        assert_eq!(ranges(&list), vec!["10.0.0.0 - 10.0.0.1", "10.0.0.2 - 10.0.0.3"]);
        assert!(matches!(
            split_equal(cidr("10.0.0.0/30"), 3),
            Err(IpcError::PrefixOutOfRange(_))
        ));
        assert!(matches!(
            split_equal(cidr("10.0.0.1/32"), 1),
            Err(IpcError::PrefixOutOfRange(_))
        ));
    }

    #[test]
    fn test_split_equal_whole_space() {
        let list = split_equal(cidr("0.0.0.0/0"), 2).unwrap();
        assert_eq!(
            ranges(&list),
            vec!["0.0.0.0 - 127.255.255.255", "128.0.0.0 - 255.255.255.255"]
        );
    }

    #[test]
    fn test_split_equal_too_many_blocks() {
        assert_eq!(
            split_equal(cidr("0.0.0.0/0"), 1u32 << 31),
            Err(IpcError::TooManyBlocks {
                requested: 1u64 << 31,
                limit: u64::from(MAX_EQUAL_BLOCKS),
            })
        );
        assert!(matches!(
            split_equal(cidr("0.0.0.0/0"), MAX_EQUAL_BLOCKS + 1),
            Err(IpcError::TooManyBlocks { .. })
        ));
        let list = split_equal(cidr("10.0.0.0/8"), 1 << 16).unwrap();
        assert_eq!(list.len(), 1 << 16);
        assert_eq!(list.last().unwrap().to_string(), "10.255.255.0 - 10.255.255.255");
    }

    #[test]
    fn test_split_equal_errors() {
        assert_eq!(split_equal(cidr("10.0.0.0/24"), 0), Err(IpcError::EmptyRequest));
        assert!(matches!(
            split_equal(cidr("10.0.0.5/24"), 2),
            Err(IpcError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_split_sized() {
        let list = split_sized(cidr("10.0.0.0/24"), &[10, 100, 50]).unwrap();
        assert_eq!(
            ranges(&list),
            vec![
                "10.0.0.0 - 10.0.0.127",
                "10.0.0.128 - 10.0.0.191",
                "10.0.0.192 - 10.0.0.207",
            ]
        );
        let first = list.as_slice()[0];
        assert_eq!(first.cidr().to_string(), "10.0.0.0/25");
        assert_eq!(first.requested, Some(100));
        let sizes: Vec<u64> = list.iter().map(|b| b.size()).collect();
        assert_eq!(sizes, vec![128, 64, 16]);
    }

    #[test]
    fn test_split_sized_exact_fill() {
        let sizes = [256, 128, 64, 32, 16, 8, 4, 2, 1, 1];
        let list = split_sized(cidr("192.168.0.0/23"), &sizes).unwrap();
        assert_eq!(list.allocated(), 512);
        assert_eq!(
            list.last().unwrap().to_string(),
            "192.168.1.255 - 192.168.1.255"
        );
        assert_eq!(list.last().unwrap().prefix, 32);
    }

    #[test]
    fn test_split_sized_blocks_are_aligned_and_contiguous() {
        let base = cidr("172.16.0.0/16");
        let list = split_sized(base, &[3, 1000, 17, 250, 9, 2, 4000]).unwrap();
        let mut expected_next = u32::from(base.lo());
        for b in &list {
            assert_eq!(u32::from(b.min), expected_next);
            assert!(b.cidr().is_aligned(), "{} not aligned", b.cidr());
            assert!(b.size() >= b.requested.unwrap());
            expected_next = u32::from(b.max) + 1;
        }
        let prefixes: Vec<u8> = list.iter().map(|b| b.prefix).collect();
        let mut sorted = prefixes.clone();
        sorted.sort();
        assert_eq!(prefixes, sorted);
    }

    #[test]
    fn test_split_sized_capacity_exceeded() {
        let err = split_sized(cidr("10.0.0.0/28"), &[100, 100, 100]).unwrap_err();
        assert_eq!(
            err,
            IpcError::CapacityExceeded {
                required: 384,
                available: 16
            }
        );
        assert!(matches!(
            split_sized(cidr("10.0.0.0/24"), &[128, 128, 1]),
            Err(IpcError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_split_sized_prefix_out_of_range() {
        // a single request for the whole IPv4 space needs /0
        assert!(matches!(
            split_sized(cidr("0.0.0.0/0"), &[1u64 << 32]),
            Err(IpcError::PrefixOutOfRange(_))
        ));
        assert!(matches!(
            split_sized(cidr("0.0.0.0/0"), &[u64::MAX]),
            Err(IpcError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_split_sized_single_request_larger_than_base() {
        // demand is checked as a whole before any single block
        assert_eq!(
            split_sized(cidr("10.0.0.0/24"), &[512]),
            Err(IpcError::CapacityExceeded {
                required: 512,
                available: 256
            })
        );
        assert_eq!(prefix_for(512), Ok(23));
        assert_eq!(prefix_for(1), Ok(32));
        assert!(matches!(prefix_for(1u64 << 32), Err(IpcError::PrefixOutOfRange(_))));
        assert!(matches!(prefix_for(u64::MAX), Err(IpcError::PrefixOutOfRange(_))));
    }

    #[test]
    fn test_split_sized_empty_and_unaligned() {
        assert_eq!(split_sized(cidr("10.0.0.0/24"), &[]), Err(IpcError::EmptyRequest));
        assert!(matches!(
            split_sized(cidr("10.0.0.128/24"), &[10]),
            Err(IpcError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_split_sized_top_of_address_space() {
        let list = split_sized(cidr("255.255.255.0/24"), &[128, 64, 64]).unwrap();
        assert_eq!(
            list.last().unwrap().to_string(),
            "255.255.255.192 - 255.255.255.255"
        );
    }

    #[test]
    fn test_cursor_stops_at_supernet_end() {
        let cursor = Cursor::new(cidr("10.0.0.0/30"));
        let (b, cursor) = cursor.allocate(31, None).unwrap();
        assert_eq!(b.to_string(), "10.0.0.0 - 10.0.0.1");
        let (_, cursor) = cursor.allocate(31, None).unwrap();
        assert_eq!(
            cursor.allocate(32, None),
            Err(IpcError::CapacityExceeded {
                required: 5,
                available: 4
            })
        );
    }

    #[test]
    fn test_partition_dispatch() {
        let base = cidr("192.168.1.0/24");
        let req = PartitionRequest::Equal(2);
        assert_eq!(req.len(), 2);
        assert_eq!(partition(base, &req).unwrap().len(), 2);
        let req = PartitionRequest::Sized(vec![]);
        assert!(req.is_empty());
        assert_eq!(partition(base, &req), Err(IpcError::EmptyRequest));
    }
}
