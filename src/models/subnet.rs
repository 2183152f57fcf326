//! Subnet blocks produced by the partitioner.

use super::ipv4::Cidr;
use serde::Serialize;
use std::net::Ipv4Addr;

/// Inclusive address range allocated to one partition.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetBlock {
    /// First address of the block (network address).
    pub min: Ipv4Addr,
    /// Last address of the block (broadcast address, or the last address of a /31 or /32).
    pub max: Ipv4Addr,
    /// Prefix length the block was allocated with.
    pub prefix: u8,
    /// Host count asked for, when the block answers a sized request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested: Option<u64>,
}

impl SubnetBlock {
    pub fn cidr(&self) -> Cidr {
        Cidr {
            addr: self.min,
            len: self.prefix,
        }
    }

    /// Number of addresses in the block.
    pub fn size(&self) -> u64 {
        u64::from(u32::from(self.max)) - u64::from(u32::from(self.min)) + 1
    }
}

impl std::fmt::Display for SubnetBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

/// Ordered blocks of one partitioning run, in allocation order.
///
/// Only the partitioner appends; callers get read access.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct SubnetList {
    blocks: Vec<SubnetBlock>,
}

impl SubnetList {
    pub(crate) fn with_capacity(n: usize) -> SubnetList {
        SubnetList {
            blocks: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, block: SubnetBlock) {
        self.blocks.push(block);
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SubnetBlock> {
        self.blocks.iter()
    }

    pub fn as_slice(&self) -> &[SubnetBlock] {
        &self.blocks
    }

    pub fn last(&self) -> Option<&SubnetBlock> {
        self.blocks.last()
    }

    /// Total addresses allocated across all blocks.
    pub fn allocated(&self) -> u64 {
        self.blocks.iter().map(SubnetBlock::size).sum()
    }
}

impl<'a> IntoIterator for &'a SubnetList {
    type Item = &'a SubnetBlock;
    type IntoIter = std::slice::Iter<'a, SubnetBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
