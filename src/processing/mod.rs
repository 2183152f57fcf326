//! Subnet partitioning logic.
//!
//! - [`vlsm`] - equal and variable-size splitting of a base network
//! - [`gap_finder`] - space left unallocated after a split

mod gap_finder;
mod vlsm;

// Re-export public functions
pub use gap_finder::free_blocks;
pub use vlsm::{
    ceil_log2, partition, split_equal, split_sized, PartitionRequest, MAX_EQUAL_BLOCKS,
};
