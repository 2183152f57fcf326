//! Output formatting for analysis and partitioning results.
//!
//! - [`terminal`] - DEC/BIN/HEX analysis table
//! - [`list`] - one line per subnet block
//! - [`json`] - JSON for scripting

mod json;
mod list;
mod terminal;

pub use json::{analysis_json, partition_json, PartitionReport};
pub use list::{render_blocks, render_free};
pub use terminal::{format_field, render_analysis};
