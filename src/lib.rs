//! IPv4 calculator: single network analysis and subnet partitioning (VLSM).

pub mod config;
pub mod models;
pub mod output;
pub mod parser;
pub mod processing;

use config::{Config, Mode, OutputFormat};
use models::{Cidr, IpcError, NetworkInfo, SubnetList};
use output::PartitionReport;
use processing::PartitionRequest;

/// Analyse one "A.B.C.D/N" string.
pub fn analyze(cidr: &str) -> Result<NetworkInfo, IpcError> {
    NetworkInfo::analyze(Cidr::new(cidr)?)
}

/// Partition the network given as "A.B.C.D/N".
pub fn subnet(cidr: &str, request: &PartitionRequest) -> Result<SubnetList, IpcError> {
    processing::partition(Cidr::new(cidr)?, request)
}

/// Produce the complete stdout text for one run.
pub fn run(config: &Config) -> Result<String, IpcError> {
    log::info!("#Start run({}, {:?})", config.cidr, config.mode);
    match &config.mode {
        Mode::Analyze => {
            let info = NetworkInfo::analyze(config.cidr)?;
            match config.format {
                OutputFormat::Text => Ok(output::render_analysis(&info, config.color)),
                OutputFormat::Json => output::analysis_json(&info),
            }
        }
        Mode::Partition(request) => {
            let blocks = processing::partition(config.cidr, request)?;
            log::info!("# Got {} blocks, {} addresses", blocks.len(), blocks.allocated());
            let free = if config.show_free {
                Some(processing::free_blocks(config.cidr, &blocks)?)
            } else {
                None
            };
            match config.format {
                OutputFormat::Text => {
                    let mut out = output::render_blocks(&blocks);
                    if let Some(free) = &free {
                        out.push('\n');
                        out.push_str(&output::render_free(free, config.color));
                    }
                    Ok(out)
                }
                OutputFormat::Json => output::partition_json(&PartitionReport {
                    base: config.cidr,
                    blocks: &blocks,
                    free: free.as_deref(),
                }),
            }
        }
    }
}
