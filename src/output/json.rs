//! JSON output for scripting.

use crate::models::{Cidr, IpcError, NetworkInfo, SubnetList};
use serde::Serialize;

/// Result of one partitioning run.
#[derive(Serialize, Debug)]
pub struct PartitionReport<'a> {
    pub base: Cidr,
    pub blocks: &'a SubnetList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free: Option<&'a [Cidr]>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, IpcError> {
    // serializing these types cannot fail in practice, map it anyway
    serde_json::to_string_pretty(value)
        .map_err(|e| IpcError::malformed(format!("Error serializing JSON: {e}")))
}

pub fn analysis_json(info: &NetworkInfo) -> Result<String, IpcError> {
    to_json(info)
}

pub fn partition_json(report: &PartitionReport) -> Result<String, IpcError> {
    to_json(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::split_sized;

    #[test]
    fn test_partition_json() {
        let base = Cidr::new("10.0.0.0/24").unwrap();
        let blocks = split_sized(base, &[100, 50]).unwrap();
        let report = PartitionReport {
            base,
            blocks: &blocks,
            free: None,
        };
        let value: serde_json::Value =
            serde_json::from_str(&partition_json(&report).unwrap()).unwrap();
        assert_eq!(value["base"], "10.0.0.0/24");
        assert_eq!(value["blocks"][0]["min"], "10.0.0.0");
        assert_eq!(value["blocks"][0]["max"], "10.0.0.127");
        assert_eq!(value["blocks"][1]["requested"], 50);
        assert!(value.get("free").is_none());
    }

    #[test]
    fn test_analysis_json() {
        let info = NetworkInfo::analyze(Cidr::new("10.1.2.3/31").unwrap()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&analysis_json(&info).unwrap()).unwrap();
        assert_eq!(value["host_count"], 2);
        assert_eq!(value["kind"], "point_to_point");
        assert_eq!(value["network"], "10.1.2.2");
    }
}
