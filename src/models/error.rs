//! Error taxonomy shared by the parser, the address model and the partitioner.

/// Every failure an `ipc` run can report.
///
/// All operations are deterministic, so an error is final: there is no
/// retry and no partial result travels with it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IpcError {
    /// Address, prefix or size text failed syntactic or range validation.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// Rounded-up demand is larger than the base network.
    #[error("capacity exceeded: {required} addresses required, {available} available")]
    CapacityExceeded { required: u64, available: u64 },
    /// A computed prefix length fell outside (0, 32].
    #[error("prefix out of range: {0}")]
    PrefixOutOfRange(String),
    /// Zero partitions requested.
    #[error("empty request: at least one subnet must be requested")]
    EmptyRequest,
    /// More blocks than one run will materialize.
    #[error("too many blocks: {requested} requested, at most {limit} allowed")]
    TooManyBlocks { requested: u64, limit: u64 },
}

impl IpcError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        IpcError::MalformedInput(msg.into())
    }

    pub fn prefix(msg: impl Into<String>) -> Self {
        IpcError::PrefixOutOfRange(msg.into())
    }

    /// Process exit code reported by the `ipc` binary for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            IpcError::MalformedInput(_) => 3,
            IpcError::CapacityExceeded { .. } => 4,
            IpcError::PrefixOutOfRange(_) => 5,
            IpcError::EmptyRequest => 6,
            IpcError::TooManyBlocks { .. } => 7,
        }
    }
}
