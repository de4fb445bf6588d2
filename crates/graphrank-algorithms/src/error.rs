//! Error types shared by the snapshot, engine, pool and generator

use crate::common::NodeId;
use thiserror::Error;

/// Errors raised by graph algorithms
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgoError {
    /// Bad generator, damping or pool parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid iteration count {0}: at least one iteration is required")]
    InvalidIterationCount(usize),

    /// Host store access failed while the snapshot was being scanned
    #[error("Snapshot build failed: {0}")]
    SnapshotBuild(String),

    /// A partition task failed; the whole computation is aborted
    #[error("Worker failure in partition {partition}: {reason}")]
    WorkerFailure { partition: usize, reason: String },

    #[error("Node {0} is not part of the computed snapshot")]
    UnknownNodeId(NodeId),
}

pub type AlgoResult<T> = Result<T, AlgoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AlgoError::WorkerFailure {
            partition: 3,
            reason: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Worker failure in partition 3: boom");
        assert_eq!(
            AlgoError::UnknownNodeId(42).to_string(),
            "Node 42 is not part of the computed snapshot"
        );
    }
}
