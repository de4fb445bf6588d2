pub mod common;
pub mod error;
pub mod generator;
pub mod guard;
pub mod pagerank;
pub mod pool;

pub use common::{GraphSnapshotSource, NodeId, Snapshot};
pub use error::{AlgoError, AlgoResult};
pub use generator::{RelationshipGenerator, WattsStrogatzConfig, WattsStrogatzGenerator};
pub use guard::{CancellationFlag, Deadline, NeverTerminate, Terminated, TerminationGuard};
pub use pagerank::{
    page_rank, ComputeStatus, DanglingPolicy, PageRankConfig, PageRankEngine, PageRankScores,
};
pub use pool::{PoolConfig, TaskPool};
