//! GraphRank
//!
//! Parallel PageRank over an in-memory property graph, plus a small-world
//! generator for building test graphs.
//!
//! # Architecture
//!
//! - `graphrank-algorithms`: store-agnostic algorithms over a dense,
//!   array-backed [`Snapshot`] (PageRank engine, termination guards, task
//!   pool, Watts-Strogatz generator)
//! - `graph`: the host property graph store
//! - `algo`: adapters that scan the store into snapshots
//! - `generate`: writes generated topologies into the store
//! - `config`: YAML run configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use graphrank::algo::{NeverTerminate, PageRankEngine, TaskPool};
//! use graphrank::graph::GraphStore;
//!
//! let mut store = GraphStore::new();
//! let alice = store.create_node("Person");
//! let bob = store.create_node("Person");
//! store.create_edge(alice, bob, "KNOWS").unwrap();
//!
//! let pool = TaskPool::new(2).unwrap();
//! let mut engine = PageRankEngine::new(&store, &NeverTerminate, &pool);
//! engine.compute(20, &[]).unwrap();
//!
//! let alice_score = engine.get_result(alice.as_u64()).unwrap();
//! let bob_score = engine.get_result(bob.as_u64()).unwrap();
//! assert!(bob_score > alice_score);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod generate;
pub mod graph;

// Re-export main types for convenience
pub use graph::{
    Edge, EdgeId, EdgeType, GraphError, GraphResult, GraphStore, Label, Node, NodeId,
    PropertyMap, PropertyValue, SharedGraph,
};

pub use algo::{
    build_snapshot, page_rank_store, AlgoError, AlgoResult, CancellationFlag, ComputeStatus,
    DanglingPolicy, Deadline, LabelScope, NeverTerminate, PageRankConfig, PageRankEngine,
    PageRankScores, PoolConfig, Snapshot, TaskPool, TerminationGuard,
};

pub use config::{ConfigError, ConfigResult, GraphRankConfig};

pub use generate::{
    GenerateError, GenerateResult, GeneratorConfiguration, GraphGenerator, NodeCreator,
    RelationshipCreator, SocialNetworkNodeCreator, SocialNetworkRelationshipCreator,
};

pub use graphrank_algorithms::{RelationshipGenerator, WattsStrogatzConfig, WattsStrogatzGenerator};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
