//! PageRank over the store
//!
//! Runs the parallel engine on a fresh snapshot and keys the scores by store node id.

use super::build_snapshot;
use crate::graph::{GraphStore, Label, NodeId};
use graphrank_algorithms::{
    page_rank, AlgoResult, ComputeStatus, PageRankConfig, TaskPool, TerminationGuard,
};
use std::collections::HashMap;

/// Calculate PageRank for the graph (or the subgraph of one label)
pub fn page_rank_store(
    store: &GraphStore,
    node_label: Option<&Label>,
    relationship_types: &[&str],
    config: &PageRankConfig,
    iterations: usize,
    pool: &TaskPool,
    guard: &dyn TerminationGuard,
) -> AlgoResult<(HashMap<NodeId, f64>, ComputeStatus)> {
    let snapshot = build_snapshot(store, node_label, relationship_types)?;
    let scores = page_rank(&snapshot, config, iterations, pool, guard)?;
    let status = scores.status();

    let by_node = scores
        .into_map()
        .into_iter()
        .map(|(id, score)| (NodeId::new(id), score))
        .collect();
    Ok((by_node, status))
}
