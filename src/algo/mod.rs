//! Graph algorithms module
//!
//! Algorithms live in the `graphrank-algorithms` crate and only see dense
//! [`Snapshot`]s. This module is the adapter layer: it scans a [`GraphStore`]
//! into a snapshot and maps scores back to store node ids.

pub mod pagerank;

use crate::graph::{GraphStore, Label, NodeId, SharedGraph};
use std::collections::HashMap;

// Re-export algorithms
pub use graphrank_algorithms::{
    page_rank, AlgoError, AlgoResult, CancellationFlag, ComputeStatus, DanglingPolicy, Deadline,
    GraphSnapshotSource, NeverTerminate, PageRankConfig, PageRankEngine, PageRankScores,
    PoolConfig, Snapshot, TaskPool, Terminated, TerminationGuard,
};
pub use pagerank::page_rank_store;

/// Build a Snapshot from the store for algorithm execution.
///
/// With `node_label` set, only nodes carrying that label are indexed and
/// relationships leaving the labelled set are ignored. An empty
/// `relationship_types` keeps every relationship type.
pub fn build_snapshot(
    store: &GraphStore,
    node_label: Option<&Label>,
    relationship_types: &[&str],
) -> AlgoResult<Snapshot> {
    // 1. Collect relevant nodes, in id order
    let nodes: Vec<NodeId> = match node_label {
        Some(label) => store
            .get_nodes_by_label(label)
            .iter()
            .map(|n| n.id)
            .collect(),
        None => store.all_nodes().map(|n| n.id).collect(),
    };

    // 2. Build index mapping
    let node_to_index: HashMap<NodeId, usize> = nodes
        .iter()
        .enumerate()
        .map(|(idx, &id)| (id, idx))
        .collect();

    // 3. Outgoing adjacency, filtered by type
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (u_idx, &u_id) in nodes.iter().enumerate() {
        for &edge_id in store.outgoing_edge_ids(u_id) {
            let edge = store.get_edge(edge_id).ok_or_else(|| {
                AlgoError::SnapshotBuild(format!("{} lists missing edge {}", u_id, edge_id))
            })?;

            if !relationship_types.is_empty()
                && !relationship_types.contains(&edge.edge_type.as_str())
            {
                continue;
            }

            match node_to_index.get(&edge.target) {
                Some(&v_idx) => outgoing[u_idx].push(v_idx),
                // Target outside the labelled subgraph
                None if node_label.is_some() => {}
                None => {
                    return Err(AlgoError::SnapshotBuild(format!(
                        "{} points to missing node {}",
                        edge_id, edge.target
                    )))
                }
            }
        }
    }

    Snapshot::from_adjacency_list(nodes.iter().map(NodeId::as_u64).collect(), outgoing)
}

impl GraphSnapshotSource for GraphStore {
    fn build(&self, relationship_types: &[&str]) -> AlgoResult<Snapshot> {
        build_snapshot(self, None, relationship_types)
    }
}

/// The nodes of a store that carry one label
pub struct LabelScope<'a> {
    store: &'a GraphStore,
    label: Label,
}

impl<'a> LabelScope<'a> {
    pub fn new(store: &'a GraphStore, label: impl Into<Label>) -> Self {
        LabelScope {
            store,
            label: label.into(),
        }
    }
}

impl GraphSnapshotSource for LabelScope<'_> {
    fn build(&self, relationship_types: &[&str]) -> AlgoResult<Snapshot> {
        build_snapshot(self.store, Some(&self.label), relationship_types)
    }
}

/// Holds the read lock for the whole scan
impl GraphSnapshotSource for SharedGraph {
    fn build(&self, relationship_types: &[&str]) -> AlgoResult<Snapshot> {
        let store = self.read().map_err(|_| {
            AlgoError::SnapshotBuild("graph store lock poisoned by a failed writer".to_string())
        })?;
        build_snapshot(&store, None, relationship_types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_snapshot_projection() {
        let mut store = GraphStore::new();
        let n1 = store.create_node("Person");
        let n2 = store.create_node("Person");
        let n3 = store.create_node("Person");

        // n1 -> n2 -> n3, n1 -FOLLOWS-> n3
        store.create_edge(n1, n2, "KNOWS").unwrap();
        store.create_edge(n2, n3, "KNOWS").unwrap();
        store.create_edge(n1, n3, "FOLLOWS").unwrap();

        let snapshot = store.build(&[]).unwrap();
        assert_eq!(snapshot.node_count, 3);
        assert_eq!(snapshot.relationship_count(), 3);

        let n1_idx = snapshot.index_of(n1.as_u64()).unwrap();
        let n3_idx = snapshot.index_of(n3.as_u64()).unwrap();
        assert_eq!(snapshot.out_degree(n1_idx), 2);
        assert_eq!(snapshot.in_degree(n3_idx), 2);

        let knows = store.build(&["KNOWS"]).unwrap();
        assert_eq!(knows.relationship_count(), 2);
        assert_eq!(knows.out_degree(n1_idx), 1);
        // Filtering never drops nodes
        assert_eq!(knows.node_count, 3);
    }

    #[test]
    fn test_label_scope_ignores_outside_targets() {
        let mut store = GraphStore::new();
        let a = store.create_node("Company");
        let b = store.create_node("Company");
        let p = store.create_node("Person");
        store.create_edge(a, b, "OWNS").unwrap();
        store.create_edge(a, p, "EMPLOYS").unwrap();
        store.create_edge(p, a, "WORKS_AT").unwrap();

        let snapshot = LabelScope::new(&store, "Company").build(&[]).unwrap();
        assert_eq!(snapshot.node_count, 2);
        assert_eq!(snapshot.relationship_count(), 1);
        assert!(snapshot.index_of(p.as_u64()).is_none());
    }

    #[test]
    fn test_shared_graph_snapshot() {
        let mut store = GraphStore::new();
        let a = store.create_node("Node");
        let b = store.create_node("Node");
        store.create_edge(a, b, "LINK").unwrap();

        let shared = SharedGraph::new(store);
        assert_eq!(shared.build(&[]).unwrap().relationship_count(), 1);
    }

    #[test]
    fn test_poisoned_store_fails_snapshot() {
        let shared = SharedGraph::new(GraphStore::new());
        let writer = shared.clone();
        let outcome = thread::spawn(move || {
            let mut store = writer.write().unwrap();
            store.create_node("Node");
            panic!("writer died mid-transaction");
        })
        .join();
        assert!(outcome.is_err());

        assert!(matches!(shared.build(&[]), Err(AlgoError::SnapshotBuild(_))));
    }
}
