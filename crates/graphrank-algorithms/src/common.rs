//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.

use crate::error::{AlgoError, AlgoResult};
use rustc_hash::FxHashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// Anything that can produce a [`Snapshot`] of its topology.
///
/// `relationship_types` restricts which outgoing relationships are counted;
/// an empty slice means every type.
pub trait GraphSnapshotSource {
    fn build(&self, relationship_types: &[&str]) -> AlgoResult<Snapshot>;
}

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Built once per computation and never mutated afterwards, so it can be
/// shared by reference across pool workers.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: FxHashMap<NodeId, usize>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure, derived from the outgoing one
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices, ascending per target
    pub in_sources: Vec<usize>,
}

impl Snapshot {
    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.out_targets[self.out_offsets[idx]..self.out_offsets[idx + 1]]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        &self.in_sources[self.in_offsets[idx]..self.in_offsets[idx + 1]]
    }

    /// Total number of relationships captured by the snapshot
    pub fn relationship_count(&self) -> usize {
        self.out_targets.len()
    }

    pub fn index_of(&self, node_id: NodeId) -> Option<usize> {
        self.node_to_index.get(&node_id).copied()
    }

    pub fn node_at(&self, idx: usize) -> NodeId {
        self.index_to_node[idx]
    }

    /// Indices of nodes without outgoing relationships
    pub fn dangling_nodes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.node_count).filter(move |&idx| self.out_degree(idx) == 0)
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Create a snapshot from per-node outgoing adjacency lists.
    ///
    /// `outgoing[i]` lists the target indices of node `index_to_node[i]`.
    /// Fails if the lists disagree in length, a NodeId repeats, or a target
    /// falls outside `0..N`.
    pub fn from_adjacency_list(
        index_to_node: Vec<NodeId>,
        outgoing: Vec<Vec<usize>>,
    ) -> AlgoResult<Self> {
        let node_count = index_to_node.len();
        if outgoing.len() != node_count {
            return Err(AlgoError::SnapshotBuild(format!(
                "adjacency has {} rows for {} nodes",
                outgoing.len(),
                node_count
            )));
        }

        let mut node_to_index =
            FxHashMap::with_capacity_and_hasher(node_count, Default::default());
        for (idx, &node_id) in index_to_node.iter().enumerate() {
            if node_to_index.insert(node_id, idx).is_some() {
                return Err(AlgoError::SnapshotBuild(format!(
                    "node {} appears twice",
                    node_id
                )));
            }
        }

        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::with_capacity(outgoing.iter().map(Vec::len).sum());
        out_offsets.push(0);
        for (source, neighbors) in outgoing.into_iter().enumerate() {
            if let Some(&bad) = neighbors.iter().find(|&&t| t >= node_count) {
                return Err(AlgoError::SnapshotBuild(format!(
                    "node index {} has target index {} outside 0..{}",
                    source, bad, node_count
                )));
            }
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());
        }

        let (in_offsets, in_sources) = transpose(node_count, &out_offsets, &out_targets);

        Ok(Snapshot {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        })
    }

    /// Create a snapshot from `(source, target)` index pairs, as produced by
    /// the generators. NodeIds equal node indices.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> AlgoResult<Self> {
        let mut outgoing = vec![Vec::new(); node_count];
        for &(source, target) in edges {
            let row = outgoing.get_mut(source).ok_or_else(|| {
                AlgoError::SnapshotBuild(format!(
                    "source index {} outside 0..{}",
                    source, node_count
                ))
            })?;
            row.push(target);
        }
        Self::from_adjacency_list((0..node_count as NodeId).collect(), outgoing)
    }
}

/// Counting-sort transpose of an outgoing CSR into an incoming one
fn transpose(node_count: usize, out_offsets: &[usize], out_targets: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let mut in_offsets = vec![0usize; node_count + 1];
    for &target in out_targets {
        in_offsets[target + 1] += 1;
    }
    for i in 0..node_count {
        in_offsets[i + 1] += in_offsets[i];
    }

    let mut cursor = in_offsets.clone();
    let mut in_sources = vec![0usize; out_targets.len()];
    for source in 0..node_count {
        for &target in &out_targets[out_offsets[source]..out_offsets[source + 1]] {
            in_sources[cursor[target]] = source;
            cursor[target] += 1;
        }
    }

    (in_offsets, in_sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_projection() {
        // 10 -> 20 -> 30, 10 -> 30
        let snapshot =
            Snapshot::from_adjacency_list(vec![10, 20, 30], vec![vec![1, 2], vec![2], vec![]])
                .unwrap();

        assert_eq!(snapshot.node_count, 3);
        assert_eq!(snapshot.relationship_count(), 3);
        assert_eq!(snapshot.out_degree(0), 2);
        assert_eq!(snapshot.in_degree(2), 2);
        assert_eq!(snapshot.successors(0), &[1, 2]);
        assert_eq!(snapshot.predecessors(2), &[0, 1]);
        assert_eq!(snapshot.index_of(20), Some(1));
        assert_eq!(snapshot.node_at(2), 30);
        assert_eq!(snapshot.dangling_nodes().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_degree_sum_matches_relationships() {
        let snapshot = Snapshot::from_edges(4, &[(0, 1), (0, 1), (1, 2), (3, 0), (2, 3)]).unwrap();
        let out_sum: usize = (0..4).map(|i| snapshot.out_degree(i)).sum();
        let in_sum: usize = (0..4).map(|i| snapshot.in_degree(i)).sum();
        assert_eq!(out_sum, 5);
        assert_eq!(in_sum, 5);
        // Parallel relationships are kept
        assert_eq!(snapshot.predecessors(1), &[0, 0]);
    }

    #[test]
    fn test_rejects_out_of_range_target() {
        let result = Snapshot::from_adjacency_list(vec![1, 2], vec![vec![5], vec![]]);
        assert!(matches!(result, Err(AlgoError::SnapshotBuild(_))));

        let result = Snapshot::from_edges(2, &[(2, 0)]);
        assert!(matches!(result, Err(AlgoError::SnapshotBuild(_))));
    }

    #[test]
    fn test_rejects_duplicate_node_ids() {
        let result = Snapshot::from_adjacency_list(vec![7, 7], vec![vec![], vec![]]);
        assert!(matches!(result, Err(AlgoError::SnapshotBuild(_))));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Snapshot::from_edges(0, &[]).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.in_offsets, vec![0]);
    }
}
