//! PageRank algorithm implementation
//!
//! Power iteration over a [`Snapshot`], parallelized across contiguous node
//! partitions of a [`TaskPool`]. Each iteration reads a frozen score buffer
//! and writes the next one; buffers swap once every partition has finished.
//!
//! Scores use the classic normalization where the average rank is around 1:
//! a node with no incoming relationships converges to `1 - damping`.

use crate::common::{GraphSnapshotSource, NodeId, Snapshot};
use crate::error::{AlgoError, AlgoResult};
use crate::guard::TerminationGuard;
use crate::pool::TaskPool;
use rustc_hash::FxHashMap;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, warn};

/// What happens to the rank held by nodes without outgoing relationships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DanglingPolicy {
    /// Dangling rank leaks out and the base term compensates.
    /// Scores start at 0, so the first iteration yields `1 - damping` everywhere.
    #[default]
    Drop,
    /// Dangling rank is spread evenly over all nodes.
    /// Scores start at 1, and their sum stays equal to the node count.
    Redistribute,
}

impl DanglingPolicy {
    fn initial_score(self) -> f64 {
        match self {
            DanglingPolicy::Drop => 0.0,
            DanglingPolicy::Redistribute => 1.0,
        }
    }
}

/// PageRank configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageRankConfig {
    /// Damping factor (usually 0.85)
    pub damping_factor: f64,
    pub dangling: DanglingPolicy,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            dangling: DanglingPolicy::Drop,
        }
    }
}

impl PageRankConfig {
    pub fn validate(&self) -> AlgoResult<()> {
        if !self.damping_factor.is_finite() || !(0.0..=1.0).contains(&self.damping_factor) {
            return Err(AlgoError::InvalidConfig(format!(
                "damping factor must be within [0, 1], got {}",
                self.damping_factor
            )));
        }
        Ok(())
    }
}

/// How a computation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeStatus {
    Completed { iterations: usize },
    /// The termination guard fired; scores are those of the last finished iteration
    Cancelled {
        completed_iterations: usize,
        requested: usize,
    },
}

impl ComputeStatus {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ComputeStatus::Cancelled { .. })
    }

    pub fn completed_iterations(&self) -> usize {
        match *self {
            ComputeStatus::Completed { iterations } => iterations,
            ComputeStatus::Cancelled {
                completed_iterations,
                ..
            } => completed_iterations,
        }
    }
}

/// Scores of one computation, addressable by host node id
#[derive(Debug, Clone)]
pub struct PageRankScores {
    index_to_node: Vec<NodeId>,
    node_to_index: FxHashMap<NodeId, usize>,
    scores: Vec<f64>,
    status: ComputeStatus,
}

impl PageRankScores {
    pub fn get(&self, node_id: NodeId) -> Option<f64> {
        self.node_to_index.get(&node_id).map(|&idx| self.scores[idx])
    }

    pub fn status(&self) -> ComputeStatus {
        self.status
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Raw score vector, indexed by snapshot node index
    pub fn as_slice(&self) -> &[f64] {
        &self.scores
    }

    pub fn total(&self) -> f64 {
        self.scores.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.index_to_node.iter().copied().zip(self.scores.iter().copied())
    }

    /// The `k` highest-ranked nodes, best first; ties go to the lower node id
    pub fn top(&self, k: usize) -> Vec<(NodeId, f64)> {
        let mut ranked: Vec<(NodeId, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(k);
        ranked
    }

    pub fn into_map(self) -> HashMap<NodeId, f64> {
        self.index_to_node.into_iter().zip(self.scores).collect()
    }
}

/// Calculate PageRank for the snapshot, running at most `iterations` rounds.
///
/// The guard is polled between rounds, so at least one round always completes.
/// When it fires, the scores of the last completed round are returned with a
/// [`ComputeStatus::Cancelled`] status.
pub fn page_rank(
    snapshot: &Snapshot,
    config: &PageRankConfig,
    iterations: usize,
    pool: &TaskPool,
    guard: &dyn TerminationGuard,
) -> AlgoResult<PageRankScores> {
    if iterations == 0 {
        return Err(AlgoError::InvalidIterationCount(iterations));
    }
    config.validate()?;

    let n = snapshot.node_count;
    let started = Instant::now();
    info!(
        "Computing PageRank: {} nodes, {} relationships, {} iterations, {} workers",
        n,
        snapshot.relationship_count(),
        iterations,
        pool.workers()
    );

    let d = config.damping_factor;
    let base_score = 1.0 - d;

    // 1. Initialize scores
    let mut scores = vec![config.dangling.initial_score(); n];
    let mut next_scores = vec![0.0; n];

    let inv_degree: Vec<f64> = (0..n)
        .map(|i| match snapshot.out_degree(i) {
            0 => 0.0,
            deg => 1.0 / deg as f64,
        })
        .collect();
    let dangling: Vec<usize> = match config.dangling {
        DanglingPolicy::Drop => Vec::new(),
        DanglingPolicy::Redistribute => snapshot.dangling_nodes().collect(),
    };

    // 2. Iterate
    let mut status = ComputeStatus::Completed { iterations };
    for iteration in 0..iterations {
        let checked = if iteration == 0 { Ok(()) } else { guard.check() };
        if let Err(terminated) = checked {
            warn!(
                "PageRank stopped after {} of {} iterations ({})",
                iteration, iterations, terminated
            );
            status = ComputeStatus::Cancelled {
                completed_iterations: iteration,
                requested: iterations,
            };
            break;
        }

        let dangling_share = if dangling.is_empty() {
            0.0
        } else {
            d * dangling.iter().map(|&k| scores[k]).sum::<f64>() / n as f64
        };
        let teleport = base_score + dangling_share;

        let current = &scores;
        pool.run_partitioned(&mut next_scores, |range, slice| {
            for (i, slot) in range.zip(slice.iter_mut()) {
                let mut sum_incoming = 0.0;
                for &source_idx in snapshot.predecessors(i) {
                    sum_incoming += current[source_idx] * inv_degree[source_idx];
                }
                let score = teleport + d * sum_incoming;
                if !score.is_finite() {
                    return Err(format!("non-finite score at node index {}", i));
                }
                *slot = score;
            }
            Ok(())
        })?;

        // Swap buffers
        std::mem::swap(&mut scores, &mut next_scores);
        debug!(iteration, "PageRank iteration complete");
    }

    info!(
        "PageRank finished in {:?} ({} iterations)",
        started.elapsed(),
        status.completed_iterations()
    );

    // 3. Keep the index mapping so scores can be read back by NodeId
    Ok(PageRankScores {
        index_to_node: snapshot.index_to_node.clone(),
        node_to_index: snapshot.node_to_index.clone(),
        scores,
        status,
    })
}

/// PageRank bound to a snapshot source, a termination guard and a worker pool.
///
/// `compute` builds a fresh snapshot each time it is called; results stay
/// readable through `get_result` until the next successful `compute`.
pub struct PageRankEngine<'a> {
    source: &'a dyn GraphSnapshotSource,
    guard: &'a dyn TerminationGuard,
    pool: &'a TaskPool,
    config: PageRankConfig,
    result: Option<PageRankScores>,
}

impl<'a> PageRankEngine<'a> {
    pub fn new(
        source: &'a dyn GraphSnapshotSource,
        guard: &'a dyn TerminationGuard,
        pool: &'a TaskPool,
    ) -> Self {
        Self::with_config(source, guard, pool, PageRankConfig::default())
    }

    pub fn with_config(
        source: &'a dyn GraphSnapshotSource,
        guard: &'a dyn TerminationGuard,
        pool: &'a TaskPool,
        config: PageRankConfig,
    ) -> Self {
        PageRankEngine {
            source,
            guard,
            pool,
            config,
            result: None,
        }
    }

    pub fn config(&self) -> &PageRankConfig {
        &self.config
    }

    /// Run `iterations` rounds over the relationships whose type is in
    /// `relationship_types` (all types when empty).
    pub fn compute(
        &mut self,
        iterations: usize,
        relationship_types: &[&str],
    ) -> AlgoResult<ComputeStatus> {
        if iterations == 0 {
            return Err(AlgoError::InvalidIterationCount(iterations));
        }
        self.config.validate()?;

        let snapshot = self.source.build(relationship_types)?;
        debug!(
            "Built snapshot: {} nodes, {} relationships, types {:?}",
            snapshot.node_count,
            snapshot.relationship_count(),
            relationship_types
        );

        let scores = page_rank(&snapshot, &self.config, iterations, self.pool, self.guard)?;
        let status = scores.status();
        self.result = Some(scores);
        Ok(status)
    }

    /// Score of a node from the last computation
    pub fn get_result(&self, node_id: NodeId) -> AlgoResult<f64> {
        self.result
            .as_ref()
            .and_then(|scores| scores.get(node_id))
            .ok_or(AlgoError::UnknownNodeId(node_id))
    }

    pub fn scores(&self) -> Option<&PageRankScores> {
        self.result.as_ref()
    }

    pub fn status(&self) -> Option<ComputeStatus> {
        self.result.as_ref().map(PageRankScores::status)
    }
}
