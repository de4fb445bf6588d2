//! Synthetic graph materialization
//!
//! A [`RelationshipGenerator`] decides the topology as index pairs; a
//! [`NodeCreator`] and a [`RelationshipCreator`] decide what the nodes and
//! relationships look like once written to the store.

pub mod social;

use crate::graph::{GraphError, GraphResult, GraphStore, NodeId};
use graphrank_algorithms::{AlgoError, RelationshipGenerator, WattsStrogatzConfig, WattsStrogatzGenerator};
use rand::RngCore;
use std::time::Instant;
use thiserror::Error;
use tracing::info;

pub use social::{SocialNetworkNodeCreator, SocialNetworkRelationshipCreator};

#[derive(Error, Debug, PartialEq)]
pub enum GenerateError {
    #[error("Invalid generator configuration: {0}")]
    Config(#[from] AlgoError),

    #[error("Graph write failed: {0}")]
    Graph(#[from] GraphError),
}

pub type GenerateResult<T> = Result<T, GenerateError>;

/// Creates the node for one generated index
pub trait NodeCreator {
    fn create_node(&self, store: &mut GraphStore, index: usize, rng: &mut dyn RngCore) -> GraphResult<NodeId>;
}

/// Creates the relationship for one generated `(source, target)` pair
pub trait RelationshipCreator {
    fn create_relationship(
        &self,
        store: &mut GraphStore,
        source: NodeId,
        target: NodeId,
        rng: &mut dyn RngCore,
    ) -> GraphResult<()>;
}

/// Topology plus the strategies that materialize it
pub struct GeneratorConfiguration {
    pub relationship_generator: Box<dyn RelationshipGenerator>,
    pub node_creator: Box<dyn NodeCreator>,
    pub relationship_creator: Box<dyn RelationshipCreator>,
}

impl GeneratorConfiguration {
    pub fn new(
        relationship_generator: Box<dyn RelationshipGenerator>,
        node_creator: Box<dyn NodeCreator>,
        relationship_creator: Box<dyn RelationshipCreator>,
    ) -> Self {
        GeneratorConfiguration {
            relationship_generator,
            node_creator,
            relationship_creator,
        }
    }

    /// Watts-Strogatz topology with `Person` nodes and `FRIEND_OF` relationships
    pub fn social_network(config: WattsStrogatzConfig) -> GenerateResult<Self> {
        Ok(Self::new(
            Box::new(WattsStrogatzGenerator::new(config)?),
            Box::new(SocialNetworkNodeCreator::default()),
            Box::new(SocialNetworkRelationshipCreator::default()),
        ))
    }
}

/// Writes generated graphs into a store
pub struct GraphGenerator<'s> {
    store: &'s mut GraphStore,
}

impl<'s> GraphGenerator<'s> {
    pub fn new(store: &'s mut GraphStore) -> Self {
        GraphGenerator { store }
    }

    pub fn generate_graph(&mut self, config: &GeneratorConfiguration) -> GenerateResult<Vec<NodeId>> {
        self.generate_graph_with_rng(config, &mut rand::thread_rng())
    }

    /// Create all nodes first, then one relationship per generated edge.
    /// Returns the created node ids; position `i` holds generator index `i`.
    pub fn generate_graph_with_rng(
        &mut self,
        config: &GeneratorConfiguration,
        rng: &mut dyn RngCore,
    ) -> GenerateResult<Vec<NodeId>> {
        let started = Instant::now();
        let generator = &config.relationship_generator;
        let edges = generator.generate_edges_with(rng);

        let mut node_ids = Vec::with_capacity(generator.node_count());
        for index in 0..generator.node_count() {
            node_ids.push(config.node_creator.create_node(self.store, index, rng)?);
        }

        for &(source, target) in &edges {
            config
                .relationship_creator
                .create_relationship(self.store, node_ids[source], node_ids[target], rng)?;
        }

        info!(
            "Materialized {} nodes and {} relationships in {:?}",
            node_ids.len(),
            edges.len(),
            started.elapsed()
        );
        Ok(node_ids)
    }
}
