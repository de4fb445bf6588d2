//! In-memory graph storage
//!
//! Append-only arena of nodes and edges with per-node adjacency lists and a
//! label index. Ids are dense and never reused, so iteration follows id order.

use super::edge::Edge;
use super::node::Node;
use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, EdgeType, Label, NodeId};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory graph storage
///
/// - nodes: slot = NodeId
/// - edges: slot = EdgeId
/// - outgoing / incoming: NodeId -> Vec<EdgeId>
/// - label_index: Label -> ordered NodeIds
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<EdgeId>>,
    incoming: Vec<Vec<EdgeId>>,
    label_index: HashMap<Label, BTreeSet<NodeId>>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node with a single label
    pub fn create_node(&mut self, label: impl Into<Label>) -> NodeId {
        self.create_node_with_properties(vec![label.into()], PropertyMap::new())
    }

    pub fn create_node_with_properties(&mut self, labels: Vec<Label>, properties: PropertyMap) -> NodeId {
        let node_id = NodeId::new(self.nodes.len() as u64);
        let node = Node::new_with_properties(node_id, labels, properties);

        for label in &node.labels {
            self.label_index
                .entry(label.clone())
                .or_default()
                .insert(node_id);
        }

        self.nodes.push(node);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        node_id
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.slot())
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.slot())
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        id.slot() < self.nodes.len()
    }

    pub fn set_node_property(
        &mut self,
        node_id: NodeId,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<()> {
        let node = self
            .get_node_mut(node_id)
            .ok_or(GraphError::NodeNotFound(node_id))?;
        node.set_property(key, value);
        Ok(())
    }

    /// Create an edge between two existing nodes
    pub fn create_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        edge_type: impl Into<EdgeType>,
    ) -> GraphResult<EdgeId> {
        self.create_edge_with_properties(source, target, edge_type, PropertyMap::new())
    }

    pub fn create_edge_with_properties(
        &mut self,
        source: NodeId,
        target: NodeId,
        edge_type: impl Into<EdgeType>,
        properties: PropertyMap,
    ) -> GraphResult<EdgeId> {
        if !self.has_node(source) {
            return Err(GraphError::InvalidEdgeSource(source));
        }
        if !self.has_node(target) {
            return Err(GraphError::InvalidEdgeTarget(target));
        }

        let edge_id = EdgeId::new(self.edges.len() as u64);
        self.edges
            .push(Edge::new_with_properties(edge_id, source, target, edge_type, properties));
        self.outgoing[source.slot()].push(edge_id);
        self.incoming[target.slot()].push(edge_id);
        Ok(edge_id)
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.slot())
    }

    pub fn get_edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.slot())
    }

    /// Ids of the edges leaving a node, in creation order
    pub fn outgoing_edge_ids(&self, node_id: NodeId) -> &[EdgeId] {
        self.outgoing
            .get(node_id.slot())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn get_outgoing_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.outgoing_edge_ids(node_id)
            .iter()
            .filter_map(|&id| self.get_edge(id))
            .collect()
    }

    pub fn get_incoming_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.incoming
            .get(node_id.slot())
            .map(|ids| ids.iter().filter_map(|&id| self.get_edge(id)).collect())
            .unwrap_or_default()
    }

    /// Nodes carrying `label`, in id order
    pub fn get_nodes_by_label(&self, label: &Label) -> Vec<&Node> {
        self.label_index
            .get(label)
            .map(|ids| ids.iter().filter_map(|&id| self.get_node(id)).collect())
            .unwrap_or_default()
    }

    /// Find the first node with `label` whose `key` property equals `value`
    pub fn find_node(&self, label: &Label, key: &str, value: &PropertyValue) -> Option<NodeId> {
        self.get_nodes_by_label(label)
            .into_iter()
            .find(|node| node.get_property(key) == Some(value))
            .map(|node| node.id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_get_node() {
        let mut store = GraphStore::new();
        let node_id = store.create_node("Person");

        assert_eq!(store.node_count(), 1);
        let node = store.get_node(node_id).unwrap();
        assert_eq!(node.id, node_id);
        assert!(node.has_label(&Label::new("Person")));
    }

    #[test]
    fn test_create_node_with_properties() {
        let mut store = GraphStore::new();
        let mut props = PropertyMap::new();
        props.insert("name".to_string(), "Alice".into());

        let node_id = store.create_node_with_properties(
            vec![Label::new("Person"), Label::new("Employee")],
            props,
        );

        let node = store.get_node(node_id).unwrap();
        assert_eq!(node.labels.len(), 2);
        assert_eq!(node.get_property("name").unwrap().as_string(), Some("Alice"));
        assert_eq!(store.get_nodes_by_label(&Label::new("Employee")).len(), 1);
    }

    #[test]
    fn test_edge_validation() {
        let mut store = GraphStore::new();
        let node1 = store.create_node("Person");
        let invalid_node = NodeId::new(999);

        let result = store.create_edge(invalid_node, node1, "KNOWS");
        assert_eq!(result, Err(GraphError::InvalidEdgeSource(invalid_node)));

        let result = store.create_edge(node1, invalid_node, "KNOWS");
        assert_eq!(result, Err(GraphError::InvalidEdgeTarget(invalid_node)));

        assert_eq!(
            store.set_node_property(invalid_node, "name", "x"),
            Err(GraphError::NodeNotFound(invalid_node))
        );
    }

    #[test]
    fn test_adjacency_lists() {
        let mut store = GraphStore::new();
        let node1 = store.create_node("Person");
        let node2 = store.create_node("Person");
        let node3 = store.create_node("Person");

        store.create_edge(node1, node2, "KNOWS").unwrap();
        store.create_edge(node1, node3, "KNOWS").unwrap();
        store.create_edge(node2, node3, "FOLLOWS").unwrap();
        // Parallel edge
        store.create_edge(node1, node2, "FOLLOWS").unwrap();

        assert_eq!(store.get_outgoing_edges(node1).len(), 3);
        assert_eq!(store.get_incoming_edges(node2).len(), 2);
        assert!(store.get_outgoing_edges(node3).is_empty());
        assert_eq!(store.get_incoming_edges(node3).len(), 2);
        assert_eq!(store.edge_count(), 4);

        let first = store.outgoing_edge_ids(node1)[0];
        store.get_edge_mut(first).unwrap().set_property("weight", 2.5);
        assert_eq!(
            store.get_edge(first).unwrap().get_property("weight").unwrap().as_float(),
            Some(2.5)
        );
    }

    #[test]
    fn test_find_node() {
        let mut store = GraphStore::new();
        let a = store.create_node("Company");
        let b = store.create_node("Company");
        store.set_node_property(a, "name", "a").unwrap();
        store.set_node_property(b, "name", "b").unwrap();

        let company = Label::new("Company");
        assert_eq!(store.find_node(&company, "name", &"b".into()), Some(b));
        assert_eq!(store.find_node(&company, "name", &"z".into()), None);
    }
}
