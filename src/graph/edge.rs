//! Directed, typed edges

use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, EdgeType, NodeId};
use serde::{Deserialize, Serialize};

/// A directed edge in the property graph. Several edges may join the same pair of nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    /// Source node (edge goes FROM this node)
    pub source: NodeId,
    /// Target node (edge goes TO this node)
    pub target: NodeId,
    pub edge_type: EdgeType,
    pub properties: PropertyMap,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, edge_type: impl Into<EdgeType>) -> Self {
        Self::new_with_properties(id, source, target, edge_type, PropertyMap::new())
    }

    pub fn new_with_properties(
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        edge_type: impl Into<EdgeType>,
        properties: PropertyMap,
    ) -> Self {
        Edge {
            id,
            source,
            target,
            edge_type: edge_type.into(),
            properties,
        }
    }

    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.properties.insert(key.into(), value.into())
    }

    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge() {
        let mut edge = Edge::new(EdgeId::new(1), NodeId::new(1), NodeId::new(2), "TYPE_1");
        edge.set_property("score", 0.8);
        assert_eq!(edge.edge_type, EdgeType::new("TYPE_1"));
        assert_eq!(edge.get_property("score").unwrap().as_float(), Some(0.8));
        assert!(!edge.is_self_loop());
    }
}
