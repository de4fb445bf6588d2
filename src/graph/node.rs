//! Node implementation for property graph

use super::property::{PropertyMap, PropertyValue};
use super::types::{Label, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A node in the property graph: an id, one or more labels and properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub labels: BTreeSet<Label>,
    pub properties: PropertyMap,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<Label>) -> Self {
        Self::new_with_properties(id, vec![label.into()], PropertyMap::new())
    }

    pub fn new_with_properties(id: NodeId, labels: Vec<Label>, properties: PropertyMap) -> Self {
        Node {
            id,
            labels: labels.into_iter().collect(),
            properties,
        }
    }

    pub fn has_label(&self, label: &Label) -> bool {
        self.labels.contains(label)
    }

    /// Set a property, returning the previous value
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_properties() {
        let mut node = Node::new(NodeId::new(1), "Company");
        assert!(node.has_label(&Label::new("Company")));
        assert!(node.set_property("name", "a").is_none());
        assert_eq!(
            node.set_property("name", "b"),
            Some(PropertyValue::String("a".to_string()))
        );
        assert_eq!(node.get_property("name").unwrap().as_string(), Some("b"));
    }
}
