//! Social network flavour: `Person` nodes linked by `FRIEND_OF`

use super::{NodeCreator, RelationshipCreator};
use crate::graph::{EdgeType, GraphResult, GraphStore, Label, NodeId, PropertyMap};
use rand::{Rng, RngCore};

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Carol", "Dave", "Erin", "Frank", "Grace", "Heidi", "Ivan", "Judy",
    "Mallory", "Niaj", "Olivia", "Peggy", "Rupert", "Sybil", "Trent", "Victor", "Walter", "Yara",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Jones", "Brown", "Taylor", "Wilson", "Davies", "Evans", "Thomas", "Roberts", "Walker",
];

/// Creates `Person` nodes with a random `name`
#[derive(Debug, Clone)]
pub struct SocialNetworkNodeCreator {
    label: Label,
}

impl SocialNetworkNodeCreator {
    pub fn new(label: impl Into<Label>) -> Self {
        SocialNetworkNodeCreator { label: label.into() }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }
}

impl Default for SocialNetworkNodeCreator {
    fn default() -> Self {
        Self::new("Person")
    }
}

impl NodeCreator for SocialNetworkNodeCreator {
    fn create_node(&self, store: &mut GraphStore, index: usize, rng: &mut dyn RngCore) -> GraphResult<NodeId> {
        let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];

        let mut properties = PropertyMap::new();
        properties.insert("name".to_string(), format!("{} {}", first, last).into());
        properties.insert("index".to_string(), (index as i64).into());
        Ok(store.create_node_with_properties(vec![self.label.clone()], properties))
    }
}

/// Creates `FRIEND_OF` relationships with a random `since` year
#[derive(Debug, Clone)]
pub struct SocialNetworkRelationshipCreator {
    edge_type: EdgeType,
    first_year: i64,
    last_year: i64,
}

impl SocialNetworkRelationshipCreator {
    pub fn new(edge_type: impl Into<EdgeType>) -> Self {
        SocialNetworkRelationshipCreator {
            edge_type: edge_type.into(),
            first_year: 2000,
            last_year: 2024,
        }
    }

    pub fn edge_type(&self) -> &EdgeType {
        &self.edge_type
    }
}

impl Default for SocialNetworkRelationshipCreator {
    fn default() -> Self {
        Self::new("FRIEND_OF")
    }
}

impl RelationshipCreator for SocialNetworkRelationshipCreator {
    fn create_relationship(
        &self,
        store: &mut GraphStore,
        source: NodeId,
        target: NodeId,
        rng: &mut dyn RngCore,
    ) -> GraphResult<()> {
        let since: i64 = rng.gen_range(self.first_year..=self.last_year);
        let mut properties = PropertyMap::new();
        properties.insert("since".to_string(), since.into());
        store.create_edge_with_properties(source, target, self.edge_type.clone(), properties)?;
        Ok(())
    }
}
