//! In-memory property graph
//!
//! The host store the ranking engine reads from and the generators write to:
//! labelled nodes, typed directed edges (parallel edges allowed), properties
//! on both, adjacency lists and a label index.

pub mod edge;
pub mod node;
pub mod property;
pub mod shared;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use shared::SharedGraph;
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{EdgeId, EdgeType, Label, NodeId};
