//! Identifier and name types for the property graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Unique identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeId(pub u64);

macro_rules! id_type {
    ($name:ident) => {
        impl $name {
            pub fn new(id: u64) -> Self {
                $name(id)
            }

            pub fn as_u64(&self) -> u64 {
                self.0
            }

            pub(crate) fn slot(&self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                $name(id)
            }
        }
    };
}

id_type!(NodeId);
id_type!(EdgeId);

/// Node label (e.g., "Person", "Company")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Label(String);

/// Edge type (relationship type, e.g., "FRIEND_OF", "TYPE_1")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeType(String);

macro_rules! name_type {
    ($name:ident) => {
        impl $name {
            pub fn new(name: impl Into<String>) -> Self {
                $name(name.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }
    };
}

name_type!(Label);
name_type!(EdgeType);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids() {
        let id = NodeId::new(42);
        assert_eq!(id.as_u64(), 42);
        assert_eq!(id.to_string(), "NodeId(42)");
        assert_eq!(EdgeId::from(7).to_string(), "EdgeId(7)");
        assert!(NodeId::new(1) < NodeId::new(2));
    }

    #[test]
    fn test_names() {
        let label: Label = "Company".into();
        assert_eq!(label.as_str(), "Company");
        assert_eq!(EdgeType::new("TYPE_1").to_string(), "TYPE_1");
    }
}
