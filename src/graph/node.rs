//! Node implementation for the attributed graph

use super::property::{PropertyMap, PropertyValue};
use super::types::{Label, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A node in the attributed graph
///
/// Nodes can have:
/// - A unique string ID
/// - Multiple labels
/// - Properties, whose numeric entries act as ranking attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Set of labels for this node
    #[serde(default)]
    pub labels: HashSet<Label>,

    /// Properties associated with this node
    #[serde(default)]
    pub properties: PropertyMap,
}

impl Node {
    /// Create a new node with a single label
    pub fn new(id: impl Into<NodeId>, label: impl Into<Label>) -> Self {
        let mut labels = HashSet::new();
        labels.insert(label.into());

        Node {
            id: id.into(),
            labels,
            properties: PropertyMap::new(),
        }
    }

    /// Set a property value
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Option<PropertyValue> {
        self.properties.insert(key.into(), value.into())
    }

    /// Numeric value of a property, if it is an integer or float
    pub fn numeric_property(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(PropertyValue::as_number)
    }
}
