//! Edge implementation for the attributed graph

use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, EdgeType, NodeId};
use serde::{Deserialize, Serialize};

/// A directed edge in the attributed graph
///
/// Ranking may read an edge in either direction; see
/// [`EdgeDirection`](crate::algo::EdgeDirection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Source node (edge goes FROM this node)
    pub source: NodeId,

    /// Target node (edge goes TO this node)
    pub target: NodeId,

    /// Type of relationship (e.g., "RELATES_TO")
    #[serde(rename = "type")]
    pub edge_type: EdgeType,

    /// Properties associated with this edge
    #[serde(default)]
    pub properties: PropertyMap,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        edge_type: impl Into<EdgeType>,
    ) -> Self {
        Edge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            edge_type: edge_type.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Set a property value
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Numeric value of a property, if it is an integer or float
    pub fn numeric_property(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(PropertyValue::as_number)
    }

    /// The endpoint opposite `node`. An edge that does not start at `node`
    /// is read as ending there.
    pub fn other_end(&self, node: &NodeId) -> &NodeId {
        if self.source == *node {
            &self.target
        } else {
            &self.source
        }
    }

    /// Check if this edge starts and ends at the same node
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_edge() {
        let edge = Edge::new("ab", "a", "b", "LINKS");

        assert_eq!(edge.id, EdgeId::new("ab"));
        assert_eq!(edge.source, NodeId::new("a"));
        assert_eq!(edge.target, NodeId::new("b"));
        assert_eq!(edge.edge_type.as_str(), "LINKS");
    }

    #[test]
    fn test_other_end() {
        let edge = Edge::new("ab", "a", "b", "LINKS");

        assert_eq!(edge.other_end(&NodeId::new("a")), &NodeId::new("b"));
        assert_eq!(edge.other_end(&NodeId::new("b")), &NodeId::new("a"));
        assert!(!edge.is_self_loop());
    }

    #[test]
    fn test_edge_properties() {
        let mut edge = Edge::new("ab", "a", "b", "LINKS");
        edge.set_property("weight", 2i64);
        edge.set_property("since", "2021");

        assert_eq!(edge.numeric_property("weight"), Some(2.0));
        assert_eq!(edge.numeric_property("since"), None);
        assert_eq!(edge.properties["since"], PropertyValue::from("2021"));
    }

    #[test]
    fn test_edge_json_shape() {
        let edge: Edge = serde_json::from_str(
            r#"{"id": "ab", "source": "a", "target": "b", "type": "LINKS", "properties": {"weight": 1.5}}"#,
        )
        .unwrap();

        assert_eq!(edge.numeric_property("weight"), Some(1.5));
        assert_eq!(edge.edge_type, EdgeType::new("LINKS"));
    }
}
