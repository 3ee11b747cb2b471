//! In-memory graph storage
//!
//! Nodes and edges are keyed by caller-chosen string ids and kept in
//! insertion order, so projections and rankings iterate deterministically.

use super::edge::Edge;
use super::node::Node;
use super::property::PropertyValue;
use super::types::{EdgeId, EdgeType, Label, NodeId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Node {0} already exists")]
    NodeAlreadyExists(NodeId),

    #[error("Edge {0} already exists")]
    EdgeAlreadyExists(EdgeId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),

    #[error("Invalid graph snapshot: {0}")]
    InvalidSnapshot(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Serializable form of a whole graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// In-memory graph storage
///
/// - nodes: NodeId -> Node (insertion ordered)
/// - edges: EdgeId -> Edge (insertion ordered)
/// - outgoing / incoming: NodeId -> Vec<EdgeId> adjacency lists
/// - label_index: Label -> Vec<NodeId>
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
    outgoing: HashMap<NodeId, Vec<EdgeId>>,
    incoming: HashMap<NodeId, Vec<EdgeId>>,
    label_index: HashMap<Label, Vec<NodeId>>,
}

impl GraphStore {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node with a single label
    pub fn create_node(&mut self, id: impl Into<NodeId>, label: impl Into<Label>) -> GraphResult<NodeId> {
        let node = Node::new(id, label);
        let id = node.id.clone();
        self.insert_node(node)?;
        Ok(id)
    }

    /// Insert a fully built node
    pub fn insert_node(&mut self, node: Node) -> GraphResult<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::NodeAlreadyExists(node.id));
        }

        for label in &node.labels {
            self.label_index.entry(label.clone()).or_default().push(node.id.clone());
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Get a node by id
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Set a property on a node
    pub fn set_node_property(
        &mut self,
        id: &str,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(NodeId::new(id)))?;
        node.set_property(key, value);
        Ok(())
    }

    /// Create a directed edge between two existing nodes
    pub fn create_edge(
        &mut self,
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        edge_type: impl Into<EdgeType>,
    ) -> GraphResult<EdgeId> {
        let edge = Edge::new(id, source, target, edge_type);
        let id = edge.id.clone();
        self.insert_edge(edge)?;
        Ok(id)
    }

    /// Insert a fully built edge
    pub fn insert_edge(&mut self, edge: Edge) -> GraphResult<()> {
        // Validate nodes exist
        if !self.nodes.contains_key(&edge.source) {
            return Err(GraphError::InvalidEdgeSource(edge.source));
        }
        if !self.nodes.contains_key(&edge.target) {
            return Err(GraphError::InvalidEdgeTarget(edge.target));
        }
        if self.edges.contains_key(&edge.id) {
            return Err(GraphError::EdgeAlreadyExists(edge.id));
        }

        // Update adjacency lists
        self.outgoing.entry(edge.source.clone()).or_default().push(edge.id.clone());
        self.incoming.entry(edge.target.clone()).or_default().push(edge.id.clone());

        self.edges.insert(edge.id.clone(), edge);
        Ok(())
    }

    /// Get an edge by id
    pub fn get_edge(&self, id: &str) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Set a property on an edge
    pub fn set_edge_property(
        &mut self,
        id: &str,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<()> {
        let edge = self
            .edges
            .get_mut(id)
            .ok_or_else(|| GraphError::EdgeNotFound(EdgeId::new(id)))?;
        edge.set_property(key, value);
        Ok(())
    }

    /// Edges leaving `node_id`, in insertion order
    pub fn get_outgoing_edges(&self, node_id: &str) -> Vec<&Edge> {
        self.adjacent(&self.outgoing, node_id)
    }

    /// Edges arriving at `node_id`, in insertion order
    pub fn get_incoming_edges(&self, node_id: &str) -> Vec<&Edge> {
        self.adjacent(&self.incoming, node_id)
    }

    fn adjacent(&self, index: &HashMap<NodeId, Vec<EdgeId>>, node_id: &str) -> Vec<&Edge> {
        index
            .get(node_id)
            .map(|ids| ids.iter().filter_map(|id| self.edges.get(id)).collect())
            .unwrap_or_default()
    }

    /// Nodes carrying `label`, in insertion order
    pub fn get_nodes_by_label(&self, label: &Label) -> Vec<&Node> {
        self.label_index
            .get(label)
            .map(|ids| ids.iter().filter_map(|id| self.nodes.get(id)).collect())
            .unwrap_or_default()
    }

    /// All nodes, in insertion order
    pub fn all_nodes(&self) -> Vec<&Node> {
        self.nodes.values().collect()
    }

    /// All edges, in insertion order
    pub fn all_edges(&self) -> Vec<&Edge> {
        self.edges.values().collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Copy the whole graph into its serializable form
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.values().cloned().collect(),
            edges: self.edges.values().cloned().collect(),
        }
    }

    /// Rebuild a graph from a snapshot. Nodes are inserted before edges.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> GraphResult<Self> {
        let mut store = GraphStore::new();
        for node in snapshot.nodes {
            store.insert_node(node)?;
        }
        for edge in snapshot.edges {
            store.insert_edge(edge)?;
        }
        debug!("Loaded graph snapshot: {} nodes, {} edges", store.node_count(), store.edge_count());
        Ok(store)
    }

    /// Parse a JSON snapshot
    pub fn from_json_str(json: &str) -> GraphResult<Self> {
        let snapshot: GraphSnapshot =
            serde_json::from_str(json).map_err(|e| GraphError::InvalidSnapshot(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }

    /// Serialize the graph as a JSON snapshot
    pub fn to_json_string(&self) -> GraphResult<String> {
        serde_json::to_string_pretty(&self.snapshot()).map_err(|e| GraphError::InvalidSnapshot(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> GraphStore {
        let mut store = GraphStore::new();
        store.create_node("a", "Habit").unwrap();
        store.create_node("b", "Habit").unwrap();
        store.create_node("c", "Goal").unwrap();
        store.create_edge("ab", "a", "b", "LINKS").unwrap();
        store.create_edge("bc", "b", "c", "LINKS").unwrap();
        store.create_edge("ca", "c", "a", "SUPPORTS").unwrap();
        store
    }

    #[test]
    fn test_create_and_lookup() {
        let store = triangle();

        assert_eq!(store.node_count(), 3);
        assert_eq!(store.edge_count(), 3);
        assert!(store.get_node("a").is_some());
        assert_eq!(store.get_edge("bc").unwrap().target, NodeId::new("c"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut store = triangle();

        assert_eq!(
            store.create_node("a", "Habit"),
            Err(GraphError::NodeAlreadyExists(NodeId::new("a")))
        );
        assert_eq!(
            store.create_edge("ab", "a", "b", "LINKS"),
            Err(GraphError::EdgeAlreadyExists(EdgeId::new("ab")))
        );
    }

    #[test]
    fn test_edge_requires_endpoints() {
        let mut store = triangle();

        assert_eq!(
            store.create_edge("ax", "a", "x", "LINKS"),
            Err(GraphError::InvalidEdgeTarget(NodeId::new("x")))
        );
        assert_eq!(
            store.create_edge("xa", "x", "a", "LINKS"),
            Err(GraphError::InvalidEdgeSource(NodeId::new("x")))
        );
    }

    #[test]
    fn test_adjacency() {
        let store = triangle();

        let out: Vec<&str> = store.get_outgoing_edges("a").iter().map(|e| e.id.as_str()).collect();
        let inc: Vec<&str> = store.get_incoming_edges("a").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(out, vec!["ab"]);
        assert_eq!(inc, vec!["ca"]);
        assert!(store.get_outgoing_edges("missing").is_empty());
    }

    #[test]
    fn test_label_index() {
        let store = triangle();
        let habits: Vec<&str> = store
            .get_nodes_by_label(&Label::new("Habit"))
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(habits, vec!["a", "b"]);
        assert!(store.get_nodes_by_label(&Label::new("Missing")).is_empty());
    }

    #[test]
    fn test_properties() {
        let mut store = triangle();
        store.set_node_property("a", "value", 2i64).unwrap();
        store.set_edge_property("ab", "weight", 0.5).unwrap();

        assert_eq!(store.get_node("a").unwrap().numeric_property("value"), Some(2.0));
        assert_eq!(store.get_edge("ab").unwrap().numeric_property("weight"), Some(0.5));
        assert_eq!(
            store.set_node_property("x", "value", 1i64),
            Err(GraphError::NodeNotFound(NodeId::new("x")))
        );
    }

    #[test]
    fn test_json_snapshot_round_trip() {
        let mut store = triangle();
        store.set_node_property("a", "value", 1.5).unwrap();

        let json = store.to_json_string().unwrap();
        let restored = GraphStore::from_json_str(&json).unwrap();

        assert_eq!(restored.node_count(), 3);
        assert_eq!(restored.get_node("a").unwrap().numeric_property("value"), Some(1.5));
        let ids: Vec<&str> = restored.all_edges().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["ab", "bc", "ca"]);
    }

    #[test]
    fn test_invalid_snapshot() {
        assert!(matches!(
            GraphStore::from_json_str("{\"nodes\": 3}"),
            Err(GraphError::InvalidSnapshot(_))
        ));
    }
}
