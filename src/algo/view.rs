//! Ranking projection of a [`GraphStore`]
//!
//! A [`RankView`] selects the nodes, edges and attributes a ranking run sees
//! and exposes them through the accessor traits of `attrank-algorithms`.
//! Rewritten edges are kept as overrides on the view; the store itself is
//! never modified.

use crate::graph::{Edge, EdgeId, EdgeType, GraphStore, Label, Node};
use attrank_algorithms::{AttributeVector, EdgeAccessor, EdgeRewriter, GraphAccessor};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Which edges of a node carry its rank mass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDirection {
    /// Only edges starting at the node
    #[default]
    Outgoing,
    /// Every edge touching the node, read as undirected
    Both,
}

/// Selection of the graph a ranking run sees
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    /// Only nodes with this label (all nodes when unset)
    pub label: Option<String>,
    /// Only edges of this type (all types when unset)
    pub edge_type: Option<String>,
    pub direction: EdgeDirection,
    /// Numeric properties ranked as attributes. When empty, every numeric
    /// property found on a selected node is used.
    pub attributes: Vec<String>,
}

/// Read-only projection of a store for ranking
pub struct RankView<'a> {
    store: &'a GraphStore,
    nodes: Vec<&'a Node>,
    node_index: HashMap<&'a str, usize>,
    /// Per node index, the ids of the edges carrying its mass
    adjacency: Vec<Vec<&'a EdgeId>>,
    /// Distinct edges of the view, in store order
    edge_ids: Vec<&'a EdgeId>,
    overrides: HashMap<EdgeId, Edge>,
    attributes: Vec<String>,
}

impl<'a> RankView<'a> {
    /// Project `store` according to `options`
    pub fn new(store: &'a GraphStore, options: &ViewOptions) -> Self {
        // 1. Collect relevant nodes
        let nodes: Vec<&Node> = match &options.label {
            Some(label) => store.get_nodes_by_label(&Label::new(label.as_str())),
            None => store.all_nodes(),
        };
        let node_index: HashMap<&str, usize> =
            nodes.iter().enumerate().map(|(idx, n)| (n.id.as_str(), idx)).collect();

        // 2. Keep edges of the requested type with both ends in the view
        let edge_type = options.edge_type.as_deref().map(EdgeType::new);
        let keep = |edge: &Edge| {
            edge_type.as_ref().map_or(true, |t| edge.edge_type == *t)
                && node_index.contains_key(edge.source.as_str())
                && node_index.contains_key(edge.target.as_str())
        };

        // 3. Adjacency per node
        let adjacency = nodes
            .iter()
            .map(|node| {
                let mut ids: Vec<&EdgeId> = store
                    .get_outgoing_edges(node.id.as_str())
                    .into_iter()
                    .filter(|e| keep(e))
                    .map(|e| &e.id)
                    .collect();
                if options.direction == EdgeDirection::Both {
                    ids.extend(
                        store
                            .get_incoming_edges(node.id.as_str())
                            .into_iter()
                            .filter(|e| keep(e) && !e.is_self_loop())
                            .map(|e| &e.id),
                    );
                }
                ids
            })
            .collect();

        let edge_ids = store.all_edges().into_iter().filter(|e| keep(e)).map(|e| &e.id).collect();

        // 4. Attribute keys
        let attributes = if options.attributes.is_empty() {
            let keys: BTreeSet<&String> = nodes
                .iter()
                .flat_map(|n| n.properties.iter())
                .filter(|(_, v)| v.as_number().is_some())
                .map(|(k, _)| k)
                .collect();
            keys.into_iter().cloned().collect()
        } else {
            options.attributes.clone()
        };

        RankView {
            store,
            nodes,
            node_index,
            adjacency,
            edge_ids,
            overrides: HashMap::new(),
            attributes,
        }
    }

    /// Replace edges of the view with rewritten copies, matched by id
    pub fn with_overrides(mut self, edges: impl IntoIterator<Item = Edge>) -> Self {
        self.overrides.extend(edges.into_iter().map(|e| (e.id.clone(), e)));
        self
    }

    /// Attribute keys ranked by this view
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Distinct edges of the view with overrides applied, in store order
    pub fn view_edges(&self) -> Vec<Edge> {
        self.edge_ids.iter().filter_map(|id| self.resolve(id)).cloned().collect()
    }

    fn resolve(&self, id: &EdgeId) -> Option<&Edge> {
        self.overrides.get(id).or_else(|| self.store.get_edge(id.as_str()))
    }

    fn numeric_attributes(&self, numeric_property: impl Fn(&str) -> Option<f64>) -> AttributeVector {
        self.attributes
            .iter()
            .filter_map(|key| numeric_property(key).map(|value| (key.clone(), value)))
            .collect()
    }
}

impl EdgeAccessor for RankView<'_> {
    type Edge = Edge;

    fn edge_attributes(&self, edge: &Edge) -> AttributeVector {
        self.numeric_attributes(|key| edge.numeric_property(key))
    }
}

impl EdgeRewriter for RankView<'_> {
    fn override_edge_attributes(&self, edge: &Edge, overrides: &AttributeVector) -> Edge {
        let mut rewritten = edge.clone();
        for (key, &value) in overrides {
            rewritten.set_property(key.as_str(), value);
        }
        rewritten
    }
}

impl GraphAccessor for RankView<'_> {
    type Node = Node;

    fn nodes(&self) -> Vec<&Node> {
        self.nodes.clone()
    }

    fn node_id<'n>(&self, node: &'n Node) -> &'n str {
        node.id.as_str()
    }

    fn node_attributes(&self, node: &Node) -> AttributeVector {
        self.numeric_attributes(|key| node.numeric_property(key))
    }

    fn edges<'s>(&'s self, node: &'s Node) -> Vec<&'s Edge> {
        match self.node_index.get(node.id.as_str()) {
            Some(&idx) => self.adjacency[idx].iter().filter_map(|id| self.resolve(id)).collect(),
            None => Vec::new(),
        }
    }

    fn destination<'s>(&'s self, node: &'s Node, edge: &'s Edge) -> &'s Node {
        // Both endpoints of a view edge are view nodes
        self.nodes[self.node_index[edge.other_end(&node.id).as_str()]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> GraphStore {
        let mut store = GraphStore::new();
        for (id, label, value) in [("a", "Habit", 1i64), ("b", "Habit", 2), ("g", "Goal", 5)] {
            store.create_node(id, label).unwrap();
            store.set_node_property(id, "value", value).unwrap();
            store.set_node_property(id, "name", id.to_uppercase()).unwrap();
        }
        store.create_edge("ab", "a", "b", "LINKS").unwrap();
        store.create_edge("ba", "b", "a", "SUPPORTS").unwrap();
        store.create_edge("ag", "a", "g", "LINKS").unwrap();
        for id in ["ab", "ba", "ag"] {
            store.set_edge_property(id, "value", 1.0).unwrap();
        }
        store
    }

    fn edge_ids(view: &RankView<'_>, node: &str) -> Vec<String> {
        let node = view.nodes().into_iter().find(|n| n.id.as_str() == node).unwrap();
        view.edges(node).iter().map(|e| e.id.to_string()).collect()
    }

    #[test]
    fn test_default_view_uses_numeric_properties() {
        let store = store();
        let view = RankView::new(&store, &ViewOptions::default());

        assert_eq!(view.node_count(), 3);
        assert_eq!(view.attributes(), &["value".to_string()]);
        assert_eq!(edge_ids(&view, "a"), vec!["ab", "ag"]);
        assert!(edge_ids(&view, "g").is_empty());
    }

    #[test]
    fn test_label_filter_drops_outside_edges() {
        let store = store();
        let options = ViewOptions { label: Some("Habit".into()), ..Default::default() };
        let view = RankView::new(&store, &options);

        assert_eq!(view.node_count(), 2);
        assert_eq!(edge_ids(&view, "a"), vec!["ab"]);
        assert_eq!(view.view_edges().len(), 2);
    }

    #[test]
    fn test_edge_type_and_direction() {
        let store = store();
        let options = ViewOptions {
            edge_type: Some("LINKS".into()),
            direction: EdgeDirection::Both,
            ..Default::default()
        };
        let view = RankView::new(&store, &options);

        assert_eq!(edge_ids(&view, "b"), vec!["ab"]);
        assert_eq!(edge_ids(&view, "g"), vec!["ag"]);

        let g = view.nodes().into_iter().find(|n| n.id.as_str() == "g").unwrap();
        let ag = view.edges(g)[0];
        assert_eq!(view.destination(g, ag).id.as_str(), "a");
    }

    #[test]
    fn test_overrides_keep_other_properties() {
        let store = store();
        let view = RankView::new(&store, &ViewOptions::default());

        let ab = store.get_edge("ab").unwrap();
        let mut overrides = AttributeVector::new();
        overrides.insert("value".into(), 4.0);
        let rewritten = view.override_edge_attributes(ab, &overrides);
        assert_eq!(rewritten.numeric_property("value"), Some(4.0));
        assert_eq!(rewritten.edge_type, ab.edge_type);

        let view = view.with_overrides(vec![rewritten]);
        let a = view.nodes()[0];
        let attrs: Vec<f64> = view.edges(a).iter().map(|e| view.edge_attributes(e)["value"]).collect();
        assert_eq!(attrs, vec![4.0, 1.0]);
        // Store untouched
        assert_eq!(store.get_edge("ab").unwrap().numeric_property("value"), Some(1.0));
    }
}
