//! Graph accessor traits
//!
//! The ranking core never sees a concrete node or edge type. Callers expose
//! their graph through these traits: a stable id, numeric attributes, the
//! edges of a node and the node on the other side of an edge.
//!
//! Preconditions the core does not check:
//! - `node_id` is unique across `nodes()`.
//! - `destination(node, edge)` is only called with an edge returned by
//!   `edges(node)` and resolves to the other endpoint of that edge.

use crate::attrs::AttributeVector;

/// Read access to the numeric attributes of an edge
pub trait EdgeAccessor {
    type Edge;

    /// Numeric attributes of `edge`
    fn edge_attributes(&self, edge: &Self::Edge) -> AttributeVector;
}

/// Produces rewritten copies of edges
pub trait EdgeRewriter: EdgeAccessor {
    /// Return a copy of `edge` whose attributes listed in `overrides` are
    /// replaced. Every other field and attribute stays as it was.
    fn override_edge_attributes(&self, edge: &Self::Edge, overrides: &AttributeVector) -> Self::Edge;
}

/// Read access to a graph for ranking
pub trait GraphAccessor: EdgeAccessor {
    type Node;

    /// Nodes taking part in the ranking, in a stable order
    fn nodes(&self) -> Vec<&Self::Node>;

    /// Stable, unique id of `node`
    fn node_id<'a>(&self, node: &'a Self::Node) -> &'a str;

    /// Numeric attributes of `node`
    fn node_attributes(&self, node: &Self::Node) -> AttributeVector;

    /// Edges leaving (or incident to) `node`. Whichever the implementation
    /// picks, it must pick it consistently.
    fn edges<'a>(&'a self, node: &'a Self::Node) -> Vec<&'a Self::Edge>;

    /// The node on the other side of `edge`, seen from `node`
    fn destination<'a>(&'a self, node: &'a Self::Node, edge: &'a Self::Edge) -> &'a Self::Node;
}
