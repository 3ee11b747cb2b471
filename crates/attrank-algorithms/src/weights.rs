//! Initial weight distribution
//!
//! Turns raw node attributes into a normalized [`WeightMap`]: for every
//! attribute, each node receives its share of the attribute's total over
//! all nodes, so the shares sum to 1.

use crate::attrs::{self, AttributeVector, WeightMap};
use crate::common::GraphAccessor;
use tracing::debug;

/// Build the normalized starting weights for every node of `graph`
///
/// An attribute whose total is zero across all nodes is omitted from every
/// node's vector.
pub fn initial_weights<G: GraphAccessor>(graph: &G) -> WeightMap {
    let nodes = graph.nodes();

    // 1. Per-node attributes and their totals
    let node_attrs: Vec<AttributeVector> = nodes.iter().map(|n| graph.node_attributes(n)).collect();
    let total = attrs::sum_all(&node_attrs);

    debug!("Initial weights over {} nodes, {} attributes", nodes.len(), total.len());

    // 2. Each node's share of the total
    let mut weights = WeightMap::with_capacity(nodes.len());
    for (node, node_attr) in nodes.iter().zip(&node_attrs) {
        let id = graph.node_id(node);
        let previous = weights.insert(id.to_string(), attrs::divide_ignore_zero(node_attr, &total));
        debug_assert!(previous.is_none(), "duplicate node id {}", id);
    }

    weights
}
