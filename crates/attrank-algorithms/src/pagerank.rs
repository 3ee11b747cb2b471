//! Multi-attribute PageRank
//!
//! Every attribute is ranked independently over the same topology. A round
//! moves each node's mass along its edges, split by the edge's share of the
//! node's total edge attributes, then applies damping:
//!
//! ```text
//! next[dest] += weight[node] * (edge_attrs / sum(node's edge_attrs))
//! next[n]     = next[n] * d + (1 - d) / N
//! ```
//!
//! The first pass always runs; `iterations` counts the passes after it, so
//! `iterations = 0` performs exactly one pass. There is no convergence
//! check. A node with no edges forwards nothing, and a node that receives
//! nothing is absent from the round's output, so mass is only conserved on
//! graphs without dangling nodes.

use crate::attrs::{self, AttributeVector, WeightMap};
use crate::common::GraphAccessor;
use crate::error::{RankError, RankResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// PageRank configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    /// Fraction of mass kept after each round (usually 0.85)
    pub damping_factor: f64,
    /// Number of rounds after the first pass
    pub iterations: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            iterations: 50,
        }
    }
}

impl PageRankConfig {
    /// Reject a damping factor outside [0, 1]
    pub fn validate(&self) -> RankResult<()> {
        if self.damping_factor.is_finite() && (0.0..=1.0).contains(&self.damping_factor) {
            Ok(())
        } else {
            Err(RankError::InvalidDampingFactor(self.damping_factor))
        }
    }
}

/// Run PageRank over `graph`, starting from `initial`
pub fn page_rank<G: GraphAccessor>(
    graph: &G,
    initial: &WeightMap,
    config: &PageRankConfig,
) -> RankResult<WeightMap> {
    config.validate()?;
    let nodes = graph.nodes();

    Ok(iterate(nodes.len(), initial, config, |current| {
        let mut next = WeightMap::new();
        for node in &nodes {
            transfer(graph, node, current, &mut next);
        }
        next
    }))
}

/// Run PageRank with each round's edge transfers spread across the rayon
/// pool. Contributions are summed in per-worker shards and merged at the end
/// of the round, so results match [`page_rank`] up to summation order.
pub fn page_rank_parallel<G>(
    graph: &G,
    initial: &WeightMap,
    config: &PageRankConfig,
) -> RankResult<WeightMap>
where
    G: GraphAccessor + Sync,
    G::Node: Sync,
{
    config.validate()?;
    let nodes = graph.nodes();

    Ok(iterate(nodes.len(), initial, config, |current| {
        let mut merged = nodes
            .par_iter()
            .fold(WeightMap::new, |mut shard, node| {
                transfer(graph, node, current, &mut shard);
                shard
            })
            .reduce(WeightMap::new, |mut left, right| {
                for (id, contribution) in right {
                    attrs::accumulate(left.entry(id).or_default(), &contribution);
                }
                left
            });

        // Shard merge order is arbitrary, restore node order
        let mut next = WeightMap::with_capacity(merged.len());
        for node in &nodes {
            if let Some((id, weight)) = merged.swap_remove_entry(graph.node_id(node)) {
                next.insert(id, weight);
            }
        }
        next.extend(merged);
        next
    }))
}

fn iterate(
    node_count: usize,
    initial: &WeightMap,
    config: &PageRankConfig,
    transfer_round: impl Fn(&WeightMap) -> WeightMap,
) -> WeightMap {
    if node_count == 0 {
        return WeightMap::new();
    }

    debug!(
        "PageRank over {} nodes: {} iterations, damping {}",
        node_count, config.iterations, config.damping_factor
    );

    let round = |current: &WeightMap| {
        let mut next = transfer_round(current);
        apply_damping(&mut next, config.damping_factor, node_count);
        next
    };

    let mut weights = round(initial);
    for iteration in 0..config.iterations {
        trace!("PageRank round {} of {}", iteration + 1, config.iterations);
        weights = round(&weights);
    }

    weights
}

/// Move `node`'s current mass along its edges into `next`
fn transfer<G: GraphAccessor>(graph: &G, node: &G::Node, current: &WeightMap, next: &mut WeightMap) {
    let edges = graph.edges(node);
    if edges.is_empty() {
        return;
    }

    let edge_attrs: Vec<AttributeVector> = edges.iter().map(|e| graph.edge_attributes(e)).collect();
    let edge_total = attrs::sum_all(&edge_attrs);

    let missing = AttributeVector::new();
    let weight = current.get(graph.node_id(node)).unwrap_or(&missing);

    for (edge, edge_attr) in edges.iter().zip(&edge_attrs) {
        let share = attrs::divide_ignore_zero(edge_attr, &edge_total);
        let contribution = attrs::multiply(weight, &share);

        let destination = graph.node_id(graph.destination(node, edge));
        attrs::accumulate(next.entry(destination.to_string()).or_default(), &contribution);
    }
}

/// Tax every entry by `d` and refund `(1 - d) / N`
fn apply_damping(weights: &mut WeightMap, damping_factor: f64, node_count: usize) {
    let refund = (1.0 - damping_factor) / node_count as f64;
    for weight in weights.values_mut() {
        for value in weight.values_mut() {
            *value = *value * damping_factor + refund;
        }
    }
}
