//! Ranking module
//!
//! The algorithms live in the `attrank-algorithms` crate.
//! This module provides the integration layer: a [`RankView`] over the
//! [`GraphStore`] and the [`rank`] pipeline driven by a [`RankConfig`].

pub mod view;

use crate::config::{EdgeBias, RankConfig};
use crate::graph::{Edge, GraphStore};
use attrank_algorithms::{
    inflate_edge_attributes, page_rank, page_rank_parallel, redistribute_node_weight,
    scale_edge_attributes, RankResult, WeightMap,
};
use rustc_hash::FxHashSet;
use tracing::{info, warn};

pub use view::{EdgeDirection, RankView, ViewOptions};

// Re-export algorithms
pub use attrank_algorithms::{
    initial_weights, AttributeVector, EdgeAccessor, EdgeRewriter, GraphAccessor, PageRankConfig, RankError,
};

/// Rank the nodes of `store`
///
/// Projects the store, builds initial weights, optionally moves weight onto
/// the central nodes and biases their edges, then runs PageRank.
pub fn rank(store: &GraphStore, config: &RankConfig) -> RankResult<WeightMap> {
    let view = RankView::new(store, &config.view);
    info!(
        "Ranking {} nodes over attributes {:?}",
        view.node_count(),
        view.attributes()
    );

    for id in &config.central_node_ids {
        if store.get_node(id).is_none() {
            warn!("Central node {} is not in the graph", id);
        }
    }

    let mut weights = initial_weights(&view);

    if let Some(target) = config.target_central_weight {
        info!(
            "Redistributing node weight toward {} central nodes (target {})",
            config.central_node_ids.len(),
            target
        );
        weights = redistribute_node_weight(&weights, target, &config.central_node_ids)?;
    }

    let view = match config.edge_bias {
        Some(bias) => {
            let central: FxHashSet<&str> = config.central_node_ids.iter().map(String::as_str).collect();
            let is_central =
                |edge: &Edge| central.contains(edge.source.as_str()) || central.contains(edge.target.as_str());
            let edges = view.view_edges();

            info!("Biasing {} edges: {:?}", edges.len(), bias);
            let biased = match bias {
                EdgeBias::Scale { multiplier } => scale_edge_attributes(&view, &edges, multiplier, is_central)?,
                EdgeBias::Inflate { magnitude } => inflate_edge_attributes(&view, &edges, magnitude, is_central)?,
            };
            view.with_overrides(biased)
        }
        None => view,
    };

    let ranks = if config.parallel {
        page_rank_parallel(&view, &weights, &config.page_rank)?
    } else {
        page_rank(&view, &weights, &config.page_rank)?
    };

    info!("Ranked {} nodes", ranks.len());
    Ok(ranks)
}

/// The `k` highest-ranked nodes for `attribute`, best first
///
/// Nodes without a value for `attribute` are skipped; ties keep node order.
pub fn top_k(weights: &WeightMap, attribute: &str, k: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = weights
        .iter()
        .filter_map(|(id, vector)| vector.get(attribute).map(|&value| (id.clone(), value)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(k);
    ranked
}
