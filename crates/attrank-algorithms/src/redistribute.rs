//! Central weight redistribution
//!
//! Biases a ranking toward a caller-chosen set of "central" nodes, either
//! by moving node mass before the ranking runs, or by rewriting the
//! attributes of edges that touch central nodes.

use crate::attrs::{self, AttributeVector, WeightMap};
use crate::common::EdgeRewriter;
use crate::error::{RankError, RankResult};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Largest central : other edge-attribute proportion reachable by inflation
pub const MAX_PROPORTION: f64 = 25.0;

/// Exponent rate mapping a magnitude in [-1, 1] onto [1/25, 25]
const INFLATION_RATE: f64 = 3.2189;

/// How much weight the central nodes should hold, and which nodes they are
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedistributionSpec {
    /// Target total for the central nodes, per attribute
    pub target_central_weight: f64,
    /// Ids of the central nodes
    pub central_ids: Vec<String>,
}

impl RedistributionSpec {
    pub fn new(target_central_weight: f64, central_ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            target_central_weight,
            central_ids: central_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Redistribute `weights` toward the central nodes
    pub fn apply(&self, weights: &WeightMap) -> RankResult<WeightMap> {
        redistribute_node_weight(weights, self.target_central_weight, &self.central_ids)
    }
}

/// Move mass from the other nodes to the central nodes until, per attribute,
/// the central nodes hold `target_central_weight` in total.
///
/// The other nodes shrink uniformly. The central nodes grow in proportion to
/// their existing weight, so a heavier central node gains more. When the
/// central nodes already hold at least the target, that attribute is left
/// unchanged. Node order is preserved.
pub fn redistribute_node_weight<S: AsRef<str>>(
    weights: &WeightMap,
    target_central_weight: f64,
    central_ids: &[S],
) -> RankResult<WeightMap> {
    if !(0.0..=1.0).contains(&target_central_weight) {
        return Err(RankError::InvalidTargetWeight(target_central_weight));
    }

    let central: FxHashSet<&str> = central_ids.iter().map(|id| id.as_ref()).collect();
    let is_central = |id: &str| central.contains(id);

    // 1. Totals on each side
    let central_total = attrs::sum_all(weights.iter().filter(|(id, _)| is_central(id.as_str())).map(|(_, w)| w));
    let other_total = attrs::sum_all(weights.iter().filter(|(id, _)| !is_central(id.as_str())).map(|(_, w)| w));

    // 2. Mass the central side is missing, never negative. Central nodes
    //    with no mass at all for an attribute have no share to grow by.
    let mut missing = attrs::map_values(&attrs::scalar_subtract(target_central_weight, &central_total), |m| m.max(0.0));
    missing.retain(|key, m| {
        let empty = central_total.get(key).copied().unwrap_or(0.0) == 0.0;
        if empty && *m > 0.0 {
            warn!("Central nodes hold no mass for attribute '{}', skipping it", key);
        }
        !empty
    });

    // 3. Fraction of the other side's mass it keeps
    let taken = attrs::divide_ignore_zero(&missing, &other_total);
    let kept = attrs::scalar_subtract(1.0, &taken);

    for (key, &m) in &missing {
        if m > 0.0 && !taken.contains_key(key) {
            warn!("No non-central mass for attribute '{}', central nodes topped up without a donor", key);
        }
    }

    debug!(
        "Redistributing toward {} central nodes, target {}",
        central.len(),
        target_central_weight
    );

    // 4. Shrink others, grow centrals by their share of the central total
    let mut out = WeightMap::with_capacity(weights.len());
    for (id, weight) in weights {
        let adjusted: AttributeVector = if is_central(id.as_str()) {
            weight
                .iter()
                .map(|(key, &value)| {
                    let earned = match (missing.get(key), central_total.get(key)) {
                        (Some(&m), Some(&total)) => m * (value / total),
                        _ => 0.0,
                    };
                    (key.clone(), value + earned)
                })
                .collect()
        } else {
            weight
                .iter()
                .map(|(key, &value)| (key.clone(), value * kept.get(key).copied().unwrap_or(1.0)))
                .collect()
        };
        out.insert(id.clone(), adjusted);
    }

    Ok(out)
}

/// Multiply every attribute of the central edges by `multiplier`
///
/// Non-central edges come back as plain copies. There is no normalization
/// across edges, so a node whose edges are all central keeps its relative
/// split.
pub fn scale_edge_attributes<R, F>(
    rewriter: &R,
    edges: &[R::Edge],
    multiplier: f64,
    is_central: F,
) -> RankResult<Vec<R::Edge>>
where
    R: EdgeRewriter,
    R::Edge: Clone,
    F: Fn(&R::Edge) -> bool,
{
    if !multiplier.is_finite() {
        return Err(RankError::InvalidMultiplier(multiplier));
    }

    Ok(edges
        .iter()
        .map(|edge| {
            if is_central(edge) {
                let scaled = attrs::multiply_scalar(&rewriter.edge_attributes(edge), multiplier);
                rewriter.override_edge_attributes(edge, &scaled)
            } else {
                edge.clone()
            }
        })
        .collect())
}

/// Map an inflation magnitude onto a central : other proportion
///
/// `magnitude` is clamped to [-1, 1]; 0 maps to 1 (equal totals), 1 to
/// [`MAX_PROPORTION`] and -1 to its reciprocal.
pub fn inflation_proportion(magnitude: f64) -> f64 {
    let magnitude = magnitude.clamp(-1.0, 1.0);
    let scale = (1.0 / MAX_PROPORTION) * (INFLATION_RATE * magnitude).exp();
    MAX_PROPORTION * scale
}

/// Rescale the central edges so that, per attribute, the sum of central edge
/// attributes over the sum of other edge attributes equals
/// [`inflation_proportion`]`(magnitude)`.
///
/// An attribute with no central or no other mass cannot be rebalanced and
/// is left untouched on every edge.
pub fn inflate_edge_attributes<R, F>(
    rewriter: &R,
    edges: &[R::Edge],
    magnitude: f64,
    is_central: F,
) -> RankResult<Vec<R::Edge>>
where
    R: EdgeRewriter,
    R::Edge: Clone,
    F: Fn(&R::Edge) -> bool,
{
    if !magnitude.is_finite() {
        return Err(RankError::InvalidMagnitude(magnitude));
    }

    let mut central_total = AttributeVector::new();
    let mut other_total = AttributeVector::new();
    for edge in edges {
        let total = if is_central(edge) { &mut central_total } else { &mut other_total };
        attrs::accumulate(total, &rewriter.edge_attributes(edge));
    }

    let target = inflation_proportion(magnitude);
    let current = attrs::divide_ignore_zero(&central_total, &other_total);
    let multipliers = attrs::scalar_divide_ignore_zero(target, &current);

    debug!("Inflating central edges toward proportion {:.4}", target);

    Ok(edges
        .iter()
        .map(|edge| {
            if is_central(edge) {
                let inflated = attrs::multiply(&rewriter.edge_attributes(edge), &multipliers);
                rewriter.override_edge_attributes(edge, &inflated)
            } else {
                edge.clone()
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::vector;

    fn uniform(ids: &[&str], value: f64) -> WeightMap {
        ids.iter().map(|id| (id.to_string(), vector([("x", value)]))).collect()
    }

    #[test]
    fn test_inflation_proportion_bounds() {
        assert!((inflation_proportion(0.0) - 1.0).abs() < 1e-12);
        assert!((inflation_proportion(1.0) - 25.0).abs() < 1e-3);
        assert!((inflation_proportion(-1.0) - 0.04).abs() < 1e-5);
        // Clamped
        assert_eq!(inflation_proportion(7.0), inflation_proportion(1.0));
        assert_eq!(inflation_proportion(-7.0), inflation_proportion(-1.0));
    }

    #[test]
    fn test_redistribute_reaches_target() {
        let weights = uniform(&["a", "b", "c", "d"], 0.25);
        let out = redistribute_node_weight(&weights, 0.5, &["b"]).unwrap();

        assert!((out["b"]["x"] - 0.5).abs() < 1e-12);
        for id in ["a", "c", "d"] {
            assert!((out[id]["x"] - 0.5 / 3.0).abs() < 1e-12);
        }
        let total: f64 = out.values().map(|w| w["x"]).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_redistribute_rejects_bad_target() {
        let weights = uniform(&["a"], 1.0);
        assert_eq!(
            redistribute_node_weight(&weights, -0.1, &["a"]),
            Err(RankError::InvalidTargetWeight(-0.1))
        );
        assert!(redistribute_node_weight(&weights, f64::NAN, &["a"]).is_err());
    }

    #[test]
    fn test_redistribute_rejects_target_above_one() {
        let weights = uniform(&["a", "b"], 0.5);
        assert_eq!(
            redistribute_node_weight(&weights, 2.0, &["a"]),
            Err(RankError::InvalidTargetWeight(2.0))
        );

        let out = redistribute_node_weight(&weights, 1.0, &["a"]).unwrap();
        assert!((out["a"]["x"] - 1.0).abs() < 1e-12);
        assert!(out["b"]["x"].abs() < 1e-12);
    }

    #[test]
    fn test_redistribute_skips_attribute_without_central_mass() {
        let mut weights = uniform(&["a", "b"], 0.5);
        weights.insert("c".into(), vector([("x", 0.0)]));

        let out = redistribute_node_weight(&weights, 0.5, &["c"]).unwrap();
        assert_eq!(out, weights);
    }
}
