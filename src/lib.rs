//! Attribute Rank
//!
//! Multi-attribute PageRank over an in-memory property graph, with helpers
//! that bias the ranking toward a chosen set of central nodes.
//!
//! # Layout
//!
//! - `attrank-algorithms`: the numeric core (attribute arithmetic, initial
//!   weights, PageRank, central-weight redistribution, edge biasing)
//! - [`graph`]: attributed property graph with JSON snapshots
//! - [`algo`]: projection of a [`GraphStore`] onto the core's accessor
//!   traits, and the [`rank`] pipeline
//! - [`config`]: YAML/JSON run configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use attrank::{rank, top_k, GraphStore, RankConfig};
//!
//! let mut store = GraphStore::new();
//! store.create_node("a", "Habit").unwrap();
//! store.create_node("b", "Habit").unwrap();
//! store.set_node_property("a", "value", 1.0).unwrap();
//! store.set_node_property("b", "value", 3.0).unwrap();
//!
//! store.create_edge("ab", "a", "b", "LINKS").unwrap();
//! store.create_edge("ba", "b", "a", "LINKS").unwrap();
//! store.set_edge_property("ab", "value", 1.0).unwrap();
//! store.set_edge_property("ba", "value", 1.0).unwrap();
//!
//! let ranks = rank(&store, &RankConfig::default()).unwrap();
//! let best = top_k(&ranks, "value", 1);
//! assert_eq!(best.len(), 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod graph;

// Re-export main types for convenience
pub use graph::{
    Edge, EdgeId, EdgeType, GraphError, GraphResult, GraphSnapshot, GraphStore, Label, Node, NodeId,
    PropertyMap, PropertyValue,
};

pub use algo::{rank, top_k, EdgeDirection, RankView, ViewOptions};

pub use config::{ConfigError, ConfigResult, EdgeBias, RankConfig};

pub use attrank_algorithms::{AttributeVector, PageRankConfig, RankError, RankResult, WeightMap};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
