//! Multi-attribute PageRank
//!
//! Ranks the nodes of a weighted graph once per named attribute, with
//! helpers that bias the ranking toward a chosen set of central nodes.
//! The crate is a pure, synchronous numeric transform: graphs are read
//! through the [`GraphAccessor`] family of traits and every operation
//! returns fresh maps.

pub mod attrs;
pub mod common;
pub mod error;
pub mod pagerank;
pub mod redistribute;
pub mod weights;

pub use attrs::{AttributeVector, WeightMap};
pub use common::{EdgeAccessor, EdgeRewriter, GraphAccessor};
pub use error::{RankError, RankResult};
pub use pagerank::{page_rank, page_rank_parallel, PageRankConfig};
pub use redistribute::{
    inflate_edge_attributes, inflation_proportion, redistribute_node_weight, scale_edge_attributes,
    RedistributionSpec, MAX_PROPORTION,
};
pub use weights::initial_weights;
