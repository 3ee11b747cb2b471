//! Attributed property graph
//!
//! The in-memory graph the ranking pipeline reads from:
//! - Nodes with string ids, labels and properties
//! - Directed, typed edges with properties
//! - JSON snapshots for loading and saving whole graphs

pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use store::{GraphError, GraphResult, GraphSnapshot, GraphStore};
pub use types::{EdgeId, EdgeType, Label, NodeId};
