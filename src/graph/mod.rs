//! The supervisor → student lineage graph.
//!
//! Directed multigraph keyed by canonical name strings, built once from a
//! batch of normalized records and read-only afterwards. Insertion order is
//! record id order everywhere, which keeps iteration reproducible.

pub mod edge;
pub mod store;

// Re-export main types
pub use edge::Supervision;
pub use store::{GraphError, GraphResult, LineageGraph};
