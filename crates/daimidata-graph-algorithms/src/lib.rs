//! Graph algorithms for academic lineage analysis.
//!
//! Pure, dependency-light algorithms over a dense index view of a
//! supervisor → student graph. The crate knows nothing about names,
//! records or dates; callers build a [`LineageView`] from whatever store
//! they keep and translate index results back themselves.
//!
//! Indices double as the deterministic tie-break everywhere: a caller that
//! assigns them in ascending name order gets ascending-name tie-breaks for
//! free.

pub mod chains;
pub mod common;
pub mod ranking;
pub mod reachability;

pub use chains::longest_chains;
pub use common::LineageView;
pub use ranking::rank_top_k;
pub use reachability::descendant_counts;
