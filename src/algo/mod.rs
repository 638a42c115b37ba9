//! Graph queries.
//!
//! The algorithms live in the `daimidata-graph-algorithms` crate and work
//! on dense indices; this module is the adapter layer that snapshots a
//! [`LineageGraph`] into an index view and translates results back to
//! names.
//!
//! Indices are assigned in ascending name order, so the pure algorithms'
//! index tie-breaks are exactly the ascending-name tie-breaks the queries
//! promise.

use crate::graph::LineageGraph;
use daimidata_graph_algorithms as algorithms;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

// Re-export the view for callers that want the raw algorithms
pub use daimidata_graph_algorithms::LineageView;

/// Errors for query arguments that make no sense.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type QueryResult<T> = Result<T, QueryError>;

/// A supervisor → student chain through the graph.
///
/// `years[i]` is the graduation year of `names[i]`, so the two run in
/// lockstep; the first entry is `None` when the chain starts at someone
/// who never appears as a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chain {
    pub names: Vec<String>,
    pub years: Vec<Option<i32>>,
}

impl Chain {
    /// Chain length in edges.
    pub fn len(&self) -> usize {
        self.names.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.names.len() < 2
    }

    /// Graduation year of the first student on the chain.
    pub fn first_year(&self) -> Option<i32> {
        self.years.get(1).copied().flatten()
    }

    /// Graduation year of the last student on the chain.
    pub fn last_year(&self) -> Option<i32> {
        self.years.last().copied().flatten()
    }
}

/// Name-ordered snapshot of a graph plus the table to translate back.
struct Indexed<'a> {
    names: Vec<&'a str>,
    view: LineageView,
}

fn index_graph(graph: &LineageGraph) -> Indexed<'_> {
    let mut names: Vec<&str> = graph.node_names().collect();
    names.sort_unstable();
    let position: FxHashMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(idx, &name)| (name, idx))
        .collect();

    let mut edges = Vec::with_capacity(graph.edge_count());
    for supervisor in graph.all_supervisor_names() {
        let from = position[supervisor];
        for supervision in graph.outgoing(supervisor) {
            edges.push((from, position[supervision.student.as_str()]));
        }
    }

    Indexed {
        view: LineageView::from_edges(names.len(), &edges),
        names,
    }
}

fn ensure_k(k: usize) -> QueryResult<()> {
    if k == 0 {
        return Err(QueryError::InvalidArgument(
            "k must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Supervisors ranked by direct-student count, descending; ties break on
/// ascending name. Returns `min(k, supervisor count)` entries. `k` must be
/// at least 1.
pub fn top_k_supervisors(graph: &LineageGraph, k: usize) -> QueryResult<Vec<(String, usize)>> {
    ensure_k(k)?;
    let indexed = index_graph(graph);
    let ranked = algorithms::rank_top_k(&indexed.view.record_degree, k);
    Ok(ranked
        .into_iter()
        .map(|(idx, count)| (indexed.names[idx].to_string(), count))
        .collect())
}

/// Every chain achieving the global maximum length, ordered by name
/// sequence. Empty when the graph has no edges. Defect cycles shorten to
/// simple paths instead of hanging the search.
pub fn longest_chains(graph: &LineageGraph) -> Vec<Chain> {
    let indexed = index_graph(graph);
    algorithms::longest_chains(&indexed.view)
        .into_iter()
        .map(|path| {
            let names: Vec<String> = path.iter().map(|&idx| indexed.names[idx].to_string()).collect();
            let years = names.iter().map(|name| graph.graduation_year(name)).collect();
            Chain { names, years }
        })
        .collect()
}

/// Descendant-set size for every supervisor: how many distinct people each
/// one reaches through any number of supervision steps.
pub fn descendant_counts(graph: &LineageGraph) -> BTreeMap<String, usize> {
    let indexed = index_graph(graph);
    let counts = algorithms::descendant_counts(&indexed.view);
    let mut out = BTreeMap::new();
    for (idx, count) in counts.into_iter().enumerate() {
        if indexed.view.out_degree(idx) > 0 {
            out.insert(indexed.names[idx].to_string(), count);
        }
    }
    out
}

/// Supervisors ranked by descendant-set size, same ordering rule as
/// [`top_k_supervisors`]. `k` must be at least 1.
pub fn top_k_by_descendants(graph: &LineageGraph, k: usize) -> QueryResult<Vec<(String, usize)>> {
    ensure_k(k)?;
    let indexed = index_graph(graph);
    let counts = algorithms::descendant_counts(&indexed.view);
    let ranked = algorithms::rank_top_k(&counts, k);
    Ok(ranked
        .into_iter()
        .map(|(idx, count)| (indexed.names[idx].to_string(), count))
        .collect())
}
