//! DaimiData
//!
//! Academic lineage analysis for a PhD register. The crate ingests the
//! register's flat record list (student, supervisors, defense date, title),
//! normalizes the noisy name and date cells, builds the directed
//! supervisor → student lineage graph and answers four structural
//! questions about it:
//!
//! - the earliest cohort of defenses,
//! - the most prolific supervisors by direct students,
//! - the longest supervisor → student chains,
//! - the supervisors with the largest academic descendant sets.
//!
//! Everything around that (fetching the register, rendering HTML,
//! scheduling re-runs) lives outside this crate; it takes raw records in
//! and hands plain data back, along with the list of data-quality
//! anomalies it met on the way.
//!
//! ## Example Usage
//!
//! ```rust
//! use daimidata::graph::LineageGraph;
//! use daimidata::record::{Normalizer, RawRecord};
//! use daimidata::report::{Report, ReportOptions};
//!
//! let raws = vec![
//!     RawRecord {
//!         number: 1,
//!         name: "Bente Larsen".to_string(),
//!         supervisors: "Arne Jensen".to_string(),
//!         date_raw: "17-06-1983".to_string(),
//!         title: "On Parsing".to_string(),
//!     },
//!     RawRecord {
//!         number: 2,
//!         name: "Carl Holm".to_string(),
//!         // stray whitespace is normalized away
//!         supervisors: "Bente  Larsen".to_string(),
//!         date_raw: "03-11-1991".to_string(),
//!         title: "On Graphs".to_string(),
//!     },
//! ];
//!
//! let normalizer = Normalizer::default();
//! let (records, mut anomalies) = normalizer.normalize_all(&raws);
//! let (graph, build_anomalies) = LineageGraph::build(&records);
//! anomalies.extend(build_anomalies);
//!
//! assert_eq!(graph.direct_student_count("Bente Larsen"), 1);
//!
//! let report = Report::assemble(&records, &graph, anomalies, &ReportOptions::default());
//! assert_eq!(
//!     report.longest_chains[0].names,
//!     ["Arne Jensen", "Bente Larsen", "Carl Holm"]
//! );
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod anomaly;
pub mod graph;
pub mod record;
pub mod report;

// Re-export main types for convenience
pub use anomaly::Anomaly;

pub use record::{
    AliasFileError, AliasTable, DateParser, Normalizer, RawRecord, Record, RecordError,
    RecordResult, SupervisorSplitter, YearRange,
};

pub use graph::{GraphError, GraphResult, LineageGraph, Supervision};

pub use algo::{
    descendant_counts, longest_chains, top_k_by_descendants, top_k_supervisors, Chain,
    QueryError, QueryResult,
};

pub use report::{
    first_cohort, CohortEntry, DatasetStats, DescendantCount, Report, ReportOptions,
    SupervisorCount,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
