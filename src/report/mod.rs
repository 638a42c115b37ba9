//! Result assembly.
//!
//! Plain-data structures for everything a renderer needs, and the
//! [`Report::assemble`] entry point that runs the queries. Rendering
//! itself (tables, JSON, HTML) lives with the callers.

use crate::algo::{self, Chain};
use crate::anomaly::Anomaly;
use crate::graph::LineageGraph;
use crate::record::Record;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// How much of each ranking the report keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Entries in the earliest-cohort list.
    pub first: usize,
    /// Entries in each supervisor ranking.
    pub top: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions { first: 10, top: 10 }
    }
}

/// One entry of the earliest cohort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CohortEntry {
    pub number: u32,
    pub name: String,
    pub year: i32,
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    pub title: String,
    pub supervisors: Vec<String>,
}

/// A supervisor with their direct-student count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupervisorCount {
    pub name: String,
    pub students: usize,
}

/// A supervisor with the size of their full descendant set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescendantCount {
    pub name: String,
    pub descendants: usize,
}

/// Dataset-level numbers for the report header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    /// Normalized records that entered the graph.
    pub records: usize,
    /// Distinct supervisors.
    pub supervisors: usize,
    /// Earliest and latest known defense years.
    pub year_span: Option<(i32, i32)>,
}

/// Everything a renderer needs, as plain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub stats: DatasetStats,
    pub first_cohort: Vec<CohortEntry>,
    pub top_supervisors: Vec<SupervisorCount>,
    pub longest_chains: Vec<Chain>,
    pub most_descendants: Vec<DescendantCount>,
    pub anomalies: Vec<Anomaly>,
}

/// The earliest `n` records by defense date.
///
/// Ordered by date, then student name, then record id. Dateless records
/// cannot be placed on this list; they still shape every graph-based
/// section.
pub fn first_cohort(records: &[Record], n: usize) -> Vec<CohortEntry> {
    let mut dated: Vec<(&Record, NaiveDate)> = records
        .iter()
        .filter_map(|record| record.date.map(|date| (record, date)))
        .collect();
    dated.sort_by(|(a, date_a), (b, date_b)| {
        date_a
            .cmp(date_b)
            .then_with(|| a.student.cmp(&b.student))
            .then_with(|| a.id.cmp(&b.id))
    });
    dated.truncate(n);
    dated
        .into_iter()
        .map(|(record, date)| CohortEntry {
            number: record.id,
            name: record.student.clone(),
            year: date.year(),
            date: date.to_string(),
            title: record.title.clone(),
            supervisors: record.supervisors.clone(),
        })
        .collect()
}

impl Report {
    /// Run the four queries and bundle the results.
    ///
    /// The graph queries only read the graph, so they run side by side on
    /// the rayon pool. `top` is clamped to at least 1.
    pub fn assemble(
        records: &[Record],
        graph: &LineageGraph,
        anomalies: Vec<Anomaly>,
        options: &ReportOptions,
    ) -> Report {
        let top = options.top.max(1);
        let (first, (ranked, (chains, descendants))) = rayon::join(
            || first_cohort(records, options.first),
            || {
                rayon::join(
                    || algo::top_k_supervisors(graph, top),
                    || {
                        rayon::join(
                            || algo::longest_chains(graph),
                            || algo::top_k_by_descendants(graph, top),
                        )
                    },
                )
            },
        );

        let years: Vec<i32> = records.iter().filter_map(Record::year).collect();
        let year_span = years
            .iter()
            .min()
            .copied()
            .zip(years.iter().max().copied());

        Report {
            stats: DatasetStats {
                records: records.len(),
                supervisors: graph.supervisor_count(),
                year_span,
            },
            first_cohort: first,
            top_supervisors: ranked
                .unwrap_or_default()
                .into_iter()
                .map(|(name, students)| SupervisorCount { name, students })
                .collect(),
            longest_chains: chains,
            most_descendants: descendants
                .unwrap_or_default()
                .into_iter()
                .map(|(name, descendants)| DescendantCount { name, descendants })
                .collect(),
            anomalies,
        }
    }
}
