//! The lineage graph.
//!
//! A directed supervisor → student multigraph over canonical name strings.
//! There is no person object: the canonical name is the node identity, and
//! everything the queries need beyond topology (record ids, defense years)
//! rides on the edges or in the graduation table.

use super::edge::Supervision;
use crate::anomaly::Anomaly;
use crate::record::Record;
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors for defective supervision edges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A record names a person as their own supervisor.
    #[error("record {record}: {name} cannot supervise themselves")]
    SelfSupervision { record: u32, name: String },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Directed supervisor → student graph.
///
/// Both the node set and the adjacency lists keep insertion order, and
/// [`build`](LineageGraph::build) inserts in ascending record id, so every
/// iteration order below is reproducible for a given record set regardless
/// of input order.
#[derive(Debug, Clone, Default)]
pub struct LineageGraph {
    /// Supervisor → supervision edges, adjacency per supervisor in record
    /// id order.
    adjacency: IndexMap<String, Vec<Supervision>>,
    /// Every name seen as student or supervisor.
    nodes: IndexSet<String>,
    /// Student → defense year of their earliest record.
    graduations: FxHashMap<String, Option<i32>>,
    /// Supervision edges in total, parallel edges counted.
    edges: usize,
}

impl LineageGraph {
    pub fn new() -> Self {
        LineageGraph::default()
    }

    /// Build the graph from normalized records.
    ///
    /// Records are taken in ascending id order, so the result is the same
    /// whatever order the slice arrives in. Self-supervision edges are
    /// dropped and reported as anomalies; the rest of such a record still
    /// counts.
    pub fn build(records: &[Record]) -> (Self, Vec<Anomaly>) {
        let mut ordered: Vec<&Record> = records.iter().collect();
        ordered.sort_by_key(|record| record.id);

        let mut graph = LineageGraph::new();
        let mut anomalies = Vec::new();
        for record in ordered {
            graph.insert_record(record, &mut anomalies);
        }
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            supervisors = graph.supervisor_count(),
            "lineage graph built"
        );
        (graph, anomalies)
    }

    fn insert_record(&mut self, record: &Record, anomalies: &mut Vec<Anomaly>) {
        self.nodes.insert(record.student.clone());
        self.graduations
            .entry(record.student.clone())
            .or_insert_with(|| record.year());

        for supervisor in &record.supervisors {
            let added =
                self.add_supervision(supervisor, &record.student, record.id, record.year());
            if let Err(err) = added {
                warn!(%err, "supervision edge dropped");
                anomalies.push(Anomaly::SelfSupervision {
                    record: record.id,
                    name: supervisor.clone(),
                });
            }
        }
    }

    /// Add one supervision edge.
    ///
    /// Fails when supervisor and student are the same person. The
    /// student's year also lands in the graduation table; the first one
    /// seen wins, which under [`build`] means the lowest record id.
    ///
    /// [`build`]: LineageGraph::build
    pub fn add_supervision(
        &mut self,
        supervisor: &str,
        student: &str,
        record: u32,
        year: Option<i32>,
    ) -> GraphResult<()> {
        if supervisor == student {
            return Err(GraphError::SelfSupervision {
                record,
                name: supervisor.to_string(),
            });
        }
        self.nodes.insert(supervisor.to_string());
        self.nodes.insert(student.to_string());
        self.graduations.entry(student.to_string()).or_insert(year);
        self.adjacency
            .entry(supervisor.to_string())
            .or_default()
            .push(Supervision::new(student, record, year));
        self.edges += 1;
        Ok(())
    }

    /// Supervision edges out of a name, in record id order.
    pub fn outgoing(&self, name: &str) -> &[Supervision] {
        self.adjacency.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of records on which the name appears as a supervisor.
    ///
    /// This counts supervisions, not distinct students: supervising the
    /// same person on two records counts twice.
    pub fn direct_student_count(&self, name: &str) -> usize {
        self.outgoing(name).len()
    }

    /// Names with at least one outgoing edge.
    pub fn all_supervisor_names(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Every name in the graph, students and supervisors alike.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Defense year of the name's earliest record as a student. `None`
    /// both for unknown names and for students whose earliest record has
    /// no parsed date.
    pub fn graduation_year(&self, name: &str) -> Option<i32> {
        self.graduations.get(name).copied().flatten()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains(name)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total supervision edges, parallel edges counted.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Number of distinct supervisors.
    pub fn supervisor_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, student: &str, supervisors: &[&str], year: Option<i32>) -> Record {
        Record {
            id,
            student: student.to_string(),
            supervisors: supervisors.iter().map(|s| s.to_string()).collect(),
            date: year.and_then(|y| chrono::NaiveDate::from_ymd_opt(y, 6, 1)),
            raw_date: String::new(),
            title: String::new(),
        }
    }

    #[test]
    fn test_build_basic_graph() {
        let records = vec![
            record(1, "Bente Larsen", &["Arne Jensen"], Some(1983)),
            record(2, "Carl Holm", &["Bente Larsen", "Arne Jensen"], Some(1991)),
        ];
        let (graph, anomalies) = LineageGraph::build(&records);

        assert!(anomalies.is_empty());
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.supervisor_count(), 2);
        assert_eq!(graph.direct_student_count("Arne Jensen"), 2);
        assert_eq!(graph.direct_student_count("Bente Larsen"), 1);
        assert_eq!(graph.direct_student_count("Carl Holm"), 0);
        assert!(graph.contains("Carl Holm"));
        assert!(!graph.contains("Nobody"));
    }

    #[test]
    fn test_build_is_input_order_independent() {
        let forward = vec![
            record(1, "Bente Larsen", &["Arne Jensen"], Some(1983)),
            record(2, "Carl Holm", &["Bente Larsen"], Some(1991)),
        ];
        let mut backward = forward.clone();
        backward.reverse();

        let (a, _) = LineageGraph::build(&forward);
        let (b, _) = LineageGraph::build(&backward);

        let a_nodes: Vec<&str> = a.node_names().collect();
        let b_nodes: Vec<&str> = b.node_names().collect();
        assert_eq!(a_nodes, b_nodes);
        assert_eq!(a.outgoing("Arne Jensen"), b.outgoing("Arne Jensen"));
    }

    #[test]
    fn test_adjacency_ordered_by_record_id() {
        let records = vec![
            record(9, "Third", &["Prof"], None),
            record(2, "First", &["Prof"], None),
            record(5, "Second", &["Prof"], None),
        ];
        let (graph, _) = LineageGraph::build(&records);
        let students: Vec<&str> = graph
            .outgoing("Prof")
            .iter()
            .map(|s| s.student.as_str())
            .collect();
        assert_eq!(students, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_self_supervision_dropped_and_reported() {
        let records = vec![record(
            4,
            "Arne Jensen",
            &["Arne Jensen", "Bente Larsen"],
            Some(1979),
        )];
        let (graph, anomalies) = LineageGraph::build(&records);

        assert_eq!(
            anomalies,
            vec![Anomaly::SelfSupervision {
                record: 4,
                name: "Arne Jensen".to_string(),
            }]
        );
        // the valid edge of the same record survives
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.direct_student_count("Bente Larsen"), 1);
        assert_eq!(graph.direct_student_count("Arne Jensen"), 0);
    }

    #[test]
    fn test_parallel_records_both_kept() {
        let records = vec![
            record(1, "Bente Larsen", &["Arne Jensen"], Some(1983)),
            record(8, "Bente Larsen", &["Arne Jensen"], Some(1989)),
        ];
        let (graph, _) = LineageGraph::build(&records);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.direct_student_count("Arne Jensen"), 2);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_graduation_year_first_record_wins() {
        let records = vec![
            record(3, "Bente Larsen", &[], Some(1990)),
            record(1, "Bente Larsen", &[], Some(1983)),
        ];
        let (graph, _) = LineageGraph::build(&records);
        assert_eq!(graph.graduation_year("Bente Larsen"), Some(1983));
        assert_eq!(graph.graduation_year("Nobody"), None);
    }

    #[test]
    fn test_graduation_year_none_for_dateless_earliest() {
        let records = vec![
            record(1, "Bente Larsen", &[], None),
            record(2, "Bente Larsen", &[], Some(1990)),
        ];
        let (graph, _) = LineageGraph::build(&records);
        assert_eq!(graph.graduation_year("Bente Larsen"), None);
    }

    #[test]
    fn test_supervisor_only_names_have_no_graduation() {
        let records = vec![record(1, "Bente Larsen", &["Arne Jensen"], Some(1983))];
        let (graph, _) = LineageGraph::build(&records);
        assert!(graph.contains("Arne Jensen"));
        assert_eq!(graph.graduation_year("Arne Jensen"), None);
        assert_eq!(graph.graduation_year("Bente Larsen"), Some(1983));
    }

    #[test]
    fn test_empty_build() {
        let (graph, anomalies) = LineageGraph::build(&[]);
        assert!(graph.is_empty());
        assert!(anomalies.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.outgoing("anyone"), &[]);
    }
}
