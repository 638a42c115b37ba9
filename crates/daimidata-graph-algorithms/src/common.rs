//! Shared read-only view the algorithms operate on.

/// Dense-index snapshot of a supervisor → student graph.
///
/// Traversal works on deduplicated successor lists, so parallel supervision
/// records between the same two people count as one edge when walking. The
/// per-record multiplicity survives in [`record_degree`] for callers that
/// rank by number of supervisions rather than number of distinct students.
///
/// [`record_degree`]: LineageView::record_degree
#[derive(Debug, Clone)]
pub struct LineageView {
    /// Number of nodes in the snapshot.
    pub node_count: usize,
    /// Deduplicated successors per node, each list sorted ascending.
    pub successors: Vec<Vec<usize>>,
    /// In-degree per node over the deduplicated edge set.
    pub in_degree: Vec<usize>,
    /// Outgoing supervision records per node, parallel records counted.
    pub record_degree: Vec<usize>,
}

impl LineageView {
    /// Build a view from raw `(supervisor, student)` index pairs.
    ///
    /// `edges` may contain duplicates, one per supervision record; they
    /// collapse for traversal but stay counted in `record_degree`.
    /// Self-loops and out-of-range indices are skipped entirely.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Self {
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut record_degree = vec![0usize; node_count];
        for &(supervisor, student) in edges {
            if supervisor >= node_count || student >= node_count || supervisor == student {
                continue;
            }
            record_degree[supervisor] += 1;
            successors[supervisor].push(student);
        }

        let mut in_degree = vec![0usize; node_count];
        for list in &mut successors {
            list.sort_unstable();
            list.dedup();
            for &student in list.iter() {
                in_degree[student] += 1;
            }
        }

        LineageView {
            node_count,
            successors,
            in_degree,
            record_degree,
        }
    }

    /// Out-degree over the deduplicated edge set.
    pub fn out_degree(&self, idx: usize) -> usize {
        self.successors[idx].len()
    }
}
