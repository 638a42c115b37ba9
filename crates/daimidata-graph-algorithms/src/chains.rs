//! Longest-chain search.
//!
//! Finds every longest simple directed path in a view. Lineage graphs are
//! nearly forests, so a plain DFS from every node with a path-local visited
//! set is both exact and fast here; the visited set also bounds the search
//! when defect cycles are present. Worst case is exponential on dense
//! graphs, which the few hundred nodes this runs on never approach.

use crate::common::LineageView;

/// All simple paths achieving the global maximum edge count, as index
/// sequences sorted lexicographically. Empty when the view has no edges.
pub fn longest_chains(view: &LineageView) -> Vec<Vec<usize>> {
    let n = view.node_count;
    if n == 0 {
        return Vec::new();
    }

    // Roots first. In clean data every maximal chain starts at an
    // in-degree-0 node; the remaining starts keep the search exact when a
    // cycle leaves no root on some component.
    let mut starts: Vec<usize> = (0..n).filter(|&i| view.in_degree[i] == 0).collect();
    starts.extend((0..n).filter(|&i| view.in_degree[i] > 0));

    let mut search = Search {
        view,
        on_path: vec![false; n],
        path: Vec::new(),
        best_len: 0,
        best: Vec::new(),
    };
    for start in starts {
        if view.successors[start].is_empty() {
            continue;
        }
        search.path.push(start);
        search.on_path[start] = true;
        search.walk(start);
        search.on_path[start] = false;
        search.path.pop();
    }

    let mut best = search.best;
    best.sort();
    best
}

struct Search<'a> {
    view: &'a LineageView,
    on_path: Vec<bool>,
    path: Vec<usize>,
    best_len: usize,
    best: Vec<Vec<usize>>,
}

impl Search<'_> {
    fn walk(&mut self, current: usize) {
        let view = self.view;
        for &next in &view.successors[current] {
            if self.on_path[next] {
                // a defect cycle closes here; the path stays simple
                continue;
            }
            self.path.push(next);
            self.on_path[next] = true;
            self.record();
            self.walk(next);
            self.on_path[next] = false;
            self.path.pop();
        }
    }

    fn record(&mut self) {
        let edges = self.path.len() - 1;
        if edges > self.best_len {
            self.best_len = edges;
            self.best.clear();
            self.best.push(self.path.clone());
        } else if edges == self.best_len {
            self.best.push(self.path.clone());
        }
    }
}
