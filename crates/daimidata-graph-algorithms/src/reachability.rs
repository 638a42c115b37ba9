//! Descendant counting.
//!
//! One breadth-first walk per start node over the deduplicated successor
//! lists. Visited marks live in a stamped buffer that each rayon worker
//! reuses across starts, so the whole pass allocates a handful of buffers
//! total. Cycle members count once, and a start never counts itself even
//! when a defect cycle leads back to it.

use crate::common::LineageView;
use rayon::prelude::*;

/// Number of distinct nodes reachable from each node via outgoing edges.
///
/// Leaves (no outgoing edges) report zero without walking.
pub fn descendant_counts(view: &LineageView) -> Vec<usize> {
    (0..view.node_count)
        .into_par_iter()
        .map_init(
            || Walker::new(view.node_count),
            |walker, start| walker.count_from(view, start),
        )
        .collect()
}

struct Walker {
    visited: Vec<u32>,
    stamp: u32,
    queue: Vec<usize>,
}

impl Walker {
    fn new(node_count: usize) -> Self {
        Walker {
            visited: vec![0; node_count],
            stamp: 0,
            queue: Vec::new(),
        }
    }

    fn count_from(&mut self, view: &LineageView, start: usize) -> usize {
        if view.successors[start].is_empty() {
            return 0;
        }

        self.stamp = self.stamp.wrapping_add(1);
        if self.stamp == 0 {
            // wrapped; stale marks could alias the fresh stamp
            self.visited.fill(0);
            self.stamp = 1;
        }

        self.queue.clear();
        self.visited[start] = self.stamp;
        self.queue.push(start);

        let mut head = 0;
        let mut count = 0;
        while head < self.queue.len() {
            let current = self.queue[head];
            head += 1;
            for &next in &view.successors[current] {
                if self.visited[next] != self.stamp {
                    self.visited[next] = self.stamp;
                    self.queue.push(next);
                    count += 1;
                }
            }
        }
        count
    }
}
