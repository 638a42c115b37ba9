//! Top-K ranking with deterministic tie-breaks.

/// Rank nodes by a per-node count, largest first.
///
/// Only nodes with a nonzero count participate. Ties break on ascending
/// index, which callers with name-ordered indices read as the
/// ascending-name rule. Returns at most `k` entries of `(index, count)`.
pub fn rank_top_k(counts: &[usize], k: usize) -> Vec<(usize, usize)> {
    let mut ranked: Vec<(usize, usize)> = counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(idx, &count)| (idx, count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}
