//! Nearest-color ranking.
//!
//! Distances are Euclidean in RGB space. Ordering is done on the exact
//! squared distance with the catalog position as tie-breaker, so results are
//! deterministic for a given catalog order.

use rayon::prelude::*;

use crate::model::{ColorEntry, MatchResult, Rgb};

/// Catalogs at least this large score candidates on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// (squared distance, catalog index)
type Scored = (u32, usize);

fn score_sequential(query: Rgb, catalog: &[ColorEntry]) -> Vec<Scored> {
    catalog
        .iter()
        .enumerate()
        .map(|(idx, entry)| (query.distance_squared(entry.rgb), idx))
        .collect()
}

fn score_parallel(query: Rgb, catalog: &[ColorEntry]) -> Vec<Scored> {
    catalog
        .par_iter()
        .enumerate()
        .map(|(idx, entry)| (query.distance_squared(entry.rgb), idx))
        .collect()
}

/// Rank `catalog` by distance to `query`, returning at most `limit` matches.
///
/// An empty catalog or a zero limit yields no matches.
pub fn rank(query: Rgb, catalog: &[ColorEntry], limit: usize) -> Vec<MatchResult> {
    if catalog.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut scored = if catalog.len() >= PARALLEL_THRESHOLD {
        score_parallel(query, catalog)
    } else {
        score_sequential(query, catalog)
    };

    // Keys are unique (index is part of them), so an unstable partition
    // followed by a sort of the head is still deterministic.
    if limit < scored.len() {
        scored.select_nth_unstable(limit - 1);
        scored.truncate(limit);
    }
    scored.sort_unstable();

    scored
        .into_iter()
        .map(|(dist2, idx)| MatchResult::scored(&catalog[idx], f64::from(dist2).sqrt()))
        .collect()
}

/// Stateless ranker bound to a result limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceRanker {
    limit: usize,
}

impl DistanceRanker {
    pub const fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub const fn limit(&self) -> usize {
        self.limit
    }

    pub fn rank(&self, query: Rgb, catalog: &[ColorEntry]) -> Vec<MatchResult> {
        rank(query, catalog, self.limit)
    }
}
