//! Ranked value types.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// An identity and its accumulated score.
///
/// Ordered by score descending, then id ascending, so rank 1 is the highest
/// score and ties resolve to the smaller id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub id: u64,
    pub score: i64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Score and rank of one id after an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub score: i64,
    pub rank: i32,
}

/// One row of a range or window query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub id: u64,
    pub score: i64,
    pub rank: i32,
}

impl RankedEntry {
    pub(crate) fn new(entry: Entry, rank: i32) -> Self {
        Self {
            id: entry.id,
            score: entry.score,
            rank,
        }
    }
}

/// Reports a structural rank, saturating at `i32::MAX`.
pub(crate) fn to_rank(rank: usize) -> i32 {
    i32::try_from(rank).unwrap_or(i32::MAX)
}
