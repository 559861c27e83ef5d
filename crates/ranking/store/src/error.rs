//! Ranking store errors.

use podium_skiplist::SkipListError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("invalid range: end {end} is less than start {start}")]
    InvalidRange { start: i32, end: i32 },
    #[error("score delta {delta} exceeds the allowed magnitude of {bound}")]
    ScoreOutOfBounds { delta: i64, bound: u64 },
    #[error("adding {delta} to score {score} of id {id} overflows")]
    ArithmeticOverflow { id: u64, score: i64, delta: i64 },
    #[error("invalid operation: {0}")]
    InvalidOperation(#[from] SkipListError),
}
