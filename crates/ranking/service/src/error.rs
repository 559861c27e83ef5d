//! Errors surfaced to leaderboard callers.

use podium_skiplist::SkipListError;
use podium_store::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("invalid range: end {end} is less than start {start}")]
    InvalidRange { start: i32, end: i32 },
    #[error("score delta {delta} exceeds the allowed magnitude of {bound}")]
    ScoreOutOfBounds { delta: i64, bound: u64 },
    #[error("score of id {id} cannot absorb delta {delta} from {score}")]
    ArithmeticOverflow { id: u64, score: i64, delta: i64 },
    #[error("invalid operation: {0}")]
    InvalidOperation(SkipListError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidRange { start, end } => Self::InvalidRange { start, end },
            StoreError::ScoreOutOfBounds { delta, bound } => {
                Self::ScoreOutOfBounds { delta, bound }
            }
            StoreError::ArithmeticOverflow { id, score, delta } => {
                Self::ArithmeticOverflow { id, score, delta }
            }
            StoreError::InvalidOperation(err) => Self::InvalidOperation(err),
        }
    }
}
