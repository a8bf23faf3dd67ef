use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::RodIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidArgument,
    EmptyRod,
    InvariantViolation,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HanoiError {
    /// Rejected at the boundary before any state was touched.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The sequencer tried to move a disk off an empty rod.
    #[error("attempted to move from empty rod {from} to rod {to}")]
    EmptyRod { from: RodIndex, to: RodIndex },
    #[error("rod invariant violated: {0}")]
    InvariantViolation(String),
}

impl HanoiError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::EmptyRod { .. } => ErrorCode::EmptyRod,
            Self::InvariantViolation(_) => ErrorCode::InvariantViolation,
        }
    }

    /// Defects in sequencing or rod bookkeeping, as opposed to bad caller input.
    pub fn is_defect(&self) -> bool {
        !matches!(self, Self::InvalidArgument(_))
    }
}
