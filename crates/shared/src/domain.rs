use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HanoiError;

macro_rules! id_newtype {
    ($name:ident, $inner:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(SessionId, u64);

pub const ROD_COUNT: usize = 3;

/// One of the three rods, addressed by position.
///
/// Source, auxiliary and destination are roles a rod plays within a single
/// recursive call; the constants below only name the roles of the top-level
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RodIndex(u8);

impl RodIndex {
    pub const SOURCE: Self = Self(0);
    pub const AUXILIARY: Self = Self(1);
    pub const DESTINATION: Self = Self(2);

    pub const ALL: [Self; ROD_COUNT] = [Self::SOURCE, Self::AUXILIARY, Self::DESTINATION];

    pub fn new(index: u8) -> Result<Self, HanoiError> {
        if (index as usize) < ROD_COUNT {
            Ok(Self(index))
        } else {
            Err(HanoiError::invalid_argument(format!(
                "rod index {index} is outside 0..{ROD_COUNT}"
            )))
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Short label used by the terminal and window front ends.
    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "A",
            1 => "B",
            _ => "C",
        }
    }
}

impl TryFrom<u8> for RodIndex {
    type Error = HanoiError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RodIndex> for u8 {
    fn from(value: RodIndex) -> Self {
        value.0
    }
}

impl fmt::Display for RodIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A puzzle piece. Rank 1 is the smallest disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Disk(u8);

impl Disk {
    pub fn new(rank: u8) -> Self {
        Self(rank)
    }

    pub fn rank(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: RodIndex,
    pub to: RodIndex,
}

impl Move {
    pub fn new(from: RodIndex, to: RodIndex) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from.label(), self.to.label())
    }
}

/// A move that has already been applied to the rods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMove {
    /// 1-based position of this move in the full solution.
    pub move_number: u64,
    pub total_moves: u64,
    pub from: RodIndex,
    pub to: RodIndex,
    pub disk_rank: u8,
}

impl AppliedMove {
    pub fn as_move(&self) -> Move {
        Move::new(self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Running,
    Completed,
    Cancelled,
    Faulted,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Faulted)
    }
}

impl From<EndReason> for SessionState {
    fn from(value: EndReason) -> Self {
        match value {
            EndReason::Completed => Self::Completed,
            EndReason::Cancelled => Self::Cancelled,
        }
    }
}

/// Number of moves in the minimal solution for `disk_count` disks.
pub fn minimal_move_count(disk_count: u8) -> u64 {
    1u64.checked_shl(u32::from(disk_count))
        .map_or(u64::MAX, |moves| moves - 1)
}
