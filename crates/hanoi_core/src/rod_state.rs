use std::ops::RangeInclusive;

use shared::{
    domain::{Disk, RodIndex, ROD_COUNT},
    error::HanoiError,
};

pub const SUPPORTED_DISK_COUNTS: RangeInclusive<u8> = 4..=10;

/// Ranks on each rod, bottom to top.
pub type RodSnapshot = [Vec<u8>; ROD_COUNT];

/// The three rods and the disks they hold.
///
/// Size ordering is not re-checked on every move: the sequencer only ever
/// produces legal moves, so `apply_move` trusts its caller on that point and
/// only refuses to pop from an empty rod. `verify` is the full audit.
#[derive(Debug, Clone, Default)]
pub struct RodState {
    rods: [Vec<Disk>; ROD_COUNT],
    disk_count: u8,
}

impl RodState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the rods and stacks `disk_count` disks on the source rod,
    /// largest at the bottom.
    pub fn reset(&mut self, disk_count: u8) -> Result<(), HanoiError> {
        if !SUPPORTED_DISK_COUNTS.contains(&disk_count) {
            return Err(HanoiError::invalid_argument(format!(
                "disk count {disk_count} is outside {}..={}",
                SUPPORTED_DISK_COUNTS.start(),
                SUPPORTED_DISK_COUNTS.end()
            )));
        }

        for rod in &mut self.rods {
            rod.clear();
        }
        let source = &mut self.rods[RodIndex::SOURCE.index()];
        source.extend((1..=disk_count).rev().map(Disk::new));
        self.disk_count = disk_count;
        Ok(())
    }

    pub fn disk_count(&self) -> u8 {
        self.disk_count
    }

    pub fn move_permitted(&self, from: RodIndex, _to: RodIndex) -> bool {
        !self.rods[from.index()].is_empty()
    }

    /// Pops the top disk of `from` and pushes it onto `to`.
    pub fn apply_move(&mut self, from: RodIndex, to: RodIndex) -> Result<Disk, HanoiError> {
        let disk = self.rods[from.index()]
            .pop()
            .ok_or(HanoiError::EmptyRod { from, to })?;
        self.rods[to.index()].push(disk);
        Ok(disk)
    }

    pub fn disks_on(&self, rod: RodIndex) -> &[Disk] {
        &self.rods[rod.index()]
    }

    pub fn top_of(&self, rod: RodIndex) -> Option<Disk> {
        self.rods[rod.index()].last().copied()
    }

    pub fn snapshot(&self) -> RodSnapshot {
        self.rods
            .each_ref()
            .map(|rod| rod.iter().map(|disk| disk.rank()).collect())
    }

    /// True when every disk sits on `destination`.
    pub fn is_solved(&self, destination: RodIndex) -> bool {
        self.rods[destination.index()].len() == usize::from(self.disk_count)
    }

    /// Checks ordering on every rod and that the rods hold exactly ranks
    /// `1..=disk_count` between them.
    pub fn verify(&self) -> Result<(), HanoiError> {
        let mut seen = vec![false; usize::from(self.disk_count)];

        for rod in RodIndex::ALL {
            let disks = self.disks_on(rod);
            if let Some(pair) = disks.windows(2).find(|pair| pair[0] <= pair[1]) {
                return Err(HanoiError::InvariantViolation(format!(
                    "disk {} rests on disk {} on rod {rod}",
                    pair[1].rank(),
                    pair[0].rank()
                )));
            }

            for disk in disks {
                // Rank 0 wraps around and misses the table like any foreign rank.
                let index = usize::from(disk.rank()).wrapping_sub(1);
                let Some(slot) = seen.get_mut(index) else {
                    return Err(HanoiError::InvariantViolation(format!(
                        "disk {} on rod {rod} is not part of a {}-disk game",
                        disk.rank(),
                        self.disk_count
                    )));
                };
                if std::mem::replace(slot, true) {
                    return Err(HanoiError::InvariantViolation(format!(
                        "disk {} appears more than once",
                        disk.rank()
                    )));
                }
            }
        }

        if let Some(missing) = seen.iter().position(|present| !present) {
            return Err(HanoiError::InvariantViolation(format!(
                "disk {} is not on any rod",
                missing + 1
            )));
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn from_ranks(ranks: [&[u8]; ROD_COUNT]) -> Self {
        let disk_count = ranks.iter().map(|rod| rod.len()).sum::<usize>() as u8;
        Self {
            rods: ranks.map(|rod| rod.iter().copied().map(Disk::new).collect()),
            disk_count,
        }
    }
}

#[cfg(test)]
#[path = "tests/rod_state_tests.rs"]
mod tests;
