use std::{
    ops::RangeInclusive,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use shared::error::HanoiError;

pub const PACING_RANGE_MS: RangeInclusive<u64> = 0..=5_000;
pub const DEFAULT_PACING_MS: u64 = 500;

/// Delay between consecutive moves, shared between the controller and the
/// running session.
///
/// The driver reads the value once per move, right before sleeping, so a
/// change lands on the next delay. A delay already in progress keeps the value
/// it started with.
#[derive(Debug, Clone)]
pub struct Pacing {
    millis: Arc<AtomicU64>,
}

impl Pacing {
    pub fn new(millis: u64) -> Result<Self, HanoiError> {
        validate_pacing(millis)?;
        Ok(Self {
            millis: Arc::new(AtomicU64::new(millis)),
        })
    }

    pub fn set(&self, millis: u64) -> Result<(), HanoiError> {
        validate_pacing(millis)?;
        self.millis.store(millis, Ordering::Relaxed);
        Ok(())
    }

    pub fn millis(&self) -> u64 {
        self.millis.load(Ordering::Relaxed)
    }

    pub fn current(&self) -> Duration {
        Duration::from_millis(self.millis())
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(DEFAULT_PACING_MS)),
        }
    }
}

pub fn validate_pacing(millis: u64) -> Result<(), HanoiError> {
    if PACING_RANGE_MS.contains(&millis) {
        Ok(())
    } else {
        Err(HanoiError::invalid_argument(format!(
            "pacing {millis} ms is outside {}..={} ms",
            PACING_RANGE_MS.start(),
            PACING_RANGE_MS.end()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_value() {
        let pacing = Pacing::new(100).expect("pacing");
        let reader = pacing.clone();
        pacing.set(250).expect("set");
        assert_eq!(reader.current(), Duration::from_millis(250));
    }

    #[test]
    fn rejects_values_above_the_supported_range() {
        let pacing = Pacing::default();
        assert_eq!(pacing.millis(), DEFAULT_PACING_MS);

        let err = pacing.set(5_001).expect_err("too slow");
        assert!(matches!(err, HanoiError::InvalidArgument(_)));
        assert_eq!(pacing.millis(), DEFAULT_PACING_MS);
        assert!(Pacing::new(10_000).is_err());
    }
}
