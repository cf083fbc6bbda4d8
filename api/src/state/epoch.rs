use bytemuck::{Pod, Zeroable};

use crate::consts::*;
use crate::error::HarvestError;
use crate::types::*;

/// Current week index and the moment it began.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct EpochClock {
    pub number: u64,
    pub started_at: i64,
    pub duration: i64,
}

impl EpochClock {
    pub fn new(now: Timestamp, duration: i64) -> Self {
        Self {
            number: FIRST_EPOCH,
            started_at: now,
            duration,
        }
    }

    /// Earliest time at which the week may be advanced.
    pub fn ends_at(&self) -> Timestamp {
        self.started_at.saturating_add(self.duration)
    }

    // The clock source is coarse; a plain comparison is all the precision we claim.
    #[inline(always)]
    pub fn still_active(&self, now: Timestamp) -> bool {
        self.ends_at().gt(&now)
    }

    /// Start the next week at `now`. The caller checks `still_active` first.
    pub fn advance(&mut self, now: Timestamp) -> Result<Epoch, HarvestError> {
        self.number = self.number
            .checked_add(1)
            .ok_or(HarvestError::Overflow)?;
        self.started_at = now;
        Ok(self.number)
    }
}
