use harvest_api::prelude::*;

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct WarpClock {
    now: i64,
}

impl WarpClock {
    pub fn at(now: i64) -> Self {
        Self { now }
    }

    pub fn warp(&mut self, seconds: i64) {
        self.now += seconds;
    }
}

impl Clock for WarpClock {
    fn unix_timestamp(&self) -> Timestamp {
        self.now
    }
}
