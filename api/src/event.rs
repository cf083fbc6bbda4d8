use bytemuck::{Pod, Zeroable};
use num_enum::TryFromPrimitive;

use crate::consts::*;
use crate::event;

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, TryFromPrimitive)]
pub enum EventType {
    Unknown = 0,
    Deposited,
    RewardsAdded,
    Withdrawn,
    WeekStarted,
    WeekUpdaterGranted,
}

event!(EventType, Deposited);
event!(EventType, RewardsAdded);
event!(EventType, Withdrawn);
event!(EventType, WeekStarted);
event!(EventType, WeekUpdaterGranted);

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Deposited {
    pub account: [u8; ACCOUNT_LEN],
    pub epoch: u64,
    pub amount: u64,
    pub principal: u64,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RewardsAdded {
    pub epoch: u64,
    pub amount: u64,
    pub distributed: u64,
    pub participants: u64,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Withdrawn {
    pub account: [u8; ACCOUNT_LEN],
    pub principal: u64,
    pub rewards: u64,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct WeekStarted {
    pub epoch: u64,
    pub started_at: i64,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct WeekUpdaterGranted {
    pub account: [u8; ACCOUNT_LEN],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_encoding() {
        let event = RewardsAdded {
            epoch: 1,
            amount: 1000,
            distributed: 999,
            participants: 2,
        };

        let bytes = event.to_bytes();
        assert_eq!(bytes.len(), RewardsAdded::size_of());
        assert_eq!(EventType::try_from(bytes[0]).unwrap(), EventType::RewardsAdded);
        assert_eq!(RewardsAdded::try_read(&bytes).unwrap(), event);

        // A record of another type is rejected.
        let other = WeekStarted { epoch: 2, started_at: 0 }.to_bytes();
        assert!(RewardsAdded::try_read(&other).is_err());
    }
}
