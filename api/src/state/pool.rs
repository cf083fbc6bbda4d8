use bytemuck::{Pod, Zeroable};

use crate::types::*;

/// Per-week totals of injected rewards.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct EpochPool {
    /// Sum of every reward injection made during the week.
    pub added: u64,
    /// Portion credited to participants.
    pub distributed: u64,
    /// Floor-division remainders, kept by the vault for good.
    pub rounding_loss: u64,
    /// Number of injections.
    pub injections: u64,
}

impl EpochPool {
    /// Rewards held for the week but not yet attributed to anyone.
    pub fn unattributed(&self) -> Amount {
        self.added
            .saturating_sub(self.distributed)
            .saturating_sub(self.rounding_loss)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        bytemuck::bytes_of(self).to_vec()
    }

    pub fn try_read(data: &[u8]) -> Option<Self> {
        bytemuck::try_pod_read_unaligned::<Self>(data).ok()
    }
}
