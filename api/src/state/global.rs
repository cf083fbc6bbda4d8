use bytemuck::{Pod, Zeroable};

use super::EpochClock;
use crate::consts::*;
use crate::types::*;

/// Ledger-wide singleton: who holds the pooled tokens, which token, and what week it is.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct GlobalState {
    pub vault: [u8; ACCOUNT_LEN],
    pub token: [u8; ACCOUNT_LEN],
    pub clock: EpochClock,
}

impl GlobalState {
    pub fn new(vault: Account, token: Pubkey, clock: EpochClock) -> Self {
        Self {
            vault: vault.to_bytes(),
            token: token.to_bytes(),
            clock,
        }
    }

    pub fn vault(&self) -> Account {
        Pubkey::new_from_array(self.vault)
    }

    pub fn token(&self) -> Pubkey {
        Pubkey::new_from_array(self.token)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        bytemuck::bytes_of(self).to_vec()
    }

    pub fn try_read(data: &[u8]) -> Option<Self> {
        bytemuck::try_pod_read_unaligned::<Self>(data).ok()
    }
}
