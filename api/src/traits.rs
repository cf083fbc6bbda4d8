use chrono::Utc;

use crate::error::TransferError;
use crate::types::*;

/// Moves tokens in and out of the pool's vault.
///
/// The ledger never mints and never inspects how balances are kept; it only
/// relies on these calls either succeeding in full or failing without effect.
pub trait TokenGateway {
    /// Pull `amount` from `from` into `to`, spending an allowance `from` granted.
    fn transfer_from(
        &mut self,
        from: &Account,
        to: &Account,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Pay `amount` out of the vault to `to`.
    fn transfer(&mut self, to: &Account, amount: Amount) -> Result<(), TransferError>;

    fn balance_of(&self, account: &Account) -> Amount;
}

/// Answers capability questions and records new grants.
pub trait AccessController {
    fn has_capability(&self, capability: Capability, account: &Account) -> bool;

    /// Returns `true` when the grant is new.
    fn grant(&mut self, capability: Capability, account: &Account) -> bool;
}

/// Source of the current unix time.
pub trait Clock {
    fn unix_timestamp(&self) -> Timestamp;
}

/// Wall-clock UTC time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> Timestamp {
        Utc::now().timestamp()
    }
}
