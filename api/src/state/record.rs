use std::collections::BTreeSet;

use super::{EpochPool, GlobalState, Ledger};
use crate::types::*;

/// A single keyed entry of the persisted-state layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    Global(GlobalState),
    Principal { account: Account, amount: Amount },
    EpochDeposit { account: Account, epoch: Epoch, amount: Amount },
    EpochTotal { epoch: Epoch, amount: Amount },
    Participants { epoch: Epoch, accounts: Vec<Account> },
    EpochReward { account: Account, epoch: Epoch, amount: Amount },
    Pending { account: Account, epochs: Vec<Epoch> },
    Pool { epoch: Epoch, pool: EpochPool },
}

impl Ledger {
    /// Flatten the ledger into records, global state first.
    pub fn records(&self) -> Vec<Record> {
        let mut records = vec![Record::Global(*self.global())];

        records.extend(self.principal_entries().map(|(account, amount)| {
            Record::Principal { account: *account, amount: *amount }
        }));

        records.extend(self.epoch_deposit_entries().map(|((account, epoch), amount)| {
            Record::EpochDeposit { account: *account, epoch: *epoch, amount: *amount }
        }));

        records.extend(self.epoch_total_entries().map(|(epoch, amount)| {
            Record::EpochTotal { epoch: *epoch, amount: *amount }
        }));

        records.extend(self.participant_entries().map(|(epoch, accounts)| {
            Record::Participants { epoch: *epoch, accounts: accounts.clone() }
        }));

        records.extend(self.epoch_reward_entries().map(|((account, epoch), amount)| {
            Record::EpochReward { account: *account, epoch: *epoch, amount: *amount }
        }));

        records.extend(self.pending_entries().map(|(account, epochs)| {
            Record::Pending { account: *account, epochs: epochs.iter().copied().collect() }
        }));

        records.extend(self.pool_entries().map(|(epoch, pool)| {
            Record::Pool { epoch: *epoch, pool: *pool }
        }));

        records
    }

    /// Reassemble a ledger from records. Returns `None` without a global record.
    pub fn rebuild<I>(records: I) -> Option<Self>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut records: Vec<Record> = records.into_iter().collect();

        let global = records.iter().find_map(|record| match record {
            Record::Global(global) => Some(*global),
            _ => None,
        })?;

        let mut ledger = Ledger::from_global(global);

        for record in records.drain(..) {
            match record {
                Record::Global(_) => {}
                Record::Principal { account, amount } => {
                    ledger.put_principal(account, amount)
                }
                Record::EpochDeposit { account, epoch, amount } => {
                    ledger.put_epoch_deposit(account, epoch, amount)
                }
                Record::EpochTotal { epoch, amount } => {
                    ledger.put_epoch_total(epoch, amount)
                }
                Record::Participants { epoch, accounts } => {
                    ledger.put_participants(epoch, accounts)
                }
                Record::EpochReward { account, epoch, amount } => {
                    ledger.put_epoch_reward(account, epoch, amount)
                }
                Record::Pending { account, epochs } => {
                    ledger.put_pending(account, epochs.into_iter().collect::<BTreeSet<_>>())
                }
                Record::Pool { epoch, pool } => {
                    ledger.put_pool(epoch, pool)
                }
            }
        }

        Some(ledger)
    }
}
