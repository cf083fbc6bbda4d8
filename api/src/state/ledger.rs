use std::collections::{BTreeSet, HashMap};

use log::debug;

use super::{EpochClock, EpochPool, GlobalState};
use crate::error::HarvestError;
use crate::types::*;
use crate::utils::*;

/// Post-deposit values computed before any tokens move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositEntry {
    pub epoch: Epoch,
    pub amount: Amount,
    pub principal: Amount,
    pub epoch_deposit: Amount,
    pub epoch_total: Amount,
    pub first_in_epoch: bool,
}

/// One participant's cut of a reward injection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Allocation {
    pub account: Account,
    pub share: Amount,
    /// The account's reward for the week once `share` is credited.
    pub reward: Amount,
}

/// A fully computed reward split for the current week.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardPlan {
    pub epoch: Epoch,
    pub amount: Amount,
    pub allocations: Vec<Allocation>,
    pub distributed: Amount,
    pub rounding_loss: Amount,
    pub pool: EpochPool,
}

/// An account's weight in the still-open week, pulled out when it withdraws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenStake {
    pub epoch: Epoch,
    pub amount: Amount,
    /// Index in the week's participant list.
    pub position: usize,
}

/// Everything removed from an account by a withdrawal, kept so it can be put back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub account: Account,
    pub principal: Amount,
    pub rewards: Vec<(Epoch, Amount)>,
    pub open_stake: Option<OpenStake>,
    pub payout: Amount,
}

impl Settlement {
    pub fn reward_total(&self) -> Amount {
        self.payout.saturating_sub(self.principal)
    }
}

/// All bookkeeping for the pool. Mutations come in prepare/commit pairs: `prepare_*`
/// runs every fallible check without touching state, `commit_*` cannot fail.
#[derive(Clone, Debug, PartialEq)]
pub struct Ledger {
    global: GlobalState,
    principal: HashMap<Account, Amount>,
    epoch_deposits: HashMap<(Account, Epoch), Amount>,
    epoch_totals: HashMap<Epoch, Amount>,
    participants: HashMap<Epoch, Vec<Account>>,
    epoch_rewards: HashMap<(Account, Epoch), Amount>,
    pending: HashMap<Account, BTreeSet<Epoch>>,
    pools: HashMap<Epoch, EpochPool>,
}

impl Ledger {
    pub fn new(vault: Account, token: Pubkey, clock: EpochClock) -> Self {
        Self::from_global(GlobalState::new(vault, token, clock))
    }

    pub(crate) fn from_global(global: GlobalState) -> Self {
        Self {
            global,
            principal: HashMap::new(),
            epoch_deposits: HashMap::new(),
            epoch_totals: HashMap::new(),
            participants: HashMap::new(),
            epoch_rewards: HashMap::new(),
            pending: HashMap::new(),
            pools: HashMap::new(),
        }
    }

    // -- Queries --

    pub fn global(&self) -> &GlobalState {
        &self.global
    }

    pub fn clock(&self) -> &EpochClock {
        &self.global.clock
    }

    pub fn vault(&self) -> Account {
        self.global.vault()
    }

    pub fn reward_token(&self) -> Pubkey {
        self.global.token()
    }

    pub fn current_week(&self) -> Epoch {
        self.global.clock.number
    }

    pub fn token_balances(&self, account: &Account) -> Amount {
        self.principal.get(account).copied().unwrap_or(0)
    }

    pub fn user_deposits_per_week(&self, account: &Account, epoch: Epoch) -> Amount {
        self.epoch_deposits.get(&(*account, epoch)).copied().unwrap_or(0)
    }

    pub fn user_rewards_per_week(&self, account: &Account, epoch: Epoch) -> Amount {
        self.epoch_rewards.get(&(*account, epoch)).copied().unwrap_or(0)
    }

    /// Rewards added during `epoch` still waiting to be attributed. Splits happen in the
    /// same call that adds them, so this reads zero once any injection has completed.
    pub fn weekly_rewards(&self, epoch: Epoch) -> Amount {
        self.pool(epoch).unattributed()
    }

    pub fn total_deposits_per_week(&self, epoch: Epoch) -> Amount {
        self.epoch_totals.get(&epoch).copied().unwrap_or(0)
    }

    /// Depositors of `epoch` in first-deposit order.
    pub fn participants(&self, epoch: Epoch) -> &[Account] {
        self.participants
            .get(&epoch)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Weeks holding unwithdrawn rewards for `account`.
    pub fn pending_epochs(&self, account: &Account) -> Vec<Epoch> {
        self.pending
            .get(account)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn pool(&self, epoch: Epoch) -> EpochPool {
        self.pools.get(&epoch).copied().unwrap_or_default()
    }

    pub fn rewards_distributed(&self, epoch: Epoch) -> Amount {
        self.pool(epoch).distributed
    }

    pub fn rounding_loss(&self, epoch: Epoch) -> Amount {
        self.pool(epoch).rounding_loss
    }

    /// Principal plus every pending reward: what a withdrawal would pay right now.
    pub fn owed(&self, account: &Account) -> Result<Amount, HarvestError> {
        let mut total = self.token_balances(account);
        for epoch in self.pending.get(account).into_iter().flatten() {
            total = checked_add(total, self.user_rewards_per_week(account, *epoch))?;
        }
        Ok(total)
    }

    // -- Week --

    pub fn advance_week(&mut self, now: Timestamp) -> Result<Epoch, HarvestError> {
        check_condition(
            !self.global.clock.still_active(now),
            HarvestError::EpochStillActive,
        )?;
        self.global.clock.advance(now)
    }

    // -- Deposits --

    pub fn prepare_deposit(
        &self,
        account: &Account,
        amount: Amount,
    ) -> Result<DepositEntry, HarvestError> {
        check_condition(amount > 0, HarvestError::InvalidAmount)?;

        let epoch = self.current_week();
        let prior = self.user_deposits_per_week(account, epoch);

        Ok(DepositEntry {
            epoch,
            amount,
            principal: checked_add(self.token_balances(account), amount)?,
            epoch_deposit: checked_add(prior, amount)?,
            epoch_total: checked_add(self.total_deposits_per_week(epoch), amount)?,
            first_in_epoch: prior == 0,
        })
    }

    pub fn commit_deposit(&mut self, account: &Account, entry: DepositEntry) {
        self.principal.insert(*account, entry.principal);
        self.epoch_deposits.insert((*account, entry.epoch), entry.epoch_deposit);
        self.epoch_totals.insert(entry.epoch, entry.epoch_total);

        if entry.first_in_epoch {
            self.participants
                .entry(entry.epoch)
                .or_default()
                .push(*account);
        }

        debug!(
            "deposit committed: account={} epoch={} amount={} principal={}",
            account, entry.epoch, entry.amount, entry.principal
        );
    }

    // -- Rewards --

    pub fn prepare_rewards(&self, amount: Amount) -> Result<RewardPlan, HarvestError> {
        check_condition(amount > 0, HarvestError::InvalidAmount)?;

        let epoch = self.current_week();
        let total = self.total_deposits_per_week(epoch);
        check_condition(total > 0, HarvestError::EmptyPool)?;

        let mut allocations = Vec::with_capacity(self.participants(epoch).len());
        let mut distributed: Amount = 0;

        for account in self.participants(epoch) {
            let weight = self.user_deposits_per_week(account, epoch);
            let share = proportional_share(amount, weight, total)?;
            let reward = checked_add(self.user_rewards_per_week(account, epoch), share)?;

            distributed = checked_add(distributed, share)?;
            allocations.push(Allocation {
                account: *account,
                share,
                reward,
            });
        }

        // Shares are floored, so their sum never exceeds the injection.
        let rounding_loss = amount
            .checked_sub(distributed)
            .ok_or(HarvestError::Overflow)?;

        let current = self.pool(epoch);
        let pool = EpochPool {
            added: checked_add(current.added, amount)?,
            distributed: checked_add(current.distributed, distributed)?,
            rounding_loss: checked_add(current.rounding_loss, rounding_loss)?,
            injections: checked_add(current.injections, 1)?,
        };

        Ok(RewardPlan {
            epoch,
            amount,
            allocations,
            distributed,
            rounding_loss,
            pool,
        })
    }

    pub fn commit_rewards(&mut self, plan: &RewardPlan) {
        for allocation in &plan.allocations {
            if allocation.share > 0 {
                self.epoch_rewards
                    .insert((allocation.account, plan.epoch), allocation.reward);
                self.pending
                    .entry(allocation.account)
                    .or_default()
                    .insert(plan.epoch);
            }
        }

        self.pools.insert(plan.epoch, plan.pool);

        debug!(
            "rewards committed: epoch={} amount={} distributed={} rounding_loss={}",
            plan.epoch, plan.amount, plan.distributed, plan.rounding_loss
        );
    }

    // -- Withdrawals --

    /// Zero the account's principal and pending rewards, returning what was removed.
    ///
    /// The account also leaves the current week's registry, so injections later in
    /// the same week are split only among capital still in the pool. Closed weeks
    /// keep their deposit history.
    pub fn settle(&mut self, account: &Account) -> Result<Settlement, HarvestError> {
        let payout = self.owed(account)?;
        check_condition(payout > 0, HarvestError::NothingToWithdraw)?;

        let principal = self.principal.remove(account).unwrap_or(0);
        let rewards = self
            .pending
            .remove(account)
            .unwrap_or_default()
            .into_iter()
            .map(|epoch| {
                let amount = self.epoch_rewards.remove(&(*account, epoch)).unwrap_or(0);
                (epoch, amount)
            })
            .collect();
        let open_stake = self.take_open_stake(account);

        Ok(Settlement {
            account: *account,
            principal,
            rewards,
            open_stake,
            payout,
        })
    }

    fn take_open_stake(&mut self, account: &Account) -> Option<OpenStake> {
        let epoch = self.current_week();
        let amount = self.user_deposits_per_week(account, epoch);
        if amount == 0 {
            return None;
        }
        let position = self.participants(epoch).iter().position(|a| a == account)?;

        self.epoch_deposits.remove(&(*account, epoch));

        let total = self.total_deposits_per_week(epoch).saturating_sub(amount);
        if total == 0 {
            self.epoch_totals.remove(&epoch);
        } else {
            self.epoch_totals.insert(epoch, total);
        }

        let emptied = match self.participants.get_mut(&epoch) {
            Some(accounts) => {
                accounts.remove(position);
                accounts.is_empty()
            }
            None => false,
        };
        if emptied {
            self.participants.remove(&epoch);
        }

        Some(OpenStake { epoch, amount, position })
    }

    /// Undo a [`Ledger::settle`] whose payout could not be delivered.
    pub fn restore(&mut self, settlement: Settlement) {
        let account = settlement.account;

        if settlement.principal > 0 {
            self.principal.insert(account, settlement.principal);
        }

        for (epoch, amount) in settlement.rewards {
            self.epoch_rewards.insert((account, epoch), amount);
            if amount > 0 {
                self.pending.entry(account).or_default().insert(epoch);
            }
        }

        if let Some(stake) = settlement.open_stake {
            self.epoch_deposits.insert((account, stake.epoch), stake.amount);
            let total = self.total_deposits_per_week(stake.epoch).saturating_add(stake.amount);
            self.epoch_totals.insert(stake.epoch, total);

            let accounts = self.participants.entry(stake.epoch).or_default();
            let position = stake.position.min(accounts.len());
            accounts.insert(position, account);
        }
    }

    // -- Persistence seam --

    pub(crate) fn principal_entries(&self) -> impl Iterator<Item = (&Account, &Amount)> {
        self.principal.iter()
    }

    pub(crate) fn epoch_deposit_entries(&self) -> impl Iterator<Item = (&(Account, Epoch), &Amount)> {
        self.epoch_deposits.iter()
    }

    pub(crate) fn epoch_total_entries(&self) -> impl Iterator<Item = (&Epoch, &Amount)> {
        self.epoch_totals.iter()
    }

    pub(crate) fn participant_entries(&self) -> impl Iterator<Item = (&Epoch, &Vec<Account>)> {
        self.participants.iter()
    }

    pub(crate) fn epoch_reward_entries(&self) -> impl Iterator<Item = (&(Account, Epoch), &Amount)> {
        self.epoch_rewards.iter()
    }

    pub(crate) fn pending_entries(&self) -> impl Iterator<Item = (&Account, &BTreeSet<Epoch>)> {
        self.pending.iter()
    }

    pub(crate) fn pool_entries(&self) -> impl Iterator<Item = (&Epoch, &EpochPool)> {
        self.pools.iter()
    }

    pub(crate) fn put_principal(&mut self, account: Account, amount: Amount) {
        self.principal.insert(account, amount);
    }

    pub(crate) fn put_epoch_deposit(&mut self, account: Account, epoch: Epoch, amount: Amount) {
        self.epoch_deposits.insert((account, epoch), amount);
    }

    pub(crate) fn put_epoch_total(&mut self, epoch: Epoch, amount: Amount) {
        self.epoch_totals.insert(epoch, amount);
    }

    pub(crate) fn put_participants(&mut self, epoch: Epoch, accounts: Vec<Account>) {
        self.participants.insert(epoch, accounts);
    }

    pub(crate) fn put_epoch_reward(&mut self, account: Account, epoch: Epoch, amount: Amount) {
        self.epoch_rewards.insert((account, epoch), amount);
    }

    pub(crate) fn put_pending(&mut self, account: Account, epochs: BTreeSet<Epoch>) {
        self.pending.insert(account, epochs);
    }

    pub(crate) fn put_pool(&mut self, epoch: Epoch, pool: EpochPool) {
        self.pools.insert(epoch, pool);
    }
}
