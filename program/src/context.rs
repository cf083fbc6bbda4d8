use harvest_api::prelude::*;

use crate::pool::*;
use crate::week::*;

/// A ledger bound to the collaborators it needs to move tokens, check
/// capabilities and read time.
///
/// Every operation takes `&mut self`, so operations are totally ordered and
/// none can observe another half-applied. Collaborators are owned alongside
/// the ledger rather than given a handle to it, which leaves a token callback
/// no way to re-enter the ledger mid-operation.
#[derive(Debug)]
pub struct Harvest<T, A, C> {
    pub ledger: Ledger,
    pub token: T,
    pub access: A,
    pub clock: C,
}

impl<T, C> Harvest<T, Roles, C>
where
    T: TokenGateway,
    C: Clock,
{
    /// Start a fresh ledger at week one, with the configured admin holding every capability.
    pub fn from_config(config: &HarvestConfig, token: T, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;

        let admin = config.admin()?;
        let epoch_clock = EpochClock::new(clock.unix_timestamp(), EPOCH_DURATION);
        let ledger = Ledger::new(config.vault()?, config.token()?, epoch_clock);

        Ok(Self::new(ledger, token, Roles::new(&admin), clock))
    }
}

impl<T, A, C> Harvest<T, A, C>
where
    T: TokenGateway,
    A: AccessController,
    C: Clock,
{
    pub fn new(ledger: Ledger, token: T, access: A, clock: C) -> Self {
        Self {
            ledger,
            token,
            access,
            clock,
        }
    }

    pub fn deposit(&mut self, signer: &Account, amount: Amount) -> Result<(), HarvestError> {
        process_deposit(self, signer, amount)
    }

    pub fn withdraw(&mut self, signer: &Account) -> Result<Amount, HarvestError> {
        process_withdraw(self, signer)
    }

    pub fn add_rewards(&mut self, signer: &Account, amount: Amount) -> Result<(), HarvestError> {
        process_add_rewards(self, signer, amount)
    }

    pub fn start_new_week(&mut self, signer: &Account) -> Result<Epoch, HarvestError> {
        process_start_new_week(self, signer)
    }

    pub fn grant_week_updater(
        &mut self,
        signer: &Account,
        account: &Account,
    ) -> Result<(), HarvestError> {
        process_grant_week_updater(self, signer, account)
    }

    pub fn has_capability(&self, capability: Capability, account: &Account) -> bool {
        self.access.has_capability(capability, account)
    }

    pub fn current_week(&self) -> Epoch {
        self.ledger.current_week()
    }

    pub fn token_balances(&self, account: &Account) -> Amount {
        self.ledger.token_balances(account)
    }

    pub fn user_deposits_per_week(&self, account: &Account, epoch: Epoch) -> Amount {
        self.ledger.user_deposits_per_week(account, epoch)
    }

    pub fn user_rewards_per_week(&self, account: &Account, epoch: Epoch) -> Amount {
        self.ledger.user_rewards_per_week(account, epoch)
    }

    pub fn weekly_rewards(&self, epoch: Epoch) -> Amount {
        self.ledger.weekly_rewards(epoch)
    }

    pub fn reward_token(&self) -> Pubkey {
        self.ledger.reward_token()
    }
}
