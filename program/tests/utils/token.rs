use std::collections::HashMap;

use harvest_api::prelude::*;

/// In-memory fungible token with allowances, standing in for the real token program.
#[derive(Debug, Default)]
pub struct TokenBank {
    vault: Pubkey,
    balances: HashMap<Pubkey, u64>,
    allowances: HashMap<(Pubkey, Pubkey), u64>,
    reject_payouts: bool,
}

impl TokenBank {
    pub fn new(vault: Pubkey) -> Self {
        Self {
            vault,
            ..Default::default()
        }
    }

    pub fn mint(&mut self, to: &Pubkey, amount: u64) {
        *self.balances.entry(*to).or_default() += amount;
    }

    /// Let the vault pull up to `amount` from `owner`.
    pub fn approve(&mut self, owner: &Pubkey, amount: u64) {
        self.allowances.insert((*owner, self.vault), amount);
    }

    pub fn allowance(&self, owner: &Pubkey) -> u64 {
        self.allowances.get(&(*owner, self.vault)).copied().unwrap_or(0)
    }

    /// Make every outbound payment from the vault fail until switched off.
    pub fn reject_payouts(&mut self, reject: bool) {
        self.reject_payouts = reject;
    }

    fn debit(&mut self, from: &Pubkey, amount: u64) -> Result<(), TransferError> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(TransferError::InsufficientFunds { needed: amount, available });
        }
        self.balances.insert(*from, available - amount);
        Ok(())
    }
}

impl TokenGateway for TokenBank {
    fn transfer_from(
        &mut self,
        from: &Account,
        to: &Account,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let approved = self.allowances.get(&(*from, *to)).copied().unwrap_or(0);
        if approved < amount {
            return Err(TransferError::InsufficientAllowance { needed: amount, approved });
        }

        self.debit(from, amount)?;
        self.allowances.insert((*from, *to), approved - amount);
        self.mint(to, amount);
        Ok(())
    }

    fn transfer(&mut self, to: &Account, amount: Amount) -> Result<(), TransferError> {
        if self.reject_payouts {
            return Err(TransferError::Rejected("payouts disabled".into()));
        }

        let vault = self.vault;
        self.debit(&vault, amount)?;
        self.mint(to, amount);
        Ok(())
    }

    fn balance_of(&self, account: &Account) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }
}
