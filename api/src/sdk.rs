use crate::instruction::*;
use crate::types::*;

pub fn build_deposit_ix(amount: Amount) -> Vec<u8> {
    Deposit {
        amount: amount.to_le_bytes(),
    }.to_bytes()
}

pub fn build_withdraw_ix() -> Vec<u8> {
    Withdraw {}.to_bytes()
}

pub fn build_add_rewards_ix(amount: Amount) -> Vec<u8> {
    AddRewards {
        amount: amount.to_le_bytes(),
    }.to_bytes()
}

pub fn build_start_new_week_ix() -> Vec<u8> {
    StartNewWeek {}.to_bytes()
}

pub fn build_grant_week_updater_ix(account: Account) -> Vec<u8> {
    GrantWeekUpdater {
        account: account.to_bytes(),
    }.to_bytes()
}
