use thiserror::Error;

use crate::types::Amount;

/// Failure reported by a [`crate::traits::TokenGateway`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("Insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds { needed: Amount, available: Amount },
    #[error("Insufficient allowance: needed {needed}, approved {approved}")]
    InsufficientAllowance { needed: Amount, approved: Amount },
    #[error("Transfer rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HarvestError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("The signer lacks the required capability")]
    Unauthorized,
    #[error("The current week has not yet elapsed")]
    EpochStillActive,
    #[error("No deposits in the current week to reward")]
    EmptyPool,
    #[error("Token transfer failed: {0}")]
    Transfer(#[from] TransferError),
    #[error("Nothing to withdraw")]
    NothingToWithdraw,

    #[error("Arithmetic overflow")]
    Overflow,
    #[error("The instruction data is invalid")]
    InvalidInstruction,
}

impl HarvestError {
    /// Stable numeric code, grouped by concern.
    pub fn code(&self) -> u32 {
        match self {
            HarvestError::InvalidAmount       => 10,
            HarvestError::Unauthorized        => 11,
            HarvestError::EpochStillActive    => 12,

            HarvestError::EmptyPool           => 20,
            HarvestError::Transfer(_)         => 21,
            HarvestError::NothingToWithdraw   => 22,

            HarvestError::Overflow            => 30,
            HarvestError::InvalidInstruction  => 31,
        }
    }
}
