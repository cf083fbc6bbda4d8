use num_enum::{IntoPrimitive, TryFromPrimitive};

pub use solana_program::pubkey::Pubkey;

/// Opaque participant identity.
pub type Account = Pubkey;

/// Token amount in the smallest indivisible unit.
pub type Amount = u64;

/// Week index, starting at [`crate::consts::FIRST_EPOCH`].
pub type Epoch = u64;

/// Unix timestamp in seconds.
pub type Timestamp = i64;

/// Permissions checked through an [`crate::traits::AccessController`].
#[repr(u8)]
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord,
    IntoPrimitive, TryFromPrimitive,
)]
pub enum Capability {
    /// May grant other capabilities.
    Admin = 0,
    /// May advance the week once its duration has elapsed.
    WeekUpdater = 1,
    /// May inject rewards for the current week's depositors.
    RewardDistributor = 2,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::Admin,
        Capability::WeekUpdater,
        Capability::RewardDistributor,
    ];
}
