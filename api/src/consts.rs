pub const ONE_SECOND: i64                  = 1;
pub const ONE_MINUTE: i64                  = 60 * ONE_SECOND;
pub const ONE_HOUR: i64                    = 60 * ONE_MINUTE;
pub const ONE_DAY: i64                     = 24 * ONE_HOUR;

pub const DAYS_PER_WEEK: i64               = 7;
pub const EPOCH_DURATION: i64              = DAYS_PER_WEEK * ONE_DAY;

// Epochs are numbered from one; zero is never a valid week.
pub const FIRST_EPOCH: u64                 = 1;

pub const ACCOUNT_LEN: usize               = 32; // Bytes
pub const EPOCH_LEN: usize                 = 8;  // Bytes
pub const AMOUNT_LEN: usize                = 8;  // Bytes

// Persisted-state column families
pub const CF_GLOBAL: &str                  = "global";
pub const CF_PRINCIPAL: &str               = "principal";
pub const CF_EPOCH_DEPOSITS: &str          = "epoch_deposits";
pub const CF_EPOCH_TOTALS: &str            = "epoch_totals";
pub const CF_PARTICIPANTS: &str            = "participants";
pub const CF_EPOCH_REWARDS: &str           = "epoch_rewards";
pub const CF_PENDING: &str                 = "pending";
pub const CF_EPOCH_POOL: &str              = "epoch_pool";
pub const CF_ROLES: &str                   = "roles";

pub const GLOBAL_KEY: &[u8]                = b"global";
