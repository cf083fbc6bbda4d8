pub mod store;

pub use store::{primary, LedgerStore, StoreError};
