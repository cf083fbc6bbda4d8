mod epoch;
mod global;
mod ledger;
mod pool;
mod record;
mod roles;

pub use epoch::*;
pub use global::*;
pub use ledger::*;
pub use pool::*;
pub use record::*;
pub use roles::*;
