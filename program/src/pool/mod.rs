pub mod deposit;
pub mod rewards;
pub mod withdraw;

pub use deposit::*;
pub use rewards::*;
pub use withdraw::*;
