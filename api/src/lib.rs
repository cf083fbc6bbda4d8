pub mod consts;
pub mod config;
pub mod error;
pub mod event;
pub mod instruction;
pub mod sdk;
pub mod state;
pub mod traits;
pub mod types;
pub mod utils;
mod macros;

pub use crate::consts::*;

pub mod prelude {
    pub use crate::consts::*;
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::event::*;
    pub use crate::instruction::*;
    pub use crate::sdk::*;
    pub use crate::state::*;
    pub use crate::traits::*;
    pub use crate::types::*;
    pub use crate::utils::*;
}
