pub mod clock;
pub mod events;
pub mod token;

pub use clock::*;
pub use events::*;
pub use token::*;
