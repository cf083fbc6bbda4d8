pub mod advance;
pub mod grant;

pub use advance::*;
pub use grant::*;
