//! Core constants and the game session context.

pub mod constants;
pub mod session;

pub use constants::*;
pub use session::*;
