//! Player and monster entities and the stat model they share.

pub mod monster;
pub mod player;
pub mod stats;

pub use monster::*;
pub use player::*;
pub use stats::*;
