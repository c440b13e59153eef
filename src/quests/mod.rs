//! Quest objectives, turn-in and the quest catalog.

pub mod data;
pub mod logic;
pub mod types;

pub use data::*;
pub use logic::*;
pub use types::*;
