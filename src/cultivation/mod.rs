//! Realm ladder and breakthroughs.

pub mod logic;
pub mod realms;

pub use logic::*;
pub use realms::*;
