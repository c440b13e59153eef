//! Combat system types and logic.

pub mod abilities;
pub mod logic;
pub mod policy;
pub mod types;

pub use abilities::*;
pub use logic::*;
pub use policy::*;
pub use types::*;
