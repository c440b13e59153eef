//! Heart methods, core abilities, and combat techniques.

pub mod data;
pub mod heart_method;
pub mod technique;

pub use data::*;
pub use heart_method::*;
pub use technique::*;
