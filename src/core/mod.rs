//! Shared plumbing: tuning constants, content tables, rejections, the
//! notification channel, the world collaborator and the game session.

pub mod constants;
pub mod content;
pub mod errors;
pub mod notify;
pub mod session;
pub mod world;

pub use constants::*;
pub use content::*;
pub use errors::*;
pub use notify::*;
pub use session::*;
pub use world::*;
