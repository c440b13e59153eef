//! Jianghu - rules engine for a turn-paced wuxia RPG.
//!
//! Combat resolution with pacing and an auto-combat policy, a ten-realm
//! cultivation ladder, heart methods and techniques, quest tracking, and the
//! item and loot generator. Map, rendering and input live elsewhere and talk
//! to the engine through [`crate::core::session::GameSession`] and the
//! [`crate::core::world::World`] trait.

pub mod character;
pub mod combat;
pub mod core;
pub mod cultivation;
pub mod items;
pub mod martial;
pub mod quests;
pub mod simulator;
