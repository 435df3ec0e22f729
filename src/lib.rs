//! Delver - the player character of a Larn-style roguelike
//!
//! Everything that happens to the adventurer: attributes and effects,
//! the pack and what is worn, fighting and being hurt, seeing and
//! remembering the caverns, growing in experience and finally dying.

pub mod combat;
pub mod data;
pub mod entities;
pub mod game;
pub mod items;
pub mod progression;
pub mod save;
pub mod world;

// Re-export commonly used types
pub use data::GameConfig;
pub use entities::player::{Player, Sex};
pub use game::{DeathCause, DeathReport, Session};
pub use world::{Direction, Position};
