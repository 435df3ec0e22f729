//! The player and the monsters it meets

pub mod attributes;
pub mod monster;
pub mod player;

pub use attributes::{Attribute, Attributes};
pub use monster::{Monster, MonsterKind};
pub use player::{Player, PlayerStats, Sex};
