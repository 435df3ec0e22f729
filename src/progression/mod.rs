//! Progression systems

pub mod difficulty;
pub mod spells;
pub mod xp;

pub use difficulty::Difficulty;
pub use spells::{KnownSpell, SpellKind};
