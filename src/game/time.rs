//! Global time
//!
//! The world outside the player advances through a `WorldClock` once per
//! elapsed world turn.

use crate::world::map::Dungeon;

/// Advances everything that is not the player by one world turn
pub trait WorldClock: std::fmt::Debug {
    fn advance(&mut self, dungeon: &mut Dungeon, turn: u64);
}

/// A world where nothing happens between player turns
#[derive(Debug, Clone, Copy, Default)]
pub struct StillWorld;

impl WorldClock for StillWorld {
    fn advance(&mut self, _dungeon: &mut Dungeon, _turn: u64) {}
}
