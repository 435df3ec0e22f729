//! Game session
//!
//! The explicit context passed to every rule that needs the dungeon, the
//! clock, the random source or the difficulty.

use super::death::DeathReport;
use super::rng::GameRng;
use super::time::{StillWorld, WorldClock};
use crate::data::GameConfig;
use crate::entities::player::Player;
use crate::items::item::ItemId;
use crate::progression::difficulty::Difficulty;
use crate::world::map::Dungeon;

/// Game turns available before the game is lost
pub const GAME_TURNS_MAX: u64 = 30000;

/// Shared state of a running game
#[derive(Debug)]
pub struct Session {
    /// Random number generator (seeded for reproducibility)
    pub rng: GameRng,
    pub difficulty: Difficulty,
    pub wizard_mode: bool,
    /// Elapsed world turns
    pub turn: u64,
    pub dungeon: Dungeon,
    /// Advances monsters and map state once per world turn
    world: Box<dyn WorldClock>,
    /// Counter for generating unique item ids
    item_id_counter: ItemId,
    game_over: Option<DeathReport>,
}

impl Session {
    /// A session following the given configuration
    pub fn new(config: &GameConfig) -> Self {
        log::info!(
            "New session (difficulty {}, wizard {}, seed {:?})",
            config.difficulty.name(),
            config.wizard_mode,
            config.seed
        );
        Self {
            rng: GameRng::new(config.seed),
            difficulty: config.difficulty,
            wizard_mode: config.wizard_mode,
            turn: 1,
            dungeon: Dungeon::new(),
            world: Box::new(StillWorld),
            item_id_counter: 0,
            game_over: None,
        }
    }

    /// A default session with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(&GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        })
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Replace the global time collaborator
    pub fn set_world(&mut self, world: Box<dyn WorldClock>) {
        self.world = world;
    }

    /// Allocate a fresh item id
    pub fn next_item_id(&mut self) -> ItemId {
        self.item_id_counter += 1;
        self.item_id_counter
    }

    /// Keep fresh ids above those of a restored player
    pub fn sync_item_ids(&mut self, player: &Player) {
        if let Some(max) = player.inventory.max_id() {
            self.item_id_counter = self.item_id_counter.max(max);
        }
    }

    /// Let one world turn pass
    pub fn spin_the_wheel(&mut self) {
        self.turn += 1;
        self.world.advance(&mut self.dungeon, self.turn);
    }

    pub fn difficulty_scalar(&self) -> i32 {
        self.difficulty.scalar()
    }

    /// The game has ended with the player's death or departure
    pub fn is_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn game_over(&self) -> Option<&DeathReport> {
        self.game_over.as_ref()
    }

    pub(crate) fn end(&mut self, report: DeathReport) {
        log::info!("Game over: {}", report.title);
        self.game_over = Some(report);
    }

    /// Turns left before time runs out
    pub fn turns_remaining(&self) -> u64 {
        GAME_TURNS_MAX.saturating_sub(self.turn)
    }
}
