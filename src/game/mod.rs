//! Game module - session state, turns and the end of the game

pub mod death;
pub mod log;
pub mod movement;
pub mod rng;
pub mod state;
pub mod time;
pub mod turn;

pub use death::{DeathCause, DeathReport};
pub use self::log::{LogEntry, MessageLog};
pub use rng::GameRng;
pub use state::{Session, GAME_TURNS_MAX};
pub use time::{StillWorld, WorldClock};
