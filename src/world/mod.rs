//! World module
//!
//! Positions, tiles, the dungeon levels the player walks and what the
//! player sees and remembers of them.

pub mod fov;
pub mod map;
pub mod memory;
pub mod position;
pub mod tile;

pub use fov::FovGrid;
pub use map::{Dungeon, DungeonMap};
pub use memory::{LandmarkMemory, MapMemory, TileMemory};
pub use position::{Direction, Position};
pub use tile::{StationaryObject, TileType, TrapKind};
