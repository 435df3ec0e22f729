//! Positions and directions
//!
//! Map coordinates carry the level index so a position is meaningful on its own.

use serde::{Deserialize, Serialize};

/// Width of every dungeon level in tiles
pub const MAP_WIDTH: i32 = 67;
/// Height of every dungeon level in tiles
pub const MAP_HEIGHT: i32 = 17;
/// Number of levels, the town being level 0
pub const MAP_COUNT: usize = 16;
/// Deepest level of the caverns; the volcano lies below
pub const DUNGEON_MAX: i32 = 10;
/// Number of tiles on a single level
pub const MAP_SIZE: usize = (MAP_WIDTH * MAP_HEIGHT) as usize;

/// A coordinate on a specific dungeon level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    /// Level index (0 = town)
    pub z: i32,
}

impl Position {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Inside the map rectangle and on an existing level
    pub fn is_valid(&self) -> bool {
        self.x >= 0
            && self.x < MAP_WIDTH
            && self.y >= 0
            && self.y < MAP_HEIGHT
            && self.z >= 0
            && (self.z as usize) < MAP_COUNT
    }

    /// Index into a per-level grid (`y * MAP_WIDTH + x`)
    pub fn tile_index(&self) -> usize {
        (self.y * MAP_WIDTH + self.x) as usize
    }

    /// Neighbouring position in a direction (may be invalid)
    pub fn step(&self, dir: Direction) -> Position {
        let (dx, dy) = dir.delta();
        Position::new(self.x + dx, self.y + dy, self.z)
    }

    /// Squared euclidean distance, ignoring the level
    pub fn distance_squared(&self, other: &Position) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Chebyshev distance (diagonal moves cost 1)
    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}/{}", self.z, self.x, self.y)
    }
}

/// The eight compass directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    SouthWest,
    South,
    SouthEast,
    West,
    East,
    NorthWest,
    North,
    NorthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
        Direction::West,
        Direction::East,
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
    ];

    /// Offset on the map (y grows southwards)
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::SouthWest => (-1, 1),
            Direction::South => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::NorthWest => (-1, -1),
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(Position::new(0, 0, 0).is_valid());
        assert!(Position::new(MAP_WIDTH - 1, MAP_HEIGHT - 1, 15).is_valid());
        assert!(!Position::new(MAP_WIDTH, 0, 0).is_valid());
        assert!(!Position::new(0, -1, 0).is_valid());
        assert!(!Position::new(0, 0, MAP_COUNT as i32).is_valid());
    }

    #[test]
    fn test_step_and_distance() {
        let p = Position::new(5, 5, 1);
        assert_eq!(p.step(Direction::NorthEast), Position::new(6, 4, 1));
        assert_eq!(p.distance_squared(&Position::new(8, 9, 1)), 25);
        assert_eq!(p.chebyshev_distance(&Position::new(8, 9, 1)), 4);
    }
}
