//! Map memory
//!
//! What the player remembers of each level, and the landmarks found so far.

use serde::{Deserialize, Serialize};

use super::position::{Position, MAP_COUNT, MAP_SIZE};
use super::tile::{StationaryObject, TileType, TrapKind};
use crate::items::item::ItemCategory;

/// Short name of a level as shown in listings
pub fn level_name(z: i32) -> String {
    match z {
        0 => "Town".to_string(),
        1..=10 => format!("D{}", z),
        _ => format!("V{}", z - 10),
    }
}

/// The remembered state of one map position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TileMemory {
    /// None until the position has been seen
    pub tile: Option<TileType>,
    pub sobject: Option<StationaryObject>,
    /// Category of the most interesting item seen there
    pub item: Option<ItemCategory>,
    pub item_colour: u8,
    pub trap: Option<TrapKind>,
}

impl TileMemory {
    pub fn is_empty(&self) -> bool {
        *self == TileMemory::default()
    }
}

/// Per-level grid of remembered tiles
#[derive(Debug, Clone, PartialEq)]
pub struct MapMemory {
    levels: Vec<Vec<TileMemory>>,
}

impl Default for MapMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MapMemory {
    pub fn new() -> Self {
        Self {
            levels: vec![vec![TileMemory::default(); MAP_SIZE]; MAP_COUNT],
        }
    }

    pub fn get(&self, pos: Position) -> Option<&TileMemory> {
        if !pos.is_valid() {
            return None;
        }
        self.levels
            .get(pos.z as usize)
            .and_then(|level| level.get(pos.tile_index()))
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut TileMemory> {
        if !pos.is_valid() {
            return None;
        }
        self.levels
            .get_mut(pos.z as usize)
            .and_then(|level| level.get_mut(pos.tile_index()))
    }

    /// All remembered tiles of a level, row-major
    pub fn level(&self, z: usize) -> &[TileMemory] {
        self.levels.get(z).map(|l| l.as_slice()).unwrap_or(&[])
    }

    pub fn level_mut(&mut self, z: usize) -> Option<&mut Vec<TileMemory>> {
        self.levels.get_mut(z)
    }
}

/// A remembered stationary object worth finding again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landmark {
    pub pos: Position,
    pub sobject: StationaryObject,
}

/// Sparse list of remembered landmarks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LandmarkMemory {
    landmarks: Vec<Landmark>,
}

impl LandmarkMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_landmarks(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Remember an object, replacing whatever was known at that position
    pub fn memorize(&mut self, sobject: StationaryObject, pos: Position) {
        if let Some(existing) = self.landmarks.iter_mut().find(|l| l.pos == pos) {
            existing.sobject = sobject;
            return;
        }
        self.landmarks.push(Landmark { pos, sobject });
    }

    pub fn forget(&mut self, pos: Position) {
        self.landmarks.retain(|l| l.pos != pos);
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.iter()
    }

    /// Landmarks ordered by level, then object kind
    pub fn sorted(&self) -> Vec<Landmark> {
        let mut sorted = self.landmarks.clone();
        sorted.sort_by_key(|l| (l.pos.z, l.sobject));
        sorted
    }

    /// Listing of all landmarks, the level name shown once per level
    pub fn list_text(&self) -> String {
        if self.landmarks.is_empty() {
            return "You have not discovered any landmarks yet.".to_string();
        }

        let mut text = String::new();
        let mut prev_level = -1;
        for landmark in self.sorted() {
            let label = if landmark.pos.z > prev_level {
                prev_level = landmark.pos.z;
                level_name(landmark.pos.z)
            } else {
                String::new()
            };
            text.push_str(&format!(
                "{:<4} {} ({}, {})\n",
                label,
                landmark.sobject.description(),
                landmark.pos.y,
                landmark.pos.x
            ));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_grid() {
        let mut memory = MapMemory::new();
        let pos = Position::new(10, 5, 2);
        assert!(memory.get(pos).is_some_and(|m| m.is_empty()));

        if let Some(tile) = memory.get_mut(pos) {
            tile.tile = Some(TileType::Floor);
            tile.trap = Some(TrapKind::Pit);
        }
        assert_eq!(memory.get(pos).and_then(|m| m.trap), Some(TrapKind::Pit));
        assert!(memory.get(Position::new(10, 5, 3)).is_some_and(|m| m.is_empty()));
        assert!(memory.get(Position::new(-1, 5, 2)).is_none());
    }

    #[test]
    fn test_landmarks() {
        let mut landmarks = LandmarkMemory::new();
        assert!(landmarks.list_text().contains("not discovered"));

        landmarks.memorize(StationaryObject::Throne, Position::new(4, 4, 3));
        landmarks.memorize(StationaryObject::Altar, Position::new(9, 2, 3));
        landmarks.memorize(StationaryObject::Fountain, Position::new(1, 1, 1));
        landmarks.memorize(StationaryObject::EmptyThrone, Position::new(4, 4, 3));
        assert_eq!(landmarks.len(), 3);

        let sorted = landmarks.sorted();
        assert_eq!(sorted[0].sobject, StationaryObject::Fountain);
        assert_eq!(sorted[1].sobject, StationaryObject::Altar);
        assert_eq!(sorted[2].sobject, StationaryObject::EmptyThrone);

        let text = landmarks.list_text();
        assert!(text.starts_with("D1 "));
        assert_eq!(text.matches("D3").count(), 1);

        landmarks.forget(Position::new(1, 1, 1));
        assert_eq!(landmarks.len(), 2);
    }
}
