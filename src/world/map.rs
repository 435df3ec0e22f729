//! Map data structure
//!
//! A dungeon level as the player core sees it: terrain, stationary objects,
//! traps, item piles and monsters at each position.

use super::position::{Position, MAP_COUNT, MAP_HEIGHT, MAP_SIZE, MAP_WIDTH};
use super::tile::{StationaryObject, TileType, TrapKind};
use crate::entities::monster::Monster;
use crate::game::rng::GameRng;
use crate::items::item::Item;

/// Everything found at one map position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tile {
    pub tile_type: TileType,
    pub sobject: Option<StationaryObject>,
    pub trap: Option<TrapKind>,
    /// Items lying here, the last one on top
    pub items: Vec<Item>,
}

impl Tile {
    pub fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            ..Default::default()
        }
    }

    pub fn is_passable(&self) -> bool {
        self.tile_type.is_passable() && self.sobject.map_or(true, |s| s.is_passable())
    }

    pub fn is_transparent(&self) -> bool {
        self.tile_type.is_transparent() && self.sobject.map_or(true, |s| s.is_transparent())
    }
}

/// A single dungeon level
#[derive(Debug, Clone)]
pub struct DungeonMap {
    /// Level index (0 = town)
    pub nlevel: i32,
    tiles: Vec<Tile>,
    monsters: Vec<Monster>,
}

impl DungeonMap {
    /// Create a level filled with walls
    pub fn new(nlevel: i32) -> Self {
        Self {
            nlevel,
            tiles: vec![Tile::new(TileType::Wall); MAP_SIZE],
            monsters: Vec::new(),
        }
    }

    /// Create an open level: floor surrounded by a wall border
    pub fn with_floor(nlevel: i32) -> Self {
        let mut map = Self::new(nlevel);
        for y in 1..MAP_HEIGHT - 1 {
            for x in 1..MAP_WIDTH - 1 {
                map.set_tile(Position::new(x, y, nlevel), TileType::Floor);
            }
        }
        map
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < MAP_WIDTH && pos.y >= 0 && pos.y < MAP_HEIGHT
    }

    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        if self.in_bounds(pos) {
            self.tiles.get(pos.tile_index())
        } else {
            None
        }
    }

    pub fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        if self.in_bounds(pos) {
            self.tiles.get_mut(pos.tile_index())
        } else {
            None
        }
    }

    /// Terrain at a position; out-of-map positions read as wall
    pub fn tile_type_at(&self, pos: Position) -> TileType {
        self.tile(pos).map_or(TileType::Wall, |t| t.tile_type)
    }

    pub fn set_tile(&mut self, pos: Position, tile_type: TileType) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.tile_type = tile_type;
        }
    }

    pub fn sobject_at(&self, pos: Position) -> Option<StationaryObject> {
        self.tile(pos).and_then(|t| t.sobject)
    }

    pub fn set_sobject(&mut self, pos: Position, sobject: Option<StationaryObject>) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.sobject = sobject;
        }
    }

    pub fn trap_at(&self, pos: Position) -> Option<TrapKind> {
        self.tile(pos).and_then(|t| t.trap)
    }

    pub fn set_trap(&mut self, pos: Position, trap: Option<TrapKind>) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.trap = trap;
        }
    }

    pub fn is_passable(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(|t| t.is_passable())
    }

    pub fn is_transparent(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(|t| t.is_transparent())
    }

    /// Item pile at a position (empty outside the map)
    pub fn items_at(&self, pos: Position) -> &[Item] {
        self.tile(pos).map(|t| t.items.as_slice()).unwrap_or(&[])
    }

    pub fn items_at_mut(&mut self, pos: Position) -> Option<&mut Vec<Item>> {
        self.tile_mut(pos).map(|t| &mut t.items)
    }

    pub fn monster_at(&self, pos: Position) -> Option<&Monster> {
        self.monsters.iter().find(|m| m.pos.x == pos.x && m.pos.y == pos.y)
    }

    pub fn monster_at_mut(&mut self, pos: Position) -> Option<&mut Monster> {
        self.monsters
            .iter_mut()
            .find(|m| m.pos.x == pos.x && m.pos.y == pos.y)
    }

    /// Place a monster; refused if the position is already occupied
    pub fn add_monster(&mut self, mut monster: Monster) -> bool {
        if self.monster_at(monster.pos).is_some() || !self.in_bounds(monster.pos) {
            return false;
        }
        monster.pos.z = self.nlevel;
        self.monsters.push(monster);
        true
    }

    pub fn remove_monster_at(&mut self, pos: Position) -> Option<Monster> {
        let idx = self
            .monsters
            .iter()
            .position(|m| m.pos.x == pos.x && m.pos.y == pos.y)?;
        Some(self.monsters.remove(idx))
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn monsters_mut(&mut self) -> &mut Vec<Monster> {
        &mut self.monsters
    }

    /// First position holding the given stationary object
    pub fn find_sobject(&self, sobject: StationaryObject) -> Option<Position> {
        self.tiles
            .iter()
            .position(|t| t.sobject == Some(sobject))
            .map(|idx| self.idx_to_pos(idx))
    }

    /// A random passable position with no monster and no stationary object
    pub fn find_space(&self, rng: &mut GameRng) -> Option<Position> {
        let free: Vec<Position> = (0..self.tiles.len())
            .map(|idx| self.idx_to_pos(idx))
            .filter(|pos| {
                self.is_passable(*pos)
                    && self.sobject_at(*pos).is_none()
                    && self.monster_at(*pos).is_none()
            })
            .collect();
        if free.is_empty() {
            return None;
        }
        let pick = rng.rand_0n(free.len() as i32) as usize;
        free.get(pick).copied()
    }

    /// Passable positions around a point that hold no monster
    pub fn free_neighbours(&self, pos: Position) -> Vec<Position> {
        super::position::Direction::ALL
            .iter()
            .map(|dir| pos.step(*dir))
            .filter(|p| self.is_passable(*p) && self.monster_at(*p).is_none())
            .collect()
    }

    fn idx_to_pos(&self, idx: usize) -> Position {
        let idx = idx as i32;
        Position::new(idx % MAP_WIDTH, idx / MAP_WIDTH, self.nlevel)
    }

    /// Plain text rendering of the level, used in death reports
    pub fn dump(&self, player_pos: Option<Position>) -> String {
        let mut text = String::with_capacity(MAP_SIZE + MAP_HEIGHT as usize);
        for y in 0..MAP_HEIGHT {
            for x in 0..MAP_WIDTH {
                let pos = Position::new(x, y, self.nlevel);
                let glyph = if player_pos.is_some_and(|p| p.x == x && p.y == y) {
                    '@'
                } else if let Some(monster) = self.monster_at(pos) {
                    monster.kind.data().image
                } else if let Some(sobject) = self.sobject_at(pos) {
                    sobject.glyph()
                } else if !self.items_at(pos).is_empty() {
                    '*'
                } else {
                    self.tile_type_at(pos).glyph()
                };
                text.push(glyph);
            }
            text.push('\n');
        }
        text
    }
}

/// All levels of the dungeon
#[derive(Debug, Clone)]
pub struct Dungeon {
    levels: Vec<DungeonMap>,
}

impl Default for Dungeon {
    fn default() -> Self {
        Self::new()
    }
}

impl Dungeon {
    /// Open levels for every level index
    pub fn new() -> Self {
        Self {
            levels: (0..MAP_COUNT as i32).map(DungeonMap::with_floor).collect(),
        }
    }

    pub fn level(&self, z: i32) -> Option<&DungeonMap> {
        if z < 0 {
            return None;
        }
        self.levels.get(z as usize)
    }

    pub fn level_mut(&mut self, z: i32) -> Option<&mut DungeonMap> {
        if z < 0 {
            return None;
        }
        self.levels.get_mut(z as usize)
    }

    /// Replace a level, e.g. with a hand-built test map
    pub fn set_level(&mut self, map: DungeonMap) {
        if let Some(slot) = self.level_mut(map.nlevel) {
            *slot = map;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::monster::MonsterKind;
    use crate::items::item::ItemKind;

    #[test]
    fn test_floor_map() {
        let map = DungeonMap::with_floor(1);
        assert!(!map.is_passable(Position::new(0, 0, 1)));
        assert!(map.is_passable(Position::new(1, 1, 1)));
        assert!(!map.is_transparent(Position::new(-1, 3, 1)));
        assert_eq!(map.tile_type_at(Position::new(100, 3, 1)), TileType::Wall);
    }

    #[test]
    fn test_stationary_objects_block() {
        let mut map = DungeonMap::with_floor(1);
        let door = Position::new(5, 5, 1);
        map.set_sobject(door, Some(StationaryObject::ClosedDoor));
        assert!(!map.is_passable(door));
        assert!(!map.is_transparent(door));
        assert_eq!(map.find_sobject(StationaryObject::ClosedDoor), Some(door));

        map.set_sobject(door, Some(StationaryObject::OpenDoor));
        assert!(map.is_passable(door));
    }

    #[test]
    fn test_monsters() {
        let mut map = DungeonMap::with_floor(2);
        let pos = Position::new(3, 3, 2);
        assert!(map.add_monster(Monster::new(MonsterKind::Orc, pos)));
        assert!(!map.add_monster(Monster::new(MonsterKind::Bat, pos)));
        assert_eq!(map.monster_at(pos).map(|m| m.kind), Some(MonsterKind::Orc));
        assert!(map.remove_monster_at(pos).is_some());
        assert!(map.monster_at(pos).is_none());
    }

    #[test]
    fn test_find_space_and_dump() {
        let mut rng = GameRng::seeded(4);
        let mut map = DungeonMap::with_floor(1);
        if let Some(items) = map.items_at_mut(Position::new(2, 1, 1)) {
            items.push(Item::new(1, ItemKind::Gold));
        }

        let space = map.find_space(&mut rng).expect("open level has space");
        assert!(map.is_passable(space));

        let dump = map.dump(Some(Position::new(1, 1, 1)));
        let second_row = dump.lines().nth(1).expect("row");
        assert!(second_row.starts_with("#@*"));
    }
}
