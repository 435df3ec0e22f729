//! Field of View calculation
//!
//! Recursive shadowcasting over eight octants, plus the line-of-sight free
//! disc used while the player is enlightened.

use super::map::DungeonMap;
use super::position::{Position, MAP_HEIGHT, MAP_SIZE, MAP_WIDTH};
use crate::combat::status::EffectKind;
use crate::entities::player::Player;
use crate::items::item::ItemCategory;

/// Sight range on the surface
pub const SURFACE_RADIUS: i32 = 15;
/// Sight range below the surface
pub const DUNGEON_RADIUS: i32 = 6;

/// Visibility of every position on the player's current level
#[derive(Debug, Clone, PartialEq)]
pub struct FovGrid {
    visible: Vec<bool>,
}

impl Default for FovGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl FovGrid {
    pub fn new() -> Self {
        Self {
            visible: vec![false; MAP_SIZE],
        }
    }

    pub fn clear(&mut self) {
        self.visible.iter_mut().for_each(|v| *v = false);
    }

    pub fn set_visible(&mut self, x: i32, y: i32) {
        if let Some(idx) = Self::index(x, y) {
            self.visible[idx] = true;
        }
    }

    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        Self::index(x, y).is_some_and(|idx| self.visible[idx])
    }

    pub fn count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= MAP_WIDTH || y < 0 || y >= MAP_HEIGHT {
            None
        } else {
            Some((y * MAP_WIDTH + x) as usize)
        }
    }
}

/// Transform from octant-local (dx, dy) to map offsets
#[derive(Debug, Clone, Copy)]
struct Octant {
    xx: i32,
    xy: i32,
    yx: i32,
    yy: i32,
}

const OCTANTS: [Octant; 8] = [
    Octant { xx: 1, xy: 0, yx: 0, yy: 1 },
    Octant { xx: 0, xy: 1, yx: 1, yy: 0 },
    Octant { xx: 0, xy: -1, yx: 1, yy: 0 },
    Octant { xx: -1, xy: 0, yx: 0, yy: 1 },
    Octant { xx: -1, xy: 0, yx: 0, yy: -1 },
    Octant { xx: 0, xy: -1, yx: -1, yy: 0 },
    Octant { xx: 0, xy: 1, yx: -1, yy: 0 },
    Octant { xx: 1, xy: 0, yx: 0, yy: -1 },
];

/// Compute the positions visible from `origin` within `radius`.
/// The origin itself is always included.
pub fn shadowcast(map: &DungeonMap, origin: Position, radius: i32) -> Vec<Position> {
    let mut visible = vec![origin];
    for octant in OCTANTS {
        visible.extend(cast_octant(map, origin, radius, 1, 1.0, 0.0, octant));
    }
    visible.sort_by_key(|p| (p.y, p.x));
    visible.dedup();
    visible
}

/// Scan one octant from `row` outwards between the `start` and `end`
/// slopes, returning the lit positions
fn cast_octant(
    map: &DungeonMap,
    origin: Position,
    radius: i32,
    row: i32,
    mut start: f64,
    end: f64,
    octant: Octant,
) -> Vec<Position> {
    let mut lit = Vec::new();
    if start < end {
        return lit;
    }

    let radius_squared = radius * radius;
    let mut new_start = 0.0;

    for j in row..=radius {
        let dy = -j;
        let mut blocked = false;

        for dx in -j..=0 {
            let pos = Position::new(
                origin.x + dx * octant.xx + dy * octant.xy,
                origin.y + dx * octant.yx + dy * octant.yy,
                origin.z,
            );
            if !map.in_bounds(pos) {
                continue;
            }

            // Slopes of the left and right extremities of this square
            let l_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
            let r_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);

            if start < r_slope {
                continue;
            }
            if end > l_slope {
                break;
            }

            if dx * dx + dy * dy < radius_squared {
                lit.push(pos);
            }

            let opaque = !map.is_transparent(pos);
            if blocked {
                if opaque {
                    new_start = r_slope;
                    continue;
                }
                blocked = false;
                start = new_start;
            } else if opaque && j < radius {
                // Blocking square: scan the visible part behind it
                blocked = true;
                lit.extend(cast_octant(map, origin, radius, j + 1, start, l_slope, octant));
                new_start = r_slope;
            }
        }

        if blocked {
            break;
        }
    }

    lit
}

/// All valid positions within `radius` of `origin`, ignoring line of sight
pub fn disc(origin: Position, radius: i32) -> Vec<Position> {
    let mut area = Vec::new();
    for y in origin.y - radius..=origin.y + radius {
        for x in origin.x - radius..=origin.x + radius {
            let pos = Position::new(x, y, origin.z);
            if pos.is_valid() && pos.distance_squared(&origin) <= radius * radius {
                area.push(pos);
            }
        }
    }
    area
}

impl Player {
    /// Sight radius for the current level and effects
    pub fn sight_radius(&self) -> i32 {
        if self.has_effect(EffectKind::Blindness) {
            return 0;
        }
        let range = if self.pos.z == 0 {
            SURFACE_RADIUS
        } else {
            DUNGEON_RADIUS
        };
        range + self.effect_magnitude(EffectKind::Awareness)
    }

    /// Recompute visibility and refresh the memory of every visible position
    pub fn update_fov(&mut self, map: &DungeonMap) {
        self.fov.clear();

        let visible = if self.has_effect(EffectKind::Enlightenment) {
            disc(self.pos, self.effect_magnitude(EffectKind::Enlightenment))
        } else {
            shadowcast(map, self.pos, self.sight_radius())
        };

        for pos in &visible {
            self.fov.set_visible(pos.x, pos.y);
        }
        self.fov.set_visible(self.pos.x, self.pos.y);

        for pos in visible {
            self.remember_position(map, pos);
        }
    }

    /// Whether a position is currently in sight
    pub fn pos_visible(&self, pos: Position) -> bool {
        pos.z == self.pos.z && self.fov.is_visible(pos.x, pos.y)
    }

    fn remember_position(&mut self, map: &DungeonMap, pos: Position) {
        let sobject = map.sobject_at(pos);
        match sobject {
            Some(obj) if obj.is_landmark() => self.landmarks.memorize(obj, pos),
            _ => self.landmarks.forget(pos),
        }

        let items = map.items_at(pos);
        let remembered_item = items
            .iter()
            .find(|i| i.category() == ItemCategory::Gem)
            .or_else(|| items.iter().find(|i| i.category() == ItemCategory::Gold))
            .or_else(|| items.last())
            .map(|i| (i.category(), i.colour()));

        let item = remembered_item.or_else(|| {
            map.monster_at(pos)
                .filter(|m| m.kind.is_mimic() && m.unknown)
                .and_then(|m| m.disguise)
                .map(|kind| (kind.category(), kind.colour()))
        });

        if let Some(memory) = self.memory.get_mut(pos) {
            memory.tile = Some(map.tile_type_at(pos));
            memory.sobject = sobject;
            memory.item = item.map(|(category, _)| category);
            memory.item_colour = item.map_or(0, |(_, colour)| colour);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::status::Effect;
    use crate::entities::monster::{Monster, MonsterKind};
    use crate::game::state::Session;
    use crate::items::item::{GemKind, Item, ItemKind, PotionKind};
    use crate::world::tile::{StationaryObject, TileType};

    fn player_at(pos: Position) -> (Session, Player) {
        let mut session = Session::seeded(21);
        let mut player = Player::new(&mut session, "Seer", Default::default());
        player.pos = pos;
        (session, player)
    }

    #[test]
    fn test_open_room_is_lit_within_radius() {
        let map = DungeonMap::with_floor(1);
        let origin = Position::new(30, 8, 1);
        let visible = shadowcast(&map, origin, 6);
        assert!(visible.contains(&origin));
        assert!(visible.contains(&Position::new(35, 8, 1)));
        // Exactly on the radius is out of range
        assert!(!visible.contains(&Position::new(36, 8, 1)));
        for pos in &visible {
            assert!(pos.distance_squared(&origin) < 36 || *pos == origin);
        }
    }

    #[test]
    fn test_wall_casts_shadow() {
        let mut map = DungeonMap::with_floor(1);
        let origin = Position::new(20, 8, 1);
        map.set_tile(Position::new(22, 8, 1), TileType::Wall);
        let visible = shadowcast(&map, origin, 6);
        // The wall itself is seen, the tiles straight behind it are not
        assert!(visible.contains(&Position::new(22, 8, 1)));
        assert!(!visible.contains(&Position::new(23, 8, 1)));
        assert!(!visible.contains(&Position::new(25, 8, 1)));
        assert!(visible.contains(&Position::new(20, 11, 1)));

        // Diagonal shadow
        map.set_tile(Position::new(22, 10, 1), TileType::Wall);
        let visible = shadowcast(&map, origin, 6);
        assert!(visible.contains(&Position::new(22, 10, 1)));
        assert!(visible.contains(&Position::new(21, 9, 1)));
        assert!(!visible.contains(&Position::new(23, 11, 1)));
        assert!(!visible.contains(&Position::new(24, 12, 1)));
    }

    #[test]
    fn test_enlightenment_is_a_disc() {
        let (mut session, mut player) = player_at(Position::new(30, 8, 1));
        let mut map = DungeonMap::with_floor(1);
        map.set_tile(Position::new(31, 8, 1), TileType::Wall);
        player.add_effect(
            &mut session,
            Effect::new(EffectKind::Enlightenment).with_amount(4).with_turns(10),
        );
        player.update_fov(&map);

        let expected = disc(player.pos, 4);
        assert_eq!(player.fov.count(), expected.len());
        for pos in expected {
            assert!(player.pos_visible(pos));
        }
        assert!(player.pos_visible(Position::new(34, 8, 1)));
        assert!(!player.pos_visible(Position::new(35, 8, 1)));
    }

    #[test]
    fn test_blind_player_sees_only_own_tile() {
        let (mut session, mut player) = player_at(Position::new(30, 8, 1));
        player.add_effect(&mut session, Effect::new(EffectKind::Blindness).with_turns(10));
        let map = DungeonMap::with_floor(1);
        player.update_fov(&map);
        assert_eq!(player.fov.count(), 1);
        assert!(player.pos_visible(player.pos));
        assert!(!player.pos_visible(Position::new(30, 8, 2)));
    }

    #[test]
    fn test_memory_refresh() {
        let (_session, mut player) = player_at(Position::new(10, 8, 1));
        let mut map = DungeonMap::with_floor(1);

        let altar = Position::new(12, 8, 1);
        map.set_sobject(altar, Some(StationaryObject::Altar));

        let pile = Position::new(10, 10, 1);
        if let Some(items) = map.items_at_mut(pile) {
            items.push(Item::new(1, ItemKind::Potion(PotionKind::Water)));
            items.push(Item::gold(2, 40));
            items.push(Item::new(3, ItemKind::Gem(GemKind::Ruby)));
            items.push(Item::new(4, ItemKind::Potion(PotionKind::Healing)));
        }
        let top = Position::new(8, 8, 1);
        if let Some(items) = map.items_at_mut(top) {
            items.push(Item::new(5, ItemKind::Potion(PotionKind::Water)));
            items.push(Item::gold(6, 10));
        }
        let mimic_pos = Position::new(10, 6, 1);
        map.add_monster(Monster::new(MonsterKind::Mimic, mimic_pos));

        player.update_fov(&map);

        assert_eq!(
            player.memory.get(altar).and_then(|m| m.sobject),
            Some(StationaryObject::Altar)
        );
        assert_eq!(player.landmarks.len(), 1);
        assert_eq!(player.memory.get(pile).and_then(|m| m.item), Some(ItemCategory::Gem));
        assert_eq!(player.memory.get(top).and_then(|m| m.item), Some(ItemCategory::Gold));
        assert_eq!(
            player.memory.get(mimic_pos).and_then(|m| m.item),
            Some(ItemCategory::Gold)
        );

        // The altar disappears; its landmark is forgotten once seen again
        map.set_sobject(altar, None);
        player.update_fov(&map);
        assert!(player.landmarks.is_empty());
    }
}
