//! Player movement
//!
//! Walking, entering levels, doors and picking things up or putting them down.

use super::state::Session;
use crate::combat::status::EffectKind;
use crate::entities::player::Player;
use crate::items::item::{capitalize, Item, ItemCategory, ItemId};
use crate::progression::xp::a_an;
use crate::world::position::DUNGEON_MAX;
use crate::world::tile::{StationaryObject, TileType};
use crate::world::{Direction, Position};

/// Turns it takes to pick an item up and stow it
const PICKUP_TIME: u32 = 2;

impl Player {
    /// Refuse movement while overstrained or paralysed
    pub fn movement_possible(&mut self) -> bool {
        if self.has_effect(EffectKind::Overstrained) {
            self.log.add("You cannot move as long you are overstrained.");
            return false;
        }
        if self.has_effect(EffectKind::Paralysis) {
            self.log.add("You can't move!");
            return false;
        }
        true
    }

    /// Step in a direction, attacking whatever stands there. Returns the
    /// turns used; 0 if nothing happened.
    pub fn move_dir(&mut self, session: &mut Session, dir: Direction, open_door: bool) -> u32 {
        if !self.movement_possible() {
            return 0;
        }

        let dir = if self.has_effect(EffectKind::Confusion) {
            Direction::ALL[session.rng.rand_0n(Direction::ALL.len() as i32) as usize]
        } else {
            dir
        };

        let target = self.pos.step(dir);
        if !target.is_valid() {
            return 0;
        }
        let Some(map) = session.dungeon.level(self.pos.z) else {
            return 0;
        };

        if !map.is_passable(target) {
            let tile_type = map.tile_type_at(target);
            if self.has_effect(EffectKind::Blindness) || self.has_effect(EffectKind::Confusion) {
                if let Some(memory) = self.memory.get_mut(target) {
                    memory.tile = Some(tile_type);
                }
                self.log
                    .add(format!("Ouch! You bump into {}!", tile_type.description()));
                return 1;
            }
            if open_door && map.sobject_at(target) == Some(StationaryObject::ClosedDoor) {
                return self.open_door(session, dir);
            }
            if tile_type != TileType::Wall || !self.has_effect(EffectKind::WallWalk) {
                return 0;
            }
        }

        if let Some(monster) = map.monster_at(target) {
            if monster.unknown {
                let name = monster.name();
                if let Some(m) = session
                    .dungeon
                    .level_mut(self.pos.z)
                    .and_then(|map| map.monster_at_mut(target))
                {
                    m.unknown = false;
                }
                self.log.add(format!("Wait! That is a {}!", name));
                return 1;
            }
            return self.attack(session, target);
        }

        let trap = map.trap_at(target);
        let sobject = map.sobject_at(target);
        let has_items = !map.items_at(target).is_empty();

        self.pos = target;

        if let Some(trap) = trap {
            if let Some(memory) = self.memory.get_mut(target) {
                memory.trap = Some(trap);
            }
            self.log.add(format!(
                "There is {} {} here.",
                a_an(trap.description()),
                trap.description()
            ));
        }

        if has_items {
            self.autopickup(session);
        }

        if let Some(sobject) = sobject {
            self.log.add(format!("You see {} here.", sobject.description()));
        }

        if let Some(map) = session.dungeon.level(self.pos.z) {
            self.update_fov(map);
        }
        1
    }

    /// Open the door in a direction
    pub fn open_door(&mut self, session: &mut Session, dir: Direction) -> u32 {
        let target = self.pos.step(dir);
        let Some(map) = session.dungeon.level_mut(self.pos.z) else {
            return 0;
        };
        if map.sobject_at(target) != Some(StationaryObject::ClosedDoor) {
            self.log.add("You see no door there.");
            return 0;
        }
        map.set_sobject(target, Some(StationaryObject::OpenDoor));
        self.log.add("You open the door.");
        self.update_fov(map);
        1
    }

    /// Arrive on a level, either by stairs and shafts or teleported to a
    /// random spot. Returns false if no arrival position exists.
    pub fn enter_map(&mut self, session: &mut Session, nlevel: i32, teleported: bool) -> bool {
        let from = self.pos.z;
        let Some(map) = session.dungeon.level(nlevel) else {
            return false;
        };

        let arrival = if teleported {
            None
        } else if nlevel == 0 && session.turn == 1 {
            map.find_sobject(StationaryObject::Home)
        } else if from == 0 && nlevel == DUNGEON_MAX {
            map.find_sobject(StationaryObject::ElevatorUp)
        } else if from == DUNGEON_MAX && nlevel == 0 {
            map.find_sobject(StationaryObject::ElevatorDown)
        } else if from > nlevel {
            if nlevel == 0 {
                map.find_sobject(StationaryObject::DungeonEntrance)
            } else {
                map.find_sobject(StationaryObject::StairsDown)
            }
        } else if nlevel > from {
            if nlevel == 1 {
                map.find_sobject(StationaryObject::DungeonExit)
            } else {
                map.find_sobject(StationaryObject::StairsUp)
            }
        } else {
            None
        };

        let Some(pos) = arrival.or_else(|| map.find_space(&mut session.rng)) else {
            log::warn!("No arrival position on level {}", nlevel);
            return false;
        };

        self.stats.deepest_level = self.stats.deepest_level.max(nlevel.max(0) as u32);

        if nlevel == 0 {
            if session.turn > 1 {
                self.log.add("You return to town.");
            }
        } else if nlevel == 1 && from == 0 {
            self.log.add("You enter the caverns of Larn.");
        }

        self.pos = pos;
        log::debug!("{} entered level {} at {}", self.name, nlevel, pos);

        let Some(map) = session.dungeon.level_mut(nlevel) else {
            return false;
        };

        // Make room if a monster stands on the arrival tile
        if map.monster_at(pos).is_some() {
            if let Some(space) = map.find_space(&mut session.rng) {
                if let Some(monster) = map.monster_at_mut(pos) {
                    monster.pos = space;
                }
            }
        }

        self.update_fov(map);
        self.autopickup(session);
        true
    }

    /// Pick up every item on the floor. Returns the turns used.
    pub fn pickup(&mut self, session: &mut Session) -> u32 {
        let ids: Vec<ItemId> = session
            .dungeon
            .level(self.pos.z)
            .map(|map| map.items_at(self.pos).iter().map(|i| i.id).collect())
            .unwrap_or_default();

        if ids.is_empty() {
            self.log.add("There is nothing here.");
            return 0;
        }
        ids.into_iter()
            .map(|id| self.pickup_item(session, id))
            .sum()
    }

    /// Pick up one item from the floor
    pub fn pickup_item(&mut self, session: &mut Session, id: ItemId) -> u32 {
        let pos = self.pos;
        let Some(floor) = session
            .dungeon
            .level_mut(pos.z)
            .and_then(|map| map.items_at_mut(pos))
        else {
            return 0;
        };
        let Some(idx) = floor.iter().position(|i| i.id == id) else {
            return 0;
        };

        let item = floor.remove(idx);
        let desc = item.describe(self.item_type_known(&item));
        match self.add_to_inventory(item) {
            Ok(_) => {
                self.log.add(format!("You pick up {}.", desc));
                PICKUP_TIME
            }
            Err(item) => {
                floor.insert(idx, item);
                0
            }
        }
    }

    /// Pick up items of the configured categories, mentioning what was left
    pub fn autopickup(&mut self, session: &mut Session) {
        let pos = self.pos;
        let floor: Vec<(ItemId, ItemCategory)> = session
            .dungeon
            .level(pos.z)
            .map(|map| map.items_at(pos).iter().map(|i| (i.id, i.category())).collect())
            .unwrap_or_default();

        let mut picked = false;
        for (id, category) in floor {
            if self.settings.auto_pickup.contains(&category) && self.pickup_item(session, id) > 0 {
                picked = true;
            }
        }
        if !picked {
            return;
        }

        let left: Vec<Item> = session
            .dungeon
            .level(pos.z)
            .map(|map| map.items_at(pos).to_vec())
            .unwrap_or_default();
        match left.as_slice() {
            [] => {}
            [item] => {
                let desc = item.describe(self.item_type_known(item));
                let verb = if item.count == 1 { "is" } else { "are" };
                self.log.add(format!("There {} {} here.", verb, desc));
            }
            items => self
                .log
                .add(format!("There are {} more items here.", items.len())),
        }
    }

    /// Describe the auto-pickup setting
    pub fn autopickup_text(&self) -> String {
        let enabled: Vec<&str> = ItemCategory::ALL
            .iter()
            .filter(|c| self.settings.auto_pickup.contains(c))
            .map(|c| c.plural_name())
            .collect();
        if enabled.is_empty() {
            "Auto-pickup is not enabled.".to_string()
        } else {
            format!("Auto-pickup is enabled for {}.", enabled.join(", "))
        }
    }

    /// Put an item from the pack on the floor. Equipped items stay put.
    pub fn drop_item(&mut self, session: &mut Session, id: ItemId) -> u32 {
        if self.item_is_equipped(id).is_some() {
            return 0;
        }
        let Some(desc) = self
            .inventory
            .get(id)
            .map(|item| item.describe(self.item_type_known(item)))
        else {
            return 0;
        };
        self.log.add(format!("You drop {}.", desc));

        let Some(mut item) = self.remove_from_inventory(id) else {
            return 0;
        };

        let pos = self.pos;
        let on_altar = session
            .dungeon
            .level(pos.z)
            .and_then(|map| map.sobject_at(pos))
            == Some(StationaryObject::Altar);
        if on_altar && (!self.has_effect(EffectKind::Blindness) || session.wizard_mode) {
            let desc = capitalize(&item.describe(self.item_type_known(&item)));
            if item.cursed {
                self.log.add(format!("{} is surrounded by a black halo.", desc));
            }
            if item.blessed {
                self.log.add(format!("{} is surrounded by a white halo.", desc));
            }
            item.blessed_known = true;
        }

        match session
            .dungeon
            .level_mut(pos.z)
            .and_then(|map| map.items_at_mut(pos))
        {
            Some(floor) => floor.push(item),
            None => log::warn!("Item {} dropped outside the map", id),
        }
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::status::Effect;
    use crate::entities::monster::{Monster, MonsterKind};
    use crate::items::equipment::EquipSlot;
    use crate::items::item::{GemKind, ItemKind, PotionKind};
    use crate::world::map::DungeonMap;
    use crate::world::tile::TrapKind;

    fn player() -> (Session, Player) {
        let mut session = Session::seeded(61);
        let mut player = Player::new(&mut session, "Walker", Default::default());
        player.settings.auto_pickup = [ItemCategory::Gold, ItemCategory::Gem].into_iter().collect();
        player.pos = Position::new(10, 5, 1);
        (session, player)
    }

    fn level(session: &mut Session) -> &mut DungeonMap {
        session.dungeon.level_mut(1).expect("level 1")
    }

    #[test]
    fn test_walk_and_walls() {
        let (mut session, mut player) = player();
        assert_eq!(player.move_dir(&mut session, Direction::East, false), 1);
        assert_eq!(player.pos, Position::new(11, 5, 1));

        level(&mut session).set_tile(Position::new(12, 5, 1), TileType::Wall);
        assert_eq!(player.move_dir(&mut session, Direction::East, false), 0);
        assert_eq!(player.pos, Position::new(11, 5, 1));

        player.add_effect(&mut session, Effect::new(EffectKind::WallWalk).with_turns(10));
        assert_eq!(player.move_dir(&mut session, Direction::East, false), 1);
        assert_eq!(player.pos, Position::new(12, 5, 1));
    }

    #[test]
    fn test_movement_refused() {
        let (mut session, mut player) = player();
        player.add_effect(&mut session, Effect::new(EffectKind::Paralysis));
        assert_eq!(player.move_dir(&mut session, Direction::East, false), 0);
        assert!(player.log.contains("You can't move!"));
        assert_eq!(player.pos, Position::new(10, 5, 1));
    }

    #[test]
    fn test_blind_bump() {
        let (mut session, mut player) = player();
        let wall = Position::new(10, 4, 1);
        level(&mut session).set_tile(wall, TileType::Wall);
        player.add_effect(&mut session, Effect::new(EffectKind::Blindness));
        assert_eq!(player.move_dir(&mut session, Direction::North, false), 1);
        assert_eq!(player.pos, Position::new(10, 5, 1));
        assert_eq!(player.memory.get(wall).and_then(|m| m.tile), Some(TileType::Wall));
        assert!(player.log.contains("Ouch! You bump into the wall!"));
    }

    #[test]
    fn test_doors() {
        let (mut session, mut player) = player();
        let door = Position::new(11, 5, 1);
        level(&mut session).set_sobject(door, Some(StationaryObject::ClosedDoor));
        assert_eq!(player.move_dir(&mut session, Direction::East, false), 0);
        assert_eq!(player.move_dir(&mut session, Direction::East, true), 1);
        assert_eq!(
            session.dungeon.level(1).and_then(|m| m.sobject_at(door)),
            Some(StationaryObject::OpenDoor)
        );
        assert_eq!(player.move_dir(&mut session, Direction::East, false), 1);
        assert!(player.log.contains("You see an open door here."));
    }

    #[test]
    fn test_mimic_revealed() {
        let (mut session, mut player) = player();
        let target = Position::new(11, 5, 1);
        level(&mut session).add_monster(Monster::new(MonsterKind::Mimic, target));
        assert_eq!(player.move_dir(&mut session, Direction::East, false), 1);
        assert_eq!(player.pos, Position::new(10, 5, 1));
        assert!(player.log.contains("Wait! That is a mimic!"));
        let mimic = session.dungeon.level(1).and_then(|m| m.monster_at(target)).expect("mimic");
        assert!(!mimic.unknown);
    }

    #[test]
    fn test_trap_is_remembered() {
        let (mut session, mut player) = player();
        let target = Position::new(11, 5, 1);
        level(&mut session).set_trap(target, Some(TrapKind::Pit));
        player.move_dir(&mut session, Direction::East, false);
        assert_eq!(player.memory.get(target).and_then(|m| m.trap), Some(TrapKind::Pit));
    }

    #[test]
    fn test_autopickup() {
        let (mut session, mut player) = player();
        let target = Position::new(11, 5, 1);
        let gold = Item::gold(session.next_item_id(), 25);
        let gem = Item::new(session.next_item_id(), ItemKind::Gem(GemKind::Ruby));
        let potion = Item::new(session.next_item_id(), ItemKind::Potion(PotionKind::Healing));
        if let Some(floor) = level(&mut session).items_at_mut(target) {
            floor.extend([gold, gem, potion]);
        }

        player.move_dir(&mut session, Direction::East, false);
        assert_eq!(player.gold(), 25);
        assert_eq!(player.inventory.items_of_category(ItemCategory::Gem).len(), 1);
        let floor = session.dungeon.level(1).expect("level").items_at(target);
        assert_eq!(floor.len(), 1);
        assert!(player.log.iter().any(|e| e.message.starts_with("There is")));
    }

    #[test]
    fn test_pickup_and_drop() {
        let (mut session, mut player) = player();
        assert_eq!(player.pickup(&mut session), 0);
        assert!(player.log.contains("There is nothing here."));

        let potion = Item::new(session.next_item_id(), ItemKind::Potion(PotionKind::Healing));
        let id = potion.id;
        let pos = player.pos;
        if let Some(floor) = level(&mut session).items_at_mut(pos) {
            floor.push(potion);
        }
        assert_eq!(player.pickup(&mut session), PICKUP_TIME);
        assert!(player.inventory.contains(id));

        assert_eq!(player.drop_item(&mut session, id), 1);
        assert!(!player.inventory.contains(id));
        assert_eq!(session.dungeon.level(1).expect("level").items_at(pos).len(), 1);

        let weapon = player.equipment.get(EquipSlot::Weapon).expect("weapon");
        assert_eq!(player.drop_item(&mut session, weapon), 0);
        assert!(player.inventory.contains(weapon));
    }

    #[test]
    fn test_altar_reveals_curse() {
        let (mut session, mut player) = player();
        let pos = player.pos;
        level(&mut session).set_sobject(pos, Some(StationaryObject::Altar));
        let cursed = Item::new(session.next_item_id(), ItemKind::Potion(PotionKind::Sleep)).cursed();
        let id = player.inventory.add(cursed);

        player.drop_item(&mut session, id);
        let floor = session.dungeon.level(1).expect("level").items_at(pos);
        assert!(floor.iter().all(|item| item.blessed_known));
        assert!(player.log.iter().any(|e| e.message.ends_with("black halo.")));
    }

    #[test]
    fn test_enter_map() {
        let (mut session, mut player) = player();
        player.pos = Position::new(5, 5, 0);
        let exit = Position::new(20, 8, 1);
        level(&mut session).set_sobject(exit, Some(StationaryObject::DungeonExit));
        level(&mut session).add_monster(Monster::new(MonsterKind::Bat, exit));
        session.spin_the_wheel();

        assert!(player.enter_map(&mut session, 1, false));
        assert_eq!(player.pos, exit);
        assert_eq!(player.stats.deepest_level, 1);
        assert!(player.log.contains("You enter the caverns of Larn."));
        assert!(session.dungeon.level(1).and_then(|m| m.monster_at(exit)).is_none());
        assert!(player.pos_visible(exit));

        assert!(player.enter_map(&mut session, 3, true));
        assert_eq!(player.pos.z, 3);
        assert_eq!(player.stats.deepest_level, 3);
    }

    #[test]
    fn test_autopickup_text() {
        let (_, mut player) = player();
        assert_eq!(player.autopickup_text(), "Auto-pickup is enabled for gems, gold.");
        player.settings.auto_pickup.clear();
        assert_eq!(player.autopickup_text(), "Auto-pickup is not enabled.");
    }
}
