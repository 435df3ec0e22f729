//! Player creation
//!
//! The player record and its lifetime statistics.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::combat::status::EffectLedger;
use crate::data::GameConfig;
use crate::entities::attributes::{Attributes, SPEED_NORMAL};
use crate::entities::monster::MonsterKind;
use crate::game::log::MessageLog;
use crate::game::state::Session;
use crate::items::equipment::Equipment;
use crate::items::identify::Identification;
use crate::items::inventory::Inventory;
use crate::items::item::{ArmourKind, Item, ItemCategory, ItemKind, PotionKind, WeaponKind};
use crate::progression::spells::KnownSpell;
use crate::world::fov::FovGrid;
use crate::world::memory::{LandmarkMemory, MapMemory};
use crate::world::Position;

/// Number of courses offered by the school
pub const SCHOOL_COURSE_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    Female,
    Male,
}

/// Lifetime statistics, reported on death
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub deepest_level: u32,
    /// Kill counts indexed by monster kind
    pub monsters_killed: Vec<u32>,
    pub spells_cast: u32,
    pub potions_quaffed: u32,
    pub scrolls_read: u32,
    pub books_read: u32,
    pub cookies_nibbled: u32,
    pub max_level: u32,
    pub max_xp: u32,
    /// Attribute values at character creation
    pub str_orig: i32,
    pub int_orig: i32,
    pub wis_orig: i32,
    pub con_orig: i32,
    pub dex_orig: i32,
    pub cha_orig: i32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            deepest_level: 0,
            monsters_killed: vec![0; MonsterKind::COUNT],
            spells_cast: 0,
            potions_quaffed: 0,
            scrolls_read: 0,
            books_read: 0,
            cookies_nibbled: 0,
            max_level: 1,
            max_xp: 0,
            str_orig: 0,
            int_orig: 0,
            wis_orig: 0,
            con_orig: 0,
            dex_orig: 0,
            cha_orig: 0,
        }
    }
}

impl PlayerStats {
    pub fn record_kill(&mut self, kind: MonsterKind) {
        if let Some(count) = self.monsters_killed.get_mut(kind.index()) {
            *count += 1;
        }
    }

    pub fn kills(&self, kind: MonsterKind) -> u32 {
        self.monsters_killed.get(kind.index()).copied().unwrap_or(0)
    }
}

/// Player preferences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerSettings {
    /// Item categories picked up automatically
    pub auto_pickup: HashSet<ItemCategory>,
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub sex: Sex,
    pub attributes: Attributes,
    pub hp: i32,
    /// Base maximum hit points (see `hp_max()` for the effective value)
    pub hp_max: i32,
    pub mp: i32,
    pub mp_max: i32,
    /// Turns until the next regeneration
    pub regen_counter: i32,
    pub bank_account: i32,
    pub outstanding_taxes: i32,
    pub interest_lasttime: u64,
    pub experience: u32,
    pub level: u32,
    /// Base speed
    pub speed: i32,
    /// Banked movement points
    pub movement: i32,
    pub pos: Position,
    pub known_spells: Vec<KnownSpell>,
    pub inventory: Inventory,
    pub equipment: Equipment,
    pub effects: EffectLedger,
    pub identified: Identification,
    pub courses_taken: [bool; SCHOOL_COURSE_COUNT],
    pub memory: MapMemory,
    pub landmarks: LandmarkMemory,
    pub fov: FovGrid,
    pub log: MessageLog,
    pub stats: PlayerStats,
    pub settings: PlayerSettings,
}

impl Player {
    /// An empty player record with no randomisation
    pub fn blank(name: impl Into<String>, sex: Sex) -> Self {
        Self {
            name: name.into(),
            sex,
            attributes: Attributes::default(),
            hp: 0,
            hp_max: 0,
            mp: 0,
            mp_max: 0,
            regen_counter: 0,
            bank_account: 0,
            outstanding_taxes: 0,
            interest_lasttime: 0,
            experience: 0,
            level: 1,
            speed: SPEED_NORMAL,
            movement: 0,
            pos: Position::default(),
            known_spells: Vec::new(),
            inventory: Inventory::new(),
            equipment: Equipment::new(),
            effects: EffectLedger::new(),
            identified: Identification::new(),
            courses_taken: [false; SCHOOL_COURSE_COUNT],
            memory: MapMemory::new(),
            landmarks: LandmarkMemory::new(),
            fov: FovGrid::new(),
            log: MessageLog::new(),
            stats: PlayerStats::default(),
            settings: PlayerSettings::default(),
        }
    }

    /// Roll a new character with starting equipment
    pub fn new(session: &mut Session, name: impl Into<String>, sex: Sex) -> Self {
        let mut player = Self::blank(name, sex);

        let attrs = &mut player.attributes;
        attrs.strength = 12 + session.rng.rand_0n(6);
        attrs.intelligence = 12 + session.rng.rand_0n(6);
        attrs.wisdom = 12 + session.rng.rand_0n(6);
        attrs.constitution = 12 + session.rng.rand_0n(6);
        attrs.dexterity = 12 + session.rng.rand_0n(6);
        attrs.charisma = 12 + session.rng.rand_0n(6);

        player.stats.str_orig = attrs.strength;
        player.stats.int_orig = attrs.intelligence;
        player.stats.wis_orig = attrs.wisdom;
        player.stats.con_orig = attrs.constitution;
        player.stats.dex_orig = attrs.dexterity;
        player.stats.cha_orig = attrs.charisma;

        player.hp_max = player.attributes.constitution + session.rng.rand_0n(10);
        player.hp = player.hp_max;
        player.mp_max = player.attributes.intelligence + session.rng.rand_0n(10);
        player.mp = player.mp_max;

        // Starting gear is known and worn
        player.log.mute();
        let mut armour = Item::new(
            session.next_item_id(),
            ItemKind::Armour(ArmourKind::LeatherArmour),
        )
        .with_bonus(1);
        armour.bonus_known = true;
        armour.blessed_known = true;
        let mut dagger = Item::new(session.next_item_id(), ItemKind::Weapon(WeaponKind::Dagger));
        dagger.bonus_known = true;
        dagger.blessed_known = true;

        for item in [armour, dagger] {
            match player.add_to_inventory(item) {
                Ok(id) => {
                    player.equip_item(id);
                }
                Err(item) => log::warn!("Starting item {} rejected", item.kind.name()),
            }
        }
        player.log.unmute();

        player
            .identified
            .set_known(&ItemKind::Potion(PotionKind::CureDianthroritis));

        log::info!(
            "Created player {} (str {}, int {}, con {}, hp {}, mp {})",
            player.name,
            player.attributes.strength,
            player.attributes.intelligence,
            player.attributes.constitution,
            player.hp_max,
            player.mp_max
        );
        player
    }

    /// Roll a new character named and configured by the game settings
    pub fn from_config(session: &mut Session, config: &GameConfig) -> Self {
        let mut player = Self::new(session, config.player_name.clone(), config.sex);
        player.settings.auto_pickup = config.auto_pickup.iter().copied().collect();
        player
    }

    /// Look up an equipped item
    pub fn equipped_item(&self, slot: crate::items::equipment::EquipSlot) -> Option<&Item> {
        self.equipment.get(slot).and_then(|id| self.inventory.get(id))
    }

    pub fn gold(&self) -> u32 {
        self.inventory.gold()
    }

    /// Replace the carried gold amount
    pub fn set_gold(&mut self, session: &mut Session, amount: u32) {
        self.inventory.set_gold(amount, || session.next_item_id());
        self.recalc_carry_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::equipment::EquipSlot;

    #[test]
    fn test_from_config() {
        let config = GameConfig {
            player_name: "Ada".to_string(),
            auto_pickup: vec![ItemCategory::Potion],
            ..GameConfig::default()
        };
        let mut session = Session::new(&config);
        let player = Player::from_config(&mut session, &config);
        assert_eq!(player.name, "Ada");
        assert_eq!(player.sex, config.sex);
        assert!(player.settings.auto_pickup.contains(&ItemCategory::Potion));
        assert!(!player.settings.auto_pickup.contains(&ItemCategory::Gold));
    }

    #[test]
    fn test_new_player() {
        let mut session = Session::seeded(7);
        let player = Player::new(&mut session, "Tester", Sex::Male);

        for attr in crate::entities::attributes::Attribute::ALL {
            let value = player.attributes.get(attr);
            assert!((12..18).contains(&value));
        }
        assert_eq!(player.stats.str_orig, player.attributes.strength);
        assert!(player.hp_max >= player.attributes.constitution);
        assert_eq!(player.hp, player.hp_max);
        assert_eq!(player.level, 1);
        assert_eq!(player.speed, SPEED_NORMAL);
        assert!(player.known_spells.is_empty());

        let armour = player.equipped_item(EquipSlot::Suit).expect("armour worn");
        assert_eq!(armour.kind, ItemKind::Armour(ArmourKind::LeatherArmour));
        assert_eq!(armour.bonus, 1);
        let weapon = player.equipped_item(EquipSlot::Weapon).expect("weapon wielded");
        assert_eq!(weapon.kind, ItemKind::Weapon(WeaponKind::Dagger));

        assert!(player
            .identified
            .is_known(&ItemKind::Potion(PotionKind::CureDianthroritis)));
        assert!(!player.identified.is_known(&ItemKind::Potion(PotionKind::Healing)));
        // Creation messages are not shown to the player
        assert!(player.log.is_empty());
    }

    #[test]
    fn test_gold_stack() {
        let mut session = Session::seeded(7);
        let mut player = Player::new(&mut session, "Tester", Sex::Female);
        assert_eq!(player.gold(), 0);
        player.set_gold(&mut session, 500);
        assert_eq!(player.gold(), 500);
        player.set_gold(&mut session, 120);
        assert_eq!(player.gold(), 120);
        assert_eq!(
            player.inventory.iter().filter(|i| i.kind == ItemKind::Gold).count(),
            1
        );
        player.set_gold(&mut session, 0);
        assert_eq!(player.inventory.iter().filter(|i| i.kind == ItemKind::Gold).count(), 0);
    }

    #[test]
    fn test_kill_statistics() {
        let mut stats = PlayerStats::default();
        stats.record_kill(MonsterKind::Bat);
        stats.record_kill(MonsterKind::Bat);
        assert_eq!(stats.kills(MonsterKind::Bat), 2);
        assert_eq!(stats.kills(MonsterKind::Troll), 0);
    }
}
