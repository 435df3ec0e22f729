//! Game save/load system
//!
//! The persisted shape of the player and the slot files holding it.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::SaveError;
use crate::combat::status::EffectLedger;
use crate::entities::attributes::Attributes;
use crate::entities::monster::MonsterKind;
use crate::entities::player::{Player, PlayerSettings, PlayerStats, Sex, SCHOOL_COURSE_COUNT};
use crate::game::log::MessageLog;
use crate::game::state::Session;
use crate::items::equipment::EquipSlot;
use crate::items::identify::Identification;
use crate::items::item::{Item, ItemCategory, ItemId};
use crate::items::inventory::Inventory;
use crate::progression::difficulty::Difficulty;
use crate::progression::spells::KnownSpell;
use crate::world::memory::{Landmark, LandmarkMemory, TileMemory};
use crate::world::position::{MAP_COUNT, MAP_HEIGHT, MAP_WIDTH};
use crate::world::tile::{StationaryObject, TileType, TrapKind};
use crate::world::Position;

/// Save file version for compatibility checking
pub const SAVE_VERSION: u32 = 1;

/// Number of save slots offered
pub const SAVE_SLOTS: u8 = 3;

fn is_zero(value: &u8) -> bool {
    *value == 0
}

/// One remembered map tile; empty fields are left out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMemoryRecord {
    pub nlevel: i32,
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile: Option<TileType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sobject: Option<StationaryObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemCategory>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub item_colour: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trap: Option<TrapKind>,
}

impl TileMemoryRecord {
    fn memory(&self) -> TileMemory {
        TileMemory {
            tile: self.tile,
            sobject: self.sobject,
            item: self.item,
            item_colour: self.item_colour,
            trap: self.trap,
        }
    }
}

/// A remembered stationary object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkRecord {
    pub nlevel: i32,
    pub x: i32,
    pub y: i32,
    pub sobject: StationaryObject,
}

/// Lifetime statistics with kills stored sparsely
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
    pub deepest_level: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub monsters_killed: Vec<(MonsterKind, u32)>,
    pub spells_cast: u32,
    pub potions_quaffed: u32,
    pub scrolls_read: u32,
    pub books_read: u32,
    pub cookies_nibbled: u32,
    pub max_level: u32,
    pub max_xp: u32,
    pub str_orig: i32,
    pub int_orig: i32,
    pub wis_orig: i32,
    pub con_orig: i32,
    pub dex_orig: i32,
    pub cha_orig: i32,
}

impl StatsRecord {
    fn from_stats(stats: &PlayerStats) -> Self {
        Self {
            deepest_level: stats.deepest_level,
            monsters_killed: MonsterKind::ALL
                .iter()
                .map(|kind| (*kind, stats.kills(*kind)))
                .filter(|(_, count)| *count > 0)
                .collect(),
            spells_cast: stats.spells_cast,
            potions_quaffed: stats.potions_quaffed,
            scrolls_read: stats.scrolls_read,
            books_read: stats.books_read,
            cookies_nibbled: stats.cookies_nibbled,
            max_level: stats.max_level,
            max_xp: stats.max_xp,
            str_orig: stats.str_orig,
            int_orig: stats.int_orig,
            wis_orig: stats.wis_orig,
            con_orig: stats.con_orig,
            dex_orig: stats.dex_orig,
            cha_orig: stats.cha_orig,
        }
    }

    fn into_stats(self) -> PlayerStats {
        let mut stats = PlayerStats {
            deepest_level: self.deepest_level,
            spells_cast: self.spells_cast,
            potions_quaffed: self.potions_quaffed,
            scrolls_read: self.scrolls_read,
            books_read: self.books_read,
            cookies_nibbled: self.cookies_nibbled,
            max_level: self.max_level,
            max_xp: self.max_xp,
            str_orig: self.str_orig,
            int_orig: self.int_orig,
            wis_orig: self.wis_orig,
            con_orig: self.con_orig,
            dex_orig: self.dex_orig,
            cha_orig: self.cha_orig,
            ..PlayerStats::default()
        };
        for (kind, count) in self.monsters_killed {
            if let Some(slot) = stats.monsters_killed.get_mut(kind.index()) {
                *slot = count;
            }
        }
        stats
    }
}

/// The persisted player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub version: u32,
    pub name: String,
    pub sex: Sex,
    pub attributes: Attributes,
    pub hp: i32,
    pub hp_max: i32,
    pub mp: i32,
    pub mp_max: i32,
    pub regen_counter: i32,
    pub bank_account: i32,
    pub outstanding_taxes: i32,
    pub interest_lasttime: u64,
    pub experience: u32,
    pub level: u32,
    pub speed: i32,
    pub movement: i32,
    pub pos: Position,
    pub known_spells: Vec<KnownSpell>,
    pub inventory: Vec<Item>,
    pub effects: EffectLedger,
    pub eq_amulet: Option<ItemId>,
    pub eq_weapon: Option<ItemId>,
    pub eq_boots: Option<ItemId>,
    pub eq_cloak: Option<ItemId>,
    pub eq_gloves: Option<ItemId>,
    pub eq_helmet: Option<ItemId>,
    pub eq_shield: Option<ItemId>,
    pub eq_suit: Option<ItemId>,
    pub eq_ring_left: Option<ItemId>,
    pub eq_ring_right: Option<ItemId>,
    pub identified: Identification,
    pub courses_taken: [bool; SCHOOL_COURSE_COUNT],
    pub memory: Vec<TileMemoryRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub landmarks: Vec<LandmarkRecord>,
    pub log: MessageLog,
    pub stats: StatsRecord,
    #[serde(default)]
    pub auto_pickup: Vec<ItemCategory>,
}

impl PlayerRecord {
    pub fn from_player(player: &Player) -> Self {
        let eq = |slot| player.equipment.get(slot);

        let mut memory = Vec::new();
        for nlevel in 0..MAP_COUNT {
            for (idx, tile) in player.memory.level(nlevel).iter().enumerate() {
                if tile.is_empty() {
                    continue;
                }
                memory.push(TileMemoryRecord {
                    nlevel: nlevel as i32,
                    x: idx as i32 % MAP_WIDTH,
                    y: idx as i32 / MAP_WIDTH,
                    tile: tile.tile,
                    sobject: tile.sobject,
                    item: tile.item,
                    item_colour: tile.item_colour,
                    trap: tile.trap,
                });
            }
        }

        let mut auto_pickup: Vec<ItemCategory> =
            player.settings.auto_pickup.iter().copied().collect();
        auto_pickup.sort();

        Self {
            version: SAVE_VERSION,
            name: player.name.clone(),
            sex: player.sex,
            attributes: player.attributes,
            hp: player.hp,
            hp_max: player.hp_max,
            mp: player.mp,
            mp_max: player.mp_max,
            regen_counter: player.regen_counter,
            bank_account: player.bank_account,
            outstanding_taxes: player.outstanding_taxes,
            interest_lasttime: player.interest_lasttime,
            experience: player.experience,
            level: player.level,
            speed: player.speed,
            movement: player.movement,
            pos: player.pos,
            known_spells: player.known_spells.clone(),
            inventory: player.inventory.iter().cloned().collect(),
            effects: player.effects.clone(),
            eq_amulet: eq(EquipSlot::Amulet),
            eq_weapon: eq(EquipSlot::Weapon),
            eq_boots: eq(EquipSlot::Boots),
            eq_cloak: eq(EquipSlot::Cloak),
            eq_gloves: eq(EquipSlot::Gloves),
            eq_helmet: eq(EquipSlot::Helmet),
            eq_shield: eq(EquipSlot::Shield),
            eq_suit: eq(EquipSlot::Suit),
            eq_ring_left: eq(EquipSlot::RingLeft),
            eq_ring_right: eq(EquipSlot::RingRight),
            identified: player.identified.clone(),
            courses_taken: player.courses_taken,
            memory,
            landmarks: player
                .landmarks
                .iter()
                .map(|l| LandmarkRecord {
                    nlevel: l.pos.z,
                    x: l.pos.x,
                    y: l.pos.y,
                    sobject: l.sobject,
                })
                .collect(),
            log: player.log.clone(),
            stats: StatsRecord::from_stats(&player.stats),
            auto_pickup,
        }
    }

    fn slot_refs(&self) -> [(EquipSlot, Option<ItemId>); 10] {
        [
            (EquipSlot::Amulet, self.eq_amulet),
            (EquipSlot::Weapon, self.eq_weapon),
            (EquipSlot::Boots, self.eq_boots),
            (EquipSlot::Cloak, self.eq_cloak),
            (EquipSlot::Gloves, self.eq_gloves),
            (EquipSlot::Helmet, self.eq_helmet),
            (EquipSlot::Shield, self.eq_shield),
            (EquipSlot::Suit, self.eq_suit),
            (EquipSlot::RingLeft, self.eq_ring_left),
            (EquipSlot::RingRight, self.eq_ring_right),
        ]
    }

    /// Rebuild the player. Inventory comes first so equipment references
    /// can be resolved against it.
    pub fn into_player(self) -> Result<Player, SaveError> {
        if self.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }

        let slots = self.slot_refs();
        let mut player = Player::blank(self.name, self.sex);

        for (idx, item) in self.inventory.iter().enumerate() {
            if self.inventory[..idx].iter().any(|other| other.id == item.id) {
                return Err(SaveError::InvalidData(format!("duplicate item id {}", item.id)));
            }
        }
        player.inventory = Inventory::from_items(self.inventory);

        for (slot, id) in slots {
            let Some(id) = id else { continue };
            let Some(item) = player.inventory.get(id) else {
                return Err(SaveError::InvalidData(format!(
                    "{} slot refers to missing item {}",
                    slot.name(),
                    id
                )));
            };
            if let Some(other) = player.equipment.slot_of(id) {
                return Err(SaveError::InvalidData(format!(
                    "item {} equipped in both {} and {} slots",
                    id,
                    other.name(),
                    slot.name()
                )));
            }
            if !slot.accepts(&item.kind) {
                return Err(SaveError::InvalidData(format!(
                    "{} slot cannot hold item {}",
                    slot.name(),
                    id
                )));
            }
            player.equipment.set(slot, id);
        }

        player.attributes = self.attributes;
        player.hp = self.hp;
        player.hp_max = self.hp_max;
        player.mp = self.mp;
        player.mp_max = self.mp_max;
        player.regen_counter = self.regen_counter;
        player.bank_account = self.bank_account;
        player.outstanding_taxes = self.outstanding_taxes;
        player.interest_lasttime = self.interest_lasttime;
        player.experience = self.experience;
        player.level = self.level;
        player.speed = self.speed;
        player.movement = self.movement;
        player.pos = self.pos;
        player.known_spells = self.known_spells;
        player.effects = self.effects;
        player.identified = self.identified;
        player.courses_taken = self.courses_taken;
        player.log = self.log;
        player.stats = self.stats.into_stats();
        player.settings = PlayerSettings {
            auto_pickup: self.auto_pickup.into_iter().collect(),
        };

        for record in &self.memory {
            let pos = Position::new(record.x, record.y, record.nlevel);
            if record.x >= MAP_WIDTH || record.y >= MAP_HEIGHT {
                return Err(SaveError::InvalidData(format!("memory outside the map at {}", pos)));
            }
            match player.memory.get_mut(pos) {
                Some(tile) => *tile = record.memory(),
                None => {
                    return Err(SaveError::InvalidData(format!("memory outside the map at {}", pos)))
                }
            }
        }

        player.landmarks = LandmarkMemory::from_landmarks(
            self.landmarks
                .iter()
                .map(|l| Landmark {
                    pos: Position::new(l.x, l.y, l.nlevel),
                    sobject: l.sobject,
                })
                .collect(),
        );

        player.log.mute();
        player.recalc_carry_state();
        player.log.unmute();

        Ok(player)
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Contents of a save slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub turn: u64,
    pub difficulty: Difficulty,
    pub player: PlayerRecord,
}

/// Enough of a save file to show in a slot list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSummary {
    pub name: String,
    pub level: u32,
    pub depth: i32,
    pub turn: u64,
}

/// Get the save directory path
pub fn save_directory() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("org", "delver", "Delver") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push("saves");
        path
    } else {
        // Fallback to current directory
        PathBuf::from("./saves")
    }
}

/// Get the path for a save slot
pub fn save_path(slot: u8) -> PathBuf {
    save_directory().join(format!("save_{}.json", slot))
}

pub fn save_exists(slot: u8) -> bool {
    save_path(slot).exists()
}

/// List all save slots with their summaries
pub fn list_saves() -> Vec<(u8, Option<SaveSummary>)> {
    (0..SAVE_SLOTS)
        .map(|slot| {
            let summary = if save_exists(slot) {
                load_game(slot).ok().map(|data| data.summary())
            } else {
                None
            };
            (slot, summary)
        })
        .collect()
}

impl SaveData {
    pub fn new(session: &Session, player: &Player) -> Self {
        Self {
            turn: session.turn,
            difficulty: session.difficulty,
            player: PlayerRecord::from_player(player),
        }
    }

    pub fn summary(&self) -> SaveSummary {
        SaveSummary {
            name: self.player.name.clone(),
            level: self.player.level,
            depth: self.player.pos.z,
            turn: self.turn,
        }
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a save document, refusing other schema versions before
    /// looking at the rest of it
    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        #[derive(Deserialize)]
        struct VersionProbe {
            player: PlayerVersion,
        }
        #[derive(Deserialize)]
        struct PlayerVersion {
            version: u32,
        }

        let probe: VersionProbe = serde_json::from_str(json)?;
        if probe.player.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected: SAVE_VERSION,
                found: probe.player.version,
            });
        }
        Ok(serde_json::from_str(json)?)
    }

    /// Restore the session clock and the player
    pub fn restore(self, session: &mut Session) -> Result<Player, SaveError> {
        let player = self.player.into_player()?;
        session.turn = self.turn;
        session.difficulty = self.difficulty;
        session.sync_item_ids(&player);
        Ok(player)
    }
}

/// Save the game to a slot
pub fn save_game(session: &Session, player: &Player, slot: u8) -> Result<(), SaveError> {
    let json = SaveData::new(session, player).to_json()?;

    // Ensure directory exists
    fs::create_dir_all(save_directory())?;
    fs::write(save_path(slot), json)?;

    log::info!("Game saved to slot {}", slot);
    Ok(())
}

/// Load a save slot
pub fn load_game(slot: u8) -> Result<SaveData, SaveError> {
    let data = fs::read_to_string(save_path(slot))?;
    let save = SaveData::from_json(&data)?;
    log::info!("Game loaded from slot {}", slot);
    Ok(save)
}

/// Delete a save slot
pub fn delete_save(slot: u8) -> Result<(), SaveError> {
    let path = save_path(slot);
    if path.exists() {
        fs::remove_file(path)?;
        log::info!("Deleted save slot {}", slot);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::status::{Effect, EffectKind};

    fn veteran() -> (Session, Player) {
        let mut session = Session::seeded(61);
        let mut player = Player::new(&mut session, "Keeper", Sex::Male);
        player.pos = Position::new(12, 4, 2);
        player.gain_exp(&mut session, 120);
        player.bank_account = 500;
        player.stats.record_kill(MonsterKind::Jackal);
        player.stats.record_kill(MonsterKind::Jackal);
        player.add_effect(&mut session, Effect::new(EffectKind::Confusion).with_turns(7));
        player.landmarks.memorize(StationaryObject::Altar, Position::new(3, 3, 2));
        if let Some(tile) = player.memory.get_mut(Position::new(4, 5, 2)) {
            tile.tile = Some(TileType::Floor);
            tile.trap = Some(TrapKind::Pit);
        }
        player.settings.auto_pickup.insert(ItemCategory::Gold);
        player.log.add("Remember this.");
        (session, player)
    }

    #[test]
    fn test_player_round_trip() {
        let (_, player) = veteran();
        let json = PlayerRecord::from_player(&player).to_json().expect("encode");
        let restored = PlayerRecord::from_json(&json)
            .and_then(PlayerRecord::into_player)
            .expect("decode");

        assert_eq!(restored.name, "Keeper");
        assert_eq!(restored.sex, Sex::Male);
        assert_eq!(restored.attributes, player.attributes);
        assert_eq!(restored.pos, player.pos);
        assert_eq!(restored.experience, 120);
        assert_eq!(restored.level, player.level);
        assert_eq!(restored.hp_max, player.hp_max);
        assert_eq!(restored.inventory, player.inventory);
        assert_eq!(restored.equipment, player.equipment);
        assert_eq!(restored.effects, player.effects);
        assert_eq!(restored.identified, player.identified);
        assert_eq!(restored.stats, player.stats);
        assert_eq!(restored.landmarks, player.landmarks);
        assert_eq!(restored.memory, player.memory);
        assert_eq!(restored.settings, player.settings);
        assert!(restored.log.contains("Remember this."));
    }

    #[test]
    fn test_sparse_encoding() {
        let (_, mut player) = veteran();
        let record = PlayerRecord::from_player(&player);
        assert_eq!(record.memory.len(), 1);
        assert_eq!(record.stats.monsters_killed, vec![(MonsterKind::Jackal, 2)]);

        let json = record.to_json().expect("encode");
        assert!(json.contains("\"landmarks\""));
        assert!(!json.contains("\"sobject\": null"));

        player.landmarks = LandmarkMemory::new();
        let json = PlayerRecord::from_player(&player).to_json().expect("encode");
        assert!(!json.contains("\"landmarks\""));
    }

    #[test]
    fn test_dangling_equipment_rejected() {
        let (_, player) = veteran();
        let mut record = PlayerRecord::from_player(&player);
        record.eq_cloak = Some(9999);
        assert!(matches!(record.into_player(), Err(SaveError::InvalidData(_))));
    }

    #[test]
    fn test_shared_equipment_rejected() {
        let (_, player) = veteran();
        let mut record = PlayerRecord::from_player(&player);
        assert!(record.eq_weapon.is_some());
        record.eq_ring_right = record.eq_weapon;
        assert!(matches!(record.into_player(), Err(SaveError::InvalidData(_))));
    }

    #[test]
    fn test_misplaced_equipment_rejected() {
        let (_, player) = veteran();
        let mut record = PlayerRecord::from_player(&player);
        record.eq_amulet = record.eq_weapon.take();
        assert!(matches!(record.into_player(), Err(SaveError::InvalidData(_))));
    }

    #[test]
    fn test_version_mismatch() {
        let (session, player) = veteran();
        let mut data = SaveData::new(&session, &player);
        data.player.version = SAVE_VERSION + 1;
        let json = data.to_json().expect("encode");
        assert!(matches!(
            SaveData::from_json(&json),
            Err(SaveError::VersionMismatch { found, .. }) if found == SAVE_VERSION + 1
        ));
        assert!(matches!(SaveData::from_json("{"), Err(SaveError::Parse(_))));
    }

    #[test]
    fn test_restore_session() {
        let (mut session, player) = veteran();
        session.turn = 777;
        let json = SaveData::new(&session, &player).to_json().expect("encode");

        let mut fresh = Session::seeded(3);
        let restored = SaveData::from_json(&json)
            .and_then(|data| data.restore(&mut fresh))
            .expect("restore");
        assert_eq!(fresh.turn, 777);
        let max_id = restored.inventory.max_id().unwrap_or(0);
        assert!(fresh.next_item_id() > max_id);
    }

    #[test]
    fn test_carry_state_recomputed() {
        let (_, mut player) = veteran();
        player.add_effect(&mut Session::seeded(1), Effect::new(EffectKind::Burdened));
        let restored = PlayerRecord::from_player(&player).into_player().expect("decode");
        assert!(!restored.has_effect(EffectKind::Burdened));
    }
}
