//! Monster definitions
//!
//! The monster data table and the monster actor the player fights.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::combat::damage::Damage;
use crate::combat::status::EffectLedger;
use crate::items::item::ItemKind;
use crate::world::Position;

bitflags! {
    /// Physical traits of a monster kind
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MonsterFlags: u16 {
        const HEAD = 1 << 0;
        const NOBEHEAD = 1 << 1;
        const HANDS = 1 << 2;
        const SLOW = 1 << 3;
        const FAST = 1 << 4;
        const FLY = 1 << 5;
        const SPIRIT = 1 << 6;
        const UNDEAD = 1 << 7;
        const INVISIBLE = 1 << 8;
        const INFRAVISION = 1 << 9;
    }
}

/// Static data for one monster kind
#[derive(Debug, Clone, Copy)]
pub struct MonsterData {
    pub name: &'static str,
    pub level: i32,
    pub ac: i32,
    pub dam: i32,
    pub intelligence: i32,
    pub gold: i32,
    pub hp_max: i32,
    pub exp: u32,
    pub image: char,
    pub flags: MonsterFlags,
}

const H: u16 = MonsterFlags::HEAD.bits();
const NB: u16 = MonsterFlags::NOBEHEAD.bits();
const HA: u16 = MonsterFlags::HANDS.bits();
const SL: u16 = MonsterFlags::SLOW.bits();
const FA: u16 = MonsterFlags::FAST.bits();
const FL: u16 = MonsterFlags::FLY.bits();
const SP: u16 = MonsterFlags::SPIRIT.bits();
const UN: u16 = MonsterFlags::UNDEAD.bits();
const IV: u16 = MonsterFlags::INVISIBLE.bits();
const IR: u16 = MonsterFlags::INFRAVISION.bits();

#[allow(clippy::too_many_arguments)]
const fn md(
    name: &'static str,
    level: i32,
    ac: i32,
    dam: i32,
    intelligence: i32,
    gold: i32,
    hp_max: i32,
    exp: u32,
    image: char,
    flags: u16,
) -> MonsterData {
    MonsterData {
        name,
        level,
        ac,
        dam,
        intelligence,
        gold,
        hp_max,
        exp,
        image,
        flags: MonsterFlags::from_bits_truncate(flags),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Bat,
    Gnome,
    Hobgoblin,
    Jackal,
    Kobold,
    Orc,
    Snake,
    Centipede,
    Jaculi,
    Troglodyte,
    GiantAnt,
    FloatingEye,
    Leprechaun,
    Nymph,
    Quasit,
    RustMonster,
    Zombie,
    AssassinBug,
    Bugbear,
    Hellhound,
    IceLizard,
    Centaur,
    Troll,
    Yeti,
    Elf,
    GelatinousCube,
    Metamorph,
    Vortex,
    Ziller,
    VioletFungus,
    Wraith,
    Forvalaka,
    LamaNobe,
    Osequip,
    Rothe,
    Xorn,
    Vampire,
    Stalker,
    Poltergeist,
    Disenchantress,
    ShamblingMound,
    YellowMold,
    UmberHulk,
    GnomeKing,
    Mimic,
    WaterLord,
    PurpleWorm,
    Xvart,
    WhiteDragon,
    BronzeDragon,
    GreenDragon,
    SilverDragon,
    PlatinumDragon,
    RedDragon,
    SpiritNaga,
    GreenUrchin,
    DemonLordI,
    DemonLordII,
    DemonLordIII,
    DemonLordIV,
    DemonLordV,
    DemonLordVI,
    DemonLordVII,
    DaemonPrince,
}

const MONSTER_DATA: [MonsterData; MonsterKind::COUNT] = [
    md("giant bat", 1, 0, 1, 3, 0, 4, 1, 'B', H | FL | FA | IR),
    md("gnome", 1, 10, 1, 8, 30, 2, 2, 'G', H | HA),
    md("hobgoblin", 1, 14, 2, 5, 25, 3, 2, 'H', H | HA | IR),
    md("jackal", 1, 17, 1, 4, 0, 1, 1, 'J', H),
    md("kobold", 1, 20, 1, 7, 10, 1, 1, 'K', H | HA | IR),
    md("orc", 2, 12, 1, 9, 40, 4, 2, 'O', H | HA | IR),
    md("snake", 2, 15, 1, 3, 0, 3, 1, 'S', H),
    md("giant centipede", 2, 14, 0, 3, 0, 1, 2, 'c', H),
    md("jaculi", 2, 20, 1, 3, 0, 2, 1, 'j', H),
    md("troglodyte", 2, 10, 2, 5, 80, 4, 3, 't', H | HA),
    md("giant ant", 2, 8, 1, 4, 0, 5, 5, 'A', H),
    md("floating eye", 3, 8, 1, 3, 0, 5, 2, 'E', FL),
    md("leprechaun", 3, 3, 0, 3, 1500, 13, 45, 'L', H | HA | FA),
    md("nymph", 3, 3, 0, 9, 0, 18, 45, 'N', H | HA),
    md("quasit", 3, 5, 3, 3, 0, 10, 15, 'Q', H | HA | FA | IR),
    md("rust monster", 3, 4, 0, 3, 0, 18, 25, 'R', H),
    md("zombie", 3, 12, 2, 3, 0, 6, 7, 'Z', H | HA | SL | UN),
    md("assassin bug", 4, 9, 3, 3, 0, 20, 15, 'a', H),
    md("bugbear", 4, 5, 4, 5, 40, 20, 35, 'b', H | HA | IR),
    md("hell hound", 4, 5, 2, 6, 0, 16, 35, 'h', H | FA | IR),
    md("ice lizard", 4, 11, 2, 6, 50, 16, 25, 'i', H | SL),
    md("centaur", 4, 6, 4, 10, 40, 24, 45, 'C', H | HA),
    md("troll", 5, 4, 5, 9, 80, 50, 300, 'T', H | HA | IR),
    md("yeti", 5, 6, 4, 5, 50, 35, 100, 'Y', H | HA),
    md("elf", 5, 8, 1, 15, 50, 22, 35, 'e', H | HA | IR),
    md("gelatinous cube", 5, 9, 1, 3, 0, 22, 45, 'g', SL),
    md("metamorph", 6, 7, 3, 3, 0, 30, 40, 'm', 0),
    md("vortex", 6, 4, 3, 3, 0, 30, 55, 'v', FL | FA),
    md("ziller", 6, 15, 3, 3, 0, 30, 50, 'z', H),
    md("violet fungus", 6, 12, 3, 3, 0, 38, 100, 'F', SL),
    md("wraith", 6, 3, 1, 3, 0, 30, 325, 'W', H | HA | UN | IR),
    md("forvalaka", 6, 2, 5, 7, 0, 50, 280, 'f', H | FA | IR),
    md("lama nobe", 7, 7, 3, 6, 0, 35, 80, 'l', H),
    md("osequip", 7, 4, 4, 4, 0, 35, 100, 'o', H),
    md("rothe", 7, 15, 5, 3, 100, 50, 250, 'r', H | FA),
    md("xorn", 7, 0, 6, 13, 0, 60, 300, 'X', H | HA | IR),
    md("vampire", 7, 3, 4, 17, 0, 50, 1000, 'V', H | HA | FL | UN | IR),
    md("invisible stalker", 7, 3, 6, 5, 0, 50, 350, 'I', H | FL | IV),
    md("poltergeist", 8, 1, 8, 3, 0, 50, 450, 'p', FL | SP | IV),
    md("disenchantress", 8, 3, 1, 3, 0, 50, 500, 'q', H | HA),
    md("shambling mound", 8, 2, 5, 6, 0, 45, 400, 's', SL),
    md("yellow mold", 8, 12, 4, 3, 0, 35, 250, 'y', SL),
    md("umber hulk", 8, 3, 7, 14, 0, 65, 600, 'U', H | HA | IR),
    md("gnome king", 9, -1, 10, 18, 2000, 100, 3000, 'k', H | HA),
    md("mimic", 9, 5, 6, 8, 0, 55, 99, 'M', 0),
    md("water lord", 9, -10, 15, 20, 0, 150, 15000, 'w', H | HA | NB),
    md("purple worm", 9, -1, 11, 3, 100, 120, 15000, 'P', H | SL),
    md("xvart", 9, -2, 12, 13, 0, 90, 1000, 'x', H | HA | IR),
    md("white dragon", 5, 2, 4, 16, 500, 55, 1000, 'd', H | FL | IR),
    md("bronze dragon", 9, 2, 9, 16, 300, 80, 4000, 'D', H | FL | IR),
    md("green dragon", 9, 3, 8, 15, 200, 70, 2500, 'D', H | FL | IR),
    md("silver dragon", 10, -1, 12, 20, 700, 100, 10000, 'D', H | FL | IR),
    md("platinum dragon", 10, -5, 15, 22, 1000, 130, 24000, 'D', H | FL | IR),
    md("red dragon", 10, -2, 13, 19, 800, 110, 14000, 'D', H | FL | IR),
    md("spirit naga", 10, -20, 12, 23, 0, 95, 20000, 'n', H | FL | SP | IR),
    md("green urchin", 10, -3, 12, 3, 0, 85, 5000, 'u', 0),
    md("type I demon lord", 12, -30, 18, 20, 0, 140, 50000, '&', H | HA | FL | NB | IR),
    md("type II demon lord", 13, -30, 18, 21, 0, 160, 75000, '&', H | HA | FL | NB | IR),
    md("type III demon lord", 14, -35, 18, 22, 0, 180, 100000, '&', H | HA | FL | NB | IR),
    md("type IV demon lord", 15, -35, 20, 23, 0, 200, 125000, '&', H | HA | FL | NB | IR),
    md("type V demon lord", 16, -40, 22, 24, 0, 220, 150000, '&', H | HA | FL | NB | IR),
    md("type VI demon lord", 17, -40, 24, 25, 0, 240, 175000, '&', H | HA | FL | NB | IR),
    md("type VII demon lord", 18, -40, 27, 26, 0, 260, 200000, '&', H | HA | FL | NB | IR),
    md("demon prince", 25, -70, 80, 28, 0, 300, 300000, '&', H | HA | FL | NB | IV | IR),
];

impl MonsterKind {
    pub const COUNT: usize = 64;

    pub const ALL: [MonsterKind; MonsterKind::COUNT] = [
        MonsterKind::Bat,
        MonsterKind::Gnome,
        MonsterKind::Hobgoblin,
        MonsterKind::Jackal,
        MonsterKind::Kobold,
        MonsterKind::Orc,
        MonsterKind::Snake,
        MonsterKind::Centipede,
        MonsterKind::Jaculi,
        MonsterKind::Troglodyte,
        MonsterKind::GiantAnt,
        MonsterKind::FloatingEye,
        MonsterKind::Leprechaun,
        MonsterKind::Nymph,
        MonsterKind::Quasit,
        MonsterKind::RustMonster,
        MonsterKind::Zombie,
        MonsterKind::AssassinBug,
        MonsterKind::Bugbear,
        MonsterKind::Hellhound,
        MonsterKind::IceLizard,
        MonsterKind::Centaur,
        MonsterKind::Troll,
        MonsterKind::Yeti,
        MonsterKind::Elf,
        MonsterKind::GelatinousCube,
        MonsterKind::Metamorph,
        MonsterKind::Vortex,
        MonsterKind::Ziller,
        MonsterKind::VioletFungus,
        MonsterKind::Wraith,
        MonsterKind::Forvalaka,
        MonsterKind::LamaNobe,
        MonsterKind::Osequip,
        MonsterKind::Rothe,
        MonsterKind::Xorn,
        MonsterKind::Vampire,
        MonsterKind::Stalker,
        MonsterKind::Poltergeist,
        MonsterKind::Disenchantress,
        MonsterKind::ShamblingMound,
        MonsterKind::YellowMold,
        MonsterKind::UmberHulk,
        MonsterKind::GnomeKing,
        MonsterKind::Mimic,
        MonsterKind::WaterLord,
        MonsterKind::PurpleWorm,
        MonsterKind::Xvart,
        MonsterKind::WhiteDragon,
        MonsterKind::BronzeDragon,
        MonsterKind::GreenDragon,
        MonsterKind::SilverDragon,
        MonsterKind::PlatinumDragon,
        MonsterKind::RedDragon,
        MonsterKind::SpiritNaga,
        MonsterKind::GreenUrchin,
        MonsterKind::DemonLordI,
        MonsterKind::DemonLordII,
        MonsterKind::DemonLordIII,
        MonsterKind::DemonLordIV,
        MonsterKind::DemonLordV,
        MonsterKind::DemonLordVI,
        MonsterKind::DemonLordVII,
        MonsterKind::DaemonPrince,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn data(&self) -> &'static MonsterData {
        &MONSTER_DATA[self.index()]
    }

    pub fn name(&self) -> &'static str {
        self.data().name
    }

    pub fn has_flag(&self, flag: MonsterFlags) -> bool {
        self.data().flags.contains(flag)
    }

    pub fn is_demon(&self) -> bool {
        *self >= MonsterKind::DemonLordI
    }

    pub fn is_dragon(&self) -> bool {
        matches!(
            self,
            MonsterKind::WhiteDragon
                | MonsterKind::BronzeDragon
                | MonsterKind::GreenDragon
                | MonsterKind::SilverDragon
                | MonsterKind::PlatinumDragon
                | MonsterKind::RedDragon
        )
    }

    /// Monsters that eat metal and rust weapons striking them
    pub fn is_metallivore(&self) -> bool {
        matches!(self, MonsterKind::RustMonster | MonsterKind::Xorn)
    }

    pub fn is_mimic(&self) -> bool {
        *self == MonsterKind::Mimic
    }
}

impl PartialOrd for MonsterKind {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MonsterKind {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index().cmp(&other.index())
    }
}

/// A monster on a dungeon level
#[derive(Debug, Clone, PartialEq)]
pub struct Monster {
    pub kind: MonsterKind,
    pub hp: i32,
    pub pos: Position,
    pub effects: EffectLedger,
    /// An undiscovered mimic, still looking like an item
    pub unknown: bool,
    /// What an undiscovered mimic looks like
    pub disguise: Option<ItemKind>,
    /// The monster has the player in sight
    pub sees_player: bool,
    /// Where the monster believes the player is
    pub player_pos: Option<Position>,
}

impl Monster {
    pub fn new(kind: MonsterKind, pos: Position) -> Self {
        Self {
            kind,
            hp: kind.data().hp_max,
            pos,
            effects: EffectLedger::new(),
            unknown: kind.is_mimic(),
            disguise: kind.is_mimic().then_some(ItemKind::Gold),
            sees_player: true,
            player_pos: None,
        }
    }

    pub fn with_disguise(mut self, kind: ItemKind) -> Self {
        self.disguise = Some(kind);
        self
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn armor_class(&self) -> i32 {
        self.kind.data().ac
    }

    pub fn has_head(&self) -> bool {
        self.kind.has_flag(MonsterFlags::HEAD)
    }

    pub fn is_beheadable(&self) -> bool {
        self.has_head() && !self.kind.has_flag(MonsterFlags::NOBEHEAD)
    }

    pub fn has_infravision(&self) -> bool {
        self.kind.has_flag(MonsterFlags::INFRAVISION)
    }

    /// Apply damage; returns true if the monster died
    pub fn take_damage(&mut self, damage: &Damage) -> bool {
        self.hp -= damage.amount.max(0);
        self.hp < 1
    }

    /// Remember where the player was last noticed
    pub fn update_player_pos(&mut self, pos: Position) {
        self.player_pos = Some(pos);
    }
}
