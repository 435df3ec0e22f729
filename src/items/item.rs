//! Item definitions
//!
//! Item categories, per-category subtypes and the concrete `Item` instance.

use serde::{Deserialize, Serialize};

use crate::combat::status::{Effect, EffectKind, EffectOrigin};
use crate::progression::spells::SpellKind;

/// Stable identity of an item instance, used for equipment references and saves
pub type ItemId = u64;

/// Broad item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemCategory {
    Amulet,
    Armour,
    Book,
    Food,
    Gem,
    Gold,
    Potion,
    Ring,
    Scroll,
    Weapon,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 10] = [
        ItemCategory::Amulet,
        ItemCategory::Armour,
        ItemCategory::Book,
        ItemCategory::Food,
        ItemCategory::Gem,
        ItemCategory::Gold,
        ItemCategory::Potion,
        ItemCategory::Ring,
        ItemCategory::Scroll,
        ItemCategory::Weapon,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ItemCategory::Amulet => "amulet",
            ItemCategory::Armour => "armour",
            ItemCategory::Book => "book",
            ItemCategory::Food => "food",
            ItemCategory::Gem => "gem",
            ItemCategory::Gold => "gold",
            ItemCategory::Potion => "potion",
            ItemCategory::Ring => "ring",
            ItemCategory::Scroll => "scroll",
            ItemCategory::Weapon => "weapon",
        }
    }

    pub fn plural_name(&self) -> &'static str {
        match self {
            ItemCategory::Amulet => "amulets",
            ItemCategory::Armour => "armour",
            ItemCategory::Book => "books",
            ItemCategory::Food => "food",
            ItemCategory::Gem => "gems",
            ItemCategory::Gold => "gold",
            ItemCategory::Potion => "potions",
            ItemCategory::Ring => "rings",
            ItemCategory::Scroll => "scrolls",
            ItemCategory::Weapon => "weapons",
        }
    }

    /// Categories that can occupy an equipment slot
    pub fn is_equippable(&self) -> bool {
        matches!(
            self,
            ItemCategory::Amulet | ItemCategory::Armour | ItemCategory::Ring | ItemCategory::Weapon
        )
    }

    /// Categories whose subtypes must be learned before they are recognised
    pub fn is_identifiable(&self) -> bool {
        matches!(
            self,
            ItemCategory::Amulet
                | ItemCategory::Book
                | ItemCategory::Potion
                | ItemCategory::Ring
                | ItemCategory::Scroll
        )
    }

    /// Categories with a meaningful enchantment bonus
    pub fn has_bonus(&self) -> bool {
        matches!(
            self,
            ItemCategory::Armour | ItemCategory::Ring | ItemCategory::Weapon
        )
    }
}

// =============================================================================
// Subtypes
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmuletKind {
    Awareness,
    Sustainment,
    UndeadControl,
    NegateSpirit,
    NoTheft,
    DragonSlaying,
    Power,
    Larn,
}

impl AmuletKind {
    pub const ALL: [AmuletKind; 8] = [
        AmuletKind::Awareness,
        AmuletKind::Sustainment,
        AmuletKind::UndeadControl,
        AmuletKind::NegateSpirit,
        AmuletKind::NoTheft,
        AmuletKind::DragonSlaying,
        AmuletKind::Power,
        AmuletKind::Larn,
    ];
    pub const COUNT: usize = Self::ALL.len();

    pub fn name(&self) -> &'static str {
        match self {
            AmuletKind::Awareness => "awareness",
            AmuletKind::Sustainment => "sustainment",
            AmuletKind::UndeadControl => "undead control",
            AmuletKind::NegateSpirit => "negate spirit",
            AmuletKind::NoTheft => "theft prevention",
            AmuletKind::DragonSlaying => "dragon slaying",
            AmuletKind::Power => "power",
            AmuletKind::Larn => "larn",
        }
    }

    fn effect(&self) -> Option<(EffectKind, i32)> {
        match self {
            AmuletKind::Awareness => Some((EffectKind::Awareness, 1)),
            AmuletKind::Sustainment => Some((EffectKind::Sustainment, 1)),
            AmuletKind::UndeadControl => Some((EffectKind::UndeadProtection, 1)),
            AmuletKind::NegateSpirit => Some((EffectKind::SpiritProtection, 1)),
            AmuletKind::NoTheft => Some((EffectKind::NoTheft, 1)),
            AmuletKind::Larn => Some((EffectKind::Enlightenment, 8)),
            AmuletKind::DragonSlaying | AmuletKind::Power => None,
        }
    }
}

/// Which armour slot a piece of armour occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmourCategory {
    Boots,
    Cloak,
    Gloves,
    Helmet,
    Shield,
    Suit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmourKind {
    Shield,
    LeatherArmour,
    StuddedLeather,
    RingMail,
    ChainMail,
    SplintMail,
    PlateMail,
    PlateArmour,
    StainlessPlate,
    ElvenChain,
    Boots,
    ElvenBoots,
    Cloak,
    Gloves,
    Helmet,
}

impl ArmourKind {
    pub fn name(&self) -> &'static str {
        match self {
            ArmourKind::Shield => "shield",
            ArmourKind::LeatherArmour => "leather armour",
            ArmourKind::StuddedLeather => "studded leather armour",
            ArmourKind::RingMail => "ring mail",
            ArmourKind::ChainMail => "chain mail",
            ArmourKind::SplintMail => "splint mail",
            ArmourKind::PlateMail => "plate mail",
            ArmourKind::PlateArmour => "plate armour",
            ArmourKind::StainlessPlate => "stainless plate armour",
            ArmourKind::ElvenChain => "elven chain",
            ArmourKind::Boots => "pair of boots",
            ArmourKind::ElvenBoots => "pair of elven boots",
            ArmourKind::Cloak => "cloak",
            ArmourKind::Gloves => "pair of gloves",
            ArmourKind::Helmet => "helmet",
        }
    }

    pub fn category(&self) -> ArmourCategory {
        match self {
            ArmourKind::Shield => ArmourCategory::Shield,
            ArmourKind::Boots | ArmourKind::ElvenBoots => ArmourCategory::Boots,
            ArmourKind::Cloak => ArmourCategory::Cloak,
            ArmourKind::Gloves => ArmourCategory::Gloves,
            ArmourKind::Helmet => ArmourCategory::Helmet,
            _ => ArmourCategory::Suit,
        }
    }

    pub fn base_ac(&self) -> i32 {
        match self {
            ArmourKind::Shield => 2,
            ArmourKind::LeatherArmour => 2,
            ArmourKind::StuddedLeather => 3,
            ArmourKind::RingMail => 5,
            ArmourKind::ChainMail => 6,
            ArmourKind::SplintMail => 7,
            ArmourKind::PlateMail => 9,
            ArmourKind::PlateArmour => 10,
            ArmourKind::StainlessPlate => 12,
            ArmourKind::ElvenChain => 15,
            ArmourKind::Boots | ArmourKind::Cloak | ArmourKind::Gloves | ArmourKind::Helmet => 1,
            ArmourKind::ElvenBoots => 2,
        }
    }

    /// Turns needed to put the piece on or take it off
    pub fn don_time(&self) -> u32 {
        match self.category() {
            ArmourCategory::Boots | ArmourCategory::Gloves => 3,
            ArmourCategory::Cloak | ArmourCategory::Helmet | ArmourCategory::Shield => 2,
            ArmourCategory::Suit => match self {
                ArmourKind::RingMail | ArmourKind::ChainMail => 3,
                ArmourKind::SplintMail
                | ArmourKind::PlateMail
                | ArmourKind::PlateArmour
                | ArmourKind::StainlessPlate => 4,
                _ => 2,
            },
        }
    }

    fn weight(&self) -> u32 {
        match self {
            ArmourKind::Shield => 4500,
            ArmourKind::LeatherArmour => 7500,
            ArmourKind::StuddedLeather => 10000,
            ArmourKind::RingMail => 12000,
            ArmourKind::ChainMail => 15000,
            ArmourKind::SplintMail => 17500,
            ArmourKind::PlateMail => 20000,
            ArmourKind::PlateArmour => 22500,
            ArmourKind::StainlessPlate => 23000,
            ArmourKind::ElvenChain => 5000,
            ArmourKind::Boots => 1500,
            ArmourKind::ElvenBoots => 700,
            ArmourKind::Cloak => 1000,
            ArmourKind::Gloves => 500,
            ArmourKind::Helmet => 1500,
        }
    }

    fn price(&self) -> u32 {
        match self {
            ArmourKind::Shield => 150,
            ArmourKind::LeatherArmour => 20,
            ArmourKind::StuddedLeather => 100,
            ArmourKind::RingMail => 400,
            ArmourKind::ChainMail => 850,
            ArmourKind::SplintMail => 2200,
            ArmourKind::PlateMail => 4000,
            ArmourKind::PlateArmour => 6500,
            ArmourKind::StainlessPlate => 9000,
            ArmourKind::ElvenChain => 12000,
            ArmourKind::Boots => 15,
            ArmourKind::ElvenBoots => 1200,
            ArmourKind::Cloak => 30,
            ArmourKind::Gloves => 10,
            ArmourKind::Helmet => 25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PotionKind {
    Water,
    Sleep,
    Healing,
    RaiseLevel,
    IncreaseAbility,
    GainWisdom,
    GainStrength,
    GainCharisma,
    Dizziness,
    Learning,
    ObjectDetection,
    MonsterDetection,
    Forgetfulness,
    Blindness,
    Confusion,
    Heroism,
    Sturdiness,
    GiantStrength,
    FireResistance,
    TreasureFinding,
    InstantHealing,
    CureDianthroritis,
    Poison,
    SeeInvisible,
}

impl PotionKind {
    pub const ALL: [PotionKind; 24] = [
        PotionKind::Water,
        PotionKind::Sleep,
        PotionKind::Healing,
        PotionKind::RaiseLevel,
        PotionKind::IncreaseAbility,
        PotionKind::GainWisdom,
        PotionKind::GainStrength,
        PotionKind::GainCharisma,
        PotionKind::Dizziness,
        PotionKind::Learning,
        PotionKind::ObjectDetection,
        PotionKind::MonsterDetection,
        PotionKind::Forgetfulness,
        PotionKind::Blindness,
        PotionKind::Confusion,
        PotionKind::Heroism,
        PotionKind::Sturdiness,
        PotionKind::GiantStrength,
        PotionKind::FireResistance,
        PotionKind::TreasureFinding,
        PotionKind::InstantHealing,
        PotionKind::CureDianthroritis,
        PotionKind::Poison,
        PotionKind::SeeInvisible,
    ];
    pub const COUNT: usize = Self::ALL.len();

    pub fn name(&self) -> &'static str {
        match self {
            PotionKind::Water => "water",
            PotionKind::Sleep => "sleep",
            PotionKind::Healing => "healing",
            PotionKind::RaiseLevel => "raise level",
            PotionKind::IncreaseAbility => "increase ability",
            PotionKind::GainWisdom => "gain wisdom",
            PotionKind::GainStrength => "gain strength",
            PotionKind::GainCharisma => "gain charisma",
            PotionKind::Dizziness => "dizziness",
            PotionKind::Learning => "learning",
            PotionKind::ObjectDetection => "object detection",
            PotionKind::MonsterDetection => "monster detection",
            PotionKind::Forgetfulness => "forgetfulness",
            PotionKind::Blindness => "blindness",
            PotionKind::Confusion => "confusion",
            PotionKind::Heroism => "heroism",
            PotionKind::Sturdiness => "sturdiness",
            PotionKind::GiantStrength => "giant strength",
            PotionKind::FireResistance => "fire resistance",
            PotionKind::TreasureFinding => "treasure finding",
            PotionKind::InstantHealing => "instant healing",
            PotionKind::CureDianthroritis => "cure dianthroritis",
            PotionKind::Poison => "poison",
            PotionKind::SeeInvisible => "see invisible",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RingKind {
    Protection,
    Regeneration,
    ExtraRegeneration,
    Energy,
    IncreaseDamage,
    GainStrength,
    GainDexterity,
    Cleverness,
    Stealth,
}

impl RingKind {
    pub const ALL: [RingKind; 9] = [
        RingKind::Protection,
        RingKind::Regeneration,
        RingKind::ExtraRegeneration,
        RingKind::Energy,
        RingKind::IncreaseDamage,
        RingKind::GainStrength,
        RingKind::GainDexterity,
        RingKind::Cleverness,
        RingKind::Stealth,
    ];
    pub const COUNT: usize = Self::ALL.len();

    pub fn name(&self) -> &'static str {
        match self {
            RingKind::Protection => "protection",
            RingKind::Regeneration => "regeneration",
            RingKind::ExtraRegeneration => "extra regeneration",
            RingKind::Energy => "regenerate energy",
            RingKind::IncreaseDamage => "increase damage",
            RingKind::GainStrength => "gain strength",
            RingKind::GainDexterity => "gain dexterity",
            RingKind::Cleverness => "cleverness",
            RingKind::Stealth => "stealth",
        }
    }

    /// The bonus shows itself as soon as the ring is worn
    pub fn bonus_is_obvious(&self) -> bool {
        matches!(
            self,
            RingKind::Protection
                | RingKind::IncreaseDamage
                | RingKind::GainStrength
                | RingKind::GainDexterity
                | RingKind::Cleverness
        )
    }

    fn effect(&self, bonus: i32) -> (EffectKind, i32) {
        match self {
            RingKind::Protection => (EffectKind::Protection, bonus),
            RingKind::Regeneration => (EffectKind::IncHpRegen, 1),
            RingKind::ExtraRegeneration => (EffectKind::IncHpRegen, 5),
            RingKind::Energy => (EffectKind::IncMpRegen, 1),
            RingKind::IncreaseDamage => (EffectKind::IncDamage, bonus),
            RingKind::GainStrength => (EffectKind::IncStr, bonus),
            RingKind::GainDexterity => (EffectKind::IncDex, bonus),
            RingKind::Cleverness => (EffectKind::IncInt, bonus),
            RingKind::Stealth => (EffectKind::Stealth, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrollKind {
    BlankPaper,
    EnchantArmour,
    EnchantWeapon,
    Enlightenment,
    CreateMonster,
    CreateArtifact,
    Aggravate,
    TimeWarp,
    Teleport,
    Awareness,
    Sleep,
    Spell,
    GemPerfection,
    Annihilation,
    Pulverization,
    Identify,
    RemoveCurse,
    MagicMapping,
}

impl ScrollKind {
    pub const ALL: [ScrollKind; 18] = [
        ScrollKind::BlankPaper,
        ScrollKind::EnchantArmour,
        ScrollKind::EnchantWeapon,
        ScrollKind::Enlightenment,
        ScrollKind::CreateMonster,
        ScrollKind::CreateArtifact,
        ScrollKind::Aggravate,
        ScrollKind::TimeWarp,
        ScrollKind::Teleport,
        ScrollKind::Awareness,
        ScrollKind::Sleep,
        ScrollKind::Spell,
        ScrollKind::GemPerfection,
        ScrollKind::Annihilation,
        ScrollKind::Pulverization,
        ScrollKind::Identify,
        ScrollKind::RemoveCurse,
        ScrollKind::MagicMapping,
    ];
    pub const COUNT: usize = Self::ALL.len();

    pub fn name(&self) -> &'static str {
        match self {
            ScrollKind::BlankPaper => "blank paper",
            ScrollKind::EnchantArmour => "enchant armour",
            ScrollKind::EnchantWeapon => "enchant weapon",
            ScrollKind::Enlightenment => "enlightenment",
            ScrollKind::CreateMonster => "create monster",
            ScrollKind::CreateArtifact => "create artifact",
            ScrollKind::Aggravate => "aggravate monsters",
            ScrollKind::TimeWarp => "time warp",
            ScrollKind::Teleport => "teleportation",
            ScrollKind::Awareness => "heightened awareness",
            ScrollKind::Sleep => "sleep",
            ScrollKind::Spell => "spell extension",
            ScrollKind::GemPerfection => "gem perfection",
            ScrollKind::Annihilation => "annihilation",
            ScrollKind::Pulverization => "pulverization",
            ScrollKind::Identify => "identify",
            ScrollKind::RemoveCurse => "remove curse",
            ScrollKind::MagicMapping => "magic mapping",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Dagger,
    Spear,
    Flail,
    BattleAxe,
    LongSword,
    TwoHandedSword,
    SwordOfSlashing,
    LanceOfDeath,
    VorpalBlade,
    Slayer,
    BessmansHammer,
}

impl WeaponKind {
    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::Dagger => "dagger",
            WeaponKind::Spear => "spear",
            WeaponKind::Flail => "flail",
            WeaponKind::BattleAxe => "battle axe",
            WeaponKind::LongSword => "longsword",
            WeaponKind::TwoHandedSword => "two-handed sword",
            WeaponKind::SwordOfSlashing => "sword of slashing",
            WeaponKind::LanceOfDeath => "lance of death",
            WeaponKind::VorpalBlade => "Vorpal Blade",
            WeaponKind::Slayer => "Slayer",
            WeaponKind::BessmansHammer => "Bessman's flailing hammer",
        }
    }

    /// Base weapon class
    pub fn wc(&self) -> i32 {
        match self {
            WeaponKind::Dagger => 3,
            WeaponKind::Spear => 8,
            WeaponKind::Flail => 14,
            WeaponKind::BattleAxe => 17,
            WeaponKind::LongSword => 22,
            WeaponKind::TwoHandedSword => 26,
            WeaponKind::SwordOfSlashing => 30,
            WeaponKind::LanceOfDeath => 20,
            WeaponKind::VorpalBlade => 22,
            WeaponKind::Slayer => 30,
            WeaponKind::BessmansHammer => 35,
        }
    }

    pub fn is_two_handed(&self) -> bool {
        matches!(
            self,
            WeaponKind::Flail
                | WeaponKind::BattleAxe
                | WeaponKind::TwoHandedSword
                | WeaponKind::LanceOfDeath
                | WeaponKind::BessmansHammer
        )
    }

    fn weight(&self) -> u32 {
        match self {
            WeaponKind::Dagger => 600,
            WeaponKind::Spear => 2000,
            WeaponKind::Flail => 2500,
            WeaponKind::BattleAxe => 3500,
            WeaponKind::LongSword => 3000,
            WeaponKind::TwoHandedSword => 5000,
            WeaponKind::SwordOfSlashing => 2500,
            WeaponKind::LanceOfDeath => 3200,
            WeaponKind::VorpalBlade => 1500,
            WeaponKind::Slayer => 3000,
            WeaponKind::BessmansHammer => 4500,
        }
    }

    fn price(&self) -> u32 {
        match self {
            WeaponKind::Dagger => 20,
            WeaponKind::Spear => 120,
            WeaponKind::Flail => 150,
            WeaponKind::BattleAxe => 350,
            WeaponKind::LongSword => 1500,
            WeaponKind::TwoHandedSword => 3000,
            WeaponKind::SwordOfSlashing => 5000,
            WeaponKind::LanceOfDeath => 65000,
            WeaponKind::VorpalBlade => 20000,
            WeaponKind::Slayer => 30000,
            WeaponKind::BessmansHammer => 10000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GemKind {
    Diamond,
    Ruby,
    Emerald,
    Sapphire,
}

impl GemKind {
    pub fn name(&self) -> &'static str {
        match self {
            GemKind::Diamond => "diamond",
            GemKind::Ruby => "ruby",
            GemKind::Emerald => "emerald",
            GemKind::Sapphire => "sapphire",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    FortuneCookie,
    Ration,
}

// =============================================================================
// Item kind
// =============================================================================

/// Category plus subtype of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Amulet(AmuletKind),
    Armour(ArmourKind),
    Book(SpellKind),
    Food(FoodKind),
    Gem(GemKind),
    Gold,
    Potion(PotionKind),
    Ring(RingKind),
    Scroll(ScrollKind),
    Weapon(WeaponKind),
}

impl ItemKind {
    pub fn category(&self) -> ItemCategory {
        match self {
            ItemKind::Amulet(_) => ItemCategory::Amulet,
            ItemKind::Armour(_) => ItemCategory::Armour,
            ItemKind::Book(_) => ItemCategory::Book,
            ItemKind::Food(_) => ItemCategory::Food,
            ItemKind::Gem(_) => ItemCategory::Gem,
            ItemKind::Gold => ItemCategory::Gold,
            ItemKind::Potion(_) => ItemCategory::Potion,
            ItemKind::Ring(_) => ItemCategory::Ring,
            ItemKind::Scroll(_) => ItemCategory::Scroll,
            ItemKind::Weapon(_) => ItemCategory::Weapon,
        }
    }

    /// Index of the subtype within its category's identification table
    pub fn subtype_index(&self) -> usize {
        match self {
            ItemKind::Amulet(k) => *k as usize,
            ItemKind::Armour(k) => *k as usize,
            ItemKind::Book(k) => *k as usize,
            ItemKind::Food(k) => *k as usize,
            ItemKind::Gem(k) => *k as usize,
            ItemKind::Gold => 0,
            ItemKind::Potion(k) => *k as usize,
            ItemKind::Ring(k) => *k as usize,
            ItemKind::Scroll(k) => *k as usize,
            ItemKind::Weapon(k) => *k as usize,
        }
    }

    /// Name of the subtype once identified
    pub fn name(&self) -> String {
        match self {
            ItemKind::Amulet(k) => format!("amulet of {}", k.name()),
            ItemKind::Armour(k) => k.name().to_string(),
            ItemKind::Book(k) => format!("book of {}", k.name()),
            ItemKind::Food(FoodKind::FortuneCookie) => "fortune cookie".to_string(),
            ItemKind::Food(FoodKind::Ration) => "ration".to_string(),
            ItemKind::Gem(k) => k.name().to_string(),
            ItemKind::Gold => "gold piece".to_string(),
            ItemKind::Potion(k) => format!("potion of {}", k.name()),
            ItemKind::Ring(k) => format!("ring of {}", k.name()),
            ItemKind::Scroll(k) => format!("scroll of {}", k.name()),
            ItemKind::Weapon(k) => k.name().to_string(),
        }
    }

    /// Appearance before the subtype is known
    pub fn unidentified_name(&self) -> String {
        const MATERIALS: [&str; 10] = [
            "brass", "bone", "copper", "ebony", "glass", "iron", "jade", "onyx", "silver",
            "wooden",
        ];
        const COLOURS: [&str; 12] = [
            "azure", "bubbly", "clear", "cloudy", "crimson", "dark", "golden", "murky", "pink",
            "smoky", "violet", "white",
        ];
        let idx = self.subtype_index();
        match self {
            ItemKind::Amulet(_) => format!("{} amulet", MATERIALS[idx % MATERIALS.len()]),
            ItemKind::Ring(_) => format!("{} ring", MATERIALS[(idx + 3) % MATERIALS.len()]),
            ItemKind::Potion(_) => format!("{} potion", COLOURS[idx % COLOURS.len()]),
            ItemKind::Scroll(_) => format!("scroll labeled {}", SCROLL_LABELS[idx % SCROLL_LABELS.len()]),
            ItemKind::Book(_) => format!("{} book", COLOURS[(idx + 5) % COLOURS.len()]),
            other => other.name(),
        }
    }

    /// Weight of a single unit in grams
    pub fn unit_weight(&self) -> u32 {
        match self {
            ItemKind::Amulet(_) => 150,
            ItemKind::Armour(k) => k.weight(),
            ItemKind::Book(_) => 800,
            ItemKind::Food(_) => 10,
            ItemKind::Gem(_) => 50,
            ItemKind::Gold => 1,
            ItemKind::Potion(_) => 250,
            ItemKind::Ring(_) => 10,
            ItemKind::Scroll(_) => 100,
            ItemKind::Weapon(k) => k.weight(),
        }
    }

    /// Base price of a single unit in gold
    pub fn unit_price(&self) -> u32 {
        match self {
            ItemKind::Amulet(AmuletKind::Larn) => 10000,
            ItemKind::Amulet(_) => 3800,
            ItemKind::Armour(k) => k.price(),
            ItemKind::Book(k) => 200 * (k.level() + 1),
            ItemKind::Food(_) => 10,
            ItemKind::Gem(GemKind::Diamond) => 500,
            ItemKind::Gem(GemKind::Ruby) => 400,
            ItemKind::Gem(GemKind::Emerald) => 300,
            ItemKind::Gem(GemKind::Sapphire) => 200,
            ItemKind::Gold => 1,
            ItemKind::Potion(_) => 150,
            ItemKind::Ring(_) => 1500,
            ItemKind::Scroll(_) => 100,
            ItemKind::Weapon(k) => k.price(),
        }
    }

    /// Display colour index, remembered in the tile memory
    pub fn colour(&self) -> u8 {
        match self {
            ItemKind::Gold => 3,
            ItemKind::Gem(GemKind::Diamond) => 15,
            ItemKind::Gem(GemKind::Ruby) => 1,
            ItemKind::Gem(GemKind::Emerald) => 2,
            ItemKind::Gem(GemKind::Sapphire) => 4,
            ItemKind::Potion(_) | ItemKind::Scroll(_) | ItemKind::Book(_) => {
                (self.subtype_index() % 14 + 1) as u8
            }
            ItemKind::Amulet(_) | ItemKind::Ring(_) => 11,
            ItemKind::Armour(_) | ItemKind::Weapon(_) => 7,
            ItemKind::Food(_) => 6,
        }
    }
}

const SCROLL_LABELS: [&str; 9] = [
    "ZELGO MER", "JUYED AWK", "NR 9", "XIXAXA", "PRATYAVAYAH", "DAIYEN FOOELS", "LEP GEX VEN",
    "GARVEN DEH", "READ ME",
];

// =============================================================================
// Item instance
// =============================================================================

/// A concrete item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub count: u32,
    /// Enchantment (+/-)
    pub bonus: i32,
    pub cursed: bool,
    pub blessed: bool,
    /// Blessing or curse status has been revealed
    pub blessed_known: bool,
    /// Enchantment has been revealed
    pub bonus_known: bool,
    /// Erosion levels (0-2, 3 destroys)
    pub rust: u8,
    pub corroded: u8,
    pub burnt: u8,
    /// Effects granted while equipped
    pub effects: Vec<Effect>,
}

/// Erosion level at which an item falls apart
pub const EROSION_DESTROYED: u8 = 3;

impl Item {
    pub fn new(id: ItemId, kind: ItemKind) -> Self {
        let mut item = Self {
            id,
            kind,
            count: 1,
            bonus: 0,
            cursed: false,
            blessed: false,
            blessed_known: false,
            bonus_known: false,
            rust: 0,
            corroded: 0,
            burnt: 0,
            effects: Vec::new(),
        };
        item.refresh_effects();
        item
    }

    /// A stack of gold coins
    pub fn gold(id: ItemId, amount: u32) -> Self {
        Self::new(id, ItemKind::Gold).with_count(amount)
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_bonus(mut self, bonus: i32) -> Self {
        self.bonus = bonus;
        self.refresh_effects();
        self
    }

    pub fn cursed(mut self) -> Self {
        self.cursed = true;
        self.blessed = false;
        self
    }

    pub fn blessed(mut self) -> Self {
        self.blessed = true;
        self.cursed = false;
        self
    }

    /// Rebuild the effects this item grants to whoever wears it
    fn refresh_effects(&mut self) {
        let granted = match self.kind {
            ItemKind::Amulet(k) => k.effect(),
            ItemKind::Ring(k) => Some(k.effect(self.bonus)),
            _ => None,
        };
        self.effects = granted
            .into_iter()
            .map(|(kind, amount)| {
                Effect::new(kind)
                    .with_amount(amount)
                    .permanent()
                    .with_origin(EffectOrigin::Item(self.id))
            })
            .collect();
    }

    pub fn category(&self) -> ItemCategory {
        self.kind.category()
    }

    /// Total weight of the stack in grams
    pub fn weight(&self) -> u32 {
        self.kind.unit_weight().saturating_mul(self.count)
    }

    /// Value of the stack in gold
    pub fn price(&self) -> u32 {
        let unit = self.kind.unit_price();
        let unit = if self.category().has_bonus() && self.bonus > 0 {
            unit + unit * self.bonus as u32 / 10
        } else {
            unit
        };
        unit.saturating_mul(self.count)
    }

    pub fn colour(&self) -> u8 {
        self.kind.colour()
    }

    pub fn is_two_handed(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon(w) if w.is_two_handed())
    }

    /// All weapons and armour are made of metal except leather and cloth goods
    pub fn is_metal(&self) -> bool {
        match self.kind {
            ItemKind::Weapon(_) => true,
            ItemKind::Armour(a) => !matches!(
                a,
                ArmourKind::LeatherArmour
                    | ArmourKind::StuddedLeather
                    | ArmourKind::Boots
                    | ArmourKind::ElvenBoots
                    | ArmourKind::Cloak
                    | ArmourKind::Gloves
            ),
            _ => false,
        }
    }

    fn erosion(&self) -> i32 {
        (self.rust + self.corroded + self.burnt) as i32
    }

    /// Armour class contributed when worn
    pub fn armour_ac(&self) -> i32 {
        match self.kind {
            ItemKind::Armour(a) => (a.base_ac() + self.bonus - self.erosion()).max(0),
            _ => 0,
        }
    }

    /// Weapon class contributed when wielded
    pub fn weapon_wc(&self) -> i32 {
        match self.kind {
            ItemKind::Weapon(w) => (w.wc() + self.bonus - self.erosion()).max(0),
            _ => 0,
        }
    }

    /// Rust the item one step; returns true if it fell apart
    pub fn rust(&mut self) -> bool {
        if !self.is_metal() {
            return false;
        }
        self.rust = (self.rust + 1).min(EROSION_DESTROYED);
        self.rust >= EROSION_DESTROYED
    }

    /// Whether two items can merge into one stack
    pub fn stacks_with(&self, other: &Item) -> bool {
        !self.category().is_equippable()
            && self.kind == other.kind
            && self.bonus == other.bonus
            && self.cursed == other.cursed
            && self.blessed == other.blessed
            && self.blessed_known == other.blessed_known
    }

    /// Indefinite description, e.g. "a +1 leather armour" or "3 potions of healing"
    pub fn describe(&self, type_known: bool) -> String {
        let mut name = if type_known {
            self.kind.name()
        } else {
            self.kind.unidentified_name()
        };

        if self.kind == ItemKind::Gold {
            return format!("{} gold piece{}", self.count, if self.count == 1 { "" } else { "s" });
        }

        if self.bonus_known && self.category().has_bonus() {
            name = format!("{:+} {}", self.bonus, name);
        }
        if self.blessed_known {
            if self.cursed {
                name = format!("cursed {}", name);
            } else if self.blessed {
                name = format!("blessed {}", name);
            } else {
                name = format!("uncursed {}", name);
            }
        }
        match self.rust {
            0 => {}
            1 => name = format!("rusty {}", name),
            _ => name = format!("very rusty {}", name),
        }

        if self.count > 1 {
            format!("{} {}", self.count, pluralize(&name))
        } else if name.starts_with(|c: char| "aeiou".contains(c)) {
            format!("an {}", name)
        } else {
            format!("a {}", name)
        }
    }
}

/// Pluralise the head noun of an item name
fn pluralize(name: &str) -> String {
    if let Some(idx) = name.find(" of ") {
        let (head, tail) = name.split_at(idx);
        format!("{}s{}", head, tail)
    } else if name.ends_with("armour") || name.ends_with("mail") {
        format!("suits of {}", name)
    } else {
        format!("{}s", name)
    }
}

/// Upper-case the first letter of a message fragment
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions() {
        let armour = Item::new(1, ItemKind::Armour(ArmourKind::LeatherArmour)).with_bonus(1);
        assert_eq!(armour.describe(true), "a leather armour");

        let mut armour = armour;
        armour.bonus_known = true;
        assert_eq!(armour.describe(true), "a +1 leather armour");

        let potions = Item::new(2, ItemKind::Potion(PotionKind::Healing)).with_count(3);
        assert_eq!(potions.describe(true), "3 potions of healing");

        let gold = Item::gold(3, 250);
        assert_eq!(gold.describe(true), "250 gold pieces");
    }

    #[test]
    fn test_armour_and_weapon_values() {
        let plate = Item::new(1, ItemKind::Armour(ArmourKind::PlateMail)).with_bonus(2);
        assert_eq!(plate.armour_ac(), 11);
        assert_eq!(ArmourKind::PlateMail.don_time(), 4);
        assert_eq!(ArmourKind::LeatherArmour.don_time(), 2);

        let mut sword = Item::new(2, ItemKind::Weapon(WeaponKind::LongSword));
        assert_eq!(sword.weapon_wc(), 22);
        assert!(!sword.rust());
        assert_eq!(sword.weapon_wc(), 21);
        assert!(!sword.rust());
        assert!(sword.rust());
    }

    #[test]
    fn test_ring_effects_follow_bonus() {
        let ring = Item::new(7, ItemKind::Ring(RingKind::GainStrength)).with_bonus(3);
        assert_eq!(ring.effects.len(), 1);
        assert_eq!(ring.effects[0].kind, EffectKind::IncStr);
        assert_eq!(ring.effects[0].amount, 3);
        assert_eq!(ring.effects[0].origin, EffectOrigin::Item(7));
    }

    #[test]
    fn test_stacking() {
        let a = Item::new(1, ItemKind::Potion(PotionKind::Water));
        let b = Item::new(2, ItemKind::Potion(PotionKind::Water));
        let c = Item::new(3, ItemKind::Potion(PotionKind::Sleep));
        let d = Item::new(4, ItemKind::Weapon(WeaponKind::Dagger));
        let e = Item::new(5, ItemKind::Weapon(WeaponKind::Dagger));
        assert!(a.stacks_with(&b));
        assert!(!a.stacks_with(&c));
        assert!(!d.stacks_with(&e));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("a dagger"), "A dagger");
        assert_eq!(capitalize(""), "");
    }
}
