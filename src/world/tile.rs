//! Tile definitions
//!
//! Terrain types, stationary objects and traps that can occupy a map position.

use serde::{Deserialize, Serialize};

/// Terrain of a single map position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    Grass,
    Dirt,
    Tree,
    #[default]
    Floor,
    Water,
    DeepWater,
    Lava,
    Fire,
    Cloud,
    Wall,
}

impl TileType {
    pub fn is_passable(&self) -> bool {
        !matches!(
            self,
            TileType::Tree | TileType::DeepWater | TileType::Lava | TileType::Wall
        )
    }

    pub fn is_transparent(&self) -> bool {
        !matches!(self, TileType::Tree | TileType::Cloud | TileType::Wall)
    }

    pub fn glyph(&self) -> char {
        match self {
            TileType::Grass => '"',
            TileType::Dirt => '.',
            TileType::Tree => '&',
            TileType::Floor => '.',
            TileType::Water | TileType::DeepWater => '~',
            TileType::Lava => '=',
            TileType::Fire => '*',
            TileType::Cloud => '%',
            TileType::Wall => '#',
        }
    }

    /// Name with article, as used in messages
    pub fn description(&self) -> &'static str {
        match self {
            TileType::Grass => "grass",
            TileType::Dirt => "dirt",
            TileType::Tree => "a tree",
            TileType::Floor => "the floor",
            TileType::Water => "water",
            TileType::DeepWater => "deep water",
            TileType::Lava => "lava",
            TileType::Fire => "fire",
            TileType::Cloud => "a gas cloud",
            TileType::Wall => "the wall",
        }
    }
}

/// Fixed features placed on a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StationaryObject {
    Altar,
    Bank,
    BankBranch,
    ClosedDoor,
    OpenDoor,
    DungeonEntrance,
    DungeonExit,
    ElevatorDown,
    ElevatorUp,
    Fountain,
    DeadFountain,
    Home,
    Mirror,
    School,
    StairsDown,
    StairsUp,
    Statue,
    Throne,
    EmptyThrone,
    DeadThrone,
    TradePost,
}

impl StationaryObject {
    /// Objects worth keeping in the remembered-landmarks list
    pub fn is_landmark(&self) -> bool {
        matches!(
            self,
            StationaryObject::Altar
                | StationaryObject::BankBranch
                | StationaryObject::Fountain
                | StationaryObject::Mirror
                | StationaryObject::Throne
                | StationaryObject::EmptyThrone
                | StationaryObject::Statue
        )
    }

    pub fn is_passable(&self) -> bool {
        !matches!(self, StationaryObject::ClosedDoor | StationaryObject::Statue)
    }

    pub fn is_transparent(&self) -> bool {
        !matches!(self, StationaryObject::ClosedDoor)
    }

    pub fn glyph(&self) -> char {
        match self {
            StationaryObject::Altar => '_',
            StationaryObject::Bank | StationaryObject::BankBranch => '$',
            StationaryObject::ClosedDoor => '+',
            StationaryObject::OpenDoor => '\'',
            StationaryObject::DungeonEntrance | StationaryObject::DungeonExit => 'O',
            StationaryObject::ElevatorDown | StationaryObject::ElevatorUp => 'I',
            StationaryObject::Fountain | StationaryObject::DeadFountain => '{',
            StationaryObject::Home => 'H',
            StationaryObject::Mirror => '|',
            StationaryObject::School => 'S',
            StationaryObject::StairsDown => '>',
            StationaryObject::StairsUp => '<',
            StationaryObject::Statue => '\\',
            StationaryObject::Throne
            | StationaryObject::EmptyThrone
            | StationaryObject::DeadThrone => '\\',
            StationaryObject::TradePost => 'T',
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StationaryObject::Altar => "a holy altar",
            StationaryObject::Bank => "the bank of Larn",
            StationaryObject::BankBranch => "a branch office of the bank of Larn",
            StationaryObject::ClosedDoor => "a closed door",
            StationaryObject::OpenDoor => "an open door",
            StationaryObject::DungeonEntrance => "the dungeon entrance",
            StationaryObject::DungeonExit => "the exit to the town",
            StationaryObject::ElevatorDown => "a volcanic shaft leaning downward",
            StationaryObject::ElevatorUp => "the base of a volcanic shaft",
            StationaryObject::Fountain => "a bubbling fountain",
            StationaryObject::DeadFountain => "a dead fountain",
            StationaryObject::Home => "your home",
            StationaryObject::Mirror => "a mirror",
            StationaryObject::School => "the College of Larn",
            StationaryObject::StairsDown => "a circular staircase",
            StationaryObject::StairsUp => "a circular staircase",
            StationaryObject::Statue => "a great marble statue",
            StationaryObject::Throne => "a handsome, jewel-encrusted throne",
            StationaryObject::EmptyThrone => "a handsome, jewel-encrusted throne",
            StationaryObject::DeadThrone => "a massive throne",
            StationaryObject::TradePost => "the Larn trading post",
        }
    }
}

/// Traps hidden on a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapKind {
    Arrow,
    Dart,
    Teleport,
    SleepGas,
    Pit,
    SpikedPit,
    Trapdoor,
    Mana,
}

impl TrapKind {
    pub fn description(&self) -> &'static str {
        match self {
            TrapKind::Arrow => "arrow trap",
            TrapKind::Dart => "dart trap",
            TrapKind::Teleport => "teleport trap",
            TrapKind::SleepGas => "sleeping gas trap",
            TrapKind::Pit => "pit",
            TrapKind::SpikedPit => "spiked pit",
            TrapKind::Trapdoor => "trapdoor",
            TrapKind::Mana => "mana drain trap",
        }
    }
}
