//! Item system

pub mod carry;
pub mod equipment;
pub mod identify;
pub mod inventory;
pub mod item;

pub use carry::CarryBand;
pub use equipment::{EquipSlot, Equipment};
pub use identify::Identification;
pub use inventory::Inventory;
pub use item::{Item, ItemCategory, ItemId, ItemKind};
