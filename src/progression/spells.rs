//! Known spells
//!
//! Spell kinds double as the subtypes of spellbooks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellKind {
    Protection,
    MagicMissile,
    Dexterity,
    Sleep,
    CharmMonster,
    SonicSpear,
    Web,
    Strength,
    Enlightenment,
    Healing,
    CureBlindness,
    CreateMonster,
    PhantasmalForces,
    Invisibility,
    Fireball,
    ConeOfCold,
}

impl SpellKind {
    pub const ALL: [SpellKind; 16] = [
        SpellKind::Protection,
        SpellKind::MagicMissile,
        SpellKind::Dexterity,
        SpellKind::Sleep,
        SpellKind::CharmMonster,
        SpellKind::SonicSpear,
        SpellKind::Web,
        SpellKind::Strength,
        SpellKind::Enlightenment,
        SpellKind::Healing,
        SpellKind::CureBlindness,
        SpellKind::CreateMonster,
        SpellKind::PhantasmalForces,
        SpellKind::Invisibility,
        SpellKind::Fireball,
        SpellKind::ConeOfCold,
    ];
    pub const COUNT: usize = Self::ALL.len();

    pub fn name(&self) -> &'static str {
        match self {
            SpellKind::Protection => "protection",
            SpellKind::MagicMissile => "magic missile",
            SpellKind::Dexterity => "dexterity",
            SpellKind::Sleep => "sleep",
            SpellKind::CharmMonster => "charm monster",
            SpellKind::SonicSpear => "sonic spear",
            SpellKind::Web => "web",
            SpellKind::Strength => "strength",
            SpellKind::Enlightenment => "enlightenment",
            SpellKind::Healing => "healing",
            SpellKind::CureBlindness => "cure blindness",
            SpellKind::CreateMonster => "create monster",
            SpellKind::PhantasmalForces => "phantasmal forces",
            SpellKind::Invisibility => "invisibility",
            SpellKind::Fireball => "fireball",
            SpellKind::ConeOfCold => "cone of cold",
        }
    }

    /// Spell level (0-based), drives book prices
    pub fn level(&self) -> u32 {
        match self {
            SpellKind::Protection | SpellKind::MagicMissile | SpellKind::Dexterity => 0,
            SpellKind::Sleep | SpellKind::CharmMonster | SpellKind::SonicSpear => 1,
            SpellKind::Web | SpellKind::Strength | SpellKind::Enlightenment => 2,
            SpellKind::Healing | SpellKind::CureBlindness | SpellKind::CreateMonster => 3,
            SpellKind::PhantasmalForces | SpellKind::Invisibility => 4,
            SpellKind::Fireball | SpellKind::ConeOfCold => 5,
        }
    }
}

/// A spell the player has learned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownSpell {
    pub kind: SpellKind,
    /// Times the spell has been learned, improving it
    pub knowledge: u32,
    /// Times the spell has been cast
    pub used: u32,
}

impl KnownSpell {
    pub fn new(kind: SpellKind) -> Self {
        Self { kind, knowledge: 1, used: 0 }
    }
}

/// Learn a spell or deepen knowledge of an already known one.
/// Returns the new knowledge level.
pub fn learn_spell(known: &mut Vec<KnownSpell>, kind: SpellKind) -> u32 {
    if let Some(spell) = known.iter_mut().find(|s| s.kind == kind) {
        spell.knowledge += 1;
        spell.knowledge
    } else {
        known.push(KnownSpell::new(kind));
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_learn_spell() {
        let mut known = Vec::new();
        assert_eq!(learn_spell(&mut known, SpellKind::Fireball), 1);
        assert_eq!(learn_spell(&mut known, SpellKind::Web), 1);
        assert_eq!(learn_spell(&mut known, SpellKind::Fireball), 2);
        assert_eq!(known.len(), 2);
    }
}
