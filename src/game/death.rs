//! Death and game end
//!
//! The death procedure, its two ways out (life protection and wizard mode),
//! and the report written when the game really ends.

use serde::{Deserialize, Serialize};

use super::state::Session;
use crate::combat::status::EffectKind;
use crate::entities::monster::MonsterKind;
use crate::entities::player::{Player, Sex};
use crate::items::equipment::EquipSlot;
use crate::items::item::{capitalize, ItemCategory, ItemKind};
use crate::progression::spells::SpellKind;
use crate::progression::xp::a_an;
use crate::world::tile::{TileType, TrapKind};

/// What ended (or tried to end) the player's life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Monster(MonsterKind),
    Effect(EffectKind),
    Trap(TrapKind),
    Map(TileType),
    /// Killed by one's own spell
    Spell(SpellKind),
    Curse(ItemCategory),
    Sobject,
    Sphere,
    LastLevel,
    Stuck,
    TooLate,
    Won,
    Lost,
    Quit,
}

impl DeathCause {
    fn rank(&self) -> u8 {
        match self {
            DeathCause::Monster(_) => 0,
            DeathCause::Effect(_) => 1,
            DeathCause::Trap(_) => 2,
            DeathCause::Map(_) => 3,
            DeathCause::Spell(_) => 4,
            DeathCause::Curse(_) => 5,
            DeathCause::Sobject => 6,
            DeathCause::Sphere => 7,
            DeathCause::LastLevel => 8,
            DeathCause::Stuck => 9,
            DeathCause::TooLate => 10,
            DeathCause::Won => 11,
            DeathCause::Lost => 12,
            DeathCause::Quit => 13,
        }
    }

    /// Causes life protection can save the player from
    pub fn is_preventable(&self) -> bool {
        self.rank() < DeathCause::Stuck.rank()
    }

    /// Causes that are an actual death rather than the end of the game
    pub fn is_death(&self) -> bool {
        self.rank() < DeathCause::TooLate.rank()
    }

    fn message(&self) -> &'static str {
        match self {
            DeathCause::LastLevel => "You fade to gray...",
            DeathCause::Stuck => "You are trapped in solid rock.",
            DeathCause::TooLate => "You returned home too late!",
            DeathCause::Won => "You saved your daughter!",
            DeathCause::Lost => "You didn't manage to save your daughter.",
            DeathCause::Quit => "You quit.",
            _ => "You die...",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            DeathCause::LastLevel => "In Memoriam",
            DeathCause::Stuck => "Ouch!",
            DeathCause::TooLate | DeathCause::Quit => "The End",
            DeathCause::Won => "Congratulations! You won!",
            DeathCause::Lost => "You lost",
            _ => "R. I. P.",
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            DeathCause::LastLevel => "passed away",
            DeathCause::Stuck => "got stuck in solid rock",
            DeathCause::TooLate => "returned with the potion too late",
            DeathCause::Won => "returned in time with the cure",
            DeathCause::Lost => "could not find the potion in time",
            DeathCause::Quit => "quit the game",
            _ => "killed",
        }
    }
}

/// Summary produced when the game ends
#[derive(Debug, Clone, PartialEq)]
pub struct DeathReport {
    pub title: String,
    /// One-line description, e.g. "Ada (f), killed on level 3 by a troll."
    pub description: String,
    /// Full report text
    pub text: String,
    pub score: i64,
    pub cause: DeathCause,
}

fn pronoun(sex: Sex) -> (&'static str, &'static str, &'static str) {
    match sex {
        Sex::Male => ("He", "his", "himself"),
        Sex::Female => ("She", "her", "herself"),
    }
}

fn plural(count: u32) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn monster_plural(kind: MonsterKind, count: u32) -> String {
    let name = kind.name();
    if count == 1 {
        name.to_string()
    } else if let Some(stem) = name.strip_suffix("elf") {
        format!("{}elves", stem)
    } else {
        format!("{}s", name)
    }
}

impl Player {
    /// Run the death procedure. Returns true if the game is over; false if
    /// the player was saved by life protection or wizard mode.
    pub fn die(&mut self, session: &mut Session, cause: DeathCause) -> bool {
        if session.is_over() {
            return true;
        }

        if cause.is_preventable() && self.has_effect(EffectKind::LifeProtection) {
            self.log.add("You feel wiiieeeeerrrrrd all over!");
            match self.effects.get_mut(EffectKind::LifeProtection) {
                Some(effect) if effect.amount > 1 => effect.amount -= 1,
                _ => {
                    self.remove_effect(EffectKind::LifeProtection);
                }
            }
            if cause == DeathCause::LastLevel {
                self.level_up(session, 1);
            }
            self.hp = self.hp_max();
            log::info!("{} was saved by life protection ({:?})", self.name, cause);
            return false;
        }

        self.log.add(cause.message());

        if session.wizard_mode && cause.is_death() {
            self.log.add("WIZARD MODE. You stay alive.");
            self.hp = self.hp_max();
            self.mp = self.mp_max();
            self.level = self.level.max(1);
            for kind in [
                EffectKind::Paralysis,
                EffectKind::Confusion,
                EffectKind::Blindness,
                EffectKind::Poison,
            ] {
                self.remove_effect(kind);
            }
            if self.strength() <= 0 {
                self.remove_effect(EffectKind::DecStr);
            }
            if self.dexterity() <= 0 {
                self.remove_effect(EffectKind::DecDex);
            }
            log::info!("Wizard mode intercepted death ({:?})", cause);
            return false;
        }

        let report = self.death_report(session, cause);
        session.end(report);
        true
    }

    /// Final score: money, possessions and experience, plus a time bonus
    /// when the game was won
    pub fn calc_score(&self, session: &Session, won: bool) -> i64 {
        let mut score = self.gold() as i64 + self.bank_account as i64
            - self.outstanding_taxes as i64;
        score += self
            .inventory
            .iter()
            .filter(|i| i.kind != ItemKind::Gold)
            .map(|i| i.price() as i64)
            .sum::<i64>();
        score += self.experience as i64;
        if won {
            score += session.turns_remaining() as i64 * (session.difficulty_scalar() as i64 + 1);
        }
        score
    }

    /// One-line death description
    pub fn death_description(&self, cause: DeathCause, verbose: bool) -> String {
        let (he, his, himself) = pronoun(self.sex);
        let sex = match self.sex {
            Sex::Male => 'm',
            Sex::Female => 'f',
        };
        let mut text = format!("{} ({}), {}", self.name, sex, cause.verb());

        if verbose {
            text.push_str(&format!(" on level {}", self.pos.z));
            if self.stats.deepest_level as i32 > self.pos.z {
                text.push_str(&format!(" (max. {})", self.stats.deepest_level));
            }
            if cause.is_death() {
                text.push_str(&format!(
                    " with {} and a maximum of {} hp",
                    self.hp,
                    self.hp_max()
                ));
            }
        }

        match cause {
            DeathCause::Effect(EffectKind::DecStr) => text.push_str(" by enfeeblement."),
            DeathCause::Effect(EffectKind::DecDex) => text.push_str(" by clumsiness."),
            DeathCause::Effect(EffectKind::Poison) => text.push_str(" by poison."),
            DeathCause::Effect(_) => text.push('.'),
            DeathCause::LastLevel => text.push_str(&format!(". {} left {} body.", he, his)),
            DeathCause::Monster(kind) => {
                text.push_str(&format!(" by {} {}.", a_an(kind.name()), kind.name()))
            }
            DeathCause::Sphere => text.push_str(" by a sphere of destruction."),
            DeathCause::Trap(trap) => text.push_str(&format!(
                " by {} {}.",
                a_an(trap.description()),
                trap.description()
            )),
            DeathCause::Map(tile) => text.push_str(&format!(" by {}.", tile.description())),
            DeathCause::Spell(spell) => {
                text.push_str(&format!(" {} with the spell \"{}\".", himself, spell.name()))
            }
            DeathCause::Curse(category) => {
                text.push_str(&format!(" by a cursed {}.", category.name()))
            }
            DeathCause::Sobject => text.push_str(" by toxic water from a fountain."),
            _ => text.push('.'),
        }
        text
    }

    /// Assemble the full death report. The pack is fully identified first.
    pub fn death_report(&mut self, session: &Session, cause: DeathCause) -> DeathReport {
        let ids: Vec<_> = self.inventory.iter().map(|item| item.id).collect();
        for id in ids {
            self.identify_item(id);
        }

        let (he, _, _) = pronoun(self.sex);
        let description = self.death_description(cause, true);
        let mut text = description.clone();

        let mobuls = (session.turn + 99) / 100;
        text.push_str(&format!(
            "\n\n{} {} after searching the potion for {} mobul{}. ",
            he,
            if cause.is_death() { "died" } else { "returned" },
            mobuls,
            if mobuls == 1 { "" } else { "s" }
        ));
        let stats = &self.stats;
        text.push_str(&format!(
            "{} cast {} spell{}, quaffed {} potion{}, nibbled {} cookie{} and read {} book{} and {} scroll{}. ",
            he,
            stats.spells_cast,
            plural(stats.spells_cast),
            stats.potions_quaffed,
            plural(stats.potions_quaffed),
            stats.cookies_nibbled,
            plural(stats.cookies_nibbled),
            stats.books_read,
            plural(stats.books_read),
            stats.scrolls_read,
            plural(stats.scrolls_read)
        ));
        if self.bank_account > 0 {
            text.push_str(&format!("{} had {} gp on the bank account.", he, self.bank_account));
        }

        if self.pos.z > 0 {
            if let Some(map) = session.dungeon.level(self.pos.z) {
                text.push_str("\n\n-- The current level ------------------\n\n");
                text.push_str(&map.dump(Some(self.pos)));
            }
        }

        text.push_str("\n\n-- Attributes -------------------------\n\n");
        let attrs = &self.attributes;
        for (label, value, orig) in [
            ("Strength:    ", attrs.strength, stats.str_orig),
            ("Intelligence:", attrs.intelligence, stats.int_orig),
            ("Wisdom:      ", attrs.wisdom, stats.wis_orig),
            ("Constitution:", attrs.constitution, stats.con_orig),
            ("Dexterity:   ", attrs.dexterity, stats.dex_orig),
            ("Charisma:    ", attrs.charisma, stats.cha_orig),
        ] {
            text.push_str(&format!("{} {} ({:+})\n", label, value, value - orig));
        }

        let effects = self.effects.descriptions();
        if !effects.is_empty() {
            text.push_str("\n\n-- Effects ----------------------------\n\n");
            for desc in effects {
                text.push_str(&format!("{}\n", desc));
            }
        }

        if !self.known_spells.is_empty() {
            text.push_str("\n\n-- Known Spells -----------------------\n\n");
            for spell in &self.known_spells {
                text.push_str(&format!(
                    "{:<24} (lvl. {:2}): {:3}\n",
                    capitalize(spell.kind.name()),
                    spell.knowledge,
                    spell.used
                ));
            }
        }

        text.push_str("\n\n-- Creatures vanquished ---------------\n\n");
        let mut body_count = 0;
        for kind in MonsterKind::ALL {
            let kills = stats.kills(kind);
            if kills > 0 {
                text.push_str(&format!("{:3} {}\n", kills, capitalize(&monster_plural(kind, kills))));
                body_count += kills;
            }
        }
        text.push_str(&format!("\n{:3} total\n", body_count));

        text.push_str("\n\n-- Equipment --------------------------\n\n");
        let mut equipped = 0;
        for slot in EquipSlot::ALL {
            if let Some(item) = self.equipped_item(slot) {
                let label = format!("{}:", capitalize(slot.name()));
                text.push_str(&format!("{:<9} {}\n", label, item.describe(true)));
                equipped += 1;
            }
        }

        if equipped < self.inventory.len() {
            text.push_str("\n\n-- Items in pack ----------------------\n\n");
            for item in self.inventory.iter() {
                if self.equipment.slot_of(item.id).is_none() {
                    text.push_str(&format!("{}\n", item.describe(true)));
                }
            }
        }

        text.push_str("\n\n-- Last messages ----------------------\n\n");
        for entry in self.log.last(10) {
            text.push_str(&format!("{}\n", entry.message));
        }

        DeathReport {
            title: cause.title().to_string(),
            description,
            text,
            score: self.calc_score(session, cause == DeathCause::Won),
            cause,
        }
    }
}
