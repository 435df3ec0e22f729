//! Status effects system
//!
//! Timed modifiers attached to actors, and the player's handling of them.

use serde::{Deserialize, Serialize};

use crate::entities::attributes::Attribute;
use crate::entities::monster::MonsterKind;
use crate::entities::player::Player;
use crate::game::state::Session;
use crate::items::item::ItemId;

/// Every kind of effect an actor can be subject to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    // Attribute modifiers
    IncStr,
    DecStr,
    IncInt,
    DecInt,
    IncWis,
    DecWis,
    IncCon,
    DecCon,
    IncDex,
    DecDex,
    IncCha,
    DecCha,
    Heroism,
    Dizziness,

    // Derived value modifiers
    IncHpMax,
    DecHpMax,
    IncMpMax,
    DecMpMax,
    IncHpRegen,
    DecHpRegen,
    IncMpRegen,
    DecMpRegen,
    Protection,
    Invulnerability,
    IncDamage,
    Sickness,
    Speed,
    Slowness,

    // Resistances and protections
    ResistMagic,
    ResistFire,
    ResistCold,
    UndeadProtection,
    SpiritProtection,
    LifeProtection,
    Sustainment,
    NoTheft,

    // Conditions
    Poison,
    Blindness,
    Confusion,
    Paralysis,
    Clumsiness,
    Itching,
    TimeStop,
    Stealth,
    HoldMonster,
    Invisibility,
    Awareness,
    Enlightenment,
    WallWalk,
    Burdened,
    Overstrained,
    Sleep,

    // Applied once, never stored
    IncLevel,
    DecLevel,
    IncExp,
    DecExp,
    IncHp,
    MaxHp,
    IncMp,
    MaxMp,
    IncRnd,
    DecRnd,
}

/// Static properties of an effect kind
#[derive(Debug, Clone, Copy)]
pub struct EffectInfo {
    /// Default duration; 1 means applied once, 0 means until removed
    pub duration: u32,
    pub amount: i32,
    pub msg_start: Option<&'static str>,
    pub msg_stop: Option<&'static str>,
    pub desc: Option<&'static str>,
    /// Re-adding raises the magnitude instead of extending the duration
    pub cumulative: bool,
}

const fn info(
    duration: u32,
    amount: i32,
    msg_start: Option<&'static str>,
    msg_stop: Option<&'static str>,
    desc: Option<&'static str>,
    cumulative: bool,
) -> EffectInfo {
    EffectInfo { duration, amount, msg_start, msg_stop, desc, cumulative }
}

impl EffectKind {
    pub fn info(&self) -> EffectInfo {
        use EffectKind::*;
        match self {
            IncStr => info(1, 1, Some("You feel stronger!"), Some("You feel weaker."), Some("increased strength"), true),
            DecStr => info(1, 1, Some("You feel weaker!"), Some("You regain your strength."), Some("decreased strength"), true),
            IncInt => info(1, 1, Some("You feel clever!"), Some("You feel less clever."), Some("increased intelligence"), true),
            DecInt => info(1, 1, Some("You feel stupid."), Some("You regain your intelligence."), Some("decreased intelligence"), true),
            IncWis => info(1, 1, Some("You feel wise!"), Some("You feel less wise."), Some("increased wisdom"), true),
            DecWis => info(1, 1, Some("You feel foolish."), Some("You regain your wisdom."), Some("decreased wisdom"), true),
            IncCon => info(1, 1, Some("You feel tough!"), Some("You feel less tough."), Some("increased constitution"), true),
            DecCon => info(1, 1, Some("You feel fragile."), Some("You regain your constitution."), Some("decreased constitution"), true),
            IncDex => info(1, 1, Some("You feel agile!"), Some("You feel less agile."), Some("increased dexterity"), true),
            DecDex => info(1, 1, Some("You feel clumsy!"), Some("You regain your dexterity."), Some("decreased dexterity"), true),
            IncCha => info(1, 1, Some("You feel charming!"), Some("You feel less charming."), Some("increased charisma"), true),
            DecCha => info(1, 1, Some("You feel ugly!"), Some("You regain your charm."), Some("decreased charisma"), true),
            Heroism => info(250, 5, Some("You feel like a hero!"), Some("You feel less heroic."), Some("heroism"), false),
            Dizziness => info(250, 5, Some("You feel dizzy and weak!"), Some("You no longer feel dizzy."), Some("dizziness"), false),

            IncHpMax => info(1, 10, Some("You feel healthy!"), Some("You feel less healthy."), Some("increased max. hit points"), true),
            DecHpMax => info(1, 10, Some("You feel less healthy."), Some("You feel healthy again."), Some("decreased max. hit points"), true),
            IncMpMax => info(1, 10, Some("You feel energetic!"), Some("You feel less energetic."), Some("increased max. mana"), true),
            DecMpMax => info(1, 10, Some("You feel less energetic."), Some("You feel energetic again."), Some("decreased max. mana"), true),
            IncHpRegen => info(100, 1, Some("You start to regenerate."), Some("Your regeneration slows down."), Some("regeneration"), true),
            DecHpRegen => info(100, 1, Some("Your regeneration slows down."), Some("Your regeneration speeds up again."), Some("slowed regeneration"), true),
            IncMpRegen => info(100, 1, Some("You feel your energy flowing."), Some("Your energy flow slows down."), Some("mana regeneration"), true),
            DecMpRegen => info(100, 1, Some("Your energy flow slows down."), Some("Your energy flows again."), Some("slowed mana regeneration"), true),
            Protection => info(250, 2, Some("You feel protected."), Some("You feel less protected."), Some("protection"), true),
            Invulnerability => info(20, 10, Some("You feel invulnerable!"), Some("You feel vulnerable again."), Some("invulnerability"), false),
            IncDamage => info(100, 5, Some("You feel mighty."), Some("You feel less mighty."), Some("increased damage"), true),
            Sickness => info(100, 10, Some("You feel sick."), Some("You feel better."), Some("sickness"), false),
            Speed => info(250, 50, Some("You are moving faster."), Some("You feel yourself slow down."), Some("fast"), false),
            Slowness => info(250, 50, Some("You feel yourself slow down."), Some("You are moving faster again."), Some("slow"), false),

            ResistMagic => info(250, 5, Some("You feel resistant to magic."), Some("You are no longer resistant to magic."), Some("magic resistance"), true),
            ResistFire => info(250, 20, Some("You feel a chill."), Some("You are no longer fire resistant."), Some("fire resistance"), true),
            ResistCold => info(250, 20, Some("You feel warm."), Some("You are no longer cold resistant."), Some("cold resistance"), true),
            UndeadProtection => info(250, 1, Some("You feel safe from the undead."), Some("You feel vulnerable to the undead."), Some("undead protection"), false),
            SpiritProtection => info(250, 1, Some("You feel safe from spirits."), Some("You feel vulnerable to spirits."), Some("spirit protection"), false),
            LifeProtection => info(0, 1, None, None, Some("life protection"), true),
            Sustainment => info(0, 1, None, None, Some("sustainment"), false),
            NoTheft => info(0, 1, None, None, Some("theft protection"), false),

            Poison => info(100, 1, Some("You feel poison running through your veins."), Some("You are no longer poisoned."), Some("poisoned"), false),
            Blindness => info(250, 1, Some("You have been blinded!"), Some("You can see again."), Some("blind"), false),
            Confusion => info(25, 1, Some("You are confused."), Some("You regain your senses."), Some("confused"), false),
            Paralysis => info(25, 1, Some("You are paralysed."), Some("You can move again."), Some("paralysed"), false),
            Clumsiness => info(250, 1, Some("You feel clumsy!"), Some("You feel less clumsy."), Some("clumsy"), false),
            Itching => info(100, 1, Some("Your skin begins to itch."), Some("Your skin stops itching."), Some("itching"), false),
            TimeStop => info(10, 1, Some("Time stands still."), Some("Time flows again."), Some("time stop"), false),
            Stealth => info(250, 1, Some("You are moving silently."), Some("You are no longer stealthy."), Some("stealth"), false),
            HoldMonster => info(30, 1, None, None, Some("held"), false),
            Invisibility => info(250, 1, Some("You vanish!"), Some("You reappear."), Some("invisible"), false),
            Awareness => info(250, 3, Some("You become aware of your surroundings."), Some("You are no longer as aware of your surroundings."), Some("awareness"), false),
            Enlightenment => info(250, 8, Some("You have been granted enlightenment!"), Some("You are no longer enlightened."), Some("enlightenment"), false),
            WallWalk => info(20, 1, Some("You can walk through walls!"), Some("You can no longer walk through walls."), Some("wall-walk"), false),
            Burdened => info(0, 1, Some("You are burdened."), Some("You are no longer burdened."), Some("burdened"), false),
            Overstrained => info(0, 1, Some("You are overloaded!"), Some("You are no longer overloaded."), Some("overloaded"), false),
            Sleep => info(25, 1, Some("You fall asleep."), Some("You wake up."), None, false),

            IncLevel => info(1, 1, None, None, None, false),
            DecLevel => info(1, 1, None, None, None, false),
            IncExp => info(1, 100, Some("You feel experienced."), None, None, false),
            DecExp => info(1, 100, Some("You feel less experienced."), None, None, false),
            IncHp => info(1, 50, Some("You feel better."), None, None, false),
            MaxHp => info(1, 1, Some("You are completely healed."), None, None, false),
            IncMp => info(1, 50, Some("Magical energies course through your body."), None, None, false),
            MaxMp => info(1, 1, Some("You feel energised."), None, None, false),
            IncRnd => info(1, 1, None, None, None, false),
            DecRnd => info(1, 1, None, None, None, false),
        }
    }
}

/// Who or what caused an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EffectOrigin {
    #[default]
    Intrinsic,
    /// Granted while the item is equipped
    Item(ItemId),
    Monster(MonsterKind),
    Spell,
}

/// A single active effect instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub amount: i32,
    /// Remaining turns; 0 never expires
    pub turns: u32,
    /// Game turn the effect started on
    pub start: u64,
    pub origin: EffectOrigin,
}

impl Effect {
    /// An effect with the kind's default magnitude and duration
    pub fn new(kind: EffectKind) -> Self {
        let info = kind.info();
        Self {
            kind,
            amount: info.amount,
            turns: info.duration,
            start: 0,
            origin: EffectOrigin::Intrinsic,
        }
    }

    pub fn with_amount(mut self, amount: i32) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_turns(mut self, turns: u32) -> Self {
        self.turns = turns;
        self
    }

    pub fn permanent(self) -> Self {
        self.with_turns(0)
    }

    pub fn with_origin(mut self, origin: EffectOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Applied immediately rather than stored
    pub fn is_one_time(&self) -> bool {
        self.turns == 1
    }

    /// Count down one turn; true once the effect has run out
    pub fn expire(&mut self) -> bool {
        if self.turns == 0 {
            return false;
        }
        self.turns -= 1;
        self.turns == 0
    }

    pub fn msg_start(&self) -> Option<&'static str> {
        self.kind.info().msg_start
    }

    pub fn msg_stop(&self) -> Option<&'static str> {
        self.kind.info().msg_stop
    }
}

/// Ordered collection of active effects owned by one actor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectLedger {
    effects: Vec<Effect>,
}

impl EffectLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an effect. Item-bound effects are always kept separately; others
    /// merge into an existing effect of the same kind. Returns true if a new
    /// instance was stored.
    pub fn add(&mut self, effect: Effect) -> bool {
        if !matches!(effect.origin, EffectOrigin::Item(_)) {
            if let Some(existing) = self
                .effects
                .iter_mut()
                .find(|e| e.kind == effect.kind && !matches!(e.origin, EffectOrigin::Item(_)))
            {
                if effect.kind.info().cumulative {
                    existing.amount += effect.amount;
                    if existing.turns != 0 {
                        existing.turns = existing.turns.max(effect.turns);
                    }
                } else {
                    existing.amount = existing.amount.max(effect.amount);
                    if existing.turns != 0 {
                        existing.turns = if effect.turns == 0 { 0 } else { existing.turns + effect.turns };
                    }
                }
                return false;
            }
        }
        self.effects.push(effect);
        true
    }

    /// Remove the first effect of a kind
    pub fn remove(&mut self, kind: EffectKind) -> Option<Effect> {
        let idx = self.effects.iter().position(|e| e.kind == kind)?;
        Some(self.effects.remove(idx))
    }

    /// Remove every effect with the given origin
    pub fn remove_by_origin(&mut self, origin: EffectOrigin) -> Vec<Effect> {
        let (removed, kept) = self.effects.drain(..).partition(|e| e.origin == origin);
        self.effects = kept;
        removed
    }

    pub fn get(&self, kind: EffectKind) -> Option<&Effect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn get_mut(&mut self, kind: EffectKind) -> Option<&mut Effect> {
        self.effects.iter_mut().find(|e| e.kind == kind)
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Summed magnitude of all effects of a kind (0 if none)
    pub fn magnitude(&self, kind: EffectKind) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.amount)
            .sum()
    }

    /// Step every effect one turn, removing and returning those that ran out
    pub fn expire_all(&mut self) -> Vec<Effect> {
        let mut expired = Vec::new();
        let mut kept = Vec::with_capacity(self.effects.len());
        for mut effect in self.effects.drain(..) {
            if effect.expire() {
                expired.push(effect);
            } else {
                kept.push(effect);
            }
        }
        self.effects = kept;
        expired
    }

    /// Distinct descriptions of the active effects, in order
    pub fn descriptions(&self) -> Vec<&'static str> {
        let mut descs = Vec::new();
        for desc in self.effects.iter().filter_map(|e| e.kind.info().desc) {
            if !descs.contains(&desc) {
                descs.push(desc);
            }
        }
        descs
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

// =============================================================================
// Player effect handling
// =============================================================================

impl Player {
    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects.has(kind)
    }

    pub fn effect_magnitude(&self, kind: EffectKind) -> i32 {
        self.effects.magnitude(kind)
    }

    /// Apply an effect to the player. One-time effects change base values
    /// immediately; sleep forces the player through its turns. Returns true
    /// if a new effect instance was stored.
    pub fn add_effect(&mut self, session: &mut Session, mut effect: Effect) -> bool {
        effect.start = session.turn;

        if effect.is_one_time() {
            self.apply_one_time_effect(session, &effect);
            return false;
        }

        if effect.kind == EffectKind::Sleep {
            if let Some(msg) = effect.msg_start() {
                self.log.add(msg);
            }
            for _ in 0..effect.turns {
                if session.is_over() {
                    break;
                }
                self.make_move(session, 1);
            }
            if let Some(msg) = effect.msg_stop() {
                self.log.add(msg);
            }
            return false;
        }

        let strength_before = self.strength();
        let msg = effect.msg_start();
        let added = self.effects.add(effect);
        if added {
            if let Some(msg) = msg {
                self.log.add(msg);
            }
        }
        if self.strength() != strength_before {
            self.recalc_carry_state();
        }
        added
    }

    /// Remove the first effect of a kind, logging its stop message
    pub fn remove_effect(&mut self, kind: EffectKind) -> bool {
        let strength_before = self.strength();
        let Some(effect) = self.effects.remove(kind) else {
            return false;
        };
        if let Some(msg) = effect.msg_stop() {
            self.log.add(msg);
        }
        self.after_effect_change(strength_before);
        true
    }

    /// Remove an effect without telling the player
    pub(crate) fn remove_effect_silently(&mut self, kind: EffectKind) -> bool {
        self.log.mute();
        let removed = self.remove_effect(kind);
        self.log.unmute();
        removed
    }

    /// Attach the effects of a newly equipped item
    pub(crate) fn add_item_effects(&mut self, item_id: ItemId) {
        let Some(item) = self.inventory.get(item_id) else {
            return;
        };
        let effects = item.effects.clone();
        let strength_before = self.strength();
        for effect in effects {
            if effect.amount == 0 {
                continue;
            }
            let msg = effect.msg_start();
            if self.effects.add(effect.with_origin(EffectOrigin::Item(item_id))) {
                if let Some(msg) = msg {
                    self.log.add(msg);
                }
            }
        }
        self.after_effect_change(strength_before);
    }

    /// Detach exactly the effects an item granted
    pub(crate) fn remove_item_effects(&mut self, item_id: ItemId) {
        let strength_before = self.strength();
        for effect in self.effects.remove_by_origin(EffectOrigin::Item(item_id)) {
            if let Some(msg) = effect.msg_stop() {
                self.log.add(msg);
            }
        }
        self.after_effect_change(strength_before);
    }

    /// Step all effects one turn, announcing the ones that end
    pub(crate) fn expire_effects(&mut self) {
        let strength_before = self.strength();
        let expired = self.effects.expire_all();
        if expired.is_empty() {
            return;
        }
        for effect in &expired {
            log::debug!("Effect {:?} expired", effect.kind);
            if let Some(msg) = effect.msg_stop() {
                self.log.add(msg);
            }
        }
        self.after_effect_change(strength_before);
    }

    fn after_effect_change(&mut self, strength_before: i32) {
        self.clamp_vitals();
        if self.strength() != strength_before {
            self.recalc_carry_state();
        }
    }

    fn apply_one_time_effect(&mut self, session: &mut Session, effect: &Effect) {
        use EffectKind::*;

        let amount = effect.amount;
        match effect.kind {
            IncStr | IncInt | IncWis | IncCon | IncDex | IncCha => {
                if let Some(attr) = Attribute::from_effect(effect.kind) {
                    *self.attributes.get_mut(attr) += amount;
                }
            }
            DecStr | DecInt | DecWis | DecCon | DecDex | DecCha => {
                if let Some(attr) = Attribute::from_effect(effect.kind) {
                    if self.has_effect(Sustainment) {
                        return;
                    }
                    *self.attributes.get_mut(attr) -= amount;
                }
            }
            IncRnd => {
                let attr = Attribute::ALL[session.rng.rand_0n(6) as usize];
                *self.attributes.get_mut(attr) += 1;
                self.log.add(format!("You feel your {} increase.", attr.name()));
            }
            DecRnd => {
                let attr = Attribute::ALL[session.rng.rand_0n(6) as usize];
                *self.attributes.get_mut(attr) -= 1;
                self.log.add(format!("You feel your {} decrease.", attr.name()));
            }
            IncHpMax => self.hp_max += (self.hp_max * amount / 100).max(1),
            DecHpMax => {
                self.hp_max_lose((self.hp_max * amount / 100).max(1));
            }
            IncMpMax => self.mp_max += (self.mp_max * amount / 100).max(1),
            DecMpMax => {
                self.mp_max_lose((self.mp_max * amount / 100).max(1));
            }
            IncLevel => self.level_up(session, amount.max(1) as u32),
            DecLevel => self.level_down(session, amount.max(1) as u32),
            IncExp => {
                let gain = if amount > 0 {
                    amount as u32
                } else {
                    crate::progression::xp::exp_to_next_level(self.level, self.experience)
                };
                self.gain_exp(session, gain);
            }
            DecExp => self.lose_exp(session, amount.max(0) as u32),
            IncHp => {
                let heal = (self.hp_max() * amount / 100).max(1);
                self.hp_gain(heal);
            }
            MaxHp => self.hp = self.hp_max(),
            IncMp => {
                let restore = (self.mp_max() * amount / 100).max(1);
                self.mp_gain(restore);
            }
            MaxMp => self.mp = self.mp_max(),
            other => {
                log::warn!("Effect {:?} cannot be applied once", other);
                return;
            }
        }

        if let Some(msg) = effect.msg_start() {
            self.log.add(msg);
        }
        self.clamp_vitals();
        self.recalc_carry_state();
    }
}
