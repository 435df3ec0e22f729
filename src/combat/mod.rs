//! Combat system

pub mod attack;
pub mod damage;
pub mod status;

pub use damage::{AttackType, Damage, DamageSource, DamageType};
pub use status::{Effect, EffectKind, EffectLedger, EffectOrigin};
