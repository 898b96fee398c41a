//! Combat math: hit checks, effect magnitudes, and per-target outcomes.
mod damage;
mod hit;
mod result;

pub use damage::{
    SELF_DESTRUCT_VARIANCE, apply_variance, defended, physical_damage, self_destruct_damage,
    skill_effect,
};
pub use hit::{adjusted_hit, check_hit};
pub use result::{AppliedEffect, EffectOutcome, StatusChange};
