//! Computed effects and their application.
//!
//! Effects are computed when an action starts and applied one phase later.
//! Every roll happens during computation, so application is a pure state
//! update plus the floating results to display.

use crate::env::FloatingResult;
use crate::state::{AffectedStats, Combatant, CombatantId, Stats, StatusId};

/// One status added to or removed from a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusChange {
    pub status: StatusId,
    /// `true` when inflicted, `false` when cured.
    pub applied: bool,
}

/// Everything an action does to a single target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectOutcome {
    pub target: CombatantId,
    /// Signed HP change; negative is damage.
    pub hp: i64,
    /// Signed SP change.
    pub sp: i64,
    /// Signed parameter shift.
    pub parameters: Stats,
    pub statuses: Vec<StatusChange>,
    /// Brings a fallen target back before the HP change applies.
    pub revive: bool,
    /// At least one sub-effect landed. A target where nothing landed shows
    /// "Miss" instead of a zero.
    pub landed: bool,
}

/// What applying an outcome did, for the presentation layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppliedEffect {
    pub target: CombatantId,
    pub floating: Vec<FloatingResult>,
    /// HP went down.
    pub damaged: bool,
    /// Target was alive before and is dead now.
    pub killed: bool,
}

impl EffectOutcome {
    pub fn new(target: CombatantId) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn miss(target: CombatantId) -> Self {
        Self::new(target)
    }

    pub fn damage(target: CombatantId, amount: u32) -> Self {
        Self {
            hp: -i64::from(amount),
            landed: true,
            ..Self::new(target)
        }
    }

    /// Adds a signed change to the stats selected by `which`.
    pub fn add_stat_change(&mut self, which: AffectedStats, amount: i64) {
        if which.contains(AffectedStats::HP) {
            self.hp += amount;
        }
        if which.contains(AffectedStats::SP) {
            self.sp += amount;
        }
        self.parameters
            .shift(which & AffectedStats::PARAMETERS, amount as i32);
    }

    /// Applies the outcome to `target`.
    pub fn apply(&self, target: &mut Combatant) -> AppliedEffect {
        let mut applied = AppliedEffect {
            target: self.target,
            ..AppliedEffect::default()
        };

        if !self.landed {
            applied.floating.push(FloatingResult::Miss);
            return applied;
        }

        let was_alive = target.is_alive();
        if self.revive && target.is_dead() {
            target.revive(self.hp.max(1) as u32);
            applied.floating.push(FloatingResult::Recovery(target.hp.current));
        } else if target.is_alive() {
            let hp_delta = target.hp.apply(self.hp);
            let sp_delta = target.sp.apply(self.sp);
            if self.hp < 0 {
                applied.floating.push(FloatingResult::Damage((-hp_delta) as u32));
                applied.damaged = true;
            } else if self.hp > 0 {
                applied.floating.push(FloatingResult::Recovery(hp_delta as u32));
            } else if self.sp < 0 {
                applied.floating.push(FloatingResult::Damage((-sp_delta) as u32));
            } else if self.sp > 0 {
                applied.floating.push(FloatingResult::Recovery(sp_delta as u32));
            } else if self.statuses.is_empty() && self.parameters == Stats::default() {
                // landed with nothing to show: a zero, never "Miss"
                applied.floating.push(FloatingResult::Damage(0));
            }
            let p = self.parameters;
            target.modifiers.attack += p.attack;
            target.modifiers.defense += p.defense;
            target.modifiers.spirit += p.spirit;
            target.modifiers.agility += p.agility;
        }

        if target.is_alive() {
            for change in &self.statuses {
                let changed = if change.applied {
                    target.statuses.insert(change.status)
                } else {
                    target.statuses.remove(change.status)
                };
                if changed {
                    applied.floating.push(FloatingResult::Status {
                        status: change.status,
                        applied: change.applied,
                    });
                }
            }
        } else if was_alive {
            target.kill();
            applied.killed = true;
        }

        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ALLY_MAX_HP, ally};

    #[test]
    fn miss_shows_miss_and_changes_nothing() {
        let mut target = ally(0, 60);
        let applied = EffectOutcome::miss(target.id).apply(&mut target);
        assert_eq!(applied.floating, vec![FloatingResult::Miss]);
        assert_eq!(target.hp.current, 60);
    }

    #[test]
    fn damage_reports_amount_actually_lost() {
        let mut target = ally(0, 5);
        let applied = EffectOutcome::damage(target.id, 12).apply(&mut target);
        assert_eq!(applied.floating, vec![FloatingResult::Damage(5)]);
        assert!(applied.killed);
        assert!(target.is_dead());
    }

    #[test]
    fn zero_damage_that_landed_shows_zero_not_miss() {
        let mut target = ally(0, 60);
        let applied = EffectOutcome::damage(target.id, 0).apply(&mut target);
        assert_eq!(applied.floating, vec![FloatingResult::Damage(0)]);
        assert!(!applied.killed);
    }

    #[test]
    fn recovery_is_capped_at_maximum() {
        let mut target = ally(0, ALLY_MAX_HP - 10);
        let mut outcome = EffectOutcome::new(target.id);
        outcome.add_stat_change(AffectedStats::HP, 50);
        outcome.landed = true;
        let applied = outcome.apply(&mut target);
        assert_eq!(applied.floating, vec![FloatingResult::Recovery(10)]);
    }

    #[test]
    fn parameter_shift_updates_modifiers() {
        let mut target = ally(0, 60);
        let mut outcome = EffectOutcome::new(target.id);
        outcome.add_stat_change(AffectedStats::ATTACK | AffectedStats::DEFENSE, -3);
        outcome.landed = true;
        let applied = outcome.apply(&mut target);
        assert!(applied.floating.is_empty());
        assert_eq!(target.modifiers, Stats::new(-3, -3, 0, 0));
    }

    #[test]
    fn revive_only_affects_fallen_targets() {
        let mut target = ally(0, 0);
        let outcome = EffectOutcome {
            hp: 25,
            revive: true,
            landed: true,
            ..EffectOutcome::new(target.id)
        };
        let applied = outcome.apply(&mut target);
        assert_eq!(target.hp.current, 25);
        assert_eq!(applied.floating, vec![FloatingResult::Recovery(25)]);
    }

    #[test]
    fn statuses_skip_unchanged_entries() {
        let mut target = ally(0, 60);
        target.statuses.insert(StatusId(1));
        let outcome = EffectOutcome {
            statuses: vec![
                StatusChange {
                    status: StatusId(1),
                    applied: true,
                },
                StatusChange {
                    status: StatusId(2),
                    applied: true,
                },
            ],
            landed: true,
            ..EffectOutcome::new(target.id)
        };
        let applied = outcome.apply(&mut target);
        assert_eq!(
            applied.floating,
            vec![FloatingResult::Status {
                status: StatusId(2),
                applied: true
            }]
        );
    }

    #[test]
    fn statuses_do_not_land_on_a_killed_target() {
        let mut target = ally(0, 3);
        let outcome = EffectOutcome {
            hp: -10,
            statuses: vec![StatusChange {
                status: StatusId(4),
                applied: true,
            }],
            landed: true,
            ..EffectOutcome::new(target.id)
        };
        outcome.apply(&mut target);
        assert!(target.statuses.is_empty());
    }
}
