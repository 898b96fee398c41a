//! Effect planning.
//!
//! Every [`BattleAction`] variant is resolved here in one exhaustive `match`.
//! Planning happens when an action starts: all rolls are drawn and the
//! per-target [`EffectOutcome`]s are fixed, so the result phase only applies
//! what was planned.

use crate::action::{
    ActionDescriptor, BattleAction, ItemDescriptor, QueuedAction, SkillKind, SoundCues,
    StatusMode, SwitchEffects, TargetList,
};
use crate::combat::{
    EffectOutcome, SELF_DESTRUCT_VARIANCE, StatusChange, adjusted_hit, apply_variance, check_hit,
    defended, physical_damage, self_destruct_damage, skill_effect,
};
use crate::config::BattleConfig;
use crate::env::{DataOracle, Dice};
use crate::state::{
    AffectedStats, AnimationId, BattleState, Combatant, CombatantId, EnemyId, ItemId, Side,
    SwitchId,
};

/// State change on the source or the battle that is not tied to a target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SideEffect {
    #[default]
    None,
    Defend,
    Charge,
    /// The source leaves the battle without dying.
    Hide,
    PartyEscape {
        success: bool,
    },
    Transform(EnemyId),
    Switch(SwitchId),
}

/// Resources paid when the action starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionCost {
    pub sp: u32,
    pub item: Option<ItemId>,
}

/// Fully rolled action, ready to be applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionPlan {
    pub source: CombatantId,
    pub action: BattleAction,
    pub targets: TargetList,
    pub outcomes: Vec<EffectOutcome>,
    pub side_effect: SideEffect,
    pub switches: SwitchEffects,
    pub cost: ActionCost,
    pub cues: SoundCues,
    pub animation: Option<AnimationId>,
}

impl ActionPlan {
    fn new(source: CombatantId, queued: &QueuedAction, targets: TargetList) -> Self {
        Self {
            source,
            action: queued.action,
            targets,
            outcomes: Vec::new(),
            side_effect: SideEffect::None,
            switches: queued.switches,
            cost: ActionCost::default(),
            cues: SoundCues::default(),
            animation: None,
        }
    }

    /// True when the action had targeted effects and none of them landed.
    pub fn missed_everything(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(|outcome| !outcome.landed)
    }
}

/// Rolls the effects of `queued` against the already revalidated `targets`.
pub fn plan_effects(
    source: &Combatant,
    queued: &QueuedAction,
    targets: TargetList,
    state: &BattleState,
    config: &BattleConfig,
    data: &dyn DataOracle,
    dice: &mut Dice<'_>,
) -> ActionPlan {
    let mut plan = ActionPlan::new(source.id, queued, targets);

    match queued.action {
        BattleAction::Attack | BattleAction::DualAttack => {
            plan.animation = source.attack.animation;
            for target in resolve(state, &plan.targets) {
                plan.outcomes.push(physical_hit(source, target, config, dice));
            }
        }
        BattleAction::Skill(id) => match data.skill(id) {
            Some(skill) => plan_skill(&mut plan, source, skill, state, dice),
            None => tracing::warn!("effects: unknown skill {} used by {}", id, source.name),
        },
        BattleAction::Item(id) => match data.item(id) {
            Some(item) => plan_item(&mut plan, source, item, state),
            None => tracing::warn!("effects: unknown item {} used by {}", id, source.name),
        },
        BattleAction::Defend => plan.side_effect = SideEffect::Defend,
        BattleAction::Charge => plan.side_effect = SideEffect::Charge,
        BattleAction::SelfDestruct => {
            plan.animation = source.attack.animation;
            let attack = source.stats().attack;
            for target in resolve(state, &plan.targets) {
                let raw = self_destruct_damage(attack, target.stats().defense);
                let mut damage = apply_variance(raw, SELF_DESTRUCT_VARIANCE, dice);
                if target.defending {
                    damage = defended(damage);
                }
                plan.outcomes.push(EffectOutcome::damage(target.id, damage));
            }
            plan.side_effect = SideEffect::Hide;
        }
        BattleAction::Escape => {
            plan.side_effect = match source.side {
                Side::Enemy => SideEffect::Hide,
                Side::Ally => {
                    let chance = if config.escape_allowed {
                        escape_chance(state)
                    } else {
                        0
                    };
                    let roll = dice.percent();
                    tracing::debug!("effects: party escape rolled {roll} against {chance}");
                    SideEffect::PartyEscape {
                        success: roll < chance,
                    }
                }
            };
        }
        BattleAction::Transform(id) => {
            if data.enemy(id).is_some() {
                plan.side_effect = SideEffect::Transform(id);
            } else {
                tracing::warn!("effects: unknown transform template {} for {}", id, source.name);
            }
        }
        BattleAction::Observe | BattleAction::Nothing => {}
    }

    plan
}

/// Party escape chance in percent.
///
/// # Formula
///
/// ```text
/// chance = clamp(150 - 100 * enemy_agi / party_agi + 10 * attempts, 0, 100)
/// ```
///
/// Averages are over active members; the party average is floored at 1.
pub fn escape_chance(state: &BattleState) -> u32 {
    let party = i64::from(state.average_agility(Side::Ally).max(1));
    let enemies = i64::from(state.average_agility(Side::Enemy));
    let attempts = i64::from(state.escape_attempts);
    (150 - 100 * enemies / party + 10 * attempts).clamp(0, 100) as u32
}

fn resolve<'s>(
    state: &'s BattleState,
    targets: &'s TargetList,
) -> impl Iterator<Item = &'s Combatant> + 's {
    targets.iter().filter_map(|&id| state.combatant(id))
}

fn physical_hit(
    source: &Combatant,
    target: &Combatant,
    config: &BattleConfig,
    dice: &mut Dice<'_>,
) -> EffectOutcome {
    let attacker = source.stats();
    let defender = target.stats();
    let chance = adjusted_hit(source.attack.hit, attacker.agility, defender.agility);
    if !check_hit(chance, dice.percent()) {
        return EffectOutcome::miss(target.id);
    }

    let mut damage = physical_damage(attacker.attack, defender.defense);
    if source.charged {
        damage *= 2;
    }
    damage = apply_variance(damage, config.attack_variance, dice);
    if target.defending {
        damage = defended(damage);
    }
    EffectOutcome::damage(target.id, damage)
}

fn plan_skill(
    plan: &mut ActionPlan,
    source: &Combatant,
    skill: &ActionDescriptor,
    state: &BattleState,
    dice: &mut Dice<'_>,
) {
    plan.cues = skill.cues;
    plan.animation = skill.animation;

    if source.sp.current < skill.sp_cost {
        tracing::debug!(
            "effects: {} lacks SP for {} ({} < {})",
            source.name,
            skill.name,
            source.sp.current,
            skill.sp_cost
        );
        return;
    }
    plan.cost.sp = skill.sp_cost;

    match skill.kind {
        SkillKind::Switch(switch) => plan.side_effect = SideEffect::Switch(switch),
        SkillKind::Escape => {
            plan.side_effect = match source.side {
                Side::Enemy => SideEffect::Hide,
                Side::Ally => SideEffect::PartyEscape { success: true },
            }
        }
        SkillKind::Normal => {
            for target in resolve(state, &plan.targets) {
                plan.outcomes.push(skill_outcome(source, target, skill, dice));
            }
        }
    }
}

/// Numeric effect and each status toggle are rolled independently.
fn skill_outcome(
    source: &Combatant,
    target: &Combatant,
    skill: &ActionDescriptor,
    dice: &mut Dice<'_>,
) -> EffectOutcome {
    let mut outcome = EffectOutcome::new(target.id);
    let chance = f64::from(skill.hit);
    let offensive = skill.scope.is_offensive();

    if skill.has_numeric_effect() && check_hit(chance, dice.percent()) {
        let raw = skill_effect(skill, &source.stats(), &target.stats());
        let mut effect = apply_variance(raw, skill.variance, dice);
        if offensive && target.defending && skill.affects.contains(AffectedStats::HP) {
            effect = defended(effect);
        }
        let signed = if offensive {
            -i64::from(effect)
        } else {
            i64::from(effect)
        };
        outcome.add_stat_change(skill.affects, signed);
        outcome.landed = true;
    }

    for &status in &skill.statuses {
        if check_hit(chance, dice.percent()) {
            outcome.statuses.push(StatusChange {
                status,
                applied: skill.status_mode == StatusMode::Inflict,
            });
            outcome.landed = true;
        }
    }

    outcome
}

fn plan_item(
    plan: &mut ActionPlan,
    source: &Combatant,
    item: &ItemDescriptor,
    state: &BattleState,
) {
    plan.cues = item.cues;
    plan.animation = item.animation;

    if state.inventory.count(item.id) == 0 {
        tracing::debug!("effects: {} found no {} left", source.name, item.name);
        return;
    }
    if item.consumable {
        plan.cost.item = Some(item.id);
    }

    for target in resolve(state, &plan.targets) {
        plan.outcomes.push(item_outcome(target, item));
    }
}

/// Items always hit. Revival only works on fallen targets and everything
/// else only on living ones.
fn item_outcome(target: &Combatant, item: &ItemDescriptor) -> EffectOutcome {
    let hp = ItemDescriptor::recovery(target.hp.maximum, item.hp_rate, item.hp_flat);
    let sp = ItemDescriptor::recovery(target.sp.maximum, item.sp_rate, item.sp_flat);

    if item.revive != target.is_dead() {
        return EffectOutcome::miss(target.id);
    }

    EffectOutcome {
        hp: i64::from(hp),
        sp: i64::from(sp),
        statuses: item
            .cures
            .iter()
            .map(|&status| StatusChange {
                status,
                applied: false,
            })
            .collect(),
        revive: item.revive,
        landed: true,
        ..EffectOutcome::new(target.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Scope;
    use crate::env::{DataSnapshot, FixedRng, RollCursor};
    use crate::state::{SkillId, StatusId};
    use crate::testing::{ally, enemy, state};

    fn targets(ids: &[u32]) -> TargetList {
        ids.iter().map(|&id| CombatantId(id)).collect()
    }

    fn plan(
        state: &BattleState,
        data: &DataSnapshot,
        rng: u32,
        source: u32,
        action: BattleAction,
        on: &[u32],
    ) -> ActionPlan {
        let config = BattleConfig {
            attack_variance: 0,
            ..BattleConfig::default()
        };
        let queued = QueuedAction::new(CombatantId(source), action, targets(on));
        let mut cursor = RollCursor::new(1);
        let fixed = FixedRng(rng);
        let mut dice = Dice::new(&fixed, &mut cursor);
        let source = state.combatant(CombatantId(source)).unwrap();
        plan_effects(source, &queued, targets(on), state, &config, data, &mut dice)
    }

    fn fire() -> ActionDescriptor {
        ActionDescriptor {
            id: SkillId(1),
            name: "Fire".into(),
            kind: SkillKind::Normal,
            scope: Scope::Enemy,
            sp_cost: 4,
            power: 10,
            physical_rate: 0,
            magical_rate: 0,
            ignore_defense: false,
            hit: 100,
            variance: 0,
            affects: AffectedStats::HP,
            status_mode: StatusMode::Inflict,
            statuses: vec![StatusId(3)],
            cues: SoundCues::default(),
            animation: None,
        }
    }

    fn potion(revive: bool) -> ItemDescriptor {
        ItemDescriptor {
            id: ItemId(1),
            name: "Potion".into(),
            scope: Scope::Ally,
            hp_rate: 0,
            hp_flat: 30,
            sp_rate: 0,
            sp_flat: 0,
            cures: Vec::new(),
            revive,
            consumable: true,
            cues: SoundCues::default(),
            animation: None,
        }
    }

    #[test]
    fn attack_hits_for_formula_damage() {
        let state = state(vec![ally(0, 100)], vec![enemy(1, 50)]);
        let plan = plan(&state, &DataSnapshot::new(), 0, 0, BattleAction::Attack, &[1]);
        assert_eq!(plan.outcomes, vec![EffectOutcome::damage(CombatantId(1), 8)]);
    }

    #[test]
    fn attack_misses_on_high_roll() {
        let state = state(vec![ally(0, 100)], vec![enemy(1, 50)]);
        let plan = plan(&state, &DataSnapshot::new(), 95, 0, BattleAction::Attack, &[1]);
        assert!(plan.missed_everything());
    }

    #[test]
    fn charged_and_defending_modifiers_stack() {
        let mut attacker = ally(0, 100);
        attacker.charged = true;
        let mut defender = enemy(1, 50);
        defender.defending = true;
        let state = state(vec![attacker], vec![defender]);
        let plan = plan(&state, &DataSnapshot::new(), 0, 0, BattleAction::Attack, &[1]);
        assert_eq!(plan.outcomes[0].hp, -8);
    }

    #[test]
    fn skill_without_sp_has_no_effect() {
        let state = state(vec![ally(0, 100)], vec![enemy(1, 50)]);
        let data = DataSnapshot::new().with_skill(fire());
        let plan = plan(&state, &data, 0, 0, BattleAction::Skill(SkillId(1)), &[1]);
        assert!(plan.outcomes.is_empty());
        assert_eq!(plan.cost, ActionCost::default());
    }

    #[test]
    fn skill_rolls_numeric_and_status_parts() {
        let mut caster = ally(0, 100);
        caster.sp.set_maximum(10);
        caster.sp.set(10);
        let state = state(vec![caster], vec![enemy(1, 50)]);
        let data = DataSnapshot::new().with_skill(fire());
        let plan = plan(&state, &data, 0, 0, BattleAction::Skill(SkillId(1)), &[1]);

        assert_eq!(plan.cost.sp, 4);
        let outcome = &plan.outcomes[0];
        assert_eq!(outcome.hp, -10);
        assert_eq!(
            outcome.statuses,
            vec![StatusChange {
                status: StatusId(3),
                applied: true
            }]
        );
    }

    #[test]
    fn revive_item_misses_living_targets() {
        let mut state = state(vec![ally(0, 100), ally(1, 0), ally(2, 40)], vec![enemy(3, 50)]);
        state.inventory.add(ItemId(1), 2);
        let data = DataSnapshot::new().with_item(potion(true));

        let dead = plan(&state, &data, 0, 0, BattleAction::Item(ItemId(1)), &[1]);
        assert!(dead.outcomes[0].revive);
        assert_eq!(dead.cost.item, Some(ItemId(1)));

        let living = plan(&state, &data, 0, 0, BattleAction::Item(ItemId(1)), &[2]);
        assert!(living.missed_everything());
    }

    #[test]
    fn item_without_stock_does_nothing() {
        let state = state(vec![ally(0, 100), ally(1, 40)], vec![enemy(2, 50)]);
        let data = DataSnapshot::new().with_item(potion(false));
        let plan = plan(&state, &data, 0, 0, BattleAction::Item(ItemId(1)), &[1]);
        assert!(plan.outcomes.is_empty());
        assert_eq!(plan.cost.item, None);
    }

    #[test]
    fn recovery_item_heals_living_target() {
        let mut state = state(vec![ally(0, 100), ally(1, 40)], vec![enemy(2, 50)]);
        state.inventory.add(ItemId(1), 1);
        let data = DataSnapshot::new().with_item(potion(false));
        let plan = plan(&state, &data, 0, 0, BattleAction::Item(ItemId(1)), &[1]);
        assert_eq!(plan.outcomes[0].hp, 30);
        assert!(plan.outcomes[0].landed);
    }

    #[test]
    fn enemy_escape_hides_the_user() {
        let state = state(vec![ally(0, 100)], vec![enemy(1, 50)]);
        let plan = plan(&state, &DataSnapshot::new(), 0, 1, BattleAction::Escape, &[1]);
        assert_eq!(plan.side_effect, SideEffect::Hide);
    }

    #[test]
    fn escape_chance_grows_with_attempts() {
        let mut state = state(vec![ally(0, 100)], vec![enemy(1, 50)]);
        assert_eq!(escape_chance(&state), 50);
        state.escape_attempts = 3;
        assert_eq!(escape_chance(&state), 80);
        state.escape_attempts = 10;
        assert_eq!(escape_chance(&state), 100);
    }

    #[test]
    fn forbidden_escape_always_fails() {
        let state = state(vec![ally(0, 100)], vec![enemy(1, 50)]);
        let config = BattleConfig {
            escape_allowed: false,
            ..BattleConfig::default()
        };
        let queued = QueuedAction::new(CombatantId(0), BattleAction::Escape, targets(&[0]));
        let mut cursor = RollCursor::new(1);
        let mut dice = Dice::new(&FixedRng(0), &mut cursor);
        let source = state.combatant(CombatantId(0)).unwrap();
        let data = DataSnapshot::new();
        let plan = plan_effects(source, &queued, targets(&[0]), &state, &config, &data, &mut dice);
        assert_eq!(plan.side_effect, SideEffect::PartyEscape { success: false });
    }

    #[test]
    fn self_destruct_hits_every_target_and_hides() {
        let state = state(vec![ally(0, 100), ally(1, 100)], vec![enemy(2, 50)]);
        let plan = plan(&state, &DataSnapshot::new(), 20, 2, BattleAction::SelfDestruct, &[0, 1]);
        assert_eq!(plan.outcomes.len(), 2);
        assert!(plan.outcomes.iter().all(|outcome| outcome.landed));
        assert_eq!(plan.side_effect, SideEffect::Hide);
    }
}
