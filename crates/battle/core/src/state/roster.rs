//! Party and troop queries over the roster.
//!
//! Aggregates that divide by a member count use a denominator of at least 1,
//! so an empty side yields 0 instead of a division error.

use super::{BattleState, Combatant, CombatantId, Side};

impl BattleState {
    /// Every member of a side, in formation order, whatever its condition.
    pub fn members(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(move |c| c.side == side)
    }

    /// Members of a side that are alive and still in the battle.
    pub fn active(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.members(side).filter(|c| c.is_active())
    }

    pub fn active_ids(&self, side: Side) -> Vec<CombatantId> {
        self.active(side).map(|c| c.id).collect()
    }

    pub fn living_count(&self, side: Side) -> usize {
        self.active(side).count()
    }

    pub fn any_active(&self, side: Side) -> bool {
        self.active(side).next().is_some()
    }

    /// Average level of the active members.
    pub fn average_level(&self, side: Side) -> u32 {
        let (sum, count) = self
            .active(side)
            .fold((0u64, 0u64), |(sum, n), c| (sum + u64::from(c.level), n + 1));
        (sum / count.max(1)) as u32
    }

    /// Average effective agility of the active members.
    pub fn average_agility(&self, side: Side) -> i32 {
        let (sum, count) = self
            .active(side)
            .fold((0i64, 0i64), |(sum, n), c| (sum + i64::from(c.stats().agility), n + 1));
        (sum / count.max(1)) as i32
    }

    /// Party fatigue used by AI conditions.
    ///
    /// # Formula
    ///
    /// Per active member: `100 - (200 * hp / max_hp - 100 * sp / max_sp / 3)`,
    /// then averaged. Each maximum is floored at 1.
    pub fn party_fatigue(&self, side: Side) -> i32 {
        let (sum, count) = self.active(side).fold((0i64, 0i64), |(sum, n), c| {
            let hp = i64::from(c.hp.current);
            let max_hp = i64::from(c.hp.maximum.max(1));
            let sp = i64::from(c.sp.current);
            let max_sp = i64::from(c.sp.maximum.max(1));
            let fatigue = 100 - (200 * hp / max_hp - 100 * sp / max_sp / 3);
            (sum + fatigue, n + 1)
        });
        (sum / count.max(1)) as i32
    }

    /// Next active member of `id`'s side after it in formation order,
    /// wrapping around. `id` itself is only returned if it is the sole
    /// active member.
    pub fn next_active_after(&self, id: CombatantId) -> Option<CombatantId> {
        let origin = self.combatant(id)?;
        let members: Vec<&Combatant> = self.members(origin.side).collect();
        let start = members.iter().position(|c| c.id == id)?;
        (1..=members.len())
            .map(|offset| members[(start + offset) % members.len()])
            .find(|c| c.is_active())
            .map(|c| c.id)
    }
}
