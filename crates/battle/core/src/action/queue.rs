//! FIFO queue of resolved actions awaiting execution.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::action::BattleAction;
use crate::config::BattleConfig;
use crate::state::{CombatantId, Side, SwitchId};

/// Resolved target list of one queued action.
pub type TargetList = ArrayVec<CombatantId, { BattleConfig::MAX_COMBATANTS }>;

/// Switch side effects attached by an enemy rule, applied when the action
/// resolves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwitchEffects {
    pub turn_on: Option<SwitchId>,
    pub turn_off: Option<SwitchId>,
}

impl SwitchEffects {
    pub const NONE: Self = Self {
        turn_on: None,
        turn_off: None,
    };
}

/// A (source, action, targets) triple waiting for the executor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueuedAction {
    pub source: CombatantId,
    pub action: BattleAction,
    pub targets: TargetList,
    pub switches: SwitchEffects,
    /// Side the targets are drawn from when a status forces the action,
    /// instead of the side implied by the action's scope.
    pub forced_group: Option<Side>,
}

impl QueuedAction {
    pub fn new(source: CombatantId, action: BattleAction, targets: TargetList) -> Self {
        Self {
            source,
            action,
            targets,
            switches: SwitchEffects::NONE,
            forced_group: None,
        }
    }

    pub fn with_switches(mut self, switches: SwitchEffects) -> Self {
        self.switches = switches;
        self
    }

    pub fn forced_at(mut self, group: Side) -> Self {
        self.forced_group = Some(group);
        self
    }
}

/// Append-only FIFO. Entries are never re-sorted.
#[derive(Clone, Debug, Default)]
pub struct ActionQueue {
    entries: VecDeque<QueuedAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: QueuedAction) {
        self.entries.push_back(action);
    }

    pub fn front(&self) -> Option<&QueuedAction> {
        self.entries.front()
    }

    pub fn front_mut(&mut self) -> Option<&mut QueuedAction> {
        self.entries.front_mut()
    }

    pub fn pop(&mut self) -> Option<QueuedAction> {
        self.entries.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedAction> {
        self.entries.iter()
    }

    /// True when `source` already has an entry waiting.
    pub fn has_entry_for(&self, source: CombatantId) -> bool {
        self.entries.iter().any(|entry| entry.source == source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(source: u32) -> QueuedAction {
        QueuedAction::new(CombatantId(source), BattleAction::Attack, TargetList::new())
    }

    #[test]
    fn pops_in_push_order() {
        let mut queue = ActionQueue::new();
        queue.push(entry(2));
        queue.push(entry(0));
        queue.push(entry(1));

        let order: Vec<u32> = std::iter::from_fn(|| queue.pop())
            .map(|e| e.source.0)
            .collect();
        assert_eq!(order, vec![2, 0, 1]);
    }

    #[test]
    fn tracks_sources() {
        let mut queue = ActionQueue::new();
        queue.push(entry(3));
        assert!(queue.has_entry_for(CombatantId(3)));
        assert!(!queue.has_entry_for(CombatantId(4)));
        queue.clear();
        assert!(queue.is_empty());
    }
}
