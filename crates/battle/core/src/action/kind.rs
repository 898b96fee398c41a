use strum::{AsRefStr, Display};

use crate::ai::BasicBehavior;
use crate::state::{EnemyId, ItemId, SkillId};

/// Everything a combatant can do on its turn.
///
/// The executor dispatches on this enum in a single `match`; adding a variant
/// means adding one arm there and nowhere else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleAction {
    Attack,
    /// Two basic attacks, each rolled against its own target.
    DualAttack,
    Skill(SkillId),
    Item(ItemId),
    Defend,
    Observe,
    Charge,
    SelfDestruct,
    Escape,
    Transform(EnemyId),
    Nothing,
}

impl BattleAction {
    /// Maps a rule's basic behaviour onto an action.
    pub const fn from_basic(behavior: BasicBehavior) -> Self {
        match behavior {
            BasicBehavior::Attack => BattleAction::Attack,
            BasicBehavior::DualAttack => BattleAction::DualAttack,
            BasicBehavior::Defend => BattleAction::Defend,
            BasicBehavior::Observe => BattleAction::Observe,
            BasicBehavior::Charge => BattleAction::Charge,
            BasicBehavior::SelfDestruct => BattleAction::SelfDestruct,
            BasicBehavior::Escape => BattleAction::Escape,
            BasicBehavior::Nothing => BattleAction::Nothing,
        }
    }

    /// Actions that only affect their own user.
    pub const fn targets_self(&self) -> bool {
        matches!(
            self,
            BattleAction::Defend
                | BattleAction::Observe
                | BattleAction::Charge
                | BattleAction::Escape
                | BattleAction::Transform(_)
                | BattleAction::Nothing
        )
    }
}
