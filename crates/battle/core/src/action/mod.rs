//! Battle actions: what combatants do, the templates behind them, and the
//! queue that orders their execution.
mod descriptor;
mod kind;
mod queue;
mod targeting;

pub use descriptor::{ActionDescriptor, ItemDescriptor, Scope, SkillKind, SoundCues, StatusMode};
pub use kind::BattleAction;
pub use queue::{ActionQueue, QueuedAction, SwitchEffects, TargetList};
pub use targeting::{TargetRule, collect_group, revalidate};
