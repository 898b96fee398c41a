//! Rule-driven action selection for computer-controlled combatants.
mod condition;
mod planner;
mod rule;
mod selector;

pub use planner::{plan_action, plan_forced_attack, plan_rule};
pub use rule::{BasicBehavior, EnemyActionRule, RuleCondition, RuleEffect};
pub use selector::RuleSelector;
