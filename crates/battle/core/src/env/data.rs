//! Read-only data lookups.

use strum::{AsRefStr, Display, EnumString};

use crate::action::{ActionDescriptor, ItemDescriptor};
use crate::env::EnemyDescriptor;
use crate::state::{EnemyId, ItemId, SkillId, SoundId, StatusDescriptor, StatusId};

/// Sound cues that do not belong to a specific descriptor.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SystemSound {
    /// A player command was refused.
    Reject,
    /// An effect missed its target.
    Evasion,
    AllyDeath,
    EnemyDeath,
    Escape,
}

/// Oracle providing descriptor lookups by id.
///
/// Descriptors are immutable for the lifetime of a battle. Unknown ids return
/// `None`; the executor treats such actions as no-ops.
pub trait DataOracle: Send + Sync {
    fn skill(&self, id: SkillId) -> Option<&ActionDescriptor>;

    fn item(&self, id: ItemId) -> Option<&ItemDescriptor>;

    fn enemy(&self, id: EnemyId) -> Option<&EnemyDescriptor>;

    fn status(&self, id: StatusId) -> Option<&StatusDescriptor>;

    fn system_sound(&self, sound: SystemSound) -> Option<SoundId>;
}
