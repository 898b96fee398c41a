//! Traits describing read-only battle data and the outbound collaborators.
//!
//! Oracles expose descriptors and randomness. The [`Env`] aggregate bundles
//! them so the engine can reach everything it needs without hard coupling to
//! concrete implementations. Presentation and audio are write-only sinks and
//! travel separately as [`Outputs`].
mod data;
mod enemies;
mod error;
mod presentation;
mod rng;
mod snapshot;

pub use data::{DataOracle, SystemSound};
pub use enemies::{EnemyDescriptor, ItemDrop};
pub use error::OracleError;
pub use presentation::{
    AudioLog, AudioSink, FloatingResult, Notification, NullOutputs, Outputs, Pose,
    PresentationEvent, Presenter, Recorder, ScreenLog,
};
pub use rng::{Dice, FixedRng, PcgRng, RngOracle, RollCursor, compute_seed};
pub use snapshot::DataSnapshot;

/// Aggregates read-only oracles required by the battle engine.
pub struct Env<'a, D, R>
where
    D: DataOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    data: Option<&'a D>,
    rng: Option<&'a R>,
}

impl<D, R> Clone for Env<'_, D, R>
where
    D: DataOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<D, R> Copy for Env<'_, D, R>
where
    D: DataOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type BattleEnv<'a> = Env<'a, dyn DataOracle + 'a, dyn RngOracle + 'a>;

impl<'a, D, R> Env<'a, D, R>
where
    D: DataOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(data: Option<&'a D>, rng: Option<&'a R>) -> Self {
        Self { data, rng }
    }

    pub fn with_all(data: &'a D, rng: &'a R) -> Self {
        Self::new(Some(data), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            data: None,
            rng: None,
        }
    }

    /// Returns the DataOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::DataNotAvailable` if no data oracle was provided.
    pub fn data(&self) -> Result<&'a D, OracleError> {
        self.data.ok_or(OracleError::DataNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, D, R> Env<'a, D, R>
where
    D: DataOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into the trait-object based [`BattleEnv`].
    pub fn into_battle_env(self) -> BattleEnv<'a> {
        let data: Option<&'a dyn DataOracle> = self.data.map(|data| data as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(data, rng)
    }
}
