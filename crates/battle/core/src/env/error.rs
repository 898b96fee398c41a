//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::EnemyId;

/// Errors that occur when accessing oracle data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// DataOracle is not available in the environment.
    #[error("DataOracle not available")]
    DataNotAvailable,

    /// RngOracle is not available in the environment.
    #[error("RngOracle not available")]
    RngNotAvailable,

    /// Enemy template was not found by id.
    #[error("enemy template {0} not found")]
    EnemyNotFound(EnemyId),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            // Missing oracles are fatal - the battle cannot be driven
            DataNotAvailable | RngNotAvailable => ErrorSeverity::Fatal,

            EnemyNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            DataNotAvailable => "ORACLE_DATA_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            EnemyNotFound(_) => "ORACLE_ENEMY_NOT_FOUND",
        }
    }
}
