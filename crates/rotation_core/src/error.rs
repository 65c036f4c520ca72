use crate::store::StoreError;
use thiserror::Error;

/// Errors raised for malformed inputs or misuse of the plan lifecycle.
///
/// Expected scheduling edge cases (a position with no eligible candidate,
/// the fairness fallback) are not errors; they surface as structured
/// results that the validator aggregates.
#[derive(Error, Debug)]
pub enum RotationError {
    #[error("insufficient players: need at least 8 team players, found {found}")]
    InsufficientPlayers { found: usize },

    #[error("invalid bench size: cannot bench {requested} of {team_size} players")]
    InvalidBenchSize { requested: usize, team_size: usize },

    #[error("invalid innings count {innings}: must be between {min} and {max}")]
    InvalidInnings { innings: usize, min: usize, max: usize },

    #[error("inning {inning} is out of range for a {innings}-inning plan")]
    InningOutOfRange { inning: u8, innings: usize },

    #[error("plan is already saved; start a new draft to revise it")]
    PlanSaved,

    #[error("plan has {errors} unresolved violations and cannot be saved")]
    UnresolvedViolations { errors: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, RotationError>;
