//! Errors raised by match stores and by the reset engine.

use crate::models::game::{MatchId, MatchStatus, StageId};
use crate::models::tournament::TournamentId;
use std::fmt;

/// Failures reported by a match store or topology provider.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// A store lock was poisoned during the named operation.
    LockPoisoned(&'static str),
    /// No bracket stored for this tournament/stage.
    ScopeNotFound {
        tournament_id: TournamentId,
        stage_id: StageId,
    },
    /// A point read or write referenced a match the store does not hold.
    MatchNotFound(MatchId),
    /// An import collided with a match that already exists.
    Conflict(MatchId),
    /// An import collided with a stage that is already loaded.
    StageConflict(StageId),
    /// Anything else the backend wants to report.
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
            StoreError::ScopeNotFound {
                tournament_id,
                stage_id,
            } => write!(f, "no bracket for tournament {} stage {}", tournament_id, stage_id),
            StoreError::MatchNotFound(id) => write!(f, "match {} not found in store", id),
            StoreError::Conflict(id) => write!(f, "match {} already exists", id),
            StoreError::StageConflict(id) => write!(f, "stage {} already loaded", id),
            StoreError::Backend(message) => write!(f, "store error: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors surfaced by a reset request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResetError {
    /// Target match is not part of the given scope. Raised before any write.
    NotFound(MatchId),
    /// Target has no result to undo. Raised before any write.
    InvalidState {
        match_id: MatchId,
        status: MatchStatus,
    },
    /// A store read, write, or delete failed. Writes already issued are not rolled back.
    Internal(StoreError),
}

impl fmt::Display for ResetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResetError::NotFound(id) => write!(f, "Match {} not found", id),
            ResetError::InvalidState { match_id, status } => write!(
                f,
                "Match {} cannot be reset from status {:?}",
                match_id, status
            ),
            ResetError::Internal(err) => write!(f, "Reset failed: {}", err),
        }
    }
}

impl std::error::Error for ResetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResetError::Internal(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ResetError {
    fn from(err: StoreError) -> Self {
        ResetError::Internal(err)
    }
}
