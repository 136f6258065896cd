//! Collaborator seams: the match store and the bracket topology provider.

mod in_memory;
mod topology;

pub use in_memory::InMemoryMatchStore;
pub use topology::{Edge, EdgeTopology};

use crate::models::{BracketContext, EventScope, Match, MatchId, MatchStatus, Slot, StoreError};
use serde::{Deserialize, Serialize};

/// Persisted matches, rounds, and groups.
pub trait MatchStore: Send + Sync {
    /// Full bracket for one scope, matches in structural order.
    fn bracket_context(&self, scope: &EventScope) -> Result<BracketContext, StoreError>;

    /// Point read. Returns None if the match does not exist.
    fn get_match(&self, id: MatchId) -> Result<Option<Match>, StoreError>;

    /// Overwrite both opponent slots in one call.
    fn write_opponents(&self, id: MatchId, opponent1: Slot, opponent2: Slot) -> Result<(), StoreError>;

    fn update_status(&self, id: MatchId, status: MatchStatus) -> Result<(), StoreError>;

    /// Delete every frame (and frame result) of a match. Returns how many frames went away.
    fn delete_frames(&self, id: MatchId) -> Result<usize, StoreError>;
}

/// Structural edges between matches.
pub trait BracketTopology {
    /// Matches that receive this match's winner or loser.
    fn next_matches(&self, id: MatchId) -> Result<Vec<MatchRef>, StoreError>;

    /// Matches that feed into this one.
    fn previous_matches(&self, id: MatchId) -> Result<Vec<MatchRef>, StoreError>;
}

/// A match id as handed back by a topology provider: a number, or a numeric-like string.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchRef {
    Id(MatchId),
    Text(String),
}

impl MatchRef {
    /// Canonical numeric id, or None if the reference is not numeric.
    pub fn normalize(&self) -> Option<MatchId> {
        match self {
            MatchRef::Id(id) => Some(*id),
            MatchRef::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl From<MatchId> for MatchRef {
    fn from(id: MatchId) -> Self {
        MatchRef::Id(id)
    }
}

impl From<&str> for MatchRef {
    fn from(text: &str) -> Self {
        MatchRef::Text(text.to_string())
    }
}
