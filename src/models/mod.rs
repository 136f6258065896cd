//! Data structures for brackets: matches, opponent slots, frames, and bracket context.

mod error;
mod frame;
mod game;
mod opponent;
mod tournament;

pub use error::{ResetError, StoreError};
pub use frame::{Frame, FrameResult};
pub use game::{GroupId, Match, MatchId, MatchStatus, RoundId, SlotName, StageId};
pub use opponent::{MatchResult, Participant, ParticipantId, Slot};
pub use tournament::{
    BracketContext, EventScope, GrandFinalType, Group, Round, Stage, StageType, TournamentId,
};
