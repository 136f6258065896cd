//! Bracket reset engine: undo a match result and invalidate every downstream slot it fed.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    build_tainted_slot_plan, find_matches_to_reset, flat_scan_plan, is_first_grand_final,
    preview_reset, reset_match_result, resolve_tainted_slots, CascadePlan, CascadeStrategy,
    FlatScanCascade, GraphCascade, ResetOutcome, RoundIndex,
};
pub use models::{
    BracketContext, EventScope, Frame, FrameResult, GrandFinalType, Group, Match, MatchId,
    MatchResult, MatchStatus, Participant, ParticipantId, ResetError, Round, Slot, SlotName, Stage,
    StageType, StoreError, TournamentId,
};
pub use store::{BracketTopology, Edge, EdgeTopology, InMemoryMatchStore, MatchRef, MatchStore};
