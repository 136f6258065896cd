//! InMemoryMatchStore - lock-guarded bracket storage for tests, demos, and the admin server.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::MatchStore;
use crate::models::{
    BracketContext, EventScope, Frame, Group, Match, MatchId, MatchStatus, Round, Slot, Stage,
    StageId, StoreError,
};

#[derive(Default)]
struct StoreState {
    stages: HashMap<StageId, Stage>,
    groups: Vec<Group>,
    rounds: Vec<Round>,
    matches: BTreeMap<MatchId, Match>,
    frames: HashMap<MatchId, Vec<Frame>>,
}

/// In-memory match store.
///
/// Writing a match's slots re-derives its status from the new slot contents, the way a
/// persisted bracket store's update trigger does. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryMatchStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self, operation: &'static str) -> Result<RwLockReadGuard<'_, StoreState>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::LockPoisoned(operation))
    }

    fn write(&self, operation: &'static str) -> Result<RwLockWriteGuard<'_, StoreState>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::LockPoisoned(operation))
    }

    /// Store a whole bracket. Fails without writing anything if the stage or any match id
    /// is already taken.
    pub fn load(&self, context: BracketContext) -> Result<EventScope, StoreError> {
        self.import(context, Vec::new())
    }

    /// Store a whole bracket together with its recorded frames, under one write lock.
    ///
    /// Every frame must belong to a match of `context`. Any rejection leaves the store as it
    /// was, so a corrected import can simply be sent again.
    pub fn import(&self, context: BracketContext, frames: Vec<Frame>) -> Result<EventScope, StoreError> {
        let mut state = self.write("import")?;
        let scope = context.scope();
        if state.stages.contains_key(&context.stage.id) {
            return Err(StoreError::StageConflict(context.stage.id));
        }
        if let Some(taken) = context
            .matches
            .iter()
            .find(|m| state.matches.contains_key(&m.id))
        {
            return Err(StoreError::Conflict(taken.id));
        }
        if let Some(stray) = frames
            .iter()
            .find(|f| context.find_match(f.match_id).is_none())
        {
            return Err(StoreError::MatchNotFound(stray.match_id));
        }

        let BracketContext {
            stage,
            groups,
            rounds,
            matches,
        } = context;
        state.stages.insert(stage.id, stage);
        state.groups.extend(groups);
        state.rounds.extend(rounds);
        for m in matches {
            state.matches.insert(m.id, m);
        }
        let frame_count = frames.len();
        for frame in frames {
            state.frames.entry(frame.match_id).or_default().push(frame);
        }
        log::debug!(
            "Loaded bracket for tournament {} stage {} ({} frames)",
            scope.tournament_id,
            scope.stage_id,
            frame_count
        );
        Ok(scope)
    }

    /// Attach a scoring frame to an existing match.
    pub fn record_frame(&self, frame: Frame) -> Result<(), StoreError> {
        let mut state = self.write("record_frame")?;
        if !state.matches.contains_key(&frame.match_id) {
            return Err(StoreError::MatchNotFound(frame.match_id));
        }
        state.frames.entry(frame.match_id).or_default().push(frame);
        Ok(())
    }

    /// Frames recorded for a match, in recording order.
    pub fn frames(&self, match_id: MatchId) -> Result<Vec<Frame>, StoreError> {
        let state = self.read("frames")?;
        Ok(state.frames.get(&match_id).cloned().unwrap_or_default())
    }
}

impl MatchStore for InMemoryMatchStore {
    fn bracket_context(&self, scope: &EventScope) -> Result<BracketContext, StoreError> {
        let state = self.read("bracket_context")?;
        let stage = state
            .stages
            .get(&scope.stage_id)
            .filter(|s| s.tournament_id == scope.tournament_id)
            .cloned()
            .ok_or(StoreError::ScopeNotFound {
                tournament_id: scope.tournament_id,
                stage_id: scope.stage_id,
            })?;

        let mut context = BracketContext {
            groups: state
                .groups
                .iter()
                .filter(|g| g.stage_id == stage.id)
                .cloned()
                .collect(),
            rounds: state
                .rounds
                .iter()
                .filter(|r| r.stage_id == stage.id)
                .cloned()
                .collect(),
            matches: state
                .matches
                .values()
                .filter(|m| m.stage_id == stage.id)
                .cloned()
                .collect(),
            stage,
        };
        context.sort_structurally();
        Ok(context)
    }

    fn get_match(&self, id: MatchId) -> Result<Option<Match>, StoreError> {
        let state = self.read("get_match")?;
        Ok(state.matches.get(&id).cloned())
    }

    fn write_opponents(&self, id: MatchId, opponent1: Slot, opponent2: Slot) -> Result<(), StoreError> {
        let mut state = self.write("write_opponents")?;
        let m = state
            .matches
            .get_mut(&id)
            .ok_or(StoreError::MatchNotFound(id))?;
        m.status = MatchStatus::from_slots(&opponent1, &opponent2);
        m.opponent1 = opponent1;
        m.opponent2 = opponent2;
        Ok(())
    }

    fn update_status(&self, id: MatchId, status: MatchStatus) -> Result<(), StoreError> {
        let mut state = self.write("update_status")?;
        let m = state
            .matches
            .get_mut(&id)
            .ok_or(StoreError::MatchNotFound(id))?;
        m.status = status;
        Ok(())
    }

    fn delete_frames(&self, id: MatchId) -> Result<usize, StoreError> {
        let mut state = self.write("delete_frames")?;
        Ok(state.frames.remove(&id).map_or(0, |frames| frames.len()))
    }
}
