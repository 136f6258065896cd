//! Shared bracket fixtures and store doubles for the integration tests.
#![allow(dead_code)]

use bracket_reset::{
    BracketContext, EdgeTopology, EventScope, Frame, GrandFinalType, Group, InMemoryMatchStore,
    Match, MatchId, MatchResult, MatchStatus, MatchStore, Participant, ParticipantId, Round, Slot,
    Stage, StageType, StoreError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

pub fn seat(id: ParticipantId, position: Option<u32>) -> Slot {
    let mut p = Participant::new(id);
    p.position = position;
    Slot::Occupied(p)
}

pub fn win(id: ParticipantId, position: Option<u32>) -> Slot {
    let mut p = Participant::new(id).with_score(2).with_result(MatchResult::Win);
    p.position = position;
    Slot::Occupied(p)
}

pub fn loss(id: ParticipantId, position: Option<u32>) -> Slot {
    let mut p = Participant::new(id).with_score(1).with_result(MatchResult::Loss);
    p.position = position;
    Slot::Occupied(p)
}

/// Occupied with a score but no result yet (match in progress).
pub fn scoring(id: ParticipantId, position: Option<u32>, score: u32) -> Slot {
    let mut p = Participant::new(id).with_score(score);
    p.position = position;
    Slot::Occupied(p)
}

pub fn game(id: MatchId, group_id: u64, round_id: u64, number: u32, o1: Slot, o2: Slot) -> Match {
    Match::new(id, 1, group_id, round_id, number).with_opponents(o1, o2)
}

fn stage(kind: StageType, grand_final: GrandFinalType) -> Stage {
    Stage {
        id: 1,
        tournament_id: Uuid::new_v4(),
        name: "Main bracket".into(),
        kind,
        grand_final,
    }
}

fn group(id: u64, number: u32) -> Group {
    Group {
        id,
        stage_id: 1,
        number,
    }
}

fn round(id: u64, group_id: u64, number: u32) -> Round {
    Round {
        id,
        stage_id: 1,
        group_id,
        number,
    }
}

pub struct Fixture {
    pub store: InMemoryMatchStore,
    pub scope: EventScope,
    pub topology: EdgeTopology,
}

impl Fixture {
    fn load(context: BracketContext, topology: EdgeTopology, frames: &[(MatchId, u32)]) -> Self {
        let store = InMemoryMatchStore::new();
        let scope = store.load(context).unwrap();
        for &(match_id, count) in frames {
            for number in 1..=count {
                store
                    .record_frame(Frame::new(match_id, number).with_result(11, 9))
                    .unwrap();
            }
        }
        Self {
            store,
            scope,
            topology,
        }
    }

    pub fn get(&self, id: MatchId) -> Match {
        self.store.get_match(id).unwrap().unwrap()
    }

    pub fn frame_count(&self, id: MatchId) -> usize {
        self.store.frames(id).unwrap().len()
    }

    pub fn context(&self) -> BracketContext {
        self.store.bracket_context(&self.scope).unwrap()
    }
}

/// Four teams, single elimination, final in the given state.
///
/// ```text
/// m1: 11 beat 12 ─┐
///                 ├─ m3: final
/// m2: 13 beat 14 ─┘
/// ```
pub fn single_elimination_with_final(o1: Slot, o2: Slot) -> Fixture {
    let context = BracketContext {
        stage: stage(StageType::SingleElimination, GrandFinalType::None),
        groups: vec![group(1, 1)],
        rounds: vec![round(1, 1, 1), round(2, 1, 2)],
        matches: vec![
            game(1, 1, 1, 1, win(11, Some(1)), loss(12, Some(2))),
            game(2, 1, 1, 2, win(13, Some(3)), loss(14, Some(4))),
            game(3, 1, 2, 1, o1, o2),
        ],
    };
    let topology = EdgeTopology::new()
        .with_edges(1, [3u64])
        .with_edges(2, [3u64]);
    Fixture::load(context, topology, &[(1, 2), (2, 1), (3, 1)])
}

/// Single elimination with the final already underway (11 leads 13).
pub fn single_elimination() -> Fixture {
    single_elimination_with_final(scoring(11, Some(1), 2), scoring(13, Some(2), 1))
}

/// Three teams: 11 has a bye in m1 and has already advanced into the final.
pub fn single_elimination_with_bye() -> Fixture {
    let context = BracketContext {
        stage: stage(StageType::SingleElimination, GrandFinalType::None),
        groups: vec![group(1, 1)],
        rounds: vec![round(1, 1, 1), round(2, 1, 2)],
        matches: vec![
            game(1, 1, 1, 1, win(11, Some(1)), Slot::Bye),
            game(2, 1, 1, 2, win(12, Some(3)), loss(13, Some(4))),
            game(3, 1, 2, 1, win(11, Some(1)), loss(12, Some(2))),
        ],
    };
    let topology = EdgeTopology::new()
        .with_edges(1, [3u64])
        .with_edges(2, [3u64]);
    Fixture::load(context, topology, &[(2, 1), (3, 1)])
}

/// Three rounds where the round-2 match paired 11 with a bye and was closed out as a walkover.
///
/// ```text
/// m1: 11 beat 12 ─ m2: 11 vs bye (walkover) ─ m3: 11 beat 13
/// ```
pub fn single_elimination_with_downstream_bye() -> Fixture {
    let context = BracketContext {
        stage: stage(StageType::SingleElimination, GrandFinalType::None),
        groups: vec![group(1, 1)],
        rounds: vec![round(1, 1, 1), round(2, 1, 2), round(3, 1, 3)],
        matches: vec![
            game(1, 1, 1, 1, win(11, Some(1)), loss(12, Some(2))),
            game(2, 1, 2, 1, win(11, Some(1)), Slot::Bye),
            game(3, 1, 3, 1, win(11, Some(1)), loss(13, Some(2))),
        ],
    };
    let topology = EdgeTopology::new()
        .with_edges(1, [2u64])
        .with_edges(2, [3u64]);
    Fixture::load(context, topology, &[(1, 1), (2, 1), (3, 1)])
}

/// Four teams, double elimination with a possible grand-final reset match.
///
/// ```text
/// winners (group 1):  m1: 11 beat 12, m2: 13 beat 14, m3: 11 beat 13
/// losers  (group 2):  m4: 12 beat 14, m5: 13 beat 12
/// final   (group 3):  m6: 11 beat 13, m7: reset match, archived
/// ```
pub fn double_elimination() -> Fixture {
    double_elimination_with_format(GrandFinalType::Double)
}

/// `double_elimination` with the stage's grand final format overridden.
pub fn double_elimination_with_format(format: GrandFinalType) -> Fixture {
    double_elimination_with_grand_finals(
        format,
        game(6, 3, 5, 1, win(11, None), loss(13, None)),
        game(7, 3, 6, 1, Slot::Awaiting, Slot::Awaiting).with_status(MatchStatus::Archived),
    )
}

/// Same bracket, but 13 took the first grand final and won the reset match too.
pub fn double_elimination_with_played_reset() -> Fixture {
    double_elimination_with_grand_finals(
        GrandFinalType::Double,
        game(6, 3, 5, 1, loss(11, None), win(13, None)),
        game(7, 3, 6, 1, loss(11, Some(1)), win(13, Some(1))),
    )
}

fn double_elimination_with_grand_finals(format: GrandFinalType, gf1: Match, gf2: Match) -> Fixture {
    let context = BracketContext {
        stage: stage(StageType::DoubleElimination, format),
        groups: vec![group(1, 1), group(2, 2), group(3, 3)],
        rounds: vec![
            round(1, 1, 1),
            round(2, 1, 2),
            round(3, 2, 1),
            round(4, 2, 2),
            round(5, 3, 1),
            round(6, 3, 2),
        ],
        matches: vec![
            game(1, 1, 1, 1, win(11, Some(1)), loss(12, Some(2))),
            game(2, 1, 1, 2, win(13, Some(3)), loss(14, Some(4))),
            game(3, 1, 2, 1, win(11, Some(1)), loss(13, Some(2))),
            game(4, 2, 3, 1, win(12, Some(1)), loss(14, Some(2))),
            game(5, 2, 4, 1, loss(12, Some(1)), win(13, None)),
            gf1,
            gf2,
        ],
    };
    let topology = EdgeTopology::new()
        .with_edges(1, [3u64, 4])
        .with_edges(2, [3u64, 4])
        .with_edges(3, [6u64, 5])
        .with_edges(4, [5u64])
        .with_edges(5, [6u64])
        .with_edges(6, [7u64]);
    Fixture::load(
        context,
        topology,
        &[(1, 1), (2, 1), (3, 1), (4, 1), (5, 1), (6, 1), (7, 1)],
    )
}

/// One store call, as seen by `RecordingStore`.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    WriteOpponents(MatchId, Slot, Slot),
    UpdateStatus(MatchId, MatchStatus),
    DeleteFrames(MatchId),
}

/// Passes everything through to the wrapped store and records each write.
pub struct RecordingStore {
    inner: InMemoryMatchStore,
    calls: Mutex<Vec<Call>>,
}

impl RecordingStore {
    pub fn new(inner: InMemoryMatchStore) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes_for(&self, id: MatchId) -> Vec<(Slot, Slot)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::WriteOpponents(m, o1, o2) if m == id => Some((o1, o2)),
                _ => None,
            })
            .collect()
    }

    pub fn frame_deletes_for(&self, id: MatchId) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == Call::DeleteFrames(id))
            .count()
    }

    pub fn status_updates(&self) -> Vec<(MatchId, MatchStatus)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::UpdateStatus(m, s) => Some((m, s)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl MatchStore for RecordingStore {
    fn bracket_context(&self, scope: &EventScope) -> Result<BracketContext, StoreError> {
        self.inner.bracket_context(scope)
    }

    fn get_match(&self, id: MatchId) -> Result<Option<Match>, StoreError> {
        self.inner.get_match(id)
    }

    fn write_opponents(&self, id: MatchId, opponent1: Slot, opponent2: Slot) -> Result<(), StoreError> {
        self.record(Call::WriteOpponents(id, opponent1.clone(), opponent2.clone()));
        self.inner.write_opponents(id, opponent1, opponent2)
    }

    fn update_status(&self, id: MatchId, status: MatchStatus) -> Result<(), StoreError> {
        self.record(Call::UpdateStatus(id, status));
        self.inner.update_status(id, status)
    }

    fn delete_frames(&self, id: MatchId) -> Result<usize, StoreError> {
        self.record(Call::DeleteFrames(id));
        self.inner.delete_frames(id)
    }
}

/// Fails slot writes once a budget is used up, or frame deletion for one match.
pub struct FailingStore {
    inner: InMemoryMatchStore,
    writes_left: AtomicUsize,
    fail_delete_for: Option<MatchId>,
}

impl FailingStore {
    pub fn after_writes(inner: InMemoryMatchStore, writes: usize) -> Self {
        Self {
            inner,
            writes_left: AtomicUsize::new(writes),
            fail_delete_for: None,
        }
    }

    pub fn on_frame_delete(inner: InMemoryMatchStore, id: MatchId) -> Self {
        Self {
            inner,
            writes_left: AtomicUsize::new(usize::MAX),
            fail_delete_for: Some(id),
        }
    }
}

impl MatchStore for FailingStore {
    fn bracket_context(&self, scope: &EventScope) -> Result<BracketContext, StoreError> {
        self.inner.bracket_context(scope)
    }

    fn get_match(&self, id: MatchId) -> Result<Option<Match>, StoreError> {
        self.inner.get_match(id)
    }

    fn write_opponents(&self, id: MatchId, opponent1: Slot, opponent2: Slot) -> Result<(), StoreError> {
        let left = self.writes_left.load(Ordering::SeqCst);
        if left == 0 {
            return Err(StoreError::Backend("write rejected".into()));
        }
        self.writes_left.store(left - 1, Ordering::SeqCst);
        self.inner.write_opponents(id, opponent1, opponent2)
    }

    fn update_status(&self, id: MatchId, status: MatchStatus) -> Result<(), StoreError> {
        self.inner.update_status(id, status)
    }

    fn delete_frames(&self, id: MatchId) -> Result<usize, StoreError> {
        if self.fail_delete_for == Some(id) {
            return Err(StoreError::Backend("frame delete rejected".into()));
        }
        self.inner.delete_frames(id)
    }
}
