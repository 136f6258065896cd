//! Opponent slots: Bye, Awaiting, or Occupied by a participant.

use serde::{Deserialize, Serialize};

/// Unique identifier for a participant (team) in a bracket.
pub type ParticipantId = u64;

/// Outcome recorded for one side of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
}

/// A participant sitting in a slot, with whatever result data has been recorded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// Number of the previous-round match (same group) this occupant came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forfeit: Option<bool>,
}

impl Participant {
    pub fn new(id: ParticipantId) -> Self {
        Self {
            id,
            position: None,
            score: None,
            result: None,
            forfeit: None,
        }
    }

    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_score(mut self, score: u32) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_result(mut self, result: MatchResult) -> Self {
        self.result = Some(result);
        self
    }

    /// Same identity and position hint, no score/result/forfeit.
    pub fn stripped(&self) -> Self {
        Self {
            position: self.position,
            ..Self::new(self.id)
        }
    }
}

/// One of a match's two competitor positions.
///
/// `Bye` and `Awaiting` are both "empty" but mean different things: a Bye will never be
/// filled, an Awaiting slot is waiting for an upstream winner. On the wire a Bye is `null`
/// and an Awaiting slot is `{"id": null}`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<SlotRecord>", into = "Option<SlotRecord>")]
pub enum Slot {
    Bye,
    #[default]
    Awaiting,
    Occupied(Participant),
}

impl Slot {
    pub fn occupied(id: ParticipantId) -> Self {
        Slot::Occupied(Participant::new(id))
    }

    pub fn participant(&self) -> Option<&Participant> {
        match self {
            Slot::Occupied(p) => Some(p),
            Slot::Bye | Slot::Awaiting => None,
        }
    }

    pub fn participant_id(&self) -> Option<ParticipantId> {
        self.participant().map(|p| p.id)
    }

    pub fn position(&self) -> Option<u32> {
        self.participant().and_then(|p| p.position)
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Slot::Bye)
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self, Slot::Awaiting)
    }

    pub fn has_result(&self) -> bool {
        self.participant()
            .map_or(false, |p| p.result.is_some() || p.forfeit == Some(true))
    }

    pub fn has_score(&self) -> bool {
        self.participant().map_or(false, |p| p.score.is_some())
    }

    /// Keep the slot's identity but drop all match-result data. Byes stay Byes.
    pub fn scrubbed(&self) -> Self {
        match self {
            Slot::Bye => Slot::Bye,
            Slot::Awaiting => Slot::Awaiting,
            Slot::Occupied(p) => Slot::Occupied(p.stripped()),
        }
    }
}

/// Wire shape of a non-bye slot.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct SlotRecord {
    id: Option<ParticipantId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<MatchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    forfeit: Option<bool>,
}

impl From<Option<SlotRecord>> for Slot {
    fn from(record: Option<SlotRecord>) -> Self {
        let Some(record) = record else {
            return Slot::Bye;
        };
        match record.id {
            None => Slot::Awaiting,
            Some(id) => Slot::Occupied(Participant {
                id,
                position: record.position,
                score: record.score,
                result: record.result,
                forfeit: record.forfeit,
            }),
        }
    }
}

impl From<Slot> for Option<SlotRecord> {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::Bye => None,
            Slot::Awaiting => Some(SlotRecord::default()),
            Slot::Occupied(p) => Some(SlotRecord {
                id: Some(p.id),
                position: p.position,
                score: p.score,
                result: p.result,
                forfeit: p.forfeit,
            }),
        }
    }
}
