//! Match, MatchStatus, and SlotName.

use crate::models::opponent::{ParticipantId, Slot};
use serde::{Deserialize, Serialize};

/// Unique identifier for a match.
pub type MatchId = u64;
pub type StageId = u64;
pub type GroupId = u64;
pub type RoundId = u64;

/// Where a match stands in its lifecycle.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// One side is known, the other is still awaiting a winner.
    Locked,
    /// Neither side is known yet.
    #[default]
    Waiting,
    /// Both sides known; the match may be scored.
    Ready,
    Running,
    Completed,
    /// Deliberately excluded from play (e.g. an unneeded grand-final reset match).
    Archived,
}

impl MatchStatus {
    /// Only matches with a recorded or in-flight result can be reset.
    pub fn is_resettable(self) -> bool {
        matches!(
            self,
            MatchStatus::Completed | MatchStatus::Running | MatchStatus::Archived
        )
    }

    /// Whether a downstream match in this status holds derived data a reset must sweep.
    pub fn is_cascade_eligible(self) -> bool {
        matches!(
            self,
            MatchStatus::Locked
                | MatchStatus::Running
                | MatchStatus::Completed
                | MatchStatus::Archived
        )
    }

    /// Status implied by the contents of a match's two slots.
    pub fn from_slots(opponent1: &Slot, opponent2: &Slot) -> Self {
        if opponent1.has_result() || opponent2.has_result() {
            return MatchStatus::Completed;
        }
        if opponent1.has_score() || opponent2.has_score() {
            return MatchStatus::Running;
        }
        if opponent1.is_bye() || opponent2.is_bye() {
            return MatchStatus::Locked;
        }
        match (opponent1.participant_id(), opponent2.participant_id()) {
            (Some(_), Some(_)) => MatchStatus::Ready,
            (Some(_), None) | (None, Some(_)) => MatchStatus::Locked,
            (None, None) => MatchStatus::Waiting,
        }
    }
}

/// Which of a match's two competitor positions.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotName {
    Opponent1,
    Opponent2,
}

impl SlotName {
    pub const BOTH: [SlotName; 2] = [SlotName::Opponent1, SlotName::Opponent2];
}

/// A single bracket match between two slots.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub stage_id: StageId,
    pub group_id: GroupId,
    pub round_id: RoundId,
    /// 1-based position within the round.
    pub number: u32,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub opponent1: Slot,
    #[serde(default)]
    pub opponent2: Slot,
}

impl Match {
    /// New match with both slots awaiting.
    pub fn new(id: MatchId, stage_id: StageId, group_id: GroupId, round_id: RoundId, number: u32) -> Self {
        Self {
            id,
            stage_id,
            group_id,
            round_id,
            number,
            status: MatchStatus::Waiting,
            opponent1: Slot::Awaiting,
            opponent2: Slot::Awaiting,
        }
    }

    /// Set both slots; status is re-derived from them.
    pub fn with_opponents(mut self, opponent1: Slot, opponent2: Slot) -> Self {
        self.status = MatchStatus::from_slots(&opponent1, &opponent2);
        self.opponent1 = opponent1;
        self.opponent2 = opponent2;
        self
    }

    pub fn with_status(mut self, status: MatchStatus) -> Self {
        self.status = status;
        self
    }

    pub fn slot(&self, name: SlotName) -> &Slot {
        match name {
            SlotName::Opponent1 => &self.opponent1,
            SlotName::Opponent2 => &self.opponent2,
        }
    }

    /// Participant ids currently sitting in either slot.
    pub fn occupant_ids(&self) -> Vec<ParticipantId> {
        SlotName::BOTH
            .iter()
            .filter_map(|&name| self.slot(name).participant_id())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::opponent::{MatchResult, Participant};

    #[test]
    fn status_follows_slot_contents() {
        let one = Slot::occupied(1);
        let two = Slot::occupied(2);
        assert_eq!(MatchStatus::from_slots(&Slot::Awaiting, &Slot::Awaiting), MatchStatus::Waiting);
        assert_eq!(MatchStatus::from_slots(&one, &Slot::Awaiting), MatchStatus::Locked);
        assert_eq!(MatchStatus::from_slots(&one, &two), MatchStatus::Ready);
        assert_eq!(MatchStatus::from_slots(&one, &Slot::Bye), MatchStatus::Locked);

        let scored = Slot::Occupied(Participant::new(1).with_score(3));
        assert_eq!(MatchStatus::from_slots(&scored, &two), MatchStatus::Running);

        let won = Slot::Occupied(Participant::new(1).with_score(3).with_result(MatchResult::Win));
        assert_eq!(MatchStatus::from_slots(&won, &two), MatchStatus::Completed);
    }

    #[test]
    fn resettable_and_eligible_sets() {
        use MatchStatus::*;
        let resettable: Vec<_> = [Locked, Waiting, Ready, Running, Completed, Archived]
            .into_iter()
            .filter(|s| s.is_resettable())
            .collect();
        assert_eq!(resettable, vec![Running, Completed, Archived]);

        let eligible: Vec<_> = [Locked, Waiting, Ready, Running, Completed, Archived]
            .into_iter()
            .filter(|s| s.is_cascade_eligible())
            .collect();
        assert_eq!(eligible, vec![Locked, Running, Completed, Archived]);
    }
}
