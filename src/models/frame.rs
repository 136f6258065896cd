//! Frame-by-frame scoring detail recorded against a match.

use crate::models::game::MatchId;
use crate::models::opponent::ParticipantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Points scored by one participant in one frame.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    pub participant_id: ParticipantId,
    pub points: u32,
}

/// One round of play inside a match. Owned by its match; deleted whenever the match is reset.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub match_id: MatchId,
    /// 1-based frame number within the match.
    pub number: u32,
    pub recorded_at: DateTime<Utc>,
    #[serde(default)]
    pub results: Vec<FrameResult>,
}

impl Frame {
    pub fn new(match_id: MatchId, number: u32) -> Self {
        Self {
            match_id,
            number,
            recorded_at: Utc::now(),
            results: Vec::new(),
        }
    }

    pub fn with_result(mut self, participant_id: ParticipantId, points: u32) -> Self {
        self.results.push(FrameResult {
            participant_id,
            points,
        });
        self
    }
}
