//! Stage, Group, Round, and the BracketContext snapshot handed to the reset engine.

use crate::models::game::{GroupId, Match, MatchId, RoundId, StageId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Identifies one bracket: a stage within a tournament.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct EventScope {
    pub tournament_id: TournamentId,
    pub stage_id: StageId,
}

/// Shape of the bracket.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageType {
    SingleElimination,
    DoubleElimination,
}

/// Grand final format for double elimination.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrandFinalType {
    #[default]
    None,
    /// One grand-final match.
    Simple,
    /// A second "reset" match is played if the losers-side champion wins the first.
    Double,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: StageId,
    pub tournament_id: TournamentId,
    pub name: String,
    pub kind: StageType,
    #[serde(default)]
    pub grand_final: GrandFinalType,
}

/// A group of rounds: winners bracket (1), losers bracket (2), final group (3).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub stage_id: StageId,
    pub number: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub stage_id: StageId,
    pub group_id: GroupId,
    pub number: u32,
}

/// Everything the store knows about one bracket, read in a single pass.
///
/// `matches` is in structural order: group number, then round number, then match number.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketContext {
    pub stage: Stage,
    pub groups: Vec<Group>,
    pub rounds: Vec<Round>,
    pub matches: Vec<Match>,
}

impl BracketContext {
    pub fn scope(&self) -> EventScope {
        EventScope {
            tournament_id: self.stage.tournament_id,
            stage_id: self.stage.id,
        }
    }

    pub fn find_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn round(&self, id: RoundId) -> Option<&Round> {
        self.rounds.iter().find(|r| r.id == id)
    }

    pub fn group_number(&self, m: &Match) -> Option<u32> {
        self.group(m.group_id).map(|g| g.number)
    }

    pub fn round_number(&self, m: &Match) -> Option<u32> {
        self.round(m.round_id).map(|r| r.number)
    }

    /// Sort matches into structural order. Unknown groups/rounds sort last.
    pub fn sort_structurally(&mut self) {
        let groups = &self.groups;
        let rounds = &self.rounds;
        let key = |m: &Match| {
            let group = groups
                .iter()
                .find(|g| g.id == m.group_id)
                .map_or(u32::MAX, |g| g.number);
            let round = rounds
                .iter()
                .find(|r| r.id == m.round_id)
                .map_or(u32::MAX, |r| r.number);
            (group, round, m.number)
        };
        self.matches.sort_by_key(key);
    }
}
