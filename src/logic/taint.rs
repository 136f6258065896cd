//! Slot taint resolution: which of a child's slots was filled by a given parent match.

use crate::models::{BracketContext, GroupId, Match, RoundId, SlotName};
use std::collections::{BTreeSet, HashMap};

/// Round number for every round id of a bracket.
#[derive(Clone, Debug, Default)]
pub struct RoundIndex {
    numbers: HashMap<RoundId, u32>,
}

impl RoundIndex {
    /// Round numbers as stored with the bracket.
    pub fn from_context(context: &BracketContext) -> Self {
        Self {
            numbers: context.rounds.iter().map(|r| (r.id, r.number)).collect(),
        }
    }

    /// Round ordinals derived from a structurally ordered match listing: within each group,
    /// rounds are numbered in order of first appearance.
    pub fn from_listing(matches: &[Match]) -> Self {
        let mut per_group: HashMap<GroupId, u32> = HashMap::new();
        let mut numbers = HashMap::new();
        for m in matches {
            if numbers.contains_key(&m.round_id) {
                continue;
            }
            let ordinal = per_group.entry(m.group_id).or_insert(0);
            *ordinal += 1;
            numbers.insert(m.round_id, *ordinal);
        }
        Self { numbers }
    }

    pub fn round_number(&self, m: &Match) -> Option<u32> {
        self.numbers.get(&m.round_id).copied()
    }

    /// `child` sits in the same group, exactly one round after `parent`.
    pub fn is_next_round(&self, parent: &Match, child: &Match) -> bool {
        if parent.group_id != child.group_id {
            return false;
        }
        match (self.round_number(parent), self.round_number(child)) {
            (Some(p), Some(c)) => p.checked_add(1) == Some(c),
            _ => false,
        }
    }
}

/// Slots of `child` that were populated by `parent`.
///
/// A `position` hint is only usable when `child` is in the round right after `parent` in the
/// same group; a usable hint decides its slot outright. Slots without a usable hint fall back
/// to matching the occupant against `parent`'s occupants. If both hints claim `parent` they
/// contradict each other and both slots fall back.
pub fn resolve_tainted_slots(parent: &Match, child: &Match, rounds: &RoundIndex) -> BTreeSet<SlotName> {
    let hints_usable = rounds.is_next_round(parent, child);
    let mut verdicts = SlotName::BOTH.map(|name| {
        let hint = if hints_usable {
            child.slot(name).position()
        } else {
            None
        };
        hint.map(|position| position == parent.number)
    });
    if verdicts.iter().all(|v| *v == Some(true)) {
        verdicts = [None, None];
    }

    let occupants = parent.occupant_ids();
    SlotName::BOTH
        .into_iter()
        .zip(verdicts)
        .filter(|(name, verdict)| match verdict {
            Some(fed_by_parent) => *fed_by_parent,
            None => child
                .slot(*name)
                .participant_id()
                .map_or(false, |id| occupants.contains(&id)),
        })
        .map(|(name, _)| name)
        .collect()
}
