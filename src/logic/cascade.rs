//! Cascade planning: which downstream matches a reset invalidates, and which of their slots.

use crate::logic::taint::{resolve_tainted_slots, RoundIndex};
use crate::models::{BracketContext, Match, MatchId, ResetError, SlotName};
use crate::store::BracketTopology;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

/// Downstream matches touched by one reset. Never includes the reset target itself.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CascadePlan {
    /// In structural order (group, round, number), not discovery order.
    pub affected_match_ids: Vec<MatchId>,
    pub tainted_slots_by_match: BTreeMap<MatchId, BTreeSet<SlotName>>,
}

impl CascadePlan {
    pub fn is_empty(&self) -> bool {
        self.affected_match_ids.is_empty()
    }

    pub fn is_tainted(&self, match_id: MatchId, slot: SlotName) -> bool {
        self.tainted_slots_by_match
            .get(&match_id)
            .map_or(false, |slots| slots.contains(&slot))
    }
}

/// A way of discovering the cascade for a reset target.
pub trait CascadeStrategy {
    fn plan(&self, target: &Match, context: &BracketContext) -> Result<CascadePlan, ResetError>;
}

/// Cascade discovered by walking a topology provider's next-match edges.
pub struct GraphCascade<'a, T: ?Sized> {
    topology: &'a T,
}

impl<'a, T: BracketTopology + ?Sized> GraphCascade<'a, T> {
    pub fn new(topology: &'a T) -> Self {
        Self { topology }
    }
}

impl<T: BracketTopology + ?Sized> CascadeStrategy for GraphCascade<'_, T> {
    fn plan(&self, target: &Match, context: &BracketContext) -> Result<CascadePlan, ResetError> {
        build_tainted_slot_plan(target.id, context, self.topology)
    }
}

/// Breadth-first walk of `next_matches` from `match_id`.
///
/// Every reachable match is visited, but taint only leaves a match whose own outcome is
/// invalidated: the target, or a cascade-eligible match with at least one tainted slot. A
/// match invalidated after it was already expanded is expanded again so its children see it.
pub fn build_tainted_slot_plan<T: BracketTopology + ?Sized>(
    match_id: MatchId,
    context: &BracketContext,
    next_matches: &T,
) -> Result<CascadePlan, ResetError> {
    let by_id: HashMap<MatchId, &Match> = context.matches.iter().map(|m| (m.id, m)).collect();
    let target = *by_id.get(&match_id).ok_or(ResetError::NotFound(match_id))?;
    let rounds = RoundIndex::from_context(context);

    let mut reachable: HashSet<MatchId> = HashSet::new();
    let mut invalidated: HashSet<MatchId> = HashSet::from([target.id]);
    let mut expanded: HashSet<MatchId> = HashSet::new();
    let mut tainted: BTreeMap<MatchId, BTreeSet<SlotName>> = BTreeMap::new();
    let mut queue = VecDeque::from([target]);

    while let Some(parent) = queue.pop_front() {
        expanded.insert(parent.id);
        let carries_taint = invalidated.contains(&parent.id);

        for raw in next_matches.next_matches(parent.id)? {
            let Some(child_id) = raw.normalize() else {
                log::warn!("Skipping non-numeric next match {:?} of match {}", raw, parent.id);
                continue;
            };
            if child_id == target.id {
                continue;
            }
            let Some(&child) = by_id.get(&child_id) else {
                log::warn!("Next match {} of match {} is not in this bracket", child_id, parent.id);
                continue;
            };

            let first_visit = reachable.insert(child_id);
            let mut newly_invalidated = false;
            if carries_taint && child.status.is_cascade_eligible() {
                let slots = resolve_tainted_slots(parent, child, &rounds);
                if !slots.is_empty() {
                    tainted.entry(child_id).or_default().extend(slots);
                    newly_invalidated = invalidated.insert(child_id);
                }
            }
            if first_visit || (newly_invalidated && expanded.contains(&child_id)) {
                queue.push_back(child);
            }
        }
    }

    let affected_match_ids: Vec<MatchId> = context
        .matches
        .iter()
        .filter(|m| reachable.contains(&m.id) && m.status.is_cascade_eligible())
        .map(|m| m.id)
        .collect();
    log::debug!(
        "Cascade from match {}: {} reachable, {} affected",
        match_id,
        reachable.len(),
        affected_match_ids.len()
    );

    Ok(CascadePlan {
        affected_match_ids,
        tainted_slots_by_match: tainted,
    })
}
