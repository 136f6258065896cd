//! Cascade discovery from the flat match listing alone, for single-elimination trees.
//!
//! No topology edges: a match's children are the matches one round later in the same group
//! whose slots resolve as fed by it. Repeated hop by hop until a hop finds nothing new.

use crate::logic::cascade::{CascadePlan, CascadeStrategy};
use crate::logic::taint::{resolve_tainted_slots, RoundIndex};
use crate::models::{BracketContext, Match, MatchId, ResetError, SlotName};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Cascade strategy that needs no topology provider.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatScanCascade;

impl CascadeStrategy for FlatScanCascade {
    fn plan(&self, target: &Match, context: &BracketContext) -> Result<CascadePlan, ResetError> {
        Ok(flat_scan_plan(target, &context.matches))
    }
}

/// Full plan (affected ids plus tainted slots) for the flat-listing walk.
pub fn flat_scan_plan(target: &Match, all_matches: &[Match]) -> CascadePlan {
    let rounds = RoundIndex::from_listing(all_matches);
    let mut tainted: BTreeMap<MatchId, BTreeSet<SlotName>> = BTreeMap::new();
    let mut invalidated: HashSet<MatchId> = HashSet::from([target.id]);
    let mut frontier: Vec<&Match> = vec![target];
    let mut hops = 0;

    while !frontier.is_empty() {
        let mut found = Vec::new();
        for child in all_matches {
            if child.id == target.id || !child.status.is_cascade_eligible() {
                continue;
            }
            for parent in &frontier {
                if !rounds.is_next_round(parent, child) {
                    continue;
                }
                let slots = resolve_tainted_slots(parent, child, &rounds);
                if slots.is_empty() {
                    continue;
                }
                tainted.entry(child.id).or_default().extend(slots);
                if invalidated.insert(child.id) {
                    found.push(child);
                }
            }
        }
        hops += 1;
        frontier = found;
    }

    let affected_match_ids: Vec<MatchId> = all_matches
        .iter()
        .filter(|m| tainted.contains_key(&m.id))
        .map(|m| m.id)
        .collect();
    log::debug!(
        "Flat scan from match {}: {} affected after {} hops",
        target.id,
        affected_match_ids.len(),
        hops
    );

    CascadePlan {
        affected_match_ids,
        tainted_slots_by_match: tainted,
    }
}

/// Matches a reset of `target` must also scrub, in listing order.
pub fn find_matches_to_reset(target: &Match, all_matches: &[Match]) -> Vec<Match> {
    let plan = flat_scan_plan(target, all_matches);
    all_matches
        .iter()
        .filter(|m| plan.tainted_slots_by_match.contains_key(&m.id))
        .cloned()
        .collect()
}
