//! Reset orchestration: undo a match result and scrub every match that consumed it.

use crate::logic::cascade::{CascadePlan, CascadeStrategy};
use crate::logic::grand_final::reopen_grand_final_reset;
use crate::models::{BracketContext, EventScope, Match, MatchId, ResetError, Slot, SlotName, StoreError};
use crate::store::MatchStore;
use serde::Serialize;
use std::collections::BTreeSet;

/// What a reset touched.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ResetOutcome {
    /// Target first, then the cascade in structural order.
    pub reset_match_ids: Vec<MatchId>,
    /// Grand-final reset match set back to Ready, if any.
    pub reopened_match_id: Option<MatchId>,
}

/// Plan a reset without writing anything. Fails the same way `reset_match_result` would
/// before its first write.
pub fn preview_reset<S, C>(
    store: &S,
    strategy: &C,
    scope: &EventScope,
    match_id: MatchId,
) -> Result<CascadePlan, ResetError>
where
    S: MatchStore + ?Sized,
    C: CascadeStrategy + ?Sized,
{
    let context = store.bracket_context(scope)?;
    let target = resettable_target(&context, match_id)?;
    strategy.plan(target, &context)
}

/// Undo the result of `match_id` and everything derived from it.
///
/// The target keeps both participants; cascade members lose only their tainted slots. Every
/// touched match is scrubbed in two writes (clear, then restore) and loses its frames. Writes
/// run target first, then the cascade in structural order, then the grand-final check. A
/// store failure stops the sequence where it is; nothing is rolled back, and calling again
/// on the same target is safe.
pub fn reset_match_result<S, C>(
    store: &S,
    strategy: &C,
    scope: &EventScope,
    match_id: MatchId,
) -> Result<ResetOutcome, ResetError>
where
    S: MatchStore + ?Sized,
    C: CascadeStrategy + ?Sized,
{
    let context = store.bracket_context(scope)?;
    let target = resettable_target(&context, match_id)?;
    let plan = strategy.plan(target, &context)?;
    log::info!(
        "Resetting match {} ({:?}), {} downstream match(es) affected",
        target.id,
        target.status,
        plan.affected_match_ids.len()
    );

    scrub_match(store, target, &BTreeSet::new())?;
    let mut reset_match_ids = vec![target.id];

    for &id in &plan.affected_match_ids {
        let m = context
            .find_match(id)
            .ok_or(StoreError::MatchNotFound(id))?;
        let tainted = plan
            .tainted_slots_by_match
            .get(&id)
            .cloned()
            .unwrap_or_default();
        scrub_match(store, m, &tainted)?;
        reset_match_ids.push(id);
    }

    let reopened_match_id = reopen_grand_final_reset(store, target, &context)?;

    Ok(ResetOutcome {
        reset_match_ids,
        reopened_match_id,
    })
}

fn resettable_target(context: &BracketContext, match_id: MatchId) -> Result<&Match, ResetError> {
    let target = context
        .find_match(match_id)
        .ok_or(ResetError::NotFound(match_id))?;
    if !target.status.is_resettable() {
        return Err(ResetError::InvalidState {
            match_id,
            status: target.status,
        });
    }
    Ok(target)
}

/// Clear both slots, write back what survives, then drop the match's frames.
fn scrub_match<S: MatchStore + ?Sized>(
    store: &S,
    m: &Match,
    tainted: &BTreeSet<SlotName>,
) -> Result<(), StoreError> {
    store.write_opponents(m.id, Slot::Awaiting, Slot::Awaiting)?;

    let restore = |name: SlotName| restored_slot(m.slot(name), tainted.contains(&name));
    store.write_opponents(
        m.id,
        restore(SlotName::Opponent1),
        restore(SlotName::Opponent2),
    )?;

    let frames = store.delete_frames(m.id)?;
    log::debug!(
        "Scrubbed match {} (tainted: {:?}, frames deleted: {})",
        m.id,
        tainted,
        frames
    );
    Ok(())
}

fn restored_slot(original: &Slot, tainted: bool) -> Slot {
    match original {
        Slot::Bye => Slot::Bye,
        Slot::Occupied(_) if tainted => Slot::Awaiting,
        other => other.scrubbed(),
    }
}
