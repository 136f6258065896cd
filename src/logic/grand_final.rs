//! Grand-final reset match: reopen it when the first grand final is undone.

use crate::models::{
    BracketContext, GrandFinalType, Match, MatchId, MatchStatus, ResetError, StageType,
};
use crate::store::MatchStore;

/// Group number of the final group in a double-elimination stage.
pub const FINAL_GROUP_NUMBER: u32 = 3;

/// Round 1 of the final group of a double-elimination stage that plays a grand final.
pub fn is_first_grand_final(m: &Match, context: &BracketContext) -> bool {
    context.stage.kind == StageType::DoubleElimination
        && context.stage.grand_final != GrandFinalType::None
        && context.group_number(m) == Some(FINAL_GROUP_NUMBER)
        && context.round_number(m) == Some(1)
}

/// The conditional second grand-final match, if the bracket has one.
pub fn second_grand_final<'a>(first: &Match, context: &'a BracketContext) -> Option<&'a Match> {
    context
        .matches
        .iter()
        .find(|m| m.group_id == first.group_id && context.round_number(m) == Some(2))
}

/// If `target` is the first grand final of a `Double` format stage and the second one was
/// archived in the pre-reset snapshot, set the second one back to Ready. Returns the reopened
/// match id.
pub(crate) fn reopen_grand_final_reset<S: MatchStore + ?Sized>(
    store: &S,
    target: &Match,
    context: &BracketContext,
) -> Result<Option<MatchId>, ResetError> {
    if context.stage.grand_final != GrandFinalType::Double {
        return Ok(None);
    }
    if !is_first_grand_final(target, context) {
        return Ok(None);
    }
    let Some(second) = second_grand_final(target, context) else {
        log::debug!("Grand final {} has no reset match", target.id);
        return Ok(None);
    };
    if second.status != MatchStatus::Archived {
        return Ok(None);
    }
    store.update_status(second.id, MatchStatus::Ready)?;
    log::info!("Reopened grand-final reset match {}", second.id);
    Ok(Some(second.id))
}
