//! Reset engine: taint resolution, cascade planning, and the two-phase scrub.

mod cascade;
mod flat_scan;
mod grand_final;
mod reset;
mod taint;

pub use cascade::{build_tainted_slot_plan, CascadePlan, CascadeStrategy, GraphCascade};
pub use flat_scan::{find_matches_to_reset, flat_scan_plan, FlatScanCascade};
pub use grand_final::{is_first_grand_final, second_grand_final, FINAL_GROUP_NUMBER};
pub use reset::{preview_reset, reset_match_result, ResetOutcome};
pub use taint::{resolve_tainted_slots, RoundIndex};
