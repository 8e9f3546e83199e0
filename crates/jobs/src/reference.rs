//! Human-readable job references, e.g. `SEA-DFT-25-000007`.

use freightdesk_cargo::Modality;
use freightdesk_core::Clock;

use crate::phase::JobPhase;

/// Phase code used when a stored phase string is not recognised.
pub const FALLBACK_PHASE_CODE: &str = "DFT";

/// `{MOD}-{PHS}-{YY}-{SEQ6}` for the given calendar year.
///
/// Sequences above 999999 are printed in full rather than truncated.
pub fn format_reference(modality: Modality, phase: JobPhase, sequence: u64, year: i32) -> String {
    format!(
        "{}-{}-{:02}-{:06}",
        modality.code(),
        phase.code(),
        year.rem_euclid(100),
        sequence
    )
}

/// Reference stamped with the current year of `clock`.
///
/// No uniqueness tracking: callers supply distinct sequence numbers.
pub fn generate_reference(
    modality: Modality,
    phase: JobPhase,
    sequence: u64,
    clock: &impl Clock,
) -> String {
    format_reference(modality, phase, sequence, clock.year())
}

/// Phase code for a raw (possibly legacy or misspelt) phase name.
pub fn phase_code(raw: &str) -> &'static str {
    raw.parse::<JobPhase>()
        .map(JobPhase::code)
        .unwrap_or(FALLBACK_PHASE_CODE)
}
