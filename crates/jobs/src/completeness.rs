//! Intake completeness score (0–100) shown as a badge on intake forms.

use crate::intake::IntakeData;

const PARTIES_POINTS: u8 = 25;
const CARGO_POINTS: u8 = 25;
const ROUTING_POINTS: u8 = 25;
const COMMODITY_CLASSIFIED_POINTS: u8 = 25;
const COMMODITY_ONLY_POINTS: u8 = 15;

/// Score how much of `intake` is filled in. An absent intake scores 0.
pub fn score_completeness(intake: Option<&IntakeData>) -> u8 {
    let Some(intake) = intake else {
        return 0;
    };

    let mut score: u32 = 0;

    if intake.has_shipper()
        && intake.has_consignee()
        && intake.has_incoterms()
        && intake.has_currency()
    {
        score += u32::from(PARTIES_POINTS);
    }

    if cargo_complete(intake) {
        score += u32::from(CARGO_POINTS);
    }

    if intake.has_origin() && intake.has_destination() && intake.ready_date.is_some() {
        score += u32::from(ROUTING_POINTS);
    }

    if intake.has_commodity() {
        let classified = intake.has_hs_code() || intake.dangerous_goods;
        score += u32::from(if classified {
            COMMODITY_CLASSIFIED_POINTS
        } else {
            COMMODITY_ONLY_POINTS
        });
    }

    score.min(100) as u8
}

/// Lines present, all weighed, and dimensioned where the mode requires it.
fn cargo_complete(intake: &IntakeData) -> bool {
    !intake.cargo_lines.is_empty()
        && intake
            .cargo_lines
            .iter()
            .all(|line| line.has_weight() && intake.line_dimensions_ok(line))
}
