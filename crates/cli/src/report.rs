//! Assessment report printed by `freightdesk assess`.

use serde::Serialize;

use freightdesk_cargo::{CargoMetrics, CommercialParameters, Modality, compute_cargo_metrics};
use freightdesk_core::Clock;
use freightdesk_jobs::{
    AdvanceCheck, IntakeData, JobPhase, can_advance, generate_reference, score_completeness,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub reference: String,
    pub modality: Modality,
    pub phase: JobPhase,
    pub dimensions_required: bool,
    pub metrics: CargoMetrics,
    pub completeness: u8,
    /// Serialized as `{ok, next, errors, defects}` for notification toasts.
    pub advance: AdvanceCheck,
}

/// Run every engine component over one intake.
pub fn assess(
    intake: &IntakeData,
    phase: JobPhase,
    sequence: u64,
    params: &CommercialParameters,
    clock: &impl Clock,
) -> AssessmentReport {
    let mode = intake.mode();

    AssessmentReport {
        reference: generate_reference(intake.modality, phase, sequence, clock),
        modality: intake.modality,
        phase,
        dimensions_required: mode.requires_dimensions(),
        metrics: compute_cargo_metrics(&intake.cargo_lines, mode, params),
        completeness: score_completeness(Some(intake)),
        advance: can_advance(phase, Some(intake)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freightdesk_cargo::{CargoLine, PackagingType};
    use freightdesk_core::FixedClock;
    use serde_json::json;

    #[test]
    fn air_scenario_report() {
        let mut intake = IntakeData::new(Modality::Air);
        intake.cargo_lines = vec![
            CargoLine::new(PackagingType::Crate)
                .with_quantity(2)
                .with_dimensions(100.0, 100.0, 100.0)
                .with_weight(50.0),
        ];

        let report = assess(
            &intake,
            JobPhase::Intake,
            12,
            &CommercialParameters::default(),
            &FixedClock::at_year(2026),
        );

        assert_eq!(report.reference, "AIR-INT-26-000012");
        assert!(report.dimensions_required);
        assert_eq!(report.metrics.chargeable_units, 333.33);
        assert_eq!(report.completeness, 25);
        assert!(!report.advance.ok());
        assert_eq!(report.advance.errors().len(), report.advance.defects.len());
        assert_eq!(report.advance.errors()[0], "Shipper is required");
    }

    #[test]
    fn report_serializes_for_toasts() {
        let intake = IntakeData::new(Modality::Road);
        let report = assess(
            &intake,
            JobPhase::Draft,
            1,
            &CommercialParameters::default(),
            &FixedClock::at_year(2025),
        );

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["reference"], "ROA-DFT-25-000001");
        assert_eq!(value["advance"]["ok"], false);
        assert_eq!(value["advance"]["next"], "INTAKE");
        assert_eq!(value["advance"]["errors"][0], "Shipper is required");
        assert_eq!(value["advance"]["defects"][0], json!({ "kind": "MISSING_SHIPPER" }));
        assert_eq!(value["metrics"]["chargeableUnit"], "kg");
    }
}
