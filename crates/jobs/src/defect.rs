//! Readiness defects reported by the phase validator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::phase::JobPhase;

/// One reason a job cannot advance.
///
/// The `Display` text goes straight into user notifications; the serialized
/// `kind` is the stable tag for callers that localize or test.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntakeDefect {
    #[error("Intake details are missing for this job")]
    IntakeMissing,

    #[error("Job is {phase} and cannot advance any further")]
    NoForwardTransition { phase: JobPhase },

    #[error("Shipper is required")]
    MissingShipper,

    #[error("Consignee is required")]
    MissingConsignee,

    #[error("Incoterms are required")]
    MissingIncoterms,

    #[error("Origin is required")]
    MissingOrigin,

    #[error("Destination is required")]
    MissingDestination,

    #[error("At least one cargo line is required")]
    NoCargoLines,

    /// `line` is the 1-based position in the cargo list.
    #[error("Cargo line {line} is missing dimensions (length, width, height)")]
    MissingDimensions { line: usize },

    #[error("Commodity description is required")]
    MissingCommodity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_displayable() {
        assert_eq!(IntakeDefect::MissingShipper.to_string(), "Shipper is required");
        assert_eq!(
            IntakeDefect::MissingDimensions { line: 2 }.to_string(),
            "Cargo line 2 is missing dimensions (length, width, height)"
        );
        assert_eq!(
            IntakeDefect::NoForwardTransition { phase: JobPhase::Completed }.to_string(),
            "Job is COMPLETED and cannot advance any further"
        );
    }

    #[test]
    fn kinds_serialize_as_stable_tags() {
        let json = serde_json::to_value(IntakeDefect::MissingDimensions { line: 3 }).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "MISSING_DIMENSIONS", "line": 3 }));

        let json = serde_json::to_value(IntakeDefect::MissingShipper).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "MISSING_SHIPPER" }));
    }
}
