//! Job lifecycle phases and the forward-transition gate.

use core::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use freightdesk_core::DomainError;

use crate::defect::IntakeDefect;
use crate::intake::IntakeData;

/// Lifecycle phase of a logistics job.
///
/// Primary chain: DRAFT → INTAKE → MARKET → QUOTES → AWARDED → SHIPMENT →
/// COMPLETED. CANCELLED is terminal and reachable from any non-terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobPhase {
    Draft,
    Intake,
    Market,
    Quotes,
    Awarded,
    Shipment,
    Completed,
    Cancelled,
}

impl JobPhase {
    pub const ALL: [JobPhase; 8] = [
        JobPhase::Draft,
        JobPhase::Intake,
        JobPhase::Market,
        JobPhase::Quotes,
        JobPhase::Awarded,
        JobPhase::Shipment,
        JobPhase::Completed,
        JobPhase::Cancelled,
    ];

    pub fn name(self) -> &'static str {
        match self {
            JobPhase::Draft => "DRAFT",
            JobPhase::Intake => "INTAKE",
            JobPhase::Market => "MARKET",
            JobPhase::Quotes => "QUOTES",
            JobPhase::Awarded => "AWARDED",
            JobPhase::Shipment => "SHIPMENT",
            JobPhase::Completed => "COMPLETED",
            JobPhase::Cancelled => "CANCELLED",
        }
    }

    /// Three-letter abbreviation used in references.
    pub fn code(self) -> &'static str {
        match self {
            JobPhase::Draft => "DFT",
            JobPhase::Intake => "INT",
            JobPhase::Market => "MKT",
            JobPhase::Quotes => "QTE",
            JobPhase::Awarded => "AWD",
            JobPhase::Shipment => "TRN",
            JobPhase::Completed => "CLS",
            JobPhase::Cancelled => "CAN",
        }
    }

    /// Next phase on the primary chain.
    pub fn next(self) -> Option<JobPhase> {
        match self {
            JobPhase::Draft => Some(JobPhase::Intake),
            JobPhase::Intake => Some(JobPhase::Market),
            JobPhase::Market => Some(JobPhase::Quotes),
            JobPhase::Quotes => Some(JobPhase::Awarded),
            JobPhase::Awarded => Some(JobPhase::Shipment),
            JobPhase::Shipment => Some(JobPhase::Completed),
            JobPhase::Completed | JobPhase::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

impl core::fmt::Display for JobPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JobPhase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        JobPhase::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::validation(format!("unknown job phase: {wanted}")))
    }
}

/// Outcome of [`can_advance`].
///
/// Serializes as `{ok, next, errors, defects}` so callers can show `errors`
/// directly; `ok` and `errors` are derived and ignored when reading back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdvanceCheck {
    /// Phase the job would move to; `None` for terminal phases.
    pub next: Option<JobPhase>,
    pub defects: Vec<IntakeDefect>,
}

impl AdvanceCheck {
    pub fn ok(&self) -> bool {
        self.defects.is_empty()
    }

    /// Display messages, one per defect, in rule order.
    pub fn errors(&self) -> Vec<String> {
        self.defects.iter().map(ToString::to_string).collect()
    }
}

impl Serialize for AdvanceCheck {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AdvanceCheck", 4)?;
        state.serialize_field("ok", &self.ok())?;
        state.serialize_field("next", &self.next)?;
        state.serialize_field("errors", &self.errors())?;
        state.serialize_field("defects", &self.defects)?;
        state.end()
    }
}

/// Decide whether a job in `current` may move to the next phase.
///
/// A missing intake is reported alone. Otherwise every rule is evaluated and
/// all violations are returned together.
pub fn can_advance(current: JobPhase, intake: Option<&IntakeData>) -> AdvanceCheck {
    let next = current.next();

    let Some(intake) = intake else {
        return AdvanceCheck {
            next,
            defects: vec![IntakeDefect::IntakeMissing],
        };
    };

    if next.is_none() {
        return AdvanceCheck {
            next,
            defects: vec![IntakeDefect::NoForwardTransition { phase: current }],
        };
    }

    AdvanceCheck {
        next,
        defects: intake_defects(intake),
    }
}

/// Every readiness rule violated by `intake`, in a fixed order.
pub fn intake_defects(intake: &IntakeData) -> Vec<IntakeDefect> {
    let mut defects = Vec::new();

    if !intake.has_shipper() {
        defects.push(IntakeDefect::MissingShipper);
    }
    if !intake.has_consignee() {
        defects.push(IntakeDefect::MissingConsignee);
    }
    if !intake.has_incoterms() {
        defects.push(IntakeDefect::MissingIncoterms);
    }
    if !intake.has_origin() {
        defects.push(IntakeDefect::MissingOrigin);
    }
    if !intake.has_destination() {
        defects.push(IntakeDefect::MissingDestination);
    }

    if intake.cargo_lines.is_empty() {
        defects.push(IntakeDefect::NoCargoLines);
    }
    defects.extend(
        intake
            .cargo_lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !intake.line_dimensions_ok(line))
            .map(|(idx, _)| IntakeDefect::MissingDimensions { line: idx + 1 }),
    );

    if !intake.has_commodity() {
        defects.push(IntakeDefect::MissingCommodity);
    }

    defects
}
