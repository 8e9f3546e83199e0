//! Jobs domain module: shipment intake, readiness and lifecycle.
//!
//! The readiness engine (completeness score, phase gate, references) is pure.
//! The job aggregate and desk layer it over an injected record store.

pub mod completeness;
pub mod defect;
pub mod desk;
pub mod intake;
pub mod job;
pub mod phase;
pub mod reference;
pub mod store;

pub use completeness::score_completeness;
pub use defect::IntakeDefect;
pub use desk::{DeskError, JOB_EVENTS, JOBS, JobDesk, JobSummary};
pub use intake::{IntakeData, RoadDetails, SeaDetails};
pub use job::{
    AdvancePhase, CancelJob, IntakeReplaced, Job, JobCancelled, JobCommand, JobError, JobEvent,
    JobOpened, OpenJob, PhaseAdvanced, ReplaceIntake,
};
pub use phase::{AdvanceCheck, JobPhase, can_advance, intake_defects};
pub use reference::{format_reference, generate_reference, phase_code};
pub use store::{InMemoryRecordStore, RecordStore, RecordStoreExt, StoreError};
