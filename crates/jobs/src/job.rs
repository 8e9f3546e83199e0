use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use freightdesk_cargo::Modality;
use freightdesk_core::{Aggregate, AggregateRoot, DomainError, JobId};
use freightdesk_events::Event;

use crate::defect::IntakeDefect;
use crate::intake::IntakeData;
use crate::phase::{JobPhase, can_advance};
use crate::reference::format_reference;

/// Errors produced when deciding job commands.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum JobError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The readiness gate refused the transition; `defects` lists every reason.
    #[error("job cannot leave {phase}: {}", join_defects(.defects))]
    Blocked {
        phase: JobPhase,
        defects: Vec<IntakeDefect>,
    },
}

fn join_defects(defects: &[IntakeDefect]) -> String {
    defects
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Aggregate root: a logistics job moving through its lifecycle phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    sequence: u64,
    modality: Modality,
    phase: JobPhase,
    intake: Option<IntakeData>,
    opened_at: DateTime<Utc>,
    cancel_reason: Option<String>,
    version: u64,
    created: bool,
}

impl Job {
    /// Create an empty, not-yet-opened job for `handle`/`apply`.
    pub fn empty(id: JobId) -> Self {
        Self {
            id,
            sequence: 0,
            modality: Modality::Sea,
            phase: JobPhase::Draft,
            intake: None,
            opened_at: DateTime::<Utc>::UNIX_EPOCH,
            cancel_reason: None,
            version: 0,
            created: false,
        }
    }

    pub fn job_id(&self) -> JobId {
        self.id
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn phase(&self) -> JobPhase {
        self.phase
    }

    pub fn intake(&self) -> Option<&IntakeData> {
        self.intake.as_ref()
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn cancel_reason(&self) -> Option<&str> {
        self.cancel_reason.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.created
    }

    /// Current reference: modality, current phase, sequence and opening year.
    pub fn reference(&self) -> String {
        format_reference(self.modality, self.phase, self.sequence, self.opened_at.year())
    }

    /// Intake may be replaced until the job is awarded.
    pub fn accepts_intake_edits(&self) -> bool {
        matches!(
            self.phase,
            JobPhase::Draft | JobPhase::Intake | JobPhase::Market | JobPhase::Quotes
        )
    }
}

impl AggregateRoot for Job {
    type Id = JobId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: OpenJob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenJob {
    pub job_id: JobId,
    pub sequence: u64,
    pub modality: Modality,
    pub intake: Option<IntakeData>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReplaceIntake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceIntake {
    pub job_id: JobId,
    pub intake: IntakeData,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AdvancePhase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancePhase {
    pub job_id: JobId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CancelJob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelJob {
    pub job_id: JobId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JobCommand {
    OpenJob(OpenJob),
    ReplaceIntake(ReplaceIntake),
    AdvancePhase(AdvancePhase),
    CancelJob(CancelJob),
}

/// Event: JobOpened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOpened {
    pub job_id: JobId,
    pub sequence: u64,
    pub modality: Modality,
    pub intake: Option<IntakeData>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: IntakeReplaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeReplaced {
    pub job_id: JobId,
    pub intake: IntakeData,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PhaseAdvanced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseAdvanced {
    pub job_id: JobId,
    pub from: JobPhase,
    pub to: JobPhase,
    pub occurred_at: DateTime<Utc>,
}

/// Event: JobCancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCancelled {
    pub job_id: JobId,
    pub from: JobPhase,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JobEvent {
    JobOpened(JobOpened),
    IntakeReplaced(IntakeReplaced),
    PhaseAdvanced(PhaseAdvanced),
    JobCancelled(JobCancelled),
}

impl Event for JobEvent {
    fn event_type(&self) -> &'static str {
        match self {
            JobEvent::JobOpened(_) => "jobs.job.opened",
            JobEvent::IntakeReplaced(_) => "jobs.job.intake_replaced",
            JobEvent::PhaseAdvanced(_) => "jobs.job.phase_advanced",
            JobEvent::JobCancelled(_) => "jobs.job.cancelled",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            JobEvent::JobOpened(e) => e.occurred_at,
            JobEvent::IntakeReplaced(e) => e.occurred_at,
            JobEvent::PhaseAdvanced(e) => e.occurred_at,
            JobEvent::JobCancelled(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Job {
    type Command = JobCommand;
    type Event = JobEvent;
    type Error = JobError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            JobEvent::JobOpened(e) => {
                self.id = e.job_id;
                self.sequence = e.sequence;
                self.modality = e.modality;
                self.phase = JobPhase::Draft;
                self.intake = e.intake.clone();
                self.opened_at = e.occurred_at;
                self.cancel_reason = None;
                self.created = true;
            }
            JobEvent::IntakeReplaced(e) => {
                self.modality = e.intake.modality;
                self.intake = Some(e.intake.clone());
            }
            JobEvent::PhaseAdvanced(e) => {
                self.phase = e.to;
            }
            JobEvent::JobCancelled(e) => {
                self.phase = JobPhase::Cancelled;
                self.cancel_reason = e.reason.clone();
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            JobCommand::OpenJob(cmd) => self.handle_open(cmd),
            JobCommand::ReplaceIntake(cmd) => self.handle_replace_intake(cmd),
            JobCommand::AdvancePhase(cmd) => self.handle_advance(cmd),
            JobCommand::CancelJob(cmd) => self.handle_cancel(cmd),
        }
    }
}

impl Job {
    fn ensure_open(&self, job_id: JobId) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        if self.id != job_id {
            return Err(DomainError::invariant("job_id mismatch"));
        }
        Ok(())
    }

    fn handle_open(&self, cmd: &OpenJob) -> Result<Vec<JobEvent>, JobError> {
        if self.created {
            return Err(DomainError::conflict("job already exists").into());
        }
        if let Some(intake) = &cmd.intake {
            if intake.modality != cmd.modality {
                return Err(DomainError::validation(format!(
                    "intake modality {} does not match job modality {}",
                    intake.modality, cmd.modality
                ))
                .into());
            }
        }

        Ok(vec![JobEvent::JobOpened(JobOpened {
            job_id: cmd.job_id,
            sequence: cmd.sequence,
            modality: cmd.modality,
            intake: cmd.intake.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_replace_intake(&self, cmd: &ReplaceIntake) -> Result<Vec<JobEvent>, JobError> {
        self.ensure_open(cmd.job_id)?;

        if !self.accepts_intake_edits() {
            return Err(DomainError::invariant(format!(
                "intake is locked once a job is awarded (job is {})",
                self.phase
            ))
            .into());
        }

        Ok(vec![JobEvent::IntakeReplaced(IntakeReplaced {
            job_id: cmd.job_id,
            intake: cmd.intake.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_advance(&self, cmd: &AdvancePhase) -> Result<Vec<JobEvent>, JobError> {
        self.ensure_open(cmd.job_id)?;

        let check = can_advance(self.phase, self.intake.as_ref());
        let next = match check.next {
            Some(next) if check.ok() => next,
            _ => {
                return Err(JobError::Blocked {
                    phase: self.phase,
                    defects: check.defects,
                });
            }
        };

        Ok(vec![JobEvent::PhaseAdvanced(PhaseAdvanced {
            job_id: cmd.job_id,
            from: self.phase,
            to: next,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_cancel(&self, cmd: &CancelJob) -> Result<Vec<JobEvent>, JobError> {
        self.ensure_open(cmd.job_id)?;

        if self.phase.is_terminal() {
            return Err(DomainError::invariant(format!("job is already {}", self.phase)).into());
        }

        let reason = cmd
            .reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        Ok(vec![JobEvent::JobCancelled(JobCancelled {
            job_id: cmd.job_id,
            from: self.phase,
            reason,
            occurred_at: cmd.occurred_at,
        })])
    }
}
