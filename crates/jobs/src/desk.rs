//! Job desk: application service that runs job commands against a record store.
//!
//! ```text
//! command
//!   ↓ load snapshot from `jobs` (or start from Job::empty)
//!   ↓ handle (pure decision)
//!   ↓ apply events, record each envelope in `job_events`
//!   ↓ save snapshot back to `jobs`
//! ```
//!
//! Snapshot and history writes are not atomic across collections; the snapshot
//! is written last so a failed history write leaves the job unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use freightdesk_cargo::{CargoMetrics, CommercialParameters, Modality, compute_cargo_metrics};
use freightdesk_core::{Aggregate, AggregateRoot, Clock, DomainError, ExpectedVersion, JobId};
use freightdesk_events::EventEnvelope;

use crate::completeness::score_completeness;
use crate::defect::IntakeDefect;
use crate::intake::IntakeData;
use crate::job::{
    AdvancePhase, CancelJob, Job, JobCommand, JobError, JobEvent, OpenJob, ReplaceIntake,
};
use crate::phase::{AdvanceCheck, JobPhase, can_advance};
use crate::store::{RecordStore, RecordStoreExt, StoreError};

/// Collection holding the latest snapshot of every job.
pub const JOBS: &str = "jobs";
/// Collection holding recorded job events.
pub const JOB_EVENTS: &str = "job_events";

const STREAM_TYPE: &str = "jobs.job";

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("job {0} not found")]
    NotFound(JobId),

    #[error(transparent)]
    Job(#[from] JobError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DeskError {
    /// Readiness defects when the failure was a blocked phase transition.
    pub fn defects(&self) -> Option<&[IntakeDefect]> {
        match self {
            DeskError::Job(JobError::Blocked { defects, .. }) => Some(defects),
            _ => None,
        }
    }
}

impl From<DomainError> for DeskError {
    fn from(value: DomainError) -> Self {
        DeskError::Job(JobError::Domain(value))
    }
}

/// Everything a job screen shows at a glance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub job_id: JobId,
    pub reference: String,
    pub phase: JobPhase,
    pub modality: Modality,
    pub completeness: u8,
    pub metrics: CargoMetrics,
    pub advance: AdvanceCheck,
}

impl JobSummary {
    /// Derive the summary of `job` under `params`.
    pub fn of(job: &Job, params: &CommercialParameters) -> Self {
        let intake = job.intake();
        let metrics = match intake {
            Some(intake) => compute_cargo_metrics(&intake.cargo_lines, intake.mode(), params),
            None => compute_cargo_metrics(&[], job.modality(), params),
        };

        Self {
            job_id: job.job_id(),
            reference: job.reference(),
            phase: job.phase(),
            modality: job.modality(),
            completeness: score_completeness(intake),
            metrics,
            advance: can_advance(job.phase(), intake),
        }
    }
}

/// Runs job commands over an injected store and clock.
#[derive(Debug)]
pub struct JobDesk<S, C> {
    store: S,
    clock: C,
    params: CommercialParameters,
}

impl<S, C> JobDesk<S, C> {
    pub fn new(store: S, clock: C, params: CommercialParameters) -> Self {
        Self {
            store,
            clock,
            params,
        }
    }

    pub fn params(&self) -> &CommercialParameters {
        &self.params
    }

    pub fn into_parts(self) -> (S, C) {
        (self.store, self.clock)
    }
}

impl<S, C> JobDesk<S, C>
where
    S: RecordStore,
    C: Clock,
{
    /// Open a new job with the next free sequence number.
    pub fn open_job(
        &self,
        modality: Modality,
        intake: Option<IntakeData>,
    ) -> Result<Job, DeskError> {
        let job_id = JobId::new();
        let sequence = self.next_sequence()?;
        let command = JobCommand::OpenJob(OpenJob {
            job_id,
            sequence,
            modality,
            intake,
            occurred_at: self.clock.now(),
        });
        self.execute(Job::empty(job_id), &command)
    }

    /// Replace the intake wholesale, failing if someone else saved in between.
    pub fn replace_intake(
        &self,
        job_id: JobId,
        intake: IntakeData,
        expected: ExpectedVersion,
    ) -> Result<Job, DeskError> {
        let job = self.job(job_id)?;
        expected.check(job.version())?;

        let command = JobCommand::ReplaceIntake(ReplaceIntake {
            job_id,
            intake,
            occurred_at: self.clock.now(),
        });
        self.execute(job, &command)
    }

    /// Move the job one phase forward if its intake is ready.
    pub fn advance(&self, job_id: JobId) -> Result<Job, DeskError> {
        let job = self.job(job_id)?;
        let command = JobCommand::AdvancePhase(AdvancePhase {
            job_id,
            occurred_at: self.clock.now(),
        });
        self.execute(job, &command)
    }

    pub fn cancel(&self, job_id: JobId, reason: Option<String>) -> Result<Job, DeskError> {
        let job = self.job(job_id)?;
        let command = JobCommand::CancelJob(CancelJob {
            job_id,
            reason,
            occurred_at: self.clock.now(),
        });
        self.execute(job, &command)
    }

    pub fn job(&self, job_id: JobId) -> Result<Job, DeskError> {
        self.store
            .fetch_typed::<Job>(JOBS, &job_id.to_string())?
            .ok_or(DeskError::NotFound(job_id))
    }

    /// All jobs, oldest first.
    pub fn jobs(&self) -> Result<Vec<Job>, DeskError> {
        let mut jobs: Vec<Job> = self.store.load_typed(JOBS)?;
        jobs.sort_by_key(|job| (job.sequence(), job.job_id()));
        Ok(jobs)
    }

    pub fn summary(&self, job_id: JobId) -> Result<JobSummary, DeskError> {
        let job = self.job(job_id)?;
        Ok(JobSummary::of(&job, &self.params))
    }

    /// Recorded events of one job in the order they were applied.
    pub fn history(&self, job_id: JobId) -> Result<Vec<EventEnvelope<JobEvent>>, DeskError> {
        let stream_id = job_id.to_string();
        let mut events: Vec<EventEnvelope<JobEvent>> = self
            .store
            .load_typed::<EventEnvelope<JobEvent>>(JOB_EVENTS)?
            .into_iter()
            .filter(|env| env.stream_id() == stream_id)
            .collect();
        events.sort_by_key(EventEnvelope::sequence_number);
        Ok(events)
    }

    fn next_sequence(&self) -> Result<u64, DeskError> {
        let highest = self
            .jobs()?
            .iter()
            .map(Job::sequence)
            .max()
            .unwrap_or(0);
        Ok(highest + 1)
    }

    fn execute(&self, mut job: Job, command: &JobCommand) -> Result<Job, DeskError> {
        let events = job.handle(command).inspect_err(|err| {
            if let JobError::Blocked { phase, defects } = err {
                tracing::warn!(
                    job_id = %job.job_id(),
                    phase = %phase,
                    defects = defects.len(),
                    "phase transition blocked"
                );
            }
        })?;

        let stream_id = job.job_id().to_string();
        for event in events {
            job.apply(&event);
            let envelope =
                EventEnvelope::record(STREAM_TYPE, stream_id.as_str(), job.version(), event);
            tracing::debug!(
                job_id = %stream_id,
                event_type = envelope.event_type(),
                sequence = envelope.sequence_number(),
                "recording job event"
            );
            self.store
                .save_typed(JOB_EVENTS, &envelope.record_key(), &envelope)?;
        }

        self.store.save_typed(JOBS, &stream_id, &job)?;
        tracing::info!(
            job_id = %stream_id,
            reference = %job.reference(),
            phase = %job.phase(),
            version = job.version(),
            "job saved"
        );

        Ok(job)
    }
}
