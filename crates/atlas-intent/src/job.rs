//! Job lifecycle: a queued command with its frozen plan.
//!
//! A job's status cycles `pending → in-progress → done → pending` one step
//! per [`Job::advance`] call.  There is no terminal state.  The command and
//! plan are fixed at creation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{IntentError, Result};
use crate::ids;
use crate::model::{Application, PlanStep, Workflow};
use crate::synthesizer::PlanSynthesizer;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Where a queued job is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl JobStatus {
    /// The status one activation later.
    pub fn next(self) -> Self {
        match self {
            Self::Pending => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::Pending,
        }
    }

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Queued",
            Self::InProgress => "Running",
            Self::Done => "Completed",
        }
    }

    /// Wire name, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = IntentError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(IntentError::UnknownStatus(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

/// A command queued for execution together with its synthesized plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    id: String,
    command: String,
    created_at: DateTime<Utc>,
    status: JobStatus,
    plan: Vec<PlanStep>,
}

impl Job {
    /// Create a pending job, freezing `plan`.
    ///
    /// The command is stored trimmed.
    pub fn new(command: &str, plan: Vec<PlanStep>) -> Self {
        Self {
            id: ids::job_id(),
            command: command.trim().to_string(),
            created_at: Utc::now(),
            status: JobStatus::Pending,
            plan,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// The plan frozen at creation time.
    pub fn plan(&self) -> &[PlanStep] {
        &self.plan
    }

    /// Move to the next status and return it.
    pub fn advance(&mut self) -> JobStatus {
        let previous = self.status;
        self.status = previous.next();
        debug!(job_id = %self.id, from = %previous, to = %self.status, "job advanced");
        self.status
    }
}

// ---------------------------------------------------------------------------
// Queue
// ---------------------------------------------------------------------------

/// In-memory automation queue, newest job first.
#[derive(Debug, Default)]
pub struct JobQueue {
    jobs: Vec<Job>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthesize a plan for `command` and queue it as a new pending job.
    ///
    /// Fails with [`IntentError::EmptyCommand`] when the command is blank.
    pub fn commit(
        &mut self,
        command: &str,
        synthesizer: &PlanSynthesizer,
        applications: &[Application],
        workflows: &[Workflow],
    ) -> Result<&Job> {
        let trimmed = command.trim();
        if trimmed.is_empty() {
            return Err(IntentError::EmptyCommand);
        }

        let plan = synthesizer.synthesize(trimmed, applications, workflows);
        let job = Job::new(trimmed, plan);
        info!(job_id = %job.id, steps = job.plan.len(), "job queued");

        self.jobs.insert(0, job);
        Ok(&self.jobs[0])
    }

    /// Advance the job with the given id to its next status.
    pub fn advance(&mut self, job_id: &str) -> Result<JobStatus> {
        self.jobs
            .iter_mut()
            .find(|job| job.id == job_id)
            .map(Job::advance)
            .ok_or_else(|| IntentError::JobNotFound {
                job_id: job_id.to_string(),
            })
    }

    pub fn get(&self, job_id: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == job_id)
    }

    /// All jobs, newest first.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
