//! Intent engine error types.
//!
//! Plan synthesis itself is total and never fails.  The variants here belong
//! to the operations around it: registering applications and driving the
//! job queue.

/// Unified error type for the intent engine.
#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    // -- Queue errors --------------------------------------------------------
    /// A command was submitted to the queue with no content after trimming.
    #[error("command text is empty")]
    EmptyCommand,

    /// The referenced job is not in the queue.
    #[error("job not found: {job_id}")]
    JobNotFound { job_id: String },

    // -- Registry errors -----------------------------------------------------
    /// An application draft was submitted without a name.
    #[error("application name is empty")]
    EmptyApplicationName,

    /// A job status string did not name a known status.
    #[error("unknown job status `{0}`")]
    UnknownStatus(String),
}

/// Convenience alias used throughout the intent crate.
pub type Result<T> = std::result::Result<T, IntentError>;
