// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control-core error taxonomy.

use crate::crawl::EngineError;
use dg_core::{Action, JobName, JobState, NameError};
use thiserror::Error;

/// Errors surfaced by the job controller and registry.
///
/// Every variant is recoverable and leaves the job's observable state
/// unchanged; callers decide how to present the reason.
#[derive(Debug, Error)]
pub enum ControlError {
    /// Action attempted outside its legal state.
    #[error("action '{action}' not permitted in state '{state}'")]
    Guard { action: Action, state: JobState },

    /// Configuration validation failed; the job stays in its prior state.
    #[error("configuration invalid: {0}")]
    ConfigInvalid(String),

    /// Unknown job, or a log that does not exist yet.
    #[error("not found: {0}")]
    NotFound(String),

    /// Copy or register destination already exists.
    #[error("job '{0}' already exists")]
    NameConflict(JobName),

    /// Another transition is in flight for this job, or a discard was
    /// requested while the crawl is live. The caller may retry.
    #[error("job '{0}' is busy")]
    Busy(JobName),

    /// A recognized transition with no implementation yet.
    #[error("action '{0}' is not implemented")]
    Unimplemented(Action),

    #[error("invalid job name: {0}")]
    Name(#[from] NameError),

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Read(#[from] dg_files::ReadError),

    /// Engine operation failed for a reason other than validation.
    #[error("engine failure: {0}")]
    Engine(String),

    /// Internal invariant broken; a defect, not an operator error.
    #[error("internal state error: {0}")]
    Internal(&'static str),
}

impl ControlError {
    /// Map an engine error into the taxonomy: validation failures keep
    /// their identity, everything else is an engine failure.
    pub(crate) fn from_engine(err: EngineError) -> Self {
        match err {
            EngineError::ConfigInvalid(reason) => ControlError::ConfigInvalid(reason),
            EngineError::Failed(reason) => ControlError::Engine(reason),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
