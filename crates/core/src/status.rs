// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine-reported runtime status vocabulary.
//!
//! The execution engine owns these values; the control core only surfaces
//! them and derives the observable [`JobState`] from them.

use crate::lifecycle::JobState;
use serde::{Deserialize, Serialize};

/// State reported by the execution engine for a launched crawl.
///
/// Pause and terminate are requests: the engine moves through `Pausing`
/// and `Stopping` on its own schedule, monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Preparing,
    Running,
    Pausing,
    Paused,
    Stopping,
    Finished,
}

impl EngineState {
    /// Observable job state implied by this engine state.
    ///
    /// A request that has not been honored yet does not move the job:
    /// `Pausing` still reads as running, `Stopping` is not yet finished.
    pub fn as_job_state(&self) -> JobState {
        match self {
            EngineState::Preparing
            | EngineState::Running
            | EngineState::Pausing
            | EngineState::Stopping => JobState::Running,
            EngineState::Paused => JobState::Paused,
            EngineState::Finished => JobState::Finished,
        }
    }
}

crate::simple_display! {
    EngineState {
        Preparing => "preparing",
        Running => "running",
        Pausing => "pausing",
        Paused => "paused",
        Stopping => "stopping",
        Finished => "finished",
    }
}

/// Exit status reported by the engine once a crawl ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitStatus {
    /// The crawl ran to natural completion.
    Finished,
    /// The crawl was terminated by request.
    Aborted,
    /// The engine gave up, with its reason.
    Failed(String),
}

crate::simple_display! {
    ExitStatus {
        Finished => "finished",
        Aborted => "aborted",
        Failed(..) => "failed",
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
