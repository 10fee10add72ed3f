// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job lifecycle states, operator actions, and the legal-transition table.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a job.
///
/// `Unbuilt → Ready → Running ⇄ Paused → Finished`, with `Unbuilt`
/// reachable again from any non-active state via discard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Registered but with no validated engine container.
    #[default]
    Unbuilt,
    /// Built and validated, waiting to launch.
    Ready,
    Running,
    Paused,
    /// The crawl ended (terminated or completed). Exited only by discard.
    Finished,
}

impl JobState {
    /// True while the engine container is live (running or paused).
    pub fn is_active(&self) -> bool {
        matches!(self, JobState::Running | JobState::Paused)
    }

    /// Whether `action` is legal in this state.
    ///
    /// Pure transition table. Job-level flags (profiles never launch) are
    /// layered on by [`crate::Job::permits`].
    pub fn permits(&self, action: Action) -> bool {
        match action {
            Action::Build => matches!(self, JobState::Unbuilt),
            Action::Launch => matches!(self, JobState::Ready),
            Action::Pause => matches!(self, JobState::Running),
            Action::Unpause => matches!(self, JobState::Paused),
            Action::Terminate => self.is_active(),
            Action::Checkpoint => matches!(self, JobState::Running),
            Action::Discard => !self.is_active(),
        }
    }
}

crate::simple_display! {
    JobState {
        Unbuilt => "unbuilt",
        Ready => "ready",
        Running => "running",
        Paused => "paused",
        Finished => "finished",
    }
}

/// Operator actions that drive the job lifecycle.
///
/// A closed set: unrecognized action names are rejected by [`Action::parse`]
/// instead of falling through a string dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Instantiate and validate the engine container from configuration.
    Build,
    Launch,
    Pause,
    Unpause,
    Terminate,
    /// Recognized transition with no implementation yet.
    Checkpoint,
    /// Reset to unbuilt, releasing the engine container.
    Discard,
}

impl Action {
    /// Parse an operator-facing action name.
    ///
    /// `build`/`validate` are one operation, as are `unpause`/`resume`
    /// and `discard`/`reset`. Unknown names return `None`.
    pub fn parse(name: &str) -> Option<Action> {
        match name {
            "build" | "validate" => Some(Action::Build),
            "launch" => Some(Action::Launch),
            "pause" => Some(Action::Pause),
            "unpause" | "resume" => Some(Action::Unpause),
            "terminate" => Some(Action::Terminate),
            "checkpoint" => Some(Action::Checkpoint),
            "discard" | "reset" => Some(Action::Discard),
            _ => None,
        }
    }
}

crate::simple_display! {
    Action {
        Build => "build",
        Launch => "launch",
        Pause => "pause",
        Unpause => "unpause",
        Terminate => "terminate",
        Checkpoint => "checkpoint",
        Discard => "discard",
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
