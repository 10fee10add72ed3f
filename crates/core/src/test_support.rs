// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for the lifecycle state machine types.
pub mod strategies {
    use crate::lifecycle::{Action, JobState};
    use crate::status::{EngineState, ExitStatus};
    use proptest::prelude::*;

    pub fn arb_job_state() -> impl Strategy<Value = JobState> {
        prop_oneof![
            Just(JobState::Unbuilt),
            Just(JobState::Ready),
            Just(JobState::Running),
            Just(JobState::Paused),
            Just(JobState::Finished),
        ]
    }

    pub fn arb_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::Build),
            Just(Action::Launch),
            Just(Action::Pause),
            Just(Action::Unpause),
            Just(Action::Terminate),
            Just(Action::Checkpoint),
            Just(Action::Discard),
        ]
    }

    pub fn arb_engine_state() -> impl Strategy<Value = EngineState> {
        prop_oneof![
            Just(EngineState::Preparing),
            Just(EngineState::Running),
            Just(EngineState::Pausing),
            Just(EngineState::Paused),
            Just(EngineState::Stopping),
            Just(EngineState::Finished),
        ]
    }

    pub fn arb_exit_status() -> impl Strategy<Value = ExitStatus> {
        prop_oneof![
            Just(ExitStatus::Finished),
            Just(ExitStatus::Aborted),
            ".*".prop_map(ExitStatus::Failed),
        ]
    }
}
