// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use dg_core::JobName;

#[test]
fn guard_names_action_and_state() {
    let err = ControlError::Guard { action: Action::Launch, state: JobState::Unbuilt };
    assert_eq!(err.to_string(), "action 'launch' not permitted in state 'unbuilt'");
}

#[test]
fn busy_names_the_job() {
    let err = ControlError::Busy(JobName::from("alpha"));
    assert_eq!(err.to_string(), "job 'alpha' is busy");
}

#[test]
fn name_conflict_names_the_job() {
    let err = ControlError::NameConflict(JobName::from("alpha-copy"));
    assert_eq!(err.to_string(), "job 'alpha-copy' already exists");
}

#[test]
fn unimplemented_names_the_action() {
    let err = ControlError::Unimplemented(Action::Checkpoint);
    assert_eq!(err.to_string(), "action 'checkpoint' is not implemented");
}

#[test]
fn engine_validation_errors_keep_their_identity() {
    let err = ControlError::from_engine(EngineError::ConfigInvalid("bad seeds list".into()));
    assert!(matches!(err, ControlError::ConfigInvalid(ref r) if r == "bad seeds list"));
}

#[test]
fn other_engine_errors_become_engine_failures() {
    let err = ControlError::from_engine(EngineError::Failed("wiring error".into()));
    assert!(matches!(err, ControlError::Engine(ref r) if r == "wiring error"));
}

#[test]
fn read_errors_pass_through_transparently() {
    let inner = dg_files::ReadError::Cancelled;
    let err = ControlError::from(inner);
    assert_eq!(err.to_string(), "log read cancelled");
}

#[test]
fn name_errors_convert() {
    let err: ControlError = dg_core::NameError::Empty.into();
    assert!(err.to_string().contains("invalid job name"));
}
