// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::path::Path;

fn ready_job() -> Job {
    Job::builder().state(JobState::Ready).validated(true).build()
}

#[test]
fn new_job_starts_unbuilt() {
    let job = Job::new(JobName::new("alpha").unwrap(), "/jobs/alpha".into(), false);

    assert_eq!(job.state, JobState::Unbuilt);
    assert!(!job.validated);
    assert_eq!(job.launch_count, 0);
    assert!(job.last_launch_ms.is_none());
    assert!(job.imported_configs.is_empty());
    assert!(job.config_paths.is_empty());
}

#[test]
fn paths_are_rooted_in_job_dir() {
    let job = Job::new(JobName::new("alpha").unwrap(), "/jobs/alpha".into(), false);

    assert_eq!(job.primary_config(), Path::new("/jobs/alpha").join(PRIMARY_CONFIG));
    assert_eq!(job.job_log(), Path::new("/jobs/alpha/job.log"));
}

#[yare::parameterized(
    unbuilt  = { JobState::Unbuilt,  false },
    ready    = { JobState::Ready,    true },
    running  = { JobState::Running,  false },
    paused   = { JobState::Paused,   false },
    finished = { JobState::Finished, false },
)]
fn launchable_iff_ready(state: JobState, expected: bool) {
    let job = Job::builder().state(state).build();
    assert_eq!(job.is_launchable(), expected);
}

#[test]
fn profiles_are_never_launchable() {
    let job = Job::builder().state(JobState::Ready).is_profile(true).build();

    assert!(!job.is_launchable());
    assert!(!job.permits(Action::Launch));
    // the state table alone would allow it
    assert!(job.state.permits(Action::Launch));
}

#[yare::parameterized(
    unbuilt  = { JobState::Unbuilt,  false, false },
    ready    = { JobState::Ready,    false, false },
    running  = { JobState::Running,  true,  false },
    paused   = { JobState::Paused,   false, true },
    finished = { JobState::Finished, false, false },
)]
fn pause_guards(state: JobState, pausable: bool, unpausable: bool) {
    let job = Job::builder().state(state).build();
    assert_eq!(job.is_pausable(), pausable);
    assert_eq!(job.is_unpausable(), unpausable);
}

#[yare::parameterized(
    unbuilt  = { JobState::Unbuilt,  false },
    ready    = { JobState::Ready,    true },
    running  = { JobState::Running,  true },
    paused   = { JobState::Paused,   true },
    finished = { JobState::Finished, true },
)]
fn container_ok_past_unbuilt(state: JobState, expected: bool) {
    let job = Job::builder().state(state).build();
    assert_eq!(job.is_container_ok(), expected);
}

#[test]
fn container_validated_follows_flag_not_state() {
    let job = Job::builder().state(JobState::Finished).validated(true).build();
    assert!(job.is_container_validated());

    let job = Job::builder().state(JobState::Ready).build();
    assert!(!job.is_container_validated());
}

#[test]
fn mark_built_stores_discovered_paths() {
    let mut job = Job::builder().build();
    let mut paths = IndexMap::new();
    paths.insert("seeds".to_string(), PathBuf::from("/jobs/alpha/seeds.txt"));

    job.mark_built(vec![PathBuf::from("/jobs/alpha/extra.cxml")], paths);

    assert_eq!(job.state, JobState::Ready);
    assert!(job.validated);
    assert_eq!(job.imported_configs.len(), 1);
    assert_eq!(job.config_paths.get("seeds"), Some(&PathBuf::from("/jobs/alpha/seeds.txt")));
}

#[test]
fn mark_launched_increments_and_stamps() {
    let mut job = ready_job();

    job.mark_launched(5_000);
    assert_eq!(job.state, JobState::Running);
    assert_eq!(job.launch_count, 1);
    assert_eq!(job.last_launch_ms, Some(5_000));

    // a hypothetical relaunch after finish keeps counting
    job.state = JobState::Ready;
    job.mark_launched(9_000);
    assert_eq!(job.launch_count, 2);
    assert_eq!(job.last_launch_ms, Some(9_000));
}

#[test]
fn reset_clears_launch_state_but_keeps_identity() {
    let mut job = Job::builder()
        .name("alpha")
        .dir("/jobs/alpha")
        .state(JobState::Finished)
        .validated(true)
        .launch_count(3)
        .last_launch_ms(9_000_u64)
        .alert_count(2)
        .build();
    job.config_paths.insert("seeds".to_string(), PathBuf::from("/jobs/alpha/seeds.txt"));

    job.reset();

    assert_eq!(job.state, JobState::Unbuilt);
    assert!(!job.validated);
    assert_eq!(job.launch_count, 0);
    assert!(job.last_launch_ms.is_none());
    assert_eq!(job.alert_count, 0);
    assert!(job.config_paths.is_empty());
    // identity and configuration root survive
    assert_eq!(job.name, "alpha");
    assert_eq!(job.dir, PathBuf::from("/jobs/alpha"));
}

#[test]
fn reset_then_rebuild_matches_fresh_build() {
    let fresh = {
        let mut job = Job::new(JobName::new("alpha").unwrap(), "/jobs/alpha".into(), false);
        job.mark_built(Vec::new(), IndexMap::new());
        job
    };

    let recycled = {
        let mut job = Job::new(JobName::new("alpha").unwrap(), "/jobs/alpha".into(), false);
        job.mark_built(Vec::new(), IndexMap::new());
        job.mark_launched(1_000);
        job.state = JobState::Finished;
        job.reset();
        job.mark_built(Vec::new(), IndexMap::new());
        job
    };

    assert_eq!(fresh, recycled);
}

#[test]
fn permits_delegates_to_state_table() {
    let job = Job::builder().state(JobState::Running).build();
    assert!(job.permits(Action::Pause));
    assert!(job.permits(Action::Terminate));
    assert!(job.permits(Action::Checkpoint));
    assert!(!job.permits(Action::Build));
    assert!(!job.permits(Action::Discard));
}

#[test]
fn job_serde_round_trip() {
    let mut job = ready_job();
    job.config_paths.insert("seeds".to_string(), PathBuf::from("/jobs/alpha/seeds.txt"));
    job.mark_launched(42);

    let json = serde_json::to_string(&job).expect("serialize job");
    let restored: Job = serde_json::from_str(&json).expect("deserialize job");

    assert_eq!(restored, job);
}
