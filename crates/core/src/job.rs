// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job entity and guard predicates.

use crate::lifecycle::{Action, JobState};
use crate::name::JobName;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the primary crawl configuration inside a job directory.
pub const PRIMARY_CONFIG: &str = "crawl.cxml";

/// A managed crawl job.
///
/// Carries the operator-visible lifecycle state plus everything needed to
/// resolve files under the job directory. Runtime plumbing (the engine
/// container, the transition lock) lives in the registry's job handle,
/// not here, so the entity stays a plain cloneable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub name: JobName,
    /// Profiles are templates: copyable, never launchable.
    pub is_profile: bool,
    /// Root directory owning the job's configuration and logs.
    pub dir: PathBuf,
    pub state: JobState,
    /// True once build + validation succeeded. Survives launch and
    /// finish, cleared by discard.
    pub validated: bool,
    pub launch_count: u32,
    /// Epoch ms of the last successful launch.
    pub last_launch_ms: Option<u64>,
    /// Alerts reported by the engine for the current container.
    pub alert_count: u32,
    /// Configurations imported by the primary config, discovered at build.
    pub imported_configs: Vec<PathBuf>,
    /// Named configuration-referenced paths, discovered at build.
    pub config_paths: IndexMap<String, PathBuf>,
}

impl Job {
    /// Create an unbuilt job rooted at `dir`.
    pub fn new(name: JobName, dir: PathBuf, is_profile: bool) -> Self {
        Self {
            name,
            is_profile,
            dir,
            state: JobState::Unbuilt,
            validated: false,
            launch_count: 0,
            last_launch_ms: None,
            alert_count: 0,
            imported_configs: Vec::new(),
            config_paths: IndexMap::new(),
        }
    }

    /// Absolute path of the primary configuration file.
    pub fn primary_config(&self) -> PathBuf {
        self.dir.join(PRIMARY_CONFIG)
    }

    /// Path of the job's own activity log.
    pub fn job_log(&self) -> PathBuf {
        self.dir.join("job.log")
    }

    /// Ready, and not a profile. Guards launch.
    pub fn is_launchable(&self) -> bool {
        self.state == JobState::Ready && !self.is_profile
    }

    pub fn is_pausable(&self) -> bool {
        self.state == JobState::Running
    }

    pub fn is_unpausable(&self) -> bool {
        self.state == JobState::Paused
    }

    /// Running or paused: a live engine container holds resources.
    pub fn is_running(&self) -> bool {
        self.state.is_active()
    }

    /// An engine container exists (anything past unbuilt).
    pub fn is_container_ok(&self) -> bool {
        self.state != JobState::Unbuilt
    }

    /// Build + validation succeeded, independent of running state.
    pub fn is_container_validated(&self) -> bool {
        self.validated
    }

    /// Whether `action` is currently legal for this job.
    ///
    /// The state transition table plus job-level flags: profiles never
    /// pass the launch guard.
    pub fn permits(&self, action: Action) -> bool {
        match action {
            Action::Launch => self.is_launchable(),
            _ => self.state.permits(action),
        }
    }

    /// Record a successful build: store discovered paths, mark validated,
    /// move to ready.
    pub fn mark_built(
        &mut self,
        imported_configs: Vec<PathBuf>,
        config_paths: IndexMap<String, PathBuf>,
    ) {
        self.imported_configs = imported_configs;
        self.config_paths = config_paths;
        self.validated = true;
        self.state = JobState::Ready;
    }

    /// Record a successful launch at `epoch_ms`.
    pub fn mark_launched(&mut self, epoch_ms: u64) {
        self.launch_count += 1;
        self.last_launch_ms = Some(epoch_ms);
        self.state = JobState::Running;
    }

    /// Reset to unbuilt, clearing launch-derived state and build products.
    ///
    /// The job directory and its configuration files are untouched.
    pub fn reset(&mut self) {
        self.state = JobState::Unbuilt;
        self.validated = false;
        self.launch_count = 0;
        self.last_launch_ms = None;
        self.alert_count = 0;
        self.imported_configs.clear();
        self.config_paths.clear();
    }
}

crate::builder! {
    pub struct JobBuilder => Job {
        into {
            name: JobName = "test-job",
            dir: PathBuf = "/tmp/test-job",
        }
        set {
            is_profile: bool = false,
            state: JobState = JobState::Unbuilt,
            validated: bool = false,
            launch_count: u32 = 0,
            alert_count: u32 = 0,
            imported_configs: Vec<PathBuf> = Vec::new(),
            config_paths: IndexMap<String, PathBuf> = IndexMap::new(),
        }
        option {
            last_launch_ms: u64 = None,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
