// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job registry: named jobs, their shared handles, and the copy operation.
//!
//! The registry is an explicit service passed to the controller, never
//! ambient global state, so the per-job locking discipline stays
//! auditable.

use crate::crawl::CrawlEngine;
use crate::error::ControlError;
use dg_core::{Job, JobName, PRIMARY_CONFIG};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

struct Slot {
    job: Job,
    engine: Option<Arc<dyn CrawlEngine>>,
}

/// Shared per-job state: the entity and its engine container under one
/// lock, plus the transition lock serializing lifecycle actions.
///
/// Read-only queries (guards, reports, log paths) take only the slot's
/// read side and never contend with each other; mutating operations claim
/// the transition lock first with `try_lock` so at most one lifecycle
/// transition is in flight per job.
pub struct JobHandle {
    slot: RwLock<Slot>,
    transition: Mutex<()>,
}

impl std::fmt::Debug for JobHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobHandle").field("job", &self.slot.read().job).finish_non_exhaustive()
    }
}

impl JobHandle {
    fn new(job: Job) -> Self {
        Self { slot: RwLock::new(Slot { job, engine: None }), transition: Mutex::new(()) }
    }

    /// Point-in-time copy of the job entity.
    pub fn job(&self) -> Job {
        self.slot.read().job.clone()
    }

    /// The live engine container, if one is installed.
    pub fn engine(&self) -> Option<Arc<dyn CrawlEngine>> {
        self.slot.read().engine.clone()
    }

    /// Claim the per-job transition slot, failing fast when another
    /// transition is in flight.
    pub(crate) fn try_transition(&self) -> Result<MutexGuard<'_, ()>, ControlError> {
        self.transition.try_lock().map_err(|_| ControlError::Busy(self.slot.read().job.name.clone()))
    }

    /// Install a validated container and record the build products.
    pub(crate) fn install_engine(
        &self,
        engine: Arc<dyn CrawlEngine>,
        imported_configs: Vec<PathBuf>,
        config_paths: IndexMap<String, PathBuf>,
    ) {
        let mut slot = self.slot.write();
        slot.job.mark_built(imported_configs, config_paths);
        slot.engine = Some(engine);
    }

    /// Record a successful launch; returns the new launch count.
    pub(crate) fn mark_launched(&self, epoch_ms: u64) -> u32 {
        let mut slot = self.slot.write();
        slot.job.mark_launched(epoch_ms);
        slot.job.launch_count
    }

    /// Drop the engine container and reset the job to unbuilt.
    ///
    /// Refused while the crawl is live; pause or terminate first.
    pub(crate) fn discard(&self) -> Result<(), ControlError> {
        let mut slot = self.slot.write();
        if slot.job.state.is_active() {
            return Err(ControlError::Busy(slot.job.name.clone()));
        }
        slot.engine = None;
        slot.job.reset();
        Ok(())
    }

    /// Fold the engine-reported state into the job.
    ///
    /// The observed state only moves while the job is live; an engine
    /// still honoring a request reads as its previous state.
    pub(crate) fn sync_from_engine(&self) {
        let mut slot = self.slot.write();
        let Some(engine) = slot.engine.clone() else {
            return;
        };
        slot.job.alert_count = engine.alert_count();
        if slot.job.state.is_active() {
            slot.job.state = engine.state().as_job_state();
        }
    }
}

/// Collection of registered jobs, rooted at a jobs directory.
pub struct JobRegistry {
    jobs_dir: PathBuf,
    jobs: RwLock<HashMap<JobName, Arc<JobHandle>>>,
}

impl JobRegistry {
    /// Open a registry rooted at `jobs_dir`, creating the root if needed.
    pub fn open(jobs_dir: impl Into<PathBuf>) -> Result<Self, ControlError> {
        let jobs_dir = jobs_dir.into();
        fs::create_dir_all(&jobs_dir)?;
        Ok(Self { jobs_dir, jobs: RwLock::new(HashMap::new()) })
    }

    pub fn jobs_dir(&self) -> &Path {
        &self.jobs_dir
    }

    /// Register a job, creating its directory and an empty primary
    /// configuration when none exists yet.
    pub fn register(&self, name: &str, is_profile: bool) -> Result<Arc<JobHandle>, ControlError> {
        let name = JobName::new(name)?;
        let mut jobs = self.jobs.write();
        if jobs.contains_key(name.as_str()) {
            return Err(ControlError::NameConflict(name));
        }
        let dir = self.jobs_dir.join(name.as_str());
        fs::create_dir_all(&dir)?;
        let primary = dir.join(PRIMARY_CONFIG);
        if !primary.exists() {
            fs::write(&primary, "")?;
        }
        let handle = Arc::new(JobHandle::new(Job::new(name.clone(), dir, is_profile)));
        jobs.insert(name.clone(), handle.clone());
        tracing::info!(job = %name, is_profile, "registered job");
        Ok(handle)
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<JobHandle>> {
        self.jobs.read().get(name).cloned()
    }

    /// Registered job names, sorted.
    pub fn names(&self) -> Vec<JobName> {
        let mut names: Vec<JobName> = self.jobs.read().keys().cloned().collect();
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        names
    }

    /// Copy `source`'s configuration into a fresh job directory named
    /// `dest`.
    ///
    /// The source is not mutated and the copy shares no structure with
    /// it; runtime residue (`logs/`, `*.log`) is not carried over. The
    /// new job starts unbuilt.
    pub fn copy(
        &self,
        source: &str,
        dest: &str,
        as_profile: bool,
    ) -> Result<Arc<JobHandle>, ControlError> {
        let source_handle =
            self.lookup(source).ok_or_else(|| ControlError::NotFound(source.to_string()))?;
        let dest_name = JobName::new(dest)?;
        let mut jobs = self.jobs.write();
        if jobs.contains_key(dest_name.as_str()) {
            return Err(ControlError::NameConflict(dest_name));
        }
        let dest_dir = self.jobs_dir.join(dest_name.as_str());
        if dest_dir.exists() {
            return Err(ControlError::NameConflict(dest_name));
        }

        let source_job = source_handle.job();
        copy_configuration(&source_job.dir, &dest_dir)?;

        let handle = Arc::new(JobHandle::new(Job::new(dest_name.clone(), dest_dir, as_profile)));
        jobs.insert(dest_name.clone(), handle.clone());
        tracing::info!(source = %source_job.name, dest = %dest_name, as_profile, "copied job configuration");
        Ok(handle)
    }
}

/// Recursively copy a job directory, skipping runtime residue.
fn copy_configuration(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let name = entry.file_name();
        let to = dst.join(&name);
        if file_type.is_dir() {
            if name == "logs" {
                continue;
            }
            copy_configuration(&entry.path(), &to)?;
        } else if file_type.is_file() {
            if name.to_string_lossy().ends_with(".log") {
                continue;
            }
            fs::copy(entry.path(), &to)?;
        }
        // symlinks are not configuration; skipped
    }
    Ok(())
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
