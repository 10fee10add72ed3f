// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action dispatch and lifecycle orchestration for crawl jobs.

use crate::crawl::{CrawlEngine, EngineFactory};
use crate::error::ControlError;
use crate::registry::{JobHandle, JobRegistry};
use dg_core::{Action, Clock, Job};
use std::sync::Arc;

/// Orchestrates lifecycle actions against registered jobs.
///
/// Every mutating operation claims the job's transition lock with
/// `try_lock` and fails fast with [`ControlError::Busy`] when another
/// caller holds it, so at most one transition is in flight per job.
/// Read-only queries (guards, reports, log windows) never touch the
/// transition lock.
///
/// A failed operation leaves the job's observable state unchanged.
pub struct JobController<C: Clock> {
    registry: Arc<JobRegistry>,
    factory: Arc<dyn EngineFactory>,
    clock: C,
}

impl<C: Clock> JobController<C> {
    pub fn new(registry: Arc<JobRegistry>, factory: Arc<dyn EngineFactory>, clock: C) -> Self {
        Self { registry, factory, clock }
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    /// Dispatch one lifecycle action against the named job.
    pub async fn apply(&self, name: &str, action: Action) -> Result<(), ControlError> {
        match action {
            Action::Build => self.build(name).await,
            Action::Launch => self.launch(name).await,
            Action::Pause => self.pause(name).await,
            Action::Unpause => self.unpause(name).await,
            Action::Terminate => self.terminate(name).await,
            Action::Checkpoint => self.checkpoint(name).await,
            Action::Discard => self.discard(name).await,
        }
    }

    /// Instantiate and validate the engine container from configuration.
    ///
    /// On success the discovered configuration paths are recorded and the
    /// job becomes ready; on failure the job is observably unchanged and
    /// the partially built container is dropped.
    pub async fn build(&self, name: &str) -> Result<(), ControlError> {
        let handle = self.require(name)?;
        let _transition = handle.try_transition()?;
        let snapshot = handle.job();
        check_guard(&snapshot, Action::Build)?;

        let engine =
            self.factory.instantiate(&snapshot).await.map_err(ControlError::from_engine)?;
        engine.validate_configuration().await.map_err(ControlError::from_engine)?;

        let imported_configs = engine.imported_configs();
        let config_paths = engine.config_paths();
        handle.install_engine(engine, imported_configs, config_paths);
        tracing::info!(job = name, "configuration built and validated");
        Ok(())
    }

    /// Launch the built crawl, stamping the launch count and time.
    pub async fn launch(&self, name: &str) -> Result<(), ControlError> {
        let handle = self.require(name)?;
        let _transition = handle.try_transition()?;
        let snapshot = handle.job();
        check_guard(&snapshot, Action::Launch)?;

        let engine = self.require_engine(&handle)?;
        engine.launch().await.map_err(ControlError::from_engine)?;

        let launch_count = handle.mark_launched(self.clock.epoch_ms());
        tracing::info!(job = name, launch_count, "launched crawl");
        Ok(())
    }

    /// Ask the engine to pause, then record whatever state it reports.
    pub async fn pause(&self, name: &str) -> Result<(), ControlError> {
        let handle = self.require(name)?;
        let _transition = handle.try_transition()?;
        check_guard(&handle.job(), Action::Pause)?;

        let engine = self.require_engine(&handle)?;
        engine.request_pause().await;
        handle.sync_from_engine();
        tracing::info!(job = name, "pause requested");
        Ok(())
    }

    /// Ask the engine to resume a paused crawl.
    pub async fn unpause(&self, name: &str) -> Result<(), ControlError> {
        let handle = self.require(name)?;
        let _transition = handle.try_transition()?;
        check_guard(&handle.job(), Action::Unpause)?;

        let engine = self.require_engine(&handle)?;
        engine.request_resume().await;
        handle.sync_from_engine();
        tracing::info!(job = name, "resume requested");
        Ok(())
    }

    /// Ask the engine to shut the crawl down.
    ///
    /// The state moves to finished only when the engine reports it;
    /// callers observe completion via [`Self::refresh`].
    pub async fn terminate(&self, name: &str) -> Result<(), ControlError> {
        let handle = self.require(name)?;
        let _transition = handle.try_transition()?;
        check_guard(&handle.job(), Action::Terminate)?;

        let engine = self.require_engine(&handle)?;
        engine.request_terminate().await;
        handle.sync_from_engine();
        tracing::info!(job = name, "termination requested");
        Ok(())
    }

    /// Checkpoint is a recognized transition with no implementation yet:
    /// it passes the guard only while running, then reports as such.
    pub async fn checkpoint(&self, name: &str) -> Result<(), ControlError> {
        let handle = self.require(name)?;
        let _transition = handle.try_transition()?;
        check_guard(&handle.job(), Action::Checkpoint)?;
        Err(ControlError::Unimplemented(Action::Checkpoint))
    }

    /// Release the engine container and reset the job to unbuilt.
    ///
    /// Launch-derived state is cleared; the job directory and its
    /// configuration survive. Refused while the crawl is live.
    pub async fn discard(&self, name: &str) -> Result<(), ControlError> {
        let handle = self.require(name)?;
        let _transition = handle.try_transition()?;
        handle.discard()?;
        tracing::info!(job = name, "job discarded to unbuilt");
        Ok(())
    }

    /// Snapshot engine-reported state into the job and return the result.
    ///
    /// This is how asynchronously honored requests and natural completion
    /// become observable.
    pub fn refresh(&self, name: &str) -> Result<Job, ControlError> {
        let handle = self.require(name)?;
        handle.sync_from_engine();
        Ok(handle.job())
    }

    /// Copy the job's configuration to a new job named `dest`.
    ///
    /// The source is not mutated, but the copy still claims its
    /// transition slot so a concurrent build cannot interleave.
    pub fn copy(&self, source: &str, dest: &str, as_profile: bool) -> Result<(), ControlError> {
        let handle = self.require(source)?;
        let _transition = handle.try_transition()?;
        self.registry.copy(source, dest, as_profile)?;
        Ok(())
    }

    pub(crate) fn require(&self, name: &str) -> Result<Arc<JobHandle>, ControlError> {
        self.registry.lookup(name).ok_or_else(|| ControlError::NotFound(name.to_string()))
    }

    fn require_engine(&self, handle: &JobHandle) -> Result<Arc<dyn CrawlEngine>, ControlError> {
        handle.engine().ok_or(ControlError::Internal("built job has no engine container"))
    }
}

fn check_guard(job: &Job, action: Action) -> Result<(), ControlError> {
    if job.permits(action) {
        Ok(())
    } else {
        Err(ControlError::Guard { action, state: job.state })
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
