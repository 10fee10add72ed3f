// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Point-in-time job reports for the presentation layer.

use crate::crawl::EngineReports;
use crate::error::ControlError;
use crate::JobController;
use dg_core::{Clock, EngineState, ExitStatus, Job};

/// Snapshot of a job and its engine, assembled for rendering.
///
/// Engine fields are `None` until a container is instantiated. Report
/// strings are surfaced exactly as the engine produced them.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub job: Job,
    pub engine_state: Option<EngineState>,
    pub exit_status: Option<ExitStatus>,
    pub reports: Option<EngineReports>,
}

impl<C: Clock> JobController<C> {
    /// Assemble a report for the named job.
    ///
    /// Read-only: does not fold engine state back into the job (that is
    /// [`Self::refresh`]) and never touches the transition lock.
    pub fn report(&self, name: &str) -> Result<CrawlReport, ControlError> {
        let handle = self.require(name)?;
        let job = handle.job();
        let engine = handle.engine();
        Ok(CrawlReport {
            job,
            engine_state: engine.as_ref().map(|e| e.state()),
            exit_status: engine.as_ref().and_then(|e| e.exit_status()),
            reports: engine.as_ref().map(|e| e.reports()),
        })
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
