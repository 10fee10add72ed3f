// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log-window queries and path-containment glue.

use crate::error::ControlError;
use crate::JobController;
use dg_core::Clock;
use dg_files::{LogWindow, Position, Resolution};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

/// Which of a job's logs to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// The job's own activity log, present from registration.
    Job,
    /// The engine's crawl log, available once a container exists.
    Crawl,
    /// The engine's alerts log.
    Alerts,
}

dg_core::simple_display! {
    LogKind {
        Job => "job",
        Crawl => "crawl",
        Alerts => "alerts",
    }
}

impl<C: Clock> JobController<C> {
    /// Path of the requested log.
    ///
    /// Engine logs only exist once a container does; asking earlier is
    /// [`ControlError::NotFound`].
    pub fn log_path(&self, name: &str, kind: LogKind) -> Result<PathBuf, ControlError> {
        let handle = self.require(name)?;
        match kind {
            LogKind::Job => Ok(handle.job().job_log()),
            LogKind::Crawl => handle
                .engine()
                .map(|e| e.crawl_log_path())
                .ok_or_else(|| ControlError::NotFound(format!("{}: no crawl log yet", name))),
            LogKind::Alerts => handle
                .engine()
                .map(|e| e.alerts_log_path())
                .ok_or_else(|| ControlError::NotFound(format!("{}: no alerts log yet", name))),
        }
    }

    /// Bounded line window over one of the job's logs.
    ///
    /// Safe to call concurrently with transitions and other readers; the
    /// read touches only the file.
    pub fn log_window(
        &self,
        name: &str,
        kind: LogKind,
        pos: Position,
        count: i64,
    ) -> Result<LogWindow, ControlError> {
        let path = self.log_path(name, kind)?;
        Ok(dg_files::paged_lines(&path, pos, count)?)
    }

    /// [`Self::log_window`] with a caller-supplied cancellation token.
    pub fn log_window_cancellable(
        &self,
        name: &str,
        kind: LogKind,
        pos: Position,
        count: i64,
        cancel: &CancellationToken,
    ) -> Result<LogWindow, ControlError> {
        let path = self.log_path(name, kind)?;
        Ok(dg_files::paged_lines_cancellable(&path, pos, count, cancel)?)
    }

    /// Resolve a candidate path against the job's directory, deciding
    /// whether a view link may be offered.
    pub fn resolve_path(&self, name: &str, candidate: &Path) -> Result<Resolution, ControlError> {
        let handle = self.require(name)?;
        Ok(dg_files::resolve(candidate, &handle.job().dir))
    }
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;
