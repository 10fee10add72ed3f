// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution-engine adapter interface.
//!
//! The controller never reaches into engine internals: everything it can
//! observe or request goes through [`CrawlEngine`], and containers are
//! created only through [`EngineFactory`]. Metrics come back as opaque
//! report strings to surface, not to compute.

use async_trait::async_trait;
use dg_core::{EngineState, ExitStatus, Job};
use indexmap::IndexMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors from engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration parsing or validation failed.
    #[error("configuration invalid: {0}")]
    ConfigInvalid(String),

    /// Container instantiation or a crawl operation failed.
    #[error("engine failure: {0}")]
    Failed(String),
}

/// Summary metrics reported by a live engine.
///
/// Opaque strings: surfaced verbatim for the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineReports {
    pub uri_totals: String,
    pub size_totals: String,
    pub rate: String,
    pub load: String,
    pub elapsed: String,
    pub threads: String,
    pub frontier: String,
}

/// One instantiated crawl container serving a single job.
///
/// Created by an [`EngineFactory`] at build time and dropped on discard.
/// Pause, resume, and terminate are requests: the engine honors them on
/// its own schedule and the reported [`EngineState`] moves monotonically.
#[async_trait]
pub trait CrawlEngine: Send + Sync {
    /// Validate the parsed configuration.
    async fn validate_configuration(&self) -> Result<(), EngineError>;

    /// Start the crawl.
    async fn launch(&self) -> Result<(), EngineError>;

    /// Ask the engine to pause. Honored asynchronously.
    async fn request_pause(&self);

    /// Ask the engine to resume a paused crawl.
    async fn request_resume(&self);

    /// Ask the engine to shut the crawl down.
    async fn request_terminate(&self);

    fn state(&self) -> EngineState;

    /// Exit status, once the crawl has ended.
    fn exit_status(&self) -> Option<ExitStatus>;

    fn alert_count(&self) -> u32;

    /// Location of the crawl log.
    fn crawl_log_path(&self) -> PathBuf;

    /// Location of the alerts log.
    fn alerts_log_path(&self) -> PathBuf;

    /// Named paths referenced by the built configuration.
    fn config_paths(&self) -> IndexMap<String, PathBuf>;

    /// Configurations imported by the primary configuration.
    fn imported_configs(&self) -> Vec<PathBuf>;

    /// Opaque summary metrics.
    fn reports(&self) -> EngineReports;
}

/// Instantiates engine containers for jobs at build time.
#[async_trait]
pub trait EngineFactory: Send + Sync {
    async fn instantiate(&self, job: &Job) -> Result<Arc<dyn CrawlEngine>, EngineError>;
}

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{CrawlEngine, EngineError, EngineFactory, EngineReports};
    use async_trait::async_trait;
    use dg_core::{EngineState, ExitStatus, Job};
    use indexmap::IndexMap;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Arc;

    /// Recorded engine operation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum EngineCall {
        Validate,
        Launch,
        Pause,
        Resume,
        Terminate,
    }

    struct FakeEngineState {
        state: EngineState,
        exit: Option<ExitStatus>,
        alert_count: u32,
        calls: Vec<EngineCall>,
        /// When false, pause/terminate requests park in `pending` until
        /// `honor_pending` is called.
        honor_requests: bool,
        pending: Option<EngineState>,
        validation_error: Option<String>,
        launch_error: Option<String>,
        config_paths: IndexMap<String, PathBuf>,
        imported_configs: Vec<PathBuf>,
        reports: EngineReports,
        log_dir: PathBuf,
    }

    /// Scripted engine for testing.
    ///
    /// Requests are honored immediately by default; `defer_requests`
    /// makes them park in a pending state so tests can exercise the
    /// asynchronous-honoring path.
    #[derive(Clone)]
    pub struct FakeCrawlEngine {
        inner: Arc<Mutex<FakeEngineState>>,
    }

    impl FakeCrawlEngine {
        pub fn new(log_dir: impl Into<PathBuf>) -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeEngineState {
                    state: EngineState::Preparing,
                    exit: None,
                    alert_count: 0,
                    calls: Vec::new(),
                    honor_requests: true,
                    pending: None,
                    validation_error: None,
                    launch_error: None,
                    config_paths: IndexMap::new(),
                    imported_configs: Vec::new(),
                    reports: EngineReports::default(),
                    log_dir: log_dir.into(),
                })),
            }
        }

        /// Make `validate_configuration` fail with the given reason.
        pub fn reject_validation(&self, reason: &str) {
            self.inner.lock().validation_error = Some(reason.to_string());
        }

        /// Make `launch` fail with the given reason.
        pub fn reject_launch(&self, reason: &str) {
            self.inner.lock().launch_error = Some(reason.to_string());
        }

        /// Park pause/terminate requests instead of honoring them.
        pub fn defer_requests(&self) {
            self.inner.lock().honor_requests = false;
        }

        /// Apply the parked request, if any.
        pub fn honor_pending(&self) {
            let mut state = self.inner.lock();
            if let Some(next) = state.pending.take() {
                state.state = next;
                if next == EngineState::Finished && state.exit.is_none() {
                    state.exit = Some(ExitStatus::Aborted);
                }
            }
        }

        /// Report natural completion with the given exit status.
        pub fn finish(&self, exit: ExitStatus) {
            let mut state = self.inner.lock();
            state.state = EngineState::Finished;
            state.exit = Some(exit);
        }

        pub fn set_alert_count(&self, count: u32) {
            self.inner.lock().alert_count = count;
        }

        pub fn set_config_paths(&self, paths: IndexMap<String, PathBuf>) {
            self.inner.lock().config_paths = paths;
        }

        pub fn set_imported_configs(&self, configs: Vec<PathBuf>) {
            self.inner.lock().imported_configs = configs;
        }

        pub fn set_reports(&self, reports: EngineReports) {
            self.inner.lock().reports = reports;
        }

        /// All operations invoked so far, in order.
        pub fn calls(&self) -> Vec<EngineCall> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl CrawlEngine for FakeCrawlEngine {
        async fn validate_configuration(&self) -> Result<(), EngineError> {
            let mut state = self.inner.lock();
            state.calls.push(EngineCall::Validate);
            match &state.validation_error {
                Some(reason) => Err(EngineError::ConfigInvalid(reason.clone())),
                None => Ok(()),
            }
        }

        async fn launch(&self) -> Result<(), EngineError> {
            let mut state = self.inner.lock();
            state.calls.push(EngineCall::Launch);
            if let Some(reason) = &state.launch_error {
                return Err(EngineError::Failed(reason.clone()));
            }
            state.state = EngineState::Running;
            Ok(())
        }

        async fn request_pause(&self) {
            let mut state = self.inner.lock();
            state.calls.push(EngineCall::Pause);
            if state.state == EngineState::Running {
                if state.honor_requests {
                    state.state = EngineState::Paused;
                } else {
                    state.state = EngineState::Pausing;
                    state.pending = Some(EngineState::Paused);
                }
            }
        }

        async fn request_resume(&self) {
            let mut state = self.inner.lock();
            state.calls.push(EngineCall::Resume);
            if state.state == EngineState::Paused {
                state.state = EngineState::Running;
            }
        }

        async fn request_terminate(&self) {
            let mut state = self.inner.lock();
            state.calls.push(EngineCall::Terminate);
            if matches!(
                state.state,
                EngineState::Running | EngineState::Pausing | EngineState::Paused
            ) {
                if state.honor_requests {
                    state.state = EngineState::Finished;
                    if state.exit.is_none() {
                        state.exit = Some(ExitStatus::Aborted);
                    }
                } else {
                    state.state = EngineState::Stopping;
                    state.pending = Some(EngineState::Finished);
                }
            }
        }

        fn state(&self) -> EngineState {
            self.inner.lock().state
        }

        fn exit_status(&self) -> Option<ExitStatus> {
            self.inner.lock().exit.clone()
        }

        fn alert_count(&self) -> u32 {
            self.inner.lock().alert_count
        }

        fn crawl_log_path(&self) -> PathBuf {
            self.inner.lock().log_dir.join("crawl.log")
        }

        fn alerts_log_path(&self) -> PathBuf {
            self.inner.lock().log_dir.join("alerts.log")
        }

        fn config_paths(&self) -> IndexMap<String, PathBuf> {
            self.inner.lock().config_paths.clone()
        }

        fn imported_configs(&self) -> Vec<PathBuf> {
            self.inner.lock().imported_configs.clone()
        }

        fn reports(&self) -> EngineReports {
            self.inner.lock().reports.clone()
        }
    }

    #[derive(Default)]
    struct FactoryState {
        scripted: HashMap<String, FakeCrawlEngine>,
        created: HashMap<String, FakeCrawlEngine>,
        instantiate_error: Option<String>,
    }

    /// Factory handing out fake engines, one per job name.
    ///
    /// Unscripted jobs get a fresh default engine logging under
    /// `<job_dir>/logs`; `engine_for` retrieves whichever instance a
    /// build produced.
    #[derive(Clone, Default)]
    pub struct FakeEngineFactory {
        inner: Arc<Mutex<FactoryState>>,
    }

    impl FakeEngineFactory {
        pub fn new() -> Self {
            Self::default()
        }

        /// Use `engine` for the next build of `name`.
        pub fn script(&self, name: &str, engine: FakeCrawlEngine) {
            self.inner.lock().scripted.insert(name.to_string(), engine);
        }

        /// Make instantiation itself fail.
        pub fn reject_instantiate(&self, reason: &str) {
            self.inner.lock().instantiate_error = Some(reason.to_string());
        }

        /// The engine created for `name`, if a build reached instantiation.
        pub fn engine_for(&self, name: &str) -> Option<FakeCrawlEngine> {
            self.inner.lock().created.get(name).cloned()
        }
    }

    #[async_trait]
    impl EngineFactory for FakeEngineFactory {
        async fn instantiate(&self, job: &Job) -> Result<Arc<dyn CrawlEngine>, EngineError> {
            let mut factory = self.inner.lock();
            if let Some(reason) = &factory.instantiate_error {
                return Err(EngineError::Failed(reason.clone()));
            }
            let engine = factory
                .scripted
                .get(job.name.as_str())
                .cloned()
                .unwrap_or_else(|| FakeCrawlEngine::new(job.dir.join("logs")));
            factory.created.insert(job.name.to_string(), engine.clone());
            Ok(Arc::new(engine))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{EngineCall, FakeCrawlEngine, FakeEngineFactory};
