// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dg-engine: Job controller, registry, and the crawl-engine interface

pub mod controller;
pub mod crawl;
pub mod error;
pub mod logs;
pub mod registry;
pub mod report;

pub use controller::JobController;
#[cfg(any(test, feature = "test-support"))]
pub use crawl::{EngineCall, FakeCrawlEngine, FakeEngineFactory};
pub use crawl::{CrawlEngine, EngineError, EngineFactory, EngineReports};
pub use error::ControlError;
pub use logs::LogKind;
pub use registry::{JobHandle, JobRegistry};
pub use report::CrawlReport;
