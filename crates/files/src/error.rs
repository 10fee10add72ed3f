// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for log-file reads.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a window from a log file.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The log file does not exist. Distinct from an empty window so that
    /// callers can tell "no log yet" apart from "nothing in range".
    #[error("no such log file: {}", .0.display())]
    NotFound(PathBuf),

    /// Underlying I/O failure, surfaced with its cause.
    #[error("log read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The caller's cancellation token fired mid-read.
    #[error("log read cancelled")]
    Cancelled,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
