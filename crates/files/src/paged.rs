// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded line windows over append-only log files.
//!
//! Log files grow without bound, so every read here is a window: an anchor
//! position plus a signed line count. Backward windows are served by a
//! block-wise tail scan; the file is never materialized whole.

use crate::error::ReadError;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Block size for the backward tail scan.
const SCAN_BLOCK: usize = 8 * 1024;

/// Where a read window is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// End of file (the operator-facing `pos=-1`).
    End,
    /// 1-based line number from the start of the file. Values past the
    /// last line clamp to end of file; `0` reads as line 1.
    Line(u64),
    /// Byte offset from the start of the file (alternative addressing
    /// mode). A mid-line offset makes the partial line count as a line.
    Byte(u64),
}

/// A bounded window of lines read from a log file.
///
/// Lines are always in ascending file order, whichever direction the read
/// ran; callers wanting most-recent-first reverse the `Vec` themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogWindow {
    pub lines: Vec<String>,
    /// True when a file boundary clipped the window: fewer lines were
    /// available than requested.
    pub truncated: bool,
}

/// Read a window of `|count|` lines anchored at `pos`.
///
/// A negative `count` reads backward, returning the `|count|` lines that
/// precede the anchor; a positive `count` reads forward from it. A file
/// shorter than the requested window yields whatever is available with
/// `truncated` set; an empty file yields an empty window; a missing file
/// is [`ReadError::NotFound`].
pub fn paged_lines(path: &Path, pos: Position, count: i64) -> Result<LogWindow, ReadError> {
    paged_lines_cancellable(path, pos, count, &CancellationToken::new())
}

/// [`paged_lines`] with a caller-supplied cancellation token, checked
/// between scan blocks so reads against very large or corrupted files can
/// be bounded.
pub fn paged_lines_cancellable(
    path: &Path,
    pos: Position,
    count: i64,
    cancel: &CancellationToken,
) -> Result<LogWindow, ReadError> {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ReadError::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(ReadError::Io(e)),
    };

    if count == 0 {
        return Ok(LogWindow::default());
    }

    let len = file.metadata()?.len();
    let anchor = match pos {
        Position::End => len,
        Position::Byte(offset) => offset.min(len),
        Position::Line(line) => line_start_offset(&mut file, line, cancel)?,
    };

    if count < 0 {
        read_backward(&mut file, anchor, count.unsigned_abs(), cancel)
    } else {
        read_forward(file, anchor, count as u64, cancel)
    }
}

/// Byte offset of the start of the 1-based `line`, clamped to end of file.
fn line_start_offset(
    file: &mut File,
    line: u64,
    cancel: &CancellationToken,
) -> Result<u64, ReadError> {
    let target = line.max(1);
    file.seek(SeekFrom::Start(0))?;
    let mut reader = BufReader::with_capacity(SCAN_BLOCK, file);
    let mut offset = 0u64;
    let mut current = 1u64;
    let mut buf = Vec::new();
    while current < target {
        if cancel.is_cancelled() {
            return Err(ReadError::Cancelled);
        }
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }
        offset += read as u64;
        current += 1;
    }
    Ok(offset)
}

/// Collect the `want` lines preceding `anchor` by scanning fixed-size
/// blocks backward and counting newline boundaries.
fn read_backward(
    file: &mut File,
    anchor: u64,
    want: u64,
    cancel: &CancellationToken,
) -> Result<LogWindow, ReadError> {
    if anchor == 0 {
        return Ok(LogWindow { lines: Vec::new(), truncated: true });
    }

    // The newline at anchor-1 (if any) terminates the window's last line;
    // it is not a boundary in front of one, so counting starts before it.
    let mut start = 0u64;
    let mut remaining = want;
    let mut truncated = true;
    let mut scan_end = anchor - 1;
    let mut block = vec![0u8; SCAN_BLOCK];

    'scan: while scan_end > 0 {
        if cancel.is_cancelled() {
            return Err(ReadError::Cancelled);
        }
        let block_start = scan_end.saturating_sub(SCAN_BLOCK as u64);
        let block_len = (scan_end - block_start) as usize;
        file.seek(SeekFrom::Start(block_start))?;
        file.read_exact(&mut block[..block_len])?;

        for i in (0..block_len).rev() {
            if block[i] == b'\n' {
                remaining -= 1;
                if remaining == 0 {
                    start = block_start + i as u64 + 1;
                    truncated = false;
                    break 'scan;
                }
            }
        }
        scan_end = block_start;
    }

    // Start of file supplies the one line-start no newline marks.
    if truncated && remaining == 1 {
        truncated = false;
    }

    let mut region = vec![0u8; (anchor - start) as usize];
    file.seek(SeekFrom::Start(start))?;
    file.read_exact(&mut region)?;

    Ok(LogWindow { lines: split_region(&region), truncated })
}

/// Collect up to `want` lines starting at `anchor`.
fn read_forward(
    file: File,
    anchor: u64,
    want: u64,
    cancel: &CancellationToken,
) -> Result<LogWindow, ReadError> {
    let mut reader = BufReader::with_capacity(SCAN_BLOCK, file);
    reader.seek(SeekFrom::Start(anchor))?;

    let mut lines = Vec::new();
    let mut buf = Vec::new();
    while (lines.len() as u64) < want {
        if cancel.is_cancelled() {
            return Err(ReadError::Cancelled);
        }
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }
        let line = buf.strip_suffix(b"\n").unwrap_or(buf.as_slice());
        lines.push(clean_line(line));
    }

    let truncated = (lines.len() as u64) < want;
    Ok(LogWindow { lines, truncated })
}

/// Split a byte region into lines, dropping the trailing empty piece a
/// final newline produces.
fn split_region(bytes: &[u8]) -> Vec<String> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<String> = bytes.split(|b| *b == b'\n').map(clean_line).collect();
    if bytes.last() == Some(&b'\n') {
        lines.pop();
    }
    lines
}

/// Strip a trailing carriage return and decode, replacing invalid UTF-8.
fn clean_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => {
            tracing::warn!("log line contains invalid utf-8; bytes replaced");
            s
        }
    }
}

#[cfg(test)]
#[path = "paged_tests.rs"]
mod tests;
