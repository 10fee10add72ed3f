// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;
use tempfile::tempdir;

/// Write a log with lines `L1..Ln`, newline-terminated.
fn log_file(dir: &tempfile::TempDir, n: usize) -> std::path::PathBuf {
    let path = dir.path().join("crawl.log");
    let mut f = File::create(&path).unwrap();
    for i in 1..=n {
        writeln!(f, "L{}", i).unwrap();
    }
    path
}

fn labels(range: std::ops::RangeInclusive<usize>) -> Vec<String> {
    range.map(|i| format!("L{}", i)).collect()
}

#[test]
fn tail_returns_last_k_lines_ascending() {
    let dir = tempdir().unwrap();
    let path = log_file(&dir, 10);

    let window = paged_lines(&path, Position::End, -3).unwrap();

    assert_eq!(window.lines, labels(8..=10));
    assert!(!window.truncated);
}

#[test]
fn tail_of_short_file_returns_everything() {
    let dir = tempdir().unwrap();
    let path = log_file(&dir, 4);

    let window = paged_lines(&path, Position::End, -128).unwrap();

    assert_eq!(window.lines, labels(1..=4));
    assert!(window.truncated);
}

#[test]
fn tail_exactly_the_file_is_not_truncated() {
    let dir = tempdir().unwrap();
    let path = log_file(&dir, 5);

    let window = paged_lines(&path, Position::End, -5).unwrap();

    assert_eq!(window.lines, labels(1..=5));
    assert!(!window.truncated);
}

#[test]
fn backward_from_line_returns_preceding_lines() {
    let dir = tempdir().unwrap();
    let path = log_file(&dir, 10);

    // lines preceding line 5: L3, L4
    let window = paged_lines(&path, Position::Line(5), -2).unwrap();

    assert_eq!(window.lines, labels(3..=4));
    assert!(!window.truncated);
}

#[test]
fn forward_from_line_reads_from_that_line() {
    let dir = tempdir().unwrap();
    let path = log_file(&dir, 10);

    let window = paged_lines(&path, Position::Line(4), 3).unwrap();

    assert_eq!(window.lines, labels(4..=6));
    assert!(!window.truncated);
}

#[test]
fn forward_past_eof_is_truncated() {
    let dir = tempdir().unwrap();
    let path = log_file(&dir, 5);

    let window = paged_lines(&path, Position::Line(4), 10).unwrap();

    assert_eq!(window.lines, labels(4..=5));
    assert!(window.truncated);
}

#[test]
fn forward_from_start() {
    let dir = tempdir().unwrap();
    let path = log_file(&dir, 5);

    let window = paged_lines(&path, Position::Line(1), 2).unwrap();

    assert_eq!(window.lines, labels(1..=2));
}

#[test]
fn line_zero_reads_as_line_one() {
    let dir = tempdir().unwrap();
    let path = log_file(&dir, 3);

    let window = paged_lines(&path, Position::Line(0), 1).unwrap();

    assert_eq!(window.lines, vec!["L1"]);
}

#[test]
fn byte_anchor_forward() {
    let dir = tempdir().unwrap();
    let path = log_file(&dir, 5); // each line is "Ln\n" = 3 bytes

    let window = paged_lines(&path, Position::Byte(3), 2).unwrap();

    assert_eq!(window.lines, labels(2..=3));
}

#[test]
fn byte_anchor_backward() {
    let dir = tempdir().unwrap();
    let path = log_file(&dir, 5);

    let window = paged_lines(&path, Position::Byte(9), -2).unwrap();

    assert_eq!(window.lines, labels(2..=3));
}

#[test]
fn byte_anchor_past_eof_clamps() {
    let dir = tempdir().unwrap();
    let path = log_file(&dir, 3);

    let window = paged_lines(&path, Position::Byte(10_000), -1).unwrap();

    assert_eq!(window.lines, vec!["L3"]);
}

#[test]
fn zero_count_is_an_empty_window() {
    let dir = tempdir().unwrap();
    let path = log_file(&dir, 3);

    let window = paged_lines(&path, Position::End, 0).unwrap();

    assert!(window.lines.is_empty());
    assert!(!window.truncated);
}

#[test]
fn empty_file_returns_empty_window() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.log");
    File::create(&path).unwrap();

    let window = paged_lines(&path, Position::End, -5).unwrap();

    assert!(window.lines.is_empty());
    assert!(window.truncated);
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.log");

    let err = paged_lines(&path, Position::End, -5).unwrap_err();

    assert!(matches!(err, ReadError::NotFound(p) if p == path));
}

#[test]
fn unterminated_last_line_counts_as_a_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.log");
    let mut f = File::create(&path).unwrap();
    write!(f, "one\ntwo\nthree").unwrap();

    let window = paged_lines(&path, Position::End, -2).unwrap();
    assert_eq!(window.lines, vec!["two", "three"]);

    let window = paged_lines(&path, Position::End, -3).unwrap();
    assert_eq!(window.lines, vec!["one", "two", "three"]);
    assert!(!window.truncated);
}

#[test]
fn crlf_line_endings_are_stripped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("crlf.log");
    let mut f = File::create(&path).unwrap();
    write!(f, "one\r\ntwo\r\n").unwrap();

    let window = paged_lines(&path, Position::End, -2).unwrap();

    assert_eq!(window.lines, vec!["one", "two"]);
}

#[test]
fn lines_longer_than_the_scan_block() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wide.log");
    let mut f = File::create(&path).unwrap();
    let wide = "x".repeat(3 * SCAN_BLOCK);
    writeln!(f, "first").unwrap();
    writeln!(f, "{}", wide).unwrap();
    writeln!(f, "last").unwrap();

    let window = paged_lines(&path, Position::End, -2).unwrap();

    assert_eq!(window.lines.len(), 2);
    assert_eq!(window.lines[0], wide);
    assert_eq!(window.lines[1], "last");
    assert!(!window.truncated);
}

#[test]
fn tail_window_spanning_many_blocks() {
    let dir = tempdir().unwrap();
    let path = log_file(&dir, 20_000);

    let window = paged_lines(&path, Position::End, -128).unwrap();

    assert_eq!(window.lines.len(), 128);
    assert_eq!(window.lines[0], "L19873");
    assert_eq!(window.lines[127], "L20000");
}

#[test]
fn single_line_no_newline() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("one.log");
    let mut f = File::create(&path).unwrap();
    write!(f, "only").unwrap();

    let window = paged_lines(&path, Position::End, -1).unwrap();

    assert_eq!(window.lines, vec!["only"]);
    assert!(!window.truncated);
}

#[test]
fn cancelled_token_aborts_the_read() {
    let dir = tempdir().unwrap();
    let path = log_file(&dir, 100);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = paged_lines_cancellable(&path, Position::End, -5, &cancel).unwrap_err();

    assert!(matches!(err, ReadError::Cancelled));
}

#[test]
fn reverse_is_the_callers_job() {
    let dir = tempdir().unwrap();
    let path = log_file(&dir, 5);

    let mut window = paged_lines(&path, Position::End, -3).unwrap();
    window.lines.reverse();

    assert_eq!(window.lines, vec!["L5", "L4", "L3"]);
}
