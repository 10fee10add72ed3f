// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job name newtype and validation.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

/// Errors from job name validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Empty names cannot address anything.
    #[error("job name is empty")]
    Empty,

    /// Names become directory names; separators would escape the registry root.
    #[error("job name '{0}' contains a path separator")]
    Separator(String),

    /// `.` and `..` are relative path components, not names.
    #[error("job name '{0}' is a relative path component")]
    Dotted(String),
}

/// Short name of a job, unique within its registry.
///
/// Job names double as directory names under the registry root, so they
/// are validated at construction: non-empty, no path separators, and not
/// a dot component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobName(SmolStr);

impl JobName {
    /// Validate and wrap a job name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, NameError> {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if name.contains('/') || name.contains('\\') {
            return Err(NameError::Separator(name.to_string()));
        }
        if name == "." || name == ".." {
            return Err(NameError::Dotted(name.to_string()));
        }
        Ok(Self(SmolStr::new(name)))
    }

    /// Get the string value of this name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<str> for JobName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for JobName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for JobName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Unchecked conversion for test fixtures.
#[cfg(any(test, feature = "test-support"))]
impl From<&str> for JobName {
    fn from(s: &str) -> Self {
        Self(SmolStr::new(s))
    }
}

#[cfg(test)]
#[path = "name_tests.rs"]
mod tests;
