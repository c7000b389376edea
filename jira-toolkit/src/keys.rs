//! Issue and project key parsing.
//!
//! Keys are uppercased on parse so `exmp-152` and `EXMP-152` refer to the
//! same ticket. Validation happens before any request is made.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when a key does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Project key is empty or contains unsupported characters.
    #[error("Invalid project key '{0}': expected a letter followed by letters, digits or '_'")]
    InvalidProject(String),

    /// Issue key is not in `PROJECT-NUMBER` form.
    #[error("Invalid issue key '{0}': expected PROJECT-NUMBER (e.g. EXMP-152)")]
    InvalidIssue(String),
}

/// A project (board) key such as `DEV`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectKey(String);

impl ProjectKey {
    /// Parses and uppercases a project key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidProject`] if the key is malformed.
    pub fn parse(raw: &str) -> Result<Self, KeyError> {
        let key = raw.trim().to_ascii_uppercase();
        if is_project_key(&key) {
            Ok(Self(key))
        } else {
            Err(KeyError::InvalidProject(raw.to_string()))
        }
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix shared by every issue key in this project, e.g. `DEV-`.
    #[must_use]
    pub fn issue_prefix(&self) -> String {
        format!("{}-", self.0)
    }
}

/// An issue key such as `EXMP-152`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueKey(String);

impl IssueKey {
    /// Parses and uppercases an issue key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidIssue`] if the key is malformed.
    pub fn parse(raw: &str) -> Result<Self, KeyError> {
        let key = raw.trim().to_ascii_uppercase();
        match key.rsplit_once('-') {
            Some((project, number))
                if is_project_key(project)
                    && !number.is_empty()
                    && number.bytes().all(|b| b.is_ascii_digit()) =>
            {
                Ok(Self(key))
            }
            _ => Err(KeyError::InvalidIssue(raw.to_string())),
        }
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_project_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProjectKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromStr for IssueKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
