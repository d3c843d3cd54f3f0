//! Structured validation issues shared by the composition and scorecard
//! validators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Distinguishes how a violation is remediated: fix the structure itself, or
/// fix a dangling reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Structural,
    Reference,
}

/// A single validation violation, located by a slash-separated path into the
/// validated document (`/` for the root).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn structural(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::Structural,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn reference(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::Reference,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// The complete set of violations found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn structural_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::Structural)
            .count()
    }

    pub fn reference_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::Reference)
            .count()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, issue) in self.issues.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}
