//! Scorecard objective bins.

use serde::{Deserialize, Serialize};

/// Maximum length of an objective label.
pub const MAX_LABEL_LEN: usize = 64;

/// A single performance bin within an ordered objective list.
///
/// Only the thresholds a bin actually declares appear on the wire; the
/// effective range of an undeclared side is derived from the neighboring bin.
/// Structural rules for a whole list live in `dosim-score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub label: String,
    /// Display color as 8-bit RGB channels.
    pub color: [u8; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Objective {
    pub fn new(label: impl Into<String>, color: [u8; 3]) -> Self {
        Self {
            label: label.into(),
            color,
            min: None,
            max: None,
        }
    }

    #[must_use]
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Number of threshold fields this bin declares (0, 1, or 2).
    pub fn declared_bounds(&self) -> usize {
        usize::from(self.min.is_some()) + usize::from(self.max.is_some())
    }
}
