//! Validated objective bin lists and value classification.
//!
//! An objective list partitions the number line into 2..=10 contiguous bins.
//! Each boundary between adjacent bins is declared by exactly one of the two
//! bins (`max` on the earlier or `min` on the later); the declaring bin owns
//! the exact threshold value. Threshold comparison is exact IEEE-754, with no
//! epsilon: bins are contiguous, so a tolerance band would make ownership of
//! near-boundary values ambiguous.

use thiserror::Error;

use dosim_model::{MAX_LABEL_LEN, Objective, ValidationIssue, ValidationReport};

/// Minimum number of bins in an objective list.
pub const MIN_OBJECTIVES: usize = 2;
/// Maximum number of bins in an objective list.
pub const MAX_OBJECTIVES: usize = 10;

/// An objective list that passed construction-time validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveSet {
    objectives: Vec<Objective>,
}

/// Construction failure carrying every violated rule.
#[derive(Debug, Error)]
#[error("objective list failed validation with {} issue(s)", .report.issues.len())]
pub struct ObjectiveError {
    pub report: ValidationReport,
}

/// The bin a metric value resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification<'a> {
    pub index: usize,
    pub objective: &'a Objective,
}

impl Classification<'_> {
    pub fn label(&self) -> &str {
        &self.objective.label
    }

    pub fn color(&self) -> [u8; 3] {
        self.objective.color
    }
}

impl ObjectiveSet {
    /// Validates the list once; classification afterwards cannot fail.
    pub fn new(objectives: Vec<Objective>) -> Result<Self, ObjectiveError> {
        let report = validate_objectives(&objectives);
        if report.has_issues() {
            return Err(ObjectiveError { report });
        }
        Ok(Self { objectives })
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    /// Resolves a value to its bin in list order.
    ///
    /// A bin's undeclared `max` is bounded exclusively by its successor's
    /// declared `min`, so the walk returns the first bin whose upper bound
    /// admits the value; the last bin has no upper bound. Every finite value
    /// matches exactly one bin.
    pub fn classify(&self, value: f64) -> Classification<'_> {
        let last = self.objectives.len() - 1;
        for (index, objective) in self.objectives.iter().enumerate() {
            let admitted = match (objective.max, self.objectives.get(index + 1)) {
                // The bin declared its own max and owns the threshold.
                (Some(max), _) => value <= max,
                // The successor declared the boundary as its min and owns it.
                (None, Some(next)) => match next.min {
                    Some(min) => value < min,
                    None => false,
                },
                (None, None) => true,
            };
            if admitted {
                tracing::trace!(value, index, label = %objective.label, "classified value");
                return Classification { index, objective };
            }
        }
        // The last bin declares no max, so the walk cannot fall through.
        Classification {
            index: last,
            objective: &self.objectives[last],
        }
    }
}

/// Checks every structural rule for an objective list and returns the
/// complete set of violations.
pub fn validate_objectives(objectives: &[Objective]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let count = objectives.len();

    if count < MIN_OBJECTIVES {
        report.push(ValidationIssue::structural(
            "/",
            format!("objective list requires at least {MIN_OBJECTIVES} bins, found {count}"),
        ));
    } else if count > MAX_OBJECTIVES {
        report.push(ValidationIssue::structural(
            "/",
            format!("objective list allows at most {MAX_OBJECTIVES} bins, found {count}"),
        ));
    }

    for (index, objective) in objectives.iter().enumerate() {
        let label_len = objective.label.chars().count();
        if label_len > MAX_LABEL_LEN {
            report.push(ValidationIssue::structural(
                format!("/{index}/label"),
                format!("label exceeds {MAX_LABEL_LEN} characters (got {label_len})"),
            ));
        }
    }

    if let Some(first) = objectives.first()
        && first.min.is_some()
    {
        report.push(ValidationIssue::structural(
            "/0/min",
            "the first bin must not declare a min",
        ));
    }
    if count >= MIN_OBJECTIVES
        && let Some(last) = objectives.last()
        && last.max.is_some()
    {
        report.push(ValidationIssue::structural(
            format!("/{}/max", count - 1),
            "the last bin must not declare a max",
        ));
    }

    for (index, pair) in objectives.windows(2).enumerate() {
        let declared_by_left = pair[0].max.is_some();
        let declared_by_right = pair[1].min.is_some();
        if declared_by_left && declared_by_right {
            report.push(ValidationIssue::structural(
                format!("/{index}"),
                format!(
                    "bins {index} and {} both declare the boundary between them",
                    index + 1
                ),
            ));
        } else if !declared_by_left && !declared_by_right {
            report.push(ValidationIssue::structural(
                format!("/{index}"),
                format!(
                    "bins {index} and {} declare no boundary between them",
                    index + 1
                ),
            ));
        }
    }

    let declared: usize = objectives
        .iter()
        .map(dosim_model::Objective::declared_bounds)
        .sum();
    if count >= MIN_OBJECTIVES && declared != count - 1 {
        report.push(ValidationIssue::structural(
            "/",
            format!(
                "expected {} declared thresholds across {count} bins, found {declared}",
                count - 1
            ),
        ));
    }

    for index in 0..count {
        check_effective_range(objectives, index, &mut report);
    }

    tracing::debug!(
        bins = count,
        issues = report.issues.len(),
        "validated objective list"
    );
    report
}

/// Rejects bins whose derived numeric range is empty. A bin's lower bound is
/// its own `min` or the previous bin's `max` (exclusive); its upper bound is
/// its own `max` or the next bin's `min` (exclusive). Any bin whose lower
/// bound reaches its upper bound can never claim a value.
fn check_effective_range(objectives: &[Objective], index: usize, report: &mut ValidationReport) {
    let objective = &objectives[index];
    let lower = objective
        .min
        .or_else(|| index.checked_sub(1).and_then(|prev| objectives[prev].max));
    let upper = objective
        .max
        .or_else(|| objectives.get(index + 1).and_then(|next| next.min));
    if let (Some(lower), Some(upper)) = (lower, upper)
        && lower >= upper
    {
        report.push(ValidationIssue::structural(
            format!("/{index}"),
            format!("bin has an empty effective range ({lower} to {upper})"),
        ));
    }
}
