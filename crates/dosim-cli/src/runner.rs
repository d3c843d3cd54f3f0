//! File-based command execution, kept out of the binary so integration tests
//! can drive it directly.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use dosim_compose::{GridStore, evaluate_task, validate_task};
use dosim_model::{DoseCompositionTask, DoseGrid, MetricType, Objective, ValidationReport};
use dosim_score::ObjectiveSet;

/// Inputs for the `compose` command.
#[derive(Debug, Clone)]
pub struct ComposeRequest {
    pub task: PathBuf,
    pub store: PathBuf,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

/// Result of the `compose` command: either the validation report with
/// issues, or the composed grid (written to `written` unless dry-run).
#[derive(Debug)]
pub struct ComposeOutcome {
    pub task_name: String,
    pub report: ValidationReport,
    pub grid: Option<DoseGrid>,
    pub written: Option<PathBuf>,
}

impl ComposeOutcome {
    pub fn has_issues(&self) -> bool {
        self.report.has_issues()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {what} from {}", path.display()))
}

/// Loads a task and grid store, validates, and evaluates when clean.
pub fn run_compose(request: &ComposeRequest) -> Result<ComposeOutcome> {
    let task: DoseCompositionTask = read_json(&request.task, "dose composition task")?;
    let store: GridStore = read_json(&request.store, "grid store")?;
    tracing::info!(
        task = %task.name,
        doses = store.dose_count(),
        registrations = store.registration_count(),
        "loaded composition inputs"
    );

    let report = validate_task(&task, &store);
    if report.has_issues() {
        return Ok(ComposeOutcome {
            task_name: task.name,
            report,
            grid: None,
            written: None,
        });
    }

    let grid = evaluate_task(&task, &store).context("composition failed")?;

    let written = match (&request.output, request.dry_run) {
        (Some(path), false) => {
            let json = serde_json::to_string_pretty(&grid)?;
            fs::write(path, json)
                .with_context(|| format!("failed to write composed grid to {}", path.display()))?;
            Some(path.clone())
        }
        _ => None,
    };

    Ok(ComposeOutcome {
        task_name: task.name,
        report,
        grid: Some(grid),
        written,
    })
}

/// A single classified metric value.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedValue {
    pub value: f64,
    pub index: usize,
    pub label: String,
    pub color: [u8; 3],
}

/// Result of the `classify` command.
#[derive(Debug)]
pub enum ClassifyOutcome {
    /// The objective list failed construction-time validation.
    Invalid(ValidationReport),
    Classified(Vec<ClassifiedValue>),
}

/// Loads an objective list and classifies each value against it.
pub fn run_classify(objectives_path: &Path, values: &[f64]) -> Result<ClassifyOutcome> {
    let objectives: Vec<Objective> = read_json(objectives_path, "objective list")?;
    let set = match ObjectiveSet::new(objectives) {
        Ok(set) => set,
        Err(error) => return Ok(ClassifyOutcome::Invalid(error.report)),
    };

    let classified = values
        .iter()
        .map(|&value| {
            let classification = set.classify(value);
            ClassifiedValue {
                value,
                index: classification.index,
                label: classification.label().to_string(),
                color: classification.color(),
            }
        })
        .collect();
    Ok(ClassifyOutcome::Classified(classified))
}

/// One row of the supported computed-metric listing.
pub struct MetricTypeRow {
    pub name: &'static str,
    pub requires_roi: bool,
    pub arg_count: usize,
    pub description: &'static str,
}

/// The full metric table, in fixed order.
pub fn metric_type_rows() -> Vec<MetricTypeRow> {
    MetricType::ALL
        .iter()
        .map(|metric_type| MetricTypeRow {
            name: metric_type.as_str(),
            requires_roi: metric_type.requires_roi(),
            arg_count: metric_type.arg_count(),
            description: metric_type.description(),
        })
        .collect()
}
