//! Bridges parsed CLI arguments to the runner and renders results.

use anyhow::Result;

use dosim_cli::runner::{ClassifyOutcome, ComposeRequest, run_classify, run_compose};

use crate::cli::{ClassifyArgs, ComposeArgs};
use crate::summary::{
    print_classifications, print_grid_summary, print_metric_types, print_report,
};

/// Runs `compose`; returns the process exit code.
pub fn compose(args: &ComposeArgs) -> Result<i32> {
    let request = ComposeRequest {
        task: args.task.clone(),
        store: args.store.clone(),
        output: args.output.clone(),
        dry_run: args.dry_run,
    };
    let outcome = run_compose(&request)?;
    if outcome.has_issues() {
        print_report(&outcome.report);
        return Ok(1);
    }
    if let Some(grid) = &outcome.grid {
        print_grid_summary(&outcome.task_name, grid);
    }
    if let Some(path) = &outcome.written {
        println!("composed grid written to {}", path.display());
    }
    Ok(0)
}

/// Runs `classify`; returns the process exit code.
pub fn classify(args: &ClassifyArgs) -> Result<i32> {
    match run_classify(&args.objectives, &args.values)? {
        ClassifyOutcome::Invalid(report) => {
            print_report(&report);
            Ok(1)
        }
        ClassifyOutcome::Classified(rows) => {
            print_classifications(&rows);
            Ok(0)
        }
    }
}

/// Runs `metric-types`; returns the process exit code.
pub fn metric_types() -> Result<i32> {
    print_metric_types();
    Ok(0)
}
