//! Human-readable tables for command results.

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use dosim_cli::runner::{ClassifiedValue, metric_type_rows};
use dosim_model::{DoseGrid, IssueKind, ValidationReport};

fn table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Prints every validation issue found in a report.
pub fn print_report(report: &ValidationReport) {
    let mut issues = table();
    issues.set_header(vec!["Kind", "Path", "Issue"]);
    for issue in &report.issues {
        let kind = match issue.kind {
            IssueKind::Structural => "structural",
            IssueKind::Reference => "reference",
        };
        issues.add_row(vec![kind, issue.path.as_str(), issue.message.as_str()]);
    }
    println!("{issues}");
    println!(
        "{} issue(s): {} structural, {} reference",
        report.issues.len(),
        report.structural_count(),
        report.reference_count()
    );
}

/// Prints summary statistics for a composed grid.
pub fn print_grid_summary(task_name: &str, grid: &DoseGrid) {
    let [ni, nj, nk] = grid.dims();
    let mut summary = table();
    summary.set_header(vec!["Task", "Grid", "Frame", "Min", "Max", "Mean"]);
    summary.add_row(vec![
        task_name.to_string(),
        format!("{ni}x{nj}x{nk}"),
        grid.frame_of_reference().to_string(),
        format!("{:.4}", grid.min_dose()),
        format!("{:.4}", grid.max_dose()),
        format!("{:.4}", grid.mean_dose()),
    ]);
    println!("{summary}");
}

/// Prints classified values as value/bin/label rows.
pub fn print_classifications(rows: &[ClassifiedValue]) {
    let mut classifications = table();
    classifications.set_header(vec!["Value", "Bin", "Label", "Color"]);
    for row in rows {
        let [r, g, b] = row.color;
        classifications.add_row(vec![
            format!("{}", row.value),
            format!("{}", row.index),
            row.label.clone(),
            format!("#{r:02X}{g:02X}{b:02X}"),
        ]);
    }
    println!("{classifications}");
}

/// Prints the supported computed-metric table.
pub fn print_metric_types() {
    let mut metrics = table();
    metrics.set_header(vec!["Type", "ROI", "Args", "Description"]);
    for row in metric_type_rows() {
        metrics.add_row(vec![
            row.name.to_string(),
            if row.requires_roi { "yes" } else { "no" }.to_string(),
            row.arg_count.to_string(),
            row.description.to_string(),
        ]);
    }
    println!("{metrics}");
}
