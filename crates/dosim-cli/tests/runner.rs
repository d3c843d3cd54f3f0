//! Integration tests driving the file-based runner over temp directories.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use dosim_cli::runner::{ClassifyOutcome, ComposeRequest, run_classify, run_compose};
use dosim_model::DoseGrid;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

const STORE_JSON: &str = r#"{
    "doses": {
        "dose-2": { "dims": [2, 2, 2], "frame_of_reference": "1.2.3", "voxels": [2, 2, 2, 2, 2, 2, 2, 2] },
        "dose-3": { "dims": [2, 2, 2], "frame_of_reference": "1.2.3", "voxels": [3, 3, 3, 3, 3, 3, 3, 3] }
    },
    "registrations": {}
}"#;

#[test]
fn compose_writes_the_composed_grid() {
    let dir = TempDir::new().unwrap();
    let task = write(
        &dir,
        "task.json",
        r#"{
            "type": "dose_composition",
            "name": "Composite",
            "operation": {
                "type": "addition",
                "operands": [
                    { "type": "dose", "id": "dose-2" },
                    { "type": "dose", "id": "dose-3" }
                ],
                "scale": 0.5
            }
        }"#,
    );
    let store = write(&dir, "store.json", STORE_JSON);
    let output = dir.path().join("composed.json");

    let outcome = run_compose(&ComposeRequest {
        task,
        store,
        output: Some(output.clone()),
        dry_run: false,
    })
    .unwrap();

    assert!(!outcome.has_issues());
    assert_eq!(outcome.task_name, "Composite");
    let grid = outcome.grid.unwrap();
    assert!(grid.voxels().iter().all(|&v| v == 2.5));
    assert_eq!(outcome.written.as_deref(), Some(output.as_path()));

    let reloaded: DoseGrid = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(reloaded, grid);
}

#[test]
fn compose_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let task = write(
        &dir,
        "task.json",
        r#"{
            "type": "dose_composition",
            "name": "Composite",
            "operation": { "type": "dose", "id": "dose-2", "offset": 1.0 }
        }"#,
    );
    let store = write(&dir, "store.json", STORE_JSON);
    let output = dir.path().join("composed.json");

    let outcome = run_compose(&ComposeRequest {
        task,
        store,
        output: Some(output.clone()),
        dry_run: true,
    })
    .unwrap();

    assert!(outcome.grid.is_some());
    assert!(outcome.written.is_none());
    assert!(!output.exists());
}

#[test]
fn compose_reports_validation_issues_instead_of_evaluating() {
    let dir = TempDir::new().unwrap();
    let task = write(
        &dir,
        "task.json",
        r#"{
            "type": "dose_composition",
            "name": "Broken",
            "operation": {
                "type": "addition",
                "operands": [ { "type": "dose", "id": "dose-2" } ]
            }
        }"#,
    );
    let store = write(&dir, "store.json", STORE_JSON);

    let outcome = run_compose(&ComposeRequest {
        task,
        store,
        output: None,
        dry_run: false,
    })
    .unwrap();

    assert!(outcome.has_issues());
    assert!(outcome.grid.is_none());
    insta::assert_snapshot!(
        outcome.report.to_string(),
        @"/operation: addition requires at least 2 operands, found 1"
    );
}

#[test]
fn classify_labels_each_value() {
    let dir = TempDir::new().unwrap();
    let objectives = write(
        &dir,
        "objectives.json",
        r#"[
            { "label": "PASS", "color": [18, 191, 0], "max": 1 },
            { "label": "FAIL", "color": [255, 0, 0] }
        ]"#,
    );

    let outcome = run_classify(&objectives, &[0.5, 1.0, 1.5]).unwrap();
    let rows = match outcome {
        ClassifyOutcome::Classified(rows) => rows,
        ClassifyOutcome::Invalid(report) => panic!("unexpected issues: {report}"),
    };
    let labels: Vec<&str> = rows.iter().map(|row| row.label.as_str()).collect();
    assert_eq!(labels, ["PASS", "PASS", "FAIL"]);
    assert_eq!(rows[2].color, [255, 0, 0]);
}

#[test]
fn classify_surfaces_objective_list_issues() {
    let dir = TempDir::new().unwrap();
    let objectives = write(
        &dir,
        "objectives.json",
        r#"[
            { "label": "A", "color": [0, 0, 0], "min": 0, "max": 1 },
            { "label": "B", "color": [0, 0, 0] }
        ]"#,
    );

    let outcome = run_classify(&objectives, &[0.5]).unwrap();
    match outcome {
        ClassifyOutcome::Invalid(report) => {
            assert!(report.has_issues());
            assert!(report.issues.iter().any(|issue| issue.path == "/0/min"));
        }
        ClassifyOutcome::Classified(_) => panic!("expected validation issues"),
    }
}

#[test]
fn missing_input_files_are_reported_with_context() {
    let dir = TempDir::new().unwrap();
    let error = run_compose(&ComposeRequest {
        task: dir.path().join("absent.json"),
        store: dir.path().join("store.json"),
        output: None,
        dry_run: false,
    })
    .unwrap_err();
    assert!(error.to_string().contains("dose composition task"));
}
