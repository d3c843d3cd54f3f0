//! Structural validation of dose-composition operation trees.
//!
//! A single walk over the tree collects every violation instead of stopping
//! at the first, so callers get complete diagnostics. Two kinds of issues are
//! reported: structural (wrong arity, a transformation missing or present on
//! the wrong edge) and reference (a dose or sro id that does not resolve).

use dosim_model::{
    DoseCompositionTask, MAX_TASK_NAME_LEN, Operation, OperationKind, ValidationIssue,
    ValidationReport,
};

use crate::resolver::Resolver;

/// Where a node sits relative to its parent. A transformation is only
/// meaningful on a secondary operand: the root has no parent frame to map
/// into, and a primary operand defines the very frame its siblings map to.
#[derive(Clone, Copy)]
enum Position<'a> {
    Root,
    Primary,
    Secondary { anchor: Option<&'a str> },
}

/// Validates an operation tree against a resolver, returning every violation
/// found.
pub fn validate(operation: &Operation, resolver: &dyn Resolver) -> ValidationReport {
    let mut report = ValidationReport::default();
    visit(operation, "/", Position::Root, resolver, &mut report);
    tracing::debug!(
        structural = report.structural_count(),
        reference = report.reference_count(),
        "validated operation tree"
    );
    report
}

/// Validates a full `dose_composition` task envelope: the name limit plus the
/// operation tree, with issue paths rooted at the envelope.
pub fn validate_task(task: &DoseCompositionTask, resolver: &dyn Resolver) -> ValidationReport {
    let mut report = ValidationReport::default();
    let name_len = task.name.chars().count();
    if name_len > MAX_TASK_NAME_LEN {
        report.push(ValidationIssue::structural(
            "/name",
            format!("task name exceeds {MAX_TASK_NAME_LEN} characters (got {name_len})"),
        ));
    }
    visit(
        &task.operation,
        "/operation",
        Position::Root,
        resolver,
        &mut report,
    );
    tracing::debug!(
        structural = report.structural_count(),
        reference = report.reference_count(),
        task = %task.name,
        "validated dose composition task"
    );
    report
}

fn child_path(path: &str, index: usize) -> String {
    if path == "/" {
        format!("/operands/{index}")
    } else {
        format!("{path}/operands/{index}")
    }
}

/// Walks the node, pushing issues, and returns the frame of reference its
/// result occupies as seen by the parent (`None` when a dangling reference
/// leaves it unknown).
fn visit(
    node: &Operation,
    path: &str,
    position: Position<'_>,
    resolver: &dyn Resolver,
    report: &mut ValidationReport,
) -> Option<String> {
    let native = match node {
        Operation::Dose { id, .. } => match resolver.dose_grid(id) {
            Some(grid) => Some(grid.frame_of_reference().to_string()),
            None => {
                report.push(ValidationIssue::reference(
                    path,
                    format!("dose id `{id}` does not resolve"),
                ));
                None
            }
        },
        _ => {
            let operands = node.operands();
            check_arity(node.kind(), operands.len(), path, report);
            let anchor = match operands.first() {
                Some(primary) => visit(
                    primary,
                    &child_path(path, 0),
                    Position::Primary,
                    resolver,
                    report,
                ),
                None => None,
            };
            for (index, operand) in operands.iter().enumerate().skip(1) {
                visit(
                    operand,
                    &child_path(path, index),
                    Position::Secondary {
                        anchor: anchor.as_deref(),
                    },
                    resolver,
                    report,
                );
            }
            anchor
        }
    };

    check_transformation(node, path, position, native, resolver, report)
}

fn check_arity(kind: OperationKind, count: usize, path: &str, report: &mut ValidationReport) {
    match kind {
        OperationKind::Dose => {}
        OperationKind::Addition => {
            if count < 2 {
                report.push(ValidationIssue::structural(
                    path,
                    format!("addition requires at least 2 operands, found {count}"),
                ));
            }
        }
        OperationKind::Multiplication | OperationKind::Division => {
            if count != 2 {
                report.push(ValidationIssue::structural(
                    path,
                    format!("{kind} requires exactly 2 operands, found {count}"),
                ));
            }
        }
    }
}

/// Applies the transformation rules for this node and returns its effective
/// frame (the frame the parent will see).
fn check_transformation(
    node: &Operation,
    path: &str,
    position: Position<'_>,
    native: Option<String>,
    resolver: &dyn Resolver,
    report: &mut ValidationReport,
) -> Option<String> {
    let Some(transformation) = node.transformation() else {
        if let Position::Secondary {
            anchor: Some(anchor),
        } = position
            && let Some(frame) = native.as_deref()
            && frame != anchor
        {
            report.push(ValidationIssue::structural(
                path,
                format!(
                    "operand is in frame {frame} but the primary operand is in frame \
                     {anchor} and no transformation is given"
                ),
            ));
        }
        return native;
    };

    let anchor = match position {
        Position::Root => {
            report.push(ValidationIssue::structural(
                path,
                "transformation is not allowed on the root node",
            ));
            return native;
        }
        Position::Primary => {
            report.push(ValidationIssue::structural(
                path,
                "transformation is not allowed on a primary operand",
            ));
            return native;
        }
        Position::Secondary { anchor } => anchor,
    };

    let sro_id = transformation.sro_id();
    let Some(registration) = resolver.registration(sro_id) else {
        report.push(ValidationIssue::reference(
            path,
            format!("sro id `{sro_id}` does not resolve"),
        ));
        return None;
    };

    if let (Some(frame), Some(anchor)) = (native.as_deref(), anchor) {
        if frame == anchor {
            report.push(ValidationIssue::structural(
                path,
                format!(
                    "transformation present but the operand already shares frame \
                     {anchor} with the primary operand"
                ),
            ));
            return native;
        }
        if registration.source_frame != frame {
            report.push(ValidationIssue::structural(
                path,
                format!(
                    "registration `{sro_id}` maps from frame {} but the operand is in \
                     frame {frame}",
                    registration.source_frame
                ),
            ));
        }
        if registration.target_frame != anchor {
            report.push(ValidationIssue::structural(
                path,
                format!(
                    "registration `{sro_id}` maps to frame {} but the primary operand \
                     is in frame {anchor}",
                    registration.target_frame
                ),
            ));
        }
    }
    Some(registration.target_frame.clone())
}
