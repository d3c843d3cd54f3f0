//! Post-order evaluation of validated operation trees into a composed grid.

use dosim_model::{DoseCompositionTask, DoseGrid, Operation, OperationKind};

use crate::error::ComposeError;
use crate::resolver::Resolver;
use crate::validate::{validate, validate_task};

/// Evaluates an operation tree into a single composed dose grid, in the
/// frame of reference of the root's primary operand chain.
///
/// The tree is validated first; any violation aborts the evaluation before
/// grid data is touched, with the complete report inside
/// [`ComposeError::Invalid`].
pub fn evaluate(operation: &Operation, resolver: &dyn Resolver) -> Result<DoseGrid, ComposeError> {
    let report = validate(operation, resolver);
    if report.has_issues() {
        return Err(ComposeError::Invalid { report });
    }
    let grid = eval_node(operation, "/", resolver)?;
    tracing::debug!(
        voxels = grid.voxel_count(),
        frame = grid.frame_of_reference(),
        "composed dose grid"
    );
    Ok(grid)
}

/// Evaluates a full `dose_composition` task envelope.
pub fn evaluate_task(
    task: &DoseCompositionTask,
    resolver: &dyn Resolver,
) -> Result<DoseGrid, ComposeError> {
    let report = validate_task(task, resolver);
    if report.has_issues() {
        return Err(ComposeError::Invalid { report });
    }
    eval_node(&task.operation, "/operation", resolver)
}

fn child_path(path: &str, index: usize) -> String {
    if path == "/" {
        format!("/operands/{index}")
    } else {
        format!("{path}/operands/{index}")
    }
}

fn eval_node(
    node: &Operation,
    path: &str,
    resolver: &dyn Resolver,
) -> Result<DoseGrid, ComposeError> {
    let mut grid = match node {
        Operation::Dose { id, .. } => resolver
            .dose_grid(id)
            .cloned()
            .ok_or_else(|| ComposeError::UnresolvedDose { id: id.clone() })?,
        _ => {
            let operands = node.operands();
            let mut grids = Vec::with_capacity(operands.len());
            for (index, operand) in operands.iter().enumerate() {
                grids.push(eval_node(operand, &child_path(path, index), resolver)?);
            }
            combine(node.kind(), grids, path)?
        }
    };

    // Scale, then offset, on this node's combined result.
    let scale = node.scale();
    let offset = node.offset();
    if scale != 1.0 || offset != 0.0 {
        grid = grid.map(|voxel| voxel * scale + offset);
    }

    if let Some(transformation) = node.transformation() {
        let sro_id = transformation.sro_id();
        let registration =
            resolver
                .registration(sro_id)
                .ok_or_else(|| ComposeError::UnresolvedSro {
                    id: sro_id.to_string(),
                })?;
        tracing::trace!(path, sro = sro_id, "resampling operand through registration");
        grid = resolver.resample(&grid, registration)?;
    }

    Ok(grid)
}

fn geometry(grid: &DoseGrid) -> String {
    let [ni, nj, nk] = grid.dims();
    format!(
        "{ni}x{nj}x{nk} in frame {frame}",
        frame = grid.frame_of_reference()
    )
}

fn combine(
    kind: OperationKind,
    mut grids: Vec<DoseGrid>,
    path: &str,
) -> Result<DoseGrid, ComposeError> {
    if grids.is_empty() {
        return Err(ComposeError::MissingOperands {
            path: path.to_string(),
        });
    }
    let mut accumulator = grids.remove(0);
    for grid in &grids {
        if !accumulator.same_geometry(grid) {
            return Err(ComposeError::GeometryMismatch {
                path: path.to_string(),
                left: geometry(&accumulator),
                right: geometry(grid),
            });
        }
    }

    match kind {
        // Leaves never reach combine; eval_node resolves them directly.
        OperationKind::Dose => {}
        OperationKind::Addition => {
            for grid in &grids {
                for (voxel, other) in accumulator.voxels_mut().iter_mut().zip(grid.voxels()) {
                    *voxel += other;
                }
            }
        }
        OperationKind::Multiplication => {
            for grid in &grids {
                for (voxel, other) in accumulator.voxels_mut().iter_mut().zip(grid.voxels()) {
                    *voxel *= other;
                }
            }
        }
        OperationKind::Division => {
            for grid in &grids {
                let zero_voxels = grid.voxels().iter().filter(|voxel| **voxel == 0.0).count();
                if zero_voxels > 0 {
                    return Err(ComposeError::DivisionByZero {
                        path: path.to_string(),
                        zero_voxels,
                    });
                }
                for (voxel, other) in accumulator.voxels_mut().iter_mut().zip(grid.voxels()) {
                    *voxel /= other;
                }
            }
        }
    }

    Ok(accumulator)
}
