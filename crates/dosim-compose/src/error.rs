use thiserror::Error;

use dosim_model::ValidationReport;

use crate::resolver::ResampleError;

#[derive(Debug, Error)]
pub enum ComposeError {
    /// The tree failed structural or reference validation; the report holds
    /// every violation found.
    #[error("operation failed validation with {} issue(s)", .report.issues.len())]
    Invalid { report: ValidationReport },

    #[error("dose id `{id}` does not resolve")]
    UnresolvedDose { id: String },

    #[error("sro id `{id}` does not resolve")]
    UnresolvedSro { id: String },

    /// Raised only if an unvalidated tree reaches the evaluator.
    #[error("node at {path} has no operands")]
    MissingOperands { path: String },

    #[error("operands at {path} have mismatched geometry: {left} vs {right}")]
    GeometryMismatch {
        path: String,
        left: String,
        right: String,
    },

    /// The whole composition fails rather than emitting NaN or infinity,
    /// which would silently corrupt downstream dose statistics.
    #[error("division by zero dose in {zero_voxels} voxel(s) at {path}")]
    DivisionByZero { path: String, zero_voxels: usize },

    #[error(transparent)]
    Resample(#[from] ResampleError),
}
