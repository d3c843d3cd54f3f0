pub mod error;
pub mod grid;
pub mod metric;
pub mod objective;
pub mod operation;
pub mod report;

pub use error::ModelError;
pub use grid::{DoseGrid, GridDims, Registration};
pub use metric::{ComputedMetric, MetricType};
pub use objective::{MAX_LABEL_LEN, Objective};
pub use operation::{
    DoseCompositionTask, MAX_TASK_NAME_LEN, Operation, OperationKind, Transformation,
};
pub use report::{IssueKind, ValidationIssue, ValidationReport};
