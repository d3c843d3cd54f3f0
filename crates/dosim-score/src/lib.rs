//! Scorecard objective classification and computed-metric validation.
//!
//! Pure, synchronous, and I/O-free: a validated [`ObjectiveSet`] classifies
//! metric values locally, and [`validate_metric`] checks descriptors against
//! the fixed metric-type table before they are sent to the platform.

mod metrics;
mod objectives;

pub use dosim_model::{ComputedMetric, MetricType, Objective};
pub use metrics::{MetricError, validate_metric};
pub use objectives::{
    Classification, MAX_OBJECTIVES, MIN_OBJECTIVES, ObjectiveError, ObjectiveSet,
    validate_objectives,
};
