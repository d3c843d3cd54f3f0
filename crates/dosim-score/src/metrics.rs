//! Client-side validation of computed-metric descriptors.
//!
//! Each metric type has a fixed roi/argument arity (see
//! [`MetricType::requires_roi`] and [`MetricType::arg_count`]); descriptors
//! are checked against that table before being sent anywhere. Unused fields
//! may be present as `null` on the wire but must not carry values.

use thiserror::Error;

use dosim_model::{ComputedMetric, MetricType};

use crate::objectives::{ObjectiveError, validate_objectives};

#[derive(Debug, Error)]
pub enum MetricError {
    #[error("{metric_type} requires roi_name")]
    MissingRoi { metric_type: MetricType },

    #[error("{metric_type} does not take roi_name")]
    UnexpectedRoi { metric_type: MetricType },

    #[error("{metric_type} requires {field}")]
    MissingArg {
        metric_type: MetricType,
        field: &'static str,
    },

    #[error("{metric_type} does not take {field}")]
    UnexpectedArg {
        metric_type: MetricType,
        field: &'static str,
    },

    #[error("{metric_type} objectives: {source}")]
    Objectives {
        metric_type: MetricType,
        source: ObjectiveError,
    },
}

/// Validates a descriptor against the metric type table, including any
/// embedded objective bins.
pub fn validate_metric(metric: &ComputedMetric) -> Result<(), MetricError> {
    let metric_type = metric.metric_type;

    if metric_type.requires_roi() {
        if metric.roi_name.is_none() {
            return Err(MetricError::MissingRoi { metric_type });
        }
    } else if metric.roi_name.is_some() {
        return Err(MetricError::UnexpectedRoi { metric_type });
    }

    let args = [("arg_1", metric.arg_1), ("arg_2", metric.arg_2)];
    for (position, (field, value)) in args.into_iter().enumerate() {
        let required = position < metric_type.arg_count();
        match (required, value) {
            (true, None) => return Err(MetricError::MissingArg { metric_type, field }),
            (false, Some(_)) => return Err(MetricError::UnexpectedArg { metric_type, field }),
            _ => {}
        }
    }

    if let Some(objectives) = &metric.objectives {
        let report = validate_objectives(objectives);
        if report.has_issues() {
            return Err(MetricError::Objectives {
                metric_type,
                source: ObjectiveError { report },
            });
        }
    }

    Ok(())
}
