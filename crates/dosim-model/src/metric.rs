//! Computed dose metric descriptors.
//!
//! The set of metric types and their argument arity is fixed by the remote
//! platform and must match its wire names exactly; `dosim-score` validates
//! descriptors against the table exposed here.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::objective::Objective;

/// A computed metric type, serialized in SCREAMING_SNAKE_CASE wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricType {
    Volume,
    MinDoseRoi,
    MaxDoseRoi,
    MeanDoseRoi,
    IntegralDoseRoi,
    DoseVolumePercentRoi,
    DoseVolumeCcRoi,
    DoseVolumeMinusCcRoi,
    VolumeCcDoseRoi,
    VolumePercentDoseRoi,
    VolumeCcDoseRangeRoi,
    VolumePercentDoseRangeRoi,
    GlobalMaxDose,
    CumulativeMeterset,
}

impl MetricType {
    /// Every supported metric type, in table order.
    pub const ALL: [MetricType; 14] = [
        MetricType::Volume,
        MetricType::MinDoseRoi,
        MetricType::MaxDoseRoi,
        MetricType::MeanDoseRoi,
        MetricType::IntegralDoseRoi,
        MetricType::DoseVolumePercentRoi,
        MetricType::DoseVolumeCcRoi,
        MetricType::DoseVolumeMinusCcRoi,
        MetricType::VolumeCcDoseRoi,
        MetricType::VolumePercentDoseRoi,
        MetricType::VolumeCcDoseRangeRoi,
        MetricType::VolumePercentDoseRangeRoi,
        MetricType::GlobalMaxDose,
        MetricType::CumulativeMeterset,
    ];

    /// Wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Volume => "VOLUME",
            MetricType::MinDoseRoi => "MIN_DOSE_ROI",
            MetricType::MaxDoseRoi => "MAX_DOSE_ROI",
            MetricType::MeanDoseRoi => "MEAN_DOSE_ROI",
            MetricType::IntegralDoseRoi => "INTEGRAL_DOSE_ROI",
            MetricType::DoseVolumePercentRoi => "DOSE_VOLUME_PERCENT_ROI",
            MetricType::DoseVolumeCcRoi => "DOSE_VOLUME_CC_ROI",
            MetricType::DoseVolumeMinusCcRoi => "DOSE_VOLUME_MINUS_CC_ROI",
            MetricType::VolumeCcDoseRoi => "VOLUME_CC_DOSE_ROI",
            MetricType::VolumePercentDoseRoi => "VOLUME_PERCENT_DOSE_ROI",
            MetricType::VolumeCcDoseRangeRoi => "VOLUME_CC_DOSE_RANGE_ROI",
            MetricType::VolumePercentDoseRangeRoi => "VOLUME_PERCENT_DOSE_RANGE_ROI",
            MetricType::GlobalMaxDose => "GLOBAL_MAX_DOSE",
            MetricType::CumulativeMeterset => "CUMULATIVE_METERSET",
        }
    }

    /// Whether the metric is scoped to a single ROI (`roi_name` required).
    pub fn requires_roi(&self) -> bool {
        !matches!(
            self,
            MetricType::GlobalMaxDose | MetricType::CumulativeMeterset
        )
    }

    /// Number of numeric arguments (`arg_1`, `arg_2`) the metric requires.
    pub fn arg_count(&self) -> usize {
        match self {
            MetricType::Volume
            | MetricType::MinDoseRoi
            | MetricType::MaxDoseRoi
            | MetricType::MeanDoseRoi
            | MetricType::IntegralDoseRoi
            | MetricType::GlobalMaxDose
            | MetricType::CumulativeMeterset => 0,
            MetricType::DoseVolumePercentRoi
            | MetricType::DoseVolumeCcRoi
            | MetricType::DoseVolumeMinusCcRoi
            | MetricType::VolumeCcDoseRoi
            | MetricType::VolumePercentDoseRoi => 1,
            MetricType::VolumeCcDoseRangeRoi | MetricType::VolumePercentDoseRangeRoi => 2,
        }
    }

    /// Short human-readable description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            MetricType::Volume => "Volume of the ROI (cc)",
            MetricType::MinDoseRoi => "Minimum dose within the ROI (Gy)",
            MetricType::MaxDoseRoi => "Maximum dose within the ROI (Gy)",
            MetricType::MeanDoseRoi => "Mean dose within the ROI (Gy)",
            MetricType::IntegralDoseRoi => "Integral dose within the ROI (Gy cc)",
            MetricType::DoseVolumePercentRoi => "Dose (Gy) covering arg_1 percent of the ROI",
            MetricType::DoseVolumeCcRoi => "Dose (Gy) covering arg_1 cc of the ROI",
            MetricType::DoseVolumeMinusCcRoi => {
                "Dose (Gy) covering the ROI volume less arg_1 cc"
            }
            MetricType::VolumeCcDoseRoi => "ROI volume (cc) receiving at least arg_1 Gy",
            MetricType::VolumePercentDoseRoi => {
                "Percent of ROI volume receiving at least arg_1 Gy"
            }
            MetricType::VolumeCcDoseRangeRoi => {
                "ROI volume (cc) receiving between arg_1 and arg_2 Gy"
            }
            MetricType::VolumePercentDoseRangeRoi => {
                "Percent of ROI volume receiving between arg_1 and arg_2 Gy"
            }
            MetricType::GlobalMaxDose => "Maximum dose over the whole grid (Gy)",
            MetricType::CumulativeMeterset => "Cumulative meterset over the plan beams",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A computed metric descriptor as it appears in scorecard payloads.
///
/// `roi_name`, `arg_1`, and `arg_2` are always serialized (as `null` when
/// unset) to match the service's field-exact shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedMetric {
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    #[serde(default)]
    pub roi_name: Option<String>,
    #[serde(default)]
    pub arg_1: Option<f64>,
    #[serde(default)]
    pub arg_2: Option<f64>,
    /// Optional ordered performance bins for this metric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objectives: Option<Vec<Objective>>,
}

impl ComputedMetric {
    pub fn new(metric_type: MetricType) -> Self {
        Self {
            metric_type,
            roi_name: None,
            arg_1: None,
            arg_2: None,
            objectives: None,
        }
    }

    #[must_use]
    pub fn with_roi(mut self, roi_name: impl Into<String>) -> Self {
        self.roi_name = Some(roi_name.into());
        self
    }

    #[must_use]
    pub fn with_args(mut self, arg_1: Option<f64>, arg_2: Option<f64>) -> Self {
        self.arg_1 = arg_1;
        self.arg_2 = arg_2;
        self
    }

    #[must_use]
    pub fn with_objectives(mut self, objectives: Vec<Objective>) -> Self {
        self.objectives = Some(objectives);
        self
    }
}
