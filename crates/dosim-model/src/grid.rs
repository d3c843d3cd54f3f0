//! Dense 3-D dose grids and spatial registrations.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Grid dimensions in voxels along each axis (i, j, k).
pub type GridDims = [usize; 3];

/// A 3-D scalar dose field over a fixed voxel geometry.
///
/// Voxel data is stored row-major (`k` fastest) and is guaranteed non-empty
/// and consistent with `dims` by construction; deserialization goes through
/// the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDoseGrid", into = "RawDoseGrid")]
pub struct DoseGrid {
    dims: GridDims,
    frame_of_reference: String,
    voxels: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct RawDoseGrid {
    dims: GridDims,
    frame_of_reference: String,
    voxels: Vec<f64>,
}

impl TryFrom<RawDoseGrid> for DoseGrid {
    type Error = ModelError;

    fn try_from(raw: RawDoseGrid) -> Result<Self, Self::Error> {
        DoseGrid::new(raw.dims, raw.frame_of_reference, raw.voxels)
    }
}

impl From<DoseGrid> for RawDoseGrid {
    fn from(grid: DoseGrid) -> Self {
        RawDoseGrid {
            dims: grid.dims,
            frame_of_reference: grid.frame_of_reference,
            voxels: grid.voxels,
        }
    }
}

impl DoseGrid {
    /// Creates a grid, checking that the voxel data matches the dimensions.
    pub fn new(
        dims: GridDims,
        frame_of_reference: impl Into<String>,
        voxels: Vec<f64>,
    ) -> Result<Self, ModelError> {
        let [ni, nj, nk] = dims;
        let expected = ni
            .checked_mul(nj)
            .and_then(|v| v.checked_mul(nk))
            .ok_or(ModelError::GridTooLarge { ni, nj, nk })?;
        if expected == 0 {
            return Err(ModelError::EmptyGrid);
        }
        if voxels.len() != expected {
            return Err(ModelError::GridShape {
                ni,
                nj,
                nk,
                expected,
                actual: voxels.len(),
            });
        }
        Ok(Self {
            dims,
            frame_of_reference: frame_of_reference.into(),
            voxels,
        })
    }

    /// Creates a grid with every voxel set to `value`.
    pub fn uniform(
        dims: GridDims,
        frame_of_reference: impl Into<String>,
        value: f64,
    ) -> Result<Self, ModelError> {
        let [ni, nj, nk] = dims;
        let count = ni
            .checked_mul(nj)
            .and_then(|v| v.checked_mul(nk))
            .ok_or(ModelError::GridTooLarge { ni, nj, nk })?;
        Self::new(dims, frame_of_reference, vec![value; count])
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn frame_of_reference(&self) -> &str {
        &self.frame_of_reference
    }

    pub fn voxels(&self) -> &[f64] {
        &self.voxels
    }

    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    /// Returns the same voxel data relabeled into another frame of reference.
    #[must_use]
    pub fn with_frame(mut self, frame_of_reference: impl Into<String>) -> Self {
        self.frame_of_reference = frame_of_reference.into();
        self
    }

    /// True when both grids share voxel dimensions and frame of reference,
    /// making them combinable element-wise.
    pub fn same_geometry(&self, other: &DoseGrid) -> bool {
        self.dims == other.dims && self.frame_of_reference == other.frame_of_reference
    }

    /// Applies `f` to every voxel in place.
    #[must_use]
    pub fn map(mut self, f: impl Fn(f64) -> f64) -> Self {
        for voxel in &mut self.voxels {
            *voxel = f(*voxel);
        }
        self
    }

    /// Mutable access for element-wise combination; shape invariants are
    /// preserved because the length cannot change through a slice.
    pub fn voxels_mut(&mut self) -> &mut [f64] {
        &mut self.voxels
    }

    pub fn min_dose(&self) -> f64 {
        self.voxels.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max_dose(&self) -> f64 {
        self.voxels
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn mean_dose(&self) -> f64 {
        self.voxels.iter().sum::<f64>() / self.voxels.len() as f64
    }
}

/// A spatial registration object mapping grids from one frame of reference
/// into another. Resampling policy belongs to the resolver that applies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub source_frame: String,
    pub target_frame: String,
}

impl Registration {
    pub fn new(source_frame: impl Into<String>, target_frame: impl Into<String>) -> Self {
        Self {
            source_frame: source_frame.into(),
            target_frame: target_frame.into(),
        }
    }
}
