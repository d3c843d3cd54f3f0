use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("dose grid dimensions {ni}x{nj}x{nk} require {expected} voxels, got {actual}")]
    GridShape {
        ni: usize,
        nj: usize,
        nk: usize,
        expected: usize,
        actual: usize,
    },
    #[error("dose grid has no voxels")]
    EmptyGrid,
    #[error("dose grid dimensions {ni}x{nj}x{nk} overflow the addressable voxel count")]
    GridTooLarge { ni: usize, nj: usize, nk: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
