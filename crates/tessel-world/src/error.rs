use std::sync::PoisonError;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("world size mismatch: grid is {expected:?}, caller passed {found:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("buffer holds {found} cells, expected {expected}")]
    BufferSize { expected: usize, found: usize },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("grid dimensions {width}x{height} overflow")]
    Dimensions { width: usize, height: usize },

    #[error("failed to allocate storage for {cells} cells")]
    Allocation { cells: usize },

    #[error("world lock poisoned")]
    Poisoned,
}

pub type GridResult<T> = Result<T, GridError>;

impl<T> From<PoisonError<T>> for GridError {
    fn from(_: PoisonError<T>) -> Self {
        GridError::Poisoned
    }
}
