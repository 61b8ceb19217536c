//! Error types for virtual hardware placement.

use thiserror::Error;

/// Errors that can occur while placing a program on virtual hardware.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlaceError {
    /// The program does not fit the hardware's slot capacity.
    #[error("program needs {required} slots but the hardware provides {available}")]
    InsufficientCapacity {
        /// Slots the program would occupy.
        required: usize,
        /// Slots the hardware offers on the violated side.
        available: usize,
    },
}

/// Result type for placement operations.
pub type PlaceResult<T> = Result<T, PlaceError>;
