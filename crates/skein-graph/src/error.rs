//! Error types for the graph crate.

use thiserror::Error;

/// Errors that can occur when constructing or mutating graph structures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// A vertex id is outside the graph's vertex range.
    #[error("vertex {vertex} out of range for graph on {n} vertices")]
    InvalidVertex {
        /// The offending vertex id.
        vertex: usize,
        /// Number of vertices in the graph.
        n: usize,
    },

    /// An ordering has the wrong length for its graph.
    #[error("ordering of length {len} does not cover {n} vertices")]
    OrderingLength {
        /// Length of the supplied ordering.
        len: usize,
        /// Number of vertices in the graph.
        n: usize,
    },

    /// An ordering is not a permutation of the vertex set.
    #[error("ordering is not a permutation: vertex {vertex} appears more than once")]
    NotAPermutation {
        /// A vertex that appears more than once.
        vertex: usize,
    },
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
