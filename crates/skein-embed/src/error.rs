//! Error types for the embedding algorithms.

use std::time::Duration;

use skein_graph::GraphError;
use thiserror::Error;

/// Errors that can occur while running an embedding algorithm.
///
/// Infeasibility is not an error: the restart-based heuristics report it
/// through empty embeddings and the exact searches through `None`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmbedError {
    /// The exact OCT search ran past its caller-supplied deadline.
    #[error("exact OCT search exceeded its deadline after {elapsed:?}")]
    DeadlineExceeded {
        /// Time spent before the search gave up.
        elapsed: Duration,
    },

    /// A graph operation failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Result type for embedding algorithms.
pub type EmbedResult<T> = Result<T, EmbedError>;
