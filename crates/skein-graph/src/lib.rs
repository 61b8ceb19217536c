//! Skein graph and embedding data structures
//!
//! This crate provides the shared vocabulary of the skein minor-embedding
//! stack: program and hardware graphs, Chimera topology parameters, and the
//! embedding maps produced by the algorithms in `skein-embed` and
//! `skein-place`.
//!
//! # Core types
//!
//! - [`Graph`]: flat adjacency-matrix graph carrying a mutable vertex
//!   *ordering* (a permutation of the vertex set) that algorithms consume as
//!   their processing sequence
//! - [`Hardware`]: a connectivity [`Graph`] plus its diameter, with a
//!   [`Hardware::chimera`] constructor that materializes a Chimera grid
//! - [`Chimera`]: the `(c, m, n)` unit-cell grid parameters
//! - [`Embedding`]: bag -> hardware-vertex-set membership matrix
//! - [`CmrEmbedding`]: an [`Embedding`] with occupancy counts per hardware
//!   vertex and the validity predicate of a proper minor embedding
//!
//! # Example
//!
//! ```rust
//! use skein_graph::{Chimera, Graph, Hardware};
//!
//! // A triangle program graph.
//! let mut program = Graph::new(3);
//! program.connect(0, 1).unwrap();
//! program.connect(1, 2).unwrap();
//! program.connect(0, 2).unwrap();
//!
//! // A 2x2 grid of K_{4,4} cells.
//! let hardware = Hardware::chimera(&Chimera::new(4, 2, 2));
//! assert_eq!(hardware.n(), 32);
//! ```

pub mod chimera;
pub mod embedding;
pub mod error;
pub mod graph;
pub mod hardware;

pub use chimera::Chimera;
pub use embedding::{CmrEmbedding, Embedding};
pub use error::{GraphError, GraphResult};
pub use graph::Graph;
pub use hardware::Hardware;
