//! Skein embedding algorithms
//!
//! This crate implements the minor-embedding and decomposition algorithms of
//! the skein stack: mapping an arbitrary program graph onto sparse Chimera
//! quantum-annealing hardware so that every program vertex becomes a
//! connected, disjoint set of physical qubits.
//!
//! # Overview
//!
//! ```text
//! Program graph
//!       |
//!       +-- CMR ------------------> CmrEmbedding (any hardware graph)
//!       |
//!       +-- OCT exact/fast/hybrid -> OCT vertex set
//!       |         |
//!       |         +-> skein-place VirtualHardware -> Embedding (Chimera)
//!       |         +-> embed_oct_decomposition ----> Embedding (Chimera)
//!       |
//!       +-- TRIAD / Klymko -------> Embedding (complete programs)
//! ```
//!
//! Two routes exist: the [`cmr`] heuristic embeds directly into any hardware
//! graph by weighted Steiner routing with restarts, while the [`oct`] family
//! first reduces the program to near-bipartite form and then lays the
//! decomposition out geometrically. [`triad`] and [`klymko`] are closed-form
//! layouts for complete programs. The [`EmbeddingAlgorithm`] enum names all
//! strategies for driver dispatch.
//!
//! # Example: CMR on matching hardware
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use skein_embed::cmr::{CmrOptions, compute_cmr};
//! use skein_graph::{Graph, Hardware};
//!
//! let mut program = Graph::new(3);
//! program.connect(0, 1).unwrap();
//! program.connect(1, 2).unwrap();
//! program.connect(0, 2).unwrap();
//!
//! // Hardware identical to the program: the identity embedding exists.
//! let hardware = Hardware::new(program.clone(), 1);
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let phi = compute_cmr(&hardware, &mut program, &CmrOptions::default(), &mut rng);
//! assert!(phi.is_valid());
//! assert_eq!(phi.qubits_used(), 3);
//! ```
//!
//! # Example: exact OCT on a triangle
//!
//! ```rust
//! use skein_embed::oct::common::verify_solution;
//! use skein_embed::oct::exact::{ExactOctOptions, oct_embed_parameterized};
//! use skein_graph::Graph;
//!
//! let mut program = Graph::new(3);
//! program.connect(0, 1).unwrap();
//! program.connect(1, 2).unwrap();
//! program.connect(0, 2).unwrap();
//!
//! let options = ExactOctOptions::default();
//! let solution = oct_embed_parameterized(&program, 1, &options)
//!     .unwrap()
//!     .expect("a triangle has an OCT of size 1");
//! assert!(verify_solution(&program, &solution));
//! ```

pub mod cmr;
pub mod error;
pub mod klymko;
pub mod oct;
pub mod strategy;
pub mod triad;

pub use cmr::{CmrOptions, compute_cmr, find_minor_embedding};
pub use error::{EmbedError, EmbedResult};
pub use klymko::compute_klymko;
pub use oct::exact::{ExactOctOptions, oct_embed_minimize, oct_embed_parameterized};
pub use oct::fast::{FastOctOptions, compute_fast_oct};
pub use oct::hybrid::compute_hybrid_oct;
pub use strategy::EmbeddingAlgorithm;
pub use triad::compute_triad;
