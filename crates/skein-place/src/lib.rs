//! Skein virtual hardware placement
//!
//! This crate turns an OCT decomposition (or a native clique program) into a
//! concrete Chimera embedding. Placement happens in three stages on an
//! idealized bipartite slot model:
//!
//! 1. **embed** — assign program vertices to slots on two partites and wire
//!    the edges the evaluation needs to see
//! 2. **reduce** — optional best-improvement 2-exchange local search that
//!    shrinks the total cell span (a linear-arrangement objective)
//! 3. **embed_in_chimera** — deterministic stride arithmetic from slot
//!    positions and spans to physical qubit ids
//!
//! # Example
//!
//! ```rust
//! use skein_graph::{Chimera, Graph};
//! use skein_place::{EmbeddingScheme, ReductionScheme, VirtualHardware};
//!
//! // A path of five vertices is already bipartite: empty OCT set.
//! let mut program = Graph::new(5);
//! for v in 0..4 {
//!     program.connect(v, v + 1).unwrap();
//! }
//!
//! let chimera = Chimera::new(2, 2, 2);
//! let mut vh = VirtualHardware::new(program.n(), chimera.c());
//! vh.embed(&program, &chimera, EmbeddingScheme::Oct, ReductionScheme::Full, &[])
//!     .unwrap();
//! vh.reduce();
//!
//! let phi = vh.embed_in_chimera(&chimera);
//! assert_eq!(phi.qubits_used(), vh.qubits_used());
//! ```

pub mod error;
pub mod virtual_hardware;

pub use error::{PlaceError, PlaceResult};
pub use virtual_hardware::{EmbeddingScheme, ReductionScheme, VirtualHardware};
