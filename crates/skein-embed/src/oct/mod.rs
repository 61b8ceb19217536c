//! Odd-Cycle-Transversal decomposition family.
//!
//! Three strategies produce an OCT vertex set: the exact
//! iterative-compression searches ([`exact`]), the greedy 2-peel heuristic
//! ([`fast`]), and their composition ([`hybrid`]). The [`common`] module
//! holds the shared primitives (separator, bipartitions, verification) and
//! the geometric Chimera construction applied to a finished decomposition.

pub mod common;
pub mod exact;
pub mod fast;
pub mod hybrid;
