//! Chimera topology parameters.

use serde::{Deserialize, Serialize};

/// Parameters of a Chimera hardware grid.
///
/// A Chimera graph is an `m x n` grid of unit cells, each a complete
/// bipartite graph `K_{c,c}`. Left-shore qubits of a cell are tied to the
/// cells above and below; right-shore qubits to the cells left and right.
/// Qubit ids are cell-major: cell `(row, col)` owns the id block
/// `(row * n + col) * 2c .. +2c`, left shore first.
///
/// This type carries only the dimensions; the materialized adjacency lives
/// in [`Hardware::chimera`](crate::Hardware::chimera).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chimera {
    c: usize,
    m: usize,
    n: usize,
}

impl Chimera {
    /// Create a Chimera description with cell size `c`, `m` rows and `n`
    /// columns of cells.
    pub fn new(c: usize, m: usize, n: usize) -> Self {
        Self { c, m, n }
    }

    /// Qubits per cell shore.
    #[inline]
    pub fn c(&self) -> usize {
        self.c
    }

    /// Number of cell rows.
    #[inline]
    pub fn m(&self) -> usize {
        self.m
    }

    /// Number of cell columns.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total number of qubits, `2 * c * m * n`.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        2 * self.c * self.m * self.n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_count() {
        assert_eq!(Chimera::new(4, 2, 3).num_vertices(), 48);
        assert_eq!(Chimera::new(2, 1, 1).num_vertices(), 4);
        assert_eq!(Chimera::new(4, 16, 16).num_vertices(), 2048);
    }
}
