//! TRIAD clique embedding for Chimera grids.
//!
//! Embeds a complete graph on `n` vertices along the grid diagonal: every
//! bag is an L-shaped chain of one vertical run of left-shore qubits, an
//! inner-cell pivot, and one horizontal run of right-shore qubits. Bag `i`
//! and bag `j` always share a cell where one is on each shore, so every
//! clique edge is realized.

use skein_graph::{Chimera, Embedding};

/// Compute the TRIAD embedding of `K_n`, or `None` when the diagonal does
/// not fit the grid.
pub fn compute_triad(chimera: &Chimera, n: usize) -> Option<Embedding> {
    let limiting_dim = chimera.m().min(chimera.n());
    let cells_needed = n.div_ceil(chimera.c());
    if cells_needed > limiting_dim {
        return None;
    }

    let cell_size = 2 * chimera.c();
    let row_size = chimera.n() * cell_size;
    let mut phi = Embedding::new(chimera.num_vertices(), n);

    for bag in 0..n {
        let diagonal_cell = bag / chimera.c();
        let offset = bag % chimera.c();

        // The two arms meet in the diagonal cell: a left-shore qubit for the
        // vertical run and its right-shore partner for the horizontal run.
        let center_vertical = diagonal_cell * (cell_size + row_size) + offset;
        let center_horizontal = center_vertical + chimera.c();

        let mut vertex = center_vertical;
        phi.add_vertex(bag, vertex);
        for _ in 1..(cells_needed - diagonal_cell) {
            vertex += row_size;
            phi.add_vertex(bag, vertex);
        }

        let mut vertex = center_horizontal;
        phi.add_vertex(bag, vertex);
        for _ in 0..diagonal_cell {
            vertex -= cell_size;
            phi.add_vertex(bag, vertex);
        }
    }

    Some(phi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skein_graph::Hardware;

    #[test]
    fn test_triad_rejects_oversized_clique() {
        assert!(compute_triad(&Chimera::new(4, 2, 2), 9).is_none());
        assert!(compute_triad(&Chimera::new(4, 2, 2), 8).is_some());
    }

    #[test]
    fn test_triad_bags_connected_and_pairwise_adjacent() {
        let chimera = Chimera::new(2, 3, 3);
        let hardware = Hardware::chimera(&chimera);
        let n = 5;
        let phi = compute_triad(&chimera, n).expect("K5 fits a 3x3 grid of c=2");

        // Bags are vertex-disjoint.
        let mut owner = vec![None; chimera.num_vertices()];
        for bag in 0..n {
            for qubit in phi.bag_vertices(bag) {
                assert!(owner[qubit].is_none(), "qubit {qubit} shared");
                owner[qubit] = Some(bag);
            }
        }

        // Every pair of bags touches through a hardware edge.
        for i in 0..n {
            for j in (i + 1)..n {
                let touching = phi.bag_vertices(i).any(|a| {
                    phi.bag_vertices(j)
                        .any(|b| hardware.graph().has_edge(a, b))
                });
                assert!(touching, "bags {i} and {j} not adjacent");
            }
        }
    }
}
