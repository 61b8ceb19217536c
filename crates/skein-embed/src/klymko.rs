//! Klymko clique embedding for Chimera grids.
//!
//! The degenerate case of the OCT construction where all but two vertices
//! form the transversal: vertices `0..n-2` are duplicated on both shores,
//! the last two vertices take one shore each.

use skein_graph::{Chimera, Embedding};

use crate::oct::common::embed_bipartition;

/// Compute the Klymko embedding of `K_n`, or `None` when a shore of
/// `n - 1` vertices does not fit the grid.
pub fn compute_klymko(chimera: &Chimera, n: usize) -> Option<Embedding> {
    let side = if n >= 2 { n - 1 } else { n };
    if side.div_ceil(chimera.c()) > chimera.m().min(chimera.n()) {
        return None;
    }

    let mut left: Vec<usize>;
    let mut right: Vec<usize>;
    if n >= 2 {
        left = (0..n - 2).collect();
        right = left.clone();
        left.push(n - 2);
        right.push(n - 1);
    } else {
        left = (0..n).collect();
        right = left.clone();
    }

    let mut phi = Embedding::new(chimera.num_vertices(), n);
    embed_bipartition(chimera, &left, &right, &mut phi);
    Some(phi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skein_graph::Hardware;

    #[test]
    fn test_klymko_rejects_oversized_clique() {
        // K6 needs shores of 5 > c * min(m, n) = 4.
        assert!(compute_klymko(&Chimera::new(2, 2, 2), 6).is_none());
        assert!(compute_klymko(&Chimera::new(2, 2, 2), 5).is_some());
    }

    #[test]
    fn test_klymko_realizes_clique_edges() {
        let chimera = Chimera::new(4, 2, 2);
        let hardware = Hardware::chimera(&chimera);
        let n = 4;
        let phi = compute_klymko(&chimera, n).expect("K4 fits");

        for bag in 0..n {
            assert!(!phi.is_bag_empty(bag));
        }
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
