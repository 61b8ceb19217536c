//! Adjacency-matrix graph with a mutable processing order.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{GraphError, GraphResult};

/// A graph on `n` vertices backed by a flat boolean adjacency matrix.
///
/// Edges are directed at the storage level; undirected graphs are built by
/// inserting both arcs (see [`connect`](Self::connect)). In addition to the
/// adjacency relation, every graph carries an *ordering*: a permutation of
/// `0..n` that algorithms use as their vertex processing sequence. The
/// ordering starts out as the identity and stays a permutation under
/// [`shuffle_ordering`](Self::shuffle_ordering) and
/// [`install_ordering`](Self::install_ordering); per-slot writes through
/// [`set_ordering`](Self::set_ordering) leave permutation maintenance to the
/// caller.
///
/// Read accessors ([`has_edge`](Self::has_edge), [`ordering`](Self::ordering))
/// panic on out-of-range ids; mutators return [`GraphError::InvalidVertex`]
/// instead.
#[derive(Debug, Clone)]
pub struct Graph {
    n: usize,
    adjacency: Vec<bool>,
    ordering: Vec<usize>,
}

impl Graph {
    /// Create an edgeless graph on `n` vertices with the identity ordering.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            adjacency: vec![false; n * n],
            ordering: (0..n).collect(),
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Iterate over all vertex ids.
    pub fn vertices(&self) -> std::ops::Range<usize> {
        0..self.n
    }

    fn check(&self, vertex: usize) -> GraphResult<()> {
        if vertex < self.n {
            Ok(())
        } else {
            Err(GraphError::InvalidVertex { vertex, n: self.n })
        }
    }

    /// Whether the arc `u -> v` is present.
    ///
    /// # Panics
    ///
    /// Panics if `u` or `v` is out of range.
    #[inline]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        assert!(u < self.n && v < self.n, "vertex out of range");
        self.adjacency[u * self.n + v]
    }

    /// Insert the arc `u -> v`. Idempotent.
    pub fn add_edge(&mut self, u: usize, v: usize) -> GraphResult<()> {
        self.set_edge(u, v, true)
    }

    /// Remove the arc `u -> v`. Idempotent.
    pub fn remove_edge(&mut self, u: usize, v: usize) -> GraphResult<()> {
        self.set_edge(u, v, false)
    }

    /// Set the arc `u -> v` to `present`.
    pub fn set_edge(&mut self, u: usize, v: usize, present: bool) -> GraphResult<()> {
        self.check(u)?;
        self.check(v)?;
        self.adjacency[u * self.n + v] = present;
        Ok(())
    }

    /// Insert both arcs of the undirected edge `{u, v}`.
    pub fn connect(&mut self, u: usize, v: usize) -> GraphResult<()> {
        self.add_edge(u, v)?;
        self.add_edge(v, u)
    }

    /// Out-degree of `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v` is out of range.
    pub fn degree(&self, v: usize) -> usize {
        assert!(v < self.n, "vertex out of range");
        self.adjacency[v * self.n..(v + 1) * self.n]
            .iter()
            .filter(|&&e| e)
            .count()
    }

    /// The current vertex ordering.
    #[inline]
    pub fn ordering(&self) -> &[usize] {
        &self.ordering
    }

    /// Write a single ordering slot.
    ///
    /// The caller is responsible for keeping the ordering a permutation
    /// across a sequence of slot writes (e.g. when rotating a block of
    /// vertices to the back).
    pub fn set_ordering(&mut self, index: usize, vertex: usize) -> GraphResult<()> {
        self.check(vertex)?;
        if index >= self.n {
            return Err(GraphError::InvalidVertex {
                vertex: index,
                n: self.n,
            });
        }
        self.ordering[index] = vertex;
        Ok(())
    }

    /// Replace the whole ordering, validating that it is a permutation.
    pub fn install_ordering(&mut self, ordering: &[usize]) -> GraphResult<()> {
        if ordering.len() != self.n {
            return Err(GraphError::OrderingLength {
                len: ordering.len(),
                n: self.n,
            });
        }
        let mut seen = vec![false; self.n];
        for &vertex in ordering {
            self.check(vertex)?;
            if seen[vertex] {
                return Err(GraphError::NotAPermutation { vertex });
            }
            seen[vertex] = true;
        }
        self.ordering.copy_from_slice(ordering);
        Ok(())
    }

    /// Shuffle the ordering into a uniformly random permutation.
    pub fn shuffle_ordering<R: Rng>(&mut self, rng: &mut R) {
        self.ordering.shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_edges_are_directed_at_storage_level() {
        let mut g = Graph::new(4);
        g.add_edge(0, 1).unwrap();
        assert!(g.has_edge(0, 1));
        assert!(!g.has_edge(1, 0));

        g.connect(2, 3).unwrap();
        assert!(g.has_edge(2, 3));
        assert!(g.has_edge(3, 2));
    }

    #[test]
    fn test_set_edge_idempotent() {
        let mut g = Graph::new(3);
        g.set_edge(0, 1, true).unwrap();
        g.set_edge(0, 1, true).unwrap();
        assert!(g.has_edge(0, 1));
        g.set_edge(0, 1, false).unwrap();
        assert!(!g.has_edge(0, 1));
    }

    #[test]
    fn test_invalid_vertex_rejected() {
        let mut g = Graph::new(2);
        assert!(matches!(
            g.add_edge(0, 5),
            Err(GraphError::InvalidVertex { vertex: 5, n: 2 })
        ));
    }

    #[test]
    fn test_ordering_starts_as_identity() {
        let g = Graph::new(5);
        assert_eq!(g.ordering(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_install_ordering_validates_permutation() {
        let mut g = Graph::new(3);
        g.install_ordering(&[2, 0, 1]).unwrap();
        assert_eq!(g.ordering(), &[2, 0, 1]);

        assert!(matches!(
            g.install_ordering(&[0, 0, 1]),
            Err(GraphError::NotAPermutation { vertex: 0 })
        ));
        assert!(matches!(
            g.install_ordering(&[0, 1]),
            Err(GraphError::OrderingLength { len: 2, n: 3 })
        ));
    }

    #[test]
    fn test_shuffle_preserves_permutation() {
        let mut g = Graph::new(16);
        let mut rng = StdRng::seed_from_u64(7);
        g.shuffle_ordering(&mut rng);

        let mut sorted: Vec<usize> = g.ordering().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_degree() {
        let mut g = Graph::new(4);
        g.connect(0, 1).unwrap();
        g.connect(0, 2).unwrap();
        assert_eq!(g.degree(0), 2);
        assert_eq!(g.degree(3), 0);
    }

    proptest::proptest! {
        #[test]
        fn shuffle_always_yields_a_permutation(n in 1usize..64, seed in proptest::prelude::any::<u64>()) {
            let mut g = Graph::new(n);
            let mut rng = StdRng::seed_from_u64(seed);
            g.shuffle_ordering(&mut rng);

            let mut sorted = g.ordering().to_vec();
            sorted.sort_unstable();
            proptest::prop_assert_eq!(sorted, (0..n).collect::<Vec<_>>());
        }
    }
}
