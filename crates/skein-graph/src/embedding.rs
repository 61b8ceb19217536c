//! Minor-embedding maps from program vertices to hardware vertex sets.

/// A minor embedding: each program vertex ("bag") maps to a set of hardware
/// vertices.
///
/// Backed by a flat boolean matrix `phi[bag][vertex]` with `h_n` bags over
/// `g_n` hardware vertices. No invariant is imposed beyond set membership;
/// overlap accounting lives in [`CmrEmbedding`].
///
/// Accessors panic on out-of-range bag or vertex ids.
#[derive(Debug, Clone)]
pub struct Embedding {
    phi: Vec<bool>,
    g_n: usize,
    h_n: usize,
}

impl Embedding {
    /// Create an empty embedding of `h_n` bags over `g_n` hardware vertices.
    pub fn new(g_n: usize, h_n: usize) -> Self {
        Self {
            phi: vec![false; g_n * h_n],
            g_n,
            h_n,
        }
    }

    /// Number of hardware vertices.
    #[inline]
    pub fn hardware_n(&self) -> usize {
        self.g_n
    }

    /// Number of bags (program vertices).
    #[inline]
    pub fn bags(&self) -> usize {
        self.h_n
    }

    #[inline]
    fn index(&self, bag: usize, vertex: usize) -> usize {
        assert!(bag < self.h_n, "bag out of range");
        assert!(vertex < self.g_n, "hardware vertex out of range");
        bag * self.g_n + vertex
    }

    /// Add `vertex` to `bag`. Idempotent.
    pub fn add_vertex(&mut self, bag: usize, vertex: usize) {
        let index = self.index(bag, vertex);
        self.phi[index] = true;
    }

    /// Remove `vertex` from `bag`. Idempotent.
    pub fn remove_vertex(&mut self, bag: usize, vertex: usize) {
        let index = self.index(bag, vertex);
        self.phi[index] = false;
    }

    /// Whether `bag` contains `vertex`.
    #[inline]
    pub fn contains(&self, bag: usize, vertex: usize) -> bool {
        self.phi[self.index(bag, vertex)]
    }

    /// Whether `bag` is empty.
    pub fn is_bag_empty(&self, bag: usize) -> bool {
        self.bag_vertices(bag).next().is_none()
    }

    /// Whether every bag is empty.
    pub fn is_empty(&self) -> bool {
        self.phi.iter().all(|&set| !set)
    }

    /// Iterate over the hardware vertices in `bag`.
    pub fn bag_vertices(&self, bag: usize) -> impl Iterator<Item = usize> + '_ {
        assert!(bag < self.h_n, "bag out of range");
        self.phi[bag * self.g_n..(bag + 1) * self.g_n]
            .iter()
            .enumerate()
            .filter_map(|(vertex, &set)| set.then_some(vertex))
    }

    /// Empty out `bag`.
    pub fn clear_bag(&mut self, bag: usize) {
        assert!(bag < self.h_n, "bag out of range");
        self.phi[bag * self.g_n..(bag + 1) * self.g_n].fill(false);
    }

    /// Empty out every bag.
    pub fn clear(&mut self) {
        self.phi.fill(false);
    }

    /// Total number of hardware vertices used, counting multiplicity across
    /// bags.
    pub fn qubits_used(&self) -> usize {
        self.phi.iter().filter(|&&set| set).count()
    }
}

/// An embedding with per-hardware-vertex occupancy counts, as maintained by
/// the CMR heuristic.
///
/// Tracks how many bags each hardware vertex currently belongs to and the
/// running total of set entries, so the CMR stage metrics (`max_occupancy`,
/// `qubits_used`) are O(1)-amortized instead of full rescans. The embedding
/// is *valid* — a proper, non-overlapping minor embedding — when no hardware
/// vertex belongs to more than one bag.
#[derive(Debug, Clone)]
pub struct CmrEmbedding {
    phi: Embedding,
    occupancy: Vec<usize>,
    qubits_used: usize,
}

impl CmrEmbedding {
    /// Create an empty occupancy-counted embedding.
    pub fn new(g_n: usize, h_n: usize) -> Self {
        Self {
            phi: Embedding::new(g_n, h_n),
            occupancy: vec![0; g_n],
            qubits_used: 0,
        }
    }

    /// The underlying embedding.
    #[inline]
    pub fn embedding(&self) -> &Embedding {
        &self.phi
    }

    /// Unwrap into the plain embedding.
    pub fn into_embedding(self) -> Embedding {
        self.phi
    }

    /// Add `vertex` to `bag`, updating occupancy. Idempotent.
    pub fn add_vertex(&mut self, bag: usize, vertex: usize) {
        if !self.phi.contains(bag, vertex) {
            self.phi.add_vertex(bag, vertex);
            self.occupancy[vertex] += 1;
            self.qubits_used += 1;
        }
    }

    /// Remove `vertex` from `bag`, updating occupancy. Idempotent.
    pub fn remove_vertex(&mut self, bag: usize, vertex: usize) {
        if self.phi.contains(bag, vertex) {
            self.phi.remove_vertex(bag, vertex);
            self.occupancy[vertex] -= 1;
            self.qubits_used -= 1;
        }
    }

    /// Whether `bag` contains `vertex`.
    #[inline]
    pub fn contains(&self, bag: usize, vertex: usize) -> bool {
        self.phi.contains(bag, vertex)
    }

    /// Whether `bag` is empty.
    pub fn is_bag_empty(&self, bag: usize) -> bool {
        self.phi.is_bag_empty(bag)
    }

    /// Empty out `bag`, updating occupancy.
    pub fn clear_bag(&mut self, bag: usize) {
        for vertex in 0..self.phi.hardware_n() {
            self.remove_vertex(bag, vertex);
        }
    }

    /// Empty out every bag.
    pub fn clear(&mut self) {
        for bag in 0..self.phi.bags() {
            self.clear_bag(bag);
        }
    }

    /// Number of bags `vertex` currently belongs to.
    #[inline]
    pub fn occupancy(&self, vertex: usize) -> usize {
        self.occupancy[vertex]
    }

    /// Largest occupancy over all hardware vertices.
    pub fn max_occupancy(&self) -> usize {
        self.occupancy.iter().copied().max().unwrap_or(0)
    }

    /// Total set entries across all bags.
    #[inline]
    pub fn qubits_used(&self) -> usize {
        self.qubits_used
    }

    /// Whether no hardware vertex belongs to more than one bag.
    pub fn is_valid(&self) -> bool {
        self.occupancy.iter().all(|&count| count <= 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_membership() {
        let mut phi = Embedding::new(6, 3);
        assert!(phi.is_empty());

        phi.add_vertex(1, 4);
        phi.add_vertex(1, 2);
        assert!(phi.contains(1, 4));
        assert!(!phi.contains(0, 4));
        assert!(!phi.is_bag_empty(1));
        assert_eq!(phi.bag_vertices(1).collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(phi.qubits_used(), 2);

        phi.clear_bag(1);
        assert!(phi.is_empty());
    }

    #[test]
    fn test_cmr_embedding_occupancy() {
        let mut phi = CmrEmbedding::new(4, 3);
        phi.add_vertex(0, 1);
        phi.add_vertex(1, 1);
        phi.add_vertex(2, 3);

        assert_eq!(phi.occupancy(1), 2);
        assert_eq!(phi.max_occupancy(), 2);
        assert_eq!(phi.qubits_used(), 3);
        assert!(!phi.is_valid());

        phi.remove_vertex(1, 1);
        assert!(phi.is_valid());
        assert_eq!(phi.qubits_used(), 2);
    }

    #[test]
    fn test_cmr_add_is_idempotent() {
        let mut phi = CmrEmbedding::new(4, 2);
        phi.add_vertex(0, 2);
        phi.add_vertex(0, 2);
        assert_eq!(phi.occupancy(2), 1);
        assert_eq!(phi.qubits_used(), 1);
    }

    #[test]
    fn test_cmr_clear_resets_counters() {
        let mut phi = CmrEmbedding::new(5, 2);
        phi.add_vertex(0, 0);
        phi.add_vertex(0, 1);
        phi.add_vertex(1, 1);
        phi.clear();
        assert!(phi.embedding().is_empty());
        assert_eq!(phi.qubits_used(), 0);
        assert_eq!(phi.max_occupancy(), 0);
        assert!(phi.is_valid());
    }
}
