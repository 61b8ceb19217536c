//! Fast greedy OCT approximation.
//!
//! Peels two disjoint independent sets off the graph by repeated
//! minimum-degree selection; whatever neither peel claims is the OCT
//! approximation. No quality guarantee — this is a cheap upper bound used
//! on its own or as the preprocessing step of the hybrid algorithm.

use rand::Rng;
use rustc_hash::FxHashSet;
use tracing::debug;

use skein_graph::Graph;

/// Tuning knobs for the fast OCT heuristic.
#[derive(Debug, Clone)]
pub struct FastOctOptions {
    /// Number of full 2-pass peels to run; the smallest OCT set wins.
    pub repeats: usize,
}

impl Default for FastOctOptions {
    fn default() -> Self {
        Self { repeats: 10 }
    }
}

/// Repeat the 2-pass peel and keep the smallest OCT set found.
pub fn compute_fast_oct<R: Rng>(g: &Graph, options: &FastOctOptions, rng: &mut R) -> Vec<usize> {
    let mut minimum: Vec<usize> = Vec::new();
    let mut first = true;

    for repeat in 0..options.repeats {
        let solution = fast_oct(g, rng);
        if first || solution.len() < minimum.len() {
            minimum = solution;
            first = false;
        }
        debug!(repeat, size = minimum.len(), "fast OCT repeat done");
    }
    minimum
}

/// One 2-pass peel: remove two greedy independent sets, return the rest.
pub fn fast_oct<R: Rng>(g: &Graph, rng: &mut R) -> Vec<usize> {
    let mut solution: Vec<usize> = g.vertices().collect();
    for _ in 0..2 {
        let partite = greedy_independent_set(g, &solution, rng);
        let claimed: FxHashSet<usize> = partite.into_iter().collect();
        solution.retain(|v| !claimed.contains(v));
    }
    solution
}

/// Greedy independent set over `candidates`.
///
/// Repeatedly selects a uniformly random minimum-degree live vertex, claims
/// it, and removes it together with its neighbors; removing a neighbor
/// decrements the degrees of *its* surviving neighbors so later selections
/// see up-to-date degrees. Degrees count edges in the whole graph, not just
/// among the candidates, matching the peeling order of the second pass.
pub fn greedy_independent_set<R: Rng>(g: &Graph, candidates: &[usize], rng: &mut R) -> Vec<usize> {
    let mut vertices: Vec<usize> = candidates.to_vec();
    let mut degrees: Vec<usize> = g.vertices().map(|u| g.degree(u)).collect();
    let mut removed = vec![false; g.n()];
    let mut independent_set = Vec::new();

    while !vertices.is_empty() {
        let minimum_degree = vertices
            .iter()
            .map(|&u| degrees[u])
            .min()
            .expect("vertex list is non-empty");
        let ties: Vec<usize> = vertices
            .iter()
            .copied()
            .filter(|&u| degrees[u] == minimum_degree)
            .collect();
        let chosen = ties[rng.gen_range(0..ties.len())];

        removed[chosen] = true;
        vertices.retain(|&u| u != chosen);
        independent_set.push(chosen);

        for v in g.vertices() {
            if g.has_edge(chosen, v) && !removed[v] {
                removed[v] = true;
                vertices.retain(|&u| u != v);
                for nbr in g.vertices() {
                    if g.has_edge(v, nbr) && !removed[nbr] {
                        degrees[nbr] -= 1;
                    }
                }
            }
        }
    }
    independent_set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oct::common::{is_independent, verify_solution};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn cycle(n: usize) -> Graph {
        let mut g = Graph::new(n);
        for v in 0..n {
            g.connect(v, (v + 1) % n).unwrap();
        }
        g
    }

    #[test]
    fn test_greedy_set_is_independent() {
        let g = cycle(7);
        let mut rng = StdRng::seed_from_u64(1);
        let candidates: Vec<usize> = g.vertices().collect();
        let set = greedy_independent_set(&g, &candidates, &mut rng);
        assert!(!set.is_empty());
        assert!(is_independent(&g, &set));
    }

    #[test]
    fn test_fast_oct_on_even_cycle_verifies() {
        // Already bipartite; whatever the peels leave over must still
        // verify.
        let g = cycle(8);
        let mut rng = StdRng::seed_from_u64(2);
        let solution = compute_fast_oct(&g, &FastOctOptions { repeats: 5 }, &mut rng);
        assert!(verify_solution(&g, &solution));
    }

    #[test]
    fn test_fast_oct_verifies() {
        // K5: both peels claim one vertex each, leaving an OCT of three.
        let mut g = Graph::new(5);
        for u in 0..5 {
            for v in (u + 1)..5 {
                g.connect(u, v).unwrap();
            }
        }
        let mut rng = StdRng::seed_from_u64(3);
        let solution = compute_fast_oct(&g, &FastOctOptions::default(), &mut rng);
        assert_eq!(solution.len(), 3);
        assert!(verify_solution(&g, &solution));
    }

    #[test]
    fn test_zero_repeats_returns_empty() {
        let g = cycle(5);
        let mut rng = StdRng::seed_from_u64(4);
        let solution = compute_fast_oct(&g, &FastOctOptions { repeats: 0 }, &mut rng);
        assert!(solution.is_empty());
    }
}
