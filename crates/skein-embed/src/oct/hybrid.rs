//! Hybrid OCT: greedy approximation feeding the exact minimizer.
//!
//! The fast heuristic pins down a (possibly oversized) OCT set; its
//! complement is known bipartite, so the exact minimize search can skip that
//! whole prefix and run with an effective parameter of only the
//! approximation's size.

use rand::Rng;
use rustc_hash::FxHashSet;
use tracing::debug;

use skein_graph::Graph;

use crate::error::EmbedResult;
use crate::oct::exact::{ExactOctOptions, oct_embed_minimize};
use crate::oct::fast::{FastOctOptions, compute_fast_oct};

/// Run the fast heuristic, move its OCT set to the back of the program's
/// ordering, and minimize from there.
///
/// Returns the empty solution right away when the approximation is already
/// empty (the program is bipartite as seen by the heuristic).
pub fn compute_hybrid_oct<R: Rng>(
    program: &mut Graph,
    fast_options: &FastOctOptions,
    exact_options: &ExactOctOptions,
    rng: &mut R,
) -> EmbedResult<Option<Vec<usize>>> {
    let approximation = compute_fast_oct(program, fast_options, rng);
    if approximation.is_empty() {
        return Ok(Some(Vec::new()));
    }

    // Stable reorder: the known-bipartite complement keeps its relative
    // order up front, the approximate OCT vertices sort last.
    let in_approximation: FxHashSet<usize> = approximation.iter().copied().collect();
    let mut reordered: Vec<usize> = program
        .ordering()
        .iter()
        .copied()
        .filter(|v| !in_approximation.contains(v))
        .collect();
    reordered.extend(approximation.iter().copied());
    program.install_ordering(&reordered)?;

    let starting_index = program.n() - approximation.len();
    debug!(
        approximation = approximation.len(),
        starting_index, "handing off to exact minimize"
    );
    oct_embed_minimize(program, starting_index, exact_options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oct::common::verify_solution;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_hybrid_on_bipartite_graph() {
        let mut g = Graph::new(6);
        for v in 0..6 {
            g.connect(v, (v + 1) % 6).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(9);
        let solution =
            compute_hybrid_oct(&mut g, &FastOctOptions::default(), &ExactOctOptions::default(), &mut rng)
                .unwrap()
                .expect("search completes");
        assert!(verify_solution(&g, &solution));
    }

    #[test]
    fn test_hybrid_finds_minimum_on_wheel() {
        // Odd wheel: hub 0 over a 5-cycle. The fast pass overshoots easily;
        // the exact tail must come back down to a verified solution no
        // larger than the approximation.
        let mut g = Graph::new(6);
        for v in 1..6 {
            g.connect(0, v).unwrap();
            let next = if v == 5 { 1 } else { v + 1 };
            g.connect(v, next).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(13);
        let approximation =
            compute_fast_oct(&g, &FastOctOptions::default(), &mut rng.clone());

        let solution =
            compute_hybrid_oct(&mut g, &FastOctOptions::default(), &ExactOctOptions::default(), &mut rng)
                .unwrap()
                .expect("search completes");
        assert!(verify_solution(&g, &solution));
        assert!(solution.len() <= approximation.len().max(2));
        // Ordering is still a permutation after the reorder.
        let mut sorted = g.ordering().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..6).collect::<Vec<_>>());
    }
}
