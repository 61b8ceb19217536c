//! Exact OCT via iterative compression.
//!
//! Both searches grow the induced subgraph one ordering vertex at a time and
//! compress the (now oversized) solution after every growth step. The
//! enumeration inside a compression step is the classic `O(3^|S|)` split of
//! the old solution into "stays in the OCT" and two independent sides, with
//! an s–t vertex separator closing each candidate split.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use skein_graph::Graph;

use crate::error::{EmbedError, EmbedResult};
use crate::oct::common::{
    compute_bipartitions, compute_st_sep, is_independent, neighbors_into, split_by_mask,
};

/// Tuning knobs for the exact OCT searches.
#[derive(Debug, Clone, Default)]
pub struct ExactOctOptions {
    /// Abort the split enumeration once this much wall-clock time has
    /// passed. `None` runs to completion regardless of cost.
    pub deadline: Option<Duration>,
}

#[derive(Clone, Copy)]
struct Deadline {
    started: Instant,
    limit: Duration,
}

impl Deadline {
    fn start(options: &ExactOctOptions) -> Option<Self> {
        options.deadline.map(|limit| Self {
            started: Instant::now(),
            limit,
        })
    }

    fn check(deadline: Option<Self>) -> EmbedResult<()> {
        match deadline {
            Some(d) if d.started.elapsed() >= d.limit => Err(EmbedError::DeadlineExceeded {
                elapsed: d.started.elapsed(),
            }),
            _ => Ok(()),
        }
    }
}

/// Search for an OCT of size exactly at most `k` along the graph's ordering.
///
/// Seeds the solution with the first `k` ordering vertices (the next two are
/// trivially bipartite on their own) and compresses after each growth step.
/// Returns `Ok(None)` as soon as one compression fails.
///
/// This is a one-shot, ordering-dependent search, not an exhaustive
/// guarantee: a failure means no OCT of size `k` was found *along this
/// incremental path*, and the caller may retry with a different ordering.
pub fn oct_embed_parameterized(
    g: &Graph,
    k: usize,
    options: &ExactOctOptions,
) -> EmbedResult<Option<Vec<usize>>> {
    let deadline = Deadline::start(options);
    let seed = k.min(g.n());
    let mut current: Vec<usize> = g.ordering()[..seed].to_vec();
    if k >= g.n() {
        return Ok(Some(current));
    }

    for i in (k + 2)..g.n() {
        current.push(g.ordering()[i]);
        match compress_parameterized(g, i + 1, k, &current, deadline)? {
            Some(next) => current = next,
            None => {
                debug!(grown_to = i + 1, k, "compression failed, no OCT of size k");
                return Ok(None);
            }
        }
    }

    debug!(size = current.len(), "parameterized search succeeded");
    Ok(Some(current))
}

/// Search for a smallest OCT along the graph's ordering.
///
/// `starting_index` skips an ordering prefix that is already known to be
/// bipartite (the hybrid algorithm arranges one); pass 0 to search the whole
/// graph. Each compression keeps the smallest `T ∪ separator` it finds, and
/// a growth step whose subgraph is already bipartite resets the running
/// solution to empty.
pub fn oct_embed_minimize(
    g: &Graph,
    starting_index: usize,
    options: &ExactOctOptions,
) -> EmbedResult<Option<Vec<usize>>> {
    if starting_index >= g.n() {
        return Ok(Some(Vec::new()));
    }

    let deadline = Deadline::start(options);
    let mut current = vec![g.ordering()[starting_index]];

    for i in (starting_index + 1)..g.n() {
        current.push(g.ordering()[i]);
        match compress_minimize(g, i + 1, &current, deadline)? {
            Some(next) => current = next,
            None => return Ok(None),
        }
        trace!(grown_to = i + 1, size = current.len(), "growth step done");
    }

    debug!(size = current.len(), "minimize search finished");
    Ok(Some(current))
}

/// One compression step: find a solution of size at most `k` for the induced
/// subgraph on the first `subgraph_n` ordering vertices, given the oversized
/// solution `current`.
fn compress_parameterized(
    g: &Graph,
    subgraph_n: usize,
    k: usize,
    current: &[usize],
    deadline: Option<Deadline>,
) -> EmbedResult<Option<Vec<usize>>> {
    let (bipartite_vertices, a, b) = bipartite_complement(g, subgraph_n, current);

    let outer = 1u128 << current.len();
    for t_mask in 0..outer {
        let (t_set, lr) = split_by_mask(t_mask, current);
        let inner = 1u128 << lr.len();
        for lr_mask in 0..inner {
            Deadline::check(deadline)?;
            let (l, r) = split_by_mask(lr_mask, &lr);
            if !is_independent(g, &l) || !is_independent(g, &r) {
                continue;
            }

            let sep = split_separator(g, subgraph_n, &bipartite_vertices, &a, &b, &l, &r);
            if sep.len() + t_set.len() <= k {
                let mut solution = t_set;
                solution.extend(sep);
                return Ok(Some(solution));
            }
        }
    }
    Ok(None)
}

/// One compression step without a size bound: return the smallest solution
/// found across every split, or empty immediately if the subgraph turns out
/// to be bipartite.
fn compress_minimize(
    g: &Graph,
    subgraph_n: usize,
    current: &[usize],
    deadline: Option<Deadline>,
) -> EmbedResult<Option<Vec<usize>>> {
    let (bipartite_vertices, a, b) = bipartite_complement(g, subgraph_n, current);

    let mut best: Option<Vec<usize>> = None;
    let outer = 1u128 << current.len();
    for t_mask in 0..outer {
        let (t_set, lr) = split_by_mask(t_mask, current);
        let inner = 1u128 << lr.len();
        for lr_mask in 0..inner {
            Deadline::check(deadline)?;
            let (l, r) = split_by_mask(lr_mask, &lr);
            if !is_independent(g, &l) || !is_independent(g, &r) {
                continue;
            }

            let sep = split_separator(g, subgraph_n, &bipartite_vertices, &a, &b, &l, &r);
            let size = sep.len() + t_set.len();
            if size == 0 {
                return Ok(Some(Vec::new()));
            }
            if best.as_ref().is_none_or(|solution| size < solution.len()) {
                let mut solution = t_set.clone();
                solution.extend(sep);
                best = Some(solution);
            }
        }
    }
    Ok(best)
}

/// The non-solution vertices of the subgraph, 2-colored into sides A and B.
fn bipartite_complement(
    g: &Graph,
    subgraph_n: usize,
    current: &[usize],
) -> (Vec<usize>, Vec<usize>, Vec<usize>) {
    let vertices: Vec<usize> = (0..subgraph_n)
        .map(|i| g.ordering()[i])
        .filter(|v| !current.contains(v))
        .collect();
    let (a, b) = compute_bipartitions(g, &vertices);
    (vertices, a, b)
}

/// Separator for one (L, R) split: the conflict groups are AL ∪ BR versus
/// BL ∪ AR, the cross-neighborhoods whose contact would break the
/// two-coloring extended by L and R.
fn split_separator(
    g: &Graph,
    subgraph_n: usize,
    bipartite_vertices: &[usize],
    a: &[usize],
    b: &[usize],
    l: &[usize],
    r: &[usize],
) -> Vec<usize> {
    let mut left_group = Vec::new();
    let mut right_group = Vec::new();
    neighbors_into(g, l, a, &mut left_group); // AL
    neighbors_into(g, r, b, &mut left_group); // BR
    neighbors_into(g, l, b, &mut right_group); // BL
    neighbors_into(g, r, a, &mut right_group); // AR

    compute_st_sep(g, subgraph_n, bipartite_vertices, &left_group, &right_group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oct::common::verify_solution;

    fn cycle(n: usize) -> Graph {
        let mut g = Graph::new(n);
        for v in 0..n {
            g.connect(v, (v + 1) % n).unwrap();
        }
        g
    }

    #[test]
    fn test_triangle_parameterized() {
        let g = cycle(3);
        let options = ExactOctOptions::default();

        let solution = oct_embed_parameterized(&g, 1, &options).unwrap();
        let solution = solution.expect("triangle has an OCT of size 1");
        assert_eq!(solution.len(), 1);
        assert!(verify_solution(&g, &solution));

        assert!(oct_embed_parameterized(&g, 0, &options).unwrap().is_none());
    }

    #[test]
    fn test_four_cycle_minimize_is_empty() {
        let g = cycle(4);
        let solution = oct_embed_minimize(&g, 0, &ExactOctOptions::default())
            .unwrap()
            .expect("search completes");
        assert!(solution.is_empty());
        assert!(verify_solution(&g, &solution));
    }

    #[test]
    fn test_five_cycle_minimize() {
        let g = cycle(5);
        let solution = oct_embed_minimize(&g, 0, &ExactOctOptions::default())
            .unwrap()
            .expect("search completes");
        assert_eq!(solution.len(), 1);
        assert!(verify_solution(&g, &solution));
    }

    #[test]
    fn test_two_triangles_minimize() {
        // Two vertex-disjoint triangles: minimum OCT has one vertex in each.
        let mut g = Graph::new(6);
        for &(u, v) in &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)] {
            g.connect(u, v).unwrap();
        }
        let solution = oct_embed_minimize(&g, 0, &ExactOctOptions::default())
            .unwrap()
            .expect("search completes");
        assert_eq!(solution.len(), 2);
        assert!(verify_solution(&g, &solution));
    }

    #[test]
    fn test_k4_parameterized() {
        // K4 needs two removals to become bipartite.
        let mut g = Graph::new(4);
        for u in 0..4 {
            for v in (u + 1)..4 {
                g.connect(u, v).unwrap();
            }
        }
        let options = ExactOctOptions::default();
        assert!(oct_embed_parameterized(&g, 1, &options).unwrap().is_none());

        let solution = oct_embed_parameterized(&g, 2, &options)
            .unwrap()
            .expect("K4 has an OCT of size 2");
        assert!(solution.len() <= 2);
        assert!(verify_solution(&g, &solution));
    }

    #[test]
    fn test_deadline_zero_trips() {
        let g = cycle(5);
        let options = ExactOctOptions {
            deadline: Some(Duration::ZERO),
        };
        assert!(matches!(
            oct_embed_minimize(&g, 0, &options),
            Err(EmbedError::DeadlineExceeded { .. })
        ));
    }
}
