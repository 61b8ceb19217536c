//! The CMR randomized minor-embedding heuristic.
//!
//! Embeds a program graph into an arbitrary hardware graph by growing one
//! vertex model ("bag") per program vertex out of weighted shortest paths.
//! Hardware vertices already claimed by other bags carry exponentially
//! inflated weights, so successive stages steer bags apart until every
//! hardware vertex belongs to at most one bag — or until the stage metrics
//! stop improving, in which case the attempt has failed and the caller
//! reshuffles and retries.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rand::Rng;
use tracing::{debug, trace};

use skein_graph::{CmrEmbedding, Graph, Hardware};

/// Tuning knobs for the CMR heuristic.
#[derive(Debug, Clone)]
pub struct CmrOptions {
    /// Number of reshuffled retries after the first failed attempt.
    pub tries: usize,
}

impl Default for CmrOptions {
    fn default() -> Self {
        Self { tries: 20 }
    }
}

/// Run the CMR heuristic with restarts.
///
/// Shuffles the program's vertex ordering (the bag processing sequence)
/// before every attempt. Returns the first valid embedding found, or an
/// empty embedding once the restart budget is exhausted.
pub fn compute_cmr<R: Rng>(
    hardware: &Hardware,
    program: &mut Graph,
    options: &CmrOptions,
    rng: &mut R,
) -> CmrEmbedding {
    let mut phi = CmrEmbedding::new(hardware.n(), program.n());

    for attempt in 0..=options.tries {
        program.shuffle_ordering(rng);
        phi.clear();
        if find_minor_embedding(hardware, program, &mut phi, rng) {
            debug!(
                attempt,
                qubits_used = phi.qubits_used(),
                "found valid minor embedding"
            );
            return phi;
        }
        trace!(attempt, "attempt failed, reshuffling");
    }

    debug!(tries = options.tries, "restart budget exhausted");
    phi.clear();
    phi
}

/// A single CMR attempt: iterate stages until neither metric improves.
///
/// Stage metrics are the maximum occupancy over hardware vertices and the
/// total qubits used; both are monotone under the contention weighting, so
/// the loop terminates. At least two full stages always run. Returns whether
/// the resulting embedding is valid (bags pairwise disjoint).
pub fn find_minor_embedding<R: Rng>(
    hardware: &Hardware,
    program: &Graph,
    phi: &mut CmrEmbedding,
    rng: &mut R,
) -> bool {
    let g = hardware.graph();
    let mut weight = vec![0u64; g.n()];

    let mut old_metrics = (usize::MAX, usize::MAX);
    let mut new_metrics = (usize::MAX, usize::MAX);
    let mut stage = 1usize;

    while stage <= 2 || old_metrics.0 > new_metrics.0 || old_metrics.1 > new_metrics.1 {
        old_metrics = new_metrics;

        for &bag in program.ordering() {
            phi.clear_bag(bag);
            for vertex in g.vertices() {
                weight[vertex] = contention_weight(g.n(), phi, bag, vertex);
            }
            find_minimal_vertex_model(g, program, phi, &weight, bag, rng);
        }

        new_metrics = (phi.max_occupancy(), phi.qubits_used());
        debug!(
            stage,
            max_occupancy = new_metrics.0,
            qubits_used = new_metrics.1,
            "stage complete"
        );
        stage += 1;
    }

    phi.is_valid()
}

/// Contention weight of a hardware vertex while recomputing `bag`.
///
/// `|V(G)|` raised to the number of *other* bags the vertex belongs to:
/// membership in the bag under recomputation is free, unclaimed vertices
/// cost 1, and each additional claim multiplies the cost by the vertex
/// count. Saturates instead of overflowing on heavily contended vertices.
fn contention_weight(g_n: usize, phi: &CmrEmbedding, bag: usize, vertex: usize) -> u64 {
    let mut exponent = phi.occupancy(vertex);
    if phi.contains(bag, vertex) {
        exponent -= 1;
    }
    (g_n as u64).saturating_pow(exponent as u32)
}

/// Recompute the vertex model for `current_bag`.
///
/// With no populated neighbor bag the model bootstraps from a uniformly
/// random hardware vertex. Otherwise every hardware vertex is scored as a
/// candidate root by the sum, over populated neighbor bags, of its cheapest
/// weighted route into that bag; the winning root joins the bag together
/// with the interior vertices of each route (the destination, already owned
/// by the neighbor bag, stays out so bags only touch through edges).
fn find_minimal_vertex_model<R: Rng>(
    g: &Graph,
    program: &Graph,
    phi: &mut CmrEmbedding,
    weight: &[u64],
    current_bag: usize,
    rng: &mut R,
) {
    let populated: Vec<usize> = program
        .vertices()
        .filter(|&j| program.has_edge(current_bag, j) && !phi.is_bag_empty(j))
        .collect();

    if populated.is_empty() {
        let root = rng.gen_range(0..g.n());
        trace!(bag = current_bag, root, "bootstrapping from random root");
        phi.add_vertex(current_bag, root);
        return;
    }

    let mut best: Option<(u64, usize)> = None;
    for candidate in g.vertices() {
        let needs_routing = populated.iter().any(|&j| !phi.contains(j, candidate));
        let routed = if needs_routing {
            Some(dijkstra(g, weight, candidate))
        } else {
            None
        };

        let mut total: u64 = 0;
        for &j in &populated {
            let cost = if phi.contains(j, candidate) {
                weight[candidate]
            } else {
                let (distance, _) = routed.as_ref().expect("routing ran for non-member");
                closest_member(phi, j, distance).0
            };
            total = total.saturating_add(cost);
        }

        if best.is_none_or(|(score, _)| total < score) {
            best = Some((total, candidate));
        }
    }

    let (_, root) = best.expect("hardware graph is non-empty");
    phi.add_vertex(current_bag, root);

    // Re-derive the shortest-path tree from the winning root and splice the
    // interior of each route into the bag.
    let (distance, parent) = dijkstra(g, weight, root);
    for &j in &populated {
        if phi.contains(j, root) {
            continue;
        }
        let (_, closest) = closest_member(phi, j, &distance);
        let Some(closest) = closest else {
            // Neighbor bag unreachable from the root; the attempt will fail
            // validity, but there is nothing to route here.
            continue;
        };
        let mut current = parent[closest];
        while current != usize::MAX && current != root {
            phi.add_vertex(current_bag, current);
            current = parent[current];
        }
    }

    trace!(
        bag = current_bag,
        size = phi.embedding().bag_vertices(current_bag).count(),
        "vertex model updated"
    );
}

/// Weighted single-source shortest paths with tail weights.
///
/// Relaxation uses `dist[u] + w(u)`: a path is charged for every vertex it
/// leaves, so the returned distance covers the source and all interior
/// vertices but never the destination. That keeps members of the target bag
/// free of charge, as the vertex-model costing requires.
fn dijkstra(g: &Graph, weight: &[u64], source: usize) -> (Vec<u64>, Vec<usize>) {
    let mut distance = vec![u64::MAX; g.n()];
    let mut parent = vec![usize::MAX; g.n()];
    let mut heap = BinaryHeap::new();

    distance[source] = 0;
    heap.push(Reverse((0u64, source)));

    while let Some(Reverse((d, u))) = heap.pop() {
        if d > distance[u] {
            continue;
        }
        let step = d.saturating_add(weight[u]);
        for v in g.vertices() {
            if g.has_edge(u, v) && step < distance[v] {
                distance[v] = step;
                parent[v] = u;
                heap.push(Reverse((step, v)));
            }
        }
    }

    (distance, parent)
}

/// Closest member of `bag` under the given distances, if any is reachable.
fn closest_member(phi: &CmrEmbedding, bag: usize, distance: &[u64]) -> (u64, Option<usize>) {
    let mut best = (u64::MAX, None);
    for vertex in phi.embedding().bag_vertices(bag) {
        if distance[vertex] < best.0 {
            best = (distance[vertex], Some(vertex));
        }
    }
    best
}
