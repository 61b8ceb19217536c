//! End-to-end properties of the OCT decomposition family.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use skein_embed::cmr::{CmrOptions, compute_cmr};
use skein_embed::oct::common::{embed_oct_decomposition, verify_solution};
use skein_embed::oct::exact::{ExactOctOptions, oct_embed_minimize};
use skein_embed::oct::fast::{FastOctOptions, compute_fast_oct};
use skein_embed::oct::hybrid::compute_hybrid_oct;
use skein_graph::{Chimera, Embedding, Graph, Hardware};

fn petersen() -> Graph {
    let mut g = Graph::new(10);
    for v in 0..5 {
        g.connect(v, (v + 1) % 5).unwrap(); // outer cycle
        g.connect(v, v + 5).unwrap(); // spokes
        g.connect(v + 5, (v + 2) % 5 + 5).unwrap(); // inner pentagram
    }
    g
}

/// Every program edge must join two bags that touch through a hardware edge.
fn assert_edges_realized(program: &Graph, chimera: &Chimera, phi: &Embedding) {
    let hardware = Hardware::chimera(chimera);
    for u in program.vertices() {
        for v in program.vertices() {
            if u < v && program.has_edge(u, v) {
                let touching = phi.bag_vertices(u).any(|a| {
                    phi.bag_vertices(v)
                        .any(|b| hardware.graph().has_edge(a, b))
                });
                assert!(touching, "edge ({u}, {v}) not realized");
            }
        }
    }
}

#[test]
fn petersen_hybrid_decomposition_embeds() {
    let mut program = petersen();
    let mut rng = StdRng::seed_from_u64(31);

    let solution = compute_hybrid_oct(
        &mut program,
        &FastOctOptions::default(),
        &ExactOctOptions::default(),
        &mut rng,
    )
    .expect("no deadline configured")
    .expect("search completes");

    // The Petersen graph needs at least 3 removals to become bipartite.
    assert!(solution.len() >= 3);
    assert!(verify_solution(&program, &solution));

    let chimera = Chimera::new(4, 3, 3);
    let mut phi = Embedding::new(chimera.num_vertices(), program.n());
    embed_oct_decomposition(&program, &chimera, &solution, &mut phi);
    assert_edges_realized(&program, &chimera, &phi);
}

#[test]
fn minimize_verifies_on_petersen() {
    let program = petersen();

    let exact = oct_embed_minimize(&program, 0, &ExactOctOptions::default())
        .expect("no deadline configured")
        .expect("search completes");

    assert!(verify_solution(&program, &exact));
    assert!(exact.len() >= 3);
}

fn arb_graph() -> impl Strategy<Value = Graph> {
    (2usize..=9).prop_flat_map(|n| {
        proptest::collection::vec(any::<bool>(), n * (n - 1) / 2).prop_map(move |bits| {
            let mut g = Graph::new(n);
            let mut next = 0;
            for u in 0..n {
                for v in (u + 1)..n {
                    if bits[next] {
                        g.connect(u, v).unwrap();
                    }
                    next += 1;
                }
            }
            g
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fast_oct_always_verifies(g in arb_graph(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let solution = compute_fast_oct(&g, &FastOctOptions { repeats: 3 }, &mut rng);
        prop_assert!(verify_solution(&g, &solution));
    }

    #[test]
    fn minimize_always_verifies(g in arb_graph()) {
        let exact = oct_embed_minimize(&g, 0, &ExactOctOptions::default())
            .expect("no deadline configured");
        if let Some(solution) = exact {
            prop_assert!(verify_solution(&g, &solution));
        }
    }

    #[test]
    fn hybrid_always_verifies(g in arb_graph(), seed in any::<u64>()) {
        let mut g = g;
        let mut rng = StdRng::seed_from_u64(seed);
        let solution = compute_hybrid_oct(
            &mut g,
            &FastOctOptions { repeats: 3 },
            &ExactOctOptions::default(),
            &mut rng,
        )
        .expect("no deadline configured");
        if let Some(solution) = solution {
            prop_assert!(verify_solution(&g, &solution));
        }
    }

    #[test]
    fn cmr_embeddings_are_valid_when_found(seed in any::<u64>()) {
        let mut program = Graph::new(4);
        for v in 0..4 {
            program.connect(v, (v + 1) % 4).unwrap();
        }
        let hardware = Hardware::chimera(&Chimera::new(2, 2, 2));
        let mut rng = StdRng::seed_from_u64(seed);
        let phi = compute_cmr(&hardware, &mut program, &CmrOptions { tries: 5 }, &mut rng);
        if !phi.embedding().is_empty() {
            prop_assert!(phi.is_valid());
        }
    }
}
