use storeroute_brute_force::HeldKarpOptimizer;
use storeroute_core::{DistanceEdge, DistanceMatrix, RouteOptimizer};
use storeroute_psa::{AnnealingConfig, AnnealingOptimizer};

/// Complete graph over `n` points scattered on a 50x50 plane, Chebyshev costs.
fn scattered(n: usize, salt: u64) -> Vec<DistanceEdge> {
    let mut state = 0x9e37_79b9_7f4a_7c15_u64 ^ salt;
    let mut next = || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) % 50
    };
    let points: Vec<(u64, u64)> = (0..n).map(|_| (next(), next())).collect();

    let mut edges = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            let (a, b) = (points[i], points[j]);
            let cost = 1 + a.0.abs_diff(b.0).max(a.1.abs_diff(b.1));
            edges.push(DistanceEdge::new(i, j, cost));
        }
    }
    edges
}

fn seeded(seed: u64) -> AnnealingOptimizer {
    AnnealingOptimizer::new(AnnealingConfig {
        seed: Some(seed),
        ..AnnealingConfig::default()
    })
}

#[test]
fn finds_the_optimum_on_small_graphs() {
    for salt in 0..4 {
        let edges = scattered(6, salt);
        let matrix = DistanceMatrix::from_edges(&edges, 6).unwrap();
        let exact = HeldKarpOptimizer.optimize(&edges, 6).unwrap();
        let found = seeded(salt + 1).optimize(&edges, 6).unwrap();

        assert!(found.is_permutation(6));
        assert_eq!(
            matrix.tour_cost(found.nodes()),
            matrix.tour_cost(exact.nodes())
        );
    }
}

#[test]
fn stays_close_on_larger_graphs() {
    let edges = scattered(10, 42);
    let matrix = DistanceMatrix::from_edges(&edges, 10).unwrap();
    let exact = matrix.tour_cost(HeldKarpOptimizer.optimize(&edges, 10).unwrap().nodes());
    let found = matrix.tour_cost(seeded(7).optimize(&edges, 10).unwrap().nodes());

    assert!(found >= exact);
    assert!(found * 100 <= exact * 120, "{found} vs optimum {exact}");
}

#[test]
fn auxiliary_node_sits_between_its_two_neighbours() {
    // Nodes 0..5 complete, node 6 attached only to 0 and 3.
    let mut edges = scattered(6, 9);
    edges.push(DistanceEdge::new(0, 6, 1));
    edges.push(DistanceEdge::new(6, 3, 1));

    let tour = seeded(5).optimize(&edges, 7).unwrap();
    let nodes = tour.nodes();
    let at = nodes.iter().position(|&n| n == 6).unwrap();
    let mut around = [
        nodes[(at + nodes.len() - 1) % nodes.len()],
        nodes[(at + 1) % nodes.len()],
    ];
    around.sort();
    assert_eq!(around, [0, 3]);
}

#[test]
fn same_seed_same_tour() {
    let edges = scattered(9, 3);
    let a = seeded(99).optimize(&edges, 9).unwrap();
    let b = seeded(99).optimize(&edges, 9).unwrap();
    assert_eq!(a, b);
}
