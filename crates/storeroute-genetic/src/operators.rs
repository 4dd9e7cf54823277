//! Variation and selection operators on permutations.

use rand::seq::SliceRandom;
use rand::Rng;
use storeroute_core::{Cost, NodeIndex};

/// Keeps a random prefix of `first` and fills the rest with the remaining
/// nodes in the order they appear in `second`.
pub fn prefix_crossover<R: Rng>(
    first: &[NodeIndex],
    second: &[NodeIndex],
    rng: &mut R,
) -> Vec<NodeIndex> {
    let n = first.len();
    let cut = rng.gen_range(1..n);

    let mut taken = vec![false; n];
    let mut child = Vec::with_capacity(n);
    for &node in &first[..cut] {
        taken[node] = true;
        child.push(node);
    }
    child.extend(second.iter().copied().filter(|&node| !taken[node]));
    child
}

/// Swaps two distinct positions.
pub fn swap_mutation<R: Rng>(tour: &mut [NodeIndex], rng: &mut R) {
    let n = tour.len();
    if n < 2 {
        return;
    }
    let i = rng.gen_range(0..n);
    let mut j = rng.gen_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    tour.swap(i, j);
}

/// Index of the cheapest of `size` randomly drawn individuals.
pub fn tournament<R: Rng>(costs: &[Cost], size: usize, rng: &mut R) -> usize {
    let mut best = rng.gen_range(0..costs.len());
    for _ in 1..size.max(1) {
        let challenger = rng.gen_range(0..costs.len());
        if costs[challenger] < costs[best] {
            best = challenger;
        }
    }
    best
}

/// A uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<NodeIndex> {
    let mut tour: Vec<NodeIndex> = (0..n).collect();
    tour.shuffle(rng);
    tour
}
