use crate::config::AnnealingConfig;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use storeroute_core::optimizer::{finish_tour, trivial_tour};
use storeroute_core::{
    Cost, DistanceEdge, DistanceMatrix, NodeIndex, Result, RouteError, RouteOptimizer, Tour,
    UNREACHABLE,
};

/// Single-threaded simulated annealing over closed tours.
///
/// Starts from the nearest-neighbour tour out of node 0 and keeps the best
/// tour seen. Position 0 of the working tour never moves; for a cycle that
/// loses nothing.
#[derive(Clone, Debug, Default)]
pub struct AnnealingOptimizer {
    config: AnnealingConfig,
}

impl AnnealingOptimizer {
    pub fn new(config: AnnealingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }
}

fn mean_edge_cost(edges: &[DistanceEdge]) -> f64 {
    let finite: Vec<Cost> = edges
        .iter()
        .map(|e| e.cost)
        .filter(|&c| c < UNREACHABLE)
        .collect();
    if finite.is_empty() {
        return 1.0;
    }
    let mean = finite.iter().sum::<Cost>() as f64 / finite.len() as f64;
    mean.max(1.0)
}

/// Applies a random 2-opt reversal or a swap to `tour[1..]`.
fn neighbour(tour: &[NodeIndex], rng: &mut Xoshiro256PlusPlus) -> Vec<NodeIndex> {
    let n = tour.len();
    let mut next = tour.to_vec();
    let i = rng.gen_range(1..n);
    let mut j = rng.gen_range(1..n - 1);
    if j >= i {
        j += 1;
    }
    let (lo, hi) = (i.min(j), i.max(j));
    if rng.gen_bool(0.5) {
        next[lo..=hi].reverse();
    } else {
        next.swap(lo, hi);
    }
    next
}

impl RouteOptimizer for AnnealingOptimizer {
    fn name(&self) -> &str {
        "annealing"
    }

    fn optimize(&self, edges: &[DistanceEdge], num_nodes: usize) -> Result<Tour> {
        self.config
            .validate()
            .map_err(|reason| RouteError::optimization(reason, edges))?;
        let matrix = DistanceMatrix::from_edges(edges, num_nodes)?;
        if let Some(tour) = trivial_tour(num_nodes) {
            return finish_tour(&matrix, tour.into_nodes(), edges);
        }

        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        let scale = mean_edge_cost(edges);
        let mut temperature = self.config.initial_temperature_factor * scale;
        let final_temperature = self.config.final_temperature_factor * scale;

        let mut current = matrix.nearest_neighbour_tour(0);
        let mut current_cost = matrix.tour_cost(&current);
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut moves = 0usize;
        let mut rounds = 0usize;
        while temperature > final_temperature
            && moves < self.config.max_moves
            && rounds < self.config.max_moves
        {
            rounds += 1;
            for _ in 0..self.config.moves_per_temperature {
                let candidate = neighbour(&current, &mut rng);
                let candidate_cost = matrix.tour_cost(&candidate);
                let delta = candidate_cost as f64 - current_cost as f64;

                if delta <= 0.0 || rng.gen::<f64>() < (-delta / temperature).exp() {
                    current = candidate;
                    current_cost = candidate_cost;
                    if current_cost < best_cost {
                        best = current.clone();
                        best_cost = current_cost;
                    }
                }
                moves += 1;
            }
            temperature *= self.config.cooling_rate;
        }

        debug!(
            "[Annealing] {} nodes, {} moves, best tour cost {} (seed {})",
            num_nodes, moves, best_cost, seed
        );
        finish_tour(&matrix, best, edges)
    }
}
