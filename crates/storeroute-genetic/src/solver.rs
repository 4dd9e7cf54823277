use crate::config::GeneticConfig;
use crate::operators::{prefix_crossover, random_permutation, swap_mutation, tournament};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use storeroute_core::optimizer::{finish_tour, trivial_tour};
use storeroute_core::{Cost, DistanceEdge, DistanceMatrix, NodeIndex, Result, RouteOptimizer, Tour};

/// Generational genetic algorithm over closed tours.
///
/// The population starts as random permutations plus the nearest-neighbour
/// tour out of node 0. Each generation keeps the elite, then fills up with
/// children of tournament-selected parents. The run ends after
/// `max_attempts` generations without a new best, or at `max_generations`.
#[derive(Clone, Debug, Default)]
pub struct GeneticOptimizer {
    config: GeneticConfig,
}

impl GeneticOptimizer {
    pub fn new(config: GeneticConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    fn evolve(
        &self,
        matrix: &DistanceMatrix,
        rng: &mut Xoshiro256PlusPlus,
    ) -> (Vec<NodeIndex>, Cost) {
        let n = matrix.len();
        let size = self.config.population_size.max(2);
        let elite = self.config.elite_count.min(size - 1);

        let mut population: Vec<Vec<NodeIndex>> = Vec::with_capacity(size);
        population.push(matrix.nearest_neighbour_tour(0));
        while population.len() < size {
            population.push(random_permutation(n, rng));
        }
        let mut costs: Vec<Cost> = population.iter().map(|t| matrix.tour_cost(t)).collect();

        let first = fittest(&costs);
        let mut best = population[first].clone();
        let mut best_cost = costs[first];
        let mut attempts = 0;
        let mut generation = 0;

        while attempts < self.config.max_attempts && generation < self.config.max_generations {
            let mut ranked: Vec<usize> = (0..size).collect();
            ranked.sort_by_key(|&i| costs[i]);

            let mut next: Vec<Vec<NodeIndex>> = Vec::with_capacity(size);
            next.extend(ranked[..elite].iter().map(|&i| population[i].clone()));
            while next.len() < size {
                let first = tournament(&costs, self.config.tournament_size, rng);
                let second = tournament(&costs, self.config.tournament_size, rng);
                let mut child = prefix_crossover(&population[first], &population[second], rng);
                if rng.gen_bool(self.config.mutation_probability.clamp(0.0, 1.0)) {
                    swap_mutation(&mut child, rng);
                }
                next.push(child);
            }

            population = next;
            costs = population.iter().map(|t| matrix.tour_cost(t)).collect();
            generation += 1;

            let leader = fittest(&costs);
            if costs[leader] < best_cost {
                best = population[leader].clone();
                best_cost = costs[leader];
                attempts = 0;
            } else {
                attempts += 1;
            }
        }

        debug!(
            "[Genetic] {} nodes, {} generations, best tour cost {}",
            n, generation, best_cost
        );
        (best, best_cost)
    }
}

/// Index of the cheapest individual; ties go to the earliest.
fn fittest(costs: &[Cost]) -> usize {
    let mut best = 0;
    for (i, &cost) in costs.iter().enumerate().skip(1) {
        if cost < costs[best] {
            best = i;
        }
    }
    best
}

impl RouteOptimizer for GeneticOptimizer {
    fn name(&self) -> &str {
        "genetic"
    }

    fn optimize(&self, edges: &[DistanceEdge], num_nodes: usize) -> Result<Tour> {
        let matrix = DistanceMatrix::from_edges(edges, num_nodes)?;
        if let Some(tour) = trivial_tour(num_nodes) {
            return finish_tour(&matrix, tour.into_nodes(), edges);
        }

        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let (best, _) = self.evolve(&matrix, &mut rng);
        finish_tour(&matrix, best, edges)
    }
}
