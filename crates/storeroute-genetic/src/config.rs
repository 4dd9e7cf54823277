use serde::Deserialize;

/// Tuning knobs for [`crate::GeneticOptimizer`].
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    pub population_size: usize,
    /// Probability that a child gets two of its nodes swapped
    pub mutation_probability: f64,
    /// Generations without improvement before giving up
    pub max_attempts: usize,
    /// Hard cap on generations
    pub max_generations: usize,
    /// Contestants per tournament when picking a parent
    pub tournament_size: usize,
    /// Best individuals copied unchanged into the next generation
    pub elite_count: usize,
    /// Fixed RNG seed; a random one is drawn per solve when unset
    pub seed: Option<u64>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            mutation_probability: 0.2,
            max_attempts: 50,
            max_generations: 2_000,
            tournament_size: 3,
            elite_count: 2,
            seed: None,
        }
    }
}
