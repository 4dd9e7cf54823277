use serde::Deserialize;

/// Tuning knobs for [`crate::AnnealingOptimizer`].
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    /// Starting temperature as a multiple of the mean edge cost
    pub initial_temperature_factor: f64,
    /// Temperature multiplier applied after each block of moves
    pub cooling_rate: f64,
    /// Stop once the temperature falls below this multiple of the mean edge cost
    pub final_temperature_factor: f64,
    /// Moves tried at each temperature
    pub moves_per_temperature: usize,
    /// Hard cap on the total number of moves
    pub max_moves: usize,
    /// Fixed RNG seed; a random one is drawn per solve when unset
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature_factor: 1.0,
            cooling_rate: 0.95,
            final_temperature_factor: 0.001,
            moves_per_temperature: 100,
            max_moves: 200_000,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    /// Rejects settings under which the search would never start or never end.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(format!(
                "cooling_rate must lie strictly between 0 and 1, got {}",
                self.cooling_rate
            ));
        }
        if self.moves_per_temperature == 0 {
            return Err("moves_per_temperature must be at least 1".to_string());
        }
        if !(self.final_temperature_factor > 0.0
            && self.initial_temperature_factor > self.final_temperature_factor)
        {
            return Err(format!(
                "temperature factors must satisfy 0 < final < initial, got final {} and initial {}",
                self.final_temperature_factor, self.initial_temperature_factor
            ));
        }
        Ok(())
    }
}
