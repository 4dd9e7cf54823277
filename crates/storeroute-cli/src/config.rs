//! TOML description of a store: its map, stops, cache and optimizer.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use storeroute_brute_force::HeldKarpOptimizer;
use storeroute_core::RouteOptimizer;
use storeroute_genetic::{GeneticConfig, GeneticOptimizer};
use storeroute_planner::{Stop, StoreLayout};
use storeroute_psa::{AnnealingConfig, AnnealingOptimizer};

#[derive(Clone, Debug, Deserialize)]
pub struct StoreConfig {
    pub map: MapConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    #[serde(default)]
    pub stops: Vec<StopConfig>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MapConfig {
    /// Grayscale map image; relative paths start at the config file's directory
    pub image: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CacheConfig {
    /// Distance cache file (default: /tmp/storeroute-cache.json)
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,

    /// Set to false to recompute pairwise paths on every start
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    #[default]
    Genetic,
    Annealing,
    Exact,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OptimizerConfig {
    #[serde(default)]
    pub kind: OptimizerKind,

    /// Overrides the seed of whichever stochastic solver is selected
    pub seed: Option<u64>,

    #[serde(default)]
    pub genetic: GeneticConfig,

    #[serde(default)]
    pub annealing: AnnealingConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StopConfig {
    pub id: String,
    pub row: i32,
    pub col: i32,
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("/tmp/storeroute-cache.json")
}

fn default_true() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            enabled: true,
        }
    }
}

impl StoreConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: StoreConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        if config.map.image.is_relative() {
            if let Some(dir) = path.parent() {
                config.map.image = dir.join(&config.map.image);
            }
        }
        Ok(config)
    }

    pub fn layout(&self) -> Result<StoreLayout> {
        let stops = self
            .stops
            .iter()
            .map(|s| Stop::new(s.id.as_str(), (s.row, s.col)))
            .collect();
        StoreLayout::new(stops).context("invalid stop list")
    }
}

impl OptimizerConfig {
    pub fn build(&self) -> Box<dyn RouteOptimizer> {
        match self.kind {
            OptimizerKind::Genetic => {
                let mut config = self.genetic.clone();
                config.seed = self.seed.or(config.seed);
                Box::new(GeneticOptimizer::new(config))
            }
            OptimizerKind::Annealing => {
                let mut config = self.annealing.clone();
                config.seed = self.seed.or(config.seed);
                Box::new(AnnealingOptimizer::new(config))
            }
            OptimizerKind::Exact => Box::new(HeldKarpOptimizer::new()),
        }
    }
}
