//! Immutable run configuration: lattice dimensions, agent count, RNG seed,
//! initial material distribution, and the rule table. Loaded once at startup
//! (JSON file or defaults) and validated before the simulation is built.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::simulation::{MatchMode, Material, Rule, RuleTable, SimulationError};

/// Default lattice width in cells.
pub const DEFAULT_WIDTH: i32 = 80;
/// Default lattice height in cells.
pub const DEFAULT_HEIGHT: i32 = 60;
/// Default number of builder agents.
pub const DEFAULT_AGENTS: usize = 10;

/// Tolerance when checking that distribution weights sum to 1.
const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// Probability weights for the initial i.i.d. material sampling.
///
/// Defaults mirror the observed nest seeding: almost everything empty, a few
/// seed deposits, a trace of pre-built pulp.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MaterialDistribution {
    pub empty: f64,
    pub seed: f64,
    pub pulp: f64,
}

impl Default for MaterialDistribution {
    fn default() -> Self {
        Self {
            empty: 0.97,
            seed: 0.02,
            pulp: 0.01,
        }
    }
}

impl MaterialDistribution {
    fn weights(&self) -> [f64; 3] {
        [self.empty, self.seed, self.pulp]
    }

    /// Weights must be non-negative and sum to 1 within tolerance.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.weights().iter().any(|&w| w < 0.0) {
            return Err(SimulationError::InvalidConfiguration(
                "distribution weights must be non-negative",
            ));
        }
        let sum: f64 = self.weights().iter().sum();
        if (sum - 1.0).abs() > DISTRIBUTION_TOLERANCE {
            return Err(SimulationError::InvalidConfiguration(
                "distribution weights must sum to 1",
            ));
        }
        Ok(())
    }

    /// Draw one material according to the weights.
    pub fn sample(&self, rng: &mut SmallRng) -> Material {
        let draw: f64 = rng.gen();
        let mut cumulative = 0.0;
        for (material, weight) in Material::ALL.into_iter().zip(self.weights()) {
            cumulative += weight;
            if draw < cumulative {
                return material;
            }
        }
        // Rounding can leave the last cumulative bound fractionally short.
        Material::Pulp
    }
}

/// A rule as written in config files: raw numeric pattern and result.
/// Decoded (and length-checked) into a [`Rule`] during validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub pattern: Vec<u8>,
    pub place: u8,
}

/// Static configuration for one simulation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Lattice width in cells.
    pub width: i32,
    /// Lattice height in cells.
    pub height: i32,
    /// Number of builder agents.
    pub agents: usize,
    /// Optional RNG seed for reproducible runs.
    pub seed: Option<u64>,
    /// Initial material distribution.
    pub distribution: MaterialDistribution,
    /// Neighborhood matching mode.
    pub match_mode: MatchMode,
    /// Custom rule table; `None` selects the built-in Vespa table.
    pub rules: Option<Vec<RuleSpec>>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            agents: DEFAULT_AGENTS,
            seed: None,
            distribution: MaterialDistribution::default(),
            match_mode: MatchMode::default(),
            rules: None,
        }
    }
}

impl SimulationConfig {
    /// Structural validation, fatal on the first problem found.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(SimulationError::InvalidConfiguration(
                "grid dimensions must be positive",
            ));
        }
        self.distribution.validate()?;
        // Decoding the rule specs surfaces bad pattern lengths and
        // out-of-alphabet values.
        self.rule_table()?;
        Ok(())
    }

    /// The rule table this run uses: the built-in Vespa table unless the
    /// config supplies its own.
    pub fn rule_table(&self) -> Result<RuleTable, SimulationError> {
        match &self.rules {
            None => Ok(RuleTable::vespa(self.match_mode)),
            Some(specs) => {
                let rules = specs
                    .iter()
                    .map(|spec| Rule::from_values(&spec.pattern, spec.place))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(RuleTable::new(rules, self.match_mode))
            }
        }
    }

    /// The configured RNG, seeded from entropy when no seed is set.
    pub fn seeded_rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::seed_from_u64(rand::random()),
        }
    }
}
