use rand::rngs::SmallRng;
use rand::Rng;

use crate::config::SimulationConfig;
use crate::simulation::{Agent, Grid, RuleTable, SimulationError};

/// Owns the grid, the rule table, and the agents, and advances the whole
/// system one discrete tick at a time.
///
/// Agents step sequentially in insertion order; an earlier agent's deposit is
/// visible to every later agent within the same tick. That ordering effect is
/// an accepted property of the model.
pub struct Simulation {
    grid: Grid,
    rules: RuleTable,
    agents: Vec<Agent>,
    rng: SmallRng,
    tick: u64,
}

impl Simulation {
    /// Build a simulation from a config: validate it, seed the RNG,
    /// randomize the grid, and scatter the agents.
    pub fn new(config: &SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut rng = config.seeded_rng();
        let grid = Grid::random(config.width, config.height, &config.distribution, &mut rng);
        let rules = config.rule_table()?;
        let agents = (0..config.agents)
            .map(|_| {
                Agent::new(
                    rng.gen_range(0..config.width),
                    rng.gen_range(0..config.height),
                )
            })
            .collect();

        log::info!(
            "simulation ready: {}x{} grid, {} agents, {} rules ({:?} matching)",
            config.width,
            config.height,
            config.agents,
            rules.len(),
            rules.mode(),
        );

        Ok(Self {
            grid,
            rules,
            agents,
            rng,
            tick: 0,
        })
    }

    /// Advance every agent once, in insertion order, then bump the tick.
    pub fn step(&mut self) -> Result<(), SimulationError> {
        for agent in &mut self.agents {
            agent.step(&mut self.grid, &self.rules, &mut self.rng)?;
        }
        self.tick += 1;
        Ok(())
    }

    /// Run `steps` ticks back to back.
    pub fn run(&mut self, steps: u64) -> Result<(), SimulationError> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Read-only view of the lattice, for drivers and renderers.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current agent positions, in step order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }
}
