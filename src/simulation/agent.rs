use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::simulation::grid::MOORE_OFFSETS;
use crate::simulation::{Grid, RuleTable, SimulationError};

/// A builder wasp: a position on the lattice and nothing else.
///
/// The grid and rule table are owned by the simulation and passed in by
/// reference; an agent carries no state between steps beyond where it stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub x: i32,
    pub y: i32,
}

impl Agent {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Consult the rule table against the local neighborhood and, if a rule
    /// fires, deposit its material on the agent's own cell.
    ///
    /// Mutates at most one cell, and only the cell the agent stands on.
    pub fn build(&self, grid: &mut Grid, rules: &RuleTable) -> Result<(), SimulationError> {
        let neighborhood = grid.neighborhood(self.x, self.y);
        let current = grid.get(self.x, self.y)?;
        if let Some(material) = rules.matching(&neighborhood, current) {
            grid.set(self.x, self.y, material)?;
        }
        Ok(())
    }

    /// Take one step of an unbiased random walk over the 8 unit directions,
    /// clamping each axis independently to the lattice. An agent that would
    /// leave the grid sticks to the boundary on that axis instead.
    pub fn walk(&mut self, grid: &Grid, rng: &mut SmallRng) {
        let (dx, dy) = MOORE_OFFSETS[rng.gen_range(0..MOORE_OFFSETS.len())];
        self.x = (self.x + dx).clamp(0, grid.width() - 1);
        self.y = (self.y + dy).clamp(0, grid.height() - 1);
    }

    /// Build, then move. Placement always precedes relocation, so the build
    /// decision is made at the pre-move position.
    pub fn step(
        &mut self,
        grid: &mut Grid,
        rules: &RuleTable,
        rng: &mut SmallRng,
    ) -> Result<(), SimulationError> {
        self.build(grid, rules)?;
        self.walk(grid, rng);
        Ok(())
    }
}
