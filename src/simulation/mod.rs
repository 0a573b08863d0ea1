mod agent;
mod engine;
mod grid;
mod material;
mod rules;

pub use agent::Agent;
pub use engine::Simulation;
pub use grid::{Grid, MOORE_OFFSETS};
pub use material::Material;
pub use rules::{MatchMode, Rule, RuleTable};

use thiserror::Error;

/// Everything that can go wrong in the core. All variants are fatal to the
/// operation that raised them; the core never retries or recovers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// A direct grid read or write outside the lattice. Neighborhood reads
    /// never raise this; they substitute `Empty` instead.
    #[error("coordinate ({x}, {y}) is outside the lattice")]
    OutOfBounds { x: i32, y: i32 },

    /// A structurally invalid config value, caught at construction.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A cell value outside the closed material alphabet.
    #[error("material value {0} is outside the material alphabet")]
    InvalidMaterialValue(u8),
}
