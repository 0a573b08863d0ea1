use serde::{Deserialize, Serialize};

use crate::simulation::SimulationError;

/// Discrete state of a grid cell.
///
/// The material alphabet is closed: rule patterns, rule results, and initial
/// distributions are all defined over exactly these three values. The numeric
/// encodings are fixed because rule tables are written and exchanged as
/// integer tuples (`[1, 2, 0, 0, 0, 0, 0, 2] -> 2`).
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Material {
    /// Unbuilt cell. Also the value reported for out-of-bounds neighbors.
    #[default]
    Empty = 0,
    /// Sparse initial deposit that anchors construction; placed only during
    /// grid initialization, never by a rule in the built-in table.
    Seed = 1,
    /// Built nest material.
    Pulp = 2,
}

impl Material {
    /// All members of the alphabet, in numeric order.
    pub const ALL: [Material; 3] = [Material::Empty, Material::Seed, Material::Pulp];

    /// Numeric encoding used in rule tables and configs.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Decodes a numeric cell value, rejecting anything outside the alphabet.
    pub fn from_value(value: u8) -> Result<Self, SimulationError> {
        match value {
            0 => Ok(Material::Empty),
            1 => Ok(Material::Seed),
            2 => Ok(Material::Pulp),
            other => Err(SimulationError::InvalidMaterialValue(other)),
        }
    }
}

impl From<Material> for u8 {
    fn from(material: Material) -> u8 {
        material.value()
    }
}

impl TryFrom<u8> for Material {
    type Error = SimulationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Material::from_value(value)
    }
}
