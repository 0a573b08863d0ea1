use serde::{Deserialize, Serialize};

use crate::simulation::{Material, SimulationError};

/// How an observed neighborhood is compared against rule patterns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// A pattern matches if it equals any of the 8 cyclic rotations of the
    /// observed neighborhood. Agents approach existing structure from
    /// arbitrary directions, so the built-in table assumes this mode.
    #[default]
    Rotational,
    /// A pattern matches only element-wise, in the fixed observed orientation.
    Exact,
}

/// One construction rule: place `place` when the neighborhood matches
/// `pattern`. Patterns use the same clockwise-from-north order as
/// [`Grid::neighborhood`](crate::simulation::Grid::neighborhood).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub pattern: [Material; 8],
    pub place: Material,
}

impl Rule {
    pub fn new(pattern: [Material; 8], place: Material) -> Self {
        Self { pattern, place }
    }

    /// Build a rule from raw numeric values, as rule tables are written in
    /// config files.
    pub fn from_values(pattern: &[u8], place: u8) -> Result<Self, SimulationError> {
        if pattern.len() != 8 {
            return Err(SimulationError::InvalidConfiguration(
                "rule pattern must have exactly 8 entries",
            ));
        }
        let mut decoded = [Material::Empty; 8];
        for (slot, &value) in decoded.iter_mut().zip(pattern) {
            *slot = Material::from_value(value)?;
        }
        Ok(Self {
            pattern: decoded,
            place: Material::from_value(place)?,
        })
    }
}

/// Ordered collection of construction rules shared read-only by all agents.
///
/// Order is significant: when several rules match the same neighborhood,
/// only the earliest one fires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    rules: Vec<Rule>,
    mode: MatchMode,
}

// The Vespa genus neighborhood table. Seeds anchor the first deposits and
// every rule places pulp.
const VESPA_RULES: [([Material; 8], Material); 18] = {
    use crate::simulation::Material::{Empty as O, Pulp as P, Seed as S};
    [
        ([S, O, O, O, O, O, O, O], P),
        ([S, P, O, O, O, O, O, O], P),
        ([S, O, O, O, O, O, O, P], P),
        ([P, O, O, O, O, O, P, S], P),
        ([O, O, O, O, P, S, P, O], P),
        ([P, O, O, O, O, O, S, P], P),
        ([O, O, O, O, P, P, S, O], P),
        ([P, O, O, O, O, O, P, S], P),
        ([S, P, O, O, O, O, O, P], P),
        ([P, P, O, O, O, O, O, P], P),
        ([P, P, O, O, O, P, P, P], P),
        ([P, O, O, O, O, O, P, P], P),
        ([P, P, P, O, O, O, P, P], P),
        ([S, P, P, O, O, O, P, P], P),
        ([P, P, P, P, O, P, P, P], P),
        ([P, O, O, O, O, P, P, S], P),
        ([P, P, O, O, O, O, P, S], P),
        ([P, P, O, O, O, P, P, S], P),
    ]
};

impl RuleTable {
    pub fn new(rules: Vec<Rule>, mode: MatchMode) -> Self {
        Self { rules, mode }
    }

    /// The nest-building table observed in the Vespa genus.
    pub fn vespa(mode: MatchMode) -> Self {
        let rules = VESPA_RULES
            .iter()
            .map(|&(pattern, place)| Rule::new(pattern, place))
            .collect();
        Self::new(rules, mode)
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First-match lookup.
    ///
    /// Rules only fire on empty cells; a non-empty `current` never matches,
    /// which is the guard that keeps building from overwriting placed
    /// material. Returns the material to place, or `None`.
    pub fn matching(
        &self,
        neighborhood: &[Material; 8],
        current: Material,
    ) -> Option<Material> {
        if current != Material::Empty {
            return None;
        }
        match self.mode {
            MatchMode::Exact => self
                .rules
                .iter()
                .find(|rule| rule.pattern == *neighborhood)
                .map(|rule| rule.place),
            MatchMode::Rotational => {
                let rotations = rotations(neighborhood);
                self.rules
                    .iter()
                    .find(|rule| rotations.contains(&rule.pattern))
                    .map(|rule| rule.place)
            }
        }
    }
}

/// All 8 cyclic rotations of a neighborhood tuple; rotation `i` starts the
/// tuple at offset `i`.
fn rotations(neighborhood: &[Material; 8]) -> [[Material; 8]; 8] {
    let mut rotations = [[Material::Empty; 8]; 8];
    for (offset, rotation) in rotations.iter_mut().enumerate() {
        for (i, slot) in rotation.iter_mut().enumerate() {
            *slot = neighborhood[(i + offset) % 8];
        }
    }
    rotations
}
