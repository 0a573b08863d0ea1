use rand::rngs::SmallRng;

use crate::config::MaterialDistribution;
use crate::simulation::{Material, SimulationError};

/// The 8 Moore-neighborhood offsets in clockwise order starting north
/// (+y is north). The same offsets double as the agents' walk directions.
pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Bounded 2D lattice of material values.
///
/// Every in-bounds coordinate holds exactly one material at all times.
/// Out-of-bounds coordinates are not stored; neighborhood reads treat them
/// as permanently [`Material::Empty`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Material>,
}

impl Grid {
    /// Create a grid with every cell set to `Empty`.
    pub fn empty(width: i32, height: i32) -> Self {
        let cell_count = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width,
            height,
            cells: vec![Material::Empty; cell_count],
        }
    }

    /// Create a grid with each cell drawn independently from `distribution`.
    ///
    /// Deterministic for a given RNG state, so seeded runs reproduce the
    /// same starting lattice.
    pub fn random(
        width: i32,
        height: i32,
        distribution: &MaterialDistribution,
        rng: &mut SmallRng,
    ) -> Self {
        let mut grid = Self::empty(width, height);
        for cell in &mut grid.cells {
            *cell = distribution.sample(rng);
        }
        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `(x, y)` lies inside `[0, width) x [0, height)`.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Read one cell. Fails on out-of-bounds coordinates; neighborhood reads
    /// go through [`Grid::neighborhood`] instead, which never fails.
    pub fn get(&self, x: i32, y: i32) -> Result<Material, SimulationError> {
        if !self.in_bounds(x, y) {
            return Err(SimulationError::OutOfBounds { x, y });
        }
        Ok(self.cells[self.index(x, y)])
    }

    /// Overwrite one cell unconditionally.
    pub fn set(&mut self, x: i32, y: i32, material: Material) -> Result<(), SimulationError> {
        if !self.in_bounds(x, y) {
            return Err(SimulationError::OutOfBounds { x, y });
        }
        let index = self.index(x, y);
        self.cells[index] = material;
        Ok(())
    }

    /// The 8 neighbors of `(x, y)` in `MOORE_OFFSETS` order.
    ///
    /// Neighbors outside the lattice read as `Empty`: boundary cells are
    /// treated as permanently unbuilt, never as an error.
    pub fn neighborhood(&self, x: i32, y: i32) -> [Material; 8] {
        let mut neighborhood = [Material::Empty; 8];
        for (slot, (dx, dy)) in neighborhood.iter_mut().zip(MOORE_OFFSETS) {
            let (nx, ny) = (x + dx, y + dy);
            if self.in_bounds(nx, ny) {
                *slot = self.cells[self.index(nx, ny)];
            }
        }
        neighborhood
    }

    /// Iterate all cells as `((x, y), material)`, row by row.
    pub fn cells(&self) -> impl Iterator<Item = ((i32, i32), Material)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &material)| ((i as i32 % width, i as i32 / width), material))
    }

    /// Iterate only the cells holding placed material.
    pub fn occupied(&self) -> impl Iterator<Item = ((i32, i32), Material)> + '_ {
        self.cells()
            .filter(|&(_, material)| material != Material::Empty)
    }

    /// Per-material census, indexed by numeric encoding.
    pub fn material_counts(&self) -> [usize; 3] {
        let mut counts = [0usize; 3];
        for &material in &self.cells {
            counts[material.value() as usize] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::empty(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cells().count(), 12);
        assert!(grid.cells().all(|(_, m)| m == Material::Empty));
    }

    #[test]
    fn test_get_set_in_bounds() {
        let mut grid = Grid::empty(3, 3);
        grid.set(1, 2, Material::Pulp).unwrap();
        assert_eq!(grid.get(1, 2), Ok(Material::Pulp));
        assert_eq!(grid.get(0, 0), Ok(Material::Empty));
    }

    #[test]
    fn test_out_of_bounds_get_set() {
        let mut grid = Grid::empty(3, 3);
        assert_eq!(
            grid.get(3, 0),
            Err(SimulationError::OutOfBounds { x: 3, y: 0 })
        );
        assert_eq!(
            grid.get(0, -1),
            Err(SimulationError::OutOfBounds { x: 0, y: -1 })
        );
        assert_eq!(
            grid.set(-1, 1, Material::Seed),
            Err(SimulationError::OutOfBounds { x: -1, y: 1 })
        );
    }

    #[test]
    fn test_neighborhood_order() {
        let mut grid = Grid::empty(3, 3);
        // North neighbor of the center is (1, 2); east is (2, 1).
        grid.set(1, 2, Material::Seed).unwrap();
        grid.set(2, 1, Material::Pulp).unwrap();
        let neighborhood = grid.neighborhood(1, 1);
        assert_eq!(neighborhood[0], Material::Seed);
        assert_eq!(neighborhood[2], Material::Pulp);
        assert!(neighborhood[3..].iter().all(|&m| m == Material::Empty));
        assert_eq!(neighborhood[1], Material::Empty);
    }

    #[test]
    fn test_neighborhood_substitutes_empty_off_lattice() {
        let mut grid = Grid::empty(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                grid.set(x, y, Material::Pulp).unwrap();
            }
        }
        // Corner cell: 5 of 8 neighbors are off-lattice and must read Empty.
        let neighborhood = grid.neighborhood(0, 0);
        let empties = neighborhood
            .iter()
            .filter(|&&m| m == Material::Empty)
            .count();
        assert_eq!(empties, 5);
        // The three real neighbors of (0, 0): north, north-east, east.
        assert_eq!(neighborhood[0], Material::Pulp);
        assert_eq!(neighborhood[1], Material::Pulp);
        assert_eq!(neighborhood[2], Material::Pulp);
    }

    #[test]
    fn test_random_respects_distribution() {
        let distribution = MaterialDistribution::default();
        let grid = Grid::random(200, 200, &distribution, &mut rng(7));
        let counts = grid.material_counts();
        let total = (200 * 200) as f64;
        // Tolerance test over 40k samples, not an exact match.
        assert!((counts[0] as f64 / total - 0.97).abs() < 0.01);
        assert!((counts[1] as f64 / total - 0.02).abs() < 0.01);
        assert!((counts[2] as f64 / total - 0.01).abs() < 0.01);
    }

    #[test]
    fn test_random_is_seed_deterministic() {
        let distribution = MaterialDistribution::default();
        let a = Grid::random(50, 40, &distribution, &mut rng(99));
        let b = Grid::random(50, 40, &distribution, &mut rng(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_occupied_and_counts() {
        let mut grid = Grid::empty(4, 4);
        grid.set(0, 0, Material::Seed).unwrap();
        grid.set(3, 3, Material::Pulp).unwrap();
        grid.set(2, 1, Material::Pulp).unwrap();
        let occupied: Vec<_> = grid.occupied().collect();
        assert_eq!(occupied.len(), 3);
        assert_eq!(grid.material_counts(), [13, 1, 2]);
    }
}
