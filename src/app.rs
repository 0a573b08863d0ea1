//! Headless driving loop: owns the simulation, paces it, logs construction
//! stats, and renders terminal snapshots. The core has no dependency back on
//! any of this.

use std::thread;
use std::time::{Duration, Instant};

use crate::config::SimulationConfig;
use crate::simulation::{Material, Simulation, SimulationError};

/// How the driver runs the simulation.
#[derive(Clone, Copy, Debug)]
pub struct RunOptions {
    /// Total ticks to run.
    pub steps: u64,
    /// Log a construction census every this many ticks; 0 disables it.
    pub stats_interval: u64,
    /// Optional pause between ticks, for watching runs at interactive rates.
    pub step_delay: Option<Duration>,
    /// Print an ASCII snapshot of the final grid to stdout.
    pub snapshot: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            steps: 2_000,
            stats_interval: 500,
            step_delay: None,
            snapshot: true,
        }
    }
}

/// Application shell around one simulation run.
pub struct App {
    simulation: Simulation,
    options: RunOptions,
}

impl App {
    pub fn new(config: &SimulationConfig, options: RunOptions) -> Result<Self, SimulationError> {
        Ok(Self {
            simulation: Simulation::new(config)?,
            options,
        })
    }

    /// Run to completion. The loop may be stopped between ticks at any point
    /// with nothing to reconcile; each tick is atomic.
    pub fn run(&mut self) -> Result<(), SimulationError> {
        let mut rate = StepRateCounter::new();
        log::info!("running {} steps", self.options.steps);

        for _ in 0..self.options.steps {
            self.simulation.step()?;

            if let Some(rate) = rate.tick() {
                log::debug!("{:.0} steps/sec", rate);
            }
            if self.options.stats_interval > 0
                && self.simulation.tick() % self.options.stats_interval == 0
            {
                self.log_stats();
            }
            if let Some(delay) = self.options.step_delay {
                thread::sleep(delay);
            }
        }

        self.log_stats();
        if self.options.snapshot {
            println!("{}", self.render_ascii());
        }
        Ok(())
    }

    fn log_stats(&self) {
        let [empty, seed, pulp] = self.simulation.grid().material_counts();
        log::info!(
            "tick {}: {} empty, {} seed, {} pulp",
            self.simulation.tick(),
            empty,
            seed,
            pulp,
        );
    }

    /// ASCII view of the lattice, north row first: `.` empty, `+` seed,
    /// `#` pulp, `o` an agent's cell.
    pub fn render_ascii(&self) -> String {
        let grid = self.simulation.grid();
        let mut rows = vec![vec![b'.'; grid.width() as usize]; grid.height() as usize];
        for ((x, y), material) in grid.occupied() {
            rows[y as usize][x as usize] = match material {
                Material::Empty => b'.',
                Material::Seed => b'+',
                Material::Pulp => b'#',
            };
        }
        for agent in self.simulation.agents() {
            rows[agent.y as usize][agent.x as usize] = b'o';
        }
        let mut out = String::with_capacity((grid.width() as usize + 1) * grid.height() as usize);
        for row in rows.iter().rev() {
            out.extend(row.iter().map(|&glyph| glyph as char));
            out.push('\n');
        }
        out
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }
}

/// Steps-per-second counter, reporting once a second.
struct StepRateCounter {
    last_update: Instant,
    step_count: u32,
}

impl StepRateCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            step_count: 0,
        }
    }

    /// Count one step; returns Some(rate) every second.
    fn tick(&mut self) -> Option<f64> {
        self.step_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let rate = self.step_count as f64 / elapsed.as_secs_f64();
            self.step_count = 0;
            self.last_update = Instant::now();
            Some(rate)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_options(steps: u64) -> RunOptions {
        RunOptions {
            steps,
            stats_interval: 0,
            step_delay: None,
            snapshot: false,
        }
    }

    #[test]
    fn test_run_advances_to_step_count() {
        let config = SimulationConfig {
            seed: Some(31),
            ..SimulationConfig::default()
        };
        let mut app = App::new(&config, quiet_options(25)).unwrap();
        app.run().unwrap();
        assert_eq!(app.simulation().tick(), 25);
    }

    #[test]
    fn test_render_ascii_shape_and_glyphs() {
        let config = SimulationConfig {
            width: 12,
            height: 8,
            agents: 2,
            seed: Some(5),
            ..SimulationConfig::default()
        };
        let app = App::new(&config, quiet_options(0)).unwrap();
        let rendered = app.render_ascii();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines.iter().all(|line| line.len() == 12));
        // Agents may share a cell, so the glyph count is bounded, not exact.
        let agent_glyphs = rendered.matches('o').count();
        assert!(agent_glyphs >= 1 && agent_glyphs <= app.simulation().agents().len());
    }
}
