//! Stigmergic nest construction, the way social wasps do it.
//!
//! Mobile agents wander a bounded 2D lattice and deposit material wherever
//! their 8-cell neighborhood matches an entry in an ordered rule table. The
//! agents never communicate directly; structure emerges from the traces they
//! leave in the shared grid.
//!
//! The crate splits into a simulation core ([`simulation`]) — grid, rule
//! table, agents, driver — and a thin shell ([`app`], [`config`]) that loads
//! configuration, paces the run, and renders terminal snapshots.

pub mod app;
pub mod config;
pub mod simulation;

pub use app::{App, RunOptions};
pub use config::{MaterialDistribution, RuleSpec, SimulationConfig};
pub use simulation::{
    Agent, Grid, MatchMode, Material, Rule, RuleTable, Simulation, SimulationError,
};
