//! Simulation engine for bossrush.
//!
//! Owns the hecs ECS world, runs systems once per `tick(dt)`,
//! and produces GameStateSnapshots for the host.

pub mod components;
pub mod config;
pub mod engine;
pub mod scenario;
pub mod systems;
pub mod terrain;
pub mod world_setup;

pub use bossrush_core as core;
pub use engine::{SimConfig, SimulationEngine};
