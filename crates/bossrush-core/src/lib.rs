//! Core types and definitions for the bossrush combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! curves, projectile specs, components, commands, state snapshots,
//! events, errors and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod curve;
pub mod enums;
pub mod error;
pub mod events;
pub mod spec;
pub mod state;
pub mod types;
