//! Commands and per-tick input sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.
//! Input is sampled by the host and passed to every tick.

use serde::{Deserialize, Serialize};

/// Session-level actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Move from Setup to Active.
    StartEncounter,
    Pause,
    Resume,
    /// Scale simulation time. Input buffers keep running in real time.
    SetTimeScale { scale: f32 },
    /// Enable or disable player input (cutscenes).
    SetInputEnabled { enabled: bool },
}

/// State of one logical button during a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonState {
    /// Went down this tick.
    pub pressed: bool,
    /// Down this tick.
    pub held: bool,
    /// Went up this tick.
    pub released: bool,
}

impl ButtonState {
    /// Pressed and held this tick.
    pub fn tap() -> Self {
        Self {
            pressed: true,
            held: true,
            released: false,
        }
    }

    /// Held from an earlier tick.
    pub fn hold() -> Self {
        Self {
            pressed: false,
            held: true,
            released: false,
        }
    }
}

/// Everything the player controller reads from input in one tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerInput {
    /// Horizontal axis in [-1, 1].
    pub horizontal: f32,
    pub jump: ButtonState,
    pub down: ButtonState,
    pub dash: ButtonState,
    pub attack_one: ButtonState,
    pub attack_two: ButtonState,
}
