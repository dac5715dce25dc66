//! Simulation constants and tuning parameters.

/// Default tick rate used by hosts that run a fixed step (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the default tick rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

/// Upper bound accepted by `SetTimeScale`.
pub const MAX_TIME_SCALE: f32 = 4.0;

// --- World ---

/// World gravity along +y (units/s²). Bodies scale this by their gravity scale.
pub const GRAVITY: f32 = -9.81;

/// Depth of the probe box below an actor's feet used for the ground check.
pub const GROUND_PROBE_DEPTH: f32 = 0.05;

/// Horizontal input magnitude below which facing does not change.
pub const FACING_DEADZONE: f32 = 0.01;

// --- Projectiles ---

/// Fraction of vertical speed kept after a floor bounce.
pub const BOUNCE_RESTITUTION: f32 = 0.95;

/// Pitch multiplier for the sound played when a splitter releases its child.
pub const SPLIT_SPAWN_PITCH: f32 = 1.5;

// --- Boss patterns ---

/// Grace period before a boss starts attacking (seconds).
pub const BOSS_INITIAL_DELAY_SECS: f32 = 5.0;

/// The aimed burst restarts once its shot counter reaches quantity × this factor.
pub const BOSS_BURST_CYCLE_FACTOR: u32 = 4;

// --- Feedback ---

/// Default random pitch offset range applied to every sound effect.
pub const DEFAULT_PITCH_SPREAD: (f32, f32) = (-0.1, 0.1);

/// Default length of the white hit flash (seconds).
pub const HIT_FLASH_SECS: f32 = 0.2;
