//! Authored configuration: projectile specs and actor tuning.
//!
//! Specs are authored offline (or loaded from an encounter file) and are
//! never mutated at runtime. Live projectiles share them through `Arc`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::HIT_FLASH_SECS;
use crate::curve::{clamp01, Curve};
use crate::enums::{BehaviorKind, MovementSpace};

/// A curve that only contributes while enabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifier {
    pub enabled: bool,
    pub curve: Curve,
}

impl Modifier {
    pub fn on(curve: Curve) -> Self {
        Self {
            enabled: true,
            curve,
        }
    }

    /// The curve value at `t`, or `None` when disabled.
    pub fn sample(&self, t: f32) -> Option<f32> {
        self.enabled.then(|| self.curve.sample(t))
    }
}

/// Lateral oscillation. Amplitude is in units/s, frequency in hertz.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Waviness {
    pub enabled: bool,
    pub amplitude: Curve,
    pub frequency: Curve,
}

/// A named clip plus playback volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundSpec {
    pub clip: String,
    #[serde(default = "unit_volume")]
    pub volume: f32,
}

fn unit_volume() -> f32 {
    1.0
}

impl SoundSpec {
    pub fn new(clip: impl Into<String>, volume: f32) -> Self {
        Self {
            clip: clip.into(),
            volume,
        }
    }
}

/// Box probed beneath a bouncing projectile to tell floors from walls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeBox {
    /// Offset from the projectile's position.
    pub offset: Vec2,
    pub half_extents: Vec2,
}

/// Everything that defines a class of projectiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileSpec {
    pub name: String,
    pub behavior: BehaviorKind,
    pub movement_space: MovementSpace,

    // --- Time-based modifiers (sampled at lifespan progress) ---
    /// Forward speed (units/s).
    pub speed: Modifier,
    pub waviness: Waviness,
    /// Turn rate in full rotations per second.
    pub curviness: Modifier,
    /// Absolute uniform scale.
    pub size: Modifier,
    /// Downward acceleration (units/s²).
    pub gravity: Modifier,
    /// Seeds the vertical velocity accumulator at spawn.
    pub initial_vertical_velocity: f32,

    // --- Range-based modifiers (one random sample per projectile) ---
    /// Spawn rotation in degrees across a volley.
    pub spread: Modifier,
    /// 0 spaces a volley evenly over the spread curve, 1 jitters each slot fully.
    pub spread_randomness: f32,

    // --- Attack parameters ---
    pub lifespan: f32,
    pub quantity: u32,
    pub damage: f32,
    /// Attack cooldown (seconds).
    pub time_between_attacks: f32,
    /// Whether holding the button keeps firing.
    pub autofire: bool,
    /// Delay between the attack input and the projectiles appearing.
    pub spawn_delay: f32,
    /// Friendly projectiles hurt enemies; the rest hurt the player.
    pub friendly: bool,
    /// Survives actor hits. Ground still ends it.
    pub piercing: bool,
    /// Detached from the owner at spawn instead of riding along with it.
    pub decoupled: bool,
    /// How long a dead projectile lingers for its death effect.
    pub death_wait_time: f32,

    // --- Collision ---
    pub hitbox: Vec2,
    pub bounce_probe: Option<ProbeBox>,

    /// Names of specs this projectile can release (splits, explosions).
    pub children: Vec<String>,

    // --- Feedback ---
    pub spawn_sound: Option<SoundSpec>,
    pub hit_sound: Option<SoundSpec>,
    pub expire_sound: Option<SoundSpec>,
    /// Plays a `die` animation instead of hiding the sprite on death.
    pub has_death_anim: bool,
}

impl Default for ProjectileSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            behavior: BehaviorKind::Default,
            movement_space: MovementSpace::Local,
            speed: Modifier::default(),
            waviness: Waviness::default(),
            curviness: Modifier::default(),
            size: Modifier::default(),
            gravity: Modifier::default(),
            initial_vertical_velocity: 0.0,
            spread: Modifier::default(),
            spread_randomness: 0.0,
            lifespan: 1.0,
            quantity: 1,
            damage: 1.0,
            time_between_attacks: 0.5,
            autofire: false,
            spawn_delay: 0.0,
            friendly: false,
            piercing: false,
            decoupled: false,
            death_wait_time: 0.0,
            hitbox: Vec2::splat(0.25),
            bounce_probe: None,
            children: Vec::new(),
            spawn_sound: None,
            hit_sound: None,
            expire_sound: None,
            has_death_anim: false,
        }
    }
}

impl ProjectileSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Fraction of lifespan elapsed, clamped to [0, 1].
    /// A non-positive lifespan counts as already complete.
    pub fn progress(&self, elapsed: f32) -> f32 {
        if self.lifespan <= 0.0 {
            1.0
        } else {
            clamp01(elapsed / self.lifespan)
        }
    }
}

/// White flash shown after a successful hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashTuning {
    pub duration: f32,
    /// Alpha over normalized flash time.
    pub alpha: Curve,
}

impl Default for FlashTuning {
    fn default() -> Self {
        Self {
            duration: HIT_FLASH_SECS,
            alpha: Curve::linear(1.0, 0.0),
        }
    }
}

/// Health parameters shared by player and enemies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthTuning {
    pub max_health: f32,
    /// Post-hit immunity window (seconds).
    pub immunity_frame_length: f32,
    pub flash: FlashTuning,
}

impl Default for HealthTuning {
    fn default() -> Self {
        Self {
            max_health: 10.0,
            immunity_frame_length: 0.5,
            flash: FlashTuning::default(),
        }
    }
}

/// Sounds the player controller requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSounds {
    pub jump: Option<SoundSpec>,
    pub dash: Option<SoundSpec>,
    pub land: Option<SoundSpec>,
    /// Footstep while running on the ground, every `step_interval`.
    pub step: Option<SoundSpec>,
}

/// Movement and combat tuning for the player controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// How long attack and jump presses stay buffered (real seconds).
    pub input_buffer_time: f32,
    /// How long after leaving the ground a jump still counts as grounded.
    pub coyote_time: f32,
    /// Landing faster than this plays the land sound.
    pub hard_fall_speed: f32,
    pub top_horizontal_speed: f32,
    pub jump_speed: f32,
    pub gravity_scale: f32,
    /// How long the jump button can be held to extend a jump.
    pub jump_max_extension_time: f32,
    pub dash_speed: f32,
    pub dash_time: f32,
    /// Cooldown between the end of one dash and the next.
    pub dash_downtime: f32,
    /// Gravity multiplier while dashing.
    pub dash_gravity_modifier: f32,
    pub dash_invulnerable: bool,
    pub enable_dash: bool,
    pub enable_double_jump: bool,
    pub enable_die_anim: bool,
    /// Plays `spawn` when the encounter starts.
    pub enable_spawn_anim: bool,
    /// Plays `flip` when turning around on the ground.
    pub enable_flip_anim: bool,
    /// Repeating an attack inside `alt_attack_window` plays its alternate animation.
    pub enable_alt_attack_anim_one: bool,
    pub enable_alt_attack_anim_two: bool,
    pub enable_air_attack_anim_one: bool,
    pub enable_air_attack_anim_two: bool,
    /// Seconds after a cooldown ends during which the next attack counts as a follow-up.
    pub alt_attack_window: f32,
    /// Seconds between footsteps while running.
    pub step_interval: f32,
    /// Spec names for the two attack bindings.
    pub attack_one: Option<String>,
    pub attack_two: Option<String>,
    pub sounds: PlayerSounds,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            input_buffer_time: 0.15,
            coyote_time: 0.1,
            hard_fall_speed: 8.0,
            top_horizontal_speed: 6.0,
            jump_speed: 9.0,
            gravity_scale: 2.0,
            jump_max_extension_time: 0.2,
            dash_speed: 18.0,
            dash_time: 0.15,
            dash_downtime: 0.4,
            dash_gravity_modifier: 0.0,
            dash_invulnerable: true,
            enable_dash: true,
            enable_double_jump: true,
            enable_die_anim: true,
            enable_spawn_anim: false,
            enable_flip_anim: false,
            enable_alt_attack_anim_one: false,
            enable_alt_attack_anim_two: false,
            enable_air_attack_anim_one: false,
            enable_air_attack_anim_two: false,
            alt_attack_window: 0.3,
            step_interval: 0.3,
            attack_one: None,
            attack_two: None,
            sounds: PlayerSounds::default(),
        }
    }
}

/// Attack pattern of the example boss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    /// Fired one at a time at the player, in bursts of `quantity`.
    pub aimed_attack: Option<String>,
    /// Fired as an evenly spaced ring of `quantity` projectiles.
    pub ring_attack: Option<String>,
    /// Seconds before either pattern starts.
    pub initial_delay: f32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            aimed_attack: None,
            ring_attack: None,
            initial_delay: crate::constants::BOSS_INITIAL_DELAY_SECS,
        }
    }
}
