//! Player controller: one tick of movement and combat input.
//!
//! Order within a tick: ground check, then (when input is permitted and no
//! dash is running) jumping, horizontal movement and attacks, then the dash,
//! then the timers. Pure logic on plain data; the simulation applies the
//! returned velocity and spawns the requested volleys.

use glam::Vec2;

use bossrush_core::commands::{ButtonState, PlayerInput};
use bossrush_core::components::{CombatTimers, PlayerState};
use bossrush_core::constants::FACING_DEADZONE;
use bossrush_core::enums::AttackSlot;
use bossrush_core::spec::PlayerTuning;

use crate::audio::Cue;
use crate::combat::{self, AttackRequest};

/// The parts of an attack spec the controller needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackProfile {
    pub autofire: bool,
    pub time_between_attacks: f32,
}

/// Per-tick inputs from the world.
#[derive(Debug, Clone, Copy)]
pub struct ControllerContext<'a> {
    pub input: &'a PlayerInput,
    /// The ground probe below the feet overlaps ground this tick.
    pub touching_ground: bool,
    pub velocity: Vec2,
    /// Downward speed when the body last came to rest on the ground.
    pub fall_speed: f32,
    pub facing: f32,
    pub dead: bool,
    /// Scaled simulation seconds.
    pub dt: f32,
    /// Real seconds.
    pub dt_unscaled: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerOutput {
    pub velocity: Vec2,
    pub facing: f32,
    /// Multiplier on gravity for this tick.
    pub gravity_factor: f32,
    /// Attacks that executed this tick, in order.
    pub attacks: Vec<AttackSlot>,
    pub cues: Vec<Cue>,
    pub animations: Vec<&'static str>,
}

/// Whether the dash currently shields the player.
pub fn is_invulnerable(tuning: &PlayerTuning, timers: &CombatTimers) -> bool {
    tuning.dash_invulnerable && combat::is_dashing(timers)
}

struct Step<'a> {
    tuning: &'a PlayerTuning,
    profiles: &'a [Option<AttackProfile>; 2],
    state: &'a mut PlayerState,
    timers: &'a mut CombatTimers,
    ctx: ControllerContext<'a>,
    out: ControllerOutput,
}

/// Run one controller tick.
pub fn step(
    tuning: &PlayerTuning,
    profiles: &[Option<AttackProfile>; 2],
    state: &mut PlayerState,
    timers: &mut CombatTimers,
    ctx: ControllerContext<'_>,
) -> ControllerOutput {
    let out = ControllerOutput {
        velocity: ctx.velocity,
        facing: if ctx.facing < 0.0 { -1.0 } else { 1.0 },
        gravity_factor: 1.0,
        ..Default::default()
    };
    let mut s = Step {
        tuning,
        profiles,
        state,
        timers,
        ctx,
        out,
    };

    s.check_ground();
    if s.state.can_input && !combat::is_dashing(s.timers) {
        s.jump();
        s.horizontal();
        s.attacks();
    }
    s.dash();
    s.run_timers();
    s.out
}

impl Step<'_> {
    fn check_ground(&mut self) {
        let was_grounded = self.state.grounded;
        if !self.ctx.touching_ground {
            self.state.grounded = false;
            return;
        }

        self.state.grounded = true;
        self.timers.coyote = self.tuning.coyote_time;
        if combat::take_jump_buffer(self.timers) && !self.ctx.input.down.held {
            self.timers.jump_hold = self.tuning.jump_max_extension_time;
        }
        if self.tuning.enable_double_jump {
            self.state.can_double_jump = true;
        }
        if !was_grounded {
            if self.ctx.fall_speed > self.tuning.hard_fall_speed {
                self.out.cues.push(Cue::new(&self.tuning.sounds.land));
            }
            if !self.ctx.dead {
                self.out.animations.push("land");
            }
        }
    }

    fn jump(&mut self) {
        let input = self.ctx.input;
        if input.jump.pressed && !input.down.held {
            let on_ground = self.state.grounded || self.timers.coyote > 0.0;
            if on_ground || self.state.can_double_jump {
                self.out.cues.push(Cue::new(&self.tuning.sounds.jump));
                if on_ground {
                    self.timers.coyote = 0.0;
                    self.out.animations.push("jump");
                } else {
                    self.state.can_double_jump = false;
                }
                self.timers.jump_hold = self.tuning.jump_max_extension_time;
            } else {
                combat::buffer_jump(self.timers, self.tuning.input_buffer_time);
            }
        }

        if self.timers.jump_hold > 0.0 {
            if input.jump.held {
                self.out.velocity.y = self.tuning.jump_speed;
            } else {
                self.timers.jump_hold = 0.0;
            }
        }
    }

    fn horizontal(&mut self) {
        let speed = self.ctx.input.horizontal.clamp(-1.0, 1.0) * self.tuning.top_horizontal_speed;
        let turning = (speed > FACING_DEADZONE && self.out.facing < 0.0)
            || (speed < -FACING_DEADZONE && self.out.facing > 0.0);
        if turning {
            self.out.facing = speed.signum();
            if self.state.grounded && self.tuning.enable_flip_anim {
                self.out.animations.push("flip");
            }
        }
        self.out.velocity.x = speed;
        self.footsteps(speed);
    }

    fn footsteps(&mut self, speed: f32) {
        if !self.state.grounded || speed.abs() <= FACING_DEADZONE {
            // The first step lands as soon as running starts.
            self.state.step_timer = 0.0;
            return;
        }
        self.state.step_timer -= self.ctx.dt;
        if self.state.step_timer <= 0.0 {
            self.out.cues.push(Cue::new(&self.tuning.sounds.step));
            self.state.step_timer += self.tuning.step_interval.max(self.ctx.dt);
        }
    }

    fn attacks(&mut self) {
        let wants = |profile: &Option<AttackProfile>, button: ButtonState| {
            profile.map_or(false, |p| if p.autofire { button.held } else { button.pressed })
        };
        let slot = if wants(&self.profiles[0], self.ctx.input.attack_one) {
            AttackSlot::One
        } else if wants(&self.profiles[1], self.ctx.input.attack_two) {
            AttackSlot::Two
        } else {
            return;
        };

        if combat::request_attack(self.timers, slot, self.tuning.input_buffer_time)
            == AttackRequest::Execute
        {
            self.execute(slot);
        }
    }

    fn execute(&mut self, slot: AttackSlot) {
        let index = match slot {
            AttackSlot::One => 0,
            AttackSlot::Two => 1,
        };
        let Some(profile) = self.profiles[index] else {
            return;
        };
        let (alt_enabled, air_enabled) = match slot {
            AttackSlot::One => (
                self.tuning.enable_alt_attack_anim_one,
                self.tuning.enable_air_attack_anim_one,
            ),
            AttackSlot::Two => (
                self.tuning.enable_alt_attack_anim_two,
                self.tuning.enable_air_attack_anim_two,
            ),
        };
        let airborne = air_enabled && !self.state.grounded;
        let alternate = combat::begin_attack(
            self.timers,
            slot,
            profile.time_between_attacks,
            alt_enabled && !airborne,
        );

        let animation = match (slot, airborne, alternate) {
            (AttackSlot::One, true, _) => "attackOneAir",
            (AttackSlot::One, false, true) => "attackOneAlt",
            (AttackSlot::One, false, false) => "attackOne",
            (AttackSlot::Two, true, _) => "attackTwoAir",
            (AttackSlot::Two, false, true) => "attackTwoAlt",
            (AttackSlot::Two, false, false) => "attackTwo",
        };
        self.out.animations.push(animation);
        self.out.attacks.push(slot);
    }

    fn dash(&mut self) {
        let tuning = self.tuning;
        if tuning.enable_dash
            && self.state.can_input
            && self.ctx.input.dash.pressed
            && combat::can_dash(self.timers, tuning.dash_downtime)
        {
            combat::start_dash(self.timers, tuning.dash_time);
            self.out.cues.push(Cue::new(&tuning.sounds.dash));
            self.out.animations.push("dash");
            self.out.velocity = Vec2::new(tuning.dash_speed * self.out.facing, 0.0);
        }
        if combat::is_dashing(self.timers) {
            self.out.velocity.x = tuning.dash_speed * self.out.facing;
            self.out.gravity_factor = tuning.dash_gravity_modifier;
        }
    }

    fn run_timers(&mut self) {
        let events = combat::advance(
            self.timers,
            self.ctx.dt,
            self.ctx.dt_unscaled,
            self.state.can_input,
            self.tuning.alt_attack_window,
            self.tuning.dash_downtime,
        );
        if let Some(slot) = events.buffered_attack {
            self.execute(slot);
        }
    }
}

