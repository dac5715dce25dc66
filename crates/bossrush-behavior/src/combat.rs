//! Combat timers: attack cooldown and buffer, jump buffer and hold, coyote
//! time, and the dash window.
//!
//! Actions taken during a tick set timers first; `advance` runs last so a
//! timer set this tick is not decremented until the next one. Input buffers
//! run on real time. Everything else runs on scaled simulation time.

use bossrush_core::components::CombatTimers;
use bossrush_core::enums::AttackSlot;

/// What to do with an attack input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackRequest {
    /// No cooldown is running; execute now.
    Execute,
    /// Stored as the pending buffered attack.
    Buffered,
}

/// Events raised while advancing the timers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerEvents {
    /// A buffered attack that should execute now.
    pub buffered_attack: Option<AttackSlot>,
    pub dash_ended: bool,
}

/// Timers for a fresh actor: nothing pending and the dash ready.
pub fn fresh(dash_downtime: f32) -> CombatTimers {
    CombatTimers {
        dash_timer: -dash_downtime.max(0.0),
        ..Default::default()
    }
}

/// Route an attack input. While the cooldown runs the request overwrites
/// any pending buffered attack and restarts the buffer window.
pub fn request_attack(t: &mut CombatTimers, slot: AttackSlot, buffer_time: f32) -> AttackRequest {
    if t.attack_cooldown > 0.0 {
        t.buffered_attack = Some(slot);
        t.input_buffer = buffer_time;
        AttackRequest::Buffered
    } else {
        AttackRequest::Execute
    }
}

/// Start an attack: set its cooldown and cut any active dash short.
///
/// Returns whether the follow-up ("alternate") animation should play.
/// With `alternate_allowed`, repeating the same slot inside the window
/// alternates between the normal and the alternate animation.
pub fn begin_attack(
    t: &mut CombatTimers,
    slot: AttackSlot,
    cooldown: f32,
    alternate_allowed: bool,
) -> bool {
    t.dash_timer = t.dash_timer.min(0.0);
    t.attack_cooldown = cooldown;
    let alternate = alternate_allowed && t.last_attack == Some((slot, false));
    t.last_attack = Some((slot, alternate));
    alternate
}

/// Advance every timer by one tick.
///
/// When the attack cooldown runs out the pending buffered attack is taken;
/// it is returned for execution only if its buffer window is still open and
/// input is permitted, otherwise it is discarded.
pub fn advance(
    t: &mut CombatTimers,
    dt: f32,
    dt_unscaled: f32,
    can_input: bool,
    alt_attack_window: f32,
    dash_downtime: f32,
) -> TimerEvents {
    let mut events = TimerEvents::default();

    t.input_buffer = (t.input_buffer - dt_unscaled).max(0.0);
    t.jump_buffer = (t.jump_buffer - dt_unscaled).max(0.0);
    t.jump_hold = (t.jump_hold - dt).max(0.0);
    t.coyote = (t.coyote - dt).max(0.0);

    if t.attack_cooldown > 0.0 {
        t.attack_cooldown -= dt;
        if t.attack_cooldown <= 0.0 {
            let pending = t.buffered_attack.take();
            if t.input_buffer > 0.0 && can_input {
                events.buffered_attack = pending;
            }
        }
    } else {
        t.attack_cooldown = (t.attack_cooldown - dt).max(-alt_attack_window.max(0.0));
        if t.attack_cooldown <= -alt_attack_window {
            t.last_attack = None;
        }
    }

    if t.dash_timer > 0.0 {
        t.dash_timer -= dt;
        events.dash_ended = t.dash_timer <= 0.0;
    } else {
        t.dash_timer = (t.dash_timer - dt).max(-dash_downtime.max(0.0));
    }

    events
}

pub fn is_dashing(t: &CombatTimers) -> bool {
    t.dash_timer > 0.0
}

/// The dash cooldown is measured from the end of the previous dash.
pub fn can_dash(t: &CombatTimers, dash_downtime: f32) -> bool {
    t.dash_timer <= -dash_downtime
}

pub fn start_dash(t: &mut CombatTimers, dash_time: f32) {
    t.dash_timer = dash_time;
}

pub fn buffer_jump(t: &mut CombatTimers, buffer_time: f32) {
    t.jump_buffer = buffer_time;
}

/// Consume a live jump buffer.
pub fn take_jump_buffer(t: &mut CombatTimers) -> bool {
    let live = t.jump_buffer > 0.0;
    t.jump_buffer = 0.0;
    live
}
