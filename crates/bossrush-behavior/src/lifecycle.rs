//! Projectile lifecycle: Active → Dying → Removed.
//!
//! Pure functions on a single `Projectile`. Hits and expiry are delegated to
//! the variant's `ProjectileBehavior`; this module owns the phase changes,
//! so a projectile that is no longer Active ignores every further report.

use bossrush_core::components::Projectile;
use bossrush_core::enums::ProjectilePhase;

use crate::audio::Cue;
use crate::behavior::{behavior_for, Arena, ChildRequest, Hit, Resolution, Terminal};
use crate::motion::advance_pose;

/// Why a projectile entered Dying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Expired,
    Hit,
}

/// Side effects of one lifecycle step, for the caller to carry out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub cues: Vec<Cue>,
    pub child: Option<ChildRequest>,
    /// Set when the projectile entered Dying during this call.
    pub died: Option<DeathCause>,
    pub bounced: bool,
    /// The projectile reached Removed and can be discarded.
    pub removed: bool,
}

/// Advance a projectile by one tick.
///
/// An Active projectile whose elapsed time passes its lifespan resolves its
/// expiry and enters Dying in this same call, without moving again.
pub fn tick(p: &mut Projectile, arena: &mut Arena<'_>) -> Outcome {
    let mut out = Outcome::default();
    match p.phase {
        ProjectilePhase::Active => {
            p.elapsed += arena.dt;
            if p.elapsed > p.spec.lifespan {
                let terminal = behavior_for(p.spec.behavior).on_expire(p, arena);
                enter_dying(p, terminal, DeathCause::Expired, &mut out);
                check_removal(p, &mut out);
            } else {
                advance_pose(p, arena.dt);
            }
        }
        ProjectilePhase::Dying => {
            p.elapsed += arena.dt;
            check_removal(p, &mut out);
        }
        ProjectilePhase::Removed => out.removed = true,
    }
    out
}

/// Report a hit. A no-op unless the projectile is Active.
pub fn try_destroy(p: &mut Projectile, hit: Hit, arena: &mut Arena<'_>) -> Outcome {
    let mut out = Outcome::default();
    if !p.is_active() {
        return out;
    }
    match behavior_for(p.spec.behavior).on_hit(p, hit, arena) {
        Resolution::Continue => {}
        Resolution::Bounced { cue } => {
            out.bounced = true;
            out.cues.push(cue);
        }
        Resolution::Die(terminal) => enter_dying(p, terminal, DeathCause::Hit, &mut out),
    }
    out
}

fn enter_dying(p: &mut Projectile, terminal: Terminal, cause: DeathCause, out: &mut Outcome) {
    p.phase = ProjectilePhase::Dying;
    p.elapsed = 0.0;
    out.cues.push(terminal.cue);
    out.child = terminal.child;
    out.died = Some(cause);
}

fn check_removal(p: &mut Projectile, out: &mut Outcome) {
    if p.elapsed > p.spec.death_wait_time {
        p.phase = ProjectilePhase::Removed;
        out.removed = true;
    }
}
