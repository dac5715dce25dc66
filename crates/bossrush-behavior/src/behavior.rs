//! Projectile behaviour variants.
//!
//! The lifecycle FSM owns the phases; a `ProjectileBehavior` only decides
//! what a hit or an expiry means for its variant. No ECS dependency.

use glam::Vec2;

use bossrush_core::components::Projectile;
use bossrush_core::constants::{BOUNCE_RESTITUTION, SPLIT_SPAWN_PITCH};
use bossrush_core::enums::{BehaviorKind, HitKind};
use bossrush_core::types::ColliderId;

use crate::audio::Cue;

/// Answers whether a box overlaps one specific piece of ground.
pub trait OverlapProbe {
    fn overlaps(&self, center: Vec2, half_extents: Vec2, collider: ColliderId) -> bool;
}

/// Answers where the nearest live target is.
pub trait TargetQuery {
    /// Bearing in degrees from `from` to the nearest live target; 0 when there is none.
    fn nearest_bearing(&mut self, from: Vec2) -> f32;
}

/// Services a behaviour may consult while resolving a hook.
pub struct Arena<'a> {
    pub probe: &'a dyn OverlapProbe,
    pub targets: &'a mut dyn TargetQuery,
    /// Length of the current tick (scaled seconds).
    pub dt: f32,
}

/// What a projectile ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Ground(ColliderId),
    Hitbox,
}

impl Hit {
    pub fn kind(self) -> HitKind {
        match self {
            Hit::Ground(_) => HitKind::Ground,
            Hit::Hitbox => HitKind::Hitbox,
        }
    }
}

/// A projectile to spawn from another one's death.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildRequest {
    pub spec: String,
    pub position: Vec2,
    pub rotation_deg: f32,
}

/// How a projectile dies.
#[derive(Debug, Clone, PartialEq)]
pub struct Terminal {
    pub cue: Cue,
    pub child: Option<ChildRequest>,
}

/// Result of a hit hook.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Passes through; stays Active.
    Continue,
    /// Rebounded off a floor; stays Active.
    Bounced { cue: Cue },
    Die(Terminal),
}

/// Hit-response and expiry-response hooks of one projectile variant.
pub trait ProjectileBehavior: Sync {
    /// Called once when `elapsed > lifespan` while Active. Always terminal.
    fn on_expire(&self, p: &Projectile, arena: &mut Arena<'_>) -> Terminal;

    /// Called for every qualifying hit while Active.
    fn on_hit(&self, p: &mut Projectile, hit: Hit, arena: &mut Arena<'_>) -> Resolution;
}

pub struct DefaultBehavior;
pub struct BounceBehavior;
pub struct SplitterBehavior;
pub struct LobberBehavior;

static DEFAULT: DefaultBehavior = DefaultBehavior;
static BOUNCE: BounceBehavior = BounceBehavior;
static SPLITTER: SplitterBehavior = SplitterBehavior;
static LOBBER: LobberBehavior = LobberBehavior;

/// Resolve a variant tag to its hooks.
pub fn behavior_for(kind: BehaviorKind) -> &'static dyn ProjectileBehavior {
    match kind {
        BehaviorKind::Default => &DEFAULT,
        BehaviorKind::Bounce => &BOUNCE,
        BehaviorKind::Splitter => &SPLITTER,
        BehaviorKind::Lobber => &LOBBER,
    }
}

fn expire(p: &Projectile) -> Terminal {
    Terminal {
        cue: Cue::new(&p.spec.expire_sound),
        child: None,
    }
}

fn die_from_hit(p: &Projectile) -> Resolution {
    Resolution::Die(Terminal {
        cue: Cue::new(&p.spec.hit_sound),
        child: None,
    })
}

/// Ground always ends the projectile; actor hits only when not piercing.
fn default_hit(p: &Projectile, hit: Hit) -> Resolution {
    match hit {
        Hit::Hitbox if p.spec.piercing => Resolution::Continue,
        _ => die_from_hit(p),
    }
}

fn first_child<'s>(p: &'s Projectile) -> Option<&'s str> {
    let child = p.spec.children.first().map(String::as_str);
    if child.is_none() {
        tracing::warn!(
            spec = %p.spec.name,
            behavior = ?p.spec.behavior,
            "projectile has no child spec to release"
        );
    }
    child
}

impl ProjectileBehavior for DefaultBehavior {
    fn on_expire(&self, p: &Projectile, _arena: &mut Arena<'_>) -> Terminal {
        expire(p)
    }

    fn on_hit(&self, p: &mut Projectile, hit: Hit, _arena: &mut Arena<'_>) -> Resolution {
        default_hit(p, hit)
    }
}

impl ProjectileBehavior for BounceBehavior {
    fn on_expire(&self, p: &Projectile, _arena: &mut Arena<'_>) -> Terminal {
        expire(p)
    }

    fn on_hit(&self, p: &mut Projectile, hit: Hit, arena: &mut Arena<'_>) -> Resolution {
        let collider = match hit {
            Hit::Ground(collider) => collider,
            Hit::Hitbox => return die_from_hit(p),
        };
        let Some(probe) = p.spec.bounce_probe else {
            tracing::warn!(spec = %p.spec.name, "bounce projectile has no probe box");
            return die_from_hit(p);
        };

        // Still touching the same collider just below us: a floor, not a wall.
        let center = p.pose.position + probe.offset;
        if !arena.probe.overlaps(center, probe.half_extents, collider) {
            return die_from_hit(p);
        }

        // Always upward, so a second floor contact in the same tick cannot flip it back down.
        p.vertical_velocity = p.vertical_velocity.abs() * BOUNCE_RESTITUTION;
        p.pose.position.y += p.vertical_velocity * arena.dt;
        Resolution::Bounced {
            cue: Cue::new(&p.spec.hit_sound),
        }
    }
}

impl ProjectileBehavior for SplitterBehavior {
    fn on_expire(&self, p: &Projectile, arena: &mut Arena<'_>) -> Terminal {
        let Some(child) = first_child(p) else {
            return expire(p);
        };
        let position = p.pose.position;
        Terminal {
            cue: Cue::pitched(&p.spec.spawn_sound, SPLIT_SPAWN_PITCH),
            child: Some(ChildRequest {
                spec: child.to_string(),
                position,
                rotation_deg: arena.targets.nearest_bearing(position),
            }),
        }
    }

    fn on_hit(&self, p: &mut Projectile, hit: Hit, _arena: &mut Arena<'_>) -> Resolution {
        default_hit(p, hit)
    }
}

impl LobberBehavior {
    fn release(p: &Projectile, cue: Cue) -> Terminal {
        Terminal {
            cue,
            child: first_child(p).map(|child| ChildRequest {
                spec: child.to_string(),
                position: p.pose.position,
                rotation_deg: 0.0,
            }),
        }
    }
}

impl ProjectileBehavior for LobberBehavior {
    fn on_expire(&self, p: &Projectile, _arena: &mut Arena<'_>) -> Terminal {
        Self::release(p, Cue::new(&p.spec.expire_sound))
    }

    fn on_hit(&self, p: &mut Projectile, hit: Hit, _arena: &mut Arena<'_>) -> Resolution {
        match default_hit(p, hit) {
            Resolution::Die(_) => Resolution::Die(Self::release(p, Cue::new(&p.spec.hit_sound))),
            other => other,
        }
    }
}
