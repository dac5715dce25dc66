//! Damage negotiation between a projectile and a health component.
//!
//! Health starts at max, clamps at zero and dies at zero. The immunity
//! timer is set on every accepted hit, never accumulated.

use bossrush_core::components::{Health, HitFlash};
use bossrush_core::enums::Faction;

/// The damage-relevant part of a projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub damage: f32,
    pub friendly: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    Dead,
    /// An external source such as a dash window.
    Invulnerable,
    /// The post-hit immunity window.
    Immune,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Wrong polarity: the projectile does not interact with this actor at all.
    Ignored,
    /// A hit that dealt no damage. The projectile still resolves it.
    Blocked(BlockReason),
    Damaged { remaining: f32, killed: bool },
}

impl DamageOutcome {
    /// Whether the projectile should be told it hit something.
    pub fn is_hit(&self) -> bool {
        !matches!(self, DamageOutcome::Ignored)
    }
}

/// Players are hurt by hostile projectiles, enemies by friendly ones.
pub fn accepts(faction: Faction, friendly: bool) -> bool {
    match faction {
        Faction::Player => !friendly,
        Faction::Enemy => friendly,
    }
}

/// Resolve one overlap. `invulnerable` carries sources outside the health
/// component (a dash window); any single source blocks damage.
pub fn negotiate(health: &mut Health, strike: Strike, invulnerable: bool) -> DamageOutcome {
    if !accepts(health.faction, strike.friendly) {
        return DamageOutcome::Ignored;
    }
    if health.dead {
        return DamageOutcome::Blocked(BlockReason::Dead);
    }
    if invulnerable {
        return DamageOutcome::Blocked(BlockReason::Invulnerable);
    }
    if health.immunity_remaining > 0.0 {
        return DamageOutcome::Blocked(BlockReason::Immune);
    }

    health.current = (health.current - strike.damage).max(0.0);
    health.immunity_remaining = health.immunity_frame_length;
    let killed = health.current <= 0.0;
    if killed {
        health.dead = true;
    }
    DamageOutcome::Damaged {
        remaining: health.current,
        killed,
    }
}

/// Count down the immunity window.
pub fn tick_health(health: &mut Health, dt: f32) {
    health.immunity_remaining = (health.immunity_remaining - dt).max(0.0);
}

pub fn start_flash(flash: &mut HitFlash) {
    flash.elapsed = Some(0.0);
}

/// Advance a running flash; it ends once its duration has passed.
pub fn tick_flash(flash: &mut HitFlash, dt: f32) {
    if let Some(elapsed) = flash.elapsed {
        let next = elapsed + dt;
        flash.elapsed = (next < flash.duration).then_some(next);
    }
}

/// Current flash alpha, 0 when not flashing.
pub fn flash_alpha(flash: &HitFlash) -> f32 {
    match flash.elapsed {
        Some(elapsed) if flash.duration > 0.0 => flash.alpha.sample(elapsed / flash.duration),
        _ => 0.0,
    }
}
