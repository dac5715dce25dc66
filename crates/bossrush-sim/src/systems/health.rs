//! Health timer system: immunity windows and hit flashes.

use hecs::World;

use bossrush_behavior::damage;
use bossrush_core::components::{Health, HitFlash};

pub fn run(world: &mut World, dt: f32) {
    for (_entity, health) in world.query_mut::<&mut Health>() {
        damage::tick_health(health, dt);
    }
    for (_entity, flash) in world.query_mut::<&mut HitFlash>() {
        damage::tick_flash(flash, dt);
    }
}
