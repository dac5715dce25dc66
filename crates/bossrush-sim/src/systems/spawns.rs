//! Delayed spawn system. Releases volleys whose spawn delay has run out.

use hecs::World;
use rand::Rng;

use crate::components::PendingVolley;
use crate::systems::Feedback;
use crate::world_setup;

/// Count down pending volleys and fire the ready ones in request order.
/// A zero delay fires in the tick the attack executed.
pub fn run<R: Rng>(
    world: &mut World,
    pending: &mut Vec<PendingVolley>,
    dt: f32,
    rng: &mut R,
    fb: &mut Feedback,
) {
    let mut ready = Vec::new();
    pending.retain_mut(|volley| {
        volley.remaining -= dt;
        if volley.remaining <= 0.0 {
            ready.push((volley.owner, volley.spec.clone()));
            false
        } else {
            true
        }
    });

    for (owner, spec) in ready {
        world_setup::spawn_volley(world, owner, &spec, rng, fb);
    }
}
