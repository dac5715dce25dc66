//! Tests for projectile motion and lifecycle, combat timers, the controller,
//! damage negotiation, targeting, volleys, boss patterns and audio cues.

use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bossrush_core::commands::{ButtonState, PlayerInput};
use bossrush_core::components::{BossState, CombatTimers, Health, HitFlash, PlayerState, Projectile};
use bossrush_core::curve::Curve;
use bossrush_core::enums::*;
use bossrush_core::spec::{
    HealthTuning, Modifier, PlayerSounds, PlayerTuning, ProbeBox, ProjectileSpec, SoundSpec,
};
use bossrush_core::types::{ColliderId, Pose};

use crate::audio::{AudioManager, Cue};
use crate::behavior::{Arena, Hit, OverlapProbe, TargetQuery};
use crate::boss::{self, BossContext};
use crate::combat::{self, AttackRequest};
use crate::controller::{self, AttackProfile, ControllerContext};
use crate::damage::{self, BlockReason, DamageOutcome, Strike};
use crate::lifecycle::{self, DeathCause};
use crate::motion::advance_pose;
use crate::targeting::{bearing_deg, select_nearest, TargetRegistry};
use crate::volley::{spread_point, volley_rotations};

// --- Helpers ---

struct Ground(bool);

impl OverlapProbe for Ground {
    fn overlaps(&self, _center: Vec2, _half_extents: Vec2, _collider: ColliderId) -> bool {
        self.0
    }
}

struct FixedBearing(f32);

impl TargetQuery for FixedBearing {
    fn nearest_bearing(&mut self, _from: Vec2) -> f32 {
        self.0
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn speed_spec(speed: f32) -> ProjectileSpec {
    ProjectileSpec {
        speed: Modifier::on(Curve::constant(speed)),
        ..ProjectileSpec::named("bolt")
    }
}

fn spawn(spec: ProjectileSpec) -> Projectile {
    Projectile::new(Arc::new(spec), Pose::default(), 1.0)
}

fn sound(clip: &str) -> Option<SoundSpec> {
    Some(SoundSpec::new(clip, 1.0))
}

/// Tick a projectile with no ground contact and a fixed target bearing.
fn tick(p: &mut Projectile, dt: f32) -> lifecycle::Outcome {
    let probe = Ground(false);
    let mut targets = FixedBearing(0.0);
    let mut arena = Arena {
        probe: &probe,
        targets: &mut targets,
        dt,
    };
    lifecycle::tick(p, &mut arena)
}

fn hit(p: &mut Projectile, what: Hit, floor: bool, dt: f32) -> lifecycle::Outcome {
    let probe = Ground(floor);
    let mut targets = FixedBearing(0.0);
    let mut arena = Arena {
        probe: &probe,
        targets: &mut targets,
        dt,
    };
    lifecycle::try_destroy(p, what, &mut arena)
}

// --- Motion ---

#[test]
fn test_progress_monotonic_until_expiry() {
    let mut p = spawn(speed_spec(5.0));
    let mut last_x = p.pose.position.x;
    for _ in 0..8 {
        let out = tick(&mut p, 0.125);
        assert_eq!(out.died, None);
        assert!(p.pose.position.x > last_x);
        last_x = p.pose.position.x;
    }
    assert_eq!(p.elapsed, 1.0);
    assert!(approx(p.pose.position.x, 5.0));

    // elapsed passes lifespan: dies this tick without moving
    let out = tick(&mut p, 0.125);
    assert_eq!(out.died, Some(DeathCause::Expired));
    assert_eq!(p.phase, ProjectilePhase::Dying);
    assert_eq!(p.pose.position.x, last_x);
    assert_eq!(p.elapsed, 0.0);
}

#[test]
fn test_world_space_ignores_rotation() {
    let spec = ProjectileSpec {
        movement_space: MovementSpace::World,
        ..speed_spec(2.0)
    };
    let mut p = Projectile::new(Arc::new(spec), Pose::new(Vec2::ZERO, 90.0), 1.0);
    p.elapsed = 0.1;
    advance_pose(&mut p, 0.5);
    assert!(p.pose.position.abs_diff_eq(Vec2::new(1.0, 0.0), 1e-5));
}

#[test]
fn test_local_space_follows_rotation_and_dir() {
    let mut p = Projectile::new(Arc::new(speed_spec(2.0)), Pose::new(Vec2::ZERO, 90.0), 1.0);
    advance_pose(&mut p, 0.5);
    assert!(p.pose.position.abs_diff_eq(Vec2::new(0.0, 1.0), 1e-5));

    let mut left = Projectile::new(Arc::new(speed_spec(2.0)), Pose::default(), -1.0);
    advance_pose(&mut left, 0.5);
    assert!(left.pose.position.abs_diff_eq(Vec2::new(-1.0, 0.0), 1e-5));
}

#[test]
fn test_curviness_turns_in_full_rotations() {
    let spec = ProjectileSpec {
        lifespan: 10.0,
        curviness: Modifier::on(Curve::constant(0.25)),
        ..ProjectileSpec::named("curl")
    };
    let spec = Arc::new(spec);
    let mut p = Projectile::new(spec.clone(), Pose::default(), 1.0);
    advance_pose(&mut p, 1.0);
    assert!(approx(p.pose.rotation_deg, 90.0));

    let mut mirrored = Projectile::new(spec, Pose::default(), -1.0);
    advance_pose(&mut mirrored, 1.0);
    assert!(approx(mirrored.pose.rotation_deg, -90.0));
}

#[test]
fn test_gravity_integrates_along_world_up() {
    let spec = ProjectileSpec {
        gravity: Modifier::on(Curve::constant(10.0)),
        initial_vertical_velocity: 5.0,
        ..ProjectileSpec::named("lob")
    };
    let mut p = Projectile::new(Arc::new(spec), Pose::new(Vec2::ZERO, 90.0), 1.0);
    assert_eq!(p.vertical_velocity, 5.0);
    advance_pose(&mut p, 0.1);
    assert!(approx(p.vertical_velocity, 4.0));
    assert!(approx(p.pose.position.y, 0.4));
    assert!(approx(p.pose.position.x, 0.0));
}

#[test]
fn test_size_is_absolute() {
    let spec = ProjectileSpec {
        size: Modifier::on(Curve::linear(1.0, 3.0)),
        ..ProjectileSpec::named("grow")
    };
    let mut p = spawn(spec);
    p.elapsed = 0.5;
    advance_pose(&mut p, 0.1);
    advance_pose(&mut p, 0.1);
    assert!(approx(p.pose.scale, 2.0));
}

#[test]
fn test_waviness_is_lateral() {
    let mut spec = ProjectileSpec::named("wave");
    spec.waviness.enabled = true;
    spec.waviness.amplitude = Curve::constant(2.0);
    spec.waviness.frequency = Curve::constant(0.0);
    let mut p = spawn(spec);
    advance_pose(&mut p, 0.1);
    assert!(p.pose.position.abs_diff_eq(Vec2::new(0.0, 0.2), 1e-5));
}

#[test]
fn test_disabled_modifiers_do_nothing() {
    let spec = ProjectileSpec {
        speed: Modifier {
            enabled: false,
            curve: Curve::constant(100.0),
        },
        initial_vertical_velocity: 3.0,
        ..ProjectileSpec::named("inert")
    };
    let mut p = spawn(spec);
    advance_pose(&mut p, 0.5);
    assert_eq!(p.pose, Pose::default());
    assert_eq!(p.vertical_velocity, 3.0);
}

// --- Lifecycle ---

#[test]
fn test_end_to_end_projectile_kills_enemy() {
    let spec = ProjectileSpec {
        damage: 10.0,
        friendly: true,
        ..speed_spec(5.0)
    };
    let mut p = spawn(spec);
    tick(&mut p, 0.05);
    tick(&mut p, 0.05);
    assert!(approx(p.pose.position.x, 0.5));

    let tuning = HealthTuning {
        max_health: 10.0,
        immunity_frame_length: 0.5,
        ..Default::default()
    };
    let mut enemy = Health::new(Faction::Enemy, &tuning);
    let strike = Strike {
        damage: p.spec.damage,
        friendly: p.spec.friendly,
    };
    let outcome = damage::negotiate(&mut enemy, strike, false);
    assert_eq!(
        outcome,
        DamageOutcome::Damaged {
            remaining: 0.0,
            killed: true
        }
    );
    assert!(enemy.dead);
    assert_eq!(enemy.current, 0.0);

    let out = hit(&mut p, Hit::Hitbox, false, 0.05);
    assert_eq!(out.died, Some(DeathCause::Hit));
}

#[test]
fn test_bounce_off_floor() {
    let spec = ProjectileSpec {
        behavior: BehaviorKind::Bounce,
        bounce_probe: Some(ProbeBox {
            offset: Vec2::new(0.0, -0.1),
            half_extents: Vec2::new(0.2, 0.05),
        }),
        hit_sound: sound("boing"),
        ..ProjectileSpec::named("ball")
    };
    let mut p = spawn(spec);
    p.vertical_velocity = -4.0;
    let out = hit(&mut p, Hit::Ground(ColliderId(0)), true, 0.1);
    assert!(out.bounced);
    assert_eq!(out.died, None);
    assert_eq!(p.phase, ProjectilePhase::Active);
    assert!(approx(p.vertical_velocity, 3.8));
    assert!(approx(p.pose.position.y, 0.38));
    assert_eq!(out.cues, vec![Cue::new(&sound("boing"))]);
}

#[test]
fn test_bounce_across_seam_stays_upward() {
    let spec = ProjectileSpec {
        behavior: BehaviorKind::Bounce,
        bounce_probe: Some(ProbeBox::default()),
        ..ProjectileSpec::named("ball")
    };
    let mut p = spawn(spec);
    p.vertical_velocity = -4.0;
    // Two floor tiles entered in the same tick.
    let first = hit(&mut p, Hit::Ground(ColliderId(0)), true, 0.1);
    let second = hit(&mut p, Hit::Ground(ColliderId(1)), true, 0.1);
    assert!(first.bounced && second.bounced);
    assert!(p.vertical_velocity > 0.0);
    assert!(p.pose.position.y > 0.0);
}

#[test]
fn test_bounce_dies_on_wall_and_actor() {
    let spec = Arc::new(ProjectileSpec {
        behavior: BehaviorKind::Bounce,
        bounce_probe: Some(ProbeBox::default()),
        ..ProjectileSpec::named("ball")
    });
    let mut wall = Projectile::new(spec.clone(), Pose::default(), 1.0);
    wall.vertical_velocity = -4.0;
    let out = hit(&mut wall, Hit::Ground(ColliderId(3)), false, 0.1);
    assert_eq!(out.died, Some(DeathCause::Hit));
    assert_eq!(wall.vertical_velocity, -4.0);

    let mut actor = Projectile::new(spec, Pose::default(), 1.0);
    let out = hit(&mut actor, Hit::Hitbox, true, 0.1);
    assert_eq!(out.died, Some(DeathCause::Hit));
}

#[test]
fn test_bounce_without_probe_dies() {
    let spec = ProjectileSpec {
        behavior: BehaviorKind::Bounce,
        ..ProjectileSpec::named("ball")
    };
    let mut p = spawn(spec);
    let out = hit(&mut p, Hit::Ground(ColliderId(0)), true, 0.1);
    assert_eq!(out.died, Some(DeathCause::Hit));
}

#[test]
fn test_piercing_survives_actors_not_ground() {
    let spec = Arc::new(ProjectileSpec {
        piercing: true,
        ..ProjectileSpec::named("lance")
    });
    let mut p = Projectile::new(spec, Pose::default(), 1.0);
    let out = hit(&mut p, Hit::Hitbox, false, 0.1);
    assert_eq!(out.died, None);
    assert!(p.is_active());

    let out = hit(&mut p, Hit::Ground(ColliderId(1)), false, 0.1);
    assert_eq!(out.died, Some(DeathCause::Hit));
}

#[test]
fn test_dying_ignores_further_hits() {
    let spec = ProjectileSpec {
        hit_sound: sound("thud"),
        ..ProjectileSpec::named("bolt")
    };
    let mut p = spawn(spec);
    let first = hit(&mut p, Hit::Hitbox, false, 0.1);
    assert_eq!(first.cues.len(), 1);

    let second = hit(&mut p, Hit::Hitbox, false, 0.1);
    assert_eq!(second, lifecycle::Outcome::default());
    assert_eq!(p.phase, ProjectilePhase::Dying);
}

#[test]
fn test_removed_after_death_wait() {
    let spec = ProjectileSpec {
        death_wait_time: 0.25,
        ..ProjectileSpec::named("bolt")
    };
    let mut p = spawn(spec);
    hit(&mut p, Hit::Hitbox, false, 0.125);
    assert!(!tick(&mut p, 0.125).removed);
    assert!(!tick(&mut p, 0.125).removed);
    assert!(tick(&mut p, 0.125).removed);
    assert_eq!(p.phase, ProjectilePhase::Removed);
}

#[test]
fn test_expiry_plays_expire_sound() {
    let spec = ProjectileSpec {
        lifespan: 0.1,
        expire_sound: sound("fizzle"),
        ..ProjectileSpec::named("bolt")
    };
    let mut p = spawn(spec);
    let out = tick(&mut p, 0.25);
    assert_eq!(out.died, Some(DeathCause::Expired));
    assert_eq!(out.cues, vec![Cue::new(&sound("fizzle"))]);
}

#[test]
fn test_splitter_releases_child_at_nearest_target() {
    let spec = ProjectileSpec {
        behavior: BehaviorKind::Splitter,
        lifespan: 0.1,
        children: vec!["shard".into()],
        spawn_sound: sound("split"),
        expire_sound: sound("fizzle"),
        ..ProjectileSpec::named("crackshot")
    };
    let mut p = Projectile::new(Arc::new(spec), Pose::new(Vec2::new(2.0, 1.0), 0.0), 1.0);
    let probe = Ground(false);
    let mut targets = FixedBearing(45.0);
    let mut arena = Arena {
        probe: &probe,
        targets: &mut targets,
        dt: 0.25,
    };
    let out = lifecycle::tick(&mut p, &mut arena);
    let child = out.child.expect("splitter child");
    assert_eq!(child.spec, "shard");
    assert_eq!(child.position, Vec2::new(2.0, 1.0));
    assert_eq!(child.rotation_deg, 45.0);
    assert_eq!(out.cues, vec![Cue::pitched(&sound("split"), 1.5)]);
}

#[test]
fn test_splitter_without_child_expires_normally() {
    let spec = ProjectileSpec {
        behavior: BehaviorKind::Splitter,
        lifespan: 0.1,
        expire_sound: sound("fizzle"),
        ..ProjectileSpec::named("crackshot")
    };
    let mut p = spawn(spec);
    let out = tick(&mut p, 0.25);
    assert!(out.child.is_none());
    assert_eq!(out.died, Some(DeathCause::Expired));
    assert_eq!(out.cues, vec![Cue::new(&sound("fizzle"))]);
}

#[test]
fn test_lobber_releases_child_on_landing() {
    let spec = ProjectileSpec {
        behavior: BehaviorKind::Lobber,
        children: vec!["explosion".into()],
        ..ProjectileSpec::named("grenade")
    };
    let mut p = Projectile::new(Arc::new(spec), Pose::new(Vec2::new(-1.0, 0.5), 30.0), 1.0);
    let out = hit(&mut p, Hit::Ground(ColliderId(0)), false, 0.1);
    let child = out.child.expect("explosion");
    assert_eq!(child.spec, "explosion");
    assert_eq!(child.position, Vec2::new(-1.0, 0.5));
    assert_eq!(child.rotation_deg, 0.0);
}

// --- Combat timers ---

#[test]
fn test_buffer_overwrite_last_write_wins() {
    let mut t = CombatTimers {
        attack_cooldown: 0.5,
        ..Default::default()
    };
    assert_eq!(combat::request_attack(&mut t, AttackSlot::One, 1.0), AttackRequest::Buffered);
    assert_eq!(combat::request_attack(&mut t, AttackSlot::Two, 1.0), AttackRequest::Buffered);

    let ev = combat::advance(&mut t, 0.25, 0.25, true, 0.0, 0.0);
    assert_eq!(ev.buffered_attack, None);
    let ev = combat::advance(&mut t, 0.25, 0.25, true, 0.0, 0.0);
    assert_eq!(ev.buffered_attack, Some(AttackSlot::Two));
    assert_eq!(t.buffered_attack, None);

    // consumed: nothing fires on later ticks
    let ev = combat::advance(&mut t, 0.25, 0.25, true, 0.0, 0.0);
    assert_eq!(ev.buffered_attack, None);
}

#[test]
fn test_expired_buffer_is_discarded() {
    let mut t = CombatTimers {
        attack_cooldown: 0.5,
        ..Default::default()
    };
    combat::request_attack(&mut t, AttackSlot::One, 0.125);
    combat::advance(&mut t, 0.25, 0.25, true, 0.0, 0.0);
    let ev = combat::advance(&mut t, 0.25, 0.25, true, 0.0, 0.0);
    assert_eq!(ev.buffered_attack, None);
    assert_eq!(t.buffered_attack, None);
}

#[test]
fn test_buffer_discarded_without_input() {
    let mut t = CombatTimers {
        attack_cooldown: 0.25,
        ..Default::default()
    };
    combat::request_attack(&mut t, AttackSlot::One, 1.0);
    let ev = combat::advance(&mut t, 0.25, 0.25, false, 0.0, 0.0);
    assert_eq!(ev.buffered_attack, None);
    assert_eq!(t.buffered_attack, None);
}

#[test]
fn test_buffer_runs_on_real_time() {
    let mut t = CombatTimers {
        attack_cooldown: 0.5,
        ..Default::default()
    };
    combat::request_attack(&mut t, AttackSlot::One, 0.5);
    // Half-speed simulation: the cooldown needs four ticks, the buffer only two.
    for _ in 0..3 {
        assert_eq!(combat::advance(&mut t, 0.125, 0.25, true, 0.0, 0.0).buffered_attack, None);
    }
    assert_eq!(t.input_buffer, 0.0);
    assert_eq!(combat::advance(&mut t, 0.125, 0.25, true, 0.0, 0.0).buffered_attack, None);
}

#[test]
fn test_dash_cooldown_measured_from_dash_end() {
    let mut t = combat::fresh(0.5);
    assert!(combat::can_dash(&t, 0.5));
    combat::start_dash(&mut t, 0.25);
    assert!(combat::is_dashing(&t));
    assert!(!combat::can_dash(&t, 0.5));

    let ev = combat::advance(&mut t, 0.25, 0.25, true, 0.0, 0.5);
    assert!(ev.dash_ended);
    assert!(!combat::can_dash(&t, 0.5));
    combat::advance(&mut t, 0.25, 0.25, true, 0.0, 0.5);
    assert!(!combat::can_dash(&t, 0.5));
    combat::advance(&mut t, 0.25, 0.25, true, 0.0, 0.5);
    assert!(combat::can_dash(&t, 0.5));
}

#[test]
fn test_attack_ends_dash() {
    let mut t = combat::fresh(0.5);
    combat::start_dash(&mut t, 0.25);
    combat::begin_attack(&mut t, AttackSlot::One, 0.5, false);
    assert!(!combat::is_dashing(&t));
    assert_eq!(t.attack_cooldown, 0.5);
}

#[test]
fn test_alternate_attack_alternates_inside_window() {
    let mut t = CombatTimers::default();
    assert!(!combat::begin_attack(&mut t, AttackSlot::One, 0.0, true));
    assert!(combat::begin_attack(&mut t, AttackSlot::One, 0.0, true));
    assert!(!combat::begin_attack(&mut t, AttackSlot::One, 0.0, true));
    // a different slot breaks the chain
    assert!(!combat::begin_attack(&mut t, AttackSlot::Two, 0.0, true));

    // the window closes once the cooldown has been over for long enough
    combat::advance(&mut t, 0.5, 0.5, true, 0.25, 0.0);
    assert_eq!(t.last_attack, None);
}

// --- Controller ---

fn profiles() -> [Option<AttackProfile>; 2] {
    [
        Some(AttackProfile {
            autofire: false,
            time_between_attacks: 0.5,
        }),
        Some(AttackProfile {
            autofire: true,
            time_between_attacks: 0.25,
        }),
    ]
}

fn ctx(input: &PlayerInput, touching_ground: bool) -> ControllerContext<'_> {
    ControllerContext {
        input,
        touching_ground,
        velocity: Vec2::ZERO,
        fall_speed: 0.0,
        facing: 1.0,
        dead: false,
        dt: 1.0 / 60.0,
        dt_unscaled: 1.0 / 60.0,
    }
}

#[test]
fn test_coyote_jump_after_leaving_ground() {
    let tuning = PlayerTuning::default();
    let mut state = PlayerState::default();
    let mut timers = combat::fresh(tuning.dash_downtime);
    let idle = PlayerInput::default();
    controller::step(&tuning, &profiles(), &mut state, &mut timers, ctx(&idle, true));
    assert!(state.grounded);

    let jump = PlayerInput {
        jump: ButtonState::tap(),
        ..Default::default()
    };
    let out = controller::step(&tuning, &profiles(), &mut state, &mut timers, ctx(&jump, false));
    assert!(!state.grounded);
    assert!(out.animations.contains(&"jump"));
    assert_eq!(out.velocity.y, tuning.jump_speed);
    // the double jump is still available
    assert!(state.can_double_jump);
}

#[test]
fn test_air_jump_uses_double_jump_without_coyote() {
    let tuning = PlayerTuning {
        coyote_time: 0.0,
        ..Default::default()
    };
    let mut state = PlayerState::default();
    let mut timers = combat::fresh(tuning.dash_downtime);
    let idle = PlayerInput::default();
    controller::step(&tuning, &profiles(), &mut state, &mut timers, ctx(&idle, true));

    let jump = PlayerInput {
        jump: ButtonState::tap(),
        ..Default::default()
    };
    let out = controller::step(&tuning, &profiles(), &mut state, &mut timers, ctx(&jump, false));
    assert!(!out.animations.contains(&"jump"));
    assert_eq!(out.velocity.y, tuning.jump_speed);
    assert!(!state.can_double_jump);
}

#[test]
fn test_jump_buffer_consumed_on_landing() {
    let tuning = PlayerTuning {
        enable_double_jump: false,
        coyote_time: 0.0,
        ..Default::default()
    };
    let mut state = PlayerState::default();
    let mut timers = combat::fresh(tuning.dash_downtime);

    let press = PlayerInput {
        jump: ButtonState::tap(),
        ..Default::default()
    };
    let out = controller::step(&tuning, &profiles(), &mut state, &mut timers, ctx(&press, false));
    assert_eq!(out.velocity.y, 0.0);
    assert!(timers.jump_buffer > 0.0);

    let hold = PlayerInput {
        jump: ButtonState::hold(),
        ..Default::default()
    };
    let out = controller::step(&tuning, &profiles(), &mut state, &mut timers, ctx(&hold, true));
    assert_eq!(out.velocity.y, tuning.jump_speed);
    assert_eq!(timers.jump_buffer, 0.0);
    assert!(out.animations.contains(&"land"));
}

#[test]
fn test_autofire_versus_press() {
    let tuning = PlayerTuning::default();
    let mut state = PlayerState::default();
    let mut timers = combat::fresh(tuning.dash_downtime);

    let held_one = PlayerInput {
        attack_one: ButtonState::hold(),
        ..Default::default()
    };
    let out = controller::step(&tuning, &profiles(), &mut state, &mut timers, ctx(&held_one, true));
    assert!(out.attacks.is_empty());

    let held_two = PlayerInput {
        attack_two: ButtonState::hold(),
        ..Default::default()
    };
    let out = controller::step(&tuning, &profiles(), &mut state, &mut timers, ctx(&held_two, true));
    assert_eq!(out.attacks, vec![AttackSlot::Two]);
    assert!(out.animations.contains(&"attackTwo"));
}

#[test]
fn test_dash_blocks_attacks_and_grants_invulnerability() {
    let tuning = PlayerTuning::default();
    let mut state = PlayerState::default();
    let mut timers = combat::fresh(tuning.dash_downtime);

    let dash = PlayerInput {
        dash: ButtonState::tap(),
        ..Default::default()
    };
    let out = controller::step(&tuning, &profiles(), &mut state, &mut timers, ctx(&dash, true));
    assert!(out.animations.contains(&"dash"));
    assert_eq!(out.velocity.x, tuning.dash_speed);
    assert_eq!(out.gravity_factor, tuning.dash_gravity_modifier);
    assert!(controller::is_invulnerable(&tuning, &timers));

    let attack = PlayerInput {
        attack_one: ButtonState::tap(),
        ..Default::default()
    };
    let out = controller::step(&tuning, &profiles(), &mut state, &mut timers, ctx(&attack, true));
    assert!(out.attacks.is_empty());
}

#[test]
fn test_horizontal_input_turns_player() {
    let tuning = PlayerTuning::default();
    let mut state = PlayerState::default();
    let mut timers = combat::fresh(tuning.dash_downtime);
    let left = PlayerInput {
        horizontal: -1.0,
        ..Default::default()
    };
    let out = controller::step(&tuning, &profiles(), &mut state, &mut timers, ctx(&left, true));
    assert_eq!(out.facing, -1.0);
    assert_eq!(out.velocity.x, -tuning.top_horizontal_speed);
}

#[test]
fn test_footsteps_while_running_on_ground() {
    let tuning = PlayerTuning {
        step_interval: 0.1,
        sounds: PlayerSounds {
            step: sound("step"),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut state = PlayerState::default();
    let mut timers = combat::fresh(tuning.dash_downtime);
    let run = PlayerInput {
        horizontal: 1.0,
        ..Default::default()
    };
    let step = Cue::new(&sound("step"));

    // 30 ticks at 60 Hz: one step on the first tick, then one every 0.1 s.
    let steps: usize = (0..30)
        .map(|_| {
            let out = controller::step(&tuning, &profiles(), &mut state, &mut timers, ctx(&run, true));
            out.cues.iter().filter(|c| **c == step).count()
        })
        .sum();
    assert!((5..=6).contains(&steps), "{steps} footsteps");

    let airborne = controller::step(&tuning, &profiles(), &mut state, &mut timers, ctx(&run, false));
    assert!(!airborne.cues.contains(&step));
}

#[test]
fn test_disabled_input_ignores_everything() {
    let tuning = PlayerTuning::default();
    let mut state = PlayerState {
        can_input: false,
        ..Default::default()
    };
    let mut timers = combat::fresh(tuning.dash_downtime);
    let input = PlayerInput {
        horizontal: 1.0,
        jump: ButtonState::tap(),
        dash: ButtonState::tap(),
        attack_one: ButtonState::tap(),
        ..Default::default()
    };
    let out = controller::step(&tuning, &profiles(), &mut state, &mut timers, ctx(&input, true));
    assert!(out.attacks.is_empty());
    assert_eq!(out.velocity, Vec2::ZERO);
    assert!(!combat::is_dashing(&timers));
}

// --- Damage ---

fn enemy(max: f32, immunity: f32) -> Health {
    let tuning = HealthTuning {
        max_health: max,
        immunity_frame_length: immunity,
        ..Default::default()
    };
    Health::new(Faction::Enemy, &tuning)
}

const FRIENDLY: Strike = Strike {
    damage: 3.0,
    friendly: true,
};

#[test]
fn test_immunity_window_blocks_second_hit() {
    let mut h = enemy(10.0, 0.5);
    assert_eq!(
        damage::negotiate(&mut h, FRIENDLY, false),
        DamageOutcome::Damaged {
            remaining: 7.0,
            killed: false
        }
    );
    let second = damage::negotiate(&mut h, FRIENDLY, false);
    assert_eq!(second, DamageOutcome::Blocked(BlockReason::Immune));
    assert!(second.is_hit());
    assert_eq!(h.current, 7.0);

    damage::tick_health(&mut h, 0.5);
    assert!(matches!(
        damage::negotiate(&mut h, FRIENDLY, false),
        DamageOutcome::Damaged { .. }
    ));
    assert_eq!(h.current, 4.0);
}

#[test]
fn test_polarity_mismatch_is_not_a_hit() {
    let mut player = Health::new(Faction::Player, &HealthTuning::default());
    let outcome = damage::negotiate(&mut player, FRIENDLY, false);
    assert_eq!(outcome, DamageOutcome::Ignored);
    assert!(!outcome.is_hit());

    let mut h = enemy(10.0, 0.0);
    let hostile = Strike {
        damage: 3.0,
        friendly: false,
    };
    assert_eq!(damage::negotiate(&mut h, hostile, false), DamageOutcome::Ignored);
}

#[test]
fn test_external_invulnerability_blocks() {
    let mut player = Health::new(Faction::Player, &HealthTuning::default());
    let hostile = Strike {
        damage: 1.0,
        friendly: false,
    };
    assert_eq!(
        damage::negotiate(&mut player, hostile, true),
        DamageOutcome::Blocked(BlockReason::Invulnerable)
    );
    assert_eq!(player.current, player.max);
}

#[test]
fn test_death_is_clamped_and_final() {
    let mut h = enemy(2.0, 0.0);
    let big = Strike {
        damage: 5.0,
        friendly: true,
    };
    assert_eq!(
        damage::negotiate(&mut h, big, false),
        DamageOutcome::Damaged {
            remaining: 0.0,
            killed: true
        }
    );
    assert!(h.dead);
    assert_eq!(
        damage::negotiate(&mut h, big, false),
        DamageOutcome::Blocked(BlockReason::Dead)
    );
    assert_eq!(h.current, 0.0);
}

#[test]
fn test_hit_flash_fades_out() {
    let mut flash = HitFlash {
        duration: 0.25,
        alpha: Curve::linear(1.0, 0.0),
        elapsed: None,
    };
    assert_eq!(damage::flash_alpha(&flash), 0.0);
    damage::start_flash(&mut flash);
    assert!(approx(damage::flash_alpha(&flash), 1.0));
    damage::tick_flash(&mut flash, 0.125);
    assert!(approx(damage::flash_alpha(&flash), 0.5));
    damage::tick_flash(&mut flash, 0.125);
    assert_eq!(flash.elapsed, None);
}

// --- Targeting ---

#[test]
fn test_nearest_target_wins() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let candidates = [Vec2::new(0.0, 3.0), Vec2::new(-5.0, 0.0), Vec2::new(0.0, -1.0)];
    for _ in 0..20 {
        let chosen = select_nearest(Vec2::ZERO, candidates, &mut rng);
        assert_eq!(chosen, Some(Vec2::new(0.0, -1.0)));
    }
    assert!(approx(bearing_deg(Vec2::ZERO, Vec2::new(0.0, -1.0)), -90.0));
    assert!(approx(bearing_deg(Vec2::ZERO, Vec2::new(0.0, 2.0)), 90.0));
    assert!(approx(bearing_deg(Vec2::ZERO, Vec2::new(-1.0, 0.0)), 180.0));
}

#[test]
fn test_ties_split_evenly() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let candidates = [Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0)];
    let trials = 2000;
    let right = (0..trials)
        .filter(|_| select_nearest(Vec2::ZERO, candidates, &mut rng) == Some(candidates[0]))
        .count();
    assert!(right > 850 && right < 1150, "right chosen {} times", right);
}

#[test]
fn test_registry_prunes_dead_targets() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut registry = TargetRegistry::new();
    assert_eq!(registry.nearest_bearing(Vec2::ZERO, &mut rng), 0.0);

    registry.register(1, Vec2::new(1.0, 0.0));
    registry.register(2, Vec2::new(0.0, 5.0));
    registry.update(1, Vec2::new(1.0, 0.0), false);
    assert!(approx(registry.nearest_bearing(Vec2::ZERO, &mut rng), 90.0));
    assert_eq!(registry.len(), 1);

    registry.retain_existing(|_| false);
    assert_eq!(registry.nearest_bearing(Vec2::ZERO, &mut rng), 0.0);
    assert!(registry.is_empty());
}

// --- Volleys ---

#[test]
fn test_even_spread_without_randomness() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    assert_eq!(spread_point(0, 3, 0.0, &mut rng), 0.0);
    assert_eq!(spread_point(1, 3, 0.0, &mut rng), 0.5);
    assert_eq!(spread_point(2, 3, 0.0, &mut rng), 1.0);
    assert_eq!(spread_point(0, 1, 0.0, &mut rng), 0.5);

    let spec = ProjectileSpec {
        quantity: 3,
        spread: Modifier::on(Curve::linear(-30.0, 30.0)),
        ..ProjectileSpec::named("fan")
    };
    let rotations = volley_rotations(&spec, -1.0, &mut rng);
    assert_eq!(rotations.len(), 3);
    assert!(approx(rotations[0], 30.0));
    assert!(approx(rotations[1], 0.0));
    assert!(approx(rotations[2], -30.0));
}

#[test]
fn test_random_spread_stays_in_slot_window() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    for _ in 0..200 {
        let t = spread_point(1, 4, 1.0, &mut rng);
        let mid = 1.0 / 3.0;
        assert!((t - mid).abs() <= 0.125 + 1e-6, "t = {}", t);
        let edge = spread_point(0, 4, 1.0, &mut rng);
        assert!((0.0..=0.125 + 1e-6).contains(&edge));
    }
}

#[test]
fn test_volley_without_spread_faces_forward() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let spec = ProjectileSpec {
        quantity: 2,
        ..ProjectileSpec::named("pair")
    };
    assert_eq!(volley_rotations(&spec, 1.0, &mut rng), vec![0.0, 0.0]);
}

// --- Boss ---

#[test]
fn test_boss_burst_cadence() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let aimed = ProjectileSpec {
        quantity: 2,
        time_between_attacks: 0.5,
        ..ProjectileSpec::named("aimed")
    };
    let mut state = boss::new_state(0.0);
    let ctx = BossContext {
        dt: 0.75,
        position: Vec2::ZERO,
        player_position: Some(Vec2::new(0.0, 4.0)),
        aimed: Some(&aimed),
        ring: None,
    };
    let fired: Vec<bool> = (0..10)
        .map(|_| !boss::step(&mut state, &ctx, &mut rng).is_empty())
        .collect();
    assert_eq!(
        fired,
        vec![true, true, false, false, false, false, false, false, true, true]
    );

    let shots = boss::step(&mut BossState::default(), &ctx, &mut rng);
    assert!(approx(shots[0].rotation_deg, 90.0));
}

#[test]
fn test_boss_ring_is_evenly_spaced() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let ring = ProjectileSpec {
        quantity: 4,
        time_between_attacks: 0.5,
        ..ProjectileSpec::named("ring")
    };
    let mut state = boss::new_state(0.0);
    let ctx = BossContext {
        dt: 1.0,
        position: Vec2::ZERO,
        player_position: None,
        aimed: None,
        ring: Some(&ring),
    };
    let shots = boss::step(&mut state, &ctx, &mut rng);
    assert_eq!(shots.len(), 4);
    assert!(shots[0].rotation_deg >= 0.0 && shots[0].rotation_deg < 90.0);
    for pair in shots.windows(2) {
        assert!(approx(pair[1].rotation_deg - pair[0].rotation_deg, 90.0));
    }
}

#[test]
fn test_boss_waits_out_initial_delay() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let aimed = ProjectileSpec {
        quantity: 3,
        time_between_attacks: 0.5,
        ..ProjectileSpec::named("aimed")
    };
    let mut state = boss::new_state(5.0);
    let ctx = BossContext {
        dt: 1.0,
        position: Vec2::ZERO,
        player_position: Some(Vec2::X),
        aimed: Some(&aimed),
        ring: None,
    };
    for _ in 0..5 {
        assert!(boss::step(&mut state, &ctx, &mut rng).is_empty());
    }
    assert_eq!(boss::step(&mut state, &ctx, &mut rng).len(), 1);
}

// --- Audio ---

#[test]
fn test_audio_manager_skips_silent_cues() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let audio = AudioManager::new((0.1, -0.1));
    assert_eq!(audio.pitch_spread(), (-0.1, 0.1));
    assert_eq!(audio.play(&Cue::silent(), &mut rng), None);

    let cue = Cue::pitched(&Some(SoundSpec::new("split", 0.5)), 1.5);
    for _ in 0..50 {
        let event = audio.play(&cue, &mut rng).expect("audible cue");
        assert_eq!(event.clip, "split");
        assert_eq!(event.volume, 0.5);
        assert!(event.pitch > 1.39 && event.pitch < 1.61);
    }
}
