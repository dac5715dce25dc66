//! Simulation engine: the core of an encounter.
//!
//! `SimulationEngine` owns the hecs ECS world and the session services
//! (RNG, audio manager, target registry), processes commands, runs all
//! systems and produces `GameStateSnapshot`s. Completely headless, so a
//! seeded session replays identically.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bossrush_behavior::audio::AudioManager;
use bossrush_behavior::targeting::TargetRegistry;
use bossrush_core::commands::{PlayerCommand, PlayerInput};
use bossrush_core::components::{Enemy, Health, Player, PlayerState, Targetable, Transform};
use bossrush_core::constants::{DEFAULT_PITCH_SPREAD, MAX_TIME_SCALE};
use bossrush_core::enums::GamePhase;
use bossrush_core::error::{ConfigError, SpawnError};
use bossrush_core::state::GameStateSnapshot;
use bossrush_core::types::{Pose, SimTime};

use crate::components::PendingVolley;
use crate::config::{EncounterConfig, SpecLibrary};
use crate::systems;
use crate::systems::collision::ContactSet;
use crate::systems::{entity_id, Feedback};
use crate::terrain::Terrain;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f32,
    /// Random pitch offset range for sound cues.
    pub pitch_spread: (f32, f32),
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            pitch_spread: DEFAULT_PITCH_SPREAD,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f32,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    feedback: Feedback,

    encounter: EncounterConfig,
    specs: SpecLibrary,
    terrain: Terrain,
    audio: AudioManager,
    targets: TargetRegistry,
    pending: Vec<PendingVolley>,
    contacts: ContactSet,
    player: Option<Entity>,
}

impl SimulationEngine {
    /// Create an engine for an encounter. Authoring problems are logged;
    /// only duplicate spec names are fatal.
    pub fn new(config: SimConfig, encounter: EncounterConfig) -> Result<Self, ConfigError> {
        for problem in encounter.validate() {
            tracing::warn!(encounter = %encounter.name, %problem, "encounter validation");
        }
        let specs = SpecLibrary::build(&encounter.projectiles)?;
        let terrain = Terrain::new(&encounter.ground);
        tracing::debug!(
            encounter = %encounter.name,
            specs = specs.len(),
            enemies = encounter.enemies.len(),
            seed = config.seed,
            "engine created"
        );

        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale.clamp(0.0, MAX_TIME_SCALE),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            feedback: Feedback::default(),
            encounter,
            specs,
            terrain,
            audio: AudioManager::new(config.pitch_spread),
            targets: TargetRegistry::new(),
            pending: Vec::new(),
            contacts: ContactSet::new(),
            player: None,
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` real seconds and return the resulting snapshot.
    pub fn tick(&mut self, dt: f32, input: &PlayerInput) -> GameStateSnapshot {
        self.process_commands();

        if self.phase.is_running() {
            self.run_systems(dt, input);
            self.time.advance(dt, self.time_scale);
        }

        let mut feedback = std::mem::take(&mut self.feedback);
        let audio_events = feedback
            .cues
            .drain(..)
            .filter_map(|cue| self.audio.play(&cue, &mut self.rng))
            .collect();
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.time_scale,
            audio_events,
            feedback.effects,
        )
    }

    /// Spawn a projectile outside any attack, e.g. from a scripted hazard.
    pub fn spawn_projectile(
        &mut self,
        spec: &str,
        position: Vec2,
        rotation_deg: f32,
        dir: f32,
    ) -> Result<Entity, SpawnError> {
        let spec = self.specs.get(spec)?;
        let pose = Pose::new(position, rotation_deg);
        Ok(world_setup::spawn_projectile(
            &mut self.world,
            spec,
            pose,
            dir,
            None,
            &mut self.feedback,
        ))
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The player entity, once the encounter has started.
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn encounter(&self) -> &EncounterConfig {
        &self.encounter
    }

    /// Get a mutable reference to the ECS world (for tests that stage situations).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Number of volleys waiting out a spawn delay.
    #[cfg(test)]
    pub fn pending_volleys(&self) -> usize {
        self.pending.len()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartEncounter => {
                if self.phase == GamePhase::Setup {
                    self.world.clear();
                    self.pending.clear();
                    self.contacts.clear();
                    self.targets = TargetRegistry::new();
                    let player =
                        world_setup::setup_encounter(&mut self.world, &self.encounter, &self.specs);
                    if self.encounter.player.tuning.enable_spawn_anim {
                        self.feedback.animation(player, "spawn");
                    }
                    self.player = Some(player);
                    self.phase = GamePhase::Active;
                    self.time = SimTime::default();
                    tracing::info!(encounter = %self.encounter.name, "encounter started");
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
            }
            PlayerCommand::SetInputEnabled { enabled } => {
                for (_entity, (state, health)) in
                    self.world.query_mut::<(&mut PlayerState, &Health)>()
                {
                    state.can_input = enabled && !health.dead;
                }
            }
        }
    }

    /// Register live targetable actors and mark the rest as gone.
    fn refresh_targets(&mut self) {
        self.targets.retain_existing(|_| false);
        for (entity, (transform, health, _)) in self
            .world
            .query::<(&Transform, &Health, &Targetable)>()
            .iter()
        {
            if !health.dead {
                self.targets.register(entity_id(entity), transform.position);
            }
        }
    }

    /// Victory when every enemy is dead, defeat when the player is.
    fn update_phase(&mut self) {
        if self.phase != GamePhase::Active {
            return;
        }
        let player_dead = self
            .world
            .query::<(&Player, &Health)>()
            .iter()
            .any(|(_, (_, health))| health.dead);
        let (mut enemies, mut enemies_dead) = (0usize, 0usize);
        for (_entity, (_, health)) in self.world.query::<(&Enemy, &Health)>().iter() {
            enemies += 1;
            if health.dead {
                enemies_dead += 1;
            }
        }

        if player_dead {
            self.phase = GamePhase::Defeat;
            tracing::info!(tick = self.time.tick, "encounter lost");
        } else if enemies > 0 && enemies_dead == enemies {
            self.phase = GamePhase::Victory;
            tracing::info!(tick = self.time.tick, "encounter won");
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32, input: &PlayerInput) {
        let scaled = dt * self.time_scale;

        // 1. Player control (ground check, movement, attacks, timers)
        systems::player::run(
            &mut self.world,
            &self.terrain,
            input,
            scaled,
            dt,
            &mut self.pending,
            &mut self.feedback,
        );
        // 2. Boss patterns
        systems::boss::run(
            &mut self.world,
            &self.specs,
            scaled,
            &mut self.rng,
            &mut self.feedback,
        );
        // 3. Delayed spawns
        systems::spawns::run(
            &mut self.world,
            &mut self.pending,
            scaled,
            &mut self.rng,
            &mut self.feedback,
        );
        // 4. Projectile lifecycle + motion
        self.refresh_targets();
        systems::projectiles::run(
            &mut self.world,
            &self.terrain,
            &mut self.targets,
            &self.specs,
            scaled,
            &mut self.rng,
            &mut self.feedback,
        );
        // 5. Body integration, then anchored projectiles follow their owners
        systems::bodies::run(&mut self.world, &self.terrain, scaled);
        systems::projectiles::follow_anchors(&mut self.world);
        // 6. Immunity and flash timers
        systems::health::run(&mut self.world, scaled);
        // 7. Collision + damage negotiation
        systems::collision::run(
            &mut self.world,
            &self.terrain,
            &mut self.targets,
            &self.specs,
            &mut self.contacts,
            scaled,
            &mut self.rng,
            &mut self.feedback,
        );
        // 8. Cleanup (Removed projectiles)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        // 9. Victory / defeat
        self.update_phase();
    }
}
