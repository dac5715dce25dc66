//! Encounter configuration: the authored data a session is built from.
//!
//! An encounter lists the projectile specs, the player and enemy setups and
//! the static ground. It is loaded from JSON and validated before use;
//! validation reports every problem it finds instead of stopping at the first.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use bossrush_core::enums::BehaviorKind;
use bossrush_core::error::{ConfigError, SpawnError};
use bossrush_core::spec::{BossTuning, HealthTuning, PlayerTuning, ProjectileSpec};
use bossrush_core::types::Aabb;

/// The player actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSetup {
    pub position: Vec2,
    /// Half extents of the body, centred on `position`.
    pub hitbox: Vec2,
    pub health: HealthTuning,
    pub tuning: PlayerTuning,
}

impl Default for PlayerSetup {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            hitbox: Vec2::new(0.4, 0.9),
            health: HealthTuning::default(),
            tuning: PlayerTuning::default(),
        }
    }
}

/// One enemy actor. Enemies do not move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySetup {
    pub name: String,
    pub position: Vec2,
    pub hitbox: Vec2,
    pub health: HealthTuning,
    /// Attack pattern, if this enemy attacks at all.
    pub boss: Option<BossTuning>,
    /// Whether aimed player projectiles may seek this enemy.
    pub targetable: bool,
}

impl Default for EnemySetup {
    fn default() -> Self {
        Self {
            name: "enemy".to_string(),
            position: Vec2::ZERO,
            hitbox: Vec2::splat(1.0),
            health: HealthTuning::default(),
            boss: None,
            targetable: true,
        }
    }
}

/// A complete encounter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    pub name: String,
    pub projectiles: Vec<ProjectileSpec>,
    pub player: PlayerSetup,
    pub enemies: Vec<EnemySetup>,
    pub ground: Vec<Aabb>,
}

impl EncounterConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every authoring problem in the encounter. Empty when it is sound.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let mut names = HashSet::new();
        for spec in &self.projectiles {
            if !names.insert(spec.name.as_str()) {
                errors.push(ConfigError::DuplicateSpec {
                    spec: spec.name.clone(),
                });
            }
        }

        for spec in &self.projectiles {
            validate_spec(spec, &names, &mut errors);
        }

        let tuning = &self.player.tuning;
        for (field, attack) in [
            ("player.attack_one", &tuning.attack_one),
            ("player.attack_two", &tuning.attack_two),
        ] {
            check_reference(attack, field, &names, &mut errors);
        }
        validate_health("player", &self.player.health, &mut errors);

        for enemy in &self.enemies {
            validate_health(&enemy.name, &enemy.health, &mut errors);
            if let Some(boss) = &enemy.boss {
                let aimed = format!("{}.aimed_attack", enemy.name);
                let ring = format!("{}.ring_attack", enemy.name);
                check_reference(&boss.aimed_attack, &aimed, &names, &mut errors);
                check_reference(&boss.ring_attack, &ring, &names, &mut errors);
            }
        }

        errors
    }
}

fn check_reference(
    name: &Option<String>,
    referenced_by: &str,
    names: &HashSet<&str>,
    errors: &mut Vec<ConfigError>,
) {
    if let Some(name) = name {
        if !names.contains(name.as_str()) {
            errors.push(ConfigError::MissingSpec {
                name: name.clone(),
                referenced_by: referenced_by.to_string(),
            });
        }
    }
}

fn invalid(owner: &str, field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        owner: owner.to_string(),
        field,
        reason: reason.to_string(),
    }
}

fn validate_spec(spec: &ProjectileSpec, names: &HashSet<&str>, errors: &mut Vec<ConfigError>) {
    let owner = spec.name.as_str();
    if spec.name.is_empty() {
        errors.push(invalid("<unnamed>", "name", "must not be empty"));
    }
    if !(spec.lifespan >= 0.0) {
        errors.push(invalid(owner, "lifespan", "must be zero or positive"));
    }
    if !(spec.death_wait_time >= 0.0) {
        errors.push(invalid(owner, "death_wait_time", "must be zero or positive"));
    }
    if !(spec.time_between_attacks >= 0.0) {
        errors.push(invalid(owner, "time_between_attacks", "must be zero or positive"));
    }
    if !(spec.spawn_delay >= 0.0) {
        errors.push(invalid(owner, "spawn_delay", "must be zero or positive"));
    }
    if spec.quantity == 0 {
        errors.push(invalid(owner, "quantity", "must be at least 1"));
    }
    if spec.hitbox.min_element() < 0.0 {
        errors.push(invalid(owner, "hitbox", "half extents must not be negative"));
    }

    for child in &spec.children {
        if !names.contains(child.as_str()) {
            errors.push(ConfigError::MissingChild {
                spec: spec.name.clone(),
                child: child.clone(),
            });
        }
    }

    match spec.behavior {
        BehaviorKind::Splitter | BehaviorKind::Lobber if spec.children.is_empty() => {
            errors.push(invalid(owner, "children", "this behavior releases a child spec"));
        }
        BehaviorKind::Bounce if spec.bounce_probe.is_none() => {
            errors.push(invalid(owner, "bounce_probe", "bounce projectiles need a ground probe"));
        }
        _ => {}
    }
}

fn validate_health(owner: &str, health: &HealthTuning, errors: &mut Vec<ConfigError>) {
    if !(health.max_health > 0.0) {
        errors.push(invalid(owner, "max_health", "must be positive"));
    }
    if !(health.immunity_frame_length >= 0.0) {
        errors.push(invalid(owner, "immunity_frame_length", "must be zero or positive"));
    }
}

/// Immutable projectile specs shared by every live projectile.
#[derive(Debug, Clone, Default)]
pub struct SpecLibrary {
    specs: HashMap<String, Arc<ProjectileSpec>>,
}

impl SpecLibrary {
    /// Fails only on duplicate names; other problems surface at spawn time.
    pub fn build(specs: &[ProjectileSpec]) -> Result<Self, ConfigError> {
        let mut library = HashMap::with_capacity(specs.len());
        for spec in specs {
            if library
                .insert(spec.name.clone(), Arc::new(spec.clone()))
                .is_some()
            {
                return Err(ConfigError::DuplicateSpec {
                    spec: spec.name.clone(),
                });
            }
        }
        Ok(Self { specs: library })
    }

    pub fn get(&self, name: &str) -> Result<Arc<ProjectileSpec>, SpawnError> {
        self.specs
            .get(name)
            .cloned()
            .ok_or_else(|| SpawnError::misconfigured(name, "no spec with this name"))
    }

    /// Like `get`, for optional references.
    pub fn resolve(&self, name: Option<&str>) -> Option<Arc<ProjectileSpec>> {
        let name = name?;
        match self.get(name) {
            Ok(spec) => Some(spec),
            Err(err) => {
                tracing::warn!(error = %err, "unresolved spec reference");
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
