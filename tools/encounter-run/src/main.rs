//! encounter-run: headless encounter runner.
//!
//! Usage:
//!   encounter-run run [--encounter arena.json] [--ticks 1800] [--seed 42] [--every 60]
//!   encounter-run sample --output arena.json
//!
//! `run` drives the player with a scripted autopilot and prints one JSON
//! snapshot per line every `--every` ticks, plus the final snapshot.
//! Logging goes to stderr; set `RUST_LOG` to filter and `LOG_FORMAT=json`
//! for structured output.

use std::path::PathBuf;
use std::process;

use bossrush_core::commands::{ButtonState, PlayerCommand, PlayerInput};
use bossrush_core::constants::DT;
use bossrush_core::enums::GamePhase;
use bossrush_sim::config::EncounterConfig;
use bossrush_sim::scenario::sample_encounter;
use bossrush_sim::{SimConfig, SimulationEngine};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    }
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "sample" => cmd_sample(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "encounter-run: headless bossrush encounter runner\n\
         \n\
         Commands:\n\
         \n\
         run       Simulate an encounter with a scripted player\n\
         \n\
           --encounter <path> Encounter JSON (default: built-in sample)\n\
           --ticks <N>        Ticks to simulate at 60 Hz (default: 1800)\n\
           --seed <N>         RNG seed (default: 42)\n\
           --every <N>        Print a snapshot every N ticks (default: 60, 0 = final only)\n\
         \n\
         sample    Write the built-in sample encounter as JSON\n\
         \n\
           --output <path>    Output path (default: stdout)\n"
    );
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_flag<T: std::str::FromStr>(args: &[String], name: &str, default: T) -> T {
    match flag(args, name) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("Invalid value for {name}: {raw}");
            process::exit(1);
        }),
    }
}

/// Runs back and forth, holds the primary attack, and periodically jumps,
/// dashes and fires the secondary attack.
fn autopilot(tick: u64) -> PlayerInput {
    let pulse = |period: u64| {
        if tick % period == 0 {
            ButtonState::tap()
        } else {
            ButtonState::default()
        }
    };
    PlayerInput {
        horizontal: if (tick / 120) % 2 == 0 { 0.6 } else { -0.6 },
        jump: pulse(75),
        dash: pulse(180),
        attack_one: ButtonState::hold(),
        attack_two: pulse(50),
        ..Default::default()
    }
}

fn cmd_run(args: &[String]) {
    let encounter = match flag(args, "--encounter") {
        Some(path) => EncounterConfig::load(path).unwrap_or_else(|err| {
            eprintln!("Failed to load {path}: {err}");
            process::exit(1);
        }),
        None => sample_encounter(),
    };
    let ticks: u64 = parse_flag(args, "--ticks", 1800);
    let every: u64 = parse_flag(args, "--every", 60);
    let config = SimConfig {
        seed: parse_flag(args, "--seed", 42),
        ..Default::default()
    };

    let mut engine = SimulationEngine::new(config, encounter).unwrap_or_else(|err| {
        eprintln!("Invalid encounter: {err}");
        process::exit(1);
    });
    engine.queue_command(PlayerCommand::StartEncounter);

    let mut last = None;
    for tick in 0..ticks {
        let snapshot = engine.tick(DT, &autopilot(tick));
        if every > 0 && tick % every == 0 {
            print_json(&snapshot);
        }
        let done = matches!(snapshot.phase, GamePhase::Victory | GamePhase::Defeat);
        last = Some(snapshot);
        if done {
            break;
        }
    }

    if let Some(snapshot) = last {
        tracing::info!(
            phase = ?snapshot.phase,
            tick = snapshot.time.tick,
            projectiles = snapshot.projectiles.len(),
            "run finished"
        );
        print_json(&snapshot);
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{line}"),
        Err(err) => tracing::error!(%err, "failed to serialize snapshot"),
    }
}

fn cmd_sample(args: &[String]) {
    let json = sample_encounter().to_json_pretty().unwrap_or_else(|err| {
        eprintln!("Failed to serialize sample encounter: {err}");
        process::exit(1);
    });
    match flag(args, "--output").map(PathBuf::from) {
        Some(path) => {
            if let Err(err) = std::fs::write(&path, json) {
                eprintln!("Failed to write {}: {err}", path.display());
                process::exit(1);
            }
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
}
