//! `wayfinder-cli` – scenario replay for the navigation engine.
//!
//! ```text
//! wayfinder <scenario.json> [--target <name>]
//! ```
//!
//! 1. Loads `~/.wayfinder/config.toml` (defaults when absent) and applies
//!    `WAYFINDER_*` overrides.
//! 2. Loads the recorded scenario and resolves the target waypoint.
//! 3. Feeds every frame through [`NavigationEngine::tick`] in order and
//!    prints the guidance.
//! 4. Stops early on **Ctrl-C**.
//!
//! Exit code 1 on configuration or scenario errors, 2 on bad arguments.

mod config;
mod scenario;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use colored::{ColoredString, Colorize};
use tracing::{info, warn};

use scenario::Scenario;
use wayfinder_middleware::{EventBus, Topic};
use wayfinder_perception::PerceptionSource;
use wayfinder_runtime::NavigationEngine;
use wayfinder_types::{
    Direction, EventPayload, NavError, NavigationConfig, NavigationState, NavigationUpdate,
};

#[derive(Parser, Debug)]
#[command(name = "wayfinder")]
#[command(about = "Replay a recorded scenario through the navigation engine", long_about = None)]
struct Args {
    /// Scenario JSON file
    scenario: PathBuf,

    /// Waypoint name to navigate to (defaults to the scenario's target)
    #[arg(short, long)]
    target: Option<String>,
}

fn main() -> ExitCode {
    let _telemetry = wayfinder_runtime::init_tracing("wayfinder");
    let args = Args::parse();

    print_banner();

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_flag = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        println!();
        println!("{}", "⚠  Ctrl-C received – stopping replay …".yellow().bold());
        shutdown_flag.store(true, Ordering::SeqCst);
    }) {
        warn!(error = %e, "failed to install Ctrl-C handler");
    }

    let result = config::load().and_then(|cfg| {
        cfg.validate()?;
        println!(
            "  Config: {}",
            config::config_path().display().to_string().dimmed()
        );
        replay(&args, &cfg, &shutdown)
    });

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            ExitCode::from(1)
        }
    }
}

/// Feed every frame through a fresh engine and return the state reached
/// before the session is stopped.
fn replay(
    args: &Args,
    cfg: &NavigationConfig,
    shutdown: &AtomicBool,
) -> Result<NavigationState, NavError> {
    let scenario = Scenario::load(&args.scenario)?;
    let store = scenario.store();
    let target = scenario.resolve_target(&store, args.target.as_deref())?;

    let bus = EventBus::default();
    let mut session_events = bus.subscribe_to(Topic::Session);
    let mut engine = NavigationEngine::try_new(cfg)?.with_bus(bus);

    println!(
        "  Target: {} ({} frames)\n",
        target.name.bold(),
        scenario.frames.len()
    );
    engine.navigate_to_id(&store, target.id)?;

    let mut ticks = 0usize;
    for (i, frame) in scenario.frames.iter().enumerate() {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }
        let perception = frame.scene.as_ref().map(|s| s as &dyn PerceptionSource);
        if let Some(update) = engine.tick(frame.pose, perception) {
            print_update(i, &update);
        }
        for event in session_events.drain() {
            if let EventPayload::SessionChanged { from, to, .. } = event.payload {
                println!("        {} {from:?} → {to:?}", "session".dimmed());
            }
        }
        ticks += 1;
    }

    let final_state = engine.state();
    engine.stop();
    info!(ticks, state = ?final_state, "replay finished");
    println!(
        "\n  {} {ticks} frame(s) replayed, final state {}",
        "✓".green().bold(),
        format!("{final_state:?}").bold()
    );
    Ok(final_state)
}

fn print_update(frame: usize, update: &NavigationUpdate) {
    let message = if update.obstacle.detected {
        update.message.red().bold()
    } else {
        update.message.normal()
    };
    println!(
        "  [{frame:>4}] {:<9} {:>5.1} m {:>+7.1}°  {message}",
        direction_label(update.direction),
        update.horizontal_distance,
        update.bearing_deg,
    );
}

fn direction_label(direction: Direction) -> ColoredString {
    let label = direction.to_string();
    match direction {
        Direction::Straight => label.green(),
        Direction::Left | Direction::Right => label.cyan(),
        Direction::TurnBack => label.yellow(),
        Direction::Arrived => label.green().bold(),
        Direction::None => label.dimmed(),
    }
}

fn print_banner() {
    println!();
    println!(
        "  {} {}",
        "Wayfinder".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("  Pedestrian navigation replay");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("wayfinder").chain(list.iter().copied()))
    }

    fn scenario_file(dir: &tempfile::TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("walk.json");
        std::fs::write(&path, json).expect("write");
        path
    }

    #[test]
    fn parses_scenario_and_target() {
        let parsed = args(&["walk.json", "--target", "Desk"]).unwrap();
        assert_eq!(parsed.scenario, PathBuf::from("walk.json"));
        assert_eq!(parsed.target.as_deref(), Some("Desk"));
    }

    #[test]
    fn target_flag_may_come_first() {
        let parsed = args(&["-t", "Door", "walk.json"]).unwrap();
        assert_eq!(parsed.target.as_deref(), Some("Door"));
        assert_eq!(parsed.scenario, PathBuf::from("walk.json"));
    }

    #[test]
    fn target_is_optional() {
        let parsed = args(&["walk.json"]).unwrap();
        assert!(parsed.target.is_none());
    }

    #[test]
    fn help_is_reported() {
        let err = args(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn argument_errors() {
        assert_eq!(
            args(&[]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert!(args(&["walk.json", "--target"]).is_err());
        assert_eq!(
            args(&["walk.json", "--speed", "2"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
        assert!(args(&["a.json", "b.json"]).is_err());
    }

    #[test]
    fn replays_scenario_to_arrival() {
        let dir = tempfile::tempdir().expect("tmp dir");
        // Five-frame smoothing window: the trailing frames at the desk pull
        // the averaged position inside the arrival radius.
        let path = scenario_file(
            &dir,
            r#"{
                "waypoints": [{ "name": "Desk", "position": { "x": 2.0, "y": 0.0, "z": 0.0 } }],
                "frames": [
                    { "pose": { "position": { "x": 0.0, "y": 1.4, "z": 0.0 }, "heading_rad": 0.0 } },
                    { "pose": { "position": { "x": 1.0, "y": 1.4, "z": 0.0 }, "heading_rad": 0.0 } },
                    { "pose": { "position": { "x": 2.0, "y": 1.4, "z": 0.0 }, "heading_rad": 0.0 } },
                    { "pose": { "position": { "x": 2.0, "y": 1.4, "z": 0.0 }, "heading_rad": 0.0 } },
                    { "pose": { "position": { "x": 2.0, "y": 1.4, "z": 0.0 }, "heading_rad": 0.0 } },
                    { "pose": { "position": { "x": 2.0, "y": 1.4, "z": 0.0 }, "heading_rad": 0.0 } }
                ]
            }"#,
        );

        let a = args(&[path.to_str().expect("utf-8 path")]).unwrap();
        let state = replay(&a, &NavigationConfig::default(), &AtomicBool::new(false));
        assert_eq!(state.unwrap(), NavigationState::Arrived);
    }

    #[test]
    fn interrupted_replay_stays_navigating() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = scenario_file(
            &dir,
            r#"{
                "waypoints": [{ "name": "Desk", "position": { "x": 2.0, "y": 0.0, "z": 0.0 } }],
                "frames": [
                    { "pose": { "position": { "x": 2.0, "y": 1.4, "z": 0.0 }, "heading_rad": 0.0 } }
                ]
            }"#,
        );

        let a = args(&[path.to_str().expect("utf-8 path")]).unwrap();
        let state = replay(&a, &NavigationConfig::default(), &AtomicBool::new(true));
        assert_eq!(state.unwrap(), NavigationState::Navigating);
    }

    #[test]
    fn unknown_target_fails_replay() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = scenario_file(
            &dir,
            r#"{ "waypoints": [{ "name": "Desk", "position": { "x": 2.0, "y": 0.0, "z": 0.0 } }],
                 "frames": [] }"#,
        );

        let a = args(&[path.to_str().expect("utf-8 path"), "--target", "Attic"]).unwrap();
        assert!(matches!(
            replay(&a, &NavigationConfig::default(), &AtomicBool::new(false)),
            Err(NavError::UnknownWaypointName(_))
        ));
    }
}
