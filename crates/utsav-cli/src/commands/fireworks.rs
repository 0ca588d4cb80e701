//! Headless fireworks session

use super::{print_json, Format};
use crate::config::FestivalConfig;
use crate::scene::FestivalScene;
use anyhow::{bail, Result};
use serde::Serialize;
use utsav_runtime::{GameEvent, InputEvent};

/// Longest session `simulate` accepts, in simulated seconds
pub const MAX_SECONDS: f64 = 3600.0;

pub struct FireworksArgs {
    pub launches: Vec<usize>,
    pub seconds: f64,
    pub fps: u32,
    pub seed: u32,
    pub format: String,
}

#[derive(Debug, Serialize)]
pub struct TimedEvent {
    pub time: f64,
    #[serde(flatten)]
    pub event: GameEvent,
}

#[derive(Debug, Serialize)]
pub struct FireworksReport {
    pub seed: u32,
    pub frames: u64,
    pub elapsed: f64,
    pub events: Vec<TimedEvent>,
    pub live_rockets: usize,
    pub live_bursts: usize,
    pub live_visuals: usize,
    pub instances: usize,
    pub instance_bytes: usize,
    pub flash_intensity: f32,
}

pub fn run(args: FireworksArgs, config: &FestivalConfig) -> Result<()> {
    let format = Format::parse(&args.format)?;
    let report = simulate(&args, config)?;
    match format {
        Format::Json => print_json(&report),
        Format::Text => {
            print_text(&report);
            Ok(())
        }
    }
}

/// Launch every requested pad at t = 0, then tick at a fixed rate
pub fn simulate(args: &FireworksArgs, config: &FestivalConfig) -> Result<FireworksReport> {
    if args.fps == 0 {
        bail!("--fps must be positive");
    }
    if !(args.seconds.is_finite() && (0.0..=MAX_SECONDS).contains(&args.seconds)) {
        bail!(
            "--seconds must be between 0 and {}, got {}",
            MAX_SECONDS,
            args.seconds
        );
    }

    let mut scene: FestivalScene = FestivalScene::new(config, args.seed)?;
    let dt = 1.0 / args.fps as f64;
    if dt > scene.max_step() {
        bail!(
            "--fps must be at least {} so no frame exceeds the clock's {}s step limit",
            (1.0 / scene.max_step()).ceil(),
            scene.max_step()
        );
    }
    let mut events = Vec::new();
    for &pad in &args.launches {
        scene.handle(InputEvent::LaunchPad { index: pad })?;
    }
    record(&mut events, 0.0, scene.drain_events());

    let frames = (args.seconds * args.fps as f64).ceil() as u64;
    for _ in 0..frames {
        scene.step(dt)?;
        let now = scene.now();
        record(&mut events, now, scene.drain_events());
    }

    let registry = scene.fireworks().registry();
    let batcher = scene.fireworks().batcher();
    let report = FireworksReport {
        seed: args.seed,
        frames,
        elapsed: scene.now(),
        events,
        live_rockets: registry.projectiles().len(),
        live_bursts: registry.bursts().len(),
        live_visuals: scene.live_ids().len(),
        instances: batcher.instance_data().len(),
        instance_bytes: batcher.instance_bytes().len(),
        flash_intensity: scene.flash_intensity(),
    };
    scene.shutdown()?;
    Ok(report)
}

fn record(into: &mut Vec<TimedEvent>, time: f64, events: Vec<GameEvent>) {
    into.extend(events.into_iter().map(|event| TimedEvent { time, event }));
}

fn print_text(report: &FireworksReport) {
    println!(
        "Fireworks session: seed {}, {} frame(s), {:.2}s",
        report.seed, report.frames, report.elapsed
    );
    for timed in &report.events {
        let line = match &timed.event {
            GameEvent::RocketLaunched { id, position } => format!(
                "rocket {} launched from ({:.1}, {:.1}, {:.1})",
                id, position.x, position.y, position.z
            ),
            GameEvent::RocketExploded { id, position, burst } => format!(
                "rocket {} exploded at height {:.2} -> burst {}",
                id, position.y, burst
            ),
            GameEvent::BurstExpired { id } => format!("burst {} faded out", id),
            other => format!("{:?}", other),
        };
        println!("  [{:>6.3}s] {}", timed.time, line);
    }
    println!(
        "Live: {} rocket(s), {} burst(s); {} instance(s) ({} bytes); flash {:.2}",
        report.live_rockets,
        report.live_bursts,
        report.instances,
        report.instance_bytes,
        report.flash_intensity
    );
}
