use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use glam::Vec3;
use instant::Instant;

use swarm_core::{
    GestureSlot, GestureState, PresetIndex, ShapeFamily, Simulation, SwarmConfig,
    TrackingSession, Visualizer,
};

mod script;

/// Headless gesture-driven particle swarm. Runs the full pipeline against a
/// scripted hand timeline and logs what a renderer would draw.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Built-in preset id, e.g. `cosmic-galaxy`
    #[arg(long)]
    preset: Option<String>,
    /// Shape family, overrides the preset
    #[arg(long)]
    shape: Option<ShapeFamily>,
    #[arg(long)]
    count: Option<usize>,
    /// Base point size
    #[arg(long)]
    size: Option<f32>,
    /// Base color as #rrggbb
    #[arg(long)]
    color: Option<String>,
    #[arg(long)]
    rainbow: bool,
    /// Saved preset record (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Frames to run before exiting
    #[arg(long, default_value_t = 900)]
    frames: u32,
    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
    /// Seconds each scripted gesture is held
    #[arg(long, default_value_t = 2.0)]
    hold: f32,
}

const FRAME: Duration = Duration::from_micros(16_667);
const TRACKING_INTERVAL: Duration = Duration::from_millis(33);
const REPORT_EVERY: u32 = 60;

fn load_config(args: &Args) -> anyhow::Result<SwarmConfig> {
    let mut config = if let Some(path) = &args.config {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str::<SwarmConfig>(&raw)
            .with_context(|| format!("parsing {}", path.display()))?
    } else if let Some(id) = &args.preset {
        PresetIndex::default().get(id)?.config()
    } else {
        SwarmConfig::default()
    };
    if let Some(shape) = args.shape {
        config.shape = shape;
    }
    if let Some(count) = args.count {
        config.particle_count = count;
    }
    if let Some(size) = args.size {
        config.particle_size = size;
    }
    if let Some(color) = &args.color {
        config.color = color.clone();
    }
    config.rainbow |= args.rainbow;
    config.validate()?;
    Ok(config)
}

fn bounds(positions: &[f32]) -> (Vec3, Vec3) {
    positions.chunks_exact(3).fold(
        (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
        |(lo, hi), p| {
            let v = Vec3::new(p[0], p[1], p[2]);
            (lo.min(v), hi.max(v))
        },
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    log::info!(
        "[native] {} x{} size {} color {}{}",
        config.shape,
        config.particle_count,
        config.particle_size,
        config.color,
        if config.rainbow { " (rainbow)" } else { "" }
    );

    let simulation = match args.seed {
        Some(seed) => Simulation::with_seed(config, seed)?,
        None => Simulation::new(config)?,
    };
    let mut visualizer = Visualizer::new(simulation);

    let slot = GestureSlot::new();
    let hold = Duration::from_secs_f32(args.hold.max(0.1));
    let source = script::ScriptedHands::new(hold, args.seed);
    let mut session = TrackingSession::spawn(source, slot.clone(), TRACKING_INTERVAL)?;

    let mut last_frame = Instant::now();
    let mut gesture = GestureState::None;
    for frame in 1..=args.frames {
        let latest = slot.poll();
        if let Some(g) = latest {
            gesture = g;
        }
        let dt = last_frame.elapsed().as_secs_f32();
        last_frame = Instant::now();

        let out = visualizer.frame(latest, dt);
        if frame % REPORT_EVERY == 0 {
            let (lo, hi) = bounds(out.positions);
            log::info!(
                "[native] frame {frame} gesture {} scale {:.2} explode {:.2} rotate {:.2} size {:.3} rot {:.2} bbox {:.2?}..{:.2?}",
                gesture.label(),
                out.controls.scale,
                out.controls.explode,
                out.controls.rotate,
                out.point_size,
                out.rotation_y,
                lo.to_array(),
                hi.to_array(),
            );
        }

        let spent = last_frame.elapsed();
        if spent < FRAME {
            thread::sleep(FRAME - spent);
        }
    }

    session.stop();
    visualizer.tracking_stopped();
    log::info!(
        "[native] done, rainbow {}",
        if visualizer.simulation().rainbow() { "on" } else { "off" }
    );
    Ok(())
}
