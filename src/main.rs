use std::{
    env,
    error::Error,
    fs,
    path::Path,
    thread,
    time::{Duration, Instant},
};

use glam::{IVec2, Vec2};
use log::{info, warn};
use rs_voxcraft::{
    blocks::BlockKind,
    command_queue::Command,
    config::WorldConfig,
    log_err,
    simulation::{PlayerInput, Simulation},
    voxels::{
        VoxelWorld,
        generators::{WorldGenerator, flat::FlatGenerator, heightmap::HeightmapGenerator, populate},
    },
};

const DEFAULT_TICKS: u64 = 600;

fn arg_value<'a>(args: &'a [String], names: &[&str]) -> Option<&'a str> {
    args.iter()
        .position(|arg| names.contains(&arg.as_str()))
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}

fn load_commands(path: &Path) -> Result<Vec<Command>, Box<dyn Error>> {
    let raw = fs::read_to_string(path)?;
    let commands: Vec<Command> = serde_json::from_str(&raw)?;
    info!("Loaded {} scripted commands from {}", commands.len(), path.display());
    Ok(commands)
}

/// Walks forward, sprinting and jumping now and then, turning every few seconds
fn scripted_input(tick: u64, ticks_per_second: u64) -> PlayerInput {
    let second = tick / ticks_per_second;
    PlayerInput {
        strafe: IVec2::new(-1, 0),
        mouse_delta: if tick % (3 * ticks_per_second) == 0 {
            Vec2::new(200.0, 0.0)
        } else {
            Vec2::ZERO
        },
        jumping: second % 4 == 3,
        sprinting: second % 2 == 1,
        ..PlayerInput::default()
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let config = match arg_value(&args, &["--config", "-c"]) {
        Some(path) => WorldConfig::load(Path::new(path))?,
        None => WorldConfig::default(),
    };
    let max_ticks = match arg_value(&args, &["--ticks", "-t"]) {
        Some(ticks) => ticks.parse::<u64>()?,
        None => DEFAULT_TICKS,
    };
    let mut commands = match arg_value(&args, &["--commands"]) {
        Some(path) => load_commands(Path::new(path))?,
        None => vec![Command::PlaceBlock {
            kind: BlockKind::Cobble,
        }],
    };
    commands.reverse();

    let generator: Box<dyn WorldGenerator> = if args.contains(&"--flat".to_string()) {
        let size = config.generator.world_size;
        Box::new(FlatGenerator::new(size, 4, BlockKind::Grass))
    } else {
        Box::new(HeightmapGenerator::new(&config.generator))
    };
    let mut world = VoxelWorld::buffered(&config);
    populate(&mut world, generator.as_ref());
    let mut sim = Simulation::new(&config, world);

    info!("Starting headless simulation for {max_ticks} ticks");
    let ticks_per_second = config.ticks_per_second as u64;
    let tick_duration = config.tick_duration();
    let mut last_instant = Instant::now();
    let mut tick_accumulator = Duration::ZERO;
    while sim.ticks() < max_ticks {
        let now = Instant::now();
        tick_accumulator += now - last_instant;
        last_instant = now;

        // Run simulation ticks for every tick_duration that has passed
        while tick_accumulator >= tick_duration && sim.ticks() < max_ticks {
            let tick = sim.ticks();
            sim.apply_input(&scripted_input(tick, ticks_per_second));
            if tick % ticks_per_second == ticks_per_second - 1 {
                if let Some(cmd) = commands.pop() {
                    sim.enqueue(cmd);
                }
            }
            sim.tick(tick_duration.as_secs_f32());
            tick_accumulator -= tick_duration;
            if tick % ticks_per_second == 0 {
                sim.log_stats();
            }
        }
        if tick_accumulator > tick_duration * 10 {
            warn!("Simulation is falling behind by {tick_accumulator:?}, skipping ticks");
            tick_accumulator = Duration::ZERO;
        }

        let sleep_duration = tick_duration
            .checked_sub(tick_accumulator)
            .unwrap_or(Duration::ZERO);
        thread::sleep(sleep_duration);
    }
    sim.log_stats();
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log_err!(run(), "Headless simulation failed: {err}");
}
