mod pilot;

use std::path::{Path, PathBuf};

use anyhow::Context;
use arena_driver::{Clock, GameLoop, LoopConfig, ManualClock, SystemClock};
use arena_input::InputContext;
use arena_kernel::{Scene, SceneConfig};
use arena_render::{DebugTextRenderer, DrawList, Renderer};
use arena_tools::SceneInspector;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::pilot::{Autopilot, FIRE_EVERY, Headless, run_scripted};

#[derive(Parser)]
#[command(name = "arena-cli", about = "Headless arena runner")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Play the game loop headless with a scripted pilot
    Play {
        /// Wall-clock seconds to play
        #[arg(short = 'n', long, default_value = "5")]
        seconds: f64,
        /// RNG seed for enemy placement
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Frame-rate cap, overrides the config file; 0 runs uncapped
        #[arg(long)]
        fps: Option<u32>,
        /// YAML file with `scene` and `loop` sections
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Initial time-speed multiplier
        #[arg(short, long, default_value = "1.0")]
        time_speed: f64,
        /// Use a simulated clock: frames take exactly the frame interval
        #[arg(long)]
        virtual_clock: bool,
    },
    /// Run the scripted pilot twice and compare state hashes
    Replay {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// RNG seed for deterministic replay
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Seconds per tick
        #[arg(short, long, default_value = "0.016666666666666666")]
        dt: f64,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print a text frame after running the scripted pilot
    Frame {
        #[arg(short, long, default_value = "120")]
        ticks: u64,
        #[arg(short, long, default_value = "42")]
        seed: u64,
        #[arg(short, long, default_value = "0.016666666666666666")]
        dt: f64,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Contents of a `--config` file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ArenaConfig {
    scene: SceneConfig,
    #[serde(rename = "loop")]
    game_loop: LoopConfig,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ArenaConfig> {
    let Some(path) = path else {
        return Ok(ArenaConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: ArenaConfig = serde_yaml::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.scene.validate().context("invalid scene config")?;
    config.game_loop.validate().context("invalid loop config")?;
    tracing::debug!(path = %path.display(), ?config, "config loaded");
    Ok(config)
}

fn check_dt(dt: f64) -> anyhow::Result<()> {
    anyhow::ensure!(
        dt.is_finite() && dt >= 0.0,
        "dt must be finite and non-negative, got {dt}"
    );
    Ok(())
}

fn play<C: Clock>(mut game: GameLoop<C>, seconds: f64) {
    let mut frontend = Headless::new(Autopilot::new(FIRE_EVERY), seconds);
    let frames = game.run(&mut frontend);
    let timer = frontend.timer();
    println!("Frames: {frames}");
    if timer.count() > 0 {
        println!(
            "Frame time: avg={:.2?} min={:.2?} max={:.2?} ({:.1} fps)",
            timer.average(),
            timer.min(),
            timer.max(),
            timer.average_fps()
        );
    }
    println!("{}", SceneInspector::summary(game.scene()));
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("arena-cli v{}", env!("CARGO_PKG_VERSION"));
            let scene = Scene::new(&InputContext::new(), 0);
            println!("kernel: tick={}", scene.tick());
            println!("input: {}", arena_input::crate_info());
            println!("render: {}", arena_render::crate_info());
            println!("tools: {}", arena_tools::crate_info());
            println!("driver: {}", arena_driver::crate_info());
        }
        Commands::Play {
            seconds,
            seed,
            fps,
            config,
            time_speed,
            virtual_clock,
        } => {
            anyhow::ensure!(
                seconds.is_finite() && seconds >= 0.0,
                "seconds must be finite and non-negative, got {seconds}"
            );
            anyhow::ensure!(
                time_speed.is_finite() && time_speed > 0.0,
                "time speed must be positive, got {time_speed}"
            );
            let mut config = load_config(config.as_deref())?;
            if let Some(fps) = fps {
                config.game_loop.target_fps = fps;
            }
            println!(
                "Playing: seed={seed}, seconds={seconds}, fps={}, time_speed={time_speed}",
                config.game_loop.target_fps
            );

            if virtual_clock {
                anyhow::ensure!(
                    config.game_loop.target_fps > 0,
                    "--virtual-clock needs a frame cap"
                );
                let game = GameLoop::new(config.game_loop, ManualClock::new(), config.scene, seed)
                    .with_time_speed(time_speed);
                play(game, seconds);
            } else {
                let game = GameLoop::new(config.game_loop, SystemClock::new(), config.scene, seed)
                    .with_time_speed(time_speed);
                play(game, seconds);
            }
        }
        Commands::Replay {
            ticks,
            seed,
            dt,
            config,
        } => {
            check_dt(dt)?;
            let scene_config = load_config(config.as_deref())?.scene;
            println!("Deterministic replay: seed={seed}, ticks={ticks}, dt={dt}");

            let run = |label: &str| {
                let mut pilot = Autopilot::new(FIRE_EVERY);
                let mut scene = Scene::with_config(scene_config.clone(), &pilot, seed);
                let events = run_scripted(&mut scene, &mut pilot, ticks, dt);
                println!(
                    "{label}: {} events={events} hash={:#018x}",
                    SceneInspector::summary(&scene),
                    scene.state_hash()
                );
                scene.state_hash()
            };
            let first = run("Run 1");
            let second = run("Run 2");
            println!(
                "Match: {}",
                if first == second { "OK" } else { "MISMATCH" }
            );
            anyhow::ensure!(first == second, "replay diverged");
        }
        Commands::Frame {
            ticks,
            seed,
            dt,
            config,
        } => {
            check_dt(dt)?;
            let scene_config = load_config(config.as_deref())?.scene;
            let mut pilot = Autopilot::new(FIRE_EVERY);
            let mut scene = Scene::with_config(scene_config, &pilot, seed);
            run_scripted(&mut scene, &mut pilot, ticks, dt);

            let frame = DrawList::build(&scene, scene.time());
            print!("{}", DebugTextRenderer::new().render(&frame));
            println!("{}", SceneInspector::summary(&scene));
        }
    }

    Ok(())
}
