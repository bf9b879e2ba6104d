//! Headless wall-following run over an occupancy raster image.
//!
//! Loads a raster map, runs the simulation for a fixed number of ticks, and
//! writes an SVG snapshot of the final boundary, robot pose, and traveled
//! trajectory.
//!
//! Usage:
//!   cargo run --bin wallfollow -- --map room.png
//!   cargo run --bin wallfollow -- --map room.png --config sim.toml --ticks 5000

use clap::Parser;
use log::info;

use bhitti_nav::core::Point2D;
use bhitti_nav::{Environment, NavError, RasterMap, Result, SimConfig, Simulation, Visualizer};

/// Headless wall-following simulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Occupancy raster image; pixels whose luma equals --mask are walls
    #[arg(short, long)]
    map: String,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Luma value marking obstacle pixels
    #[arg(long, default_value_t = 255)]
    mask: u8,

    /// Robot start position as X,Y in raster coordinates
    #[arg(long, default_value = "250,600")]
    start: String,

    /// Number of simulation ticks to run
    #[arg(short, long, default_value_t = 2000)]
    ticks: u64,

    /// Progress log interval in ticks
    #[arg(long, default_value_t = 100)]
    log_interval: u64,

    /// Output SVG path
    #[arg(short, long, default_value = "wallfollow.svg")]
    output: String,
}

fn parse_start(value: &str) -> Result<Point2D> {
    if let Some((x, y)) = value.split_once(',') {
        if let (Ok(x), Ok(y)) = (x.trim().parse::<f32>(), y.trim().parse::<f32>()) {
            return Ok(Point2D::new(x, y));
        }
    }
    Err(NavError::Config(format!(
        "invalid start position '{value}', expected X,Y"
    )))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            info!("loading configuration from {path}");
            SimConfig::load(path)?
        }
        None => SimConfig::default(),
    };

    let start = parse_start(&args.start)?;
    let map = RasterMap::load(&args.map, args.mask)?;
    info!(
        "loaded {}x{} raster from {} ({} obstacle pixels)",
        map.width(),
        map.height(),
        args.map,
        map.obstacle_count()
    );

    let mut sim = Simulation::new(map, &config, start);
    let mut trail = Vec::with_capacity(args.ticks as usize);

    for tick in 1..=args.ticks {
        sim.tick();
        trail.push(sim.robot().position);

        if tick % args.log_interval == 0 {
            let robot = sim.robot();
            info!(
                "tick {tick}: {} at ({:.1}, {:.1}), {} points, {} segments",
                robot.action.name(),
                robot.position.x,
                robot.position.y,
                sim.scanner().points().len(),
                sim.scanner().segments().len()
            );
        }
    }

    Visualizer::new(&args.output).render(sim.environment(), sim.scanner(), sim.robot(), &trail)?;
    info!("wrote {}", args.output);

    Ok(())
}
