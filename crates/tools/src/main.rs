use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use raycaster_core::camera::{DEFAULT_FACING, DEFAULT_FOV_DEGREES, DEFAULT_START};
use raycaster_core::{
    Camera, Frame, GeneratorConfig, MapStore, TextureSet, Vec2, format_map, generate_map,
    load_map_file, render_frame, save_map_file,
};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Profile {
    Viewer,
    Editor,
}

impl Profile {
    fn config(self) -> GeneratorConfig {
        match self {
            Self::Viewer => GeneratorConfig::viewer(),
            Self::Editor => GeneratorConfig::editor(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Generate a map and write it in the text map format
    Generate {
        #[arg(long, default_value_t = 24)]
        width: usize,
        #[arg(long, default_value_t = 24)]
        height: usize,
        #[arg(long, default_value_t = 8)]
        complexity: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, value_enum, default_value_t = Profile::Viewer)]
        profile: Profile,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Load a map file and report its shape and border integrity
    Check {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Render one frame from the default start pose into a binary PPM
    Render {
        path: PathBuf,
        #[arg(long, default_value_t = 320)]
        width: usize,
        #[arg(long, default_value_t = 240)]
        height: usize,
        #[arg(long, default_value_t = DEFAULT_FOV_DEGREES)]
        fov: f64,
        #[arg(short, long, default_value = "frame.ppm")]
        out: PathBuf,
    },
}

#[derive(Debug, Serialize, PartialEq)]
struct MapReport {
    width: usize,
    height: usize,
    floor_cells: usize,
    wall_cells: usize,
    wall_ratio: f64,
    border_solid: bool,
    fingerprint: String,
}

fn map_report(map: &MapStore) -> MapReport {
    let total = map.cells().len();
    let floor_cells = map.floor_count();
    MapReport {
        width: map.width(),
        height: map.height(),
        floor_cells,
        wall_cells: total - floor_cells,
        wall_ratio: (total - floor_cells) as f64 / total as f64,
        border_solid: map.border_is_solid(),
        fingerprint: format!("0x{:016x}", map.fingerprint()),
    }
}

/// Default pose clamped into the map, moved onto floor when it lands in a wall.
fn start_camera(map: &MapStore, fov: f64) -> Camera {
    let mut camera = Camera::new(DEFAULT_START, DEFAULT_FACING, fov);
    camera.clamp_to(map);
    if !map.is_floor_at(camera.position.x.floor() as i64, camera.position.y.floor() as i64)
        && let Some((x, y)) = map.first_floor_cell()
    {
        camera.position = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);
    }
    camera
}

fn encode_ppm(frame: &Frame) -> Vec<u8> {
    let header = format!("P6\n{} {}\n255\n", frame.width(), frame.height());
    let mut bytes = Vec::with_capacity(header.len() + frame.pixels().len() * 3);
    bytes.extend_from_slice(header.as_bytes());
    for &pixel in frame.pixels() {
        let [_, r, g, b] = pixel.to_be_bytes();
        bytes.extend_from_slice(&[r, g, b]);
    }
    bytes
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    match args.command {
        Command::Generate { width, height, complexity, seed, profile, out } => {
            let generated = generate_map(width, height, complexity, seed, profile.config())
                .with_context(|| format!("Failed to generate a {width}x{height} map"))?;
            info!(
                seed,
                ?profile,
                rooms = generated.rooms.len(),
                truncated = generated.truncated,
                fingerprint = format!("0x{:016x}", generated.map.fingerprint()),
                "generated map"
            );
            match out {
                Some(path) => save_map_file(&path, &generated.map)
                    .with_context(|| format!("Failed to write map file: {}", path.display()))?,
                None => io::stdout()
                    .write_all(format_map(&generated.map).as_bytes())
                    .context("Failed to write map to stdout")?,
            }
        }
        Command::Check { path, json } => {
            let map = load_map_file(&path)
                .with_context(|| format!("Failed to read map file: {}", path.display()))?;
            let report = map_report(&map);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Size: {}x{}", report.width, report.height);
                println!("Floor cells: {}", report.floor_cells);
                println!("Wall ratio: {:.3}", report.wall_ratio);
                println!("Border solid: {}", report.border_solid);
                println!("Fingerprint: {}", report.fingerprint);
            }
        }
        Command::Render { path, width, height, fov, out } => {
            let map = load_map_file(&path)
                .with_context(|| format!("Failed to read map file: {}", path.display()))?;
            let camera = start_camera(&map, fov);
            let mut frame = Frame::new(width, height).context("Failed to allocate frame")?;
            let stats = render_frame(&mut frame, &camera, &map, &TextureSet::flat_colors());
            fs::write(&out, encode_ppm(&frame))
                .with_context(|| format!("Failed to write image: {}", out.display()))?;
            info!(missed = stats.missed_columns, out = %out.display(), "rendered frame");
        }
    }

    Ok(())
}
