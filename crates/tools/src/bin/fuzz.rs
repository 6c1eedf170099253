use anyhow::{Result, bail};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use raycaster_core::map::{FLOOR, WALL, WALL_VARIANTS};
use raycaster_core::{
    Camera, EditHistory, Frame, GeneratorConfig, MapStore, TextureSet, Vec2, format_map,
    generate_map, parse_map, render_frame,
};
use std::f64::consts::TAU;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    iterations: u32,
}

fn below(rng: &mut ChaCha8Rng, bound: u64) -> u64 {
    rng.next_u64() % bound
}

fn unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
}

fn check_map(map: &MapStore, width: usize, height: usize) -> Result<()> {
    if (map.width(), map.height()) != (width, height) {
        bail!("Invariant failed: requested {width}x{height}, got {}x{}", map.width(), map.height());
    }
    if !map.border_is_solid() {
        bail!("Invariant failed: open border");
    }
    let max_tag = WALL_VARIANTS as i32;
    if let Some(tag) = map.cells().iter().find(|&&tag| !(FLOOR..=max_tag).contains(&tag)) {
        bail!("Invariant failed: unexpected tag {tag}");
    }
    let reparsed = parse_map(&format_map(map))?;
    if &reparsed != map {
        bail!("Invariant failed: text format round trip changed the map");
    }
    Ok(())
}

/// Records an edit that flips one interior cell, then checks undo restores the
/// snapshot and redo brings the edit back.
fn check_history(history: &mut EditHistory, map: MapStore, rng: &mut ChaCha8Rng) -> Result<()> {
    let before = map.clone();
    let mut current = map;
    history.record_edit(&current);

    let x = 1 + below(rng, (current.width() - 2) as u64) as usize;
    let y = 1 + below(rng, (current.height() - 2) as u64) as usize;
    let flipped = if current.cell(x, y) == FLOOR { WALL } else { FLOOR };
    current.set(x, y, flipped);
    let edited = current.clone();

    if !history.undo(&mut current) || current != before {
        bail!("Invariant failed: undo did not restore the recorded snapshot");
    }
    if !history.redo(&mut current) || current != edited {
        bail!("Invariant failed: redo did not restore the edited map");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} iterations...", args.seed, args.iterations);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let textures = TextureSet::flat_colors();
    let mut history = EditHistory::new();
    let mut total_missed = 0usize;

    for iteration in 0..args.iterations {
        let width = 3 + below(&mut rng, 62) as usize;
        let height = 3 + below(&mut rng, 62) as usize;
        let complexity = 1 + below(&mut rng, 64) as u32;
        let map_seed = rng.next_u64();
        let config = if rng.next_u64() % 2 == 0 {
            GeneratorConfig::viewer()
        } else {
            GeneratorConfig::editor()
        };

        let generated = generate_map(width, height, complexity, map_seed, config)?;
        let again = generate_map(width, height, complexity, map_seed, config)?;
        if generated != again {
            bail!("Invariant failed: seed {map_seed} is not deterministic");
        }
        check_map(&generated.map, width, height)?;

        let position = Vec2::new(unit(&mut rng) * width as f64, unit(&mut rng) * height as f64);
        let fov = 30.0 + unit(&mut rng) * 110.0;
        let mut camera = Camera::new(position, Vec2::new(-1.0, 0.0), fov);
        camera.rotate(unit(&mut rng) * TAU);
        camera.clamp_to(&generated.map);

        let frame_width = 1 + below(&mut rng, 96) as usize;
        let frame_height = 1 + below(&mut rng, 72) as usize;
        let mut frame = Frame::new(frame_width, frame_height)?;
        let stats = render_frame(&mut frame, &camera, &generated.map, &textures);
        total_missed += stats.missed_columns;
        if stats.missed_columns > 0 {
            bail!(
                "Invariant failed: {} rays escaped a walled map (seed {map_seed}, iteration {})",
                stats.missed_columns,
                iteration
            );
        }

        check_history(&mut history, generated.map, &mut rng)?;
    }

    println!(
        "Fuzz complete: {} maps, {} missed columns, {} snapshots retained.",
        args.iterations,
        total_missed,
        history.undo_len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_round_trips_across_many_recorded_edits() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut history = EditHistory::new();
        for seed in 0..80 {
            let map = generate_map(10, 8, 4, seed, GeneratorConfig::editor()).expect("map").map;
            check_history(&mut history, map, &mut rng).expect("undo/redo round trip");
        }
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn smallest_maps_pass_every_check() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let generated = generate_map(3, 3, 1, 11, GeneratorConfig::viewer()).expect("map");
        check_map(&generated.map, 3, 3).expect("map invariants");
        check_history(&mut EditHistory::new(), generated.map, &mut rng).expect("history");
    }
}
