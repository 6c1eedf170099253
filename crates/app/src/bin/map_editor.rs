use std::env;
use std::path::Path;
use std::process;

use macroquad::prelude::*;
use raycaster::editor_loop::{CELL_PIXELS, EditorSession, cell_color, grid_for_window};
use raycaster::frame_input::capture_editor_input;
use raycaster::launch::{generate_runtime_seed, parse_launch_args};
use raycaster::settings_file::AppSettings;
use raycaster::window_config::editor_window_conf;
use raycaster::{format_seed, init_tracing};
use raycaster_core::editor::DEFAULT_EDITOR_SIDE;
use raycaster_core::{EditorDocument, FLOOR, MapStore, load_map_file};
use tracing::{debug, error, info, warn};

fn window_conf() -> Conf {
    editor_window_conf(DEFAULT_EDITOR_SIDE, DEFAULT_EDITOR_SIDE)
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        error!("{err:#}");
        process::exit(1);
    }
}

fn open_document(
    settings: &AppSettings,
    map_path: Option<&Path>,
    seed: u64,
) -> anyhow::Result<EditorDocument> {
    let loaded = map_path.and_then(|path| match load_map_file(path) {
        Ok(map) => Some(map),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "map load failed, starting blank");
            None
        }
    });
    let map = match loaded {
        Some(map) => map,
        None => MapStore::new(settings.default_map_width, settings.default_map_height, FLOOR)?,
    };
    let mut document = EditorDocument::new(map, seed);
    document.set_complexity(settings.default_complexity);
    Ok(document)
}

fn draw_grid(session: &EditorSession, grid: (usize, usize)) {
    let map = session.document().map();
    let (cols, rows) = grid;
    for y in 0..rows {
        for x in 0..cols {
            let tag = map.get(x as i64, y as i64).unwrap_or(FLOOR);
            draw_rectangle(
                x as f32 * CELL_PIXELS,
                y as f32 * CELL_PIXELS,
                CELL_PIXELS - 1.0,
                CELL_PIXELS - 1.0,
                cell_color(tag),
            );
        }
    }

    let line = Color::from_rgba(24, 24, 24, 255);
    let grid_width = cols as f32 * CELL_PIXELS;
    let grid_height = rows as f32 * CELL_PIXELS;
    for x in 0..=cols {
        let px = x as f32 * CELL_PIXELS;
        draw_line(px, 0.0, px, grid_height, 1.0, line);
    }
    for y in 0..=rows {
        let py = y as f32 * CELL_PIXELS;
        draw_line(0.0, py, grid_width, py, 1.0, line);
    }
}

async fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let launch = parse_launch_args(&args, generate_runtime_seed()).map_err(anyhow::Error::msg)?;
    let settings = AppSettings::load_or_create(AppSettings::get_default_path().as_deref());

    let document = open_document(&settings, launch.map_path.as_deref(), launch.seed.value())?;
    info!(
        seed = %format_seed(document.seed()),
        width = document.map().width(),
        height = document.map().height(),
        "starting map editor"
    );
    request_new_screen_size(
        document.map().width() as f32 * CELL_PIXELS,
        document.map().height() as f32 * CELL_PIXELS,
    );
    let mut session = EditorSession::new(document, launch.map_path.as_deref());

    loop {
        let input = capture_editor_input();
        let tick = session.tick(&input, generate_runtime_seed);
        if tick.quit {
            break;
        }
        if tick.title_changed {
            debug!("{}", session.title());
        }

        clear_background(Color::from_rgba(32, 32, 32, 255));
        let grid = grid_for_window(screen_width(), screen_height());
        draw_grid(&session, grid);
        if let Some((x, y)) = input.hovered_cell {
            draw_rectangle(
                x as f32 * CELL_PIXELS,
                y as f32 * CELL_PIXELS,
                CELL_PIXELS - 1.0,
                CELL_PIXELS - 1.0,
                Color::from_rgba(255, 255, 255, 48),
            );
        }

        let status_y = screen_height() - 10.0;
        draw_text(&session.title(), 8.0, status_y, 20.0, WHITE);
        if let Some(message) = session.last_message() {
            draw_text(message, 8.0, status_y - 22.0, 20.0, YELLOW);
        }

        next_frame().await;
    }

    Ok(())
}
