use std::env;
use std::process;

use anyhow::Context;
use macroquad::prelude::*;
use raycaster::frame_input::{MouseTracker, capture_viewer_input};
use raycaster::launch::{generate_runtime_seed, parse_launch_args};
use raycaster::settings_file::{AppSettings, FOV_ENV_VAR, resolve_fov};
use raycaster::viewer::ViewerSession;
use raycaster::window_config::viewer_window_conf;
use raycaster::{format_seed, init_tracing};
use tracing::{error, info};

/// Longest simulated step; a stalled frame must not tunnel the camera through walls.
const MAX_FRAME_SECONDS: f64 = 0.1;

fn window_conf() -> Conf {
    viewer_window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        error!("{err:#}");
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let launch = parse_launch_args(&args, generate_runtime_seed()).map_err(anyhow::Error::msg)?;

    let settings = AppSettings::load_or_create(AppSettings::get_default_path().as_deref());
    let fov_override = env::var(FOV_ENV_VAR).ok();
    let fov = resolve_fov(settings.fov_degrees, fov_override.as_deref());
    info!(seed = %format_seed(launch.seed.value()), fov, "starting viewer");

    let mut session =
        ViewerSession::start(settings, fov, launch.map_path.as_deref(), launch.seed.value())?;
    let mut mouse = MouseTracker::default();
    let mut fullscreen = false;
    let mut rgba = Vec::new();

    loop {
        let (input, requests) = capture_viewer_input(&mut mouse);
        if requests.quit {
            break;
        }
        if requests.toggle_fullscreen {
            fullscreen = !fullscreen;
            set_fullscreen(fullscreen);
        }

        let dt = f64::from(get_frame_time()).min(MAX_FRAME_SECONDS);
        session.tick(&input, dt, generate_runtime_seed);
        session.fit_frame(screen_width() as usize, screen_height() as usize);
        session.render();

        let frame = session.frame();
        frame.write_rgba8(&mut rgba);
        let width = u16::try_from(frame.width()).context("render width exceeds texture limit")?;
        let height = u16::try_from(frame.height()).context("render height exceeds texture limit")?;
        let texture = Texture2D::from_rgba8(width, height, &rgba);
        texture.set_filter(FilterMode::Nearest);

        clear_background(BLACK);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );
        draw_text(&session.status_line(), 10.0, 22.0, 22.0, WHITE);

        next_frame().await;
    }

    Ok(())
}
