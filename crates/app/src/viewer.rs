//! First-person viewer session: owns the map, camera, and frame between ticks.

use std::path::Path;

use anyhow::Context;
use raycaster_core::camera::{DEFAULT_FACING, DEFAULT_START};
use raycaster_core::mapgen::RoomRect;
use raycaster_core::{
    Camera, Frame, GeneratorConfig, MapGenerator, MapStore, RenderCap, RenderStats,
    TextureSet, Vec2, load_map_file, render_frame,
};
use tracing::{debug, info, warn};

use crate::settings_file::AppSettings;

/// Movement requests for one frame, already reduced from raw key and mouse state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewerInput {
    /// +1 forward, -1 back.
    pub forward: f64,
    /// +1 toward the right of the screen.
    pub strafe: f64,
    /// +1 turns right.
    pub turn: f64,
    /// Horizontal mouse travel in pixels since the previous frame.
    pub mouse_dx: f64,
    pub regenerate: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapSource {
    Loaded,
    Generated { seed: u64 },
}

pub struct ViewerSession {
    settings: AppSettings,
    generator: MapGenerator,
    map: MapStore,
    source: MapSource,
    camera: Camera,
    textures: TextureSet,
    cap: RenderCap,
    frame: Frame,
    fov_degrees: f64,
}

impl ViewerSession {
    /// Opens `map_path` when given; a missing or malformed file falls back to
    /// generating a map from `seed`.
    pub fn start(
        settings: AppSettings,
        fov_degrees: f64,
        map_path: Option<&Path>,
        seed: u64,
    ) -> anyhow::Result<Self> {
        let generator = MapGenerator::new(GeneratorConfig::viewer());
        let loaded = map_path.and_then(|path| match load_map_file(path) {
            Ok(map) => {
                info!(
                    path = %path.display(),
                    width = map.width(),
                    height = map.height(),
                    "loaded map"
                );
                Some(map)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "map load failed, generating instead");
                None
            }
        });

        let (map, source, rooms) = match loaded {
            Some(map) => (map, MapSource::Loaded, Vec::new()),
            None => {
                let generated = generator
                    .generate(
                        settings.default_map_width,
                        settings.default_map_height,
                        settings.default_complexity,
                        seed,
                    )
                    .with_context(|| format!("generating start map from seed {seed}"))?;
                (generated.map, MapSource::Generated { seed }, generated.rooms)
            }
        };

        let cap = settings.render_cap();
        let frame = Frame::new(1, 1).context("allocating initial frame")?;
        let mut session = Self {
            settings,
            generator,
            map,
            source,
            camera: Camera::new(DEFAULT_START, DEFAULT_FACING, fov_degrees),
            textures: TextureSet::flat_colors(),
            cap,
            frame,
            fov_degrees,
        };
        session.place_camera(&rooms);
        Ok(session)
    }

    pub fn map(&self) -> &MapStore {
        &self.map
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn source(&self) -> MapSource {
        self.source
    }

    pub fn tick(&mut self, input: &ViewerInput, dt: f64, next_seed: impl FnOnce() -> u64) {
        if input.regenerate {
            self.regenerate(next_seed());
        }

        let turn = input.turn * self.settings.rotation_speed * dt
            + input.mouse_dx * self.settings.mouse_sensitivity;
        if turn != 0.0 && turn.is_finite() {
            // Positive camera rotation swings the view toward the left edge of the screen.
            self.camera.rotate(-turn);
        }

        let step = self.settings.move_speed * dt;
        if input.forward != 0.0 {
            self.camera.move_forward(&self.map, input.forward * step);
        }
        if input.strafe != 0.0 {
            self.camera.strafe(&self.map, input.strafe * step);
        }
    }

    /// Replaces the map only once a new one has been built; a failure keeps the current map.
    pub fn regenerate(&mut self, seed: u64) {
        match self.generator.generate(
            self.map.width(),
            self.map.height(),
            self.settings.default_complexity,
            seed,
        ) {
            Ok(generated) => {
                info!(seed, fingerprint = generated.map.fingerprint(), "regenerated map");
                self.map = generated.map;
                self.source = MapSource::Generated { seed };
                self.camera = Camera::new(DEFAULT_START, DEFAULT_FACING, self.fov_degrees);
                self.place_camera(&generated.rooms);
            }
            Err(err) => warn!(seed, error = %err, "map generation failed, keeping current map"),
        }
    }

    /// Clamps into the play area, then moves off a wall onto the first room or floor cell.
    fn place_camera(&mut self, rooms: &[RoomRect]) {
        self.camera.clamp_to(&self.map);
        let cell_x = self.camera.position.x.floor() as i64;
        let cell_y = self.camera.position.y.floor() as i64;
        if self.map.is_floor_at(cell_x, cell_y) {
            return;
        }
        let fallback = rooms
            .first()
            .map(|room| {
                let center = room.center();
                (center.x as usize, center.y as usize)
            })
            .filter(|&(x, y)| self.map.is_floor_at(x as i64, y as i64))
            .or_else(|| self.map.first_floor_cell());
        if let Some((x, y)) = fallback {
            self.camera.position = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);
            debug!(x, y, "start cell was solid, moved camera");
        }
    }

    /// Reallocates the frame only when the fitted size changes; on failure the old
    /// frame stays in use.
    pub fn fit_frame(&mut self, window_width: usize, window_height: usize) {
        let (width, height) = self.cap.fit(window_width, window_height);
        if (width, height) == (self.frame.width(), self.frame.height()) {
            return;
        }
        match Frame::new(width, height) {
            Ok(frame) => self.frame = frame,
            Err(err) => {
                warn!(width, height, error = %err, "frame resize failed, keeping previous frame");
            }
        }
    }

    pub fn render(&mut self) -> RenderStats {
        let stats = render_frame(&mut self.frame, &self.camera, &self.map, &self.textures);
        if stats.missed_columns > 0 {
            debug!(missed = stats.missed_columns, "rays exhausted the step bound");
        }
        stats
    }

    pub fn status_line(&self) -> String {
        let source = match self.source {
            MapSource::Loaded => "file".to_string(),
            MapSource::Generated { seed } => format!("seed={seed}"),
        };
        format!(
            "{}x{} {} pos=({:.1}, {:.1}) render={}x{}",
            self.map.width(),
            self.map.height(),
            source,
            self.camera.position.x,
            self.camera.position.y,
            self.frame.width(),
            self.frame.height(),
        )
    }
}
