//! Persistent viewer and editor settings.

use directories::ProjectDirs;
use raycaster_core::RenderCap;
use raycaster_core::camera::DEFAULT_FOV_DEGREES;
use raycaster_core::editor::{
    DEFAULT_COMPLEXITY, DEFAULT_EDITOR_SIDE, MAX_COMPLEXITY, MIN_COMPLEXITY,
};
use raycaster_core::mapgen::MIN_MAP_SIDE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::APP_NAME;

pub const SETTINGS_FORMAT_VERSION: u32 = 1;
pub const MIN_FOV_DEGREES: f64 = 30.0;
pub const MAX_FOV_DEGREES: f64 = 140.0;
pub const FOV_ENV_VAR: &str = "RAYCASTER_FOV";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub format_version: u32,
    pub fov_degrees: f64,
    /// Radians of rotation per pixel of horizontal mouse travel.
    pub mouse_sensitivity: f64,
    /// Cells per second.
    pub move_speed: f64,
    /// Radians per second while a turn key is held.
    pub rotation_speed: f64,
    pub max_render_width: usize,
    pub max_render_height: usize,
    pub default_map_width: usize,
    pub default_map_height: usize,
    pub default_complexity: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            format_version: SETTINGS_FORMAT_VERSION,
            fov_degrees: DEFAULT_FOV_DEGREES,
            mouse_sensitivity: 0.0035,
            move_speed: 5.0,
            rotation_speed: 3.0,
            max_render_width: RenderCap::DEFAULT.max_width,
            max_render_height: RenderCap::DEFAULT.max_height,
            default_map_width: DEFAULT_EDITOR_SIDE,
            default_map_height: DEFAULT_EDITOR_SIDE,
            default_complexity: DEFAULT_COMPLEXITY,
        }
    }
}

pub fn clamp_fov(value: f64) -> f64 {
    if !value.is_finite() {
        return DEFAULT_FOV_DEGREES;
    }
    value.clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES)
}

/// An override that parses as a finite number wins over the persisted value.
pub fn resolve_fov(persisted: f64, fov_override: Option<&str>) -> f64 {
    let override_fov = fov_override
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map(clamp_fov);
    override_fov.unwrap_or_else(|| clamp_fov(persisted))
}

impl AppSettings {
    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("settings.json");
            path
        })
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(settings.sanitized())
    }

    /// Missing files are silent; unreadable or invalid ones are logged. Either way
    /// the defaults are used.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable settings file");
                Self::default()
            }
        }
    }

    /// Like [`Self::load_or_default`], but a missing file is created with the
    /// defaults so the first launch leaves an editable settings file behind.
    pub fn load_or_create(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        if path.exists() {
            return Self::load_or_default(Some(path));
        }
        let settings = Self::default();
        match settings.write_atomic(path) {
            Ok(()) => info!(path = %path.display(), "wrote default settings"),
            Err(err) => warn!(path = %path.display(), error = %err, "could not write settings"),
        }
        settings
    }

    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.fov_degrees = clamp_fov(self.fov_degrees);
        if !(self.mouse_sensitivity.is_finite() && self.mouse_sensitivity > 0.0) {
            self.mouse_sensitivity = defaults.mouse_sensitivity;
        }
        if !(self.move_speed.is_finite() && self.move_speed > 0.0) {
            self.move_speed = defaults.move_speed;
        }
        if !(self.rotation_speed.is_finite() && self.rotation_speed > 0.0) {
            self.rotation_speed = defaults.rotation_speed;
        }
        self.max_render_width = self.max_render_width.max(1);
        self.max_render_height = self.max_render_height.max(1);
        self.default_map_width = self.default_map_width.max(MIN_MAP_SIDE);
        self.default_map_height = self.default_map_height.max(MIN_MAP_SIDE);
        self.default_complexity = self.default_complexity.clamp(MIN_COMPLEXITY, MAX_COMPLEXITY);
        self
    }

    pub fn render_cap(&self) -> RenderCap {
        RenderCap { max_width: self.max_render_width, max_height: self.max_render_height }
    }
}
