//! Map editor frame loop logic, independent of the window backend.

use std::path::{Path, PathBuf};

use macroquad::color::Color;
use macroquad::prelude::KeyCode;
use raycaster_core::map::Cell;
use raycaster_core::{EditorAction, EditorDocument, MapFileError, save_map_file};
use tracing::{info, warn};

/// Side of one grid cell on screen, in pixels.
pub const CELL_PIXELS: f32 = 32.0;
pub const DEFAULT_SAVE_PATH: &str = "maps/custom.map";

const PAINT_KEYS: [(KeyCode, Cell); 10] = [
    (KeyCode::Key0, 0),
    (KeyCode::Key1, 1),
    (KeyCode::Key2, 2),
    (KeyCode::Key3, 3),
    (KeyCode::Key4, 4),
    (KeyCode::Key5, 5),
    (KeyCode::Key6, 6),
    (KeyCode::Key7, 7),
    (KeyCode::Key8, 8),
    (KeyCode::Key9, 9),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MouseButtonState {
    #[default]
    Up,
    Pressed,
    Held,
    Released,
}

/// Everything the editor reads from the backend for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditorFrameInput {
    pub keys_pressed: Vec<KeyCode>,
    pub ctrl_down: bool,
    /// Grid cell under the cursor, when the cursor is inside the window grid.
    pub hovered_cell: Option<(i64, i64)>,
    pub left: MouseButtonState,
    pub right: MouseButtonState,
    /// Whole cells that fit in the window.
    pub window_grid: (usize, usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditorTick {
    pub quit: bool,
    pub title_changed: bool,
}

pub fn grid_for_window(width: f32, height: f32) -> (usize, usize) {
    let cols = (width / CELL_PIXELS).floor().max(1.0) as usize;
    let rows = (height / CELL_PIXELS).floor().max(1.0) as usize;
    (cols, rows)
}

pub fn cell_at(mouse_x: f32, mouse_y: f32, grid: (usize, usize)) -> Option<(i64, i64)> {
    if mouse_x < 0.0 || mouse_y < 0.0 {
        return None;
    }
    let x = (mouse_x / CELL_PIXELS) as i64;
    let y = (mouse_y / CELL_PIXELS) as i64;
    (x < grid.0 as i64 && y < grid.1 as i64).then_some((x, y))
}

pub fn cell_color(tag: Cell) -> Color {
    match tag {
        0 => Color::from_rgba(50, 50, 50, 255),
        1 => Color::from_rgba(200, 0, 0, 255),
        2 => Color::from_rgba(0, 200, 0, 255),
        3 => Color::from_rgba(0, 0, 200, 255),
        _ => Color::from_rgba(200, 200, 200, 255),
    }
}

pub struct EditorSession {
    document: EditorDocument,
    save_path: PathBuf,
    last_message: Option<String>,
}

impl EditorSession {
    pub fn new(document: EditorDocument, launch_path: Option<&Path>) -> Self {
        let save_path =
            launch_path.map_or_else(|| PathBuf::from(DEFAULT_SAVE_PATH), Path::to_path_buf);
        Self { document, save_path, last_message: None }
    }

    pub fn document(&self) -> &EditorDocument {
        &self.document
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    pub fn title(&self) -> String {
        format!("Map Editor - {}", self.document.status_line())
    }

    pub fn save(&mut self) -> Result<(), MapFileError> {
        save_map_file(&self.save_path, self.document.map())?;
        info!(path = %self.save_path.display(), "saved map");
        self.last_message = Some(format!("Saved {}", self.save_path.display()));
        Ok(())
    }

    pub fn tick(
        &mut self,
        input: &EditorFrameInput,
        next_seed: impl FnOnce() -> u64,
    ) -> EditorTick {
        let before = self.title();
        let mut quit = false;
        let mut actions = Vec::new();
        let mut next_seed = Some(next_seed);

        for &key in &input.keys_pressed {
            match key {
                KeyCode::Escape => quit = true,
                KeyCode::S if input.ctrl_down => {
                    if let Err(err) = self.save() {
                        warn!(path = %self.save_path.display(), error = %err, "save failed");
                        self.last_message =
                            Some(format!("Failed to save {}", self.save_path.display()));
                    }
                }
                KeyCode::S => {
                    self.last_message = Some("Hold Ctrl and press S to save.".to_string());
                }
                KeyCode::Z if input.ctrl_down => actions.push(EditorAction::Undo),
                KeyCode::Y if input.ctrl_down => actions.push(EditorAction::Redo),
                KeyCode::Equal => actions.push(EditorAction::AdjustBrush(1)),
                KeyCode::Minus => actions.push(EditorAction::AdjustBrush(-1)),
                KeyCode::G => actions.push(EditorAction::Generate),
                KeyCode::LeftBracket => actions.push(EditorAction::AdjustComplexity(-1)),
                KeyCode::RightBracket => actions.push(EditorAction::AdjustComplexity(1)),
                KeyCode::R => {
                    if let Some(seed_source) = next_seed.take() {
                        actions.push(EditorAction::RandomizeSeed(seed_source()));
                    }
                }
                other => {
                    if let Some(&(_, value)) = PAINT_KEYS.iter().find(|(k, _)| *k == other) {
                        actions.push(EditorAction::SelectPaint(value));
                    }
                }
            }
        }

        actions.extend(self.pointer_actions(input));

        for action in actions {
            if let Err(err) = self.document.apply(action) {
                warn!(?action, error = %err, "editor action failed");
                self.last_message = Some(err.to_string());
            }
        }

        EditorTick { quit, title_changed: self.title() != before }
    }

    fn pointer_actions(&self, input: &EditorFrameInput) -> Vec<EditorAction> {
        let pressed = match (input.left, input.right) {
            (MouseButtonState::Pressed, _) => Some(false),
            (_, MouseButtonState::Pressed) => Some(true),
            _ => None,
        };
        let held = matches!(input.left, MouseButtonState::Held)
            || matches!(input.right, MouseButtonState::Held);
        let released = matches!(input.left, MouseButtonState::Released)
            || matches!(input.right, MouseButtonState::Released);

        let mut actions = Vec::new();
        match (pressed, input.hovered_cell) {
            (Some(erase), Some((x, y))) => {
                let (cols, rows) = input.window_grid;
                let map = self.document.map();
                if (cols, rows) != (map.width(), map.height()) {
                    actions.push(EditorAction::ResizeGrid { cols, rows });
                }
                actions.push(EditorAction::BeginStroke { x, y, erase });
            }
            (None, Some((x, y))) if held && self.document.is_stroking() => {
                actions.push(EditorAction::ContinueStroke { x, y });
            }
            _ => {}
        }
        if released && !held {
            actions.push(EditorAction::EndStroke);
        }
        actions
    }
}
