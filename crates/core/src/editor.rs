//! Map editor document: the grid being painted, its history, and tool state.
//!
//! The host translates keys and mouse events into [`EditorAction`]s; everything
//! that changes the map goes through [`EditorDocument::apply`].

use thiserror::Error;
use tracing::debug;

use crate::history::EditHistory;
use crate::map::{Cell, FLOOR, MapError, MapStore, WALL};
use crate::mapgen::{GenerateError, GeneratorConfig, MapGenerator};

pub const DEFAULT_EDITOR_SIDE: usize = 24;
pub const MAX_BRUSH: u32 = 16;
pub const MIN_COMPLEXITY: u32 = 1;
pub const MAX_COMPLEXITY: u32 = 64;
pub const DEFAULT_COMPLEXITY: u32 = 8;
pub const MAX_PAINT: Cell = 9;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Map(#[from] MapError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorAction {
    Generate,
    AdjustComplexity(i32),
    RandomizeSeed(u64),
    Undo,
    Redo,
    AdjustBrush(i32),
    SelectPaint(Cell),
    /// Starts a stroke at a grid cell; `erase` paints floor instead of the paint value.
    BeginStroke { x: i64, y: i64, erase: bool },
    ContinueStroke { x: i64, y: i64 },
    EndStroke,
    ResizeGrid { cols: usize, rows: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Stroke {
    value: Cell,
    last: (i64, i64),
}

#[derive(Clone, Debug)]
pub struct EditorDocument {
    map: MapStore,
    history: EditHistory,
    generator: MapGenerator,
    paint_value: Cell,
    brush_size: u32,
    complexity: u32,
    seed: u64,
    stroke: Option<Stroke>,
}

impl EditorDocument {
    pub fn new(map: MapStore, seed: u64) -> Self {
        Self::with_config(map, seed, GeneratorConfig::editor())
    }

    pub fn with_config(map: MapStore, seed: u64, config: GeneratorConfig) -> Self {
        Self {
            map,
            history: EditHistory::new(),
            generator: MapGenerator::new(config),
            paint_value: WALL,
            brush_size: 1,
            complexity: DEFAULT_COMPLEXITY,
            seed,
            stroke: None,
        }
    }

    /// An all-floor grid of the given size, as the editor starts without a file.
    pub fn blank(width: usize, height: usize, seed: u64) -> Result<Self, EditorError> {
        Ok(Self::new(MapStore::new(width, height, FLOOR)?, seed))
    }

    pub fn map(&self) -> &MapStore {
        &self.map
    }

    pub fn paint_value(&self) -> Cell {
        self.paint_value
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    pub fn complexity(&self) -> u32 {
        self.complexity
    }

    pub fn set_complexity(&mut self, complexity: u32) {
        self.complexity = complexity.clamp(MIN_COMPLEXITY, MAX_COMPLEXITY);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn apply(&mut self, action: EditorAction) -> Result<(), EditorError> {
        match action {
            EditorAction::Generate => self.generate()?,
            EditorAction::AdjustComplexity(delta) => {
                let next = i64::from(self.complexity) + i64::from(delta);
                self.complexity =
                    next.clamp(i64::from(MIN_COMPLEXITY), i64::from(MAX_COMPLEXITY)) as u32;
            }
            EditorAction::RandomizeSeed(seed) => self.seed = seed,
            EditorAction::Undo => {
                self.stroke = None;
                self.history.undo(&mut self.map);
            }
            EditorAction::Redo => {
                self.stroke = None;
                self.history.redo(&mut self.map);
            }
            EditorAction::AdjustBrush(delta) => {
                let next = i64::from(self.brush_size) + i64::from(delta);
                self.brush_size = next.clamp(1, i64::from(MAX_BRUSH)) as u32;
            }
            EditorAction::SelectPaint(value) => {
                if (0..=MAX_PAINT).contains(&value) {
                    self.paint_value = value;
                }
            }
            EditorAction::BeginStroke { x, y, erase } => self.begin_stroke(x, y, erase),
            EditorAction::ContinueStroke { x, y } => self.continue_stroke(x, y),
            EditorAction::EndStroke => self.stroke = None,
            EditorAction::ResizeGrid { cols, rows } => self.resize(cols, rows)?,
        }
        Ok(())
    }

    /// One-line summary of tool state and history depth.
    pub fn status_line(&self) -> String {
        format!(
            "paint={} brush={} complexity={} seed={} undo={} redo={}",
            self.paint_value,
            self.brush_size,
            self.complexity,
            self.seed,
            self.history.undo_len(),
            self.history.redo_len(),
        )
    }

    fn generate(&mut self) -> Result<(), EditorError> {
        let generated = self.generator.generate(
            self.map.width(),
            self.map.height(),
            self.complexity,
            self.seed,
        )?;
        debug!(
            rooms = generated.rooms.len(),
            truncated = generated.truncated,
            seed = self.seed,
            "editor generated map"
        );
        self.stroke = None;
        self.history.record_edit(&self.map);
        self.map = generated.map;
        Ok(())
    }

    fn resize(&mut self, cols: usize, rows: usize) -> Result<(), EditorError> {
        if cols == self.map.width() && rows == self.map.height() {
            return Ok(());
        }
        let resized = self.map.resized(cols, rows)?;
        self.history.record_edit(&self.map);
        self.map = resized;
        Ok(())
    }

    fn begin_stroke(&mut self, x: i64, y: i64, erase: bool) {
        if !self.map.in_bounds(x, y) {
            return;
        }
        let value = if erase { FLOOR } else { self.paint_value };
        self.history.record_edit(&self.map);
        self.stamp(x, y, value);
        self.stroke = Some(Stroke { value, last: (x, y) });
    }

    fn continue_stroke(&mut self, x: i64, y: i64) {
        let Some(stroke) = self.stroke else {
            return;
        };
        if !self.map.in_bounds(x, y) {
            return;
        }
        for (px, py) in line_cells(stroke.last, (x, y)) {
            self.stamp(px, py, stroke.value);
        }
        self.stroke = Some(Stroke { last: (x, y), ..stroke });
    }

    /// Square brush centred on `(x, y)`, clipped to the grid.
    fn stamp(&mut self, x: i64, y: i64, value: Cell) {
        let half = i64::from(self.brush_size / 2);
        for ty in y - half..=y + half {
            for tx in x - half..=x + half {
                if self.map.in_bounds(tx, ty) {
                    self.map.set(tx as usize, ty as usize, value);
                }
            }
        }
    }
}

/// Bresenham line from `from` to `to`, both endpoints included.
pub fn line_cells(from: (i64, i64), to: (i64, i64)) -> Vec<(i64, i64)> {
    let (mut x, mut y) = from;
    let (x1, y1) = to;
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut cells = Vec::with_capacity((dx - dy) as usize + 1);
    loop {
        cells.push((x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    cells
}
