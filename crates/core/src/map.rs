//! Grid storage shared by the generator, the renderer, and the editor.

use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64;

/// A single grid tag. `0` is floor, `1..=3` are wall colour variants.
pub type Cell = i32;

pub const FLOOR: Cell = 0;
pub const WALL: Cell = 1;
pub const WALL_VARIANTS: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
    #[error("map dimensions {width}x{height} overflow the cell buffer")]
    TooLarge { width: usize, height: usize },
    #[error("expected {expected} cells for the map, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("could not allocate {cells} map cells")]
    Allocation { cells: usize },
}

/// Row-major grid of cell tags with a fixed size for its whole lifetime.
///
/// Resizing builds a new store (see [`MapStore::resized`]); the buffer of an
/// existing store is never reallocated in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapStore {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl MapStore {
    pub fn new(width: usize, height: usize, fill: Cell) -> Result<Self, MapError> {
        let len = cell_count(width, height)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| MapError::Allocation { cells: len })?;
        cells.resize(len, fill);
        Ok(Self { width, height, cells })
    }

    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, MapError> {
        let expected = cell_count(width, height)?;
        if cells.len() != expected {
            return Err(MapError::LengthMismatch { expected, actual: cells.len() });
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Cell> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.cells[self.index(x as usize, y as usize)])
    }

    /// Unchecked-by-contract lookup. Callers bounds-check first.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        debug_assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of bounds");
        self.cells[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, tag: Cell) {
        debug_assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of bounds");
        let index = self.index(x, y);
        self.cells[index] = tag;
    }

    /// Out-of-bounds coordinates read as solid wall.
    pub fn is_wall_at(&self, x: i64, y: i64) -> bool {
        self.get(x, y).is_none_or(|tag| tag != FLOOR)
    }

    pub fn is_floor_at(&self, x: i64, y: i64) -> bool {
        self.get(x, y) == Some(FLOOR)
    }

    /// Builds a new store of the requested size, copying the overlapping region
    /// and initialising every newly exposed cell to floor.
    pub fn resized(&self, width: usize, height: usize) -> Result<Self, MapError> {
        let mut resized = Self::new(width, height, FLOOR)?;
        for y in 0..self.height.min(height) {
            for x in 0..self.width.min(width) {
                resized.set(x, y, self.cell(x, y));
            }
        }
        Ok(resized)
    }

    /// Moves a real-valued point into the open play area `[1, dim - 2]`.
    pub fn clamp_inside(&self, x: f64, y: f64) -> (f64, f64) {
        (clamp_axis(x, self.width), clamp_axis(y, self.height))
    }

    pub fn first_floor_cell(&self) -> Option<(usize, usize)> {
        let index = self.cells.iter().position(|&tag| tag == FLOOR)?;
        Some((index % self.width, index / self.width))
    }

    pub fn border_is_solid(&self) -> bool {
        let (w, h) = (self.width, self.height);
        (0..w).all(|x| self.cell(x, 0) != FLOOR && self.cell(x, h - 1) != FLOOR)
            && (0..h).all(|y| self.cell(0, y) != FLOOR && self.cell(w - 1, y) != FLOOR)
    }

    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|&&tag| tag == FLOOR).count()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.cells.len() * 4);
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for tag in &self.cells {
            bytes.extend(tag.to_le_bytes());
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

fn cell_count(width: usize, height: usize) -> Result<usize, MapError> {
    if width == 0 || height == 0 {
        return Err(MapError::ZeroDimension { width, height });
    }
    width.checked_mul(height).ok_or(MapError::TooLarge { width, height })
}

fn clamp_axis(value: f64, dimension: usize) -> f64 {
    let far_edge = dimension as f64 - 1.0;
    if !value.is_finite() || value < 1.0 {
        return 1.5_f64.min(far_edge.max(1.0));
    }
    if value >= far_edge {
        return (dimension as f64 - 2.0 + 0.5).max(1.0);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_has_exact_length_and_fill() {
        let map = MapStore::new(5, 3, WALL).expect("allocate");
        assert_eq!(map.cells().len(), 15);
        assert!(map.cells().iter().all(|&tag| tag == WALL));
    }

    #[test]
    fn zero_sized_maps_are_rejected() {
        assert_eq!(
            MapStore::new(0, 4, WALL),
            Err(MapError::ZeroDimension { width: 0, height: 4 })
        );
    }

    #[test]
    fn from_cells_rejects_wrong_length() {
        let err = MapStore::from_cells(2, 2, vec![0; 3]).expect_err("length mismatch");
        assert_eq!(err, MapError::LengthMismatch { expected: 4, actual: 3 });
    }

    #[test]
    fn out_of_bounds_reads_are_walls() {
        let map = MapStore::new(3, 3, FLOOR).expect("allocate");
        assert_eq!(map.get(-1, 0), None);
        assert_eq!(map.get(3, 1), None);
        assert!(map.is_wall_at(-1, 0));
        assert!(!map.is_wall_at(1, 1));
    }

    #[test]
    fn resized_copies_overlap_and_fills_new_cells_with_floor() {
        let mut map = MapStore::new(2, 2, WALL).expect("allocate");
        map.set(1, 1, 3);
        let grown = map.resized(4, 3).expect("resize");
        assert_eq!(grown.width(), 4);
        assert_eq!(grown.cell(1, 1), 3);
        assert_eq!(grown.cell(0, 0), WALL);
        assert_eq!(grown.cell(3, 2), FLOOR);
        assert_eq!(grown.cell(2, 0), FLOOR);

        let shrunk = grown.resized(1, 1).expect("resize");
        assert_eq!(shrunk.cells(), &[WALL]);
    }

    #[test]
    fn clamp_inside_keeps_points_off_the_border() {
        let map = MapStore::new(10, 8, FLOOR).expect("allocate");
        assert_eq!(map.clamp_inside(0.2, 3.0), (1.5, 3.0));
        assert_eq!(map.clamp_inside(22.0, 12.0), (8.5, 6.5));
        assert_eq!(map.clamp_inside(4.25, 5.75), (4.25, 5.75));
    }

    #[test]
    fn fingerprint_tracks_cell_contents() {
        let a = MapStore::new(4, 4, WALL).expect("allocate");
        let mut b = a.clone();
        assert_eq!(a.fingerprint(), b.fingerprint());
        b.set(2, 2, FLOOR);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
