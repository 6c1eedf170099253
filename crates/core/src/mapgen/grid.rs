//! Neighbourhood passes over a carved map: automaton smoothing and wall recolouring.

use crate::map::{FLOOR, MapError, MapStore, WALL, WALL_VARIANTS};

/// A cell turns to floor when at least this many of its eight neighbours are floor.
const SMOOTHING_FLOOR_THRESHOLD: usize = 5;

fn floor_neighbors(map: &MapStore, x: usize, y: usize) -> usize {
    let mut floors = 0;
    for ny in y - 1..=y + 1 {
        for nx in x - 1..=x + 1 {
            if (nx, ny) != (x, y) && map.cell(nx, ny) == FLOOR {
                floors += 1;
            }
        }
    }
    floors
}

/// One automaton pass over the interior. Every neighbour read comes from the
/// untouched input map; the outer ring is copied through unchanged.
pub(super) fn smooth_pass(map: &MapStore) -> Result<MapStore, MapError> {
    let (width, height) = (map.width(), map.height());
    let mut next = MapStore::new(width, height, WALL)?;
    for y in 0..height {
        for x in 0..width {
            let interior = x > 0 && y > 0 && x < width - 1 && y < height - 1;
            let tag = if !interior {
                map.cell(x, y)
            } else if floor_neighbors(map, x, y) >= SMOOTHING_FLOOR_THRESHOLD {
                FLOOR
            } else {
                WALL
            };
            next.set(x, y, tag);
        }
    }
    Ok(next)
}

/// Retags plain interior walls that touch floor with a colour variant chosen
/// from diagonal bands of `block` cells.
pub(super) fn recolor_walls(map: &mut MapStore, block: usize) {
    let block = block.max(1);
    let (width, height) = (map.width(), map.height());
    if width < 3 || height < 3 {
        return;
    }
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            if map.cell(x, y) == WALL && floor_neighbors(map, x, y) > 0 {
                let variant = (x / block + y / block) % WALL_VARIANTS;
                map.set(x, y, variant as i32 + 1);
            }
        }
    }
}
