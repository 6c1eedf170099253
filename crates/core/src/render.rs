//! Column raycaster: textured walls, checkerboard floor, flat ceiling.

mod frame;
mod ray;
mod texture;

use thiserror::Error;

use crate::camera::Camera;
use crate::map::MapStore;

pub use frame::{Argb, Frame, RenderCap, argb, halve};
pub use ray::{MIN_WALL_DISTANCE, RayHit, Side, cast_ray};
pub use texture::{TEXTURE_COUNT, TEXTURE_SIZE, TextureSet};

pub const CEILING_COLOR: Argb = 0xFF40_4040;
/// Wall slices taller than this are clipped before any row arithmetic.
pub const MAX_LINE_HEIGHT: i64 = 1 << 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("frame size {width}x{height} has no pixels")]
    EmptyFrame { width: usize, height: usize },
    #[error("could not allocate a frame of {pixels} pixels")]
    Allocation { pixels: usize },
    #[error("texture set needs {expected} texels, got {actual}")]
    TextureShape { expected: usize, actual: usize },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Columns whose ray exhausted the step bound; these show only the ceiling fill.
    pub missed_columns: usize,
}

fn floor_color(checker: i64) -> Argb {
    let f: u8 = if checker == 1 { 80 } else { 110 };
    argb(f / 2, f, f / 3)
}

/// Texture column for a hit, mirrored so faces read the same way from every side.
fn texture_column(hit: &RayHit, ray_x: f64, ray_y: f64) -> usize {
    let size = TEXTURE_SIZE as i64;
    let column = ((hit.wall_x * TEXTURE_SIZE as f64) as i64).clamp(0, size - 1);
    let mirrored = match hit.side {
        Side::X => ray_x > 0.0,
        Side::Y => ray_y < 0.0,
    };
    let column = if mirrored { size - column - 1 } else { column };
    column as usize
}

/// Renders one full frame. Every pixel of `frame` is written.
pub fn render_frame(
    frame: &mut Frame,
    camera: &Camera,
    map: &MapStore,
    textures: &TextureSet,
) -> RenderStats {
    let width = frame.width();
    let height = frame.height();
    let h = height as i64;
    let mut stats = RenderStats::default();

    frame.fill(CEILING_COLOR);

    for x in 0..width {
        let camera_x = 2.0 * x as f64 / width as f64 - 1.0;
        let ray = camera.ray_direction(camera_x);
        let hit = cast_ray(map, camera.position, ray);
        let Some(tag) = hit.wall else {
            stats.missed_columns += 1;
            continue;
        };

        let mut line_height = (height as f64 / hit.perp_distance) as i64;
        if line_height <= 0 {
            line_height = h;
        }
        line_height = line_height.min(MAX_LINE_HEIGHT);

        let draw_start = (h / 2 - line_height / 2).max(0);
        let draw_end = (line_height / 2 + h / 2).min(h - 1);

        let slot = TextureSet::slot_for_tag(tag);
        let tex_x = texture_column(&hit, ray.x, ray.y);
        let tex_max = TEXTURE_SIZE as i64 - 1;

        for y in draw_start..=draw_end {
            let d = y * 256 - h * 128 + line_height * 128;
            let tex_y = ((d * TEXTURE_SIZE as i64) / line_height / 256).clamp(0, tex_max);
            let mut color = textures.texel(slot, tex_x, tex_y as usize) | 0xFF00_0000;
            if hit.side == Side::Y {
                color = halve(color);
            }
            frame.put(x, y as usize, color);
        }

        let wall_center_x = hit.cell_x as f64 + 0.5;
        let wall_center_y = hit.cell_y as f64 + 0.5;
        for y in draw_end + 1..h {
            let denominator = 2 * y - h;
            if denominator <= 0 {
                continue;
            }
            let current = height as f64 / denominator as f64;
            let weight = current / hit.perp_distance;
            let floor_x = weight * wall_center_x + (1.0 - weight) * camera.position.x;
            let floor_y = weight * wall_center_y + (1.0 - weight) * camera.position.y;
            let checker = if floor_x.is_finite() && floor_y.is_finite() {
                (floor_x.floor() as i64 + floor_y.floor() as i64).rem_euclid(2)
            } else {
                0
            };
            frame.put(x, y as usize, floor_color(checker));
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Vec2;
    use crate::map::{FLOOR, WALL};

    fn room(size: usize, tag: i32) -> MapStore {
        let mut map = MapStore::new(size, size, tag).expect("map");
        for y in 1..size - 1 {
            for x in 1..size - 1 {
                map.set(x, y, FLOOR);
            }
        }
        map
    }

    #[test]
    fn facing_a_wall_fills_center_column_with_its_texture() {
        let map = room(8, 2);
        let camera = Camera::new(Vec2::new(4.5, 4.5), Vec2::new(1.0, 0.0), 66.0);
        let mut frame = Frame::new(64, 48).expect("frame");
        let stats = render_frame(&mut frame, &camera, &map, &TextureSet::flat_colors());

        assert_eq!(stats.missed_columns, 0);
        assert_eq!(frame.pixel(32, 24), argb(80, 180, 80));
        assert_eq!(frame.pixel(32, 0), CEILING_COLOR);
        let floor = frame.pixel(32, 47);
        assert!(floor == floor_color(0) || floor == floor_color(1));
    }

    #[test]
    fn horizontal_grid_faces_are_shaded() {
        let map = room(8, WALL);
        let camera = Camera::new(Vec2::new(4.5, 4.5), Vec2::new(0.0, 1.0), 66.0);
        let mut frame = Frame::new(32, 32).expect("frame");
        render_frame(&mut frame, &camera, &map, &TextureSet::flat_colors());
        assert_eq!(frame.pixel(16, 16), halve(argb(180, 80, 80)));
    }

    #[test]
    fn standing_against_a_wall_clips_the_slice() {
        let map = room(5, 3);
        let camera = Camera::new(Vec2::new(3.999_999_9, 2.5), Vec2::new(1.0, 0.0), 80.0);
        let mut frame = Frame::new(16, 12).expect("frame");
        render_frame(&mut frame, &camera, &map, &TextureSet::flat_colors());
        for y in 0..12 {
            assert_eq!(frame.pixel(8, y), argb(80, 80, 180));
        }
    }

    #[test]
    fn open_maps_leave_missed_columns_as_ceiling() {
        let map = MapStore::new(6, 6, FLOOR).expect("map");
        let camera = Camera::new(Vec2::new(3.5, 3.5), Vec2::new(1.0, 0.0), 80.0);
        let mut frame = Frame::new(10, 10).expect("frame");
        let stats = render_frame(&mut frame, &camera, &map, &TextureSet::flat_colors());
        assert_eq!(stats.missed_columns, 10);
        assert!(frame.pixels().iter().all(|&p| p == CEILING_COLOR));
    }

    #[test]
    fn texture_columns_mirror_on_positive_approach() {
        let hit = RayHit {
            perp_distance: 1.0,
            side: Side::X,
            cell_x: 0,
            cell_y: 0,
            wall: Some(WALL),
            wall_x: 0.25,
        };
        assert_eq!(texture_column(&hit, 1.0, 0.0), 47);
        assert_eq!(texture_column(&hit, -1.0, 0.0), 16);
        let y_hit = RayHit { side: Side::Y, ..hit };
        assert_eq!(texture_column(&y_hit, 0.0, -1.0), 47);
        assert_eq!(texture_column(&y_hit, 0.0, 1.0), 16);
    }
}
