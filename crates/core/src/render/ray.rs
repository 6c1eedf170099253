//! Grid traversal for a single ray (digital differential analyzer).

use crate::camera::Vec2;
use crate::map::{Cell, FLOOR, MapStore};

/// Smallest distance a wall may report; stands in for zero and non-finite results.
pub const MIN_WALL_DISTANCE: f64 = 1e-6;
/// Step length used for an axis the ray never advances along.
const UNREACHABLE_DELTA: f64 = 1e30;
/// Direction components smaller than this are treated as zero.
const DIRECTION_EPSILON: f64 = 1e-12;

/// Orientation of the grid line the ray crossed last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Crossed a vertical line while stepping along x.
    X,
    /// Crossed a horizontal line while stepping along y.
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance to the wall measured perpendicular to the camera plane.
    pub perp_distance: f64,
    pub side: Side,
    pub cell_x: i64,
    pub cell_y: i64,
    /// Tag of the wall that stopped the ray; `None` when the step bound ran out.
    pub wall: Option<Cell>,
    /// Fractional hit position along the wall face, in `[0, 1)`.
    pub wall_x: f64,
}

impl RayHit {
    pub fn is_hit(&self) -> bool {
        self.wall.is_some()
    }
}

fn delta_for(component: f64) -> f64 {
    if component.abs() < DIRECTION_EPSILON { UNREACHABLE_DELTA } else { (1.0 / component).abs() }
}

fn sanitize_distance(distance: f64) -> f64 {
    if distance.is_finite() && distance > 0.0 { distance } else { MIN_WALL_DISTANCE }
}

/// Walks the grid from `origin` along `direction` until a non-floor cell is
/// entered or `2 * width * height` steps have been taken.
pub fn cast_ray(map: &MapStore, origin: Vec2, direction: Vec2) -> RayHit {
    let mut cell_x = origin.x.floor() as i64;
    let mut cell_y = origin.y.floor() as i64;

    let delta_x = delta_for(direction.x);
    let delta_y = delta_for(direction.y);

    let (step_x, mut side_x) = if direction.x < 0.0 {
        (-1, (origin.x - cell_x as f64) * delta_x)
    } else {
        (1, (cell_x as f64 + 1.0 - origin.x) * delta_x)
    };
    let (step_y, mut side_y) = if direction.y < 0.0 {
        (-1, (origin.y - cell_y as f64) * delta_y)
    } else {
        (1, (cell_y as f64 + 1.0 - origin.y) * delta_y)
    };

    let max_steps = map.width().saturating_mul(map.height()).saturating_mul(2);
    let mut side = Side::X;
    let mut wall = None;
    for _ in 0..max_steps {
        if side_x < side_y {
            side_x += delta_x;
            cell_x += step_x;
            side = Side::X;
        } else {
            side_y += delta_y;
            cell_y += step_y;
            side = Side::Y;
        }
        if let Some(tag) = map.get(cell_x, cell_y)
            && tag != FLOOR
        {
            wall = Some(tag);
            break;
        }
    }

    let raw_distance = match side {
        Side::X if direction.x.abs() >= DIRECTION_EPSILON => {
            (cell_x as f64 - origin.x + (1 - step_x) as f64 / 2.0) / direction.x
        }
        Side::Y if direction.y.abs() >= DIRECTION_EPSILON => {
            (cell_y as f64 - origin.y + (1 - step_y) as f64 / 2.0) / direction.y
        }
        _ => MIN_WALL_DISTANCE,
    };
    let perp_distance = sanitize_distance(raw_distance);

    let along = match side {
        Side::X => origin.y + perp_distance * direction.y,
        Side::Y => origin.x + perp_distance * direction.x,
    };
    let wall_x = if along.is_finite() { along - along.floor() } else { 0.0 };

    RayHit { perp_distance, side, cell_x, cell_y, wall, wall_x }
}
