//! First-person camera: position, facing, and the projection plane.

use std::ops::{Add, Mul, Sub};

use crate::map::MapStore;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn rotated(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { x: self.x * cos - self.y * sin, y: self.x * sin + self.y * cos }
    }

    /// Quarter turn that maps the default facing `(-1, 0)` onto `(0, 1)`.
    pub fn perpendicular(self) -> Self {
        Self { x: self.y, y: -self.x }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

pub const DEFAULT_FOV_DEGREES: f64 = 80.0;
pub const DEFAULT_START: Vec2 = Vec2::new(22.0, 12.0);
pub const DEFAULT_FACING: Vec2 = Vec2::new(-1.0, 0.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    pub direction: Vec2,
    /// Half-width of the view on the unit-distance plane, perpendicular to `direction`.
    pub plane: Vec2,
}

impl Camera {
    pub fn new(position: Vec2, direction: Vec2, fov_degrees: f64) -> Self {
        let half_fov = fov_degrees.to_radians() / 2.0;
        Self { position, direction, plane: direction.perpendicular() * half_fov.tan() }
    }

    /// Rotates facing and projection plane by the same matrix, keeping them perpendicular.
    pub fn rotate(&mut self, angle: f64) {
        self.direction = self.direction.rotated(angle);
        self.plane = self.plane.rotated(angle);
    }

    /// Ray through the screen column at `camera_x` in `[-1, 1]`.
    pub fn ray_direction(&self, camera_x: f64) -> Vec2 {
        self.direction + self.plane * camera_x
    }

    /// Moves by `delta`, one axis at a time; an axis is blocked when its
    /// destination cell is outside the map or not floor.
    pub fn try_move(&mut self, map: &MapStore, delta: Vec2) {
        let next_x = self.position.x + delta.x;
        if map.is_floor_at(next_x.floor() as i64, self.position.y.floor() as i64) {
            self.position.x = next_x;
        }
        let next_y = self.position.y + delta.y;
        if map.is_floor_at(self.position.x.floor() as i64, next_y.floor() as i64) {
            self.position.y = next_y;
        }
    }

    pub fn move_forward(&mut self, map: &MapStore, distance: f64) {
        self.try_move(map, self.direction * distance);
    }

    /// Positive distances strafe toward the right edge of the screen.
    pub fn strafe(&mut self, map: &MapStore, distance: f64) {
        self.try_move(map, self.direction.perpendicular() * distance);
    }

    pub fn clamp_to(&mut self, map: &MapStore) {
        let (x, y) = map.clamp_inside(self.position.x, self.position.y);
        self.position = Vec2::new(x, y);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_START, DEFAULT_FACING, DEFAULT_FOV_DEGREES)
    }
}
