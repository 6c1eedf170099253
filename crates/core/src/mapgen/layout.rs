//! Room placement inside partition leaves and room / corridor carving.

use crate::map::{FLOOR, MapStore};
use crate::types::Pos;

use super::config::RoomShape;
use super::partition::Region;
use super::seed::MapRng;

const MIN_ROOM_SIDE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl RoomRect {
    pub fn right(self) -> usize {
        self.x + self.width - 1
    }

    pub fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    pub fn center(self) -> Pos {
        Pos { y: (self.y + self.height / 2) as i32, x: (self.x + self.width / 2) as i32 }
    }

    pub fn contains(self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 {
            return false;
        }
        let px = pos.x as usize;
        let py = pos.y as usize;
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// Picks a room inside `leaf`, inset by one cell where the leaf is wide enough.
pub(super) fn place_room(leaf: Region, rng: &mut MapRng) -> RoomRect {
    let (x, width) = place_span(leaf.x, leaf.width, rng);
    let (y, height) = place_span(leaf.y, leaf.height, rng);
    RoomRect { x, y, width, height }
}

fn place_span(start: usize, length: usize, rng: &mut MapRng) -> (usize, usize) {
    let inset = usize::from(length >= MIN_ROOM_SIDE);
    let available = (length - 2 * inset).max(1);
    let size = if available > MIN_ROOM_SIDE {
        rng.inclusive(MIN_ROOM_SIDE, available)
    } else {
        available
    };
    let origin = start + inset + rng.below(available - size + 1);
    (origin, size)
}

pub(super) fn carve_room(map: &mut MapStore, room: RoomRect, shape: RoomShape) {
    match shape {
        RoomShape::Rectangle => {
            for y in room.y..=room.bottom() {
                for x in room.x..=room.right() {
                    map.set(x, y, FLOOR);
                }
            }
        }
        RoomShape::Ellipse => {
            let radius_x = room.width as f64 / 2.0;
            let radius_y = room.height as f64 / 2.0;
            let center_x = room.x as f64 + radius_x;
            let center_y = room.y as f64 + radius_y;
            for y in room.y..=room.bottom() {
                for x in room.x..=room.right() {
                    let dx = (x as f64 + 0.5 - center_x) / radius_x;
                    let dy = (y as f64 + 0.5 - center_y) / radius_y;
                    if dx * dx + dy * dy <= 1.0 {
                        map.set(x, y, FLOOR);
                    }
                }
            }
        }
    }
}

/// Carves along x from `start` first, then along y, including both endpoints.
/// Cells on the outer ring are never touched.
pub(super) fn carve_l_corridor(map: &mut MapStore, start: Pos, end: Pos) {
    let step_x = (end.x - start.x).signum();
    let step_y = (end.y - start.y).signum();
    let mut cursor = start;
    carve_interior(map, cursor);
    while cursor.x != end.x {
        cursor.x += step_x;
        carve_interior(map, cursor);
    }
    while cursor.y != end.y {
        cursor.y += step_y;
        carve_interior(map, cursor);
    }
}

fn carve_interior(map: &mut MapStore, pos: Pos) {
    let x = i64::from(pos.x);
    let y = i64::from(pos.y);
    if x <= 0 || y <= 0 || x >= map.width() as i64 - 1 || y >= map.height() as i64 - 1 {
        return;
    }
    map.set(x as usize, y as usize, FLOOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::WALL;

    #[test]
    fn placed_rooms_stay_inside_their_leaf() {
        let mut rng = MapRng::from_seed(5);
        for (width, height) in [(1, 1), (2, 5), (3, 3), (6, 4), (12, 9), (30, 7)] {
            let leaf = Region { x: 4, y: 2, width, height };
            for _ in 0..50 {
                let room = place_room(leaf, &mut rng);
                assert!(room.x >= leaf.x && room.right() < leaf.x + leaf.width, "{room:?}");
                assert!(room.y >= leaf.y && room.bottom() < leaf.y + leaf.height, "{room:?}");
                assert!(room.width >= 1 && room.height >= 1);
            }
        }
    }

    #[test]
    fn rooms_in_roomy_leaves_are_at_least_three_wide() {
        let mut rng = MapRng::from_seed(8);
        let leaf = Region { x: 1, y: 1, width: 10, height: 8 };
        for _ in 0..50 {
            let room = place_room(leaf, &mut rng);
            assert!(room.width >= 3 && room.height >= 3, "{room:?}");
        }
    }

    #[test]
    fn ellipse_rooms_always_carve_their_center() {
        for (width, height) in [(1, 1), (3, 3), (4, 7), (9, 4)] {
            let mut map = MapStore::new(16, 16, WALL).expect("map");
            let room = RoomRect { x: 2, y: 3, width, height };
            carve_room(&mut map, room, RoomShape::Ellipse);
            let center = room.center();
            assert!(map.is_floor_at(center.x.into(), center.y.into()), "{room:?}");
            for (index, &tag) in map.cells().iter().enumerate() {
                let pos = Pos::new((index % 16) as i32, (index / 16) as i32);
                if tag == FLOOR {
                    assert!(room.contains(pos), "ellipse leaked outside {room:?} at {pos:?}");
                }
            }
        }
    }

    #[test]
    fn l_corridor_runs_x_first_then_y() {
        let mut map = MapStore::new(8, 8, WALL).expect("map");
        carve_l_corridor(&mut map, Pos::new(1, 1), Pos::new(4, 5));
        for x in 1..=4 {
            assert_eq!(map.cell(x, 1), FLOOR);
        }
        for y in 1..=5 {
            assert_eq!(map.cell(4, y), FLOOR);
        }
        assert_eq!(map.cell(1, 5), WALL);
        assert_eq!(map.floor_count(), 8);
    }

    #[test]
    fn corridor_never_opens_the_outer_ring() {
        let mut map = MapStore::new(6, 6, WALL).expect("map");
        carve_l_corridor(&mut map, Pos::new(0, 2), Pos::new(5, 5));
        assert!(map.border_is_solid());
    }
}
