//! Generation pipeline: partition, carve rooms, connect, smooth, recolour.

use thiserror::Error;
use tracing::debug;

use crate::map::{MapError, MapStore, WALL};
use crate::types::Pos;

use super::config::{CorridorStrategy, GeneratorConfig};
use super::grid::{recolor_walls, smooth_pass};
use super::layout::{RoomRect, carve_l_corridor, carve_room, place_room};
use super::partition::{PartitionTree, Region};
use super::seed::MapRng;

/// Smallest side that still leaves a one-cell interior inside the wall ring.
pub const MIN_MAP_SIDE: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("a {width}x{height} map has no interior; both sides must be at least {MIN_MAP_SIDE}")]
    TooSmall { width: usize, height: usize },
    #[error(transparent)]
    Map(#[from] MapError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedMap {
    pub map: MapStore,
    /// Rooms in partition-leaf order.
    pub rooms: Vec<RoomRect>,
    /// Endpoints of every L-shaped corridor that was carved.
    pub corridors: Vec<(Pos, Pos)>,
    /// Partitioning stopped early because node capacity was reached.
    pub truncated: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MapGenerator {
    config: GeneratorConfig,
}

impl MapGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn generate(
        &self,
        width: usize,
        height: usize,
        complexity: u32,
        seed: u64,
    ) -> Result<GeneratedMap, GenerateError> {
        if width < MIN_MAP_SIDE || height < MIN_MAP_SIDE {
            return Err(GenerateError::TooSmall { width, height });
        }

        let mut map = MapStore::new(width, height, WALL)?;
        let mut rng = MapRng::from_seed(seed);
        let interior = Region { x: 1, y: 1, width: width - 2, height: height - 2 };
        let tree = PartitionTree::build(
            interior,
            self.config.split,
            complexity,
            self.config.node_capacity.max(1),
            &mut rng,
        );

        let mut room_of_node = vec![None; tree.nodes.len()];
        let mut rooms = Vec::new();
        for leaf in tree.leaves() {
            let room = place_room(tree.nodes[leaf].region, &mut rng);
            carve_room(&mut map, room, self.config.room_shape);
            room_of_node[leaf] = Some(room);
            rooms.push(room);
        }

        let center_of = |node: usize| -> Pos {
            let leaf = tree.first_leaf_under(node);
            room_of_node[leaf].map_or_else(
                || {
                    let (x, y) = tree.nodes[leaf].region.center();
                    Pos::new(x as i32, y as i32)
                },
                RoomRect::center,
            )
        };

        let corridors: Vec<(Pos, Pos)> = match self.config.corridors {
            CorridorStrategy::TreeWalk => tree
                .nodes
                .iter()
                .filter_map(|node| node.children)
                .map(|[first, second]| (center_of(first), center_of(second)))
                .collect(),
            CorridorStrategy::Sequential => {
                rooms.windows(2).map(|pair| (pair[0].center(), pair[1].center())).collect()
            }
        };
        for &(start, end) in &corridors {
            carve_l_corridor(&mut map, start, end);
        }

        for _ in 0..self.config.smoothing_passes {
            map = smooth_pass(&map)?;
        }
        recolor_walls(&mut map, self.config.recolor_block);

        debug!(
            width,
            height,
            complexity,
            seed,
            rooms = rooms.len(),
            corridors = corridors.len(),
            floor = map.floor_count(),
            "generated map"
        );

        Ok(GeneratedMap { map, rooms, corridors, truncated: tree.truncated })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};

    use super::*;
    use crate::map::FLOOR;
    use crate::mapgen::config::{RoomShape, SplitHeuristic};

    fn floor_path_exists(map: &MapStore, start: Pos, goal: Pos) -> bool {
        if !map.is_floor_at(start.x.into(), start.y.into()) {
            return false;
        }
        let mut open = VecDeque::from([start]);
        let mut seen = BTreeSet::from([start]);
        while let Some(pos) = open.pop_front() {
            if pos == goal {
                return true;
            }
            for next in [
                Pos { y: pos.y - 1, x: pos.x },
                Pos { y: pos.y, x: pos.x + 1 },
                Pos { y: pos.y + 1, x: pos.x },
                Pos { y: pos.y, x: pos.x - 1 },
            ] {
                if !seen.contains(&next) && map.is_floor_at(next.x.into(), next.y.into()) {
                    seen.insert(next);
                    open.push_back(next);
                }
            }
        }
        false
    }

    #[test]
    fn viewer_map_has_requested_size_and_solid_border() {
        let generated =
            MapGenerator::new(GeneratorConfig::viewer()).generate(24, 24, 8, 1).expect("generate");
        assert_eq!((generated.map.width(), generated.map.height()), (24, 24));
        assert!(generated.map.border_is_solid());
        assert!(generated.rooms.len() > 1);
        assert!(generated.map.floor_count() > 0);
    }

    #[test]
    fn every_cell_is_floor_or_a_wall_variant() {
        for config in [GeneratorConfig::viewer(), GeneratorConfig::editor()] {
            let generated = MapGenerator::new(config).generate(40, 30, 16, 77).expect("generate");
            assert!(generated.map.cells().iter().all(|tag| (0..=3).contains(tag)));
        }
    }

    #[test]
    fn same_seed_produces_identical_maps() {
        for config in [GeneratorConfig::viewer(), GeneratorConfig::editor()] {
            let generator = MapGenerator::new(config);
            let a = generator.generate(32, 24, 12, 123_456).expect("generate");
            let b = generator.generate(32, 24, 12, 123_456).expect("generate");
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_seeds_usually_differ() {
        let generator = MapGenerator::new(GeneratorConfig::editor());
        let a = generator.generate(48, 48, 20, 1).expect("generate");
        let b = generator.generate(48, 48, 20, 2).expect("generate");
        assert_ne!(a.map.fingerprint(), b.map.fingerprint());
    }

    #[test]
    fn carved_corridors_join_their_endpoints_without_smoothing() {
        for corridors in [CorridorStrategy::Sequential, CorridorStrategy::TreeWalk] {
            let config = GeneratorConfig { corridors, ..GeneratorConfig::viewer() };
            for seed in 0..20 {
                let generated =
                    MapGenerator::new(config).generate(36, 28, 10, seed).expect("generate");
                for &(start, end) in &generated.corridors {
                    assert!(
                        floor_path_exists(&generated.map, start, end),
                        "no floor path {start:?} -> {end:?} for seed {seed}"
                    );
                }
            }
        }
    }

    #[test]
    fn room_centres_are_floor_before_smoothing() {
        let config = GeneratorConfig { smoothing_passes: 0, ..GeneratorConfig::editor() };
        let generated = MapGenerator::new(config).generate(50, 40, 24, 9).expect("generate");
        for room in &generated.rooms {
            let center = room.center();
            assert_eq!(generated.map.get(center.x.into(), center.y.into()), Some(FLOOR));
        }
    }

    #[test]
    fn minimum_map_with_complexity_one_is_walled() {
        for config in [GeneratorConfig::viewer(), GeneratorConfig::editor()] {
            let generated = MapGenerator::new(config).generate(8, 8, 1, 5).expect("generate");
            assert_eq!(generated.map.cells().len(), 64);
            assert!(generated.map.border_is_solid());
        }
    }

    #[test]
    fn maps_without_interior_are_rejected() {
        let generator = MapGenerator::default();
        assert_eq!(
            generator.generate(2, 10, 4, 0),
            Err(GenerateError::TooSmall { width: 2, height: 10 })
        );
    }

    #[test]
    fn tiny_node_capacity_still_yields_a_valid_map() {
        let config = GeneratorConfig {
            split: SplitHeuristic::RecursivePass,
            room_shape: RoomShape::Rectangle,
            node_capacity: 3,
            ..GeneratorConfig::viewer()
        };
        let generated = MapGenerator::new(config).generate(64, 64, 0, 4).expect("generate");
        assert!(generated.truncated);
        assert!(generated.map.border_is_solid());
        assert_eq!(generated.rooms.len(), 2);
        assert_eq!(generated.corridors.len(), 1);
    }
}
