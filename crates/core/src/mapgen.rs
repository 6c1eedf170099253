//! Procedural map generation split into coherent submodules.

pub mod config;

mod generator;
mod grid;
mod layout;
mod partition;
mod seed;

pub use config::{CorridorStrategy, GeneratorConfig, RoomShape, SplitHeuristic};
pub use generator::{GenerateError, GeneratedMap, MIN_MAP_SIDE, MapGenerator};
pub use layout::RoomRect;

pub fn generate_map(
    width: usize,
    height: usize,
    complexity: u32,
    seed: u64,
    config: GeneratorConfig,
) -> Result<GeneratedMap, GenerateError> {
    MapGenerator::new(config).generate(width, height, complexity, seed)
}

#[cfg(test)]
mod tests {
    use super::{GeneratorConfig, MapGenerator};

    #[test]
    fn generate_map_matches_map_generator_output() {
        let config = GeneratorConfig::editor();
        let from_helper = super::generate_map(30, 20, 9, 123, config).expect("helper");
        let from_generator = MapGenerator::new(config).generate(30, 20, 9, 123).expect("generator");
        assert_eq!(from_helper, from_generator);
    }
}
