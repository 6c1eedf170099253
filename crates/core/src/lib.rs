pub mod camera;
pub mod editor;
pub mod history;
pub mod map;
pub mod map_file;
pub mod mapgen;
pub mod render;
pub mod types;

pub use camera::{Camera, Vec2};
pub use editor::{EditorAction, EditorDocument, EditorError};
pub use history::{EditHistory, HISTORY_CAPACITY};
pub use map::{Cell, FLOOR, MapError, MapStore, WALL};
pub use map_file::{MapFileError, format_map, load_map_file, parse_map, save_map_file};
pub use mapgen::{GenerateError, GeneratedMap, GeneratorConfig, MapGenerator, generate_map};
pub use render::{Frame, RenderCap, RenderError, RenderStats, TextureSet, render_frame};
pub use types::Pos;
