//! Knobs that select between the viewer and editor flavours of generation.

/// How the partition tree grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitHeuristic {
    /// Up to `complexity` attempts, each splitting one randomly picked leaf.
    /// Later leaves win the pick more often as the attempt count grows.
    IterativeLeaf,
    /// Visit nodes in creation order and split every node that is still
    /// large enough. `complexity` is not consulted.
    RecursivePass,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoomShape {
    Rectangle,
    Ellipse,
}

/// Which room centres get joined by L-shaped corridors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorridorStrategy {
    /// Each internal node joins a room from its first subtree to a room from
    /// its second subtree.
    TreeWalk,
    /// Rooms are chained in creation order.
    Sequential,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub split: SplitHeuristic,
    pub room_shape: RoomShape,
    pub corridors: CorridorStrategy,
    pub smoothing_passes: u32,
    /// Cell size of the diagonal bands used to pick wall colour variants.
    pub recolor_block: usize,
    /// Upper bound on partition nodes; splitting stops once reached.
    pub node_capacity: usize,
}

impl GeneratorConfig {
    /// Boxy rooms chained together, used for the viewer's default map.
    pub const fn viewer() -> Self {
        Self {
            split: SplitHeuristic::RecursivePass,
            room_shape: RoomShape::Rectangle,
            corridors: CorridorStrategy::Sequential,
            smoothing_passes: 0,
            recolor_block: 4,
            node_capacity: 256,
        }
    }

    /// Rounded, smoothed caves used by the map editor.
    pub const fn editor() -> Self {
        Self {
            split: SplitHeuristic::IterativeLeaf,
            room_shape: RoomShape::Ellipse,
            corridors: CorridorStrategy::TreeWalk,
            smoothing_passes: 3,
            recolor_block: 6,
            node_capacity: 512,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::viewer()
    }
}
