//! Binary spatial partition of the map interior.

use tracing::warn;

use super::config::SplitHeuristic;
use super::seed::MapRng;

/// Smallest side that the iterative heuristic will still split.
const MIN_SPLITTABLE: usize = 6;
/// Neither child of an iterative split may be thinner than this.
const SPLIT_MARGIN: usize = 3;
/// Recursive splitting needs both sides strictly above twice this.
const MIN_ROOM: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Region {
    pub(super) x: usize,
    pub(super) y: usize,
    pub(super) width: usize,
    pub(super) height: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    /// Cut with a vertical line, producing left and right children.
    Vertical,
    /// Cut with a horizontal line, producing top and bottom children.
    Horizontal,
}

impl Region {
    pub(super) fn center(self) -> (usize, usize) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    fn split(self, axis: Axis, offset: usize) -> [Region; 2] {
        match axis {
            Axis::Vertical => [
                Region { width: offset, ..self },
                Region { x: self.x + offset, width: self.width - offset, ..self },
            ],
            Axis::Horizontal => [
                Region { height: offset, ..self },
                Region { y: self.y + offset, height: self.height - offset, ..self },
            ],
        }
    }
}

#[derive(Clone, Debug)]
pub(super) struct PartitionNode {
    pub(super) region: Region,
    pub(super) children: Option<[usize; 2]>,
}

impl PartitionNode {
    pub(super) fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Arena of partition nodes; index 0 is the root.
#[derive(Clone, Debug)]
pub(super) struct PartitionTree {
    pub(super) nodes: Vec<PartitionNode>,
    /// Set when node capacity cut partitioning short.
    pub(super) truncated: bool,
}

impl PartitionTree {
    pub(super) fn build(
        root: Region,
        heuristic: SplitHeuristic,
        complexity: u32,
        capacity: usize,
        rng: &mut MapRng,
    ) -> Self {
        let mut tree = Self {
            nodes: vec![PartitionNode { region: root, children: None }],
            truncated: false,
        };
        match heuristic {
            SplitHeuristic::IterativeLeaf => tree.split_iterative(complexity, capacity, rng),
            SplitHeuristic::RecursivePass => tree.split_recursive(capacity, rng),
        }
        if tree.truncated {
            warn!(capacity, nodes = tree.nodes.len(), "partition node capacity reached");
        }
        tree
    }

    pub(super) fn leaves(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().enumerate().filter(|(_, node)| node.is_leaf()).map(|(index, _)| index)
    }

    /// Index of the first leaf reached by always descending into the first child.
    pub(super) fn first_leaf_under(&self, mut index: usize) -> usize {
        while let Some([first, _]) = self.nodes[index].children {
            index = first;
        }
        index
    }

    fn split_iterative(&mut self, complexity: u32, capacity: usize, rng: &mut MapRng) {
        for attempt in 0..complexity as usize {
            let mut selected = None;
            for (index, node) in self.nodes.iter().enumerate() {
                if node.is_leaf() && rng.below(attempt + 2) == 0 {
                    selected = Some(index);
                }
            }
            let Some(index) = selected else {
                break;
            };

            let region = self.nodes[index].region;
            if region.width < MIN_SPLITTABLE || region.height < MIN_SPLITTABLE {
                continue;
            }
            let axis =
                if region.height > region.width { Axis::Horizontal } else { Axis::Vertical };
            let length = match axis {
                Axis::Vertical => region.width,
                Axis::Horizontal => region.height,
            };
            let max_offset = length - SPLIT_MARGIN;
            if max_offset <= SPLIT_MARGIN {
                continue;
            }
            let offset = rng.inclusive(SPLIT_MARGIN, max_offset);
            if !self.try_split(index, axis, offset, capacity) {
                break;
            }
        }
    }

    fn split_recursive(&mut self, capacity: usize, rng: &mut MapRng) {
        let mut index = 0;
        while index < self.nodes.len() {
            let region = self.nodes[index].region;
            if region.width > MIN_ROOM * 2 && region.height > MIN_ROOM * 2 {
                let (axis, length) = if region.width > region.height {
                    (Axis::Vertical, region.width)
                } else {
                    (Axis::Horizontal, region.height)
                };
                let offset = length / 2 + rng.below(length / 4 + 1) - length / 8;
                if !self.try_split(index, axis, offset, capacity) {
                    break;
                }
            }
            index += 1;
        }
    }

    /// Returns `false` when the split would exceed `capacity`.
    fn try_split(&mut self, index: usize, axis: Axis, offset: usize, capacity: usize) -> bool {
        if self.nodes.len() + 2 > capacity {
            self.truncated = true;
            return false;
        }
        let [first, second] = self.nodes[index].region.split(axis, offset);
        let first_index = self.nodes.len();
        self.nodes.push(PartitionNode { region: first, children: None });
        self.nodes.push(PartitionNode { region: second, children: None });
        self.nodes[index].children = Some([first_index, first_index + 1]);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(width: usize, height: usize) -> Region {
        Region { x: 1, y: 1, width, height }
    }

    fn assert_leaves_tile_root(tree: &PartitionTree, root: Region) {
        let area: usize = tree
            .leaves()
            .map(|index| {
                let region = tree.nodes[index].region;
                assert!(region.x >= root.x && region.y >= root.y);
                assert!(region.x + region.width <= root.x + root.width);
                assert!(region.y + region.height <= root.y + root.height);
                region.width * region.height
            })
            .sum();
        assert_eq!(area, root.width * root.height, "leaves must tile the root exactly");
    }

    #[test]
    fn recursive_pass_splits_until_regions_are_small() {
        let mut rng = MapRng::from_seed(7);
        let region = root(46, 30);
        let tree = PartitionTree::build(region, SplitHeuristic::RecursivePass, 0, 256, &mut rng);

        assert!(tree.leaves().count() > 1);
        assert!(!tree.truncated);
        for index in tree.leaves() {
            let leaf = tree.nodes[index].region;
            assert!(leaf.width <= MIN_ROOM * 2 || leaf.height <= MIN_ROOM * 2, "{leaf:?}");
        }
        assert_leaves_tile_root(&tree, region);
    }

    #[test]
    fn iterative_children_respect_split_margin() {
        let mut rng = MapRng::from_seed(42);
        let region = root(62, 62);
        let tree = PartitionTree::build(region, SplitHeuristic::IterativeLeaf, 40, 512, &mut rng);

        for index in tree.leaves() {
            let leaf = tree.nodes[index].region;
            assert!(leaf.width >= SPLIT_MARGIN && leaf.height >= SPLIT_MARGIN, "{leaf:?}");
        }
        assert_leaves_tile_root(&tree, region);
    }

    #[test]
    fn capacity_truncates_without_losing_coverage() {
        let mut rng = MapRng::from_seed(3);
        let region = root(126, 126);
        let tree = PartitionTree::build(region, SplitHeuristic::RecursivePass, 0, 5, &mut rng);

        assert!(tree.truncated);
        assert!(tree.nodes.len() <= 5);
        assert_leaves_tile_root(&tree, region);
    }

    #[test]
    fn first_leaf_descends_through_first_children() {
        let mut rng = MapRng::from_seed(11);
        let tree =
            PartitionTree::build(root(40, 40), SplitHeuristic::RecursivePass, 0, 256, &mut rng);
        let leaf = tree.first_leaf_under(0);
        assert!(tree.nodes[leaf].is_leaf());
        assert_eq!(tree.nodes[leaf].region.x, 1);
        assert_eq!(tree.nodes[leaf].region.y, 1);
    }
}
