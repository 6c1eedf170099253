//! Small value types shared across the map, generator, and editor modules.

/// Integer grid coordinate. Field order keeps the derived `Ord` row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }
}

#[cfg(test)]
mod tests {
    use super::Pos;

    #[test]
    fn ordering_is_row_major() {
        assert!(Pos::new(5, 0) < Pos::new(0, 1));
        assert!(Pos::new(1, 2) < Pos::new(2, 2));
    }
}
