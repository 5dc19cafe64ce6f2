//! Axis-aligned block cuboids and the footprint shrinker
//!
//! A sapling cluster found by [`find_connected`](super::region::find_connected)
//! is rarely a perfect rectangle. [`shrink_to_footprint`] turns it into a
//! solid rectangle by peeling one-cell rings off its bounding box.

use serde::Serialize;

use crate::core::types::BlockPos;
use crate::placement::schema::TreeSize;
use crate::spatial::region::PositionSet;

/// Box of blocks with inclusive bounds on every axis
///
/// Insetting can push `lower` past `upper`; such a cuboid has a non-positive
/// size and contains no cells. Only serialized; build one through `new`,
/// `point` or `bounding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cuboid {
    lower: BlockPos,
    upper: BlockPos,
}

impl Cuboid {
    /// Build a cuboid from any two opposite corners
    pub fn new(a: BlockPos, b: BlockPos) -> Self {
        Self {
            lower: a.min(&b),
            upper: a.max(&b),
        }
    }

    /// Single-cell cuboid
    pub fn point(pos: BlockPos) -> Self {
        Self {
            lower: pos,
            upper: pos,
        }
    }

    /// Tight bounding box of a set of positions
    pub fn bounding(points: &PositionSet) -> Option<Self> {
        let mut iter = points.iter();
        let first = *iter.next()?;
        let (lower, upper) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { lower, upper })
    }

    pub fn lower(&self) -> BlockPos {
        self.lower
    }

    pub fn upper(&self) -> BlockPos {
        self.upper
    }

    pub fn size_x(&self) -> i32 {
        self.upper.x - self.lower.x + 1
    }

    pub fn size_y(&self) -> i32 {
        self.upper.y - self.lower.y + 1
    }

    pub fn size_z(&self) -> i32 {
        self.upper.z - self.lower.z + 1
    }

    /// Footprint size as seen by placement definitions (X by Z)
    pub fn tree_size(&self) -> TreeSize {
        TreeSize::new(self.size_x().max(0) as u32, self.size_z().max(0) as u32)
    }

    /// Center cell, rounding toward the lower corner
    pub fn center(&self) -> BlockPos {
        BlockPos::new(
            self.lower.x + (self.upper.x - self.lower.x).div_euclid(2),
            self.lower.y + (self.upper.y - self.lower.y).div_euclid(2),
            self.lower.z + (self.upper.z - self.lower.z).div_euclid(2),
        )
    }

    /// Shrink by `amount` on both sides of the X and Z axes, Y untouched
    ///
    /// The result is not re-normalized.
    pub fn inset_horizontal(&self, amount: i32) -> Self {
        Self {
            lower: self.lower.offset(amount, 0, amount),
            upper: self.upper.offset(-amount, 0, -amount),
        }
    }

    /// Every cell inside the cuboid, X fastest then Z then Y
    pub fn cells(&self) -> impl Iterator<Item = BlockPos> + '_ {
        (self.lower.y..=self.upper.y).flat_map(move |y| {
            (self.lower.z..=self.upper.z).flat_map(move |z| {
                (self.lower.x..=self.upper.x).map(move |x| BlockPos::new(x, y, z))
            })
        })
    }
}

/// Largest rectangle obtainable by uniformly insetting the bounding box
///
/// Starts from the bounding box of `points` and removes a one-cell ring per
/// step until every cell of the box is in `points`. Never re-centres or tries
/// asymmetric insets, so a valid rectangle offset from the box centre can be
/// missed; existing configuration is tuned against exactly this behaviour.
/// Falls back to the single cell at `origin`.
pub fn shrink_to_footprint(points: &PositionSet, origin: BlockPos) -> Cuboid {
    let Some(mut cuboid) = Cuboid::bounding(points) else {
        return Cuboid::point(origin);
    };

    while cuboid.size_x().min(cuboid.size_z()) > 0 {
        if cuboid.cells().all(|cell| points.contains(&cell)) {
            return cuboid;
        }
        cuboid = cuboid.inset_horizontal(1);
    }

    Cuboid::point(origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(cells: &[(i32, i32)]) -> PositionSet {
        cells.iter().map(|&(x, z)| BlockPos::new(x, 0, z)).collect()
    }

    fn grid(size: i32) -> PositionSet {
        (0..size)
            .flat_map(|x| (0..size).map(move |z| BlockPos::new(x, 0, z)))
            .collect()
    }

    #[test]
    fn test_new_normalizes_corners() {
        let c = Cuboid::new(BlockPos::new(3, 1, -2), BlockPos::new(0, 4, 5));
        assert_eq!(c.lower(), BlockPos::new(0, 1, -2));
        assert_eq!(c.upper(), BlockPos::new(3, 4, 5));
        assert_eq!((c.size_x(), c.size_y(), c.size_z()), (4, 4, 8));
    }

    #[test]
    fn test_serializes_normalized_corners() {
        let c = Cuboid::new(BlockPos::new(2, 64, 2), BlockPos::new(1, 64, 1));
        let json = serde_json::to_value(c).unwrap();
        assert_eq!(json["lower"], serde_json::json!({ "x": 1, "y": 64, "z": 1 }));
        assert_eq!(json["upper"], serde_json::json!({ "x": 2, "y": 64, "z": 2 }));
    }

    #[test]
    fn test_point_has_unit_size() {
        let c = Cuboid::point(BlockPos::new(7, 64, 7));
        assert_eq!(c.tree_size(), TreeSize::new(1, 1));
        assert_eq!(c.center(), BlockPos::new(7, 64, 7));
        assert_eq!(c.cells().count(), 1);
    }

    #[test]
    fn test_inset_horizontal_leaves_y() {
        let c = Cuboid::new(BlockPos::new(0, 0, 0), BlockPos::new(4, 3, 4));
        let inset = c.inset_horizontal(1);
        assert_eq!(inset.lower(), BlockPos::new(1, 0, 1));
        assert_eq!(inset.upper(), BlockPos::new(3, 3, 3));

        let collapsed = Cuboid::new(BlockPos::new(0, 0, 0), BlockPos::new(1, 0, 1)).inset_horizontal(1);
        assert_eq!(collapsed.size_x(), 0);
        assert_eq!(collapsed.cells().count(), 0);
    }

    #[test]
    fn test_center_rounds_down() {
        let c = Cuboid::new(BlockPos::new(0, 0, 0), BlockPos::new(1, 0, 1));
        assert_eq!(c.center(), BlockPos::new(0, 0, 0));
        let c = Cuboid::new(BlockPos::new(-3, 0, -3), BlockPos::new(-1, 0, -1));
        assert_eq!(c.center(), BlockPos::new(-2, 0, -2));
    }

    #[test]
    fn test_full_square_is_kept() {
        let points = grid(2);
        let footprint = shrink_to_footprint(&points, BlockPos::new(0, 0, 0));
        assert_eq!(footprint, Cuboid::new(BlockPos::new(0, 0, 0), BlockPos::new(1, 0, 1)));
        assert_eq!(footprint.tree_size(), TreeSize::new(2, 2));
    }

    #[test]
    fn test_l_shape_falls_back_to_origin() {
        let points = set(&[(0, 0), (1, 0), (0, 1)]);
        let footprint = shrink_to_footprint(&points, BlockPos::new(0, 0, 0));
        assert_eq!(footprint, Cuboid::point(BlockPos::new(0, 0, 0)));
    }

    #[test]
    fn test_missing_corner_insets_to_center() {
        let mut points = grid(3);
        points.remove(&BlockPos::new(2, 0, 2));
        let footprint = shrink_to_footprint(&points, BlockPos::new(0, 0, 0));
        assert_eq!(footprint, Cuboid::point(BlockPos::new(1, 0, 1)));
    }

    #[test]
    fn test_plus_shape_keeps_center() {
        let points = set(&[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]);
        let footprint = shrink_to_footprint(&points, BlockPos::new(1, 0, 0));
        assert_eq!(footprint, Cuboid::point(BlockPos::new(1, 0, 1)));
    }

    #[test]
    fn test_empty_set_uses_origin() {
        let footprint = shrink_to_footprint(&PositionSet::default(), BlockPos::new(5, 70, 5));
        assert_eq!(footprint, Cuboid::point(BlockPos::new(5, 70, 5)));
    }

    #[test]
    fn test_offset_rectangle_is_missed() {
        // A full 2x2 sits in the corner of a 4x4 bounding box; the uniform
        // inset only ever tests the centred 2x2, which is incomplete.
        let mut points = set(&[(0, 0), (1, 0), (0, 1), (1, 1)]);
        points.insert(BlockPos::new(3, 0, 3));
        points.insert(BlockPos::new(2, 0, 1));
        points.insert(BlockPos::new(3, 0, 1));
        points.insert(BlockPos::new(3, 0, 2));
        let footprint = shrink_to_footprint(&points, BlockPos::new(0, 0, 0));
        assert_eq!(footprint, Cuboid::point(BlockPos::new(0, 0, 0)));
    }

    #[test]
    fn test_four_by_four_with_noisy_rim() {
        let mut points = grid(4);
        points.remove(&BlockPos::new(0, 0, 3));
        let footprint = shrink_to_footprint(&points, BlockPos::new(0, 0, 0));
        assert_eq!(footprint, Cuboid::new(BlockPos::new(1, 0, 1), BlockPos::new(2, 0, 2)));
    }
}
