//! # Corner Module
//!
//! The eight corners of a voxel and the bit set used to record which of them
//! are buried.
//!
//! ```text
//!     5----6
//!     |\   |\
//!     | 4----7
//!     1-|--2 |
//!      \|   \|
//!       0----3
//! ```
//!
//! Corner 0 is the voxel origin and y is vertical.

use cgmath::{Point3, Vector3};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// One corner of the unit cube spanned by a voxel.
///
/// The discriminant is the corner's bit position in an occupancy code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum Corner {
    /// `(0, 0, 0)`, the voxel origin.
    C0 = 0,
    /// `(0, 0, 1)`
    C1 = 1,
    /// `(1, 0, 1)`
    C2 = 2,
    /// `(1, 0, 0)`
    C3 = 3,
    /// `(0, 1, 0)`
    C4 = 4,
    /// `(0, 1, 1)`
    C5 = 5,
    /// `(1, 1, 1)`
    C6 = 6,
    /// `(1, 1, 0)`
    C7 = 7,
}

/// Integer `{ x, y, z }` offsets of each corner from the voxel origin, indexed by corner.
const CORNER_OFFSETS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 0, 0],
    [0, 1, 0],
    [0, 1, 1],
    [1, 1, 1],
    [1, 1, 0],
];

impl Corner {
    /// All corners in index order.
    pub const ALL: [Corner; 8] = [
        Corner::C0,
        Corner::C1,
        Corner::C2,
        Corner::C3,
        Corner::C4,
        Corner::C5,
        Corner::C6,
        Corner::C7,
    ];

    /// Converts a corner index (0..8) to a `Corner`.
    ///
    /// # Returns
    /// `None` for indices of 8 and above.
    pub fn from_index(index: u8) -> Option<Self> {
        FromPrimitive::from_u8(index)
    }

    /// The corner's index, which is also its bit position in an occupancy code.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Integer offset from the voxel origin.
    pub fn offset(self) -> Vector3<usize> {
        let [x, y, z] = CORNER_OFFSETS[self as usize];
        Vector3::new(x, y, z)
    }

    /// Position of the corner in local (0..1) cube space.
    pub fn local_point(self) -> Point3<f32> {
        let [x, y, z] = CORNER_OFFSETS[self as usize];
        Point3::new(x as f32, y as f32, z as f32)
    }
}

/// A set of voxel corners, stored as the voxel's 8-bit occupancy code.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CornerSet(u8);

impl CornerSet {
    /// The four bottom corners: a voxel with exactly these buried has a flat top surface.
    pub const FLAT_TOP: CornerSet = CornerSet(0b0000_1111);
    /// Every corner buried.
    pub const FULL: CornerSet = CornerSet(0b1111_1111);

    /// An empty set (an air voxel).
    pub fn empty() -> Self {
        CornerSet(0)
    }

    /// Decodes an occupancy code back into its corner set.
    pub fn from_code(code: u8) -> Self {
        CornerSet(code)
    }

    /// The occupancy code: the sum of `2^index` over every corner in the set.
    pub fn code(self) -> u8 {
        self.0
    }

    /// Adds a corner to the set.
    pub fn insert(&mut self, corner: Corner) {
        self.0 |= 1 << corner.index();
    }

    /// Whether the corner is part of the set.
    pub fn contains(self, corner: Corner) -> bool {
        self.0 & (1 << corner.index()) != 0
    }

    /// Number of corners in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether no corner is in the set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the corners of the set in index order.
    pub fn iter(self) -> impl Iterator<Item = Corner> {
        (0..8)
            .filter(move |index| self.0 & (1 << index) != 0)
            .filter_map(Corner::from_index)
    }
}

impl FromIterator<Corner> for CornerSet {
    fn from_iter<I: IntoIterator<Item = Corner>>(iter: I) -> Self {
        let mut set = CornerSet::empty();
        for corner in iter {
            set.insert(corner);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_round_trips_through_its_corners() {
        for code in 0..=u8::MAX {
            let corners: Vec<Corner> = CornerSet::from_code(code).iter().collect();
            let rebuilt: CornerSet = corners.iter().copied().collect();
            assert_eq!(rebuilt.code(), code);

            let summed: u32 = corners.iter().map(|corner| 1u32 << corner.index()).sum();
            assert_eq!(summed, code as u32);
        }
    }

    #[test]
    fn corner_zero_is_least_significant_bit() {
        let mut set = CornerSet::empty();
        set.insert(Corner::C0);
        assert_eq!(set.code(), 1);
        set.insert(Corner::C7);
        assert_eq!(set.code(), 129);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn from_index_rejects_out_of_range() {
        assert_eq!(Corner::from_index(6), Some(Corner::C6));
        assert_eq!(Corner::from_index(8), None);
    }

    #[test]
    fn flat_top_is_the_bottom_face() {
        let bottom: CornerSet = Corner::ALL
            .into_iter()
            .filter(|corner| corner.offset().y == 0)
            .collect();
        assert_eq!(bottom, CornerSet::FLAT_TOP);
    }

    #[test]
    fn local_points_match_offsets() {
        assert_eq!(Corner::C2.local_point(), Point3::new(1.0, 0.0, 1.0));
        assert_eq!(Corner::C5.offset(), Vector3::new(0, 1, 1));
    }
}
