//! # Voxel Module
//!
//! A voxel is one grid cell of a chunk. It records which of its corners are
//! buried and carries the surface triangles the triangulation table assigns to
//! that configuration.

use cgmath::{Point3, Vector3};

use super::corner_table;
use corner::CornerSet;

pub mod corner;

/// Offset from a voxel's origin to where a marker is placed on its top face.
pub const MARKER_OFFSET: Vector3<f32> = Vector3 {
    x: 0.5,
    y: 1.0,
    z: 0.5,
};

/// Occupancy classification of a voxel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VoxelType {
    /// No corner is buried.
    AIR,
    /// At least one corner is buried.
    GROUND,
}

/// A single classified grid cell.
///
/// Voxels are immutable once built; regenerating terrain replaces whole chunks.
#[derive(Clone, Debug, PartialEq)]
pub struct Voxel {
    /// Triangle vertices in local (0..1) cube space, three per triangle.
    vertices: Vec<Point3<f32>>,
    voxel_type: VoxelType,
    buried_corners: CornerSet,
    /// World position of the voxel's origin (corner 0).
    world_position: Point3<f32>,
    marker_spawned: bool,
}

impl Voxel {
    /// Builds a voxel from its buried corners.
    ///
    /// The vertices are copied from the triangulation table entry for the
    /// corners' occupancy code.
    ///
    /// # Arguments
    /// * `buried_corners` - Corners classified as buried
    /// * `world_position` - World position of the voxel origin
    /// * `marker_spawned` - Whether a marker was placed on this voxel
    pub fn new(
        buried_corners: CornerSet,
        world_position: Point3<f32>,
        marker_spawned: bool,
    ) -> Self {
        let voxel_type = if buried_corners.is_empty() {
            VoxelType::AIR
        } else {
            VoxelType::GROUND
        };

        Voxel {
            vertices: corner_table::local_points(buried_corners.code()).collect(),
            voxel_type,
            buried_corners,
            world_position,
            marker_spawned,
        }
    }

    /// Local triangle vertices, three per triangle.
    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// Number of triangles this voxel contributes to its chunk's mesh.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// AIR or GROUND.
    pub fn voxel_type(&self) -> VoxelType {
        self.voxel_type
    }

    /// The buried corners.
    pub fn buried_corners(&self) -> CornerSet {
        self.buried_corners
    }

    /// The occupancy code used for the table lookup.
    pub fn occupancy_code(&self) -> u8 {
        self.buried_corners.code()
    }

    /// World position of the voxel origin.
    pub fn world_position(&self) -> Point3<f32> {
        self.world_position
    }

    /// Whether exactly the four bottom corners are buried, leaving a flat top surface.
    pub fn is_flat_top(&self) -> bool {
        self.buried_corners == CornerSet::FLAT_TOP
    }

    /// Where a marker sits when spawned on this voxel: slightly above the cell centre.
    pub fn marker_position(&self) -> Point3<f32> {
        self.world_position + MARKER_OFFSET
    }

    /// Whether a marker was spawned on this voxel during generation.
    pub fn marker_spawned(&self) -> bool {
        self.marker_spawned
    }
}
