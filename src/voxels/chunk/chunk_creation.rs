//! # Chunk Creation Module
//!
//! A builder that receives the buried corners of every cell in generation
//! order (`x` outermost, then `y`, then `z`) and assembles the chunk from them:
//! voxels, the stitched mesh, and the marker spawns decided along the way.
//!
//! Keeping the cursor inside the builder means the caller only has to walk the
//! cells in the right order; the builder always knows which cell it is filling.

use cgmath::{Point3, Vector3};

use crate::meshing::ChunkMesh;
use crate::voxels::markers::MarkerSpawn;
use crate::voxels::noise_field::HeightSamples;
use crate::voxels::voxel::corner::CornerSet;
use crate::voxels::voxel::Voxel;

use super::{Chunk, ChunkIndex, ChunkParams};

/// Builds a [`Chunk`] one cell at a time.
pub struct ChunkCreationIterator {
    /// Grid index of the chunk being created
    index: ChunkIndex,
    /// World position of the chunk origin
    origin: Point3<f32>,
    /// Width and depth in cells
    size: usize,
    /// Height in cells
    height: usize,
    /// Voxels pushed so far, in generation order
    voxels: Vec<Voxel>,
    /// Mesh stitched from the pushed voxels
    mesh: ChunkMesh,
    /// Markers decided so far
    marker_spawns: Vec<MarkerSpawn>,
    /// Draws the marker rolls; seeded per chunk
    marker_rng: fastrand::Rng,
    marker_chance: f32,
    marker_kind: String,
    /// Current X position within the chunk
    local_x: usize,
    /// Current Y position within the chunk
    local_y: usize,
    /// Current Z position within the chunk
    local_z: usize,
}

impl ChunkCreationIterator {
    /// Creates a new `ChunkCreationIterator` for building a chunk.
    ///
    /// # Arguments
    /// * `index` - Grid index of the chunk
    /// * `origin` - World position of the chunk origin
    /// * `params` - Chunk dimensions and marker settings
    /// * `seed` - Generation seed; with `index`, it seeds the marker rolls
    ///
    /// # Returns
    /// A new `ChunkCreationIterator` positioned at cell `(0, 0, 0)`
    pub fn new(index: ChunkIndex, origin: Point3<f32>, params: &ChunkParams, seed: f32) -> Self {
        ChunkCreationIterator {
            index,
            origin,
            size: params.size,
            height: params.height,
            voxels: Vec::with_capacity(params.size * params.height * params.size),
            mesh: ChunkMesh::new(),
            marker_spawns: Vec::new(),
            marker_rng: fastrand::Rng::with_seed(marker_seed(seed, index)),
            marker_chance: params.marker_chance,
            marker_kind: params.marker_kind.clone(),
            local_x: 0,
            local_y: 0,
            local_z: 0,
        }
    }

    /// The cell the next push fills.
    pub fn current_cell(&self) -> Point3<usize> {
        Point3::new(self.local_x, self.local_y, self.local_z)
    }

    /// Whether every cell has been pushed.
    pub fn is_complete(&self) -> bool {
        self.voxels.len() == self.size * self.height * self.size
    }

    /// Adds the voxel for the current cell and advances to the next one.
    ///
    /// - Rolls for a marker if the cell is flat-topped
    /// - Appends the voxel's triangles to the mesh, translated to the cell
    ///
    /// # Arguments
    /// * `buried_corners` - The buried corners of the current cell
    pub fn push_buried_corners(&mut self, buried_corners: CornerSet) {
        debug_assert!(!self.is_complete(), "pushed past the end of the chunk");

        let cell = self.current_cell();
        let local = Vector3::new(cell.x as f32, cell.y as f32, cell.z as f32);
        let world_position = self.origin + local;

        // Only flat tops roll, so the draw sequence depends on the terrain alone.
        let marker_spawned = buried_corners == CornerSet::FLAT_TOP
            && self.marker_rng.f32() < self.marker_chance;

        let voxel = Voxel::new(buried_corners, world_position, marker_spawned);
        if marker_spawned {
            self.marker_spawns.push(MarkerSpawn {
                position: voxel.marker_position(),
                kind: self.marker_kind.clone(),
                chunk: (self.index.x, self.index.z),
                cell: (cell.x, cell.y, cell.z),
            });
        }

        self.mesh.push_triangles(voxel.vertices(), local);
        self.voxels.push(voxel);

        // Move to the next cell
        self.local_z += 1;
        if self.local_z == self.size {
            self.local_z = 0;
            self.local_y += 1;
            if self.local_y == self.height {
                self.local_y = 0;
                self.local_x += 1;
            }
        }
    }

    /// Finalizes the chunk.
    ///
    /// Vertex normals are computed here, once the whole mesh is stitched.
    ///
    /// # Arguments
    /// * `heights` - The height samples the chunk was classified with
    pub fn return_chunk(mut self, heights: HeightSamples) -> Chunk {
        debug_assert!(self.is_complete(), "chunk returned before every cell was pushed");
        self.mesh.recalculate_normals();

        Chunk {
            index: self.index,
            origin: self.origin,
            size: self.size,
            height: self.height,
            voxels: self.voxels,
            heights,
            mesh: self.mesh,
            marker_spawns: self.marker_spawns,
        }
    }
}

/// Seeds the marker rolls of one chunk, independent of which worker builds it.
fn marker_seed(seed: f32, index: ChunkIndex) -> u64 {
    let seed_bits = (seed.to_bits() as u64).rotate_left(32);
    seed_bits
        ^ (index.x as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (index.z as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use cgmath::EuclideanSpace;

    fn params(size: usize, height: usize, marker_chance: f32) -> ChunkParams {
        ChunkParams {
            size,
            height,
            marker_chance,
            ..ChunkParams::from_config(&GenerationConfig::default())
        }
    }

    #[test]
    fn cursor_walks_x_then_y_then_z() {
        let index = ChunkIndex { x: 0, z: 0 };
        let mut cci = ChunkCreationIterator::new(index, Point3::origin(), &params(2, 3, 0.0), 1.0);

        let mut cells = Vec::new();
        while !cci.is_complete() {
            cells.push(cci.current_cell());
            cci.push_buried_corners(CornerSet::empty());
        }

        assert_eq!(cells.len(), 12);
        assert_eq!(cells[0], Point3::new(0, 0, 0));
        assert_eq!(cells[1], Point3::new(0, 0, 1));
        assert_eq!(cells[2], Point3::new(0, 1, 0));
        assert_eq!(cells[6], Point3::new(1, 0, 0));
        assert_eq!(cells[11], Point3::new(1, 2, 1));
    }

    #[test]
    fn flat_tops_spawn_markers_at_full_chance() {
        let index = ChunkIndex { x: 1, z: 2 };
        let origin = index.origin(2, 0.0);
        let mut cci = ChunkCreationIterator::new(index, origin, &params(2, 1, 1.0), 1.0);

        cci.push_buried_corners(CornerSet::FLAT_TOP);
        cci.push_buried_corners(CornerSet::FULL);
        cci.push_buried_corners(CornerSet::FLAT_TOP);
        cci.push_buried_corners(CornerSet::empty());
        let chunk = cci.return_chunk(HeightSamples::default());

        let spawns = chunk.marker_spawns();
        assert_eq!(spawns.len(), 2);
        assert_eq!(spawns[0].position, Point3::new(2.5, 1.0, 4.5));
        assert_eq!(spawns[0].cell, (0, 0, 0));
        assert_eq!(spawns[1].position, Point3::new(3.5, 1.0, 4.5));
        assert_eq!(spawns[1].chunk, (1, 2));
        assert_eq!(spawns[1].kind, "crop");
    }

    #[test]
    fn mesh_follows_cell_order() {
        let index = ChunkIndex { x: 0, z: 0 };
        let mut cci = ChunkCreationIterator::new(index, Point3::origin(), &params(1, 2, 0.0), 1.0);
        cci.push_buried_corners(CornerSet::FULL);
        cci.push_buried_corners(CornerSet::FLAT_TOP);
        let chunk = cci.return_chunk(HeightSamples::default());

        assert_eq!(chunk.mesh().triangle_count(), 2);
        assert!(chunk.mesh().positions().iter().all(|p| p[1] == 2.0));
    }

    #[test]
    fn marker_seed_differs_per_chunk() {
        let a = marker_seed(12.5, ChunkIndex { x: 0, z: 1 });
        let b = marker_seed(12.5, ChunkIndex { x: 1, z: 0 });
        let c = marker_seed(12.75, ChunkIndex { x: 0, z: 1 });
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
