//! # Chunk Module
//!
//! A chunk is a `size × height × size` block of voxels plus the triangle mesh
//! stitched from them. Chunks are generated in one synchronous pass and are
//! never edited afterwards; regenerating terrain replaces them wholesale.
//!
//! ## Generation
//!
//! 1. Sample the height field over the `(size + 1)²` corner columns, and the
//!    density field too when a cave mode is active.
//! 2. Classify the corners of every cell with the selected
//!    [`BurialPredicate`](burial::BurialPredicate), walking `x → y → z`.
//! 3. Hand each corner set to the [`ChunkCreationIterator`], which builds the
//!    voxel, rolls for a marker and stitches the voxel's triangles into the mesh.
//! 4. Recompute the vertex normals.

use cgmath::{EuclideanSpace, Point3, Vector3};
use log::{debug, info};
use web_time::Instant;

use crate::config::{BurialMode, GenerationConfig};
use crate::error::{TerrainError, TerrainResult};
use crate::meshing::ChunkMesh;

use self::burial::{Burial, BurialPredicate, BurialSamples};
use self::chunk_creation::ChunkCreationIterator;
use self::chunk_iteration::ChunkVoxelIterator;

use super::heightmap::HeightMap;
use super::markers::MarkerSpawn;
use super::noise_field::{HeightSamples, NoiseField};
use super::voxel::{Voxel, VoxelType};

pub mod burial;
mod chunk_creation;
pub mod chunk_iteration;

/// Position of a chunk in the grid, in chunks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkIndex {
    /// Column along x.
    pub x: usize,
    /// Row along z.
    pub z: usize,
}

impl ChunkIndex {
    /// Creates a chunk index.
    pub fn new(x: usize, z: usize) -> Self {
        ChunkIndex { x, z }
    }

    /// World position of this chunk's origin: `(x * size, base_y, z * size)`.
    pub fn origin(self, size: usize, base_y: f32) -> Point3<f32> {
        Point3::origin() + Vector3::new((self.x * size) as f32, base_y, (self.z * size) as f32)
    }
}

/// The part of the generation config a single chunk needs.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkParams {
    /// Width and depth in voxels.
    pub size: usize,
    /// Height in voxels.
    pub height: usize,
    /// Added to every height sample.
    pub surface_height: f32,
    /// World y of the chunk origin.
    pub base_y: f32,
    /// Corner classification mode.
    pub burial_mode: BurialMode,
    /// Density at or above which a corner is buried in cave modes.
    pub cave_threshold: f32,
    /// Probability that a flat-top voxel spawns a marker.
    pub marker_chance: f32,
    /// Kind of spawned markers.
    pub marker_kind: String,
}

impl ChunkParams {
    /// Extracts the chunk parameters of a generation config.
    pub fn from_config(config: &GenerationConfig) -> Self {
        ChunkParams {
            size: config.chunk_size,
            height: config.chunk_height,
            surface_height: config.surface_height,
            base_y: config.base_y,
            burial_mode: config.burial_mode,
            cave_threshold: config.cave_threshold,
            marker_chance: config.marker_chance,
            marker_kind: config.marker_kind.clone(),
        }
    }
}

/// A generated block of terrain.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// Grid index of the chunk.
    index: ChunkIndex,
    /// World position of the chunk origin.
    origin: Point3<f32>,
    size: usize,
    height: usize,
    /// Voxels in generation order, `voxels[(x * height + y) * size + z]`.
    voxels: Vec<Voxel>,
    /// Height samples over the `(size + 1)²` corner columns.
    heights: HeightSamples,
    mesh: ChunkMesh,
    /// Markers decided during generation, in cell order.
    marker_spawns: Vec<MarkerSpawn>,
}

impl Chunk {
    /// Generates a chunk.
    ///
    /// # Arguments
    /// * `index` - Grid index; the chunk origin is `(x * size, base_y, z * size)`
    /// * `params` - Dimensions, burial mode and marker settings
    /// * `noise` - The noise field of this generation run
    /// * `tile` - The chunk's `(size + 1)²` heightmap tile
    ///
    /// # Returns
    /// The chunk, or a [`TerrainError::HeightmapSize`] if the tile has the wrong size.
    pub fn generate(
        index: ChunkIndex,
        params: &ChunkParams,
        noise: &NoiseField,
        tile: &HeightMap,
    ) -> TerrainResult<Chunk> {
        let corners = params.size + 1;
        if tile.width() != corners || tile.height() != corners {
            return Err(TerrainError::HeightmapSize {
                expected_width: corners,
                expected_height: corners,
                found_width: tile.width(),
                found_height: tile.height(),
            });
        }

        let start = Instant::now();

        let origin = index.origin(params.size, params.base_y);
        let offset = origin.to_vec();

        let heights = noise.height_samples(corners, offset, tile);
        let samples =
            BurialSamples::sample(params.burial_mode, noise, corners, params.height + 1, offset);
        let burial = Burial::select(
            &samples,
            &heights,
            params.surface_height,
            params.cave_threshold,
        );

        let mut cci = ChunkCreationIterator::new(index, origin, params, noise.seed());
        for x in 0..params.size {
            for y in 0..params.height {
                for z in 0..params.size {
                    cci.push_buried_corners(burial.buried_corners(Point3::new(x, y, z)));
                }
            }
        }
        let chunk = cci.return_chunk(heights);

        debug!(
            "Chunk ({}, {}): {} triangles, {} markers",
            index.x,
            index.z,
            chunk.mesh.triangle_count(),
            chunk.marker_spawns.len()
        );
        info!(
            "Chunk ({}, {}) generated in {} ms",
            index.x,
            index.z,
            start.elapsed().as_millis()
        );

        Ok(chunk)
    }

    /// Grid index of the chunk.
    pub fn index(&self) -> ChunkIndex {
        self.index
    }

    /// World position of the chunk origin.
    pub fn origin(&self) -> Point3<f32> {
        self.origin
    }

    /// Width and depth in voxels.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Height in voxels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The voxel at cell `(x, y, z)`.
    ///
    /// # Returns
    /// The voxel, or a [`TerrainError::VoxelOutOfBounds`] outside the chunk.
    pub fn voxel(&self, x: usize, y: usize, z: usize) -> TerrainResult<&Voxel> {
        if x >= self.size || y >= self.height || z >= self.size {
            return Err(TerrainError::VoxelOutOfBounds {
                x,
                y,
                z,
                size: self.size,
                height: self.height,
            });
        }
        Ok(&self.voxels[(x * self.height + y) * self.size + z])
    }

    /// Looks up a voxel like [`Chunk::voxel`] and logs its contents.
    pub fn inspect_voxel(&self, x: usize, y: usize, z: usize) -> TerrainResult<&Voxel> {
        let voxel = self.voxel(x, y, z)?;
        info!(
            "Voxel ({x}, {y}, {z}) of chunk ({}, {}): code {} {:?} at {:?}, {} triangles",
            self.index.x,
            self.index.z,
            voxel.occupancy_code(),
            voxel.voxel_type(),
            voxel.world_position(),
            voxel.triangle_count()
        );
        for (i, vertex) in voxel.vertices().iter().enumerate() {
            info!("  vertex {i}: ({}, {}, {})", vertex.x, vertex.y, vertex.z);
        }
        Ok(voxel)
    }

    /// Whether the voxel at `(x, y, z)` is ground.
    pub fn is_ground(&self, x: usize, y: usize, z: usize) -> TerrainResult<bool> {
        Ok(self.voxel(x, y, z)?.voxel_type() == VoxelType::GROUND)
    }

    /// Iterates every voxel with its cell coordinates.
    pub fn voxels(&self) -> ChunkVoxelIterator<'_> {
        ChunkVoxelIterator::new(self)
    }

    /// The chunk mesh, in chunk-local coordinates.
    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// The height samples the chunk was classified with.
    pub fn heights(&self) -> &HeightSamples {
        &self.heights
    }

    /// Markers decided during generation.
    pub fn marker_spawns(&self) -> &[MarkerSpawn] {
        &self.marker_spawns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::corner_table;
    use crate::voxels::voxel::corner::CornerSet;

    fn flat_params() -> ChunkParams {
        ChunkParams {
            size: 4,
            height: 4,
            surface_height: 2.0,
            base_y: 0.0,
            burial_mode: BurialMode::Surface,
            cave_threshold: 0.5,
            marker_chance: 0.0,
            marker_kind: "crop".into(),
        }
    }

    fn flat_noise() -> NoiseField {
        NoiseField::new(0.0, 0.12, 0.0, 8.0)
    }

    fn flat_chunk(params: &ChunkParams) -> Chunk {
        let tile = HeightMap::uniform(params.size + 1, params.size + 1, 1.0);
        Chunk::generate(ChunkIndex::new(0, 0), params, &flat_noise(), &tile).unwrap()
    }

    #[test]
    fn flat_terrain_layers() {
        let chunk = flat_chunk(&flat_params());

        for x in 0..4 {
            for z in 0..4 {
                for y in 0..2 {
                    let voxel = chunk.voxel(x, y, z).unwrap();
                    assert_eq!(voxel.occupancy_code(), 255);
                    assert_eq!(voxel.voxel_type(), VoxelType::GROUND);
                    assert!(voxel.vertices().is_empty());
                }

                let surface = chunk.voxel(x, 2, z).unwrap();
                assert_eq!(surface.occupancy_code(), 15);
                assert_eq!(surface.triangle_count(), 2);
                assert!(surface.vertices().iter().all(|v| v.y == 1.0));

                let air = chunk.voxel(x, 3, z).unwrap();
                assert_eq!(air.occupancy_code(), 0);
                assert_eq!(air.voxel_type(), VoxelType::AIR);
            }
        }

        assert_eq!(chunk.mesh().triangle_count(), 32);
        assert_eq!(chunk.mesh().vertex_count(), 96);
        for normal in chunk.mesh().normals() {
            assert!((normal[1] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn mesh_invariants_hold_on_noisy_terrain() {
        let params = ChunkParams {
            size: 6,
            height: 10,
            surface_height: 4.0,
            ..flat_params()
        };
        let noise = NoiseField::new(321.5, 0.12, 3.0, 8.0);
        let tile = HeightMap::radial_falloff(7, 7);
        let chunk = Chunk::generate(ChunkIndex::new(2, 1), &params, &noise, &tile).unwrap();

        let mesh = chunk.mesh();
        assert_eq!(mesh.positions().len(), mesh.indices().len());
        assert_eq!(mesh.normals().len(), mesh.indices().len());
        assert_eq!(mesh.indices().len() % 3, 0);

        let mut expected_triangles = 0;
        for (cell, voxel) in chunk.voxels() {
            assert_eq!(
                voxel.vertices().len(),
                corner_table::lookup(voxel.occupancy_code()).len()
            );
            assert_eq!(
                voxel.voxel_type() == VoxelType::GROUND,
                !voxel.buried_corners().is_empty()
            );
            assert_eq!(
                voxel.world_position(),
                Point3::new(12.0 + cell.x as f32, cell.y as f32, 6.0 + cell.z as f32)
            );
            expected_triangles += voxel.triangle_count();
        }
        assert_eq!(mesh.triangle_count(), expected_triangles);
        assert_eq!(chunk.voxels().len(), 6 * 10 * 6);
    }

    #[test]
    fn generation_is_deterministic() {
        let params = ChunkParams {
            marker_chance: 0.3,
            ..flat_params()
        };
        let noise = NoiseField::new(77.0, 0.12, 3.0, 8.0);
        let tile = HeightMap::radial_falloff(5, 5);

        let first = Chunk::generate(ChunkIndex::new(1, 1), &params, &noise, &tile).unwrap();
        let second = Chunk::generate(ChunkIndex::new(1, 1), &params, &noise, &tile).unwrap();

        assert_eq!(first.mesh(), second.mesh());
        assert_eq!(first.marker_spawns(), second.marker_spawns());
        assert!(first.voxels().zip(second.voxels()).all(|(a, b)| a == b));
    }

    #[test]
    fn voxel_lookup_is_bounds_checked() {
        let chunk = flat_chunk(&flat_params());
        assert!(matches!(
            chunk.voxel(4, 0, 0),
            Err(TerrainError::VoxelOutOfBounds { x: 4, size: 4, .. })
        ));
        assert!(chunk.inspect_voxel(0, 4, 0).is_err());
        assert!(chunk.is_ground(0, 0, 0).unwrap());
        assert!(!chunk.is_ground(0, 3, 0).unwrap());
        assert!(chunk.inspect_voxel(1, 2, 1).is_ok());
    }

    #[test]
    fn wrong_tile_size_is_rejected() {
        let tile = HeightMap::uniform(4, 4, 1.0);
        let result = Chunk::generate(ChunkIndex::new(0, 0), &flat_params(), &flat_noise(), &tile);
        assert!(matches!(
            result,
            Err(TerrainError::HeightmapSize { expected_width: 5, found_width: 4, .. })
        ));
    }

    #[test]
    fn markers_only_on_flat_tops() {
        let never = flat_chunk(&flat_params());
        assert!(never.marker_spawns().is_empty());
        assert!(never.voxels().all(|(_, voxel)| !voxel.marker_spawned()));

        let always = flat_chunk(&ChunkParams {
            marker_chance: 1.0,
            ..flat_params()
        });
        assert_eq!(always.marker_spawns().len(), 16);
        for spawn in always.marker_spawns() {
            let (x, y, z) = spawn.cell;
            let voxel = always.voxel(x, y, z).unwrap();
            assert_eq!(voxel.buried_corners(), CornerSet::FLAT_TOP);
            assert!(voxel.marker_spawned());
            assert_eq!(spawn.position, voxel.marker_position());
            assert_eq!(spawn.position.y, 3.0);
        }
    }

    #[test]
    fn cave_modes_change_classification() {
        let noise = NoiseField::new(5.0, 0.12, 0.0, 8.0);
        let tile = HeightMap::uniform(5, 5, 1.0);

        // Every density sample is at least 0, so a zero threshold buries everything.
        let caves = ChunkParams {
            burial_mode: BurialMode::Caves,
            cave_threshold: 0.0,
            ..flat_params()
        };
        let chunk = Chunk::generate(ChunkIndex::new(0, 0), &caves, &noise, &tile).unwrap();
        assert!(chunk.voxels().all(|(_, voxel)| voxel.occupancy_code() == 255));
        assert!(chunk.mesh().is_empty());

        // Carved terrain keeps the surface's air cells as air.
        let carved = ChunkParams {
            burial_mode: BurialMode::SurfaceWithCaves,
            cave_threshold: 0.0,
            ..flat_params()
        };
        let chunk = Chunk::generate(ChunkIndex::new(0, 0), &carved, &noise, &tile).unwrap();
        for (cell, voxel) in chunk.voxels() {
            let expected = if cell.y == 3 { 0 } else { 255 };
            assert_eq!(voxel.occupancy_code(), expected);
        }
    }
}
