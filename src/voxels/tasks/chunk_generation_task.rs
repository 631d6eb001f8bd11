//! # Chunk Generation Task
//!
//! Generates one chunk of a terrain grid on a worker thread.

use std::sync::Arc;

use crate::error::TerrainResult;
use crate::task_management::task::Task;
use crate::voxels::chunk::{Chunk, ChunkIndex, ChunkParams};
use crate::voxels::heightmap::HeightMap;
use crate::voxels::noise_field::NoiseField;

/// The value a [`ChunkGenerationTask`] sends back: the chunk's grid index and
/// the generated chunk.
pub type ChunkGenerationResult = (ChunkIndex, TerrainResult<Chunk>);

/// A task that generates a single chunk.
///
/// This task is responsible for:
/// 1. Cutting the chunk's tile out of the shared master heightmap
/// 2. Generating the chunk from it
pub struct ChunkGenerationTask {
    /// Grid index of the chunk to generate
    index: ChunkIndex,
    /// Chunk dimensions, burial mode and marker settings
    params: Arc<ChunkParams>,
    /// The noise field of this generation run
    noise: NoiseField,
    /// Read-only master heightmap shared by every task of the run
    master: Arc<HeightMap>,
}

impl ChunkGenerationTask {
    /// Creates a new chunk generation task.
    ///
    /// # Arguments
    /// * `index` - Grid index of the chunk
    /// * `params` - Shared chunk parameters
    /// * `noise` - The noise field of this run
    /// * `master` - The master heightmap of the whole grid
    pub fn new(
        index: ChunkIndex,
        params: Arc<ChunkParams>,
        noise: NoiseField,
        master: Arc<HeightMap>,
    ) -> Self {
        ChunkGenerationTask {
            index,
            params,
            noise,
            master,
        }
    }

    /// Generates the chunk on the current thread.
    pub fn run(&self) -> TerrainResult<Chunk> {
        let size = self.params.size;
        let tile = self
            .master
            .tile(self.index.x * size, self.index.z * size, size + 1)?;
        Chunk::generate(self.index, &self.params, &self.noise, &tile)
    }
}

impl Task<ChunkGenerationResult> for ChunkGenerationTask {
    fn process(&self) -> ChunkGenerationResult {
        (self.index, self.run())
    }
}
