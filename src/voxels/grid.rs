//! # Terrain Grid Module
//!
//! A rectangular grid of chunks generated from one master heightmap.
//!
//! ## Heightmap Tiling
//!
//! Chunk `(x, z)` reads the `(chunk_size + 1)²` tile whose corner is pixel
//! `(x * chunk_size, z * chunk_size)`. Neighbouring tiles share their border
//! column, which is why the master heightmap must be exactly
//! `grid_width * chunk_size + 1` by `grid_depth * chunk_size + 1` pixels.
//!
//! ## Regeneration
//!
//! All chunks of a request are built before anything is replaced. If any of
//! them fails, the grid keeps its previous chunks, seed and markers.

use std::sync::Arc;

use log::{debug, error, info};
use web_time::Instant;

use crate::config::{GenerationConfig, MAX_RANDOM_SEED};
use crate::error::{TerrainError, TerrainResult};
use crate::task_management::TaskManager;

use super::chunk::{Chunk, ChunkIndex, ChunkParams};
use super::heightmap::HeightMap;
use super::markers::{MarkerSink, MarkerSpawn};
use super::noise_field::NoiseField;
use super::tasks::chunk_generation_task::{ChunkGenerationResult, ChunkGenerationTask};
use super::voxel::Voxel;

/// Generates every chunk of a grid.
///
/// # Arguments
/// * `config` - Grid and chunk settings; `workers > 1` generates in parallel
/// * `seed` - Noise seed of this run
/// * `master` - Master heightmap covering the whole grid
///
/// # Returns
/// The chunks in grid order (`x` outer, `z` inner), or the first error. A
/// heightmap of the wrong size yields [`TerrainError::HeightmapSize`] before
/// any chunk is generated.
pub fn generate_chunks(
    config: &GenerationConfig,
    seed: f32,
    master: &Arc<HeightMap>,
) -> TerrainResult<Vec<Chunk>> {
    config.validate()?;

    let (expected_width, expected_height) = config.expected_heightmap_size();
    if master.width() != expected_width || master.height() != expected_height {
        let err = TerrainError::HeightmapSize {
            expected_width,
            expected_height,
            found_width: master.width(),
            found_height: master.height(),
        };
        error!("Terrain generation aborted: {err}");
        return Err(err);
    }

    let noise = NoiseField::from_config(config, seed);
    let params = Arc::new(ChunkParams::from_config(config));

    let tasks: Vec<ChunkGenerationTask> = (0..config.grid_width)
        .flat_map(|x| (0..config.grid_depth).map(move |z| ChunkIndex::new(x, z)))
        .map(|index| {
            ChunkGenerationTask::new(index, params.clone(), noise.clone(), master.clone())
        })
        .collect();

    if config.workers <= 1 {
        return tasks.iter().map(ChunkGenerationTask::run).collect();
    }

    let num_workers = config.workers.min(tasks.len());
    debug!(
        "Generating {} chunks on {} workers",
        config.chunk_count(),
        num_workers
    );
    let mut task_manager = TaskManager::<ChunkGenerationResult>::new(num_workers);
    for task in tasks {
        task_manager.publish_task(Box::new(task));
    }

    in_grid_order(task_manager.wait_for_all(), config.grid_width, config.grid_depth)
}

/// Puts worker results back into grid order (`x` outer, `z` inner).
///
/// A chunk without a result was lost with its worker and becomes
/// [`TerrainError::WorkerLost`].
fn in_grid_order(
    results: Vec<ChunkGenerationResult>,
    grid_width: usize,
    grid_depth: usize,
) -> TerrainResult<Vec<Chunk>> {
    let mut slots: Vec<Option<TerrainResult<Chunk>>> = Vec::new();
    slots.resize_with(grid_width * grid_depth, || None);
    for (index, result) in results {
        slots[index.x * grid_depth + index.z] = Some(result);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(slot, result)| {
            let (x, z) = (slot / grid_depth, slot % grid_depth);
            result.unwrap_or_else(|| Err(TerrainError::WorkerLost { x, z }))
        })
        .collect()
}

/// A generated island: the chunks plus everything needed to regenerate them.
///
/// Grids are plain values; several can exist side by side.
#[derive(Debug)]
pub struct TerrainGrid {
    config: GenerationConfig,
    heightmap: Arc<HeightMap>,
    seed: f32,
    /// Current chunks in grid order
    chunks: Vec<Chunk>,
    /// `(grid_width, grid_depth)` of the current chunks
    grid_size: (usize, usize),
    /// Markers dispatched for the current chunks
    marker_spawns: Vec<MarkerSpawn>,
}

impl TerrainGrid {
    /// Creates an empty grid. Nothing is generated until [`TerrainGrid::generate`].
    ///
    /// # Arguments
    /// * `config` - Generation settings, validated here
    /// * `heightmap` - Master heightmap; its size is only checked on generation
    pub fn new(config: GenerationConfig, heightmap: HeightMap) -> TerrainResult<Self> {
        config.validate()?;
        Ok(TerrainGrid {
            seed: config.seed,
            config,
            heightmap: Arc::new(heightmap),
            chunks: Vec::new(),
            grid_size: (0, 0),
            marker_spawns: Vec::new(),
        })
    }

    /// Generates the terrain, replacing any previous terrain.
    ///
    /// In random-seed mode a fresh seed is rolled first. On success the sink's
    /// markers are cleared and one marker is spawned per [`MarkerSpawn`]; on
    /// failure the grid and the sink are left untouched.
    pub fn generate(&mut self, sink: &mut impl MarkerSink) -> TerrainResult<()> {
        let start = Instant::now();
        let seed = if self.config.random_seed {
            fastrand::f32() * MAX_RANDOM_SEED
        } else {
            self.seed
        };

        let chunks = generate_chunks(&self.config, seed, &self.heightmap)?;

        self.seed = seed;
        self.grid_size = (self.config.grid_width, self.config.grid_depth);
        self.chunks = chunks;
        self.marker_spawns = self
            .chunks
            .iter()
            .flat_map(|chunk| chunk.marker_spawns().iter().cloned())
            .collect();

        sink.clear_markers();
        for spawn in &self.marker_spawns {
            sink.spawn_marker(spawn.position, &spawn.kind);
        }

        info!(
            "Generated {} chunks ({} triangles, {} markers) with seed {} in {} ms",
            self.chunks.len(),
            self.triangle_count(),
            self.marker_spawns.len(),
            self.seed,
            start.elapsed().as_millis()
        );
        Ok(())
    }

    /// Discards the current terrain and generates it again.
    pub fn regenerate(&mut self, sink: &mut impl MarkerSink) -> TerrainResult<()> {
        info!("Regenerating terrain");
        self.generate(sink)
    }

    /// The chunk at grid index `(x, z)`.
    ///
    /// # Returns
    /// The chunk, or a [`TerrainError::ChunkOutOfBounds`] outside the generated grid.
    pub fn chunk(&self, x: usize, z: usize) -> TerrainResult<&Chunk> {
        let (width, depth) = self.grid_size;
        if x >= width || z >= depth {
            return Err(TerrainError::ChunkOutOfBounds { x, z, width, depth });
        }
        Ok(&self.chunks[x * depth + z])
    }

    /// Every chunk in grid order (`x` outer, `z` inner).
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// `(width, depth)` of the generated grid, in chunks.
    pub fn grid_size(&self) -> (usize, usize) {
        self.grid_size
    }

    /// Logs and returns voxel `(x, y, z)` of chunk `(chunk_x, chunk_z)`.
    pub fn inspect_voxel(
        &self,
        chunk_x: usize,
        chunk_z: usize,
        x: usize,
        y: usize,
        z: usize,
    ) -> TerrainResult<&Voxel> {
        self.chunk(chunk_x, chunk_z)?.inspect_voxel(x, y, z)
    }

    /// The seed of the current terrain, or of the next generation if none exists yet.
    pub fn seed(&self) -> f32 {
        self.seed
    }

    /// Sets the seed used by the next generation. Ignored in random-seed mode.
    pub fn set_seed(&mut self, seed: f32) {
        self.seed = seed;
    }

    /// The generation settings.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Replaces the generation settings for the next generation.
    ///
    /// The seed is reset to the config's seed. Current chunks stay until regenerated.
    pub fn set_config(&mut self, config: GenerationConfig) -> TerrainResult<()> {
        config.validate()?;
        self.seed = config.seed;
        self.config = config;
        Ok(())
    }

    /// The master heightmap.
    pub fn heightmap(&self) -> &HeightMap {
        &self.heightmap
    }

    /// Replaces the master heightmap for the next generation.
    pub fn set_heightmap(&mut self, heightmap: HeightMap) {
        self.heightmap = Arc::new(heightmap);
    }

    /// Markers dispatched for the current terrain.
    pub fn marker_spawns(&self) -> &[MarkerSpawn] {
        &self.marker_spawns
    }

    /// Total triangle count of the current terrain.
    pub fn triangle_count(&self) -> usize {
        self.chunks
            .iter()
            .map(|chunk| chunk.mesh().triangle_count())
            .sum()
    }
}
