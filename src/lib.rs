#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Island
//!
//! Procedural island terrain: a chunked solid/air voxel field sampled from
//! coherent noise, shaped by a heightmap image and turned into triangle meshes
//! with a marching-cubes-style corner table.
//!
//! ## Key Modules
//!
//! * `voxels` - Noise sampling, voxels, chunks and the terrain grid
//! * `meshing` - Chunk mesh buffers and upload vertex format
//! * `task_management` - Worker pool used for parallel chunk generation
//! * `config` - Generation settings loaded from JSON
//! * `error` - The crate's error type
//!
//! ## Usage
//!
//! ```rust,no_run
//! use voxel_island::{GenerationConfig, HeightMap, MarkerLog, TerrainGrid};
//!
//! let config = GenerationConfig::default();
//! let (width, depth) = config.expected_heightmap_size();
//! let mut grid = TerrainGrid::new(config, HeightMap::radial_falloff(width, depth))?;
//!
//! let mut markers = MarkerLog::default();
//! grid.generate(&mut markers)?;
//!
//! for chunk in grid.chunks() {
//!     let _bytes = chunk.mesh().vertex_bytes();
//! }
//! # Ok::<(), voxel_island::TerrainError>(())
//! ```

use log::info;

pub mod config;
pub mod error;
pub mod meshing;
pub mod task_management;
pub mod voxels;

pub use config::{BurialMode, GenerationConfig};
pub use error::{TerrainError, TerrainResult};
pub use meshing::{ChunkMesh, MeshVertex};
pub use voxels::chunk::{Chunk, ChunkIndex};
pub use voxels::grid::{generate_chunks, TerrainGrid};
pub use voxels::heightmap::HeightMap;
pub use voxels::markers::{MarkerLog, MarkerSink, MarkerSpawn, NullMarkerSink};
pub use voxels::voxel::{Voxel, VoxelType};

/// Installs the logger: stdout, filtered by `RUST_LOG`.
///
/// Call once at startup; later calls are ignored.
pub fn init_logging() {
    let mut log_builder = env_logger::Builder::new();
    if log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .try_init()
        .is_ok()
    {
        info!("Logger initialized");
    }
}
