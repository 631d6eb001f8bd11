//! # Error Module
//!
//! Error type shared by every fallible terrain operation.
//!
//! Generation requests either succeed completely or fail without touching any
//! previously generated terrain, so every variant here describes a request that
//! was rejected rather than a partially applied one.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type TerrainResult<T> = Result<T, TerrainError>;

/// Everything that can go wrong while configuring, generating or inspecting terrain.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// The master (or per-chunk) heightmap does not match the grid it is meant to cover.
    #[error(
        "heightmap is {found_width}x{found_height} but {expected_width}x{expected_height} is required"
    )]
    HeightmapSize {
        /// Required width in pixels.
        expected_width: usize,
        /// Required height (depth) in pixels.
        expected_height: usize,
        /// Width of the supplied heightmap.
        found_width: usize,
        /// Height (depth) of the supplied heightmap.
        found_height: usize,
    },

    /// A debug lookup addressed a voxel outside its chunk.
    #[error("voxel ({x}, {y}, {z}) is outside the {size}x{height}x{size} chunk")]
    VoxelOutOfBounds {
        /// Requested x coordinate.
        x: usize,
        /// Requested y coordinate.
        y: usize,
        /// Requested z coordinate.
        z: usize,
        /// Chunk width and depth.
        size: usize,
        /// Chunk height.
        height: usize,
    },

    /// A lookup addressed a chunk outside the grid.
    #[error("chunk ({x}, {z}) is outside the {width}x{depth} grid")]
    ChunkOutOfBounds {
        /// Requested grid x index.
        x: usize,
        /// Requested grid z index.
        z: usize,
        /// Grid width in chunks.
        width: usize,
        /// Grid depth in chunks.
        depth: usize,
    },

    /// A configuration value is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for [`GenerationConfig`](crate::config::GenerationConfig).
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The heightmap image could not be opened or decoded.
    #[error("failed to load heightmap {path}: {source}")]
    HeightmapLoad {
        /// Path of the image.
        path: PathBuf,
        /// Underlying decode error.
        #[source]
        source: image::ImageError,
    },

    /// A generation worker stopped before handing back its chunk.
    #[error("chunk generation worker stopped before returning chunk ({x}, {z})")]
    WorkerLost {
        /// Grid x index of the missing chunk.
        x: usize,
        /// Grid z index of the missing chunk.
        z: usize,
    },
}
