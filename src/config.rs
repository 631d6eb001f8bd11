//! # Configuration Module
//!
//! Generation parameters for a whole island. Every field has a default, so a
//! configuration file only needs to list the values it changes:
//!
//! ```json
//! { "grid_width": 2, "grid_depth": 2, "seed": 42.0, "random_seed": false }
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{TerrainError, TerrainResult};

/// Upper bound (exclusive) of seeds rolled in random-seed mode.
pub const MAX_RANDOM_SEED: f32 = 9999.99;

/// How the corners of each voxel are classified as buried.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurialMode {
    /// Corners below the noise height field (plus the surface height) are buried.
    #[default]
    Surface,
    /// Corners whose 3D density sample reaches the cave threshold are buried.
    Caves,
    /// The surface pass decides which cells are ground; ground cells are then
    /// re-classified by the density pass.
    SurfaceWithCaves,
}

/// Parameters for generating a grid of chunks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Number of chunks along x.
    pub grid_width: usize,
    /// Number of chunks along z.
    pub grid_depth: usize,
    /// Width and depth of a chunk in voxels.
    pub chunk_size: usize,
    /// Height of a chunk in voxels.
    pub chunk_height: usize,
    /// Base height of the terrain surface inside a chunk.
    pub surface_height: f32,
    /// World y coordinate of every chunk origin.
    pub base_y: f32,
    /// Noise seed. Ignored when `random_seed` is set.
    pub seed: f32,
    /// Roll a fresh seed on every generation.
    pub random_seed: bool,
    /// Noise frequency multiplier (smaller zooms in).
    pub frequency: f32,
    /// Scale applied to the 2D surface noise.
    pub height_scalar: f32,
    /// How far a fully transparent heightmap pixel lowers the surface.
    pub heightmap_scalar: f32,
    /// Density at or above which a corner counts as buried in cave modes.
    pub cave_threshold: f32,
    /// Corner classification mode.
    pub burial_mode: BurialMode,
    /// Probability that a flat-top voxel spawns a marker.
    pub marker_chance: f32,
    /// Kind label handed to the marker sink.
    pub marker_kind: String,
    /// Worker threads used for chunk generation. `0` or `1` generates on the calling thread.
    pub workers: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            grid_width: 4,
            grid_depth: 4,
            chunk_size: 16,
            chunk_height: 16,
            surface_height: 8.0,
            base_y: 0.0,
            seed: 0.0,
            random_seed: true,
            frequency: 0.12,
            height_scalar: 3.0,
            heightmap_scalar: 8.0,
            cave_threshold: 0.5,
            burial_mode: BurialMode::Surface,
            marker_chance: 0.0045,
            marker_kind: "crop".to_string(),
            workers: 1,
        }
    }
}

impl GenerationConfig {
    /// Reads and validates a JSON configuration file.
    ///
    /// # Arguments
    /// * `path` - Path of the JSON file
    ///
    /// # Returns
    /// The parsed configuration, or the I/O, parse or validation error.
    pub fn load(path: impl AsRef<Path>) -> TerrainResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TerrainError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GenerationConfig =
            serde_json::from_str(&text).map_err(|source| TerrainError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        log::debug!("Loaded generation config from {}", path.display());
        Ok(config)
    }

    /// Checks that every value can produce terrain.
    ///
    /// The heightmap size is not checked here; it is a property of the
    /// generation request, see [`GenerationConfig::expected_heightmap_size`].
    pub fn validate(&self) -> TerrainResult<()> {
        if self.grid_width == 0 || self.grid_depth == 0 {
            return Err(TerrainError::InvalidConfig(format!(
                "grid must contain at least one chunk, got {}x{}",
                self.grid_width, self.grid_depth
            )));
        }
        if self.chunk_size == 0 || self.chunk_height == 0 {
            return Err(TerrainError::InvalidConfig(format!(
                "chunk dimensions must be non-zero, got {}x{}x{}",
                self.chunk_size, self.chunk_height, self.chunk_size
            )));
        }

        let scalars = [
            ("surface_height", self.surface_height),
            ("base_y", self.base_y),
            ("seed", self.seed),
            ("frequency", self.frequency),
            ("height_scalar", self.height_scalar),
            ("heightmap_scalar", self.heightmap_scalar),
            ("cave_threshold", self.cave_threshold),
        ];
        if let Some((name, value)) = scalars.iter().find(|(_, value)| !value.is_finite()) {
            return Err(TerrainError::InvalidConfig(format!(
                "{name} must be finite, got {value}"
            )));
        }

        if !(0.0..=1.0).contains(&self.marker_chance) {
            return Err(TerrainError::InvalidConfig(format!(
                "marker_chance must be within [0, 1], got {}",
                self.marker_chance
            )));
        }

        Ok(())
    }

    /// Size `(width, depth)` the master heightmap must have for this grid.
    ///
    /// Adjacent chunks share their border column, hence the extra pixel.
    pub fn expected_heightmap_size(&self) -> (usize, usize) {
        (
            self.grid_width * self.chunk_size + 1,
            self.grid_depth * self.chunk_size + 1,
        )
    }

    /// Total number of chunks in the grid.
    pub fn chunk_count(&self) -> usize {
        self.grid_width * self.grid_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{ "grid_width": 2, "burial_mode": "surface_with_caves" }"#)
                .unwrap();
        assert_eq!(config.grid_width, 2);
        assert_eq!(config.grid_depth, 4);
        assert_eq!(config.burial_mode, BurialMode::SurfaceWithCaves);
        assert_eq!(config.marker_kind, "crop");
    }

    #[test]
    fn integer_scalars_are_accepted() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{ "surface_height": 2, "seed": 17 }"#).unwrap();
        assert_eq!(config.surface_height, 2.0);
        assert_eq!(config.seed, 17.0);
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "chunk_size": 8, "random_seed": false, "workers": 3 }}"#).unwrap();

        let config = GenerationConfig::load(file.path()).unwrap();
        assert_eq!(config.chunk_size, 8);
        assert!(!config.random_seed);
        assert_eq!(config.workers, 3);
        assert_eq!(config.expected_heightmap_size(), (33, 33));
    }

    #[test]
    fn load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = GenerationConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, TerrainError::ConfigParse { .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GenerationConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, TerrainError::ConfigRead { .. }));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let empty_grid = GenerationConfig {
            grid_width: 0,
            ..Default::default()
        };
        assert!(matches!(
            empty_grid.validate(),
            Err(TerrainError::InvalidConfig(_))
        ));

        let flat_chunk = GenerationConfig {
            chunk_height: 0,
            ..Default::default()
        };
        assert!(flat_chunk.validate().is_err());

        let bad_chance = GenerationConfig {
            marker_chance: 1.5,
            ..Default::default()
        };
        assert!(bad_chance.validate().is_err());

        let nan_frequency = GenerationConfig {
            frequency: f32::NAN,
            ..Default::default()
        };
        assert!(nan_frequency.validate().is_err());

        assert!(GenerationConfig::default().validate().is_ok());
    }
}
