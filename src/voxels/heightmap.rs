//! # Heightmap Module
//!
//! The island's height-blending map. Only the alpha channel of the source
//! image is used: an opaque pixel leaves the noise surface unchanged and a
//! transparent pixel lowers it by the configured heightmap scalar, which is how
//! the island tapers off into the sea.
//!
//! Image pixel `(x, y)` is heightmap column `(x, z)`.

use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::error::{TerrainError, TerrainResult};

/// A grid of alpha values in `[0, 1]`, indexed by `(x, z)`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightMap {
    width: usize,
    height: usize,
    /// Row-major by z: `alpha[z * width + x]`.
    alpha: Vec<f32>,
}

impl HeightMap {
    /// Builds a heightmap from a per-pixel alpha function.
    ///
    /// # Arguments
    /// * `width` - Number of columns along x
    /// * `height` - Number of rows along z
    /// * `alpha_at` - Alpha for `(x, z)`, clamped to `[0, 1]`
    pub fn from_fn(width: usize, height: usize, mut alpha_at: impl FnMut(usize, usize) -> f32) -> Self {
        let mut alpha = Vec::with_capacity(width * height);
        for z in 0..height {
            for x in 0..width {
                alpha.push(alpha_at(x, z).clamp(0.0, 1.0));
            }
        }
        HeightMap {
            width,
            height,
            alpha,
        }
    }

    /// A heightmap with the same alpha everywhere.
    pub fn uniform(width: usize, height: usize, alpha: f32) -> Self {
        Self::from_fn(width, height, |_, _| alpha)
    }

    /// A round island: opaque in the middle, fading to transparent at the edges.
    ///
    /// Used when no heightmap image is supplied.
    pub fn radial_falloff(width: usize, height: usize) -> Self {
        let centre_x = (width.saturating_sub(1)) as f32 / 2.0;
        let centre_z = (height.saturating_sub(1)) as f32 / 2.0;
        let radius = centre_x.min(centre_z).max(1.0);

        Self::from_fn(width, height, |x, z| {
            let dx = x as f32 - centre_x;
            let dz = z as f32 - centre_z;
            let distance = (dx * dx + dz * dz).sqrt() / radius;
            // Full height inside 60% of the radius, linear falloff to the rim.
            1.0 - ((distance - 0.6) / 0.4).clamp(0.0, 1.0)
        })
    }

    /// Reads the alpha channel of a decoded image.
    ///
    /// Rows count from the bottom of the image: the last image row is `z = 0`.
    pub fn from_image(image: &DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self::from_fn(width as usize, height as usize, |x, z| {
            let row = height - 1 - z as u32;
            image.get_pixel(x as u32, row)[3] as f32 / u8::MAX as f32
        })
    }

    /// Opens and decodes a heightmap image.
    ///
    /// # Arguments
    /// * `path` - Path of the image (PNG)
    ///
    /// # Returns
    /// The heightmap, or a [`TerrainError::HeightmapLoad`] if the file cannot be decoded.
    pub fn open(path: impl AsRef<Path>) -> TerrainResult<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| TerrainError::HeightmapLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let heightmap = Self::from_image(&image);
        log::info!(
            "Loaded {}x{} heightmap from {}",
            heightmap.width,
            heightmap.height,
            path.display()
        );
        Ok(heightmap)
    }

    /// Number of columns along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows along z.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Alpha of the pixel at `(x, z)`.
    ///
    /// # Panics
    /// Panics if the pixel is outside the map.
    pub fn alpha(&self, x: usize, z: usize) -> f32 {
        assert!(
            x < self.width && z < self.height,
            "pixel ({x}, {z}) outside {}x{} heightmap",
            self.width,
            self.height
        );
        self.alpha[z * self.width + x]
    }

    /// Copies the `size × size` square starting at `(origin_x, origin_z)`.
    ///
    /// Chunks take tiles of `chunk_size + 1` pixels at multiples of
    /// `chunk_size`, so neighbouring tiles share their border column.
    ///
    /// # Returns
    /// The tile, or a [`TerrainError::HeightmapSize`] if it does not fit inside the map.
    pub fn tile(&self, origin_x: usize, origin_z: usize, size: usize) -> TerrainResult<Self> {
        if origin_x + size > self.width || origin_z + size > self.height {
            return Err(TerrainError::HeightmapSize {
                expected_width: origin_x + size,
                expected_height: origin_z + size,
                found_width: self.width,
                found_height: self.height,
            });
        }

        Ok(Self::from_fn(size, size, |x, z| {
            self.alpha(origin_x + x, origin_z + z)
        }))
    }
}
