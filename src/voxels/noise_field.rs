//! # Noise Field Module
//!
//! Deterministic scalar fields sampled during chunk generation:
//!
//! * a 2D height field (coherent noise blended with the island heightmap), which
//!   gives the ground line of every column;
//! * a 3D density field for caves, approximated by averaging 2D noise over every
//!   ordered pair of axes.
//!
//! Both are pure functions of their inputs and the field's settings. The same
//! seed therefore always regenerates the same terrain.

use cgmath::{Point3, Vector3};
use noise::{NoiseFn, Perlin};

use super::heightmap::HeightMap;
use crate::config::GenerationConfig;

/// Samples noise for one generation run.
#[derive(Clone, Debug)]
pub struct NoiseField {
    perlin: Perlin,
    /// Added to every sampled coordinate to move through the noise.
    seed: f32,
    /// Coordinate multiplier (smaller is more zoomed in).
    frequency: f32,
    /// Scale applied to the 2D height noise.
    height_scalar: f32,
    /// How far a transparent heightmap pixel lowers the surface.
    heightmap_scalar: f32,
}

impl NoiseField {
    /// Creates a noise field.
    ///
    /// # Arguments
    /// * `seed` - Offset into the noise
    /// * `frequency` - Coordinate multiplier
    /// * `height_scalar` - Scale of the 2D height noise
    /// * `heightmap_scalar` - Depth a fully transparent heightmap pixel subtracts
    pub fn new(seed: f32, frequency: f32, height_scalar: f32, heightmap_scalar: f32) -> Self {
        NoiseField {
            perlin: Perlin::new(0),
            seed,
            frequency,
            height_scalar,
            heightmap_scalar,
        }
    }

    /// Creates the noise field described by a generation config, using `seed`
    /// in place of the config's own (which may have been re-rolled).
    pub fn from_config(config: &GenerationConfig, seed: f32) -> Self {
        Self::new(
            seed,
            config.frequency,
            config.height_scalar,
            config.heightmap_scalar,
        )
    }

    /// The seed this field samples with.
    pub fn seed(&self) -> f32 {
        self.seed
    }

    /// 2D coherent noise remapped to `[0, 1]`.
    pub fn perlin_2d(&self, x: f32, z: f32) -> f32 {
        let value = self.perlin.get([x as f64, z as f64]);
        ((value + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }

    /// Height of the ground line at column `(x, z)` of a chunk.
    ///
    /// # Arguments
    /// * `heightmap` - The chunk's heightmap tile; `(x, z)` is read from it directly
    /// * `x` - Column x within the chunk
    /// * `z` - Column z within the chunk
    /// * `offset` - World position of the chunk origin
    ///
    /// # Returns
    /// The scaled noise height minus the heightmap's lowering at that column.
    pub fn sample_height(&self, heightmap: &HeightMap, x: usize, z: usize, offset: Vector3<f32>) -> f32 {
        // Sum the integral parts first so that neighbouring chunks sampling the
        // same world column get bit-identical inputs.
        let world_x = x as f32 + offset.x;
        let world_z = z as f32 + offset.z;

        let noise = self.perlin_2d(
            (world_x + self.seed) * self.frequency,
            (world_z + self.seed) * self.frequency,
        );
        let lowering = (1.0 - heightmap.alpha(x, z)) * self.heightmap_scalar;

        noise * self.height_scalar - lowering
    }

    /// Samples the height field over a `size × size` block of columns.
    ///
    /// Chunks pass `chunk_size + 1` so the corners on their far edges are covered.
    pub fn height_samples(&self, size: usize, offset: Vector3<f32>, heightmap: &HeightMap) -> HeightSamples {
        let mut values = Vec::with_capacity(size * size);
        for x in 0..size {
            for z in 0..size {
                values.push(self.sample_height(heightmap, x, z, offset));
            }
        }
        HeightSamples { size, values }
    }

    /// Approximate 3D density at a world position.
    ///
    /// The seed is added to every axis and the result scaled by the frequency;
    /// the density is then the plain average of 2D noise over the six ordered
    /// axis pairs `(x,y), (x,z), (z,y), (y,x), (z,x), (y,z)`.
    ///
    /// This is not isotropic 3D noise and still shows some directional bias.
    /// Generated terrain depends on this exact approximation.
    pub fn sample_density(&self, position: Point3<f32>) -> f32 {
        let x = (position.x + self.seed) * self.frequency;
        let y = (position.y + self.seed) * self.frequency;
        let z = (position.z + self.seed) * self.frequency;

        let xy = self.perlin_2d(x, y);
        let xz = self.perlin_2d(x, z);
        let zy = self.perlin_2d(z, y);

        let yx = self.perlin_2d(y, x);
        let zx = self.perlin_2d(z, x);
        let yz = self.perlin_2d(y, z);

        (xy + xz + zy + yx + zx + yz) / 6.0
    }

    /// Samples the density field over a `size × height × size` block.
    ///
    /// Only the horizontal part of `offset` is applied; rows are sampled at
    /// their chunk-local y.
    pub fn density_samples(&self, size: usize, height: usize, offset: Vector3<f32>) -> DensitySamples {
        let mut values = Vec::with_capacity(size * height * size);
        for x in 0..size {
            for y in 0..height {
                for z in 0..size {
                    let position =
                        Point3::new(x as f32 + offset.x, y as f32, z as f32 + offset.z);
                    values.push(self.sample_density(position));
                }
            }
        }
        DensitySamples {
            size,
            height,
            values,
        }
    }
}

/// Height field samples of one chunk, indexed by column `(x, z)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeightSamples {
    size: usize,
    values: Vec<f32>,
}

impl HeightSamples {
    /// Number of columns along each horizontal axis.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Height at column `(x, z)`.
    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.values[x * self.size + z]
    }
}

/// Density samples of one chunk, indexed by lattice point `(x, y, z)`.
#[derive(Clone, Debug, PartialEq)]
pub struct DensitySamples {
    size: usize,
    height: usize,
    values: Vec<f32>,
}

impl DensitySamples {
    /// Number of lattice points along x and z.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of lattice points along y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Density at lattice point `(x, y, z)`.
    pub fn get(&self, x: usize, y: usize, z: usize) -> f32 {
        self.values[(x * self.height + y) * self.size + z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> NoiseField {
        NoiseField::new(1234.56, 0.12, 3.0, 8.0)
    }

    #[test]
    fn height_is_pure() {
        let heightmap = HeightMap::from_fn(17, 17, |x, z| ((x + z) % 5) as f32 / 4.0);
        let offset = Vector3::new(32.0, 0.0, 16.0);
        for x in 0..17 {
            for z in 0..17 {
                let first = field().sample_height(&heightmap, x, z, offset);
                let second = field().sample_height(&heightmap, x, z, offset);
                assert_eq!(first.to_bits(), second.to_bits());
            }
        }
    }

    #[test]
    fn density_is_pure() {
        let field = field();
        for i in 0..50 {
            let position = Point3::new(i as f32 * 0.7, i as f32 * 1.3, 20.0 - i as f32);
            assert_eq!(
                field.sample_density(position).to_bits(),
                field.sample_density(position).to_bits()
            );
        }
    }

    #[test]
    fn samples_stay_in_unit_range() {
        let field = field();
        for i in 0..200 {
            let value = field.perlin_2d(i as f32 * 0.37, i as f32 * -0.53);
            assert!((0.0..=1.0).contains(&value));
            let density = field.sample_density(Point3::new(i as f32, 3.0, i as f32 * 0.5));
            assert!((0.0..=1.0).contains(&density));
        }
    }

    #[test]
    fn density_ignores_axis_order() {
        let field = field();
        let (a, b, c) = (3.0, 11.0, 7.5);
        let reference = field.sample_density(Point3::new(a, b, c));
        for permuted in [
            Point3::new(a, c, b),
            Point3::new(b, a, c),
            Point3::new(b, c, a),
            Point3::new(c, a, b),
            Point3::new(c, b, a),
        ] {
            assert!((field.sample_density(permuted) - reference).abs() < 1e-5);
        }
    }

    #[test]
    fn transparent_pixels_lower_the_surface() {
        let opaque = HeightMap::uniform(2, 2, 1.0);
        let clear = HeightMap::uniform(2, 2, 0.0);
        let offset = Vector3::new(0.0, 0.0, 0.0);

        let high = field().sample_height(&opaque, 1, 1, offset);
        let low = field().sample_height(&clear, 1, 1, offset);
        assert!((high - low - 8.0).abs() < 1e-5);
    }

    #[test]
    fn zero_height_scalar_leaves_only_the_heightmap() {
        let field = NoiseField::new(42.0, 0.12, 0.0, 4.0);
        let heightmap = HeightMap::uniform(3, 3, 0.5);
        let samples = field.height_samples(3, Vector3::new(0.0, 0.0, 0.0), &heightmap);
        assert_eq!(samples.size(), 3);
        for x in 0..3 {
            for z in 0..3 {
                assert_eq!(samples.get(x, z), -2.0);
            }
        }
    }

    #[test]
    fn neighbouring_chunks_share_edge_heights() {
        let field = field();
        let heightmap = HeightMap::uniform(5, 5, 1.0);
        let left = field.height_samples(5, Vector3::new(16.0, 0.0, 0.0), &heightmap);
        let right = field.height_samples(5, Vector3::new(20.0, 0.0, 0.0), &heightmap);
        for z in 0..5 {
            assert_eq!(left.get(4, z).to_bits(), right.get(0, z).to_bits());
        }
    }

    #[test]
    fn density_samples_skip_vertical_offset() {
        let field = field();
        let samples = field.density_samples(2, 3, Vector3::new(8.0, 50.0, 4.0));
        assert_eq!(samples.height(), 3);
        assert_eq!(
            samples.get(1, 2, 1),
            field.sample_density(Point3::new(9.0, 2.0, 5.0))
        );
    }
}
