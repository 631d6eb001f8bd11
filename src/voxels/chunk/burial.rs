//! # Burial Predicates
//!
//! Decide which corners of a cell lie inside the terrain. The predicates only
//! differ in the field they consult; the meshing code downstream is shared.

use cgmath::{Point3, Vector3};

use crate::config::BurialMode;
use crate::voxels::noise_field::{DensitySamples, HeightSamples, NoiseField};
use crate::voxels::voxel::corner::{Corner, CornerSet};

/// Classifies the corners of a cell as buried or exposed.
pub trait BurialPredicate {
    /// Whether `corner` of the cell at `cell` is buried.
    fn is_buried(&self, cell: Point3<usize>, corner: Corner) -> bool;

    /// Every buried corner of the cell at `cell`.
    fn buried_corners(&self, cell: Point3<usize>) -> CornerSet {
        Corner::ALL
            .into_iter()
            .filter(|corner| self.is_buried(cell, *corner))
            .collect()
    }
}

/// Buried when below the height field plus a base surface height.
pub struct HeightBurial<'a> {
    heights: &'a HeightSamples,
    surface_height: f32,
}

impl<'a> HeightBurial<'a> {
    /// Creates the predicate.
    ///
    /// # Arguments
    /// * `heights` - Height samples of the chunk, `(size + 1)²`
    /// * `surface_height` - Added to every height sample
    pub fn new(heights: &'a HeightSamples, surface_height: f32) -> Self {
        HeightBurial {
            heights,
            surface_height,
        }
    }
}

impl BurialPredicate for HeightBurial<'_> {
    fn is_buried(&self, cell: Point3<usize>, corner: Corner) -> bool {
        let point = cell + corner.offset();
        point.y as f32 <= self.heights.get(point.x, point.z) + self.surface_height
    }
}

/// Buried when the density field reaches a threshold.
pub struct DensityBurial<'a> {
    density: &'a DensitySamples,
    threshold: f32,
}

impl<'a> DensityBurial<'a> {
    /// Creates the predicate.
    ///
    /// # Arguments
    /// * `density` - Density samples of the chunk, `(size + 1) × (height + 1) × (size + 1)`
    /// * `threshold` - Density at or above which a corner is buried
    pub fn new(density: &'a DensitySamples, threshold: f32) -> Self {
        DensityBurial { density, threshold }
    }
}

impl BurialPredicate for DensityBurial<'_> {
    fn is_buried(&self, cell: Point3<usize>, corner: Corner) -> bool {
        let point = cell + corner.offset();
        self.density.get(point.x, point.y, point.z) >= self.threshold
    }
}

/// Caves carved out of the surface terrain.
///
/// Cells the surface leaves entirely exposed stay air. Every other cell is
/// classified by the density field instead.
pub struct CarvedBurial<'a> {
    surface: HeightBurial<'a>,
    caves: DensityBurial<'a>,
}

impl<'a> CarvedBurial<'a> {
    /// Combines a surface predicate with a cave predicate.
    pub fn new(surface: HeightBurial<'a>, caves: DensityBurial<'a>) -> Self {
        CarvedBurial { surface, caves }
    }
}

impl BurialPredicate for CarvedBurial<'_> {
    fn is_buried(&self, cell: Point3<usize>, corner: Corner) -> bool {
        self.buried_corners(cell).contains(corner)
    }

    fn buried_corners(&self, cell: Point3<usize>) -> CornerSet {
        if self.surface.buried_corners(cell).is_empty() {
            CornerSet::empty()
        } else {
            self.caves.buried_corners(cell)
        }
    }
}

/// The fields a [`BurialMode`] reads besides the surface heights.
pub(crate) enum BurialSamples {
    Surface,
    Caves(DensitySamples),
    SurfaceWithCaves(DensitySamples),
}

impl BurialSamples {
    /// Samples whatever `mode` needs for one chunk.
    ///
    /// # Arguments
    /// * `size` - Corner samples per horizontal axis, `chunk_size + 1`
    /// * `height` - Corner samples along y, `chunk_height + 1`
    /// * `offset` - World offset of the chunk
    pub(crate) fn sample(
        mode: BurialMode,
        noise: &NoiseField,
        size: usize,
        height: usize,
        offset: Vector3<f32>,
    ) -> Self {
        match mode {
            BurialMode::Surface => BurialSamples::Surface,
            BurialMode::Caves => BurialSamples::Caves(noise.density_samples(size, height, offset)),
            BurialMode::SurfaceWithCaves => {
                BurialSamples::SurfaceWithCaves(noise.density_samples(size, height, offset))
            }
        }
    }
}

/// The predicate selected by a [`BurialMode`].
pub(crate) enum Burial<'a> {
    Surface(HeightBurial<'a>),
    Caves(DensityBurial<'a>),
    SurfaceWithCaves(CarvedBurial<'a>),
}

impl<'a> Burial<'a> {
    pub(crate) fn select(
        samples: &'a BurialSamples,
        heights: &'a HeightSamples,
        surface_height: f32,
        cave_threshold: f32,
    ) -> Self {
        let surface = HeightBurial::new(heights, surface_height);
        match samples {
            BurialSamples::Surface => Burial::Surface(surface),
            BurialSamples::Caves(density) => {
                Burial::Caves(DensityBurial::new(density, cave_threshold))
            }
            BurialSamples::SurfaceWithCaves(density) => Burial::SurfaceWithCaves(
                CarvedBurial::new(surface, DensityBurial::new(density, cave_threshold)),
            ),
        }
    }
}

impl BurialPredicate for Burial<'_> {
    fn is_buried(&self, cell: Point3<usize>, corner: Corner) -> bool {
        self.buried_corners(cell).contains(corner)
    }

    fn buried_corners(&self, cell: Point3<usize>) -> CornerSet {
        match self {
            Burial::Surface(predicate) => predicate.buried_corners(cell),
            Burial::Caves(predicate) => predicate.buried_corners(cell),
            Burial::SurfaceWithCaves(predicate) => predicate.buried_corners(cell),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::heightmap::HeightMap;

    fn flat_heights() -> HeightSamples {
        NoiseField::new(0.0, 0.12, 0.0, 8.0).height_samples(
            5,
            Vector3::new(0.0, 0.0, 0.0),
            &HeightMap::uniform(5, 5, 1.0),
        )
    }

    #[test]
    fn height_burial_buries_up_to_the_surface() {
        let heights = flat_heights();
        let predicate = HeightBurial::new(&heights, 2.0);

        assert_eq!(predicate.buried_corners(Point3::new(0, 0, 0)), CornerSet::FULL);
        assert_eq!(predicate.buried_corners(Point3::new(1, 1, 1)), CornerSet::FULL);
        assert_eq!(predicate.buried_corners(Point3::new(2, 2, 3)), CornerSet::FLAT_TOP);
        assert!(predicate.buried_corners(Point3::new(3, 3, 0)).is_empty());
    }

    #[test]
    fn density_burial_uses_threshold_inclusively() {
        let field = NoiseField::new(7.0, 0.12, 3.0, 8.0);
        let density = field.density_samples(3, 3, Vector3::new(0.0, 0.0, 0.0));
        let sample = density.get(0, 0, 0);

        let at = DensityBurial::new(&density, sample);
        assert!(at.is_buried(Point3::new(0, 0, 0), Corner::C0));

        let above = DensityBurial::new(&density, 2.0);
        assert!(above.buried_corners(Point3::new(1, 1, 1)).is_empty());

        let below = DensityBurial::new(&density, -1.0);
        assert_eq!(below.buried_corners(Point3::new(1, 1, 1)), CornerSet::FULL);
    }

    #[test]
    fn carved_burial_never_fills_surface_air() {
        let heights = flat_heights();
        let field = NoiseField::new(7.0, 0.12, 3.0, 8.0);
        let density = field.density_samples(5, 6, Vector3::new(0.0, 0.0, 0.0));

        let carved = CarvedBurial::new(
            HeightBurial::new(&heights, 2.0),
            DensityBurial::new(&density, -1.0),
        );

        // Above the surface: air, even though every density sample passes.
        assert!(carved.buried_corners(Point3::new(1, 4, 1)).is_empty());
        // Ground cells defer to the density field.
        assert_eq!(carved.buried_corners(Point3::new(1, 2, 1)), CornerSet::FULL);
        assert!(carved.is_buried(Point3::new(1, 0, 1), Corner::C6));
    }

    #[test]
    fn each_mode_reads_its_own_field() {
        let heights = flat_heights();
        let field = NoiseField::new(7.0, 0.12, 3.0, 8.0);
        let offset = Vector3::new(0.0, 0.0, 0.0);

        let surface_samples = BurialSamples::sample(BurialMode::Surface, &field, 5, 6, offset);
        assert!(matches!(surface_samples, BurialSamples::Surface));
        let burial = Burial::select(&surface_samples, &heights, 2.0, -1.0);
        assert!(burial.buried_corners(Point3::new(1, 4, 1)).is_empty());

        let cave_samples = BurialSamples::sample(BurialMode::Caves, &field, 5, 6, offset);
        let caves = Burial::select(&cave_samples, &heights, 2.0, -1.0);
        assert_eq!(caves.buried_corners(Point3::new(1, 4, 1)), CornerSet::FULL);

        let carved_samples =
            BurialSamples::sample(BurialMode::SurfaceWithCaves, &field, 5, 6, offset);
        let carved = Burial::select(&carved_samples, &heights, 2.0, -1.0);
        assert!(carved.buried_corners(Point3::new(1, 4, 1)).is_empty());
        assert_eq!(carved.buried_corners(Point3::new(1, 1, 1)), CornerSet::FULL);
    }
}
