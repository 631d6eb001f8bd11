//! # Meshing Module
//!
//! Triangle buffers produced by chunk generation.
//!
//! A [`ChunkMesh`] is a plain triangle soup: every voxel contributes its table
//! triangles translated to its cell, each vertex gets its own index, and no
//! vertices are welded. Normals are recomputed once the whole chunk has been
//! stitched together.

pub mod vertex;

use cgmath::{InnerSpace, Point3, Vector3, Zero};
use serde::Serialize;

use crate::voxels::corner_table::{self, TABLE_SIZE};
pub use vertex::MeshVertex;

/// Positions, indices and normals of one chunk.
///
/// `positions`, `indices` and `normals` always have the same length, a
/// multiple of three, and `indices[i] == i`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChunkMesh {
    positions: Vec<[f32; 3]>,
    indices: Vec<u32>,
    normals: Vec<[f32; 3]>,
}

impl ChunkMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends triangles, translated by `offset`.
    ///
    /// # Arguments
    /// * `points` - Triangle vertices, three per triangle
    /// * `offset` - Translation applied to every point
    ///
    /// Normals of the new vertices are zero until [`ChunkMesh::recalculate_normals`] runs.
    pub fn push_triangles(&mut self, points: &[Point3<f32>], offset: Vector3<f32>) {
        debug_assert_eq!(points.len() % 3, 0);
        for point in points {
            self.indices.push(self.positions.len() as u32);
            self.positions.push((*point + offset).into());
            self.normals.push([0.0; 3]);
        }
    }

    /// Recomputes every vertex normal from the triangles referencing it.
    ///
    /// Each triangle adds its face normal `(b - a) × (c - a)` to its three
    /// vertices; the sums are then normalised. Vertices whose sum has zero
    /// length keep a zero normal.
    pub fn recalculate_normals(&mut self) {
        let mut sums = vec![Vector3::<f32>::zero(); self.positions.len()];

        for triangle in self.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]]
                .map(|index| Point3::from(self.positions[index as usize]));
            let face_normal = (b - a).cross(c - a);
            for &index in triangle {
                sums[index as usize] += face_normal;
            }
        }

        self.normals = sums
            .into_iter()
            .map(|sum| {
                if sum.magnitude2() > 0.0 {
                    sum.normalize().into()
                } else {
                    [0.0; 3]
                }
            })
            .collect();
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Triangle indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Vertex normals.
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Interleaved vertices for upload.
    pub fn vertices(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(&position, &normal)| MeshVertex::new(position.into(), normal.into()))
            .collect()
    }

    /// The interleaved vertex buffer as raw bytes.
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.vertices()).to_vec()
    }

    /// The index buffer as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Lays every triangulation table entry out along x, entry `code`
    /// translated by `(code, 0, 0)`.
    ///
    /// Useful to eyeball the whole table in a model viewer.
    pub fn table_preview() -> Self {
        let mut mesh = ChunkMesh::new();
        for code in 0..TABLE_SIZE {
            let points: Vec<Point3<f32>> = corner_table::local_points(code as u8).collect();
            mesh.push_triangles(&points, Vector3::new(code as f32, 0.0, 0.0));
        }
        mesh.recalculate_normals();
        mesh
    }
}
