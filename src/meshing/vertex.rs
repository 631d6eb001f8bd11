//! Vertex data structures for uploading chunk meshes.
//!
//! `ChunkMesh` keeps positions and normals in separate arrays while it is being
//! built. Renderers usually want one interleaved buffer, which is what
//! [`MeshVertex`] describes.

use cgmath::{Point3, Vector3};
use serde::Serialize;

/// One interleaved mesh vertex.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
///
/// Total size: 24 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Chunk-local position
    pub position: [f32; 3],
    /// Unit vertex normal (or zero for a degenerate vertex)
    pub normal: [f32; 3],
}

impl MeshVertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `position` - Chunk-local position of the vertex
    /// * `normal` - Vertex normal
    ///
    /// # Returns
    /// A new `MeshVertex` instance
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        MeshVertex {
            position: position.into(),
            normal: normal.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 24);

        let vertex = MeshVertex::new(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 1.0, 0.0));
        let bytes: &[u8] = bytemuck::bytes_of(&vertex);
        assert_eq!(bytes.len(), 24);
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
        assert_eq!(&bytes[16..20], &1.0f32.to_ne_bytes());
    }
}
