//! # Chunk Iteration Module
//!
//! Walks the voxels of a chunk in storage order, pairing each with its cell.

use cgmath::Point3;

use crate::voxels::voxel::Voxel;

use super::Chunk;

/// An iterator over every voxel of a chunk and its cell coordinates.
///
/// Cells come out in generation order: `x` outermost, then `y`, then `z`.
pub struct ChunkVoxelIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Position in the voxel vector
    offset: usize,
    local_x: usize,
    local_y: usize,
    local_z: usize,
}

impl<'a> ChunkVoxelIterator<'a> {
    /// Creates a new iterator positioned at cell `(0, 0, 0)`.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkVoxelIterator {
            chunk_ref,
            offset: 0,
            local_x: 0,
            local_y: 0,
            local_z: 0,
        }
    }
}

impl<'a> Iterator for ChunkVoxelIterator<'a> {
    type Item = (Point3<usize>, &'a Voxel);

    fn next(&mut self) -> Option<Self::Item> {
        let voxel = self.chunk_ref.voxels.get(self.offset)?;
        let cell = Point3::new(self.local_x, self.local_y, self.local_z);

        self.offset += 1;
        self.local_z += 1;
        if self.local_z == self.chunk_ref.size {
            self.local_z = 0;
            self.local_y += 1;
            if self.local_y == self.chunk_ref.height {
                self.local_y = 0;
                self.local_x += 1;
            }
        }

        Some((cell, voxel))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.chunk_ref.voxels.len() - self.offset;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChunkVoxelIterator<'_> {}
