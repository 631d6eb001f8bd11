//! # Voxel Terrain Core
//!
//! Everything between a heightmap and a mesh.
//!
//! ## Architecture
//!
//! * **Noise field**: deterministic height and density sampling
//! * **Heightmap**: the alpha map that shapes the island
//! * **Corner table**: the 256-entry triangulation table
//! * **Voxel**: one classified cell and its table triangles
//! * **Chunk**: a block of voxels and the mesh stitched from them
//! * **Grid**: a rectangle of chunks cut from one master heightmap
//! * **Tasks**: chunk generation on the worker pool
//! * **Markers**: the hook through which generation places things on the terrain
//!
//! ## Data Flow
//!
//! 1. The grid validates the master heightmap and cuts one tile per chunk
//! 2. Each chunk samples the noise field and classifies its cell corners
//! 3. Occupancy codes select triangles from the corner table
//! 4. Triangles are stitched into the chunk mesh; markers are collected
//! 5. Once every chunk is built, the grid swaps them in and dispatches the markers
//!
//! ## Thread Safety
//!
//! Chunks are built without shared mutable state. Worker tasks share only the
//! read-only master heightmap and their own copy of the noise field.

pub mod chunk;
pub mod corner_table;
pub mod grid;
pub mod heightmap;
pub mod markers;
pub mod noise_field;
pub mod tasks;
pub mod voxel;
