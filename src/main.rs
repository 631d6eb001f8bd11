//! # Voxel Island Command Line
//!
//! Generates an island, logs statistics and optionally writes the meshes out.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- --heightmap island.png --workers 4 --export island.json
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use serde::Serialize;

use voxel_island::{
    init_logging, ChunkMesh, GenerationConfig, HeightMap, MarkerLog, MarkerSpawn, TerrainGrid,
};

#[derive(Parser, Debug)]
#[command(version, about = "Procedural voxel island generator")]
struct Args {
    /// JSON generation config; defaults are used for missing fields
    #[arg(long)]
    config: Option<PathBuf>,
    /// Heightmap image (alpha channel); a round island is used when omitted
    #[arg(long)]
    heightmap: Option<PathBuf>,
    /// Fixed noise seed (turns random-seed mode off)
    #[arg(long)]
    seed: Option<f32>,
    /// Worker threads for chunk generation
    #[arg(long)]
    workers: Option<usize>,
    /// Regenerate the terrain this many extra times
    #[arg(long, default_value_t = 0)]
    regenerate: usize,
    /// Log one voxel: chunk_x,chunk_z,x,y,z
    #[arg(long, value_delimiter = ',')]
    inspect: Option<Vec<usize>>,
    /// Write chunk meshes and markers as JSON
    #[arg(long)]
    export: Option<PathBuf>,
    /// Write the triangulation table preview mesh as JSON
    #[arg(long)]
    table_preview: Option<PathBuf>,
}

#[derive(Serialize)]
struct ExportedChunk<'a> {
    index: (usize, usize),
    origin: [f32; 3],
    mesh: &'a ChunkMesh,
}

#[derive(Serialize)]
struct Export<'a> {
    seed: f32,
    chunks: Vec<ExportedChunk<'a>>,
    markers: &'a [MarkerSpawn],
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => GenerationConfig::load(path)?,
        None => GenerationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
        config.random_seed = false;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }

    let heightmap = match &args.heightmap {
        Some(path) => HeightMap::open(path)?,
        None => {
            let (width, depth) = config.expected_heightmap_size();
            HeightMap::radial_falloff(width, depth)
        }
    };

    let mut markers = MarkerLog::default();
    let mut grid = TerrainGrid::new(config, heightmap)?;
    grid.generate(&mut markers)?;
    for _ in 0..args.regenerate {
        grid.regenerate(&mut markers)?;
    }

    let ground = grid
        .chunks()
        .iter()
        .flat_map(|chunk| chunk.voxels())
        .filter(|(_, voxel)| voxel.voxel_type() == voxel_island::VoxelType::GROUND)
        .count();
    info!(
        "Seed {}: {} chunks, {} ground voxels, {} triangles, {} markers",
        grid.seed(),
        grid.chunks().len(),
        ground,
        grid.triangle_count(),
        markers.markers.len()
    );

    if let Some(cell) = &args.inspect {
        let &[chunk_x, chunk_z, x, y, z] = cell.as_slice() else {
            return Err(format!("--inspect takes 5 values, got {}", cell.len()).into());
        };
        grid.inspect_voxel(chunk_x, chunk_z, x, y, z)?;
    }

    if let Some(path) = &args.export {
        let export = Export {
            seed: grid.seed(),
            chunks: grid
                .chunks()
                .iter()
                .map(|chunk| ExportedChunk {
                    index: (chunk.index().x, chunk.index().z),
                    origin: chunk.origin().into(),
                    mesh: chunk.mesh(),
                })
                .collect(),
            markers: grid.marker_spawns(),
        };
        write_json(path, &export)?;
        info!("Exported terrain to {}", path.display());
    }

    if let Some(path) = &args.table_preview {
        let preview = ChunkMesh::table_preview();
        write_json(path, &preview)?;
        info!(
            "Wrote table preview ({} triangles) to {}",
            preview.triangle_count(),
            path.display()
        );
    }

    Ok(())
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<(), Box<dyn std::error::Error>> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, value)?;
    Ok(())
}
