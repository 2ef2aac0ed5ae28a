use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{error, info};

use region_generator::config::BatchConfig;
use region_generator::generators::{GenerationParams, MapKind};
use region_generator::navmesh::NavMesh;
use region_generator::persistence::{map_path, save_map};
use region_generator::render::export_map_png;
use region_generator::seeds::MapSeeds;

#[derive(Parser, Debug)]
#[command(name = "region_generator")]
#[command(about = "Generate maze, dungeon and spaghetti maps with navigation meshes")]
struct Args {
    /// Batch configuration (JSON); the stock batch is used if not specified
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory (overrides the config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Master seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Also write a PNG for every map
    #[arg(long)]
    render: bool,

    /// Outline navigation mesh cells in PNGs
    #[arg(long)]
    draw_cells: bool,

    /// Only generate maps of this kind (maze, dungeon, spaghetti)
    #[arg(long)]
    only: Option<MapKind>,

    /// Write the effective batch configuration to this path and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

/// Summary of one finished map, for the progress report.
struct MapReport {
    name: String,
    cells: usize,
    links: usize,
    area: f64,
}

fn run_job(
    params: &GenerationParams,
    seeds: &MapSeeds,
    output_dir: &Path,
    render: bool,
    draw_cells: bool,
) -> Result<MapReport, String> {
    let name = params.map_name();
    let seed = seeds.for_map(&name);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let region = params.generate(&mut rng).map_err(|e| format!("{name}: {e}"))?;
    let mesh = NavMesh::new(region);

    let path = map_path(output_dir, params);
    save_map(&mesh, seed, params, &path).map_err(|e| format!("{name}: {e}"))?;

    if render {
        let png = path.with_extension("png");
        export_map_png(&mesh, &png, draw_cells).map_err(|e| format!("{name}: {e}"))?;
    }

    Ok(MapReport {
        name,
        cells: mesh.len(),
        links: mesh.neighbor_edge_count(),
        area: mesh.region().area(),
    })
}

fn main() -> ExitCode {
    region_generator::init_logging();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match BatchConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!(path = %path.display(), "failed to load config: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => BatchConfig::default(),
    };
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    config.render |= args.render;
    config.draw_cells |= args.draw_cells;
    if let Some(kind) = args.only {
        config.retain_kind(kind);
    }

    if let Err(e) = config.validate() {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    if let Some(path) = args.write_config {
        if let Err(e) = config.save(&path) {
            error!(path = %path.display(), "failed to write config: {e}");
            return ExitCode::FAILURE;
        }
        println!("Wrote batch configuration to {}", path.display());
        return ExitCode::SUCCESS;
    }

    if let Err(e) = fs::create_dir_all(&config.output_dir) {
        error!(dir = %config.output_dir.display(), "failed to create output directory: {e}");
        return ExitCode::FAILURE;
    }

    // Initialize seeds
    let seeds = args.seed.map(MapSeeds::from_master).unwrap_or_default();
    println!("Generating {} maps with seed: {}", config.jobs.len(), seeds.master);
    println!("Output directory: {}", config.output_dir.display());

    let start = Instant::now();
    let results: Vec<Result<MapReport, String>> = config
        .jobs
        .par_iter()
        .map(|params| {
            info!(map = %params.map_name(), "generating");
            run_job(params, &seeds, &config.output_dir, config.render, config.draw_cells)
        })
        .collect();

    let mut failures = 0;
    for result in results {
        match result {
            Ok(report) => println!(
                "  {:<14} {:>6} cells {:>6} links  area {:.0}",
                report.name, report.cells, report.links, report.area
            ),
            Err(e) => {
                failures += 1;
                error!("{e}");
            }
        }
    }

    println!("Done in {:.1}s ({} failed)", start.elapsed().as_secs_f64(), failures);
    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
