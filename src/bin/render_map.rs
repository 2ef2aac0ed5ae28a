//! Render a saved map to PNG, optionally with seeker/hider spawn markers

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::error;

use region_generator::agents::{hidden_spawn, DEFAULT_SPAWN_BUDGET};
use region_generator::persistence::load_map;
use region_generator::render::{draw_marker, render_region, Viewport, DEFAULT_SIZE, HIDER, SEEKER};
use region_generator::seeds::MapSeeds;

#[derive(Parser, Debug)]
#[command(name = "render_map")]
#[command(about = "Render a saved map file to PNG")]
struct Args {
    /// Map file written by region_generator
    map: PathBuf,

    /// Output PNG (defaults to the map path with a .png extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Canvas size in pixels
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: u32,

    /// Outline navigation mesh cells
    #[arg(long)]
    draw_cells: bool,

    /// Mark a seeker spawn and a hider spawn out of its sight
    #[arg(long)]
    spawns: bool,
}

fn main() -> ExitCode {
    region_generator::init_logging();
    let args = Args::parse();

    let loaded = match load_map(&args.map) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!(path = %args.map.display(), "failed to load map: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mesh = &loaded.mesh;
    println!(
        "Loaded {} (seed {}, {} cells, generated {})",
        loaded.params.map_name(),
        loaded.seed,
        mesh.len(),
        loaded.generated_at.format("%Y-%m-%d %H:%M:%S")
    );

    let cells = args.draw_cells.then(|| mesh.cells());
    let mut img = render_region(mesh.region(), cells, args.size);

    if args.spawns {
        let seeds = MapSeeds::from_master(loaded.seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seeds.for_spawns(&loaded.params.map_name()));
        let spawns = mesh
            .random_position(&mut rng)
            .and_then(|seeker| Ok((seeker, hidden_spawn(mesh, seeker, &mut rng, DEFAULT_SPAWN_BUDGET)?)));
        match spawns {
            Ok((seeker, hider)) => {
                let view = Viewport::for_region(mesh.region(), args.size);
                draw_marker(&mut img, &view, seeker, 7, SEEKER);
                draw_marker(&mut img, &view, hider, 7, HIDER);
                println!("Seeker at ({:.1}, {:.1}), hider at ({:.1}, {:.1})", seeker.x, seeker.y, hider.x, hider.y);
            }
            Err(e) => error!("could not place spawns: {e}"),
        }
    }

    let output = args.output.unwrap_or_else(|| args.map.with_extension("png"));
    if let Err(e) = img.save(&output) {
        error!(path = %output.display(), "failed to write image: {e}");
        return ExitCode::FAILURE;
    }
    println!("Wrote {}", output.display());
    ExitCode::SUCCESS
}
