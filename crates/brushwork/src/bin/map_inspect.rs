//! # map_inspect
//!
//! Loads a brush map, prints what the pipeline produced and optionally
//! dumps the visual meshes as OBJ.
//!
//! ```text
//! map_inspect maps/test.vmf --config build.toml --obj test.obj
//! RUST_LOG=debug map_inspect maps/test.vmf --strict
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use brushwork::{write_obj, BuildConfig, Summary, WorldBuilder};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "map_inspect", version, about = "Inspect the meshes built from a brush map")]
struct Args {
    /// Map file to load
    map: PathBuf,

    /// Build configuration (TOML); defaults apply to missing keys
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write merged visual meshes to this OBJ file
    #[arg(long)]
    obj: Option<PathBuf>,

    /// Fail on structurally damaged map text instead of loading what parses
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Diagnostics to list in the summary
    #[arg(long, default_value_t = Summary::DEFAULT_MAX_DIAGNOSTICS)]
    max_diagnostics: usize,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(&Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => BuildConfig::from_toml_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => BuildConfig::default(),
    };
    config.strict |= args.strict;

    let builder = WorldBuilder::new(config).context("invalid build configuration")?;
    let world = builder
        .load_file(&args.map)
        .with_context(|| format!("loading {}", args.map.display()))?;

    println!(
        "{}",
        Summary::new(&world).with_max_diagnostics(args.max_diagnostics)
    );

    if let Some(path) = &args.obj {
        let file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_obj(&world.visual_meshes, BufWriter::new(file))
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("wrote {} meshes to {}", world.visual_meshes.len(), path.display());
    }

    if !world.stats.is_complete() {
        tracing::warn!("{} solids skipped", world.stats.solids_skipped());
    }
    Ok(())
}
