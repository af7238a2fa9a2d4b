//! Distance volume hierarchy scene runner.
//!
//! Loads a TOML scene, applies its add/subtract operations in order and
//! prints how each level of the resulting hierarchy is populated.
//!
//! ```text
//! dvh --scene scenes/carved_box.toml --dump samples.json
//! ```

mod report;
mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use dvh_core::glam::{DVec2, DVec3};
use dvh_core::DistanceVolumeHierarchy;
use std::path::PathBuf;

use report::Dump;
use scene::{Dimensions, OperationKind, Scene, SceneSpace};

/// Build a distance volume hierarchy from a scene file.
#[derive(Parser, Debug)]
#[command(name = "dvh")]
#[command(about = "Builds sparse adaptive distance volumes from CSG scenes")]
struct Args {
	/// Path to the scene TOML file.
	#[arg(short, long)]
	scene: PathBuf,

	/// Write every sample to this JSON file.
	#[arg(short, long)]
	dump: Option<PathBuf>,

	/// Log refinement summaries (same as RUST_LOG=debug).
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> Result<()> {
	let args = Args::parse();

	let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
	if args.verbose {
		logger.filter_level(log::LevelFilter::Debug);
	}
	logger.init();

	log::info!("Loading scene from: {}", args.scene.display());
	let scene = Scene::load(&args.scene)?;

	println!(
		"Running {} operations in {}D at base resolution {}",
		scene.operations.len(),
		scene.hierarchy.dimensions,
		scene.hierarchy.base_resolution
	);

	match scene.hierarchy.dimensions {
		Dimensions::Two => run::<DVec2>(&scene, &args),
		Dimensions::Three => run::<DVec3>(&scene, &args),
	}
}

fn run<V: SceneSpace>(scene: &Scene, args: &Args) -> Result<()> {
	let mut hierarchy = DistanceVolumeHierarchy::<V>::try_new(scene.hierarchy.config())
		.context("Invalid [hierarchy] settings")?;

	for (index, operation) in scene.operations.iter().enumerate() {
		let geometries = operation
			.geometries::<V>()
			.with_context(|| format!("operations[{}]", index))?;

		let stats = match operation.kind {
			OperationKind::Add => hierarchy.add_volume(&geometries),
			OperationKind::Subtract => hierarchy.subtract_volumes(&geometries),
		};
		println!(
			"  [{}] {} x{}: {}",
			index,
			operation.kind.as_str(),
			geometries.len(),
			stats
		);
	}

	report::print_levels(&hierarchy);

	if let Some(path) = &args.dump {
		Dump::from_hierarchy(&hierarchy).write(path)?;
		println!("\nDone! Samples written to: {}", path.display());
	}

	Ok(())
}
