//! Per-level summaries and JSON sample dumps.

use anyhow::{Context, Result};
use dvh_core::{Cell, DistanceVolumeHierarchy, Point, Scalar};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Sample counts for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSummary {
	pub level: i32,
	pub pending: usize,
	pub interior: usize,
	pub exterior: usize,
}

/// Count sample kinds per level, coarsest first.
pub fn summarize<V: Point>(hierarchy: &DistanceVolumeHierarchy<V>) -> Vec<LevelSummary> {
	hierarchy
		.coarse_to_fine()
		.map(|(level, field)| {
			let mut summary = LevelSummary {
				level,
				pending: 0,
				interior: 0,
				exterior: 0,
			};
			for sample in field.values() {
				if sample.is_pending() {
					summary.pending += 1;
				} else if sample.is_interior() {
					summary.interior += 1;
				} else {
					summary.exterior += 1;
				}
			}
			summary
		})
		.collect()
}

pub fn print_levels<V: Point>(hierarchy: &DistanceVolumeHierarchy<V>) {
	println!(
		"\n{:>5}  {:>12}  {:>9}  {:>9}  {:>9}",
		"level", "resolution", "pending", "interior", "exterior"
	);
	for summary in summarize(hierarchy) {
		println!(
			"{:>5}  {:>12.4}  {:>9}  {:>9}  {:>9}",
			summary.level,
			hierarchy.resolution(summary.level).to_f64(),
			summary.pending,
			summary.interior,
			summary.exterior
		);
	}
	println!("total samples: {}", hierarchy.sample_count());
}

/// Serialized form of a whole hierarchy.
#[derive(Debug, Serialize)]
pub struct Dump {
	pub dimensions: usize,
	pub base_resolution: f64,
	pub root_level: Option<i32>,
	pub roots: Vec<RootEntry>,
	pub samples: Vec<SampleEntry>,
}

#[derive(Debug, Serialize)]
pub struct RootEntry {
	pub level: i32,
	pub cells: Vec<Vec<i32>>,
}

/// One sample. Pending samples carry no point or distance (JSON has no infinity).
#[derive(Debug, Serialize)]
pub struct SampleEntry {
	pub level: i32,
	pub cell: Vec<i32>,
	pub pending: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub point: Option<Vec<f64>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub distance: Option<f64>,
}

impl Dump {
	/// Snapshot every sample, coarse to fine with cells in sorted order.
	pub fn from_hierarchy<V: Point>(hierarchy: &DistanceVolumeHierarchy<V>) -> Self {
		let mut samples = Vec::with_capacity(hierarchy.sample_count());
		for (level, field) in hierarchy.coarse_to_fine() {
			let mut entries: Vec<SampleEntry> = field
				.iter()
				.map(|(cell, sample)| {
					let pending = sample.is_pending();
					SampleEntry {
						level,
						cell: cell.to_vec(),
						pending,
						point: (!pending).then(|| sample.point.to_f64_vec()),
						distance: (!pending).then(|| sample.distance.to_f64()),
					}
				})
				.collect();
			entries.sort_by(|a, b| a.cell.cmp(&b.cell));
			samples.extend(entries);
		}

		let roots = hierarchy
			.roots()
			.iter()
			.rev()
			.map(|(&level, cells)| {
				let mut cells: Vec<Vec<i32>> = cells.iter().map(|cell| cell.to_vec()).collect();
				cells.sort();
				RootEntry { level, cells }
			})
			.collect();

		Self {
			dimensions: V::DIM,
			base_resolution: hierarchy.base_resolution().to_f64(),
			root_level: hierarchy.root_level(),
			roots,
			samples,
		}
	}

	pub fn write(&self, path: &Path) -> Result<()> {
		let file = File::create(path)
			.with_context(|| format!("Failed to create dump file: {}", path.display()))?;
		serde_json::to_writer_pretty(BufWriter::new(file), self)
			.with_context(|| format!("Failed to write: {}", path.display()))?;
		Ok(())
	}
}
