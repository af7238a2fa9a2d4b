//! Scene file parsing for the hierarchy runner.

use anyhow::{Context, Result};
use dvh_core::glam::{DVec2, DVec3};
use dvh_core::{Geometry, HierarchyConfig, Point, Scalar};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Root of a scene file.
#[derive(Debug, Deserialize)]
pub struct Scene {
	/// Hierarchy construction settings.
	pub hierarchy: HierarchySettings,
	/// Edits applied in file order.
	pub operations: Vec<Operation>,
}

/// The `[hierarchy]` table.
#[derive(Debug, Deserialize)]
pub struct HierarchySettings {
	pub dimensions: Dimensions,
	/// Cell size at level 0.
	#[serde(default = "default_base_resolution")]
	pub base_resolution: f64,
	/// Coarsest root level (unbounded when omitted).
	pub max_level: Option<i32>,
	pub parallel_threshold: Option<usize>,
}

fn default_base_resolution() -> f64 {
	1.0
}

/// Number of axes a scene is evaluated in. Only 2 and 3 deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "usize")]
pub enum Dimensions {
	Two,
	Three,
}

impl TryFrom<usize> for Dimensions {
	type Error = String;

	fn try_from(value: usize) -> std::result::Result<Self, Self::Error> {
		match value {
			2 => Ok(Dimensions::Two),
			3 => Ok(Dimensions::Three),
			other => Err(format!("dimensions must be 2 or 3, got {}", other)),
		}
	}
}

impl fmt::Display for Dimensions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Dimensions::Two => write!(f, "2"),
			Dimensions::Three => write!(f, "3"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
	Add,
	Subtract,
}

impl OperationKind {
	pub fn as_str(self) -> &'static str {
		match self {
			OperationKind::Add => "add",
			OperationKind::Subtract => "subtract",
		}
	}
}

/// One `[[operations]]` entry.
#[derive(Debug, Deserialize)]
pub struct Operation {
	pub kind: OperationKind,
	pub geometries: Vec<Shape>,
}

/// A primitive plus an optional translation.
#[derive(Debug, Deserialize)]
pub struct Shape {
	#[serde(flatten)]
	pub kind: ShapeKind,
	pub translation: Option<Vec<f64>>,
}

/// Primitive description, tagged by `type`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
	Box {
		dimensions: Vec<f64>,
		center: Option<Vec<f64>>,
	},
	Line {
		start: Vec<f64>,
		end: Vec<f64>,
	},
	OrientedLine {
		start: Vec<f64>,
		end: Vec<f64>,
	},
	OffsetLine {
		start: Vec<f64>,
		end: Vec<f64>,
		offset: f64,
	},
	Triangle {
		a: Vec<f64>,
		b: Vec<f64>,
		c: Vec<f64>,
	},
}

/// Point types a scene can be evaluated in.
pub trait SceneSpace: Point {
	/// Build an oriented line, if this space has half-planes.
	fn oriented_line(start: Self, end: Self) -> Result<Geometry<Self>>;
}

impl SceneSpace for DVec2 {
	fn oriented_line(start: Self, end: Self) -> Result<Geometry<Self>> {
		Ok(Geometry::oriented_line(start, end))
	}
}

impl SceneSpace for DVec3 {
	fn oriented_line(_start: Self, _end: Self) -> Result<Geometry<Self>> {
		anyhow::bail!("oriented_line is only defined for 2D scenes")
	}
}

impl Scene {
	/// Load a scene from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read scene file: {}", path.display()))?;
		Self::parse(&content).with_context(|| format!("Invalid scene: {}", path.display()))
	}

	/// Parse and validate scene TOML.
	pub fn parse(content: &str) -> Result<Self> {
		let scene: Scene = toml::from_str(content).context("Failed to parse scene TOML")?;

		if scene.operations.is_empty() {
			anyhow::bail!("Scene must have at least one operation");
		}

		Ok(scene)
	}
}

impl HierarchySettings {
	pub fn config<S: Scalar>(&self) -> HierarchyConfig<S> {
		let mut config = HierarchyConfig::new(S::from_f64(self.base_resolution));
		if let Some(max_level) = self.max_level {
			config = config.with_max_level(max_level);
		}
		if let Some(threshold) = self.parallel_threshold {
			config = config.with_parallel_threshold(threshold);
		}
		config
	}
}

impl Operation {
	/// Convert every shape of this operation into geometry.
	pub fn geometries<V: SceneSpace>(&self) -> Result<Vec<Geometry<V>>> {
		self.geometries
			.iter()
			.enumerate()
			.map(|(index, shape)| {
				shape
					.to_geometry()
					.with_context(|| format!("geometries[{}]", index))
			})
			.collect()
	}
}

fn point<V: Point>(values: &[f64], field: &str) -> Result<V> {
	V::from_f64_slice(values).with_context(|| format!("field `{}`", field))
}

impl Shape {
	pub fn to_geometry<V: SceneSpace>(&self) -> Result<Geometry<V>> {
		let geometry = match &self.kind {
			ShapeKind::Box { dimensions, center } => {
				let center = match center {
					Some(center) => point(center, "center")?,
					None => V::ZERO,
				};
				Geometry::cuboid_at(point(dimensions, "dimensions")?, center)
			}
			ShapeKind::Line { start, end } => Geometry::line(point(start, "start")?, point(end, "end")?),
			ShapeKind::OrientedLine { start, end } => {
				V::oriented_line(point(start, "start")?, point(end, "end")?)?
			}
			ShapeKind::OffsetLine { start, end, offset } => Geometry::offset_line(
				point(start, "start")?,
				point(end, "end")?,
				V::Scalar::from_f64(*offset),
			),
			ShapeKind::Triangle { a, b, c } => {
				Geometry::triangle(point(a, "a")?, point(b, "b")?, point(c, "c")?)
			}
		};

		match &self.translation {
			Some(translation) => Ok(geometry.translated(point(translation, "translation")?)),
			None => Ok(geometry),
		}
	}
}
