//! Signed distance primitives.
//!
//! Every primitive answers three queries about a point:
//! - `distance_from`: distance to the surface (negative inside for signed
//!   primitives)
//! - `vector_from`: vector from the point to the nearest surface point
//! - `bounding_box`: conservative bounds of the solid (or curve)
//!
//! [`Cuboid`], [`OrientedLine`] and [`OffsetLine`] are signed. [`Line`] and
//! [`Triangle`] have no interior and always report `distance >= 0`.
//!
//! The hierarchy consumes primitives through the closed [`Geometry`] enum so
//! the per-cell distance loop dispatches with a `match` instead of a vtable.

mod cuboid;
mod line;
mod translated;
mod triangle;

pub use cuboid::Cuboid;
pub use line::{Line, OffsetLine, OrientedLine};
pub use translated::Translated;
pub use triangle::Triangle;

use crate::aabb::Aabb;
use crate::space::{Planar, Point};

/// Distance queries shared by every primitive.
pub trait Sdf<V: Point>: Send + Sync {
  /// Distance from `point` to the surface.
  fn distance_from(&self, point: V) -> V::Scalar;

  /// Vector from `point` to the nearest surface point.
  fn vector_from(&self, point: V) -> V;

  /// Bounds of the primitive in the space it is queried in.
  fn bounding_box(&self) -> Aabb<V>;

  /// Whether negative distances mean "inside".
  fn is_signed(&self) -> bool;
}

/// Closed set of primitives a hierarchy can be built from.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry<V: Point> {
  Cuboid(Cuboid<V>),
  Line(Line<V>),
  OrientedLine(OrientedLine<V>),
  OffsetLine(OffsetLine<V>),
  Triangle(Triangle<V>),
  Translated(Translated<V>),
}

impl<V: Point> Geometry<V> {
  /// Axis-aligned box of `dimensions` centred on `center`.
  pub fn cuboid_at(dimensions: V, center: V) -> Self {
    Geometry::Cuboid(Cuboid::new(dimensions)).translated(center)
  }

  pub fn line(start: V, end: V) -> Self {
    Geometry::Line(Line::new(start, end))
  }

  pub fn offset_line(start: V, end: V, offset: V::Scalar) -> Self {
    Geometry::OffsetLine(OffsetLine::new(start, end, offset))
  }

  pub fn triangle(a: V, b: V, c: V) -> Self {
    Geometry::Triangle(Triangle::new(a, b, c))
  }

  /// Move the geometry by `offset`.
  ///
  /// Nested translations collapse into one.
  #[must_use]
  pub fn translated(self, offset: V) -> Self {
    match self {
      Geometry::Translated(inner) => Geometry::Translated(inner.shifted(offset)),
      other => Geometry::Translated(Translated::new(other, offset)),
    }
  }
}

impl<V: Planar> Geometry<V> {
  pub fn oriented_line(start: V, end: V) -> Self {
    Geometry::OrientedLine(OrientedLine::new(start, end))
  }
}

macro_rules! dispatch {
  ($self:expr, $g:ident => $body:expr) => {
    match $self {
      Geometry::Cuboid($g) => $body,
      Geometry::Line($g) => $body,
      Geometry::OrientedLine($g) => $body,
      Geometry::OffsetLine($g) => $body,
      Geometry::Triangle($g) => $body,
      Geometry::Translated($g) => $body,
    }
  };
}

impl<V: Point> Sdf<V> for Geometry<V> {
  #[inline]
  fn distance_from(&self, point: V) -> V::Scalar {
    dispatch!(self, g => g.distance_from(point))
  }

  #[inline]
  fn vector_from(&self, point: V) -> V {
    dispatch!(self, g => g.vector_from(point))
  }

  fn bounding_box(&self) -> Aabb<V> {
    dispatch!(self, g => g.bounding_box())
  }

  fn is_signed(&self) -> bool {
    dispatch!(self, g => g.is_signed())
  }
}

impl<V: Point> From<Cuboid<V>> for Geometry<V> {
  fn from(cuboid: Cuboid<V>) -> Self {
    Geometry::Cuboid(cuboid)
  }
}

impl<V: Point> From<Line<V>> for Geometry<V> {
  fn from(line: Line<V>) -> Self {
    Geometry::Line(line)
  }
}

impl<V: Point> From<OrientedLine<V>> for Geometry<V> {
  fn from(line: OrientedLine<V>) -> Self {
    Geometry::OrientedLine(line)
  }
}

impl<V: Point> From<OffsetLine<V>> for Geometry<V> {
  fn from(line: OffsetLine<V>) -> Self {
    Geometry::OffsetLine(line)
  }
}

impl<V: Point> From<Triangle<V>> for Geometry<V> {
  fn from(triangle: Triangle<V>) -> Self {
    Geometry::Triangle(triangle)
  }
}

impl<V: Point> From<Translated<V>> for Geometry<V> {
  fn from(translated: Translated<V>) -> Self {
    Geometry::Translated(translated)
  }
}

/// Union of the bounding boxes of every geometry (empty for an empty slice).
pub fn bounds_of<V: Point>(geometries: &[Geometry<V>]) -> Aabb<V> {
  geometries
    .iter()
    .fold(Aabb::empty(), |bounds, geometry| bounds.union(geometry.bounding_box()))
}
