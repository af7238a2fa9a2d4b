use crate::aabb::Aabb;
use crate::space::{Planar, Point, Scalar};

use super::Sdf;

/// Line segment from `start` to `end`. Unsigned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line<V: Point> {
  pub start: V,
  pub end: V,
}

impl<V: Point> Line<V> {
  pub fn new(start: V, end: V) -> Self {
    Self { start, end }
  }
}

impl<V: Point> Sdf<V> for Line<V> {
  #[inline]
  fn distance_from(&self, point: V) -> V::Scalar {
    self.vector_from(point).length()
  }

  #[inline]
  fn vector_from(&self, point: V) -> V {
    point.segment_vector(self.start, self.end)
  }

  fn bounding_box(&self) -> Aabb<V> {
    Aabb::from_points([self.start, self.end])
  }

  fn is_signed(&self) -> bool {
    false
  }
}

/// Directed segment whose distance is negative on one side.
///
/// The sign follows `cross(point - start, end - start)`: walking from
/// `start` to `end`, the left-hand side is inside. Points on the supporting
/// line report a non-negative distance. Only constructible for planar
/// points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedLine<V: Point> {
  line: Line<V>,
}

impl<V: Planar> OrientedLine<V> {
  pub fn new(start: V, end: V) -> Self {
    Self {
      line: Line::new(start, end),
    }
  }
}

impl<V: Point> OrientedLine<V> {
  #[inline]
  pub fn start(&self) -> V {
    self.line.start
  }

  #[inline]
  pub fn end(&self) -> V {
    self.line.end
  }
}

impl<V: Point> Sdf<V> for OrientedLine<V> {
  #[inline]
  fn distance_from(&self, point: V) -> V::Scalar {
    let distance = self.line.distance_from(point);
    let side = (point - self.line.start).half_plane_sign(self.line.end - self.line.start);
    distance * side + distance * (V::Scalar::ONE - side.abs())
  }

  #[inline]
  fn vector_from(&self, point: V) -> V {
    self.line.vector_from(point)
  }

  fn bounding_box(&self) -> Aabb<V> {
    self.line.bounding_box()
  }

  fn is_signed(&self) -> bool {
    true
  }
}

/// Capsule: every point within `offset` of the segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetLine<V: Point> {
  pub start: V,
  pub end: V,
  pub offset: V::Scalar,
}

impl<V: Point> OffsetLine<V> {
  pub fn new(start: V, end: V, offset: V::Scalar) -> Self {
    Self { start, end, offset }
  }

  #[inline]
  fn line(&self) -> Line<V> {
    Line::new(self.start, self.end)
  }
}

impl<V: Point> Sdf<V> for OffsetLine<V> {
  #[inline]
  fn distance_from(&self, point: V) -> V::Scalar {
    self.line().distance_from(point) - self.offset
  }

  /// Points on the segment itself have no unique nearest surface point and
  /// report the zero vector.
  fn vector_from(&self, point: V) -> V {
    let to_segment = self.line().vector_from(point);
    let distance = to_segment.length() - self.offset;
    to_segment.normalize_or_zero().scale(distance)
  }

  fn bounding_box(&self) -> Aabb<V> {
    self.line().bounding_box().grown(self.offset)
  }

  fn is_signed(&self) -> bool {
    true
  }
}
