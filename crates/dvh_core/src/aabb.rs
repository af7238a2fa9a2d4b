//! Axis-aligned bounding box, generic over dimension and precision.

use crate::space::{Point, Scalar};

/// Axis-aligned bounding box.
///
/// Starts out empty (`min = +inf`, `max = -inf`) so that the first
/// [`Aabb::expand`] snaps both corners onto the expanded point. Once
/// populated, `min_point <= max_point` on every axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb<V: Point> {
  /// Minimum corner (inclusive).
  pub min_point: V,
  /// Maximum corner (inclusive).
  pub max_point: V,
}

impl<V: Point> Aabb<V> {
  /// The empty box, identity element of [`Aabb::union`].
  pub fn empty() -> Self {
    Self {
      min_point: V::splat(V::Scalar::INFINITY),
      max_point: V::splat(-V::Scalar::INFINITY),
    }
  }

  /// Create a new AABB from min and max corners.
  ///
  /// # Panics
  /// Debug-asserts that min <= max on all axes.
  pub fn new(min_point: V, max_point: V) -> Self {
    debug_assert!(
      (max_point - min_point).min_element() >= V::Scalar::ZERO,
      "AABB min must be <= max on all axes"
    );
    Self { min_point, max_point }
  }

  /// Smallest box containing every point.
  pub fn from_points(points: impl IntoIterator<Item = V>) -> Self {
    points.into_iter().fold(Self::empty(), Self::expand)
  }

  /// Grow the box to contain `point`.
  #[inline]
  #[must_use]
  pub fn expand(self, point: V) -> Self {
    Self {
      min_point: self.min_point.min(point),
      max_point: self.max_point.max(point),
    }
  }

  /// Smallest box containing both boxes.
  #[inline]
  #[must_use]
  pub fn union(self, other: Self) -> Self {
    Self {
      min_point: self.min_point.min(other.min_point),
      max_point: self.max_point.max(other.max_point),
    }
  }

  /// True until at least one point has been added.
  #[inline]
  pub fn is_empty(&self) -> bool {
    (self.max_point - self.min_point).min_element() < V::Scalar::ZERO
  }

  /// Check if this AABB contains a point (boundary inclusive).
  #[inline]
  pub fn contains_point(&self, point: V) -> bool {
    (point - self.min_point).min_element() >= V::Scalar::ZERO
      && (self.max_point - point).min_element() >= V::Scalar::ZERO
  }

  /// Get the size of the AABB (max - min).
  #[inline]
  pub fn size(&self) -> V {
    self.max_point - self.min_point
  }

  /// Get the center of the AABB.
  #[inline]
  pub fn center(&self) -> V {
    (self.min_point + self.max_point).scale(V::Scalar::HALF)
  }

  /// Box pushed outwards by `radius` on every side.
  #[inline]
  #[must_use]
  pub fn grown(self, radius: V::Scalar) -> Self {
    Self {
      min_point: self.min_point - V::splat(radius),
      max_point: self.max_point + V::splat(radius),
    }
  }

  /// Box moved by `offset`.
  #[inline]
  #[must_use]
  pub fn translated(self, offset: V) -> Self {
    Self {
      min_point: self.min_point + offset,
      max_point: self.max_point + offset,
    }
  }
}

impl<V: Point> Default for Aabb<V> {
  fn default() -> Self {
    Self::empty()
  }
}
