//! Per-cell distance sample.

use crate::space::{Point, Scalar};

/// Distance sample stored for one cell at one level.
///
/// `point` is the world-space cell centre the distance was evaluated at.
/// A sample whose distance is `+inf` is the pending sentinel: the cell
/// straddles a boundary and its children carry the detail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample<V: Point> {
  pub point: V,
  pub distance: V::Scalar,
}

impl<V: Point> Sample<V> {
  #[inline]
  pub fn new(point: V, distance: V::Scalar) -> Self {
    Self { point, distance }
  }

  /// The pending sentinel (every component `+inf`).
  #[inline]
  pub fn not_fully_inside() -> Self {
    Self {
      point: V::splat(V::Scalar::INFINITY),
      distance: V::Scalar::INFINITY,
    }
  }

  /// Still waiting on finer levels.
  #[inline]
  pub fn is_pending(&self) -> bool {
    !self.distance.is_finite()
  }

  /// Confidently inside the solid.
  #[inline]
  pub fn is_interior(&self) -> bool {
    self.distance.is_finite() && self.distance < V::Scalar::ZERO
  }

  /// Confidently outside the solid.
  #[inline]
  pub fn is_exterior(&self) -> bool {
    self.distance.is_finite() && self.distance >= V::Scalar::ZERO
  }
}
