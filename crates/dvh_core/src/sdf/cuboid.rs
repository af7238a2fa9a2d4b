use crate::aabb::Aabb;
use crate::space::{Point, Scalar};

use super::Sdf;

/// Axis-aligned box centred on the origin.
///
/// SDF: `|max(q, 0)| + min(max_component(q), 0)` with `q = |p| - dimensions / 2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cuboid<V: Point> {
  /// Full edge lengths per axis.
  pub dimensions: V,
}

impl<V: Point> Cuboid<V> {
  pub fn new(dimensions: V) -> Self {
    Self { dimensions }
  }

  #[inline]
  pub fn half_dimensions(&self) -> V {
    self.dimensions.scale(V::Scalar::HALF)
  }

  /// Per-axis offset of `|point|` from the positive corner.
  #[inline]
  fn corner_to_point(&self, point: V) -> V {
    point.abs() - self.half_dimensions()
  }
}

impl<V: Point> Sdf<V> for Cuboid<V> {
  #[inline]
  fn distance_from(&self, point: V) -> V::Scalar {
    let q = self.corner_to_point(point);
    let outside = q.max(V::ZERO).length();
    let inside = q.max_element().min(V::Scalar::ZERO);
    outside + inside
  }

  fn vector_from(&self, point: V) -> V {
    let q = self.corner_to_point(point);
    let nearest_face = q.max_element();

    // Inside, only the axis whose face is closest moves the point.
    let inside = nearest_face < V::Scalar::ZERO;
    let mut picked = false;
    let inner = q.map(|c| {
      if inside && !picked && c == nearest_face {
        picked = true;
        c
      } else {
        V::Scalar::ZERO
      }
    });
    let outer = q.max(V::ZERO);

    // Points on an axis plane reflect into the positive octant.
    let octant = point.map(|c| if c < V::Scalar::ZERO { -V::Scalar::ONE } else { V::Scalar::ONE });
    (-(outer + inner)).mul_componentwise(octant)
  }

  fn bounding_box(&self) -> Aabb<V> {
    let half = self.half_dimensions();
    Aabb::from_points([-half, half])
  }

  fn is_signed(&self) -> bool {
    true
  }
}
