use crate::aabb::Aabb;
use crate::space::Point;

use super::Sdf;

/// Triangle `(a, b, c)`. Unsigned.
///
/// In 3D the closest point is found with the usual face/edge/vertex region
/// test. In 2D the triangle is a filled region: points inside it are at
/// distance zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle<V: Point> {
  pub a: V,
  pub b: V,
  pub c: V,
}

impl<V: Point> Triangle<V> {
  pub fn new(a: V, b: V, c: V) -> Self {
    Self { a, b, c }
  }
}

impl<V: Point> Sdf<V> for Triangle<V> {
  #[inline]
  fn distance_from(&self, point: V) -> V::Scalar {
    self.vector_from(point).length()
  }

  #[inline]
  fn vector_from(&self, point: V) -> V {
    point.triangle_vector(self.a, self.b, self.c)
  }

  fn bounding_box(&self) -> Aabb<V> {
    Aabb::from_points([self.a, self.b, self.c])
  }

  fn is_signed(&self) -> bool {
    false
  }
}
