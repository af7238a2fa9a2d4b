use crate::aabb::Aabb;
use crate::space::Point;

use super::{Geometry, Sdf};

/// Geometry shifted by a constant translation.
///
/// Queries move the point into geometry space (`point - translation`);
/// bounds move back out.
#[derive(Clone, Debug, PartialEq)]
pub struct Translated<V: Point> {
  pub geometry: Box<Geometry<V>>,
  pub translation: V,
}

impl<V: Point> Translated<V> {
  pub fn new(geometry: Geometry<V>, translation: V) -> Self {
    Self {
      geometry: Box::new(geometry),
      translation,
    }
  }

  #[must_use]
  pub(super) fn shifted(self, offset: V) -> Self {
    Self {
      geometry: self.geometry,
      translation: self.translation + offset,
    }
  }

  #[inline]
  fn to_geometry_space(&self, point: V) -> V {
    point - self.translation
  }
}

impl<V: Point> Sdf<V> for Translated<V> {
  #[inline]
  fn distance_from(&self, point: V) -> V::Scalar {
    self.geometry.distance_from(self.to_geometry_space(point))
  }

  #[inline]
  fn vector_from(&self, point: V) -> V {
    self.geometry.vector_from(self.to_geometry_space(point))
  }

  fn bounding_box(&self) -> Aabb<V> {
    self.geometry.bounding_box().translated(self.translation)
  }

  fn is_signed(&self) -> bool {
    self.geometry.is_signed()
  }
}
