//! Shared helpers for hierarchy tests.

use std::collections::HashMap;

use glam::{IVec2, Vec2};

use super::{DistanceVolumeHierarchy, Sample};
use crate::cell::Cell;
use crate::sdf::Geometry;
use crate::space::Point;

pub type Hierarchy2 = DistanceVolumeHierarchy<Vec2>;

/// Unbounded 2D hierarchy with unit base resolution.
pub fn unit_hierarchy() -> Hierarchy2 {
  DistanceVolumeHierarchy::new(1.0, i32::MAX)
}

pub fn square(size: f32, center: Vec2) -> Geometry<Vec2> {
  Geometry::cuboid_at(Vec2::splat(size), center)
}

/// Panic with the offending sample if the soundness bound is broken.
pub fn assert_sound<V: Point>(hierarchy: &DistanceVolumeHierarchy<V>) {
  if let Err(err) = hierarchy.check_invariants() {
    panic!("hierarchy is unsound: {}", err);
  }
}

/// Every sample as a flat `(level, cell) -> sample` map.
pub fn flatten<V: Point>(hierarchy: &DistanceVolumeHierarchy<V>) -> HashMap<(i32, V::Cell), Sample<V>> {
  hierarchy
    .levels()
    .iter()
    .flat_map(|(&level, field)| field.iter().map(move |(&cell, &sample)| ((level, cell), sample)))
    .collect()
}

/// Samples (any level) whose cell lies inside `ancestor` at `ancestor_level`.
pub fn samples_below(hierarchy: &Hierarchy2, ancestor_level: i32, ancestor: IVec2) -> usize {
  hierarchy
    .levels()
    .range(..ancestor_level)
    .map(|(&level, field)| {
      field
        .keys()
        .filter(|cell| cell.ancestor((ancestor_level - level) as u32) == ancestor)
        .count()
    })
    .sum()
}

/// Samples whose cell centre lies on the given side of `x = 0`.
pub fn samples_with_positive_x(hierarchy: &Hierarchy2, positive: bool) -> HashMap<(i32, IVec2), Sample<Vec2>> {
  flatten(hierarchy)
    .into_iter()
    .filter(|((level, cell), _)| {
      let center_x = (cell.x as f32 + 0.5) * hierarchy.resolution(*level);
      (center_x > 0.0) == positive
    })
    .collect()
}
