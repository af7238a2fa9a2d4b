//! Root selection for a refinement pass.
//!
//! A pass starts from the coarsest level at which the bounds of its geometry
//! still map onto a strictly smaller cell rectangle than the level below
//! did. Going coarser than that only adds empty space around the geometry.

use std::collections::{BTreeMap, HashSet};

use crate::aabb::Aabb;
use crate::cell::{get_cell, Cell};
use crate::space::{Point, Scalar};

use super::config::HierarchyConfig;
use super::LOWEST_LEVEL;

/// Largest level-0 cell coordinate a pass may start from.
///
/// Root cells whose level-0 descendants stay within this bound keep every
/// child inside the `i32` range while the pass refines down to level 0.
const MAX_BASE_CELL: f64 = (1u32 << 30) as f64;

/// Inclusive cell rectangle at the root level of one pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RootRect<C> {
  pub level: i32,
  pub min: C,
  pub max: C,
}

impl<C: Cell> RootRect<C> {
  pub fn cells(&self) -> Vec<C> {
    let mut cells = Vec::with_capacity(C::count_in(self.min, self.max).min(1 << 16) as usize);
    C::for_each_in(self.min, self.max, |cell| cells.push(cell));
    cells
  }
}

/// Pick the root level and covering rectangle for `bounds`.
///
/// Returns `None` for empty or non-finite bounds, for a base resolution
/// that is not positive and finite, and for bounds whose level-0 cells fall
/// outside the supported coordinate range.
pub(crate) fn select_roots<V: Point>(
  bounds: &Aabb<V>,
  config: &HierarchyConfig<V::Scalar>,
) -> Option<RootRect<V::Cell>> {
  if bounds.is_empty() || !bounds.min_point.is_finite() || !bounds.max_point.is_finite() {
    return None;
  }

  let base_resolution = config.resolution(LOWEST_LEVEL);
  if !(base_resolution > V::Scalar::ZERO && base_resolution.is_finite()) {
    tracing::warn!(?base_resolution, "select_roots: base resolution must be positive and finite");
    return None;
  }
  if !within_cell_range(bounds, base_resolution) {
    tracing::warn!(?bounds, ?base_resolution, "select_roots: bounds exceed the cell coordinate range");
    return None;
  }

  let rect_at = |level: i32| {
    let resolution = config.resolution(level);
    RootRect {
      level,
      min: get_cell(bounds.min_point, resolution),
      max: get_cell(bounds.max_point, resolution),
    }
  };

  let mut best = rect_at(LOWEST_LEVEL);
  let mut count = V::Cell::count_in(best.min, best.max);

  let mut level = LOWEST_LEVEL;
  while level < config.max_level {
    level += 1;
    let candidate = rect_at(level);
    let candidate_count = V::Cell::count_in(candidate.min, candidate.max);
    if candidate_count >= count {
      break;
    }
    best = candidate;
    count = candidate_count;
  }

  Some(best)
}

fn within_cell_range<V: Point>(bounds: &Aabb<V>, base_resolution: V::Scalar) -> bool {
  let resolution = base_resolution.to_f64();
  bounds
    .min_point
    .to_f64_vec()
    .into_iter()
    .chain(bounds.max_point.to_f64_vec())
    .all(|c| (c / resolution).floor().abs() <= MAX_BASE_CELL)
}

/// Ancestors at `level` of every root placed at a finer level.
///
/// A cell in this set encloses structure from an earlier pass.
pub(crate) fn enclosed_roots<C: Cell>(roots: &BTreeMap<i32, HashSet<C>>, level: i32) -> HashSet<C> {
  roots
    .range(..level)
    .flat_map(|(&root_level, cells)| {
      let generations = (level - root_level) as u32;
      cells.iter().map(move |cell| cell.ancestor(generations))
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use glam::{DVec2, DVec3, IVec2, IVec3, Vec2};

  use super::*;

  fn config(base_resolution: f32) -> HierarchyConfig<f32> {
    HierarchyConfig::new(base_resolution)
  }

  #[test]
  fn test_box_around_origin_stops_at_four_cells() {
    let bounds = Aabb::new(Vec2::splat(-4.0), Vec2::splat(4.0));
    let rect = select_roots(&bounds, &config(1.0)).unwrap();

    assert_eq!(rect.level, 3, "9x9 -> 5x5 -> 3x3 -> 2x2, then no more savings");
    assert_eq!(rect.min, IVec2::new(-1, -1));
    assert_eq!(rect.max, IVec2::new(0, 0));
    assert_eq!(rect.cells().len(), 4);
  }

  #[test]
  fn test_off_origin_box_reaches_single_cell() {
    let bounds = Aabb::new(Vec2::new(8.0, -2.0), Vec2::new(12.0, 2.0));
    let rect = select_roots(&bounds, &config(1.0)).unwrap();

    assert_eq!(rect.level, 3);
    assert_eq!(rect.cells(), vec![IVec2::new(1, -1), IVec2::new(1, 0)]);
  }

  #[test]
  fn test_max_level_caps_root_level() {
    let bounds = Aabb::new(Vec2::splat(-4.0), Vec2::splat(4.0));
    let rect = select_roots(&bounds, &config(1.0).with_max_level(1)).unwrap();
    assert_eq!(rect.level, 1);
    assert_eq!(rect.min, IVec2::new(-2, -2));
    assert_eq!(rect.max, IVec2::new(2, 2));

    let rect = select_roots(&bounds, &config(1.0).with_max_level(0)).unwrap();
    assert_eq!(rect.level, 0);
  }

  #[test]
  fn test_empty_or_infinite_bounds_have_no_roots() {
    assert_eq!(select_roots(&Aabb::<Vec2>::empty(), &config(1.0)), None);

    let infinite = Aabb::new(DVec3::splat(-f64::INFINITY), DVec3::ZERO);
    assert_eq!(select_roots(&infinite, &HierarchyConfig::new(1.0)), None);
  }

  #[test]
  fn test_degenerate_resolution_has_no_roots() {
    let bounds = Aabb::new(Vec2::splat(-4.0), Vec2::splat(4.0));

    assert_eq!(select_roots(&bounds, &config(0.0)), None);
    assert_eq!(select_roots(&bounds, &config(-1.0)), None, "would invert the rectangle");
    assert_eq!(select_roots(&bounds, &config(f32::NAN)), None);
    assert_eq!(select_roots(&bounds, &config(f32::INFINITY)), None);
  }

  #[test]
  fn test_bounds_beyond_cell_range_have_no_roots() {
    let far = Aabb::new(DVec2::splat(-1e10), DVec2::splat(1e10));
    assert_eq!(select_roots(&far, &HierarchyConfig::new(1.0)), None);

    let tiny_cells = Aabb::new(Vec2::splat(-4.0), Vec2::splat(4.0));
    assert_eq!(select_roots(&tiny_cells, &config(1e-9)), None, "4e9 cells per side");
  }

  #[test]
  fn test_bounds_near_cell_range_limit() {
    let bounds = Aabb::new(DVec2::splat(-1e9), DVec2::splat(1e9));
    let rect = select_roots(&bounds, &HierarchyConfig::new(1.0)).unwrap();

    assert_eq!(rect.level, 30);
    assert_eq!(rect.min, IVec2::new(-1, -1));
    assert_eq!(rect.max, IVec2::new(0, 0));
  }

  #[test]
  fn test_enclosed_roots() {
    let mut roots: BTreeMap<i32, HashSet<IVec3>> = BTreeMap::new();
    roots.entry(1).or_default().insert(IVec3::new(-3, 5, 0));
    roots.entry(4).or_default().insert(IVec3::new(7, 7, 7));

    let enclosed = enclosed_roots(&roots, 3);
    assert_eq!(enclosed.len(), 1, "roots at or above the level are ignored");
    assert!(enclosed.contains(&IVec3::new(-1, 1, 0)));
  }
}
