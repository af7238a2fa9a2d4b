//! Cell indexing - integer grid coordinates at one hierarchy level.
//!
//! Cells are identified by their grid coordinates at their own level.
//! Level 0 = finest detail (smallest cells), higher levels are coarser, and
//! each level doubles the cell size of the one below it:
//!
//! ```text
//! resolution(level) = base_resolution * 2^level
//! ```
//!
//! Parent/child relationships are computed on demand via coordinate math;
//! no explicit tree nodes are kept. All mappings use floor division so
//! negative coordinates behave the same way as positive ones.

use std::fmt::Debug;
use std::hash::Hash;

use glam::{IVec2, IVec3};
use smallvec::SmallVec;

use crate::space::{Point, Scalar};

/// Children of one cell, in octant order.
pub type Children<C> = SmallVec<[C; 8]>;

/// Integer grid coordinate identifying a cell at one level.
pub trait Cell: Copy + Debug + Eq + Hash + Send + Sync + 'static {
  /// Number of axes.
  const DIM: usize;

  /// Number of children per cell (`2^DIM`).
  const CHILD_COUNT: u8;

  /// Get child cell (finer detail: level - 1).
  ///
  /// Saturates at the `i32` bounds, the same range `get_cell` clamps to.
  ///
  /// Octant bits select the +1 offset per axis:
  /// - bit 0: X offset (0 or 1)
  /// - bit 1: Y offset (0 or 1)
  /// - bit 2: Z offset (0 or 1, 3D only)
  fn child(self, octant: u8) -> Self;

  /// Get parent cell (coarser: level + 1).
  fn parent(self) -> Self;

  /// Ancestor `generations` levels up (`parent` applied repeatedly).
  fn ancestor(self, generations: u32) -> Self;

  /// Per-axis extent `max - min` of an inclusive cell rectangle.
  fn span(min: Self, max: Self) -> Self;

  /// Number of cells in the inclusive rectangle `[min, max]`.
  fn count_in(min: Self, max: Self) -> u64;

  /// Visit every cell of the inclusive rectangle `[min, max]`, X fastest.
  fn for_each_in(min: Self, max: Self, f: impl FnMut(Self));

  fn to_vec(self) -> Vec<i32>;

  /// All `2^DIM` children in octant order.
  fn children(self) -> Children<Self> {
    (0..Self::CHILD_COUNT).map(|octant| self.child(octant)).collect()
  }
}

/// Arithmetic shift is floor division by `2^generations`.
#[inline]
fn shift_floor(value: i32, generations: u32) -> i32 {
  value >> generations.min(31)
}

#[inline]
fn child_axis(value: i32, offset: i32) -> i32 {
  value.saturating_mul(2).saturating_add(offset)
}

/// Extent of one axis, clamped so pathological bounds can't overflow.
#[inline]
fn axis_extent(min: i32, max: i32) -> i32 {
  max.saturating_sub(min)
}

#[inline]
fn axis_count(min: i32, max: i32) -> u64 {
  if max < min {
    0
  } else {
    (i64::from(max) - i64::from(min) + 1) as u64
  }
}

impl Cell for IVec2 {
  const DIM: usize = 2;
  const CHILD_COUNT: u8 = 4;

  #[inline]
  fn child(self, octant: u8) -> Self {
    let cx = (octant & 1) as i32;
    let cy = ((octant >> 1) & 1) as i32;
    IVec2::new(child_axis(self.x, cx), child_axis(self.y, cy))
  }

  #[inline]
  fn parent(self) -> Self {
    IVec2::new(self.x.div_euclid(2), self.y.div_euclid(2))
  }

  #[inline]
  fn ancestor(self, generations: u32) -> Self {
    IVec2::new(shift_floor(self.x, generations), shift_floor(self.y, generations))
  }

  #[inline]
  fn span(min: Self, max: Self) -> Self {
    IVec2::new(axis_extent(min.x, max.x), axis_extent(min.y, max.y))
  }

  fn count_in(min: Self, max: Self) -> u64 {
    axis_count(min.x, max.x).saturating_mul(axis_count(min.y, max.y))
  }

  fn for_each_in(min: Self, max: Self, mut f: impl FnMut(Self)) {
    for yi in min.y..=max.y {
      for xi in min.x..=max.x {
        f(IVec2::new(xi, yi));
      }
    }
  }

  fn to_vec(self) -> Vec<i32> {
    self.to_array().to_vec()
  }
}

impl Cell for IVec3 {
  const DIM: usize = 3;
  const CHILD_COUNT: u8 = 8;

  #[inline]
  fn child(self, octant: u8) -> Self {
    let cx = (octant & 1) as i32;
    let cy = ((octant >> 1) & 1) as i32;
    let cz = ((octant >> 2) & 1) as i32;
    IVec3::new(
      child_axis(self.x, cx),
      child_axis(self.y, cy),
      child_axis(self.z, cz),
    )
  }

  #[inline]
  fn parent(self) -> Self {
    IVec3::new(
      self.x.div_euclid(2),
      self.y.div_euclid(2),
      self.z.div_euclid(2),
    )
  }

  #[inline]
  fn ancestor(self, generations: u32) -> Self {
    IVec3::new(
      shift_floor(self.x, generations),
      shift_floor(self.y, generations),
      shift_floor(self.z, generations),
    )
  }

  #[inline]
  fn span(min: Self, max: Self) -> Self {
    IVec3::new(
      axis_extent(min.x, max.x),
      axis_extent(min.y, max.y),
      axis_extent(min.z, max.z),
    )
  }

  fn count_in(min: Self, max: Self) -> u64 {
    axis_count(min.x, max.x)
      .saturating_mul(axis_count(min.y, max.y))
      .saturating_mul(axis_count(min.z, max.z))
  }

  fn for_each_in(min: Self, max: Self, mut f: impl FnMut(Self)) {
    for zi in min.z..=max.z {
      for yi in min.y..=max.y {
        for xi in min.x..=max.x {
          f(IVec3::new(xi, yi, zi));
        }
      }
    }
  }

  fn to_vec(self) -> Vec<i32> {
    self.to_array().to_vec()
  }
}

/// World-space center of a cell: `(cell + 0.5) * resolution`.
#[inline]
pub fn cell_center<V: Point>(cell: V::Cell, resolution: V::Scalar) -> V {
  (V::from_cell(cell) + V::splat(V::Scalar::HALF)).scale(resolution)
}

/// Cell containing a world-space point: `floor(point / resolution)`.
#[inline]
pub fn get_cell<V: Point>(point: V, resolution: V::Scalar) -> V::Cell {
  point.map(|c| c / resolution).floor_to_cell()
}

/// Parent of a cell one level up.
#[inline]
pub fn parent_cell<C: Cell>(cell: C) -> C {
  cell.parent()
}

/// All children of a cell one level down, in octant order.
#[inline]
pub fn children_cells<C: Cell>(cell: C) -> Children<C> {
  cell.children()
}

/// Circumscribed radius of a cell: `|half_resolution|` over every axis.
#[inline]
pub fn cell_corner_dist<V: Point>(resolution: V::Scalar) -> V::Scalar {
  V::splat(resolution * V::Scalar::HALF).length()
}

#[cfg(test)]
#[path = "cell_test.rs"]
mod cell_test;
