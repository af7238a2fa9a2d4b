//! DistanceVolumeHierarchy - sparse multi-resolution distance samples.
//!
//! Samples live in one sparse map per level, keyed by the cell's grid
//! coordinate at that level. Level 0 is the finest; each level up doubles
//! the cell size. A pass (`add_volume` / `subtract_volumes`) walks from its
//! root level down to level 0 one level at a time:
//!
//! ```text
//! root level   [ ][#][ ]        # = boundary cell -> sentinel, children queued
//!                 |
//! level - 1    [-][#][#][+]     - / + = confident interior / exterior sample
//!                    |  |
//!     ...          (only boundary cells descend)
//! ```
//!
//! Every finite sample is farther from the surface than its own cell's
//! circumscribed radius, so no surface passes through a cell that was not
//! refined.
//!
//! # Concurrency
//!
//! Mutating passes take `&mut self`. Within a level, cell classification is
//! independent per cell and runs on rayon once the active set is large
//! enough; writes back into the level maps happen on the calling thread
//! before the next level's active set is built.

mod add;
mod config;
mod prune;
mod roots;
mod sample;
mod stats;
mod subtract;

#[cfg(test)]
mod test_utils;

use std::collections::{BTreeMap, HashMap, HashSet};

use rayon::prelude::*;

pub use config::{HierarchyConfig, DEFAULT_PARALLEL_THRESHOLD};
pub use sample::Sample;
pub use stats::RefinementStats;

use crate::cell::{cell_center, cell_corner_dist, Cell};
use crate::error::HierarchyError;
use crate::space::{Point, Scalar};
use prune::PruneSet;

/// Finest level ever produced.
pub const LOWEST_LEVEL: i32 = 0;

/// Samples of one level, keyed by cell.
pub type SparseVolumeMap<V> = HashMap<<V as Point>::Cell, Sample<V>>;

/// Per-level storage, ordered by level (iterate `.rev()` for coarse-to-fine).
pub type LevelMap<T> = BTreeMap<i32, T>;

pub type CellSet<C> = HashSet<C>;

/// Sparse adaptive signed distance volume over `V` (2D or 3D, f32 or f64).
#[derive(Clone, Debug)]
pub struct DistanceVolumeHierarchy<V: Point> {
  config: HierarchyConfig<V::Scalar>,
  levels: LevelMap<SparseVolumeMap<V>>,
  roots: LevelMap<CellSet<V::Cell>>,
}

impl<V: Point> DistanceVolumeHierarchy<V> {
  /// Create an empty hierarchy.
  ///
  /// Pass `i32::MAX` as `max_level` to leave root levels unbounded.
  pub fn new(base_resolution: V::Scalar, max_level: i32) -> Self {
    Self::with_config(HierarchyConfig::new(base_resolution).with_max_level(max_level))
  }

  pub fn with_config(config: HierarchyConfig<V::Scalar>) -> Self {
    Self {
      config,
      levels: LevelMap::new(),
      roots: LevelMap::new(),
    }
  }

  /// Like [`Self::with_config`], rejecting configurations that can't index
  /// cells.
  pub fn try_new(config: HierarchyConfig<V::Scalar>) -> Result<Self, HierarchyError> {
    config.validate()?;
    Ok(Self::with_config(config))
  }

  /// Drop every sample and root.
  pub fn clear(&mut self) {
    self.levels.clear();
    self.roots.clear();
  }

  /// Samples per level, finest first.
  ///
  /// Use [`Self::coarse_to_fine`] to walk down from the root level.
  #[inline]
  pub fn levels(&self) -> &LevelMap<SparseVolumeMap<V>> {
    &self.levels
  }

  /// Levels from coarsest to finest.
  pub fn coarse_to_fine(&self) -> impl Iterator<Item = (i32, &SparseVolumeMap<V>)> {
    self.levels.iter().rev().map(|(&level, field)| (level, field))
  }

  #[inline]
  pub fn roots(&self) -> &LevelMap<CellSet<V::Cell>> {
    &self.roots
  }

  /// Coarsest level any pass started from.
  pub fn root_level(&self) -> Option<i32> {
    self.roots.keys().next_back().copied()
  }

  #[inline]
  pub fn config(&self) -> &HierarchyConfig<V::Scalar> {
    &self.config
  }

  #[inline]
  pub fn base_resolution(&self) -> V::Scalar {
    self.config.base_resolution
  }

  #[inline]
  pub fn max_level(&self) -> i32 {
    self.config.max_level
  }

  /// Cell size at `level`. Defined for every level, including 0.
  #[inline]
  pub fn resolution(&self, level: i32) -> V::Scalar {
    self.config.resolution(level)
  }

  pub fn sample(&self, level: i32, cell: V::Cell) -> Option<&Sample<V>> {
    self.levels.get(&level).and_then(|field| field.get(&cell))
  }

  /// Total number of stored samples (sentinels included).
  pub fn sample_count(&self) -> usize {
    self.levels.values().map(HashMap::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.levels.values().all(HashMap::is_empty)
  }

  /// Verify that every finite sample lies farther from the surface than its
  /// cell's circumscribed radius.
  pub fn check_invariants(&self) -> Result<(), HierarchyError> {
    for (&level, field) in &self.levels {
      let corner = cell_corner_dist::<V>(self.resolution(level));
      for (cell, sample) in field {
        if !sample.is_pending() && sample.distance.abs() <= corner {
          return Err(HierarchyError::UnsoundSample {
            level,
            cell: cell.to_vec(),
            distance: sample.distance.to_f64(),
            corner: corner.to_f64(),
          });
        }
      }
    }
    Ok(())
  }

  /// Apply pending cascading removals to `level`.
  fn prune_level(&mut self, level: i32, prune: &PruneSet<V::Cell>) -> usize {
    match self.levels.get_mut(&level) {
      Some(field) => prune.prune(level, field),
      None => 0,
    }
  }

  /// Drop level maps left empty by a pass.
  fn drop_empty_levels(&mut self) {
    self.levels.retain(|_, field| !field.is_empty());
  }
}

/// Evaluate `distance` at the centre of every cell, preserving order.
///
/// Large active sets are split across rayon's pool.
fn evaluate_cells<V, F>(
  cells: &[V::Cell],
  resolution: V::Scalar,
  parallel_threshold: usize,
  distance: F,
) -> Vec<(V, V::Scalar)>
where
  V: Point,
  F: Fn(V) -> V::Scalar + Sync,
{
  let evaluate = |cell: &V::Cell| {
    let center = cell_center::<V>(*cell, resolution);
    (center, distance(center))
  };

  if cells.len() >= parallel_threshold {
    cells.par_iter().map(evaluate).collect()
  } else {
    cells.iter().map(evaluate).collect()
  }
}
