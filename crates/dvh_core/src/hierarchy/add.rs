//! Union pass: adaptive top-down refinement of new geometry.

use std::ops::Bound::{Excluded, Unbounded};

use web_time::Instant;

use super::prune::PruneSet;
use super::roots::{enclosed_roots, select_roots};
use super::{evaluate_cells, DistanceVolumeHierarchy, RefinementStats, Sample, LOWEST_LEVEL};
use crate::cell::{cell_corner_dist, Cell};
use crate::sdf::{bounds_of, Geometry, Sdf};
use crate::space::{Point, Scalar};

/// Whether a candidate distance should replace the current pick.
///
/// The smaller magnitude wins; on a tie the non-negative reading wins.
#[inline]
pub(crate) fn should_replace_with<S: Scalar>(prev_abs: S, new_abs: S, new_distance: S) -> bool {
  let equal = prev_abs.almost_equal(new_abs);
  (!equal && new_abs < prev_abs) || (equal && new_distance >= S::ZERO)
}

/// Distance to the closest surface among `geometries`.
///
/// Approximates the union: the candidate with the smallest magnitude is
/// picked rather than the minimum signed value.
pub(crate) fn union_distance<V: Point>(geometries: &[Geometry<V>], point: V) -> V::Scalar {
  let mut candidates = geometries.iter().map(|geometry| geometry.distance_from(point));
  let Some(first) = candidates.next() else {
    return V::Scalar::INFINITY;
  };
  candidates.fold(first, |best, distance| {
    if should_replace_with(best.abs(), distance.abs(), distance) {
      distance
    } else {
      best
    }
  })
}

impl<V: Point> DistanceVolumeHierarchy<V> {
  /// Union `geometries` into the hierarchy.
  ///
  /// All geometries of one call share a single set of roots. An empty slice
  /// is a no-op.
  #[tracing::instrument(skip_all, name = "dvh::add_volume", fields(geometries = geometries.len()))]
  pub fn add_volume(&mut self, geometries: &[Geometry<V>]) -> RefinementStats {
    let start = Instant::now();
    let mut stats = RefinementStats::default();

    if geometries.is_empty() {
      tracing::debug!("add_volume: no geometry, nothing to do");
      return stats;
    }

    let bounds = bounds_of(geometries);
    let Some(rect) = select_roots(&bounds, &self.config) else {
      tracing::debug!(?bounds, "add_volume: no root cells for these bounds, nothing to do");
      return stats;
    };

    let root_level = rect.level;
    let root_cells = rect.cells();
    stats.root_level = Some(root_level);
    self.roots.entry(root_level).or_default().extend(root_cells.iter().copied());

    let mut active: Vec<V::Cell> = Vec::with_capacity(root_cells.len());
    for root in root_cells {
      if !self.settle_enclosing_samples(root_level, root, &mut stats) {
        active.push(root);
      }
    }

    let mut prune = PruneSet::default();
    for level in (LOWEST_LEVEL..=root_level).rev() {
      stats.cells_erased += self.prune_level(level, &prune);
      if active.is_empty() {
        if prune.is_empty() {
          break;
        }
        continue;
      }

      stats.levels_processed += 1;
      active = self.add_level(level, &active, geometries, &mut prune, &mut stats);
    }

    self.drop_empty_levels();
    stats.elapsed_us = start.elapsed().as_micros() as u64;
    tracing::debug!(root_level, samples = self.sample_count(), %stats, "add_volume complete");
    stats
  }

  /// Reconcile coarser samples enclosing a new root.
  ///
  /// Enclosing exterior samples no longer hold once the root adds solid
  /// beneath them and are erased. Returns true when an enclosing interior
  /// sample already covers the root.
  fn settle_enclosing_samples(&mut self, level: i32, root: V::Cell, stats: &mut RefinementStats) -> bool {
    let mut covered = false;
    for (&coarser, field) in self.levels.range_mut((Excluded(level), Unbounded)) {
      let ancestor = root.ancestor((coarser - level) as u32);
      match field.get(&ancestor) {
        Some(sample) if sample.is_interior() => covered = true,
        Some(sample) if sample.is_exterior() => {
          field.remove(&ancestor);
          stats.cells_erased += 1;
        }
        _ => {}
      }
    }
    covered
  }

  /// Classify one level's active cells and write the results back.
  ///
  /// Returns the next (finer) level's active set.
  fn add_level(
    &mut self,
    level: i32,
    cells: &[V::Cell],
    geometries: &[Geometry<V>],
    prune: &mut PruneSet<V::Cell>,
    stats: &mut RefinementStats,
  ) -> Vec<V::Cell> {
    let resolution = self.resolution(level);
    let corner = cell_corner_dist::<V>(resolution);
    let evaluated = evaluate_cells::<V, _>(cells, resolution, self.config.parallel_threshold, |point| {
      union_distance(geometries, point)
    });
    let enclosed = enclosed_roots(&self.roots, level);

    let field = self.levels.entry(level).or_default();
    let mut next = Vec::new();

    for (&cell, (point, distance)) in cells.iter().zip(evaluated) {
      stats.cells_visited += 1;
      let existing = field.get(&cell).copied();

      if distance.abs() <= corner {
        // Boundary: an interior sample already covers the whole cell.
        if existing.is_some_and(|sample| sample.is_interior()) {
          continue;
        }
        if !existing.is_some_and(|sample| sample.is_pending()) {
          field.insert(cell, Sample::not_fully_inside());
          stats.samples_written += 1;
        }
        if level > LOWEST_LEVEL {
          next.extend(cell.children());
          stats.cells_refined += 1;
        }
      } else if distance < -corner {
        let replace = match existing {
          None => true,
          Some(sample) => !sample.is_interior() || sample.distance.abs() < distance.abs(),
        };
        if replace {
          field.insert(cell, Sample::new(point, distance));
          prune.push(level, cell);
          stats.samples_written += 1;
        }
      } else if distance > corner && existing.is_none() && !enclosed.contains(&cell) {
        field.insert(cell, Sample::new(point, distance));
        stats.samples_written += 1;
      }
    }

    tracing::trace!(level, active = cells.len(), next = next.len(), "add_volume level");
    next
  }
}

#[cfg(test)]
#[path = "add_test.rs"]
mod add_test;
