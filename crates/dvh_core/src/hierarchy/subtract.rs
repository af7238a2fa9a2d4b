//! Difference pass: carving geometry out of existing samples.

use std::collections::HashMap;

use web_time::Instant;

use super::prune::PruneSet;
use super::{evaluate_cells, DistanceVolumeHierarchy, RefinementStats, Sample, LOWEST_LEVEL};
use crate::cell::{cell_corner_dist, Cell};
use crate::sdf::{Geometry, Sdf};
use crate::space::{Point, Scalar};

/// State a queued cell inherits from its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Inherited {
  DoesNotMatter,
  /// An ancestor held an interior sample before this pass.
  PreviouslyInside,
}

/// Signed distance to the nearest of `geometries` (the minimum).
pub(crate) fn nearest_distance<V: Point>(geometries: &[Geometry<V>], point: V) -> V::Scalar {
  geometries
    .iter()
    .map(|geometry| geometry.distance_from(point))
    .fold(V::Scalar::INFINITY, Scalar::min)
}

impl<V: Point> DistanceVolumeHierarchy<V> {
  /// Remove `geometries` from the solid.
  ///
  /// Walks down from the roots of earlier `add_volume` calls; geometry
  /// outside every existing root has no effect. An empty slice is a no-op.
  #[tracing::instrument(skip_all, name = "dvh::subtract_volumes", fields(geometries = geometries.len()))]
  pub fn subtract_volumes(&mut self, geometries: &[Geometry<V>]) -> RefinementStats {
    let start = Instant::now();
    let mut stats = RefinementStats::default();

    if geometries.is_empty() {
      tracing::debug!("subtract_volumes: no geometry, nothing to do");
      return stats;
    }
    let Some(top_level) = self.root_level() else {
      tracing::debug!("subtract_volumes: hierarchy has no roots, nothing to do");
      return stats;
    };
    stats.root_level = Some(top_level);

    let mut prune = PruneSet::default();
    let mut to_visit: HashMap<V::Cell, Inherited> = HashMap::new();

    for level in (LOWEST_LEVEL..=top_level).rev() {
      stats.cells_erased += self.prune_level(level, &prune);

      let mut cells = std::mem::take(&mut to_visit);
      if let Some(roots) = self.roots.get(&level) {
        for &root in roots {
          cells.entry(root).or_insert(Inherited::DoesNotMatter);
        }
      }
      if cells.is_empty() {
        continue;
      }

      stats.levels_processed += 1;
      to_visit = self.subtract_level(level, cells, geometries, &mut prune, &mut stats);
    }

    self.drop_empty_levels();
    stats.elapsed_us = start.elapsed().as_micros() as u64;
    tracing::debug!(top_level, samples = self.sample_count(), %stats, "subtract_volumes complete");
    stats
  }

  fn subtract_level(
    &mut self,
    level: i32,
    cells: HashMap<V::Cell, Inherited>,
    geometries: &[Geometry<V>],
    prune: &mut PruneSet<V::Cell>,
    stats: &mut RefinementStats,
  ) -> HashMap<V::Cell, Inherited> {
    let resolution = self.resolution(level);
    let corner = cell_corner_dist::<V>(resolution);

    let active = cells.len();
    let (cells, states): (Vec<V::Cell>, Vec<Inherited>) = cells.into_iter().unzip();
    let evaluated = evaluate_cells::<V, _>(&cells, resolution, self.config.parallel_threshold, |point| {
      nearest_distance(geometries, point)
    });

    let field = self.levels.entry(level).or_default();
    let mut next = HashMap::new();

    for ((cell, inherited), (point, distance)) in cells.into_iter().zip(states).zip(evaluated) {
      stats.cells_visited += 1;

      if distance < -corner {
        // Swallowed whole by the subtracted solid.
        if field.remove(&cell).is_some() {
          stats.cells_erased += 1;
        }
        prune.push(level, cell);
      } else if distance <= corner {
        let existing = field.get(&cell).copied();
        // Nothing to carve out of empty space.
        if existing.is_some_and(|sample| sample.is_exterior()) {
          continue;
        }
        let state = if existing.is_some_and(|sample| sample.is_interior()) {
          Inherited::PreviouslyInside
        } else {
          inherited
        };
        let needs_sentinel = existing.is_some() || state == Inherited::PreviouslyInside;
        if needs_sentinel && !existing.is_some_and(|sample| sample.is_pending()) {
          field.insert(cell, Sample::not_fully_inside());
          stats.samples_written += 1;
        }
        if level > LOWEST_LEVEL {
          for child in cell.children() {
            next.insert(child, state);
          }
          stats.cells_refined += 1;
        }
      } else if distance > corner && inherited == Inherited::PreviouslyInside {
        // Still solid, now bounded by the new wall.
        let carved = -distance;
        if field.get(&cell).map_or(true, |sample| sample.distance < carved) {
          field.insert(cell, Sample::new(point, carved));
          stats.samples_written += 1;
        }
      }
    }

    tracing::trace!(level, active, next = next.len(), "subtract_volumes level");
    next
  }
}

#[cfg(test)]
#[path = "subtract_test.rs"]
mod subtract_test;
