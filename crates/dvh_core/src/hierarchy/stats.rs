//! Statistics reported by a mutating hierarchy call.

use std::fmt;

/// Counters collected while one `add_volume` / `subtract_volumes` call runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefinementStats {
  /// Level the pass started at (`None` for a no-op call).
  pub root_level: Option<i32>,
  /// Number of levels with a non-empty active set.
  pub levels_processed: usize,
  /// Cells whose centre was evaluated against the geometry.
  pub cells_visited: usize,
  /// Boundary cells whose children were queued for the next level.
  pub cells_refined: usize,
  /// Samples inserted or overwritten (sentinels included).
  pub samples_written: usize,
  /// Samples removed, directly or by cascading to stale descendants.
  pub cells_erased: usize,
  /// Wall time of the call in microseconds.
  pub elapsed_us: u64,
}

impl RefinementStats {
  /// True when the call changed nothing.
  #[inline]
  pub fn is_noop(&self) -> bool {
    self.samples_written == 0 && self.cells_erased == 0
  }

  /// Total number of map mutations performed.
  #[inline]
  pub fn total_mutations(&self) -> usize {
    self.samples_written + self.cells_erased
  }
}

impl fmt::Display for RefinementStats {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.root_level {
      Some(level) => write!(f, "root level {}", level)?,
      None => write!(f, "no roots")?,
    }
    write!(
      f,
      ", {} levels, {} visited, {} refined, {} written, {} erased in {}us",
      self.levels_processed,
      self.cells_visited,
      self.cells_refined,
      self.samples_written,
      self.cells_erased,
      self.elapsed_us
    )
  }
}
