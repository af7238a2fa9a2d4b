//! Cascading removal of stale descendants.
//!
//! When a pass erases a cell, or classifies it as fully interior, every
//! sample below it at finer levels is stale. Instead of enumerating the
//! `2^DIM` children level after level, the pass records the removed cell
//! and each finer level drops the samples whose ancestor was recorded.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Bound::{Excluded, Unbounded};

use crate::cell::Cell;

#[derive(Debug)]
pub(crate) struct PruneSet<C: Cell> {
  removed: BTreeMap<i32, HashSet<C>>,
}

impl<C: Cell> Default for PruneSet<C> {
  fn default() -> Self {
    Self {
      removed: BTreeMap::new(),
    }
  }
}

impl<C: Cell> PruneSet<C> {
  /// Mark everything strictly below `cell` for removal.
  pub fn push(&mut self, level: i32, cell: C) {
    self.removed.entry(level).or_default().insert(cell);
  }

  pub fn is_empty(&self) -> bool {
    self.removed.is_empty()
  }

  /// True when an ancestor of `cell` (at a coarser level) was pushed.
  pub fn covers(&self, level: i32, cell: C) -> bool {
    self
      .removed
      .range((Excluded(level), Unbounded))
      .any(|(&removed_level, cells)| cells.contains(&cell.ancestor((removed_level - level) as u32)))
  }

  /// Drop every entry of `field` (the map for `level`) below a pushed cell.
  ///
  /// Returns the number of entries removed.
  pub fn prune<S>(&self, level: i32, field: &mut HashMap<C, S>) -> usize {
    if self.removed.is_empty() || field.is_empty() {
      return 0;
    }
    let before = field.len();
    field.retain(|cell, _| !self.covers(level, *cell));
    before - field.len()
  }
}
