//! HierarchyConfig - resolution and refinement settings for a hierarchy.

use crate::error::HierarchyError;
use crate::space::Scalar;

/// Active sets smaller than this are classified on the calling thread.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Configuration for level resolutions and refinement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HierarchyConfig<S: Scalar> {
  /// Cell size at level 0 (the finest level) in world units.
  pub base_resolution: S,

  /// Coarsest level a root may be placed at (inclusive).
  pub max_level: i32,

  /// Minimum active-set size before a level is classified with rayon.
  pub parallel_threshold: usize,
}

impl<S: Scalar> HierarchyConfig<S> {
  pub fn new(base_resolution: S) -> Self {
    Self {
      base_resolution,
      ..Self::default()
    }
  }

  pub fn with_max_level(mut self, max_level: i32) -> Self {
    self.max_level = max_level;
    self
  }

  pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
    self.parallel_threshold = parallel_threshold;
    self
  }

  /// Cell size at `level`.
  /// resolution = base_resolution * 2^level
  #[inline]
  pub fn resolution(&self, level: i32) -> S {
    self.base_resolution * S::TWO.powi(level)
  }

  /// Reject resolutions that can't index cells and negative level caps.
  pub fn validate(&self) -> Result<(), HierarchyError> {
    if !self.base_resolution.is_finite() || self.base_resolution <= S::ZERO {
      return Err(HierarchyError::InvalidResolution(self.base_resolution.to_f64()));
    }
    if self.max_level < 0 {
      return Err(HierarchyError::InvalidMaxLevel(self.max_level));
    }
    Ok(())
  }
}

impl<S: Scalar> Default for HierarchyConfig<S> {
  fn default() -> Self {
    Self {
      base_resolution: S::ONE,
      max_level: i32::MAX,
      parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
