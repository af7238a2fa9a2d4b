//! Error types for hierarchy construction and validation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HierarchyError {
  #[error("base resolution must be finite and positive, got {0}")]
  InvalidResolution(f64),

  #[error("max level must be non-negative, got {0}")]
  InvalidMaxLevel(i32),

  #[error("expected a {expected}-component coordinate, got {found} components")]
  MixedDimensions { expected: usize, found: usize },

  /// A finite sample sits closer to the surface than its own cell's
  /// circumscribed radius.
  #[error("unsound sample at level {level}, cell {cell:?}: |{distance}| <= corner distance {corner}")]
  UnsoundSample {
    level: i32,
    cell: Vec<i32>,
    distance: f64,
    corner: f64,
  },
}
