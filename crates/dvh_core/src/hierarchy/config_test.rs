use super::*;

// =========================================================================
// Resolution math
// =========================================================================

/// Level 0 is the base resolution and is always defined.
#[test]
fn test_resolution_at_level_0() {
  let config = HierarchyConfig::new(0.25f32);
  assert_eq!(config.resolution(0), 0.25, "Level 0 resolution should be the base");
}

/// Resolution doubles with each level.
#[test]
fn test_resolution_doubles_per_level() {
  let config = HierarchyConfig::new(1.5f64);

  assert_eq!(config.resolution(1), 3.0, "Level 1 should be 2x level 0");
  assert_eq!(config.resolution(2), 6.0, "Level 2 should be 4x level 0");
  assert_eq!(config.resolution(5), 48.0, "Level 5 should be 32x level 0");
}

// =========================================================================
// Defaults and builders
// =========================================================================

#[test]
fn test_default_config() {
  let config = HierarchyConfig::<f32>::default();
  assert_eq!(config.base_resolution, 1.0);
  assert_eq!(config.max_level, i32::MAX, "levels are unbounded by default");
  assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
  assert!(config.validate().is_ok());
}

#[test]
fn test_builders() {
  let config = HierarchyConfig::new(2.0f64)
    .with_max_level(6)
    .with_parallel_threshold(1);
  assert_eq!(config.base_resolution, 2.0);
  assert_eq!(config.max_level, 6);
  assert_eq!(config.parallel_threshold, 1);
}

// =========================================================================
// Validation
// =========================================================================

#[test]
fn test_validate_rejects_bad_resolution() {
  for resolution in [0.0, -1.0, f64::NAN, f64::INFINITY] {
    let result = HierarchyConfig::new(resolution).validate();
    assert!(
      matches!(result, Err(HierarchyError::InvalidResolution(_))),
      "resolution {} should be rejected, got {:?}",
      resolution,
      result
    );
  }
}

#[test]
fn test_validate_rejects_negative_max_level() {
  let result = HierarchyConfig::new(1.0f32).with_max_level(-1).validate();
  assert_eq!(result, Err(HierarchyError::InvalidMaxLevel(-1)));

  assert!(HierarchyConfig::new(1.0f32).with_max_level(0).validate().is_ok());
}
