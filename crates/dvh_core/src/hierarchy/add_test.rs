use glam::{IVec2, Vec2};

use super::*;
use crate::hierarchy::test_utils::*;

// =========================================================================
// Batch 1: Distance selection
// =========================================================================

#[test]
fn test_should_replace_with_prefers_smaller_magnitude() {
  assert!(should_replace_with(3.0f32, 1.0, -1.0));
  assert!(!should_replace_with(1.0f32, 3.0, 3.0));
}

#[test]
fn test_should_replace_with_ties_prefer_exterior() {
  assert!(should_replace_with(2.0f64, 2.0, 2.0), "tie with non-negative candidate replaces");
  assert!(!should_replace_with(2.0f64, 2.0, -2.0), "tie with negative candidate keeps");
}

#[test]
fn test_union_distance_picks_closest_surface() {
  let geometries = vec![square(2.0, Vec2::new(-3.0, 0.0)), square(2.0, Vec2::new(3.0, 0.0))];

  assert_eq!(union_distance(&geometries, Vec2::new(-3.0, 0.0)), -1.0);
  assert_eq!(union_distance(&geometries, Vec2::new(3.5, 0.0)), -0.5);
  assert_eq!(union_distance(&geometries, Vec2::new(0.0, 0.0)), 2.0, "equidistant from both");
  assert_eq!(union_distance::<Vec2>(&[], Vec2::ZERO), f32::INFINITY);
}

// =========================================================================
// Batch 2: Single box
// =========================================================================

/// 8x8 box at the origin: roots at level 3 (4 cells of size 8).
#[test]
fn test_add_box_roots_and_sentinels() {
  let mut hierarchy = unit_hierarchy();
  let stats = hierarchy.add_volume(&[square(8.0, Vec2::ZERO)]);

  assert_eq!(stats.root_level, Some(3));
  assert_eq!(hierarchy.root_level(), Some(3));
  let roots = &hierarchy.roots()[&3];
  assert_eq!(roots.len(), 4);
  for cell in [IVec2::new(-1, -1), IVec2::new(0, -1), IVec2::new(-1, 0), IVec2::new(0, 0)] {
    assert!(roots.contains(&cell), "missing root {:?}", cell);
    let sample = hierarchy.sample(3, cell).expect("root should hold a sample");
    assert!(sample.is_pending(), "root {:?} straddles the box surface", cell);
  }
  assert_eq!(stats.levels_processed, 4, "levels 3, 2, 1, 0");
  assert!(stats.samples_written > 0);
  assert_eq!(stats.cells_erased, 0);
}

#[test]
fn test_add_box_interior_and_exterior_samples() {
  let mut hierarchy = unit_hierarchy();
  hierarchy.add_volume(&[square(8.0, Vec2::ZERO)]);

  // Level 1 cell (0, 0) spans [0, 2]^2, centre (1, 1), 3 units from every face.
  assert_eq!(
    hierarchy.sample(1, IVec2::new(0, 0)),
    Some(&Sample::new(Vec2::new(1.0, 1.0), -3.0))
  );

  // Level 0 cell (2, 0): centre (2.5, 0.5), 1.5 inside the +X face.
  let inside = hierarchy.sample(0, IVec2::new(2, 0)).expect("refined interior sample");
  assert_eq!(inside.distance, -1.5);

  // Level 0 cell (5, 0): centre (5.5, 0.5), 1.5 outside the +X face.
  let outside = hierarchy.sample(0, IVec2::new(5, 0)).expect("refined exterior sample");
  assert!(outside.is_exterior());
  assert_eq!(outside.distance, 1.5);
  assert!(outside.distance > 0.5, "farther than half a cell");

  // Level 1 cell (3, 3): centre (7, 7), clear of the box corner.
  let corner = hierarchy.sample(1, IVec2::new(3, 3)).expect("coarse exterior sample");
  assert!((corner.distance - 18.0f32.sqrt()).abs() < 1e-5);

  // The surface cell at level 0 stays pending.
  assert!(hierarchy.sample(0, IVec2::new(3, 0)).is_some_and(|s| s.is_pending()));

  assert_sound(&hierarchy);
}

#[test]
fn test_interior_cells_are_not_refined() {
  let mut hierarchy = unit_hierarchy();
  hierarchy.add_volume(&[square(8.0, Vec2::ZERO)]);

  assert!(hierarchy.sample(1, IVec2::new(0, 0)).is_some_and(|s| s.is_interior()));
  assert_eq!(samples_below(&hierarchy, 1, IVec2::new(0, 0)), 0, "nothing below an interior sample");
}

#[test]
fn test_add_empty_slice_is_noop() {
  let mut hierarchy = unit_hierarchy();
  let stats = hierarchy.add_volume(&[]);

  assert_eq!(stats, RefinementStats::default());
  assert!(hierarchy.is_empty());
  assert!(hierarchy.roots().is_empty());
}

#[test]
fn test_add_with_degenerate_resolution_is_noop() {
  for base_resolution in [0.0, -1.0] {
    let mut hierarchy = Hierarchy2::new(base_resolution, i32::MAX);
    let stats = hierarchy.add_volume(&[square(8.0, Vec2::ZERO)]);

    assert_eq!(stats, RefinementStats::default(), "base resolution {}", base_resolution);
    assert!(hierarchy.is_empty());
    assert!(hierarchy.roots().is_empty());
  }
}

/// Geometry billions of cells from the origin is skipped instead of refined.
#[test]
fn test_add_beyond_cell_range_is_noop() {
  let mut hierarchy = unit_hierarchy();
  let stats = hierarchy.add_volume(&[square(4.0, Vec2::new(-3e9, 0.0)), square(4.0, Vec2::new(3e9, 0.0))]);

  assert_eq!(stats, RefinementStats::default());
  assert!(hierarchy.is_empty());
  assert_eq!(hierarchy.root_level(), None);

  hierarchy.add_volume(&[square(8.0, Vec2::ZERO)]);
  assert_eq!(hierarchy.root_level(), Some(3), "later passes are unaffected");
  assert_sound(&hierarchy);
}

#[test]
fn test_add_is_idempotent() {
  let geometries = vec![
    square(8.0, Vec2::ZERO),
    Geometry::offset_line(Vec2::new(-10.0, 6.0), Vec2::new(9.0, 11.0), 1.5),
  ];

  let mut hierarchy = unit_hierarchy();
  hierarchy.add_volume(&geometries);
  let once = flatten(&hierarchy);

  let stats = hierarchy.add_volume(&geometries);
  assert_eq!(flatten(&hierarchy), once, "second add must not drift");
  assert_eq!(stats.samples_written, 0);
  assert_eq!(stats.cells_erased, 0);
}

#[test]
fn test_max_level_zero_refines_nothing() {
  let mut hierarchy = DistanceVolumeHierarchy::new(1.0f32, 0);
  let stats = hierarchy.add_volume(&[square(8.0, Vec2::ZERO)]);

  assert_eq!(stats.root_level, Some(0));
  assert_eq!(hierarchy.levels().len(), 1, "only level 0 exists");
  assert_eq!(hierarchy.roots()[&0].len(), 81, "9x9 unit cells cover [-4, 4]^2");
  assert_sound(&hierarchy);
}

// =========================================================================
// Batch 3: Interaction between calls
// =========================================================================

/// A root inside an earlier interior sample has nothing left to add.
#[test]
fn test_root_covered_by_interior_is_skipped() {
  let mut hierarchy = unit_hierarchy();
  hierarchy.add_volume(&[square(64.0, Vec2::ZERO)]);
  assert!(hierarchy.sample(3, IVec2::new(2, 2)).is_some_and(|s| s.is_interior()));
  let before = flatten(&hierarchy);

  let stats = hierarchy.add_volume(&[square(2.0, Vec2::new(16.0, 16.0))]);

  assert_eq!(stats.root_level, Some(1));
  assert_eq!(stats.cells_visited, 0);
  assert_eq!(flatten(&hierarchy), before);
}

/// A deep interior cell replaces the sentinel tree of an earlier, smaller call.
#[test]
fn test_interior_prunes_stale_descendants() {
  let mut hierarchy = unit_hierarchy();
  hierarchy.add_volume(&[square(2.0, Vec2::new(20.0, 20.0))]);
  assert_eq!(hierarchy.root_level(), Some(1));
  assert!(samples_below(&hierarchy, 3, IVec2::new(2, 2)) > 0);

  let stats = hierarchy.add_volume(&[square(64.0, Vec2::ZERO)]);

  assert_eq!(
    hierarchy.sample(3, IVec2::new(2, 2)),
    Some(&Sample::new(Vec2::new(20.0, 20.0), -12.0))
  );
  assert_eq!(samples_below(&hierarchy, 3, IVec2::new(2, 2)), 0, "old samples must be pruned");
  assert!(stats.cells_erased > 0);
  assert_sound(&hierarchy);
}

/// A new root under an exterior record invalidates that record.
#[test]
fn test_enclosing_exterior_is_erased() {
  let mut hierarchy = unit_hierarchy();
  hierarchy.add_volume(&[square(8.0, Vec2::ZERO)]);
  assert!(hierarchy.sample(1, IVec2::new(3, 3)).is_some_and(|s| s.is_exterior()));

  let stats = hierarchy.add_volume(&[square(0.2, Vec2::new(6.5, 6.5))]);

  assert_eq!(stats.root_level, Some(0));
  assert_eq!(stats.cells_erased, 1);
  assert_eq!(hierarchy.sample(1, IVec2::new(3, 3)), None);
  assert!(hierarchy.sample(0, IVec2::new(6, 6)).is_some_and(|s| s.is_pending()));
  assert_sound(&hierarchy);
}

/// A boundary cell of a new call replaces an exterior record at its level.
#[test]
fn test_sentinel_replaces_exterior_at_same_level() {
  let mut hierarchy = unit_hierarchy();
  hierarchy.add_volume(&[square(8.0, Vec2::ZERO)]);

  let stats = hierarchy.add_volume(&[square(0.5, Vec2::new(7.0, 7.0))]);

  assert_eq!(stats.root_level, Some(1));
  assert!(hierarchy.sample(1, IVec2::new(3, 3)).is_some_and(|s| s.is_pending()));
  assert_sound(&hierarchy);
}

/// Exterior records never claim cells that hold an earlier call's roots.
#[test]
fn test_exterior_skips_cells_enclosing_older_roots() {
  let mut hierarchy = unit_hierarchy();
  hierarchy.add_volume(&[square(0.5, Vec2::new(7.5, -7.5))]);
  assert_eq!(hierarchy.root_level(), Some(0));

  hierarchy.add_volume(&[square(8.0, Vec2::ZERO)]);

  assert_eq!(hierarchy.sample(1, IVec2::new(3, -4)), None, "encloses the older root");
  assert!(hierarchy.sample(1, IVec2::new(3, 3)).is_some_and(|s| s.is_exterior()));
  assert!(hierarchy.sample(0, IVec2::new(7, -8)).is_some(), "older samples survive");
  assert_sound(&hierarchy);
}
