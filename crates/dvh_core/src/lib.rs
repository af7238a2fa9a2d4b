//! dvh_core - Sparse adaptive signed distance volumes
//!
//! A [`DistanceVolumeHierarchy`] stores signed distance samples on a stack of
//! sparse grids, one per level, where each level doubles the cell size of the
//! one below it. Geometry is added (union) and subtracted (difference) with
//! top-down passes that only refine cells the surface passes through, so
//! storage grows with surface area rather than volume.
//!
//! # Features
//!
//! - **2D and 3D, f32 and f64**: generic over [`Point`] (`Vec2`, `DVec2`,
//!   `Vec3`, `DVec3`)
//! - **Primitives**: cuboids, segments, capsules, triangles and oriented
//!   (half-plane) lines, optionally translated
//! - **Parallel classification**: large levels are evaluated with rayon
//!
//! # Example
//!
//! ```
//! use dvh_core::glam::Vec2;
//! use dvh_core::{DistanceVolumeHierarchy, Geometry};
//!
//! let mut hierarchy = DistanceVolumeHierarchy::<Vec2>::new(1.0, i32::MAX);
//! hierarchy.add_volume(&[Geometry::cuboid_at(Vec2::splat(8.0), Vec2::ZERO)]);
//! hierarchy.subtract_volumes(&[Geometry::offset_line(Vec2::ZERO, Vec2::ZERO, 1.0)]);
//!
//! assert_eq!(hierarchy.root_level(), Some(3));
//! assert!(hierarchy.check_invariants().is_ok());
//! ```

pub mod aabb;
pub mod cell;
pub mod error;
pub mod hierarchy;
pub mod sdf;
pub mod space;

pub use glam;

// Re-export commonly used items
pub use aabb::Aabb;
pub use cell::{cell_center, cell_corner_dist, children_cells, get_cell, parent_cell, Cell, Children};
pub use error::HierarchyError;
pub use hierarchy::{
  DistanceVolumeHierarchy, HierarchyConfig, RefinementStats, Sample, DEFAULT_PARALLEL_THRESHOLD,
  LOWEST_LEVEL,
};
pub use sdf::{Cuboid, Geometry, Line, OffsetLine, OrientedLine, Sdf, Translated, Triangle};
pub use space::{Planar, Point, Scalar};
