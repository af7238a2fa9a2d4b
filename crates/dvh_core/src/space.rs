//! Scalar and point abstractions over glam vector types.
//!
//! The hierarchy is generic over dimension (2D/3D) and precision (f32/f64).
//! Each supported glam vector implements [`Point`], which names its scalar
//! type and the integer vector used to index grid cells:
//!
//! | Point   | Scalar | Cell    |
//! |---------|--------|---------|
//! | `Vec2`  | `f32`  | `IVec2` |
//! | `DVec2` | `f64`  | `IVec2` |
//! | `Vec3`  | `f32`  | `IVec3` |
//! | `DVec3` | `f64`  | `IVec3` |

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

use glam::{DVec2, DVec3, IVec2, IVec3, Vec2, Vec3};

use crate::cell::Cell;
use crate::error::HierarchyError;

/// Floating point scalar used for distances and coordinates.
pub trait Scalar:
  Copy
  + Debug
  + Default
  + PartialEq
  + PartialOrd
  + Send
  + Sync
  + 'static
  + Add<Output = Self>
  + Sub<Output = Self>
  + Mul<Output = Self>
  + Div<Output = Self>
  + Neg<Output = Self>
{
  const ZERO: Self;
  const ONE: Self;
  const HALF: Self;
  const TWO: Self;
  const INFINITY: Self;
  const EPSILON: Self;
  const MIN_POSITIVE: Self;

  fn abs(self) -> Self;
  fn sqrt(self) -> Self;
  fn floor(self) -> Self;
  fn min(self, other: Self) -> Self;
  fn max(self, other: Self) -> Self;
  fn clamp(self, lo: Self, hi: Self) -> Self;
  fn powi(self, exponent: i32) -> Self;
  fn is_finite(self) -> bool;
  fn from_f32(value: f32) -> Self;
  fn from_f64(value: f64) -> Self;
  fn to_f64(self) -> f64;
  /// Floor, then convert to a cell coordinate (saturating).
  fn floor_to_i32(self) -> i32;
  fn from_i32(value: i32) -> Self;

  /// Sign of the value: -1, 0 or 1.
  ///
  /// Unlike `f32::signum`, zero maps to zero.
  #[inline]
  fn sign(self) -> Self {
    if self > Self::ZERO {
      Self::ONE
    } else if self < Self::ZERO {
      -Self::ONE
    } else {
      Self::ZERO
    }
  }

  /// Relative comparison with a few ULPs of slack.
  ///
  /// Infinities only compare equal to themselves.
  #[inline]
  fn almost_equal(self, other: Self) -> bool {
    if self == other {
      return true;
    }
    if !self.is_finite() || !other.is_finite() {
      return false;
    }
    let diff = (self - other).abs();
    let scale = self.abs().max(other.abs());
    diff <= Self::EPSILON * Self::from_f32(4.0) * scale || diff < Self::MIN_POSITIVE
  }
}

macro_rules! impl_scalar {
  ($t:ident) => {
    impl Scalar for $t {
      const ZERO: Self = 0.0;
      const ONE: Self = 1.0;
      const HALF: Self = 0.5;
      const TWO: Self = 2.0;
      const INFINITY: Self = $t::INFINITY;
      const EPSILON: Self = $t::EPSILON;
      const MIN_POSITIVE: Self = $t::MIN_POSITIVE;

      #[inline]
      fn abs(self) -> Self {
        $t::abs(self)
      }
      #[inline]
      fn sqrt(self) -> Self {
        $t::sqrt(self)
      }
      #[inline]
      fn floor(self) -> Self {
        $t::floor(self)
      }
      #[inline]
      fn min(self, other: Self) -> Self {
        $t::min(self, other)
      }
      #[inline]
      fn max(self, other: Self) -> Self {
        $t::max(self, other)
      }
      #[inline]
      fn clamp(self, lo: Self, hi: Self) -> Self {
        $t::clamp(self, lo, hi)
      }
      #[inline]
      fn powi(self, exponent: i32) -> Self {
        $t::powi(self, exponent)
      }
      #[inline]
      fn is_finite(self) -> bool {
        $t::is_finite(self)
      }
      #[inline]
      fn from_f32(value: f32) -> Self {
        value as $t
      }
      #[inline]
      fn from_f64(value: f64) -> Self {
        value as $t
      }
      #[inline]
      fn to_f64(self) -> f64 {
        self as f64
      }
      #[inline]
      fn floor_to_i32(self) -> i32 {
        $t::floor(self) as i32
      }
      #[inline]
      fn from_i32(value: i32) -> Self {
        value as $t
      }
    }
  };
}

impl_scalar!(f32);
impl_scalar!(f64);

/// A point (or vector) in 2D or 3D space.
///
/// Only the operations the distance queries and cell math need are exposed.
/// Everything componentwise goes through [`Point::map`] / [`Point::zip_map`].
pub trait Point:
  Copy
  + Debug
  + PartialEq
  + Send
  + Sync
  + 'static
  + Add<Output = Self>
  + Sub<Output = Self>
  + Neg<Output = Self>
{
  type Scalar: Scalar;
  type Cell: Cell;

  /// Number of components.
  const DIM: usize;
  const ZERO: Self;

  fn splat(value: Self::Scalar) -> Self;
  fn map(self, f: impl FnMut(Self::Scalar) -> Self::Scalar) -> Self;
  fn zip_map(self, other: Self, f: impl FnMut(Self::Scalar, Self::Scalar) -> Self::Scalar) -> Self;
  fn dot(self, other: Self) -> Self::Scalar;
  fn max_element(self) -> Self::Scalar;
  fn min_element(self) -> Self::Scalar;

  /// Componentwise floor, converted to a cell index.
  fn floor_to_cell(self) -> Self::Cell;
  fn from_cell(cell: Self::Cell) -> Self;

  /// Build a point from f64 components, checking the component count.
  fn from_f64_slice(values: &[f64]) -> Result<Self, HierarchyError>;
  fn to_f64_vec(self) -> Vec<f64>;

  /// Sign of the 2D cross product `self x edge`.
  ///
  /// Only planar points split space into two half-planes; 3D points always
  /// report the positive side.
  fn half_plane_sign(self, edge: Self) -> Self::Scalar;

  /// Vector from `self` to the closest point of triangle `(a, b, c)`.
  fn triangle_vector(self, a: Self, b: Self, c: Self) -> Self;

  #[inline]
  fn scale(self, factor: Self::Scalar) -> Self {
    self.map(|c| c * factor)
  }

  #[inline]
  fn length_squared(self) -> Self::Scalar {
    self.dot(self)
  }

  #[inline]
  fn length(self) -> Self::Scalar {
    self.length_squared().sqrt()
  }

  #[inline]
  fn abs(self) -> Self {
    self.map(|c| c.abs())
  }

  #[inline]
  fn sign(self) -> Self {
    self.map(|c| c.sign())
  }

  #[inline]
  fn min(self, other: Self) -> Self {
    self.zip_map(other, |a, b| a.min(b))
  }

  #[inline]
  fn max(self, other: Self) -> Self {
    self.zip_map(other, |a, b| a.max(b))
  }

  #[inline]
  fn mul_componentwise(self, other: Self) -> Self {
    self.zip_map(other, |a, b| a * b)
  }

  #[inline]
  fn normalize_or_zero(self) -> Self {
    let length = self.length();
    if length > Self::Scalar::ZERO && length.is_finite() {
      self.scale(Self::Scalar::ONE / length)
    } else {
      Self::ZERO
    }
  }

  #[inline]
  fn is_finite(self) -> bool {
    self.max_element().is_finite() && self.min_element().is_finite()
  }

  /// Vector from `self` to the closest point of segment `start..end`.
  ///
  /// A zero-length segment degenerates to its start point.
  #[inline]
  fn segment_vector(self, start: Self, end: Self) -> Self {
    let start_to_point = self - start;
    let start_to_end = end - start;
    let length_squared = start_to_end.length_squared();
    let t = if length_squared > Self::Scalar::ZERO {
      (start_to_point.dot(start_to_end) / length_squared).clamp(Self::Scalar::ZERO, Self::Scalar::ONE)
    } else {
      Self::Scalar::ZERO
    };
    start_to_end.scale(t) - start_to_point
  }
}

/// Marker for 2D points, the only space where oriented lines bound a
/// half-plane.
pub trait Planar: Point {}

impl Planar for Vec2 {}
impl Planar for DVec2 {}

macro_rules! impl_point_common {
  ($vec:ty, $scalar:ident, $cell:ty, $dim:expr) => {
    type Scalar = $scalar;
    type Cell = $cell;

    const DIM: usize = $dim;
    const ZERO: Self = <$vec>::ZERO;

    #[inline]
    fn splat(value: $scalar) -> Self {
      <$vec>::splat(value)
    }

    #[inline]
    fn map(self, f: impl FnMut($scalar) -> $scalar) -> Self {
      <$vec>::from_array(self.to_array().map(f))
    }

    #[inline]
    fn zip_map(self, other: Self, mut f: impl FnMut($scalar, $scalar) -> $scalar) -> Self {
      let a = self.to_array();
      let b = other.to_array();
      <$vec>::from_array(std::array::from_fn(|i| f(a[i], b[i])))
    }

    #[inline]
    fn dot(self, other: Self) -> $scalar {
      <$vec>::dot(self, other)
    }

    #[inline]
    fn max_element(self) -> $scalar {
      <$vec>::max_element(self)
    }

    #[inline]
    fn min_element(self) -> $scalar {
      <$vec>::min_element(self)
    }

    #[inline]
    fn floor_to_cell(self) -> $cell {
      <$cell>::from_array(self.to_array().map(Scalar::floor_to_i32))
    }

    #[inline]
    fn from_cell(cell: $cell) -> Self {
      <$vec>::from_array(cell.to_array().map(<$scalar as Scalar>::from_i32))
    }

    fn from_f64_slice(values: &[f64]) -> Result<Self, HierarchyError> {
      if values.len() != $dim {
        return Err(HierarchyError::MixedDimensions {
          expected: $dim,
          found: values.len(),
        });
      }
      Ok(<$vec>::from_array(std::array::from_fn(|i| {
        <$scalar as Scalar>::from_f64(values[i])
      })))
    }

    fn to_f64_vec(self) -> Vec<f64> {
      self.to_array().iter().map(|c| Scalar::to_f64(*c)).collect()
    }
  };
}

macro_rules! impl_point_2d {
  ($vec:ty, $scalar:ident) => {
    impl Point for $vec {
      impl_point_common!($vec, $scalar, IVec2, 2);

      #[inline]
      fn half_plane_sign(self, edge: Self) -> $scalar {
        Scalar::sign(self.perp_dot(edge))
      }

      fn triangle_vector(self, a: Self, b: Self, c: Self) -> Self {
        let d0 = (b - a).perp_dot(self - a);
        let d1 = (c - b).perp_dot(self - b);
        let d2 = (a - c).perp_dot(self - c);

        let has_negative = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
        let has_positive = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
        if !(has_negative && has_positive) {
          return Self::ZERO;
        }

        nearest_of([
          self.segment_vector(a, b),
          self.segment_vector(b, c),
          self.segment_vector(c, a),
        ])
      }
    }
  };
}

macro_rules! impl_point_3d {
  ($vec:ty, $scalar:ident) => {
    impl Point for $vec {
      impl_point_common!($vec, $scalar, IVec3, 3);

      #[inline]
      fn half_plane_sign(self, _edge: Self) -> $scalar {
        1.0
      }

      fn triangle_vector(self, a: Self, b: Self, c: Self) -> Self {
        let ba = b - a;
        let pa = self - a;
        let cb = c - b;
        let pb = self - b;
        let ac = a - c;
        let pc = self - c;
        let normal = ba.cross(ac);

        let region = Scalar::sign(ba.cross(normal).dot(pa))
          + Scalar::sign(cb.cross(normal).dot(pb))
          + Scalar::sign(ac.cross(normal).dot(pc));

        let normal_length_squared = normal.length_squared();
        if region < 2.0 || normal_length_squared <= 0.0 {
          return nearest_of([
            self.segment_vector(a, b),
            self.segment_vector(b, c),
            self.segment_vector(c, a),
          ]);
        }

        -normal * (normal.dot(pa) / normal_length_squared)
      }
    }
  };
}

impl_point_2d!(Vec2, f32);
impl_point_2d!(DVec2, f64);
impl_point_3d!(Vec3, f32);
impl_point_3d!(DVec3, f64);

/// Shortest of a set of candidate vectors.
#[inline]
fn nearest_of<V: Point, const N: usize>(candidates: [V; N]) -> V {
  let mut best = candidates[0];
  let mut best_length = best.length_squared();
  for candidate in &candidates[1..] {
    let length = candidate.length_squared();
    if length < best_length {
      best = *candidate;
      best_length = length;
    }
  }
  best
}

#[cfg(test)]
#[path = "space_test.rs"]
mod space_test;
