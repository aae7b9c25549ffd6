//! fixed-point numerical types

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// 32-bit signed fixed point number with 6 bits of fraction.
///
/// This is the encoding used for every metric in a container: sizes, line
/// heights, bearings, advances and kerning adjustments. One unit is 1/64 of a
/// pixel.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct F26Dot6(i32);

impl F26Dot6 {
    /// Minimum value.
    pub const MIN: Self = Self(i32::MIN);

    /// Maximum value.
    pub const MAX: Self = Self(i32::MAX);

    /// This type's smallest representable value
    pub const EPSILON: Self = Self(1);

    /// Representation of 0.0.
    pub const ZERO: Self = Self(0);

    /// Representation of 1.0.
    pub const ONE: Self = Self(Self::ONE_BITS);

    const FRACT_BITS: u32 = 6;
    const ONE_BITS: i32 = 1 << Self::FRACT_BITS;
    const HALF_BITS: i64 = 1 << (Self::FRACT_BITS - 1);

    /// Creates a new fixed point value from the underlying bit representation.
    #[inline(always)]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Returns the underlying bit representation of the value.
    #[inline(always)]
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Creates a fixed point value from an integer, wrapping on overflow.
    pub const fn from_i32(x: i32) -> Self {
        Self(x.wrapping_shl(Self::FRACT_BITS))
    }

    /// Creates a fixed point value from an `f32`.
    ///
    /// The scaled value is *truncated toward zero*, matching the float to
    /// integer cast used by the tools that produce containers. This is not
    /// symmetric rounding: `0.999` encodes as `63/64` and `-0.999` as
    /// `-63/64`. Out of range inputs saturate, and NaN encodes as zero.
    pub fn from_f32(x: f32) -> Self {
        Self((x * Self::ONE_BITS as f32) as i32)
    }

    /// Returns the value as an `f32`.
    ///
    /// This is exact for magnitudes below 2^18; beyond that the nearest
    /// representable `f32` is returned.
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / Self::ONE_BITS as f32
    }

    /// Returns the value as an `f64`. This operation is lossless.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::ONE_BITS as f64
    }

    /// Returns the largest integer less than or equal to the value.
    ///
    /// This rounds toward negative infinity, so `-0.5` becomes `-1` rather
    /// than `0`.
    pub const fn floor_to_i32(self) -> i32 {
        self.0 >> Self::FRACT_BITS
    }

    /// Returns the nearest integer, rounding half-way cases away from zero.
    pub const fn round_to_i32(self) -> i32 {
        round_half_away_from_zero(self.0 as i64) as i32
    }

    /// Rounds away from zero, except when the value is within `tolerance`
    /// of the integer boundary below its magnitude.
    ///
    /// The computation is `round(x - tol + sign(x) * 0.5)`, where `tol` takes
    /// the sign of `x` and `round` rounds half-way cases away from zero. A
    /// metric that is "almost exactly" a whole number of pixels snaps to that
    /// number instead of growing by a pixel of padding. Zero stays zero.
    pub const fn ceil_with_tolerance(self, tolerance: F26Dot6) -> i32 {
        let value = self.0 as i64;
        let sign = value.signum();
        let tolerance = (tolerance.0 as i64).abs() * sign;
        round_half_away_from_zero(value - tolerance + sign * Self::HALF_BITS) as i32
    }
}

/// Rounds a value in 1/64 units to a whole number, half away from zero.
const fn round_half_away_from_zero(bits: i64) -> i64 {
    if bits >= 0 {
        (bits + F26Dot6::HALF_BITS) >> F26Dot6::FRACT_BITS
    } else {
        -((-bits + F26Dot6::HALF_BITS) >> F26Dot6::FRACT_BITS)
    }
}

impl Add for F26Dot6 {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        // same overflow semantics as std: panic in debug, wrap in release
        Self(self.0 + other.0)
    }
}

impl AddAssign for F26Dot6 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for F26Dot6 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for F26Dot6 {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for F26Dot6 {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

crate::raw::newtype_scalar!(F26Dot6, [u8; 4]);

//hack: we can losslessly go to f64, so use those fmt impls
impl std::fmt::Display for F26Dot6 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.to_f64().fmt(f)
    }
}

impl std::fmt::Debug for F26Dot6 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.to_f64().fmt(f)
    }
}
