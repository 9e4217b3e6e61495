//! 16.16 fixed-point scalar.
//!
//! Every geometric quantity (positions, distances, depths) is a [`Fixed`].
//! Angles live in their own unit, see [`crate::trig::Angle`].

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Number of fractional bits.
pub const FIXED_SHIFT: u32 = 16;
/// Raw value of `1.0`.
pub const FIXED_ONE: i32 = 1 << FIXED_SHIFT;
/// Mask selecting the fractional bits of a raw value.
pub const FIXED_MASK: i32 = FIXED_ONE - 1;

/// Signed 16.16 fixed-point number.
///
/// `*` and `/` are the fixed-point operations: both widen to `i64` for the
/// intermediate and narrow the result.  They never saturate; operands are
/// bounded by map and screen size.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(FIXED_ONE);
    pub const HALF: Fixed = Fixed(FIXED_ONE / 2);

    #[inline(always)]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    #[inline(always)]
    pub const fn from_int(n: i32) -> Self {
        Self(n << FIXED_SHIFT)
    }

    /// Set-up time conversion (tables, level data).  Never used per frame.
    pub fn from_f64(x: f64) -> Self {
        Self((x * FIXED_ONE as f64).round() as i32)
    }

    #[inline(always)]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Integer part, rounded toward negative infinity.
    #[inline(always)]
    pub const fn floor(self) -> i32 {
        self.0 >> FIXED_SHIFT
    }

    /// Fractional part as a raw value in `0..FIXED_ONE`.
    #[inline(always)]
    pub const fn frac(self) -> i32 {
        self.0 & FIXED_MASK
    }

    #[inline(always)]
    pub const fn abs(self) -> Self {
        let mask = self.0 >> 31;
        Self((self.0 + mask) ^ mask)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / FIXED_ONE as f64
    }
}

impl fmt::Debug for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed({:.4})", self.to_f64())
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.to_f64())
    }
}

impl Add for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl AddAssign for Fixed {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Fixed) {
        self.0 += rhs.0;
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

impl SubAssign for Fixed {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Fixed) {
        self.0 -= rhs.0;
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn neg(self) -> Fixed {
        Fixed(-self.0)
    }
}

impl Mul for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn mul(self, rhs: Fixed) -> Fixed {
        Fixed(((self.0 as i64 * rhs.0 as i64) >> FIXED_SHIFT) as i32)
    }
}

impl Div for Fixed {
    type Output = Fixed;
    /// Caller guarantees `rhs != 0`.
    #[inline(always)]
    fn div(self, rhs: Fixed) -> Fixed {
        debug_assert!(rhs.0 != 0, "fixed-point division by zero");
        Fixed((((self.0 as i64) << FIXED_SHIFT) / rhs.0 as i64) as i32)
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_and_div_basics() {
        let a = Fixed::from_f64(3.5);
        let b = Fixed::from_int(2);
        assert_eq!(a * b, Fixed::from_int(7));
        assert_eq!(a / b, Fixed::from_f64(1.75));
        assert_eq!(-a * b, Fixed::from_int(-7));
    }

    #[test]
    fn div_undoes_mul_within_one_unit() {
        let samples = [-700_000, -65_536, -12_345, -1, 1, 7, 4_096, 65_536, 99_999, 500_000];
        for &ra in &samples {
            for &rb in &samples {
                let a = Fixed::from_raw(ra);
                let b = Fixed::from_raw(rb);
                let back = (a * b) / b;
                // The product truncates to 1 raw unit, which the divide scales
                // by 1/b; bound the error accordingly.
                let tol = 1 + (FIXED_ONE / rb.abs()).max(0);
                assert!(
                    (back.raw() - ra).abs() <= tol,
                    "a={ra} b={rb} back={}",
                    back.raw()
                );
            }
        }
    }

    #[test]
    fn abs_matches_std() {
        for raw in [i32::MIN + 1, -65_536, -3, 0, 5, 65_536, i32::MAX] {
            assert_eq!(Fixed::from_raw(raw).abs().raw(), raw.abs());
        }
    }

    #[test]
    fn floor_and_frac_split_negative_values() {
        let x = Fixed::from_f64(-1.25);
        assert_eq!(x.floor(), -2);
        assert_eq!(x.frac(), FIXED_ONE * 3 / 4);
    }
}
