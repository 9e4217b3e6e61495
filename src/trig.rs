//! Discrete angles and the fixed-point trig tables.
//!
//! A full turn is [`FULL_TURN`] steps.  Angle 0 points along +X and angles
//! grow toward −Y (map rows are stored top-down, so this is the usual
//! counter-clockwise direction on screen).

use std::f64::consts::PI;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use once_cell::sync::Lazy;

use crate::fixed::Fixed;

pub const FULL_TURN: i32 = 2048;
pub const THREE_QUARTER_TURN: i32 = 1536;
pub const HALF_TURN: i32 = 1024;
pub const QUARTER_TURN: i32 = 512;
pub const EIGHTH_TURN: i32 = 256;
pub const ANGLE_MASK: i32 = FULL_TURN - 1;

/// Bias added to every tangent before conversion.  Keeps `tan(0)` non-zero
/// so the DDA step sizes never degenerate for axis-aligned rays.
const TAN_BIAS: f64 = 0.0031;

/// Discretised heading, [`FULL_TURN`] steps per revolution.
///
/// Arithmetic wraps freely; lookups mask into `0..FULL_TURN`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Angle(i32);

impl Angle {
    pub const ZERO: Angle = Angle(0);
    pub const QUARTER: Angle = Angle(QUARTER_TURN);

    #[inline(always)]
    pub const fn new(steps: i32) -> Self {
        Self(steps)
    }

    /// Raw step count, not normalised.
    #[inline(always)]
    pub const fn steps(self) -> i32 {
        self.0
    }

    /// Table index in `0..FULL_TURN`.
    #[inline(always)]
    pub const fn index(self) -> usize {
        (self.0 & ANGLE_MASK) as usize
    }

    /// Same direction, normalised into `0..FULL_TURN`.
    #[inline(always)]
    pub const fn normalized(self) -> Self {
        Self(self.0 & ANGLE_MASK)
    }

    pub fn from_degrees(deg: f64) -> Self {
        Self((deg * FULL_TURN as f64 / 360.0).round() as i32)
    }

    pub fn to_degrees(self) -> f64 {
        self.normalized().0 as f64 * 360.0 / FULL_TURN as f64
    }

    #[inline(always)]
    pub fn sin(self) -> Fixed {
        tables().sin(self)
    }

    #[inline(always)]
    pub fn cos(self) -> Fixed {
        tables().cos(self)
    }
}

impl Add for Angle {
    type Output = Angle;
    #[inline(always)]
    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for Angle {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Angle) {
        *self = *self + rhs;
    }
}

impl Neg for Angle {
    type Output = Angle;
    #[inline(always)]
    fn neg(self) -> Angle {
        Angle(self.0.wrapping_neg())
    }
}

impl Sub for Angle {
    type Output = Angle;
    #[inline(always)]
    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for Angle {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Angle) {
        *self = *self - rhs;
    }
}

/// Sine over the full turn, tangent over the first quadrant.
pub struct TrigTables {
    sin: Box<[Fixed; FULL_TURN as usize]>,
    tan: Box<[Fixed; QUARTER_TURN as usize]>,
}

impl TrigTables {
    pub fn new() -> Self {
        let mut sin = Box::new([Fixed::ZERO; FULL_TURN as usize]);
        let mut tan = Box::new([Fixed::ZERO; QUARTER_TURN as usize]);
        for i in 0..FULL_TURN as usize {
            let th = i as f64 * PI / HALF_TURN as f64;
            sin[i] = Fixed::from_f64(th.sin());
            if i < QUARTER_TURN as usize {
                tan[i] = Fixed::from_f64(th.tan() + TAN_BIAS);
            }
        }
        tracing::debug!(steps = FULL_TURN, "trig tables built");
        Self { sin, tan }
    }

    #[inline(always)]
    pub fn sin(&self, a: Angle) -> Fixed {
        self.sin[a.index()]
    }

    #[inline(always)]
    pub fn cos(&self, a: Angle) -> Fixed {
        self.sin[(a + Angle::QUARTER).index()]
    }

    /// Tangent for a first-quadrant step index.
    ///
    /// Callers fold the other quadrants onto `0..QUARTER_TURN` themselves
    /// (see the ray caster).  Out-of-range steps are a debug assertion and
    /// wrap into the quadrant in release builds.
    #[inline(always)]
    pub fn tan(&self, steps: i32) -> Fixed {
        debug_assert!(
            (0..QUARTER_TURN).contains(&steps),
            "tan step {steps} outside the first quadrant"
        );
        self.tan[(steps & (QUARTER_TURN - 1)) as usize]
    }
}

impl Default for TrigTables {
    fn default() -> Self {
        Self::new()
    }
}

static TABLES: Lazy<TrigTables> = Lazy::new(TrigTables::new);

/// Process-wide tables, built on first use and immutable afterwards.
#[inline(always)]
pub fn tables() -> &'static TrigTables {
    &TABLES
}

/*──────────────────────────────── Tests ───────────────────────────────*/
