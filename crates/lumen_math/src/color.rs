//! Color and three-channel coefficient types.
//!
//! Colors are expressed in RGB units where 255 is full intensity. Nothing in
//! this module clamps; clamping happens when an image is encoded.

use std::ops::{Add, AddAssign, Div, Mul};

use glam::DVec3;

/// An RGB color with unbounded, non-negative channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color(DVec3);

impl Color {
    pub const BLACK: Color = Color(DVec3::ZERO);

    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self(DVec3::new(r, g, b))
    }

    #[inline]
    pub fn r(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn g(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn b(&self) -> f64 {
        self.0.z
    }

    /// Divide every channel by `divisor`.
    #[inline]
    pub fn reduce(&self, divisor: f64) -> Color {
        Color(self.0 / divisor)
    }

    /// Component-wise comparison with an absolute tolerance.
    pub fn abs_diff_eq(&self, other: Color, max_abs_diff: f64) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }

    /// Channels rounded and clamped to 8 bits.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let channel = |c: f64| c.round().clamp(0.0, 255.0) as u8;
        [channel(self.0.x), channel(self.0.y), channel(self.0.z)]
    }
}

impl Add for Color {
    type Output = Color;

    #[inline]
    fn add(self, rhs: Color) -> Color {
        Color(self.0 + rhs.0)
    }
}

impl AddAssign for Color {
    #[inline]
    fn add_assign(&mut self, rhs: Color) {
        self.0 += rhs.0;
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    #[inline]
    fn mul(self, rhs: f64) -> Color {
        Color(self.0 * rhs)
    }
}

impl Mul<Factor> for Color {
    type Output = Color;

    #[inline]
    fn mul(self, rhs: Factor) -> Color {
        Color(self.0 * rhs.0)
    }
}

impl Div<f64> for Color {
    type Output = Color;

    #[inline]
    fn div(self, rhs: f64) -> Color {
        self.reduce(rhs)
    }
}

/// A per-channel multiplicative coefficient (material factors, attenuation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Factor(DVec3);

impl Factor {
    pub const ZERO: Factor = Factor(DVec3::ZERO);
    pub const ONE: Factor = Factor(DVec3::ONE);

    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self(DVec3::new(r, g, b))
    }

    #[inline]
    pub fn splat(value: f64) -> Self {
        Self(DVec3::splat(value))
    }

    #[inline]
    pub fn r(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn g(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn b(&self) -> f64 {
        self.0.z
    }

    /// Scale every channel by the same amount.
    #[inline]
    pub fn scale(&self, s: f64) -> Factor {
        Factor(self.0 * s)
    }

    /// True when every channel is strictly below `eps`.
    pub fn lower_than(&self, eps: f64) -> bool {
        self.0.x < eps && self.0.y < eps && self.0.z < eps
    }

    pub fn abs_diff_eq(&self, other: Factor, max_abs_diff: f64) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

impl Default for Factor {
    fn default() -> Self {
        Factor::ZERO
    }
}

impl From<f64> for Factor {
    fn from(value: f64) -> Self {
        Factor::splat(value)
    }
}

impl Mul for Factor {
    type Output = Factor;

    #[inline]
    fn mul(self, rhs: Factor) -> Factor {
        Factor(self.0 * rhs.0)
    }
}

impl Add for Factor {
    type Output = Factor;

    #[inline]
    fn add(self, rhs: Factor) -> Factor {
        Factor(self.0 + rhs.0)
    }
}
