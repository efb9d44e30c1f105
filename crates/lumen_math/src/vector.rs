use std::fmt;
use std::ops::Neg;

use glam::DVec3;

use crate::{is_zero, MathError, MathResult};

/// A non-zero direction in 3D space.
///
/// Every constructor and every operation that could produce the zero vector
/// returns [`MathError::DegenerateVector`] instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector(DVec3);

impl Vector {
    /// Create a new vector, rejecting the zero vector.
    pub fn new(x: f64, y: f64, z: f64) -> MathResult<Self> {
        Self::from_dvec3(DVec3::new(x, y, z))
    }

    pub fn from_dvec3(v: DVec3) -> MathResult<Self> {
        if is_zero(v.x) && is_zero(v.y) && is_zero(v.z) {
            return Err(MathError::DegenerateVector);
        }
        Ok(Self(v))
    }

    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    #[inline]
    pub fn dot(&self, other: Vector) -> f64 {
        self.0.dot(other.0)
    }

    /// Cross product; fails for parallel vectors.
    pub fn cross(&self, other: Vector) -> MathResult<Vector> {
        Self::from_dvec3(self.0.cross(other.0))
    }

    pub fn add(&self, other: Vector) -> MathResult<Vector> {
        Self::from_dvec3(self.0 + other.0)
    }

    pub fn subtract(&self, other: Vector) -> MathResult<Vector> {
        Self::from_dvec3(self.0 - other.0)
    }

    /// Scale by a scalar; fails when the factor is zero.
    pub fn scale(&self, factor: f64) -> MathResult<Vector> {
        Self::from_dvec3(self.0 * factor)
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.0.length_squared()
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.0.length()
    }

    /// Unit vector in the same direction.
    ///
    /// Never fails: a `Vector` is non-zero by construction.
    #[inline]
    pub fn normalize(&self) -> Vector {
        Vector(self.0 / self.0.length())
    }

    /// Component-wise comparison with an absolute tolerance.
    pub fn abs_diff_eq(&self, other: Vector, max_abs_diff: f64) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

impl Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}

impl TryFrom<DVec3> for Vector {
    type Error = MathError;

    fn try_from(v: DVec3) -> MathResult<Self> {
        Self::from_dvec3(v)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.0.x, self.0.y, self.0.z)
    }
}
