use std::fmt;
use std::ops::Add;

use glam::DVec3;

use crate::{MathResult, Vector};

/// A location in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point(pub(crate) DVec3);

impl Point {
    /// The origin of the coordinate system.
    pub const ZERO: Point = Point(DVec3::ZERO);

    /// Create a new point.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn from_dvec3(v: DVec3) -> Self {
        Self(v)
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

    /// Vector from `other` to `self`.
    ///
    /// Fails when both points coincide.
    pub fn subtract(&self, other: Point) -> MathResult<Vector> {
        Vector::from_dvec3(self.0 - other.0)
    }

    /// Point moved by an arbitrary (possibly zero) displacement.
    #[inline]
    pub fn translate(&self, offset: DVec3) -> Point {
        Point(self.0 + offset)
    }

    pub fn distance_squared(&self, other: Point) -> f64 {
        self.0.distance_squared(other.0)
    }

    pub fn distance(&self, other: Point) -> f64 {
        self.0.distance(other.0)
    }

    /// Component-wise comparison with an absolute tolerance.
    pub fn abs_diff_eq(&self, other: Point, max_abs_diff: f64) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Vector) -> Point {
        Point(self.0 + rhs.as_dvec3())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MathError;

    #[test]
    fn test_point_add_vector() {
        let p = Point::new(1.0, 2.0, 3.0);
        let v = Vector::new(-1.0, -2.0, -3.0).unwrap();
        assert_eq!(p + v, Point::ZERO);
    }

    #[test]
    fn test_point_subtract() {
        let p1 = Point::new(1.0, 2.0, 3.0);
        let p2 = Point::new(2.0, 3.0, 4.0);
        let v = p2.subtract(p1).unwrap();
        assert_eq!(v.as_dvec3(), DVec3::ONE);

        // Same point gives a zero vector
        assert_eq!(p1.subtract(p1), Err(MathError::DegenerateVector));
    }

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(1.0, 2.0, 3.0);
        let p2 = Point::new(1.0, 2.0, 7.0);
        assert_eq!(p1.distance_squared(p2), 16.0);
        assert_eq!(p1.distance(p2), 4.0);
        assert_eq!(p1.distance(p1), 0.0);
    }
}
