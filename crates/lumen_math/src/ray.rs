use crate::{Point, Vector};

/// A half-line with a head point and a unit direction.
///
/// Rays are used for raytracing - they represent a line starting at `head`
/// and traveling in `direction`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    head: Point,
    direction: Vector,
}

impl Ray {
    /// Distance by which secondary rays are pushed off the surface they start on.
    pub const DELTA: f64 = 0.1;

    /// Create a new ray. The direction is normalized.
    pub fn new(head: Point, direction: Vector) -> Self {
        Self {
            head,
            direction: direction.normalize(),
        }
    }

    /// Create a ray whose head is moved off a surface by [`Ray::DELTA`] along
    /// `normal`, on the side `direction` leaves towards.
    ///
    /// Used for shadow, reflected and refracted rays to avoid shadow acne.
    pub fn with_offset(head: Point, direction: Vector, normal: Vector) -> Self {
        let nv = normal.dot(direction);
        let delta = normal.as_dvec3() * if nv > 0.0 { Self::DELTA } else { -Self::DELTA };
        Self::new(head.translate(delta), direction)
    }

    #[inline]
    pub fn head(&self) -> Point {
        self.head
    }

    #[inline]
    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: head + t * direction
    pub fn point_at(&self, t: f64) -> Point {
        self.head.translate(self.direction.as_dvec3() * t)
    }

    /// The point of `points` closest to the ray head, if any.
    pub fn find_closest_point(&self, points: &[Point]) -> Option<Point> {
        points
            .iter()
            .copied()
            .min_by(|a, b| {
                self.head
                    .distance_squared(*a)
                    .total_cmp(&self.head.distance_squared(*b))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Point::ZERO, Vector::new(0.0, 3.0, 4.0).unwrap());
        assert!((ray.direction().length() - 1.0).abs() < 1e-12);
        assert!((ray.direction().z() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_point_at() {
        let ray = Ray::new(Point::ZERO, Vector::new(0.0, 0.0, 1.0).unwrap());

        assert_eq!(ray.point_at(2.0), Point::new(0.0, 0.0, 2.0));
        assert_eq!(ray.point_at(-2.0), Point::new(0.0, 0.0, -2.0));
        assert_eq!(ray.point_at(0.0), Point::ZERO);
    }

    #[test]
    fn test_find_closest_point() {
        let ray = Ray::new(Point::ZERO, Vector::new(1.0, 0.0, 0.0).unwrap());
        let a = Point::new(8.0, 0.0, 0.0);
        let b = Point::new(2.0, 0.0, 0.0);
        let c = Point::new(5.0, 0.0, 0.0);

        // Middle of the list
        assert_eq!(ray.find_closest_point(&[a, b, c]), Some(b));
        // First and last
        assert_eq!(ray.find_closest_point(&[b, a, c]), Some(b));
        assert_eq!(ray.find_closest_point(&[a, c, b]), Some(b));
        // Empty
        assert_eq!(ray.find_closest_point(&[]), None);
    }

    #[test]
    fn test_offset_moves_head_to_direction_side() {
        let normal = Vector::new(0.0, 0.0, 1.0).unwrap();

        let out = Ray::with_offset(Point::ZERO, Vector::new(1.0, 0.0, 1.0).unwrap(), normal);
        assert!(out.head().abs_diff_eq(Point::new(0.0, 0.0, Ray::DELTA), 1e-12));

        let inward = Ray::with_offset(Point::ZERO, Vector::new(1.0, 0.0, -1.0).unwrap(), normal);
        assert!(inward.head().abs_diff_eq(Point::new(0.0, 0.0, -Ray::DELTA), 1e-12));
    }
}
