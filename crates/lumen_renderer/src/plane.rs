//! Infinite plane primitive.

use lumen_math::{align_zero, is_zero, Color, MathResult, Point, Ray, Vector};

use crate::{
    error::ConstructionResult,
    intersectable::{geo_points, within, GeoPoint, Geometry, Intersectable, Surface},
    Material,
};

/// A plane given by a reference point and a unit normal.
#[derive(Debug, Clone)]
pub struct Plane {
    q0: Point,
    normal: Vector,
    surface: Surface,
}

impl Plane {
    /// Create a plane through `q0` with the given normal (normalized here).
    pub fn new(q0: Point, normal: Vector) -> Self {
        Self {
            q0,
            normal: normal.normalize(),
            surface: Surface::default(),
        }
    }

    /// Create the plane through three points.
    ///
    /// Fails when two points coincide or all three are collinear.
    pub fn from_points(p0: Point, p1: Point, p2: Point) -> ConstructionResult<Self> {
        let v1 = p1.subtract(p0)?;
        let v2 = p2.subtract(p0)?;
        let normal = v1.cross(v2)?;
        Ok(Self::new(p0, normal))
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.surface.emission = emission;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.surface.material = material;
        self
    }

    /// Reference point of the plane.
    pub fn q0(&self) -> Point {
        self.q0
    }

    /// Unit normal of the plane.
    pub fn normal(&self) -> Vector {
        self.normal
    }

    /// Parametric distance of the ray/plane intersection in `(0, max_distance]`.
    ///
    /// Rays parallel to the plane (including rays lying in it) and rays
    /// starting on the plane have no intersection.
    pub(crate) fn hit_distance(&self, ray: &Ray, max_distance: f64) -> Option<f64> {
        let nv = self.normal.dot(ray.direction());
        if is_zero(nv) {
            return None;
        }
        let to_plane = self.q0.subtract(ray.head()).ok()?;
        let t = align_zero(self.normal.dot(to_plane) / nv);
        within(t, max_distance).then_some(t)
    }
}

impl Intersectable for Plane {
    fn find_geo_intersections(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        geo_points(self, ray, self.hit_distance(ray, max_distance))
    }
}

impl Geometry for Plane {
    fn normal_at(&self, _point: Point) -> MathResult<Vector> {
        Ok(self.normal)
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConstructionError;
    use lumen_math::MathError;

    fn v(x: f64, y: f64, z: f64) -> Vector {
        Vector::new(x, y, z).unwrap()
    }

    fn p(x: f64, y: f64, z: f64) -> Point {
        Point::new(x, y, z)
    }

    fn sample_plane() -> Plane {
        Plane::from_points(p(-0.5, -0.5, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)).unwrap()
    }

    #[test]
    fn test_from_points_rejects_degenerate_input() {
        let degenerate = Err(ConstructionError::Math(MathError::DegenerateVector));

        // Two equal points
        assert_eq!(
            Plane::from_points(p(1.0, 2.0, 3.0), p(1.0, 2.0, 3.0), p(4.0, 5.0, 6.0)).map(|_| ()),
            degenerate
        );
        // Collinear points
        assert_eq!(
            Plane::from_points(p(1.0, 2.0, 3.0), p(2.0, 4.0, 6.0), p(4.0, 8.0, 12.0)).map(|_| ()),
            degenerate
        );
    }

    #[test]
    fn test_plane_normal() {
        let plane = Plane::from_points(p(0.0, 0.0, 1.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)).unwrap();
        let s = (1.0f64 / 3.0).sqrt();
        let n = plane.normal_at(p(0.0, 0.0, 1.0)).unwrap();
        assert!(n.abs_diff_eq(v(s, s, s), 1e-12) || n.abs_diff_eq(v(-s, -s, -s), 1e-12));
    }

    #[test]
    fn test_ray_crosses_plane() {
        let ray = Ray::new(p(1.0, 1.0, 1.0), v(-1.0, 0.0, -1.0));
        let points = sample_plane().find_intersections(&ray);
        assert_eq!(points.len(), 1);
        assert!(points[0].abs_diff_eq(p(0.0, 1.0, 0.0), 1e-12));
    }

    #[test]
    fn test_ray_away_from_plane() {
        let ray = Ray::new(p(1.0, 1.0, 1.0), v(1.0, 1.0, 2.0));
        assert!(sample_plane().find_intersections(&ray).is_empty());
    }

    #[test]
    fn test_parallel_rays() {
        let plane = sample_plane();
        // Lies in the plane
        assert!(plane
            .find_intersections(&Ray::new(p(0.0, 1.0, 0.0), v(1.0, 0.0, 0.0)))
            .is_empty());
        // Outside the plane
        assert!(plane
            .find_intersections(&Ray::new(p(0.0, 1.0, 1.0), v(1.0, 0.0, 0.0)))
            .is_empty());
    }

    #[test]
    fn test_orthogonal_rays() {
        let plane = sample_plane();

        // Before the plane
        let points = plane.find_intersections(&Ray::new(p(0.0, 1.0, 1.0), v(0.0, 0.0, -1.0)));
        assert_eq!(points.len(), 1);
        assert!(points[0].abs_diff_eq(p(0.0, 1.0, 0.0), 1e-12));

        // In the plane
        assert!(plane
            .find_intersections(&Ray::new(p(0.0, 2.0, 0.0), v(0.0, 0.0, -1.0)))
            .is_empty());

        // After the plane
        assert!(plane
            .find_intersections(&Ray::new(p(0.0, 2.0, -1.0), v(0.0, 0.0, -1.0)))
            .is_empty());
    }

    #[test]
    fn test_ray_starts_on_plane() {
        let plane = sample_plane();
        // At the reference point
        assert!(plane
            .find_intersections(&Ray::new(plane.q0(), v(1.0, 1.0, 0.0)))
            .is_empty());
        // Elsewhere on the plane, neither parallel nor orthogonal
        assert!(plane
            .find_intersections(&Ray::new(p(0.0, 1.0, 0.0), v(1.0, 1.0, -1.0)))
            .is_empty());
    }
}
